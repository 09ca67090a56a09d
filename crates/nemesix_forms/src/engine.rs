//! Live form validation
//!
//! Attaching to a form wires its required fields:
//!
//! ```text
//! blur   → validate the field, mark valid/invalid, show the message
//! input  → clear the message and both markers until the next check
//! submit → validate every field; cancel if any failed
//! ```
//!
//! The inline message is a `div.field-error` placed right after its
//! field. A field never has more than one.

use nemesix_core::{event_types, Disposer, Document, EventTarget, NodeId, Selector, WeakWindow, Window};
use std::rc::Rc;

use crate::error::{FieldError, FieldResult};
use crate::rules::RuleTable;

/// Fields that take part in validation
pub const REQUIRED_FIELDS: &str = "input[required], textarea[required]";

/// Class of the inline message element
pub const ERROR_CLASS: &str = "field-error";
pub const VALID_CLASS: &str = "valid";
pub const INVALID_CLASS: &str = "invalid";

/// Validate one field and show the result
pub fn validate_field(doc: &mut Document, rules: &RuleTable, field: NodeId) -> FieldResult {
    let result = {
        let value = doc.value(field).unwrap_or_default();
        let name = doc.attribute(field, "name").unwrap_or_default();
        rules.validate(value, name)
    };
    apply_result(doc, field, &result);
    result
}

/// Mark a field valid or invalid and update its inline message
pub fn apply_result(doc: &mut Document, field: NodeId, result: &FieldResult) {
    remove_error(doc, field);
    match result {
        Ok(()) => {
            doc.add_class(field, VALID_CLASS);
            doc.remove_class(field, INVALID_CLASS);
        }
        Err(error) => {
            doc.add_class(field, INVALID_CLASS);
            doc.remove_class(field, VALID_CLASS);

            let message = doc.create_element("div");
            doc.add_class(message, ERROR_CLASS);
            doc.set_text(message, error.to_string());
            doc.insert_after(field, message);
            if !doc.is_connected(message) {
                // Detached field: nowhere to show the message
                doc.remove(message);
            }
        }
    }
}

/// Return a field to the neutral state
pub fn clear_field(doc: &mut Document, field: NodeId) {
    remove_error(doc, field);
    doc.remove_class(field, VALID_CLASS);
    doc.remove_class(field, INVALID_CLASS);
}

/// The inline message currently shown for a field
pub fn error_node(doc: &Document, field: NodeId) -> Option<NodeId> {
    doc.next_sibling(field)
        .filter(|&sibling| doc.has_class(sibling, ERROR_CLASS))
}

fn remove_error(doc: &mut Document, field: NodeId) {
    if let Some(node) = error_node(doc, field) {
        doc.remove(node);
    }
}

/// Handle to one attached form
pub struct FormController {
    window: WeakWindow,
    form: NodeId,
    fields: Vec<NodeId>,
    rules: Rc<RuleTable>,
    disposer: Disposer,
}

impl FormController {
    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Required fields found at attach time
    pub fn fields(&self) -> &[NodeId] {
        &self.fields
    }

    /// Validate every field now, as a submission would
    ///
    /// Returns the failures in field order.
    pub fn validate_all(&self) -> Vec<(NodeId, FieldError)> {
        let Some(window) = self.window.upgrade() else {
            return Vec::new();
        };
        let mut doc = window.document_mut();
        validate_fields(&mut doc, &self.rules, &self.fields)
    }

    /// Message shown next to a field, if any
    pub fn message(&self, field: NodeId) -> Option<String> {
        let window = self.window.upgrade()?;
        let doc = window.document();
        error_node(&doc, field).map(|node| doc.text_content(node))
    }

    /// Remove every listener this form registered
    pub fn dispose(self) {
        if let Some(window) = self.window.upgrade() {
            self.disposer.dispose(&window);
        }
    }
}

fn validate_fields(doc: &mut Document, rules: &RuleTable, fields: &[NodeId]) -> Vec<(NodeId, FieldError)> {
    // No short-circuit: every field gets its marker and message
    fields
        .iter()
        .filter_map(|&field| validate_field(doc, rules, field).err().map(|e| (field, e)))
        .collect()
}

/// Entry point of the form validation engine
pub struct FormValidation;

impl FormValidation {
    /// Attach to the first form matching `form`
    ///
    /// Returns `None` when no form matches.
    pub fn attach(window: &Window, form: &Selector, rules: Rc<RuleTable>) -> Option<FormController> {
        let (form_node, fields) = {
            let doc = window.document();
            let Some(form_node) = doc.select(form) else {
                tracing::debug!("no form matches `{}`", form);
                return None;
            };
            let required = Selector::parse(REQUIRED_FIELDS).ok()?;
            (form_node, doc.select_all_in(form_node, &required))
        };

        let mut disposer = Disposer::new();
        for &field in &fields {
            let target = EventTarget::Node(field);

            let weak = window.downgrade();
            let table = Rc::clone(&rules);
            disposer.listener(window.add_event_listener(target, event_types::BLUR, move |_| {
                if let Some(window) = weak.upgrade() {
                    let result = validate_field(&mut window.document_mut(), &table, field);
                    tracing::trace!("field {} validated: {:?}", field.to_raw(), result);
                }
            }));

            let weak = window.downgrade();
            disposer.listener(window.add_event_listener(target, event_types::INPUT, move |_| {
                if let Some(window) = weak.upgrade() {
                    clear_field(&mut window.document_mut(), field);
                }
            }));
        }

        let submit = submit_handler(window.downgrade(), Rc::clone(&rules), fields.clone());
        disposer.listener(window.add_event_listener(form_node.into(), event_types::SUBMIT, submit));

        tracing::debug!("form `{}` attached with {} required fields", form, fields.len());

        Some(FormController {
            window: window.downgrade(),
            form: form_node,
            fields,
            rules,
            disposer,
        })
    }
}

fn submit_handler(
    window: WeakWindow,
    rules: Rc<RuleTable>,
    fields: Vec<NodeId>,
) -> impl Fn(&nemesix_core::EventContext) + 'static {
    move |event| {
        let Some(window) = window.upgrade() else {
            return;
        };
        let failures = validate_fields(&mut window.document_mut(), &rules, &fields);
        if !failures.is_empty() {
            tracing::debug!("submission blocked: {} invalid fields", failures.len());
            event.prevent_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nemesix_core::SubmitOutcome;

    struct LoginPage {
        window: Window,
        form: NodeId,
        email: NodeId,
        password: NodeId,
        comment: NodeId,
    }

    fn login_page() -> LoginPage {
        let window = Window::new(800.0, 600.0);
        let (form, email, password, comment) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let form = doc
                .build(body, "form")
                .class("styled-form")
                .attr("action", "/login")
                .finish();
            let group = doc.build(form, "div").class("form-group").finish();
            let email = doc
                .build(group, "input")
                .attr("name", "email")
                .attr("required", "")
                .finish();
            let password = doc
                .build(group, "input")
                .attr("name", "password")
                .attr("type", "password")
                .attr("required", "")
                .finish();
            let comment = doc
                .build(form, "textarea")
                .attr("name", "comment")
                .attr("required", "")
                .finish();
            doc.build(form, "input").attr("name", "nickname").finish();
            (form, email, password, comment)
        };
        LoginPage {
            window,
            form,
            email,
            password,
            comment,
        }
    }

    fn attach(page: &LoginPage) -> FormController {
        let selector = Selector::parse("form[action=\"/login\"]").unwrap();
        FormValidation::attach(&page.window, &selector, Rc::new(RuleTable::standard())).unwrap()
    }

    fn error_count(window: &Window) -> usize {
        window.document().query_selector_all(".field-error").unwrap().len()
    }

    #[test]
    fn test_attach_finds_required_fields() {
        let page = login_page();
        let controller = attach(&page);
        assert_eq!(controller.form(), page.form);
        assert_eq!(controller.fields(), &[page.email, page.password, page.comment]);
    }

    #[test]
    fn test_missing_form() {
        let page = login_page();
        let selector = Selector::parse("form[action=\"/register\"]").unwrap();
        assert!(FormValidation::attach(&page.window, &selector, Rc::new(RuleTable::standard())).is_none());
    }

    #[test]
    fn test_blur_marks_field() {
        let page = login_page();
        let controller = attach(&page);

        page.window.type_text(page.email, "notanemail");
        page.window.blur(page.email);
        {
            let doc = page.window.document();
            assert!(doc.has_class(page.email, "invalid"));
            assert!(!doc.has_class(page.email, "valid"));
        }
        assert_eq!(controller.message(page.email).as_deref(), Some("enter a valid email"));

        page.window.type_text(page.email, "a@b.co");
        assert!(controller.message(page.email).is_none());
        assert!(!page.window.document().has_class(page.email, "invalid"));

        page.window.blur(page.email);
        assert!(page.window.document().has_class(page.email, "valid"));
        assert!(controller.message(page.email).is_none());
    }

    #[test]
    fn test_repeated_blur_keeps_one_error() {
        let page = login_page();
        let controller = attach(&page);

        for _ in 0..3 {
            page.window.type_text(page.password, "123");
            page.window.blur(page.password);
            page.window.blur(page.password);
        }
        assert_eq!(error_count(&page.window), 1);
        assert_eq!(
            controller.message(page.password).as_deref(),
            Some("password must be at least 6 characters")
        );
    }

    #[test]
    fn test_submit_with_invalid_fields_is_cancelled() {
        let page = login_page();
        let controller = attach(&page);
        page.window.type_text(page.email, "a@b.co");

        assert_eq!(page.window.submit(page.form), SubmitOutcome::Cancelled);
        assert!(page.window.navigations().is_empty());

        // Password and comment are empty; both errors are visible
        assert_eq!(error_count(&page.window), 2);
        assert_eq!(controller.message(page.password).as_deref(), Some("this field is required"));
        assert_eq!(controller.message(page.comment).as_deref(), Some("this field is required"));
        assert!(page.window.document().has_class(page.email, "valid"));

        // Submitting again does not duplicate messages
        page.window.submit(page.form);
        assert_eq!(error_count(&page.window), 2);
    }

    #[test]
    fn test_submit_with_valid_fields_goes_through() {
        let page = login_page();
        attach(&page);
        page.window.type_text(page.email, "a@b.co");
        page.window.type_text(page.password, "123456");
        page.window.type_text(page.comment, "hello");

        assert_eq!(
            page.window.submit(page.form),
            SubmitOutcome::Submitted {
                action: Some("/login".to_string())
            }
        );
        assert_eq!(error_count(&page.window), 0);
    }

    #[test]
    fn test_independent_forms() {
        let page = login_page();
        let other_form = {
            let mut doc = page.window.document_mut();
            let body = doc.body();
            let form = doc.build(body, "form").attr("action", "/register").finish();
            doc.build(form, "input")
                .attr("name", "username")
                .attr("required", "")
                .finish();
            form
        };
        attach(&page);
        let register = FormValidation::attach(
            &page.window,
            &Selector::parse("form[action=\"/register\"]").unwrap(),
            Rc::new(RuleTable::standard()),
        )
        .unwrap();

        assert!(page.window.submit(other_form).is_cancelled());
        assert_eq!(error_count(&page.window), 1);
        assert_eq!(register.validate_all().len(), 1);
    }

    #[test]
    fn test_dispose_removes_listeners() {
        let page = login_page();
        let controller = attach(&page);
        controller.dispose();

        assert!(!page.window.submit(page.form).is_cancelled());
        assert_eq!(error_count(&page.window), 0);
    }

    #[test]
    fn test_controller_does_not_keep_window_alive() {
        let page = login_page();
        let controller = attach(&page);
        let email = page.email;
        let weak = page.window.downgrade();
        drop(page);

        assert!(weak.upgrade().is_none());
        assert!(controller.validate_all().is_empty());
        assert_eq!(controller.message(email), None);
        controller.dispose();
    }
}
