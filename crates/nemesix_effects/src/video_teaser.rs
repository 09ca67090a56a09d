//! Intro video teaser started with the Enter key

use nemesix_core::{event_types, Disposer, EventTarget, Window};

use crate::lookup;

/// On Enter, empty the intro header and show and play the video
///
/// Playing is recorded as `data-state="playing"` on the video element.
pub fn install_video_teaser(window: &Window, intro_id: &str, video_id: &str) -> Option<Disposer> {
    let (intro, video) = {
        let doc = window.document();
        (
            lookup::by_id(&doc, intro_id, "video teaser")?,
            lookup::by_id(&doc, video_id, "video teaser")?,
        )
    };

    let weak = window.downgrade();
    let listener = window.add_event_listener(EventTarget::Document, event_types::KEY_DOWN, move |event| {
        if event.key.as_deref() != Some("Enter") {
            return;
        }
        if let Some(window) = weak.upgrade() {
            let mut doc = window.document_mut();
            doc.set_text(intro, "");
            doc.set_style_keyword(video, "display", "block");
            doc.set_attribute(video, "data-state", "playing");
            tracing::debug!("video teaser playing");
        }
    });

    let mut disposer = Disposer::new();
    disposer.listener(listener);
    Some(disposer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_plays_video() {
        let window = Window::new(800.0, 600.0);
        let (intro, video) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let intro = doc.build(body, "header").id("intro").finish();
            doc.build(intro, "h1").text("Press Enter").finish();
            let video = doc
                .build(body, "video")
                .id("introVideo")
                .style("display", "none")
                .finish();
            (intro, video)
        };
        install_video_teaser(&window, "intro", "introVideo").unwrap();

        window.key_down("a");
        assert_eq!(window.document().text_content(intro), "Press Enter");

        window.key_down("Enter");
        let doc = window.document();
        assert!(doc.children(intro).is_empty());
        assert_eq!(doc.text_content(intro), "");
        assert_eq!(doc.style_keyword(video, "display"), Some("block"));
        assert_eq!(doc.attribute(video, "data-state"), Some("playing"));
    }

    #[test]
    fn test_requires_both_elements() {
        let window = Window::new(800.0, 600.0);
        {
            let mut doc = window.document_mut();
            let body = doc.body();
            doc.build(body, "header").id("intro").finish();
        }
        assert!(install_video_teaser(&window, "intro", "introVideo").is_none());
    }
}
