//! Page bootstrap
//!
//! [`PageRuntime::install`] waits for `DOMContentLoaded` and then attaches
//! the reveal engine, the configured forms and every enabled effect. With
//! the loading overlay enabled the intro starts once the overlay is gone;
//! without it the intro starts right away.

use nemesix_animation::AnimationScheduler;
use nemesix_core::{event_types, Disposer, EventTarget, ListenerId, NodeId, Selector, TimerId, Window};
use nemesix_effects::{
    install_flash, install_hover, install_loading, install_nav_selector, install_scroll_indicator,
    install_scroll_to_top, install_smooth_scroll, install_video_teaser, play_intro, spawn_particles, InfoBoxes,
    IntroOptions, LoadingOverlay, NavAutoHide,
};
use nemesix_forms::{FormController, FormValidation, RuleTable};
use nemesix_reveal::{RevealController, RevealEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::PageConfig;
use crate::error::Result;

/// Everything attached on DOM ready
#[derive(Default)]
struct PageState {
    attached: bool,
    reveal: Option<RevealController>,
    forms: Vec<FormController>,
    nav_auto_hide: Option<NavAutoHide>,
    loading: Option<LoadingOverlay>,
    scroll_indicator: Option<NodeId>,
    particles: Vec<NodeId>,
    intro_started: bool,
    typewriter: Option<TimerId>,
    disposer: Disposer,
}

/// The page behaviours installed on one window
pub struct PageRuntime {
    window: Window,
    scheduler: AnimationScheduler,
    info_boxes: InfoBoxes,
    ready: ListenerId,
    state: Rc<RefCell<PageState>>,
}

impl PageRuntime {
    /// Check the configuration and wait for DOM ready
    ///
    /// `rng` yields values in `[0, 1)` for particle placement.
    pub fn install<R>(window: &Window, config: PageConfig, rng: R) -> Result<Self>
    where
        R: FnMut() -> f32 + 'static,
    {
        config.validate()?;
        let forms = config.forms.form_selectors()?;

        let scheduler = AnimationScheduler::new(window);
        let info_boxes = InfoBoxes::new(window, config.effects.info_boxes.clone());
        let state = Rc::new(RefCell::new(PageState::default()));

        let ready = {
            let weak = window.downgrade();
            let scheduler = scheduler.clone();
            let state = Rc::clone(&state);
            let rng = Cell::new(Some(rng));
            window.add_event_listener(EventTarget::Document, event_types::DOM_READY, move |_| {
                let Some(window) = weak.upgrade() else {
                    return;
                };
                if state.borrow().attached {
                    return;
                }
                let Some(mut rng) = rng.take() else {
                    return;
                };
                attach_page(&window, &scheduler, &config, &forms, &state, &mut rng);
            })
        };

        Ok(Self {
            window: window.clone(),
            scheduler,
            info_boxes,
            ready,
            state,
        })
    }

    /// Install with `rand` supplying the particle positions
    pub fn install_default(window: &Window, config: PageConfig) -> Result<Self> {
        Self::install(window, config, rand::random::<f32>)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Team page switcher, usable from click handlers
    pub fn info_boxes(&self) -> &InfoBoxes {
        &self.info_boxes
    }

    /// Whether DOM ready has been handled
    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn with_reveal<T>(&self, f: impl FnOnce(&RevealController) -> T) -> Option<T> {
        self.state.borrow().reveal.as_ref().map(f)
    }

    pub fn with_forms<T>(&self, f: impl FnOnce(&[FormController]) -> T) -> T {
        f(&self.state.borrow().forms)
    }

    /// Last scroll offset seen by the nav auto-hide controller
    pub fn nav_last_scroll_top(&self) -> Option<f32> {
        self.state.borrow().nav_auto_hide.as_ref().map(NavAutoHide::last_scroll_top)
    }

    pub fn loading_overlay(&self) -> Option<NodeId> {
        self.state.borrow().loading.as_ref().map(|loading| loading.overlay)
    }

    pub fn scroll_indicator(&self) -> Option<NodeId> {
        self.state.borrow().scroll_indicator
    }

    pub fn particles(&self) -> Vec<NodeId> {
        self.state.borrow().particles.clone()
    }

    pub fn intro_started(&self) -> bool {
        self.state.borrow().intro_started
    }

    /// Remove every listener, observer and timer the page registered and
    /// stop its animations
    ///
    /// Nodes the effects appended stay in the document.
    pub fn dispose(self) {
        self.window.remove_event_listener(self.ready);
        let state = std::mem::take(&mut *self.state.borrow_mut());

        if let Some(reveal) = state.reveal {
            reveal.dispose();
        }
        for form in state.forms {
            form.dispose();
        }
        if let Some(nav) = state.nav_auto_hide {
            nav.into_disposer().dispose(&self.window);
        }
        if let Some(loading) = state.loading {
            loading.disposer.dispose(&self.window);
        }
        if let Some(typewriter) = state.typewriter {
            self.window.clear_timer(typewriter);
        }
        state.disposer.dispose(&self.window);

        let stopped = self.scheduler.cancel_all();
        tracing::debug!("page runtime disposed, {} animations stopped", stopped);
    }
}

fn attach_page(
    window: &Window,
    scheduler: &AnimationScheduler,
    config: &PageConfig,
    forms: &[Selector],
    state: &Rc<RefCell<PageState>>,
    rng: &mut dyn FnMut() -> f32,
) {
    state.borrow_mut().attached = true;
    let toggles = &config.effects.enabled;
    let mut disposer = Disposer::new();

    let reveal = if config.reveal.enabled {
        match RevealEngine::attach(
            window,
            scheduler,
            config.reveal.profiles.clone(),
            &config.reveal.options(),
        ) {
            Ok(reveal) => Some(reveal),
            Err(err) => {
                tracing::warn!("reveal engine not attached: {}", err);
                None
            }
        }
    } else {
        None
    };

    let mut controllers: Vec<FormController> = Vec::new();
    if config.forms.enabled {
        let rules = Rc::new(RuleTable::standard());
        for selector in forms {
            let node = window.document().select(selector);
            if node.is_some_and(|node| controllers.iter().any(|c| c.form() == node)) {
                tracing::debug!("form `{}` already attached", selector);
                continue;
            }
            if let Some(controller) = FormValidation::attach(window, selector, Rc::clone(&rules)) {
                controllers.push(controller);
            }
        }
    }

    let loading = toggles.loading.then(|| {
        let weak = window.downgrade();
        let intro_scheduler = scheduler.clone();
        let state = Rc::clone(state);
        let intro = toggles.intro.then(|| config.effects.intro.clone());
        install_loading(window, scheduler, &config.effects.loading, move || {
            if let (Some(window), Some(intro)) = (weak.upgrade(), intro) {
                start_intro(&window, &intro_scheduler, &intro, &state);
            }
        })
    });

    let scroll = &config.effects.scroll;
    let scroll_indicator = toggles.scroll_indicator.then(|| {
        let (indicator, registered) = install_scroll_indicator(window, scheduler, scroll);
        disposer.extend(registered);
        indicator
    });
    let nav_auto_hide = if toggles.nav_auto_hide {
        NavAutoHide::attach(window, scroll)
    } else {
        None
    };
    if toggles.scroll_to_top {
        if let Some(registered) = install_scroll_to_top(window, scheduler, scroll) {
            disposer.extend(registered);
        }
    }

    if toggles.hover {
        disposer.extend(install_hover(window, scheduler, &config.effects.hover));
    }
    if toggles.smooth_scroll {
        disposer.extend(install_smooth_scroll(window, scheduler, &config.effects.smooth_scroll));
    }
    if toggles.flash {
        disposer.extend(install_flash(window, &config.effects.flash));
    }
    if toggles.nav_selector {
        if let Some(registered) = install_nav_selector(window, &config.effects.nav_selector_id) {
            disposer.extend(registered);
        }
    }
    if toggles.video_teaser {
        let effects = &config.effects;
        if let Some(registered) = install_video_teaser(window, &effects.intro_id, &effects.intro_video_id) {
            disposer.extend(registered);
        }
    }

    let particles = if toggles.particles {
        spawn_particles(window, scheduler, &config.particles, &mut || rng())
    } else {
        Vec::new()
    };

    tracing::debug!(
        "page attached: reveal watching {}, {} forms, {} registrations",
        reveal.as_ref().map_or(0, RevealController::watched_count),
        controllers.len(),
        disposer.len()
    );

    {
        let mut state = state.borrow_mut();
        state.reveal = reveal;
        state.forms = controllers;
        state.nav_auto_hide = nav_auto_hide;
        state.loading = loading;
        state.scroll_indicator = scroll_indicator;
        state.particles = particles;
        state.disposer = disposer;
    }

    if toggles.intro && !toggles.loading {
        start_intro(window, scheduler, &config.effects.intro, state);
    }
}

fn start_intro(window: &Window, scheduler: &AnimationScheduler, options: &IntroOptions, state: &Rc<RefCell<PageState>>) {
    if std::mem::replace(&mut state.borrow_mut().intro_started, true) {
        return;
    }
    let typewriter = play_intro(window, scheduler, options);
    state.borrow_mut().typewriter = typewriter;
    tracing::debug!("intro started");
}
