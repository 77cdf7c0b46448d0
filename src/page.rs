//! Page Controller - Startup and event routing for every component
//!
//! Builds each component once from the injected [`Elements`] and [`Config`],
//! then forwards page events to whichever components care. Components share
//! nothing but the config and the element lookup; the one cross-component
//! route is Escape, which closes the menu through the single [`Navigation`].
//!
//! Time-driven work (typing, staggered skill fills, toast lifecycles, loader
//! fade) all advances through [`Controller::tick`], so a host needs exactly
//! one frame loop.
//!
//! # Example
//!
//! ```ignore
//! let mut page = Controller::new(config, &elements);
//! page.mount(now, &viewport, &view, prefers_reduced_motion);
//!
//! // scroll listener
//! page.on_scroll(now, &viewport, &view);
//!
//! // every animation frame
//! page.tick(now, &view);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::a11y::Accessibility;
use crate::config::Config;
use crate::contact::ContactForm;
use crate::dom::{Elements, Viewport};
use crate::nav::Navigation;
use crate::perf::{self, LazyImages};
use crate::reveal::ScrollReveal;
use crate::skills::SkillBars;
use crate::toast::{ToastStack, ToastTiming};
use crate::typing::TypingAnimator;
use crate::view::{Class, Target, ViewState};

pub struct Controller {
    config: Config,
    typing: Option<TypingAnimator>,
    nav: Navigation,
    reveal: ScrollReveal,
    skills: SkillBars,
    contact: Option<Rc<ContactForm>>,
    toasts: Rc<RefCell<ToastStack>>,
    images: LazyImages,
    a11y: Accessibility,
    has_loader: bool,
    /// When the faded loader gets `display: none`.
    loader_hide_at: Option<f64>,
    last_tick: Option<f64>,
}

impl Controller {
    pub fn new(config: Config, elements: &Elements) -> Self {
        let typing = if elements.typed_text {
            TypingAnimator::from_config(&config)
                .map_err(|err| log::warn!("typing animation disabled: {err}"))
                .ok()
        } else {
            log::debug!("no typed-text element, typing animation disabled");
            None
        };

        Self {
            typing,
            nav: Navigation::new(&config, elements),
            reveal: ScrollReveal::new(&config, elements),
            skills: SkillBars::new(&config, elements),
            contact: ContactForm::new(&config, elements).map(Rc::new),
            toasts: Rc::new(RefCell::new(ToastStack::new(ToastTiming::from_config(&config)))),
            images: LazyImages::new(elements),
            a11y: Accessibility::new(),
            has_loader: elements.loader,
            loader_hide_at: None,
            last_tick: None,
            config,
        }
    }

    /// DOM-ready startup.
    pub fn mount(
        &mut self,
        now: f64,
        viewport: &impl Viewport,
        view: &impl ViewState,
        prefers_reduced_motion: bool,
    ) {
        // First typing step renders immediately
        self.tick(now, view);

        self.nav.init(viewport, view);
        self.reveal.check(viewport, view);
        perf::preload_font(&self.config, view);
        self.a11y.init(&self.config, prefers_reduced_motion, view);

        view.set_class(Target::Body, Class::LOADED, true);
        log::info!("portfolio page initialized");
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Window scroll. Each component throttles independently.
    pub fn on_scroll(&mut self, now: f64, viewport: &impl Viewport, view: &impl ViewState) {
        self.nav.on_scroll(now, viewport, view);
        self.reveal.on_scroll(now, viewport, view);
        self.skills.on_scroll(now, viewport, view);
    }

    /// Hamburger click.
    pub fn on_menu_toggle(&mut self, view: &impl ViewState) {
        self.nav.toggle_menu(view);
    }

    /// Nav link click. Returns `true` if the default action must be prevented.
    pub fn on_nav_click(&mut self, index: usize, viewport: &impl Viewport, view: &impl ViewState) -> bool {
        self.nav.on_link_click(index, viewport, view)
    }

    pub fn on_keydown(&mut self, key: &str, view: &impl ViewState) {
        self.a11y.on_keydown(key, &mut self.nav, view);
    }

    pub fn on_mouse_down(&mut self, view: &impl ViewState) {
        self.a11y.on_mouse_down(view);
    }

    pub fn on_skip_link_focus(&self, view: &impl ViewState) {
        self.a11y.on_skip_link_focus(view);
    }

    pub fn on_skip_link_blur(&self, view: &impl ViewState) {
        self.a11y.on_skip_link_blur(view);
    }

    /// Lazy image sighting. Returns `true` when the image should be unobserved.
    pub fn on_image_visible(&mut self, index: usize, view: &impl ViewState) -> bool {
        self.images.on_visible(index, view)
    }

    /// Window `load`: start fading the loader out.
    pub fn on_load(&mut self, now: f64, view: &impl ViewState) {
        if !self.has_loader {
            return;
        }
        view.set_style(Target::Loader, "opacity", "0");
        self.loader_hide_at = Some(now + f64::from(self.config.loader_fade_ms));
    }

    /// Advance every time-driven component to `now`.
    pub fn tick(&mut self, now: f64, view: &impl ViewState) {
        let elapsed = self.last_tick.map_or(0.0, |last| now - last);
        self.last_tick = Some(now);

        if let Some(typing) = self.typing.as_mut() {
            if typing.tick(elapsed) {
                view.set_text(Target::TypedText, typing.text());
            }
        }

        self.skills.tick(now, view);

        match self.toasts.try_borrow_mut() {
            Ok(mut toasts) => {
                toasts.tick(now, view);
            }
            // A submission is reporting; catch up next frame
            Err(_) => log::trace!("toast stack busy"),
        }

        if let Some(at) = self.loader_hide_at {
            if now >= at {
                view.set_style(Target::Loader, "display", "none");
                self.loader_hide_at = None;
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn typing(&self) -> Option<&TypingAnimator> {
        self.typing.as_ref()
    }

    pub fn nav(&self) -> &Navigation {
        &self.nav
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn skills(&self) -> &SkillBars {
        &self.skills
    }

    pub fn images(&self) -> &LazyImages {
        &self.images
    }

    pub fn a11y(&self) -> &Accessibility {
        &self.a11y
    }

    /// Shared handle for async submissions; `None` without a contact form.
    pub fn contact(&self) -> Option<Rc<ContactForm>> {
        self.contact.clone()
    }

    pub fn toasts(&self) -> Rc<RefCell<ToastStack>> {
        self.toasts.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
