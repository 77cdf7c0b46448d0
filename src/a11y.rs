//! Accessibility Helper - Keyboard affordances, skip link, reduced motion
//!
//! - Escape closes the mobile menu (through the page's one [`Navigation`])
//! - Tab / mouse-down switch the interaction mode; mouse mode adds
//!   `using-mouse` to the body so focus rings can be hidden for pointer users
//! - A skip-to-content link is mounted first in the body, off-screen until
//!   focused
//! - Reduced-motion users get every animation and transition cut to ~0

use std::cell::Cell;

use crate::config::Config;
use crate::nav::Navigation;
use crate::view::{Class, Mount, Target, ViewState};

/// Stylesheet applied when the system asks for reduced motion.
pub const REDUCED_MOTION_CSS: &str = "*, *::before, *::after { \
    animation-duration: 0.01ms !important; \
    animation-iteration-count: 1 !important; \
    transition-duration: 0.01ms !important; }";

/// Media query for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Skip link position while hidden / focused.
pub const SKIP_LINK_HIDDEN_TOP: &str = "-40px";
pub const SKIP_LINK_SHOWN_TOP: &str = "6px";

/// Inline style for the skip link.
pub const SKIP_LINK_CSS: &str = "position: absolute; top: -40px; left: 6px; \
    background: var(--primary-color); color: white; padding: 8px; \
    text-decoration: none; border-radius: 4px; transition: top 0.3s; z-index: 10001;";

/// How the user is currently driving the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Keyboard,
    Mouse,
}

pub struct Accessibility {
    mode: Cell<InteractionMode>,
}

impl Default for Accessibility {
    fn default() -> Self {
        Self::new()
    }
}

impl Accessibility {
    pub fn new() -> Self {
        Self { mode: Cell::new(InteractionMode::Keyboard) }
    }

    /// Startup work: skip link and, if requested, reduced motion.
    pub fn init(&self, config: &Config, prefers_reduced_motion: bool, view: &impl ViewState) {
        self.add_skip_link(config, view);
        apply_reduced_motion(prefers_reduced_motion, view);
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode.get()
    }

    /// Document-level keydown.
    pub fn on_keydown(&self, key: &str, nav: &mut Navigation, view: &impl ViewState) {
        match key {
            "Escape" => nav.close_menu(view),
            "Tab" => {
                view.set_class(Target::Body, Class::USING_MOUSE, false);
                self.mode.set(InteractionMode::Keyboard);
            }
            _ => {}
        }
    }

    /// Document-level mousedown.
    pub fn on_mouse_down(&self, view: &impl ViewState) {
        view.set_class(Target::Body, Class::USING_MOUSE, true);
        self.mode.set(InteractionMode::Mouse);
    }

    pub fn add_skip_link(&self, config: &Config, view: &impl ViewState) {
        view.mount(Mount::SkipLink {
            href: config.skip_link_target.clone(),
            text: config.skip_link_text.clone(),
        });
    }

    pub fn on_skip_link_focus(&self, view: &impl ViewState) {
        view.set_style(Target::SkipLink, "top", SKIP_LINK_SHOWN_TOP);
    }

    pub fn on_skip_link_blur(&self, view: &impl ViewState) {
        view.set_style(Target::SkipLink, "top", SKIP_LINK_HIDDEN_TOP);
    }
}

/// Mount the reduced-motion override if the user asked for it.
pub fn apply_reduced_motion(prefers_reduced_motion: bool, view: &impl ViewState) -> bool {
    if prefers_reduced_motion {
        view.mount(Mount::Style { css: REDUCED_MOTION_CSS.to_string() });
    }
    prefers_reduced_motion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Elements;
    use crate::view::MemoryView;

    fn nav() -> Navigation {
        let elements = Elements { hamburger: true, nav_menu: true, ..Default::default() };
        Navigation::new(&Config::default(), &elements)
    }

    #[test]
    fn test_escape_closes_existing_menu() {
        let (a11y, mut nav, view) = (Accessibility::new(), nav(), MemoryView::new());
        nav.toggle_menu(&view);
        assert!(nav.is_menu_open());

        a11y.on_keydown("Escape", &mut nav, &view);

        assert!(!nav.is_menu_open());
        assert!(!view.has_class(Target::NavMenu, Class::ACTIVE));
        assert_eq!(view.style(Target::Body, "overflow"), None);
    }

    #[test]
    fn test_mouse_then_tab_switches_mode() {
        let (a11y, mut nav, view) = (Accessibility::new(), nav(), MemoryView::new());
        assert_eq!(a11y.mode(), InteractionMode::Keyboard);

        a11y.on_mouse_down(&view);
        assert_eq!(a11y.mode(), InteractionMode::Mouse);
        assert!(view.has_class(Target::Body, Class::USING_MOUSE));

        a11y.on_keydown("Tab", &mut nav, &view);
        assert_eq!(a11y.mode(), InteractionMode::Keyboard);
        assert!(!view.has_class(Target::Body, Class::USING_MOUSE));
    }

    #[test]
    fn test_other_keys_ignored() {
        let (a11y, mut nav, view) = (Accessibility::new(), nav(), MemoryView::new());
        a11y.on_mouse_down(&view);
        let writes = view.writes();

        a11y.on_keydown("Enter", &mut nav, &view);

        assert_eq!(a11y.mode(), InteractionMode::Mouse);
        assert_eq!(view.writes(), writes);
    }

    #[test]
    fn test_skip_link_mounted_and_revealed_on_focus() {
        let (a11y, view) = (Accessibility::new(), MemoryView::new());
        a11y.init(&Config::default(), false, &view);

        assert_eq!(
            view.mounted(),
            vec![Mount::SkipLink { href: "#main".into(), text: "Skip to main content".into() }]
        );

        a11y.on_skip_link_focus(&view);
        assert_eq!(view.style(Target::SkipLink, "top").as_deref(), Some("6px"));
        a11y.on_skip_link_blur(&view);
        assert_eq!(view.style(Target::SkipLink, "top").as_deref(), Some("-40px"));
    }

    #[test]
    fn test_reduced_motion() {
        let view = MemoryView::new();
        assert!(!apply_reduced_motion(false, &view));
        assert!(view.mounted().is_empty());

        assert!(apply_reduced_motion(true, &view));
        assert!(matches!(
            view.mounted().as_slice(),
            [Mount::Style { css }] if css.contains("0.01ms")
        ));
    }
}
