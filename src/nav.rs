//! Navigation Controller - Mobile menu, navbar state, active link, smooth scroll
//!
//! - Mobile menu open/close (locks page scroll while open)
//! - `scrolled` class on the navbar past a fixed offset
//! - Active nav link for the section under the fixed header
//! - Smooth scrolling for in-page nav links
//!
//! Scroll-bound work goes through a [`Throttle`] so bursts of scroll events
//! cost at most one update per frame.
//!
//! # Example
//!
//! ```ignore
//! let mut nav = Navigation::new(&config, &elements);
//! nav.init(&viewport, &view);
//!
//! // On every scroll event
//! nav.on_scroll(performance_now, &viewport, &view);
//!
//! // On a nav link click; `true` means prevent the default jump
//! let handled = nav.on_link_click(index, &viewport, &view);
//! ```

use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::config::Config;
use crate::dom::{Elements, SectionBounds, Viewport};
use crate::throttle::Throttle;
use crate::view::{Class, Target, ViewState};

pub struct Navigation {
    links: Vec<String>,
    has_menu: bool,
    has_navbar: bool,
    scroll_offset: f64,
    header_height: f64,
    navbar_threshold: f64,
    menu_open: Signal<bool>,
    /// Last `scrolled` state written to the navbar.
    scrolled: Option<bool>,
    /// Id of the section whose link is highlighted.
    active: Option<String>,
    throttle: Throttle,
}

impl Navigation {
    pub fn new(config: &Config, elements: &Elements) -> Self {
        Self {
            links: elements.nav_links.clone(),
            has_menu: elements.hamburger && elements.nav_menu,
            has_navbar: elements.navbar,
            scroll_offset: config.scroll_offset,
            header_height: config.header_height,
            navbar_threshold: config.navbar_threshold,
            menu_open: signal(false),
            scrolled: None,
            active: None,
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    /// Initial pass before any scroll event.
    pub fn init(&mut self, viewport: &impl Viewport, view: &impl ViewState) {
        let scroll_y = viewport.scroll_y();
        self.update_navbar(scroll_y, view);
        self.update_active(scroll_y, &viewport.sections(), view);
    }

    // =========================================================================
    // Mobile menu
    // =========================================================================

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    pub fn menu_open_signal(&self) -> Signal<bool> {
        self.menu_open.clone()
    }

    pub fn toggle_menu(&mut self, view: &impl ViewState) {
        let open = !self.menu_open.get();
        self.set_menu(open, view);
    }

    pub fn close_menu(&mut self, view: &impl ViewState) {
        self.set_menu(false, view);
    }

    fn set_menu(&mut self, open: bool, view: &impl ViewState) {
        if !self.has_menu {
            return;
        }
        view.set_class(Target::Hamburger, Class::ACTIVE, open);
        view.set_class(Target::NavMenu, Class::ACTIVE, open);
        view.set_style(Target::Body, "overflow", if open { "hidden" } else { "" });
        self.menu_open.set(open);
    }

    // =========================================================================
    // Scroll-driven state
    // =========================================================================

    /// Throttled scroll handler. Returns `true` if the update ran.
    pub fn on_scroll(&mut self, now: f64, viewport: &impl Viewport, view: &impl ViewState) -> bool {
        if !self.throttle.try_fire(now) {
            return false;
        }
        let scroll_y = viewport.scroll_y();
        self.update_navbar(scroll_y, view);
        self.update_active(scroll_y, &viewport.sections(), view);
        true
    }

    pub fn update_navbar(&mut self, scroll_y: f64, view: &impl ViewState) {
        if !self.has_navbar {
            return;
        }
        let scrolled = scroll_y > self.navbar_threshold;
        if self.scrolled != Some(scrolled) {
            view.set_class(Target::Navbar, Class::SCROLLED, scrolled);
            self.scrolled = Some(scrolled);
        }
    }

    /// Highlight the link of the first section containing the header probe.
    ///
    /// Keeps the previous highlight when no section matches.
    pub fn update_active(
        &mut self,
        scroll_y: f64,
        sections: &[SectionBounds],
        view: &impl ViewState,
    ) -> Option<&str> {
        let probe = scroll_y + self.scroll_offset;

        if let Some(section) = sections.iter().find(|s| s.contains(probe)) {
            if self.active.as_deref() != Some(section.id.as_str()) {
                for i in 0..self.links.len() {
                    view.set_class(Target::NavLink(i), Class::ACTIVE, false);
                }
                if let Some(i) = self.link_for(&section.id) {
                    view.set_class(Target::NavLink(i), Class::ACTIVE, true);
                }
                self.active = Some(section.id.clone());
            }
        }

        self.active.as_deref()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn link_for(&self, id: &str) -> Option<usize> {
        self.links.iter().position(|href| href.strip_prefix('#') == Some(id))
    }

    // =========================================================================
    // Smooth scrolling
    // =========================================================================

    /// Scroll position for an in-page `href`, accounting for the fixed header.
    pub fn scroll_target(&self, href: &str, sections: &[SectionBounds]) -> Option<f64> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| (s.top - self.header_height).max(0.0))
    }

    /// Nav link click: closes the menu and smooth-scrolls to in-page targets.
    ///
    /// Returns `true` when the default navigation must be prevented.
    pub fn on_link_click(
        &mut self,
        index: usize,
        viewport: &impl Viewport,
        view: &impl ViewState,
    ) -> bool {
        self.close_menu(view);

        let Some(href) = self.links.get(index) else {
            return false;
        };
        if !href.starts_with('#') {
            return false;
        }
        if let Some(top) = self.scroll_target(href, &viewport.sections()) {
            view.scroll_to(top, true);
        } else {
            log::debug!("no section for nav link `{href}`");
        }
        true
    }
}

/// Mirror the menu state onto the hamburger's `aria-expanded`.
///
/// Runs once immediately, then on every change. Returns the effect's stop
/// function.
pub fn bind_expanded<V: ViewState + 'static>(menu_open: Signal<bool>, view: Rc<V>) -> impl FnOnce() {
    effect(move || {
        let expanded = if menu_open.get() { "true" } else { "false" };
        view.set_attribute(Target::Hamburger, "aria-expanded", expanded);
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StaticViewport;
    use crate::view::MemoryView;

    fn elements() -> Elements {
        Elements {
            hamburger: true,
            nav_menu: true,
            navbar: true,
            nav_links: vec!["#home".into(), "#about".into(), "#skills".into(), "/resume.pdf".into()],
            ..Default::default()
        }
    }

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 600.0),
            SectionBounds::new("about", 600.0, 800.0),
            SectionBounds::new("skills", 1400.0, 700.0),
        ]
    }

    fn viewport(scroll_y: f64) -> StaticViewport {
        StaticViewport { scroll_y, sections: sections(), ..StaticViewport::new(800.0) }
    }

    fn setup() -> (Navigation, MemoryView) {
        (Navigation::new(&Config::default(), &elements()), MemoryView::new())
    }

    #[test]
    fn test_toggle_menu_opens_and_locks_scroll() {
        let (mut nav, view) = setup();

        nav.toggle_menu(&view);

        assert!(nav.is_menu_open());
        assert!(view.has_class(Target::Hamburger, Class::ACTIVE));
        assert!(view.has_class(Target::NavMenu, Class::ACTIVE));
        assert_eq!(view.style(Target::Body, "overflow").as_deref(), Some("hidden"));
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let (mut nav, view) = setup();
        let before = (
            view.node(Target::Hamburger).classes,
            view.node(Target::NavMenu).classes,
            view.style(Target::Body, "overflow"),
        );

        nav.toggle_menu(&view);
        nav.toggle_menu(&view);

        assert!(!nav.is_menu_open());
        let after = (
            view.node(Target::Hamburger).classes,
            view.node(Target::NavMenu).classes,
            view.style(Target::Body, "overflow"),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_close_menu_idempotent() {
        let (mut nav, view) = setup();
        nav.toggle_menu(&view);

        nav.close_menu(&view);
        nav.close_menu(&view);

        assert!(!nav.is_menu_open());
        assert!(!view.has_class(Target::NavMenu, Class::ACTIVE));
        assert_eq!(view.style(Target::Body, "overflow"), None);
    }

    #[test]
    fn test_menu_missing_is_noop() {
        let elements = Elements { hamburger: true, ..Default::default() };
        let mut nav = Navigation::new(&Config::default(), &elements);
        let view = MemoryView::new();

        nav.toggle_menu(&view);

        assert!(!nav.is_menu_open());
        assert_eq!(view.writes(), 0);
    }

    #[test]
    fn test_navbar_scrolled_threshold() {
        let (mut nav, view) = setup();

        nav.update_navbar(50.0, &view);
        assert!(!view.has_class(Target::Navbar, Class::SCROLLED));

        nav.update_navbar(51.0, &view);
        assert!(view.has_class(Target::Navbar, Class::SCROLLED));

        nav.update_navbar(0.0, &view);
        assert!(!view.has_class(Target::Navbar, Class::SCROLLED));
    }

    #[test]
    fn test_navbar_skips_redundant_writes() {
        let (mut nav, view) = setup();

        nav.update_navbar(300.0, &view);
        let writes = view.writes();
        nav.update_navbar(400.0, &view);
        nav.update_navbar(500.0, &view);

        assert_eq!(view.writes(), writes);
    }

    #[test]
    fn test_active_section_uses_header_offset() {
        let (mut nav, view) = setup();

        // 550 + 100 = 650 falls in "about"
        assert_eq!(nav.update_active(550.0, &sections(), &view), Some("about"));
        assert!(view.has_class(Target::NavLink(1), Class::ACTIVE));
        assert!(!view.has_class(Target::NavLink(0), Class::ACTIVE));

        // 1350 + 100 = 1450 falls in "skills"
        nav.update_active(1350.0, &sections(), &view);
        assert!(view.has_class(Target::NavLink(2), Class::ACTIVE));
        assert!(!view.has_class(Target::NavLink(1), Class::ACTIVE));
    }

    #[test]
    fn test_active_first_match_wins() {
        let (mut nav, view) = setup();
        let overlapping = vec![
            SectionBounds::new("about", 0.0, 1000.0),
            SectionBounds::new("skills", 0.0, 1000.0),
        ];

        assert_eq!(nav.update_active(0.0, &overlapping, &view), Some("about"));
    }

    #[test]
    fn test_active_kept_when_no_match() {
        let (mut nav, view) = setup();
        nav.update_active(0.0, &sections(), &view);

        // Past the last section
        assert_eq!(nav.update_active(5000.0, &sections(), &view), Some("home"));
        assert!(view.has_class(Target::NavLink(0), Class::ACTIVE));
    }

    #[test]
    fn test_active_section_without_link_clears_highlight() {
        let (mut nav, view) = setup();
        nav.update_active(0.0, &sections(), &view);

        let sections = vec![SectionBounds::new("contact", 0.0, 1000.0)];
        assert_eq!(nav.update_active(0.0, &sections, &view), Some("contact"));
        assert!(!view.has_class(Target::NavLink(0), Class::ACTIVE));
    }

    #[test]
    fn test_on_scroll_throttled() {
        let (mut nav, view) = setup();
        let vp = viewport(700.0);

        assert!(nav.on_scroll(0.0, &vp, &view));
        assert!(!nav.on_scroll(5.0, &vp, &view));
        assert!(!nav.on_scroll(15.0, &vp, &view));
        assert!(nav.on_scroll(16.0, &vp, &view));
        assert_eq!(nav.active_section(), Some("about"));
        assert!(view.has_class(Target::Navbar, Class::SCROLLED));
    }

    #[test]
    fn test_init_highlights_before_scroll() {
        let (mut nav, view) = setup();
        nav.init(&viewport(0.0), &view);

        assert_eq!(nav.active_section(), Some("home"));
        assert!(!view.has_class(Target::Navbar, Class::SCROLLED));
    }

    #[test]
    fn test_scroll_target_subtracts_header() {
        let (nav, _) = setup();

        assert_eq!(nav.scroll_target("#about", &sections()), Some(520.0));
        assert_eq!(nav.scroll_target("#home", &sections()), Some(0.0));
        assert_eq!(nav.scroll_target("#", &sections()), None);
        assert_eq!(nav.scroll_target("#nope", &sections()), None);
        assert_eq!(nav.scroll_target("/resume.pdf", &sections()), None);
    }

    #[test]
    fn test_link_click_smooth_scrolls_and_closes_menu() {
        let (mut nav, view) = setup();
        nav.toggle_menu(&view);

        assert!(nav.on_link_click(2, &viewport(0.0), &view));

        assert_eq!(view.scrolls(), vec![(1320.0, true)]);
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_external_link_not_intercepted() {
        let (mut nav, view) = setup();
        nav.toggle_menu(&view);

        assert!(!nav.on_link_click(3, &viewport(0.0), &view));
        assert!(view.scrolls().is_empty());
        // Menu still closes
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_expanded_follows_menu_until_stopped() {
        let mut nav = Navigation::new(&Config::default(), &elements());
        let view = Rc::new(MemoryView::new());

        let stop = bind_expanded(nav.menu_open_signal(), view.clone());
        assert_eq!(view.attribute(Target::Hamburger, "aria-expanded").as_deref(), Some("false"));

        nav.toggle_menu(&*view);
        assert_eq!(view.attribute(Target::Hamburger, "aria-expanded").as_deref(), Some("true"));
        nav.close_menu(&*view);
        assert_eq!(view.attribute(Target::Hamburger, "aria-expanded").as_deref(), Some("false"));

        stop();
        nav.toggle_menu(&*view);
        assert_eq!(view.attribute(Target::Hamburger, "aria-expanded").as_deref(), Some("false"));
    }
}
