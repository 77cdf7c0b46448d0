//! DOM Module - Element lookup and viewport metrics
//!
//! [`Elements`] is the injected element lookup: which optional elements exist
//! on the page plus the per-element data the components need (link hrefs,
//! `data-percent`, `data-src`). It is built once at startup.
//!
//! [`Viewport`] answers layout questions at the moment they are asked. Section
//! geometry is read fresh on every call, never cached.

/// Which page elements exist, and the data attached to them.
///
/// Missing optional elements disable only the feature that needs them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Elements {
    pub typed_text: bool,
    pub hamburger: bool,
    pub nav_menu: bool,
    pub navbar: bool,
    pub contact_form: bool,
    pub submit_button: bool,
    pub skills_section: bool,
    pub loader: bool,
    /// `href` of each nav link, in document order.
    pub nav_links: Vec<String>,
    /// Number of elements registered for scroll reveal.
    pub reveal_count: usize,
    /// Raw `data-percent` of each skill bar, in document order.
    pub skill_bars: Vec<Option<String>>,
    /// `data-src` of each lazily loaded image, in document order.
    pub lazy_images: Vec<String>,
}

impl Elements {
    /// Index of the nav link pointing at `#id`.
    pub fn nav_link_for(&self, id: &str) -> Option<usize> {
        self.nav_links
            .iter()
            .position(|href| href.strip_prefix('#') == Some(id))
    }
}

/// Vertical extent of a page section, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    /// Whether `position` falls inside `[top, top + height)`.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Live layout metrics.
pub trait Viewport {
    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;
    /// Height of the visible viewport.
    fn inner_height(&self) -> f64;
    /// Sections carrying an id, in document order.
    fn sections(&self) -> Vec<SectionBounds>;
    /// Viewport-relative top edge of reveal element `index`.
    fn reveal_top(&self, index: usize) -> Option<f64>;
    /// Viewport-relative top edge of the skills section.
    fn skills_top(&self) -> Option<f64>;
}

/// Fixed page geometry for headless use.
///
/// Element tops are stored in document coordinates and reported relative to
/// the current `scroll_y`, the way `getBoundingClientRect` does.
#[derive(Debug, Clone, Default)]
pub struct StaticViewport {
    pub scroll_y: f64,
    pub inner_height: f64,
    pub sections: Vec<SectionBounds>,
    pub reveal_tops: Vec<f64>,
    pub skills_top: Option<f64>,
}

impl StaticViewport {
    pub fn new(inner_height: f64) -> Self {
        Self { inner_height, ..Self::default() }
    }
}

impl Viewport for StaticViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_height(&self) -> f64 {
        self.inner_height
    }

    fn sections(&self) -> Vec<SectionBounds> {
        self.sections.clone()
    }

    fn reveal_top(&self, index: usize) -> Option<f64> {
        self.reveal_tops.get(index).map(|top| top - self.scroll_y)
    }

    fn skills_top(&self) -> Option<f64> {
        self.skills_top.map(|top| top - self.scroll_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_link_for() {
        let elements = Elements {
            nav_links: vec!["#home".into(), "#about".into(), "/blog".into()],
            ..Default::default()
        };

        assert_eq!(elements.nav_link_for("about"), Some(1));
        assert_eq!(elements.nav_link_for("blog"), None);
        assert_eq!(elements.nav_link_for("missing"), None);
    }

    #[test]
    fn test_section_contains_is_half_open() {
        let section = SectionBounds::new("about", 100.0, 50.0);

        assert!(!section.contains(99.9));
        assert!(section.contains(100.0));
        assert!(section.contains(149.9));
        assert!(!section.contains(150.0));
    }

    #[test]
    fn test_static_viewport_relative_tops() {
        let mut viewport = StaticViewport::new(800.0);
        viewport.reveal_tops = vec![1000.0];
        viewport.skills_top = Some(2000.0);

        assert_eq!(viewport.reveal_top(0), Some(1000.0));
        viewport.scroll_y = 400.0;
        assert_eq!(viewport.reveal_top(0), Some(600.0));
        assert_eq!(viewport.skills_top(), Some(1600.0));
        assert_eq!(viewport.reveal_top(1), None);
    }
}
