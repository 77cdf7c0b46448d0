//! Performance Helper - Lazy images and font preloading
//!
//! Images carrying `data-src` keep an empty `src` until they first become
//! visible. The visibility source (an `IntersectionObserver` in the browser)
//! reports each sighting through [`LazyImages::on_visible`]; the first one
//! swaps the source in and tells the caller to stop observing.

use crate::config::Config;
use crate::dom::Elements;
use crate::view::{Mount, Target, ViewState};

/// Attribute holding the deferred image source.
pub const DEFERRED_SRC: &str = "data-src";

pub struct LazyImages {
    /// Deferred source per image; `None` once loaded.
    pending: Vec<Option<String>>,
}

impl LazyImages {
    pub fn new(elements: &Elements) -> Self {
        Self {
            pending: elements.lazy_images.iter().cloned().map(Some).collect(),
        }
    }

    /// Image `index` became visible.
    ///
    /// Returns `true` if the image was loaded now and should no longer be
    /// observed. Later sightings of the same image return `false`.
    pub fn on_visible(&mut self, index: usize, view: &impl ViewState) -> bool {
        let Some(src) = self.pending.get_mut(index).and_then(Option::take) else {
            return false;
        };
        view.set_attribute(Target::LazyImage(index), "src", &src);
        view.remove_attribute(Target::LazyImage(index), DEFERRED_SRC);
        true
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.pending.get(index), Some(None))
    }

    /// Images still waiting to become visible.
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|p| p.is_some()).count()
    }
}

/// Inject a stylesheet preload hint for the configured font.
pub fn preload_font(config: &Config, view: &impl ViewState) {
    if config.font_preload_url.is_empty() {
        return;
    }
    view.mount(Mount::Preload {
        href: config.font_preload_url.clone(),
        as_type: "style".into(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    fn setup() -> (LazyImages, MemoryView) {
        let elements = Elements {
            lazy_images: vec!["img/a.webp".into(), "img/b.webp".into()],
            ..Default::default()
        };
        let view = MemoryView::new()
            .with_attribute(Target::LazyImage(0), DEFERRED_SRC, "img/a.webp")
            .with_attribute(Target::LazyImage(1), DEFERRED_SRC, "img/b.webp");
        (LazyImages::new(&elements), view)
    }

    #[test]
    fn test_first_sighting_loads() {
        let (mut images, view) = setup();

        assert!(images.on_visible(1, &view));

        assert_eq!(view.attribute(Target::LazyImage(1), "src").as_deref(), Some("img/b.webp"));
        assert_eq!(view.attribute(Target::LazyImage(1), DEFERRED_SRC), None);
        assert!(images.is_loaded(1));
        assert!(!images.is_loaded(0));
        assert_eq!(images.pending(), 1);
    }

    #[test]
    fn test_loads_at_most_once() {
        let (mut images, view) = setup();

        assert!(images.on_visible(0, &view));
        let writes = view.writes();
        assert!(!images.on_visible(0, &view));
        assert!(!images.on_visible(0, &view));

        assert_eq!(view.writes(), writes);
    }

    #[test]
    fn test_unknown_index_ignored() {
        let (mut images, view) = setup();
        assert!(!images.on_visible(7, &view));
        assert!(!images.is_loaded(7));
    }

    #[test]
    fn test_preload_font() {
        let view = MemoryView::new();
        preload_font(&Config::default(), &view);

        match view.mounted().as_slice() {
            [Mount::Preload { href, as_type }] => {
                assert!(href.starts_with("https://fonts.googleapis.com/"));
                assert_eq!(as_type, "style");
            }
            other => panic!("unexpected mounts: {other:?}"),
        }
    }
}
