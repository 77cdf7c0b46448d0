//! Scroll Reveal - One-way `revealed` class for elements entering the viewport
//!
//! An element is revealed once its top edge rises above
//! `viewport_height - margin`. Revealed elements are never checked again, so
//! scrolling back up leaves them visible.

use crate::config::Config;
use crate::dom::{Elements, Viewport};
use crate::throttle::Throttle;
use crate::view::{Class, Target, ViewState};

pub struct ScrollReveal {
    revealed: Vec<bool>,
    margin: f64,
    throttle: Throttle,
}

impl ScrollReveal {
    pub fn new(config: &Config, elements: &Elements) -> Self {
        Self {
            revealed: vec![false; elements.reveal_count],
            margin: config.reveal_margin,
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    /// Throttled scroll handler. Returns `true` if the check ran.
    pub fn on_scroll(&mut self, now: f64, viewport: &impl Viewport, view: &impl ViewState) -> bool {
        if !self.throttle.try_fire(now) {
            return false;
        }
        self.check(viewport, view);
        true
    }

    /// Reveal every pending element past the threshold. Returns how many were
    /// newly revealed.
    pub fn check(&mut self, viewport: &impl Viewport, view: &impl ViewState) -> usize {
        let threshold = viewport.inner_height() - self.margin;
        let mut newly = 0;

        for (index, revealed) in self.revealed.iter_mut().enumerate() {
            if *revealed {
                continue;
            }
            let Some(top) = viewport.reveal_top(index) else {
                continue;
            };
            if top < threshold {
                view.set_class(Target::Reveal(index), Class::REVEALED, true);
                *revealed = true;
                newly += 1;
            }
        }

        newly
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}
