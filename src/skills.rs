//! Skill Bars - One-shot staggered fill animation
//!
//! The first time the skills section's top edge rises above
//! `viewport_height - margin`, every bar is scheduled to grow to its
//! `data-percent` width. Bar `i` starts `i * delay` ms after the trigger.
//! A single `fired` flag makes every later trigger a no-op.
//!
//! Scheduled fills are applied by [`SkillBars::tick`], so the stagger needs no
//! timers of its own.

use crate::config::Config;
use crate::dom::{Elements, Viewport};
use crate::throttle::Throttle;
use crate::view::{Target, ViewState};

/// Parse a `data-percent` value into `0.0..=100.0`.
///
/// Accepts an optional trailing `%`.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_suffix('%').unwrap_or(raw).trim_end();
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// A bar fill waiting for its stagger slot.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingFill {
    due: f64,
    index: usize,
    percent: f64,
}

pub struct SkillBars {
    bars: Vec<Option<f64>>,
    has_section: bool,
    margin: f64,
    delay: f64,
    fired: bool,
    pending: Vec<PendingFill>,
    throttle: Throttle,
}

impl SkillBars {
    pub fn new(config: &Config, elements: &Elements) -> Self {
        let bars = elements
            .skill_bars
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let percent = raw.as_deref().and_then(parse_percent);
                if percent.is_none() {
                    log::warn!("skill bar {i} has invalid data-percent {raw:?}");
                }
                percent
            })
            .collect();

        Self {
            bars,
            has_section: elements.skills_section,
            margin: config.skills_margin,
            delay: f64::from(config.skill_animation_delay),
            fired: false,
            pending: Vec::new(),
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    /// Throttled scroll handler. Returns `true` if the animation fired.
    pub fn on_scroll(&mut self, now: f64, viewport: &impl Viewport, view: &impl ViewState) -> bool {
        if !self.throttle.try_fire(now) {
            return false;
        }
        self.check(now, viewport, view)
    }

    /// Fire the animation if the section is in view and it has not fired yet.
    pub fn check(&mut self, now: f64, viewport: &impl Viewport, view: &impl ViewState) -> bool {
        if self.fired || !self.has_section {
            return false;
        }
        let Some(top) = viewport.skills_top() else {
            return false;
        };
        if top >= viewport.inner_height() - self.margin {
            return false;
        }

        self.fired = true;
        self.pending = self
            .bars
            .iter()
            .enumerate()
            .filter_map(|(index, percent)| {
                percent.map(|percent| PendingFill {
                    due: now + index as f64 * self.delay,
                    index,
                    percent,
                })
            })
            .collect();
        log::debug!("animating {} skill bars", self.pending.len());

        self.tick(now, view);
        true
    }

    /// Apply every fill that is due at `now`. Returns how many were applied.
    pub fn tick(&mut self, now: f64, view: &impl ViewState) -> usize {
        let mut applied = 0;
        self.pending.retain(|fill| {
            if fill.due <= now {
                view.set_style(Target::SkillBar(fill.index), "width", &format!("{}%", fill.percent));
                applied += 1;
                false
            } else {
                true
            }
        });
        applied
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Fills still waiting for their stagger slot.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
