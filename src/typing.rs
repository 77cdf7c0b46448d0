//! Typing Animator - Type/pause/delete/advance state machine
//!
//! Renders a rotating list of phrases one character at a time. The animator
//! owns no timer: the caller feeds elapsed time into [`TypingAnimator::tick`],
//! which runs every step that has come due and reports whether the rendered
//! text changed.
//!
//! # Cycle
//!
//! ```text
//! Typing ──(phrase complete)──▶ Pausing ──▶ Deleting ──(empty)──▶ Advancing ──▶ Typing (next phrase)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use folio_ui::typing::{TypingAnimator, TypingTiming};
//!
//! let mut typing = TypingAnimator::new(vec!["Rustacean".into()], TypingTiming::default())?;
//! typing.tick(0.0);   // first character renders immediately
//! typing.tick(100.0); // second character
//! assert_eq!(typing.text(), "Ru");
//! ```

use crate::config::{Config, ConfigError};

// =============================================================================
// TIMING
// =============================================================================

/// Step delays in milliseconds. The animator raises any zero delay to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_delay: u32,
    pub delete_delay: u32,
    pub pause: u32,
    pub advance: u32,
}

impl TypingTiming {
    pub fn from_config(config: &Config) -> Self {
        Self {
            type_delay: config.typing_speed,
            delete_delay: config.deleting_speed,
            pause: config.delay_between_words,
            advance: config.advance_delay,
        }
        .clamped()
    }

    /// Raise every zero delay to 1ms so a tick always makes progress.
    pub fn clamped(self) -> Self {
        Self {
            type_delay: self.type_delay.max(1),
            delete_delay: self.delete_delay.max(1),
            pause: self.pause.max(1),
            advance: self.advance.max(1),
        }
    }
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What the animator is waiting to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Adding characters to the current phrase.
    Typing,
    /// Holding the complete phrase before deleting.
    Pausing,
    /// Removing characters.
    Deleting,
    /// Holding the empty text before typing the next phrase.
    Advancing,
}

// =============================================================================
// ANIMATOR
// =============================================================================

/// Explicit state machine behind the typing effect.
pub struct TypingAnimator {
    phrases: Vec<String>,
    timing: TypingTiming,
    index: usize,
    /// Rendered length in chars.
    len: usize,
    deleting: bool,
    phase: TypingPhase,
    /// Milliseconds until the next step.
    wait: f64,
    text: String,
}

impl TypingAnimator {
    /// Create an animator. The first step is due immediately.
    pub fn new(phrases: Vec<String>, timing: TypingTiming) -> Result<Self, ConfigError> {
        if phrases.is_empty() {
            return Err(ConfigError::Validation("typing animation needs at least one phrase".into()));
        }
        Ok(Self {
            phrases,
            timing: timing.clamped(),
            index: 0,
            len: 0,
            deleting: false,
            phase: TypingPhase::Typing,
            wait: 0.0,
            text: String::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(config.phrases.clone(), TypingTiming::from_config(config))
    }

    /// Advance the clock by `elapsed_ms` and run every step that came due.
    ///
    /// Returns `true` if at least one step ran.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        let mut budget = elapsed_ms.max(0.0);
        let mut stepped = false;

        while self.wait <= budget {
            budget -= self.wait;
            self.wait = f64::from(self.step());
            stepped = true;
        }
        self.wait -= budget;

        if stepped {
            self.text = self.render();
        }
        stepped
    }

    /// One character of progress. Returns the delay before the next step.
    fn step(&mut self) -> u32 {
        let full = self.phrases[self.index].chars().count();

        if self.deleting {
            self.len = self.len.saturating_sub(1);
        } else {
            self.len = (self.len + 1).min(full);
        }

        if !self.deleting && self.len == full {
            self.deleting = true;
            self.phase = TypingPhase::Pausing;
            self.timing.pause
        } else if self.deleting && self.len == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            self.phase = TypingPhase::Advancing;
            self.timing.advance
        } else if self.deleting {
            self.phase = TypingPhase::Deleting;
            self.timing.delete_delay
        } else {
            self.phase = TypingPhase::Typing;
            self.timing.type_delay
        }
    }

    fn render(&self) -> String {
        self.phrases[self.index].chars().take(self.len).collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Currently rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the phrase being typed or deleted.
    ///
    /// While [`TypingPhase::Advancing`] this already points at the next phrase.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Milliseconds until the next step is due.
    pub fn next_step_in(&self) -> f64 {
        self.wait
    }
}

// =============================================================================
// TESTS
// =============================================================================
