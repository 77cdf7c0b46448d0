//! Config Module - Timing, thresholds and selectors
//!
//! Every tunable the page behavior uses lives in [`Config`]. Defaults match the
//! stock portfolio page; a page can override any subset with a JSON block:
//!
//! ```ignore
//! <script type="application/json" id="folio-config">
//!   { "typing_speed": 80, "phrases": ["Rustacean", "Writer"] }
//! </script>
//! ```
//!
//! All durations are milliseconds, all distances CSS pixels.

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config override is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

// =============================================================================
// SELECTORS
// =============================================================================

/// CSS selectors used to build the element lookup.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub typed_text: String,
    pub hamburger: String,
    pub nav_menu: String,
    pub navbar: String,
    pub contact_form: String,
    pub submit_button: String,
    pub nav_links: String,
    pub reveal: String,
    pub skill_bars: String,
    pub skills_section: String,
    pub sections: String,
    pub lazy_images: String,
    pub loader: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            typed_text: "#typed-text".into(),
            hamburger: "#hamburger".into(),
            nav_menu: "#nav-menu".into(),
            navbar: "#navbar".into(),
            contact_form: "#contact-form".into(),
            submit_button: ".btn-submit".into(),
            nav_links: ".nav-link".into(),
            reveal: ".reveal-text, .reveal-left, .reveal-right, .reveal-up".into(),
            skill_bars: ".skill-progress".into(),
            skills_section: "#skills".into(),
            sections: "section[id]".into(),
            lazy_images: "img[data-src]".into(),
            loader: ".loader".into(),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Page behavior configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    // Typing animation
    pub phrases: Vec<String>,
    pub typing_speed: u32,
    pub deleting_speed: u32,
    pub delay_between_words: u32,
    pub advance_delay: u32,

    // Navigation
    /// Probe offset below the viewport top used to pick the active section.
    pub scroll_offset: f64,
    /// Height of the fixed header subtracted from smooth-scroll targets.
    pub header_height: f64,
    /// Scroll distance past which the navbar gets the `scrolled` class.
    pub navbar_threshold: f64,

    // Reveal and skills
    pub reveal_margin: f64,
    pub skills_margin: f64,
    pub skill_animation_delay: u32,

    /// Throttle window for scroll-bound work (one frame).
    pub throttle_ms: u32,

    // Toasts
    pub toast_enter_ms: u32,
    pub toast_duration_ms: u32,
    pub toast_exit_ms: u32,
    pub success_message: String,
    pub error_message: String,

    // Performance / accessibility
    pub font_preload_url: String,
    pub skip_link_target: String,
    pub skip_link_text: String,
    pub loader_fade_ms: u32,

    pub selectors: Selectors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Computer Science Student".into(),
                "Full Stack Developer".into(),
                "Problem Solver".into(),
                "Tech Enthusiast".into(),
            ],
            typing_speed: 100,
            deleting_speed: 50,
            delay_between_words: 2000,
            advance_delay: 500,
            scroll_offset: 100.0,
            header_height: 80.0,
            navbar_threshold: 50.0,
            reveal_margin: 150.0,
            skills_margin: 200.0,
            skill_animation_delay: 200,
            throttle_ms: 16,
            toast_enter_ms: 100,
            toast_duration_ms: 4000,
            toast_exit_ms: 300,
            success_message: "Message sent successfully! I\u{2019}ll get back to you soon.".into(),
            error_message: "Something went wrong. Please try again.".into(),
            font_preload_url:
                "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap"
                    .into(),
            skip_link_target: "#main".into(),
            skip_link_text: "Skip to main content".into(),
            loader_fade_ms: 300,
            selectors: Selectors::default(),
        }
    }
}

impl Config {
    /// Parse a (partial) JSON override on top of the defaults and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the components rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phrases.is_empty() {
            return Err(ConfigError::Validation("`phrases` must not be empty".into()));
        }
        if let Some(i) = self.phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::Validation(format!("`phrases[{i}]` is empty")));
        }
        if self.throttle_ms == 0 {
            return Err(ConfigError::Validation("`throttle_ms` must be positive".into()));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
