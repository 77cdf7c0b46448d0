//! # folio-ui
//!
//! Reactive interaction layer for a static single-page portfolio.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! the state other code observes: the menu-open flag and the submit state,
//! mirrored onto ARIA attributes by effects.
//!
//! ## Architecture
//!
//! Every component is plain Rust driven by explicit inputs: a timestamp, a
//! [`Viewport`] for geometry and a [`ViewState`] sink for DOM writes. Nothing
//! in the core touches the browser, so the whole page is testable against
//! [`MemoryView`] and [`StaticViewport`].
//!
//! ```text
//! DOM events ─▶ web binding ─▶ Controller ─▶ components ─▶ ViewState ─▶ DOM
//!                 rAF loop ─▶ Controller::tick ─┘
//! ```
//!
//! ## Modules
//!
//! - [`typing`] - Hero typing animation
//! - [`nav`] - Mobile menu, navbar state, active link, smooth scrolling
//! - [`reveal`] - Reveal-on-scroll
//! - [`skills`] - Staggered skill bar fills
//! - [`contact`] - Async contact form submission
//! - [`toast`] - Transient notifications
//! - [`perf`] - Lazy images, font preloading
//! - [`a11y`] - Keyboard affordances, skip link, reduced motion
//! - [`page`] - The controller tying them together
//! - `web` - Browser binding (wasm32 only)

pub mod a11y;
pub mod config;
pub mod contact;
pub mod dom;
pub mod error;
pub mod logger;
pub mod nav;
pub mod page;
pub mod perf;
pub mod reveal;
pub mod skills;
pub mod throttle;
pub mod toast;
pub mod typing;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export commonly used items
pub use config::{Config, ConfigError, Selectors};
pub use contact::{ContactForm, FormRequest, SubmitState, Transport};
pub use dom::{Elements, SectionBounds, StaticViewport, Viewport};
pub use error::{SubmitError, UiError};
pub use page::Controller;
pub use throttle::Throttle;
pub use toast::{ToastKind, ToastStack};
pub use typing::{TypingAnimator, TypingPhase};
pub use view::{Class, MemoryView, Mount, Target, ViewState};
