//! Toast Notifications - Transient floating messages
//!
//! Lifecycle of every toast, measured from the moment it is shown:
//!
//! ```text
//! 0 ms          mounted off-screen (translateX(120%))
//! enter         slides in          (translateX(0))
//! duration      slides out         (translateX(120%))
//! duration+exit removed from the page
//! ```
//!
//! Toasts are independent: several may be on screen at once and none is ever
//! deduplicated. Dismissal needs no user action; [`ToastStack::tick`] drives it.

use crate::config::Config;
use crate::view::{Mount, Target, ViewState};

/// Off-screen transform used before entering and after leaving.
pub const HIDDEN_TRANSFORM: &str = "translateX(120%)";
pub const SHOWN_TRANSFORM: &str = "translateX(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// Background color for this kind.
    pub fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "#10b981",
            ToastKind::Error => "#ef4444",
        }
    }

    /// Inline style for a freshly mounted toast.
    pub fn css(self) -> String {
        format!(
            "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
             padding: 16px 24px; border-radius: 8px; font-weight: 500; \
             box-shadow: 0 10px 25px rgba(0,0,0,0.2); z-index: 9999; \
             transform: {HIDDEN_TRANSFORM}; transition: transform 0.3s ease;",
            self.background()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub enter: u32,
    pub duration: u32,
    pub exit: u32,
}

impl ToastTiming {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enter: config.toast_enter_ms,
            duration: config.toast_duration_ms,
            exit: config.toast_exit_ms,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    id: u32,
    shown_at: f64,
    phase: ToastPhase,
}

/// Toasts currently on screen.
#[derive(Debug)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    next_id: u32,
    timing: ToastTiming,
}

impl ToastStack {
    pub fn new(timing: ToastTiming) -> Self {
        Self { toasts: Vec::new(), next_id: 0, timing }
    }

    /// Mount a new toast at `now`. Returns its id.
    pub fn show(
        &mut self,
        kind: ToastKind,
        message: &str,
        now: f64,
        view: &impl ViewState,
    ) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        view.mount(Mount::Toast { id, kind, message: message.to_string() });
        self.toasts.push(Toast { id, shown_at: now, phase: ToastPhase::Entering });
        id
    }

    /// Advance every toast's lifecycle to `now`. Returns how many were removed.
    pub fn tick(&mut self, now: f64, view: &impl ViewState) -> usize {
        let enter = f64::from(self.timing.enter);
        let leave = f64::from(self.timing.duration);
        let gone = leave + f64::from(self.timing.exit);
        let before = self.toasts.len();

        self.toasts.retain_mut(|toast| {
            let age = now - toast.shown_at;

            if toast.phase == ToastPhase::Entering && age >= enter {
                view.set_style(Target::Toast(toast.id), "transform", SHOWN_TRANSFORM);
                toast.phase = ToastPhase::Shown;
            }
            if toast.phase != ToastPhase::Leaving && age >= leave {
                view.set_style(Target::Toast(toast.id), "transform", HIDDEN_TRANSFORM);
                toast.phase = ToastPhase::Leaving;
            }
            if toast.phase == ToastPhase::Leaving && age >= gone {
                view.remove(Target::Toast(toast.id));
                return false;
            }
            true
        });

        before - self.toasts.len()
    }

    pub fn phase(&self, id: u32) -> Option<ToastPhase> {
        self.toasts.iter().find(|t| t.id == id).map(|t| t.phase)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
