//! Contact Form Controller - Async submission with loading state and toasts
//!
//! ```text
//! Idle ──submit──▶ Submitting ──2xx──────────▶ success toast, form reset ──▶ Idle
//!                             └─error/non-2xx─▶ error toast, form kept   ──▶ Idle
//! ```
//!
//! The submit button is disabled and marked `loading` for the whole exchange.
//! Restoring it is tied to a drop guard, so it runs once the attempt resolves
//! whatever happens while reporting the outcome. On native targets that
//! includes a panic while the toast is shown; wasm builds abort on panic, so
//! there the guarantee covers error returns only.
//!
//! The network is abstracted behind [`Transport`]; the browser binding uses
//! `fetch`, tests use a mock.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::config::Config;
use crate::dom::Elements;
use crate::error::SubmitError;
use crate::toast::{ToastKind, ToastStack};
use crate::view::{Class, Target, ViewState};

// =============================================================================
// REQUEST & TRANSPORT
// =============================================================================

/// A form submission, built from the form element at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRequest {
    /// Endpoint from the form's `action`.
    pub action: String,
    /// Upper-cased HTTP method from the form's `method`.
    pub method: String,
    pub fields: Vec<(String, String)>,
}

impl FormRequest {
    /// Response type the endpoint is asked for.
    pub const ACCEPT: &'static str = "application/json";

    pub fn new(action: impl Into<String>, method: &str, fields: Vec<(String, String)>) -> Self {
        let method = match method.trim() {
            "" => "GET".to_string(),
            m => m.to_ascii_uppercase(),
        };
        Self { action: action.into(), method, fields }
    }
}

/// Sends a form request and reports the HTTP status.
pub trait Transport {
    fn send(&self, request: &FormRequest) -> impl Future<Output = Result<u16, SubmitError>>;
}

/// Map a transport result onto the submission outcome.
pub fn classify(result: Result<u16, SubmitError>) -> Result<(), SubmitError> {
    match result {
        Ok(status) if (200..300).contains(&status) => Ok(()),
        Ok(status) => Err(SubmitError::Status(status)),
        Err(err) => Err(err),
    }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Restores the submit button when dropped.
pub struct LoadingGuard<'a, V: ViewState> {
    view: &'a V,
    state: Signal<SubmitState>,
    has_button: bool,
}

impl<V: ViewState> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        if self.has_button {
            self.view.set_class(Target::SubmitButton, Class::LOADING, false);
            self.view.set_disabled(Target::SubmitButton, false);
        }
        self.state.set(SubmitState::Idle);
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct ContactForm {
    state: Signal<SubmitState>,
    has_button: bool,
    success_message: String,
    error_message: String,
}

impl ContactForm {
    /// `None` when the page has no contact form.
    pub fn new(config: &Config, elements: &Elements) -> Option<Self> {
        if !elements.contact_form {
            log::debug!("no contact form, submission handling disabled");
            return None;
        }
        Some(Self {
            state: signal(SubmitState::Idle),
            has_button: elements.submit_button,
            success_message: config.success_message.clone(),
            error_message: config.error_message.clone(),
        })
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub fn state_signal(&self) -> Signal<SubmitState> {
        self.state.clone()
    }

    /// Enter `Submitting`. The returned guard leaves it.
    pub fn begin<'a, V: ViewState>(&self, view: &'a V) -> LoadingGuard<'a, V> {
        if self.has_button {
            view.set_class(Target::SubmitButton, Class::LOADING, true);
            view.set_disabled(Target::SubmitButton, true);
        }
        self.state.set(SubmitState::Submitting);
        LoadingGuard { view, state: self.state.clone(), has_button: self.has_button }
    }

    /// Run one submission end to end.
    ///
    /// `clock` supplies the timestamp for the toast once the exchange is over.
    pub async fn submit<T: Transport, V: ViewState>(
        &self,
        request: &FormRequest,
        transport: &T,
        view: &V,
        toasts: &RefCell<ToastStack>,
        clock: impl Fn() -> f64,
    ) -> Result<(), SubmitError> {
        let _loading = self.begin(view);

        let result = classify(transport.send(request).await);

        let (kind, message) = match &result {
            Ok(()) => {
                log::info!("contact form sent to {}", request.action);
                view.reset_form();
                (ToastKind::Success, &self.success_message)
            }
            Err(err) => {
                log::error!("contact form submission to {} failed: {err}", request.action);
                (ToastKind::Error, &self.error_message)
            }
        };

        match toasts.try_borrow_mut() {
            Ok(mut stack) => {
                stack.show(kind, message, clock(), view);
            }
            Err(err) => log::warn!("could not show {kind:?} toast: {err}"),
        }

        result
    }
}

/// Mirror the submit state onto the button's `aria-busy`. Returns the
/// effect's stop function.
pub fn bind_busy<V: ViewState + 'static>(state: Signal<SubmitState>, view: Rc<V>) -> impl FnOnce() {
    effect(move || {
        let busy = if state.get() == SubmitState::Submitting { "true" } else { "false" };
        view.set_attribute(Target::SubmitButton, "aria-busy", busy);
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastTiming;
    use crate::view::MemoryView;
    use std::cell::Cell;

    /// Canned transport that also records the button state seen mid-flight.
    struct MockTransport<'a> {
        result: Result<u16, SubmitError>,
        view: &'a MemoryView,
        saw_loading: Cell<bool>,
        calls: Cell<usize>,
    }

    impl<'a> MockTransport<'a> {
        fn new(result: Result<u16, SubmitError>, view: &'a MemoryView) -> Self {
            Self { result, view, saw_loading: Cell::new(false), calls: Cell::new(0) }
        }
    }

    impl Transport for MockTransport<'_> {
        async fn send(&self, request: &FormRequest) -> Result<u16, SubmitError> {
            assert_eq!(request.method, "POST");
            self.calls.set(self.calls.get() + 1);
            self.saw_loading.set(
                self.view.has_class(Target::SubmitButton, Class::LOADING)
                    && self.view.is_disabled(Target::SubmitButton),
            );
            self.result.clone()
        }
    }

    fn form() -> ContactForm {
        let _ = env_logger::builder().is_test(true).try_init();
        let elements = Elements { contact_form: true, submit_button: true, ..Default::default() };
        ContactForm::new(&Config::default(), &elements).expect("form present")
    }

    fn request() -> FormRequest {
        FormRequest::new(
            "https://formspree.io/f/abc",
            "post",
            vec![("email".into(), "a@b.c".into()), ("message".into(), "hi".into())],
        )
    }

    fn toasts() -> RefCell<ToastStack> {
        RefCell::new(ToastStack::new(ToastTiming::from_config(&Config::default())))
    }

    fn assert_button_restored(view: &MemoryView, form: &ContactForm) {
        assert!(!view.has_class(Target::SubmitButton, Class::LOADING));
        assert!(!view.is_disabled(Target::SubmitButton));
        assert_eq!(form.state(), SubmitState::Idle);
    }

    #[test]
    fn test_missing_form_disables_handler() {
        assert!(ContactForm::new(&Config::default(), &Elements::default()).is_none());
    }

    #[test]
    fn test_request_method_normalized() {
        assert_eq!(FormRequest::new("/x", "post", vec![]).method, "POST");
        assert_eq!(FormRequest::new("/x", "", vec![]).method, "GET");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(Ok(200)), Ok(()));
        assert_eq!(classify(Ok(204)), Ok(()));
        assert_eq!(classify(Ok(302)), Err(SubmitError::Status(302)));
        assert_eq!(classify(Ok(500)), Err(SubmitError::Status(500)));
        assert_eq!(
            classify(Err(SubmitError::Transport("dns".into()))),
            Err(SubmitError::Transport("dns".into()))
        );
    }

    #[test]
    fn test_success_shows_one_toast_and_resets() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Ok(200), &view);

        let result = pollster::block_on(form.submit(&request(), &transport, &view, &toasts, || 0.0));

        assert!(result.is_ok());
        assert!(transport.saw_loading.get());
        assert_eq!(transport.calls.get(), 1);
        let shown = view.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, ToastKind::Success);
        assert_eq!(shown[0].2, Config::default().success_message);
        assert_eq!(view.form_resets(), 1);
        assert_button_restored(&view, &form);
    }

    #[test]
    fn test_error_status_keeps_form() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Ok(422), &view);

        let result = pollster::block_on(form.submit(&request(), &transport, &view, &toasts, || 0.0));

        assert_eq!(result, Err(SubmitError::Status(422)));
        let shown = view.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, ToastKind::Error);
        assert_eq!(shown[0].2, Config::default().error_message);
        assert_eq!(view.form_resets(), 0);
        assert_button_restored(&view, &form);
    }

    #[test]
    fn test_transport_error_same_message() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Err(SubmitError::Transport("offline".into())), &view);

        let result = pollster::block_on(form.submit(&request(), &transport, &view, &toasts, || 0.0));

        assert!(matches!(result, Err(SubmitError::Transport(_))));
        let shown = view.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].2, Config::default().error_message);
        assert_eq!(view.form_resets(), 0);
        assert_button_restored(&view, &form);
    }

    #[test]
    fn test_teardown_runs_when_toast_cannot_show() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Ok(200), &view);

        // Stack already borrowed elsewhere: the toast is skipped, cleanup is not
        let _held = toasts.borrow_mut();
        let result = pollster::block_on(form.submit(&request(), &transport, &view, &toasts, || 0.0));

        assert!(result.is_ok());
        assert!(view.toasts().is_empty());
        assert_button_restored(&view, &form);
    }

    /// View whose `mount` panics; every other call goes to the inner view.
    struct PanickingMount<'a>(&'a MemoryView);

    impl ViewState for PanickingMount<'_> {
        fn set_class(&self, target: Target, class: Class, on: bool) {
            self.0.set_class(target, class, on);
        }
        fn set_style(&self, target: Target, property: &str, value: &str) {
            self.0.set_style(target, property, value);
        }
        fn set_text(&self, target: Target, text: &str) {
            self.0.set_text(target, text);
        }
        fn set_attribute(&self, target: Target, name: &str, value: &str) {
            self.0.set_attribute(target, name, value);
        }
        fn remove_attribute(&self, target: Target, name: &str) {
            self.0.remove_attribute(target, name);
        }
        fn set_disabled(&self, target: Target, disabled: bool) {
            self.0.set_disabled(target, disabled);
        }
        fn mount(&self, _node: crate::view::Mount) {
            panic!("mount failed");
        }
        fn remove(&self, target: Target) {
            self.0.remove(target);
        }
        fn reset_form(&self) {
            self.0.reset_form();
        }
        fn scroll_to(&self, top: f64, smooth: bool) {
            self.0.scroll_to(top, smooth);
        }
    }

    #[test]
    fn test_teardown_runs_when_toast_panics() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Ok(200), &view);
        let panicking = PanickingMount(&view);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pollster::block_on(form.submit(&request(), &transport, &panicking, &toasts, || 0.0))
        }));

        assert!(outcome.is_err());
        assert!(transport.saw_loading.get());
        assert_button_restored(&view, &form);
        assert!(toasts.try_borrow_mut().is_ok());
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let (form, view) = (form(), MemoryView::new());

        {
            let _guard = form.begin(&view);
            assert_eq!(form.state(), SubmitState::Submitting);
            assert!(view.is_disabled(Target::SubmitButton));
        }

        assert_button_restored(&view, &form);
    }

    #[test]
    fn test_toasts_auto_dismiss_after_submit() {
        let (form, view, toasts) = (form(), MemoryView::new(), toasts());
        let transport = MockTransport::new(Ok(200), &view);

        pollster::block_on(form.submit(&request(), &transport, &view, &toasts, || 10.0)).ok();
        assert_eq!(view.toasts().len(), 1);

        toasts.borrow_mut().tick(4310.0, &view);
        assert!(view.toasts().is_empty());
    }

    #[test]
    fn test_busy_attribute_tracks_submission() {
        let form = form();
        let view = Rc::new(MemoryView::new());
        let _stop = bind_busy(form.state_signal(), view.clone());
        assert_eq!(view.attribute(Target::SubmitButton, "aria-busy").as_deref(), Some("false"));

        {
            let _guard = form.begin(&*view);
            assert_eq!(view.attribute(Target::SubmitButton, "aria-busy").as_deref(), Some("true"));
        }

        assert_eq!(view.attribute(Target::SubmitButton, "aria-busy").as_deref(), Some("false"));
    }
}
