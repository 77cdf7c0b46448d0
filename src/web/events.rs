//! RAII event listeners.
//!
//! A [`Listener`] owns its closure and unregisters it when dropped. Page-lifetime
//! listeners are parked in the thread-local keepalive so they are never dropped.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, IntersectionObserver};

use super::js_err;
use crate::error::UiError;

/// Event listener removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, UiError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self { target: target.clone(), event, closure })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything that must live as long as the page.
#[derive(Default)]
pub struct Keepalive {
    pub listeners: Vec<Listener>,
    pub observer: Option<(IntersectionObserver, ObserverCallback)>,
    pub frame: Option<FrameCallback>,
    pub effects: Vec<Box<dyn FnOnce()>>,
}

thread_local! {
    static KEEPALIVE: RefCell<Keepalive> = RefCell::new(Keepalive::default());
}

/// Park a listener for the lifetime of the page.
pub fn keep(listener: Listener) {
    KEEPALIVE.with(|k| k.borrow_mut().listeners.push(listener));
}

pub fn keep_observer(observer: IntersectionObserver, callback: ObserverCallback) {
    KEEPALIVE.with(|k| k.borrow_mut().observer = Some((observer, callback)));
}

pub fn keep_frame(frame: FrameCallback) {
    KEEPALIVE.with(|k| k.borrow_mut().frame = Some(frame));
}

pub fn keep_effect(stop: Box<dyn FnOnce()>) {
    KEEPALIVE.with(|k| k.borrow_mut().effects.push(stop));
}
