//! Browser Binding - Wires the page controller to the live DOM
//!
//! The wasm entry point waits for the DOM, reads the optional JSON config
//! block, builds one [`Controller`] over a [`DomView`], then registers:
//!
//! - window `scroll`, `load` and `error` listeners
//! - hamburger, nav link, keyboard, mouse and skip-link listeners
//! - the contact form `submit` listener (async, via `fetch`)
//! - an `IntersectionObserver` for lazy images
//! - one `requestAnimationFrame` loop driving [`Controller::tick`]
//!
//! Everything registered here lives for the page's lifetime.

mod dom;
mod events;
mod transport;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, ErrorEvent, Event, IntersectionObserver,
    IntersectionObserverEntry, KeyboardEvent, Window,
};

pub use dom::DomView;
pub use transport::{form_request, FetchTransport};

use crate::a11y::REDUCED_MOTION_QUERY;
use crate::config::Config;
use crate::contact::{self, SubmitState};
use crate::error::UiError;
use crate::logger;
use crate::nav;
use crate::page::Controller;
use events::{keep, keep_effect, keep_frame, keep_observer, FrameCallback, Listener};

/// Id of the `<script type="application/json">` block holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

pub(crate) fn js_err(err: JsValue) -> UiError {
    UiError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

// =============================================================================
// APP
// =============================================================================

struct App {
    window: Window,
    view: Rc<DomView>,
    page: RefCell<Controller>,
}

impl App {
    fn now(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    /// Run `f` against the controller unless it is already borrowed.
    fn with_page(&self, f: impl FnOnce(&mut Controller, &DomView)) {
        match self.page.try_borrow_mut() {
            Ok(mut page) => f(&mut page, &*self.view),
            Err(_) => log::trace!("controller busy, event dropped"),
        }
    }
}

// =============================================================================
// ENTRY
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "panic-hook")]
    console_error_panic_hook::set_once();

    logger::init(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info });

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    keep(Listener::new(&window, "error", |event: Event| {
        if let Some(event) = event.dyn_ref::<ErrorEvent>() {
            log::error!("JavaScript Error: {}", event.message());
        }
    })
    .map_err(|err| JsValue::from_str(&err.to_string()))?);

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let ready = Closure::once_into_js(move || run(w, d));
        document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
    } else {
        run(window, document);
    }
    Ok(())
}

fn run(window: Window, document: Document) {
    if let Err(err) = boot(window, document) {
        log::error!("page setup failed: {err}");
    }
}

fn load_config(document: &Document) -> Config {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Config::default();
    };
    let json = block.text_content().unwrap_or_default();
    Config::from_json(&json).unwrap_or_else(|err| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        Config::default()
    })
}

fn boot(window: Window, document: Document) -> Result<(), UiError> {
    let config = load_config(&document);
    let view = DomView::lookup(window.clone(), document.clone(), &config)?;
    let page = Controller::new(config, &view.elements());
    let app = Rc::new(App { window: window.clone(), view: Rc::new(view), page: RefCell::new(page) });

    let prefers_reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let now = app.now();
    app.with_page(|page, view| page.mount(now, view, view, prefers_reduced_motion));

    bind_aria_state(&app);
    bind_window(&app, &document)?;
    bind_navigation(&app)?;
    bind_accessibility(&app, &document)?;
    bind_contact_form(&app)?;
    observe_lazy_images(&app)?;
    start_frame_loop(&app);
    Ok(())
}

// =============================================================================
// BINDINGS
// =============================================================================

/// `aria-expanded` on the hamburger and `aria-busy` on the submit button.
fn bind_aria_state(app: &Rc<App>) {
    let page = app.page.borrow();
    if app.view.hamburger().is_some() {
        let stop = nav::bind_expanded(page.nav().menu_open_signal(), app.view.clone());
        keep_effect(Box::new(stop));
    }
    if let Some(contact) = page.contact() {
        let stop = contact::bind_busy(contact.state_signal(), app.view.clone());
        keep_effect(Box::new(stop));
    }
}

fn bind_window(app: &Rc<App>, document: &Document) -> Result<(), UiError> {
    let scroll = app.clone();
    keep(Listener::new(&app.window, "scroll", move |_| {
        let now = scroll.now();
        scroll.with_page(|page, view| page.on_scroll(now, view, view));
    })?);

    if document.ready_state() == "complete" {
        let now = app.now();
        app.with_page(|page, view| page.on_load(now, view));
    } else {
        let load = app.clone();
        keep(Listener::new(&app.window, "load", move |_| {
            let now = load.now();
            load.with_page(|page, view| page.on_load(now, view));
        })?);
    }
    Ok(())
}

fn bind_navigation(app: &Rc<App>) -> Result<(), UiError> {
    if let Some(hamburger) = app.view.hamburger() {
        let toggle = app.clone();
        keep(Listener::new(hamburger, "click", move |_| {
            toggle.with_page(|page, view| page.on_menu_toggle(view));
        })?);
    }

    for (index, link) in app.view.nav_links().iter().enumerate() {
        let click = app.clone();
        keep(Listener::new(link, "click", move |event: Event| {
            let mut prevent = false;
            click.with_page(|page, view| prevent = page.on_nav_click(index, view, view));
            if prevent {
                event.prevent_default();
            }
        })?);
    }
    Ok(())
}

fn bind_accessibility(app: &Rc<App>, document: &Document) -> Result<(), UiError> {
    let keys = app.clone();
    keep(Listener::new(document, "keydown", move |event: Event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            let key = event.key();
            keys.with_page(|page, view| page.on_keydown(&key, view));
        }
    })?);

    let mouse = app.clone();
    keep(Listener::new(document, "mousedown", move |_| {
        mouse.with_page(|page, view| page.on_mouse_down(view));
    })?);

    if let Some(link) = app.view.skip_link() {
        let focus = app.clone();
        keep(Listener::new(&link, "focus", move |_| {
            focus.with_page(|page, view| page.on_skip_link_focus(view));
        })?);
        let blur = app.clone();
        keep(Listener::new(&link, "blur", move |_| {
            blur.with_page(|page, view| page.on_skip_link_blur(view));
        })?);
    }
    Ok(())
}

fn bind_contact_form(app: &Rc<App>) -> Result<(), UiError> {
    let Some(form) = app.view.contact_form() else {
        return Ok(());
    };

    let submit = app.clone();
    let form_el = form.clone();
    keep(Listener::new(form, "submit", move |event: Event| {
        event.prevent_default();

        let (contact, toasts) = {
            let Ok(page) = submit.page.try_borrow() else {
                log::warn!("controller busy, submission dropped");
                return;
            };
            let Some(contact) = page.contact() else { return };
            (contact, page.toasts())
        };
        if contact.state() == SubmitState::Submitting {
            log::debug!("submission already in flight");
            return;
        }

        let request = match form_request(&form_el) {
            Ok(request) => request,
            Err(err) => {
                log::error!("could not read contact form: {err}");
                return;
            }
        };

        let app = submit.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let transport = FetchTransport::new(app.window.clone());
            // Outcome is already logged and toasted
            let _ = contact
                .submit(&request, &transport, &*app.view, &toasts, || app.now())
                .await;
        });
    })?);
    Ok(())
}

fn observe_lazy_images(app: &Rc<App>) -> Result<(), UiError> {
    if app.view.lazy_images().is_empty() {
        return Ok(());
    }

    let seen = app.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = seen.view.lazy_image_index(&target) else { continue };
                let mut loaded = false;
                seen.with_page(|page, view| loaded = page.on_image_visible(index, view));
                if loaded {
                    observer.unobserve(&target);
                }
            }
        },
    );

    match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            for image in app.view.lazy_images() {
                observer.observe(image);
            }
            keep_observer(observer, callback);
        }
        Err(err) => {
            log::warn!("IntersectionObserver unavailable, loading images eagerly: {}", js_err(err));
            let count = app.view.lazy_images().len();
            app.with_page(|page, view| {
                for index in 0..count {
                    page.on_image_visible(index, view);
                }
            });
        }
    }
    Ok(())
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut(f64)>) {
    if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {}", js_err(err));
    }
}

/// One rAF loop for every time-driven component.
fn start_frame_loop(app: &Rc<App>) {
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let tick = app.clone();

    *frame.borrow_mut() = Some(Closure::new(move |now: f64| {
        tick.with_page(|page, view| page.tick(now, view));
        if let Some(callback) = next.borrow().as_ref() {
            request_frame(&tick.window, callback);
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(&app.window, callback);
    }
    keep_frame(frame);
}
