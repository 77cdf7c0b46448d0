//! DOM-backed view and viewport.
//!
//! [`DomView::lookup`] resolves every configured selector once. Optional
//! elements that are missing stay `None`, and every [`ViewState`] call on them
//! is a silent no-op.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollToOptions, Window,
};

use super::js_err;
use crate::a11y::SKIP_LINK_CSS;
use crate::config::Config;
use crate::dom::{Elements, SectionBounds, Viewport};
use crate::error::UiError;
use crate::perf::DEFERRED_SRC;
use crate::view::{Class, Mount, Target, ViewState};

fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub struct DomView {
    window: Window,
    document: Document,
    body: HtmlElement,
    typed_text: Option<Element>,
    hamburger: Option<Element>,
    nav_menu: Option<Element>,
    navbar: Option<Element>,
    contact_form: Option<HtmlFormElement>,
    submit_button: Option<Element>,
    skills_section: Option<Element>,
    loader: Option<Element>,
    nav_links: Vec<Element>,
    reveal: Vec<Element>,
    skill_bars: Vec<Element>,
    lazy_images: Vec<Element>,
    sections_selector: String,
    skip_link: RefCell<Option<Element>>,
    toasts: RefCell<HashMap<u32, Element>>,
}

impl DomView {
    pub fn lookup(window: Window, document: Document, config: &Config) -> Result<Self, UiError> {
        let body = document.body().ok_or_else(|| UiError::MissingElement("body".into()))?;
        let s = &config.selectors;

        let contact_form = query(&document, &s.contact_form)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        let submit_button = contact_form
            .as_ref()
            .and_then(|form| form.query_selector(&s.submit_button).ok().flatten());

        Ok(Self {
            typed_text: query(&document, &s.typed_text),
            hamburger: query(&document, &s.hamburger),
            nav_menu: query(&document, &s.nav_menu),
            navbar: query(&document, &s.navbar),
            contact_form,
            submit_button,
            skills_section: query(&document, &s.skills_section),
            loader: query(&document, &s.loader),
            nav_links: query_all(&document, &s.nav_links),
            reveal: query_all(&document, &s.reveal),
            skill_bars: query_all(&document, &s.skill_bars),
            lazy_images: query_all(&document, &s.lazy_images),
            sections_selector: s.sections.clone(),
            skip_link: RefCell::new(None),
            toasts: RefCell::new(HashMap::new()),
            window,
            document,
            body,
        })
    }

    /// Element lookup handed to the components.
    pub fn elements(&self) -> Elements {
        Elements {
            typed_text: self.typed_text.is_some(),
            hamburger: self.hamburger.is_some(),
            nav_menu: self.nav_menu.is_some(),
            navbar: self.navbar.is_some(),
            contact_form: self.contact_form.is_some(),
            submit_button: self.submit_button.is_some(),
            skills_section: self.skills_section.is_some(),
            loader: self.loader.is_some(),
            nav_links: self
                .nav_links
                .iter()
                .map(|el| el.get_attribute("href").unwrap_or_default())
                .collect(),
            reveal_count: self.reveal.len(),
            skill_bars: self.skill_bars.iter().map(|el| el.get_attribute("data-percent")).collect(),
            lazy_images: self
                .lazy_images
                .iter()
                .map(|el| el.get_attribute(DEFERRED_SRC).unwrap_or_default())
                .collect(),
        }
    }

    pub fn hamburger(&self) -> Option<&Element> {
        self.hamburger.as_ref()
    }

    pub fn nav_links(&self) -> &[Element] {
        &self.nav_links
    }

    pub fn contact_form(&self) -> Option<&HtmlFormElement> {
        self.contact_form.as_ref()
    }

    pub fn lazy_images(&self) -> &[Element] {
        &self.lazy_images
    }

    pub fn skip_link(&self) -> Option<Element> {
        self.skip_link.borrow().clone()
    }

    /// Index of a lazy image element, by identity.
    pub fn lazy_image_index(&self, target: &Element) -> Option<usize> {
        let target: &wasm_bindgen::JsValue = target.as_ref();
        self.lazy_images.iter().position(|el| {
            let el: &wasm_bindgen::JsValue = el.as_ref();
            el == target
        })
    }

    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::Body => Some(self.body.clone().into()),
            Target::TypedText => self.typed_text.clone(),
            Target::Hamburger => self.hamburger.clone(),
            Target::NavMenu => self.nav_menu.clone(),
            Target::Navbar => self.navbar.clone(),
            Target::NavLink(i) => self.nav_links.get(i).cloned(),
            Target::Reveal(i) => self.reveal.get(i).cloned(),
            Target::SkillBar(i) => self.skill_bars.get(i).cloned(),
            Target::LazyImage(i) => self.lazy_images.get(i).cloned(),
            Target::ContactForm => self.contact_form.clone().map(Into::into),
            Target::SubmitButton => self.submit_button.clone(),
            Target::Toast(id) => self.toasts.borrow().get(&id).cloned(),
            Target::SkipLink => self.skip_link.borrow().clone(),
            Target::Loader => self.loader.clone(),
        }
    }

    fn create(&self, tag: &str) -> Result<Element, UiError> {
        self.document.create_element(tag).map_err(js_err)
    }

    fn append_to_head(&self, node: &Element) -> Result<(), UiError> {
        let head = self.document.head().ok_or_else(|| UiError::MissingElement("head".into()))?;
        head.append_child(node).map_err(js_err)?;
        Ok(())
    }

    fn try_mount(&self, node: Mount) -> Result<(), UiError> {
        match node {
            Mount::Toast { id, kind, message } => {
                let toast = self.create("div")?;
                toast.set_text_content(Some(&message));
                toast.set_attribute("style", &kind.css()).map_err(js_err)?;
                self.body.append_child(&toast).map_err(js_err)?;
                self.toasts.borrow_mut().insert(id, toast);
            }
            Mount::SkipLink { href, text } => {
                let link = self.create("a")?;
                link.set_attribute("href", &href).map_err(js_err)?;
                link.set_class_name("sr-only");
                link.set_attribute("style", SKIP_LINK_CSS).map_err(js_err)?;
                link.set_text_content(Some(&text));
                self.body
                    .insert_before(&link, self.body.first_child().as_ref())
                    .map_err(js_err)?;
                *self.skip_link.borrow_mut() = Some(link);
            }
            Mount::Preload { href, as_type } => {
                let link = self.create("link")?;
                link.set_attribute("rel", "preload").map_err(js_err)?;
                link.set_attribute("href", &href).map_err(js_err)?;
                link.set_attribute("as", &as_type).map_err(js_err)?;
                self.append_to_head(&link)?;
            }
            Mount::Style { css } => {
                let style = self.create("style")?;
                style.set_text_content(Some(&css));
                self.append_to_head(&style)?;
            }
        }
        Ok(())
    }
}

impl ViewState for DomView {
    fn set_class(&self, target: Target, class: Class, on: bool) {
        let Some(el) = self.element(target) else { return };
        let list = el.class_list();
        for name in class.css_names() {
            let _ = list.toggle_with_force(name, on);
        }
    }

    fn set_style(&self, target: Target, property: &str, value: &str) {
        let Some(el) = self.element(target) else { return };
        let Some(el) = el.dyn_ref::<HtmlElement>() else { return };
        let style = el.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            log::debug!("style {property} on {target:?} failed: {err:?}");
        }
    }

    fn set_text(&self, target: Target, text: &str) {
        if let Some(el) = self.element(target) {
            el.set_text_content(Some(text));
        }
    }

    fn set_attribute(&self, target: Target, name: &str, value: &str) {
        if let Some(el) = self.element(target) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn remove_attribute(&self, target: Target, name: &str) {
        if let Some(el) = self.element(target) {
            let _ = el.remove_attribute(name);
        }
    }

    fn set_disabled(&self, target: Target, disabled: bool) {
        let Some(el) = self.element(target) else { return };
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }

    fn mount(&self, node: Mount) {
        if let Err(err) = self.try_mount(node) {
            log::error!("mount failed: {err}");
        }
    }

    fn remove(&self, target: Target) {
        let el = match target {
            Target::Toast(id) => self.toasts.borrow_mut().remove(&id),
            Target::SkipLink => self.skip_link.borrow_mut().take(),
            other => self.element(other),
        };
        if let Some(el) = el {
            el.remove();
        }
    }

    fn reset_form(&self) {
        if let Some(form) = &self.contact_form {
            form.reset();
        }
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(if smooth { ScrollBehavior::Smooth } else { ScrollBehavior::Auto });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl Viewport for DomView {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn sections(&self) -> Vec<SectionBounds> {
        query_all(&self.document, &self.sections_selector)
            .into_iter()
            .filter_map(|el| {
                let id = el.id();
                let el = el.dyn_into::<HtmlElement>().ok()?;
                (!id.is_empty()).then(|| {
                    SectionBounds::new(id, f64::from(el.offset_top()), f64::from(el.offset_height()))
                })
            })
            .collect()
    }

    fn reveal_top(&self, index: usize) -> Option<f64> {
        self.reveal.get(index).map(|el| el.get_bounding_client_rect().top())
    }

    fn skills_top(&self) -> Option<f64> {
        self.skills_section.as_ref().map(|el| el.get_bounding_client_rect().top())
    }
}
