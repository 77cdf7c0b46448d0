//! View Module - Abstract rendering surface
//!
//! Components never touch the DOM directly. They describe mutations against
//! [`ViewState`]: class toggles, inline styles, text, attributes and node
//! insertion/removal keyed by [`Target`]. The browser binding implements it
//! over real elements; [`MemoryView`] implements it in memory for headless
//! use and tests.
//!
//! All methods take `&self`: like the DOM, a view is a shared mutable surface.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::toast::ToastKind;

// =============================================================================
// STATE CLASSES (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// State classes the page behavior toggles.
    ///
    /// Combine with bitwise OR: `Class::ACTIVE | Class::LOADING`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Class: u8 {
        const ACTIVE = 1 << 0;
        const SCROLLED = 1 << 1;
        const REVEALED = 1 << 2;
        const LOADING = 1 << 3;
        const USING_MOUSE = 1 << 4;
        const LOADED = 1 << 5;
    }
}

const CLASS_NAMES: [(Class, &str); 6] = [
    (Class::ACTIVE, "active"),
    (Class::SCROLLED, "scrolled"),
    (Class::REVEALED, "revealed"),
    (Class::LOADING, "loading"),
    (Class::USING_MOUSE, "using-mouse"),
    (Class::LOADED, "loaded"),
];

impl Class {
    /// CSS class names of every flag set in `self`.
    pub fn css_names(self) -> impl Iterator<Item = &'static str> {
        CLASS_NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

// =============================================================================
// TARGETS & MOUNTS
// =============================================================================

/// An element the behavior layer can address.
///
/// Indexed variants refer to the position in the matching list of
/// [`crate::dom::Elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Body,
    TypedText,
    Hamburger,
    NavMenu,
    Navbar,
    NavLink(usize),
    Reveal(usize),
    SkillBar(usize),
    LazyImage(usize),
    ContactForm,
    SubmitButton,
    Toast(u32),
    SkipLink,
    Loader,
}

/// A node the behavior layer inserts into the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Mount {
    /// Floating notification, appended to the body off-screen.
    Toast { id: u32, kind: ToastKind, message: String },
    /// Skip-to-content link, inserted as the first child of the body.
    SkipLink { href: String, text: String },
    /// `<link rel="preload">` in the document head.
    Preload { href: String, as_type: String },
    /// `<style>` block in the document head.
    Style { css: String },
}

impl Mount {
    /// The target that addresses this node after mounting, if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Mount::Toast { id, .. } => Some(Target::Toast(*id)),
            Mount::SkipLink { .. } => Some(Target::SkipLink),
            Mount::Preload { .. } | Mount::Style { .. } => None,
        }
    }
}

// =============================================================================
// VIEW STATE TRAIT
// =============================================================================

/// Rendering surface the components drive.
///
/// Operations on a target that does not exist must be silent no-ops.
pub trait ViewState {
    fn set_class(&self, target: Target, class: Class, on: bool);
    fn set_style(&self, target: Target, property: &str, value: &str);
    fn set_text(&self, target: Target, text: &str);
    fn set_attribute(&self, target: Target, name: &str, value: &str);
    fn remove_attribute(&self, target: Target, name: &str);
    fn set_disabled(&self, target: Target, disabled: bool);
    fn mount(&self, node: Mount);
    fn remove(&self, target: Target);
    /// Clear the contact form fields.
    fn reset_form(&self);
    /// Scroll the window to `top`.
    fn scroll_to(&self, top: f64, smooth: bool);
}

// =============================================================================
// MEMORY VIEW
// =============================================================================

/// Recorded state of a single element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeState {
    pub classes: Class,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub disabled: bool,
}

/// In-memory [`ViewState`] that records every mutation.
#[derive(Debug, Default)]
pub struct MemoryView {
    nodes: RefCell<HashMap<Target, NodeState>>,
    mounted: RefCell<Vec<Mount>>,
    scrolls: RefCell<Vec<(f64, bool)>>,
    form_resets: Cell<usize>,
    writes: Cell<usize>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an attribute before the components run (e.g. `data-src`).
    pub fn with_attribute(self, target: Target, name: &str, value: &str) -> Self {
        self.node_mut(target, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
        self
    }

    fn node_mut(&self, target: Target, f: impl FnOnce(&mut NodeState)) {
        let mut nodes = self.nodes.borrow_mut();
        f(nodes.entry(target).or_default());
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }

    /// Snapshot of an element's state (default if never touched).
    pub fn node(&self, target: Target) -> NodeState {
        self.nodes.borrow().get(&target).cloned().unwrap_or_default()
    }

    pub fn has_class(&self, target: Target, class: Class) -> bool {
        self.node(target).classes.contains(class)
    }

    pub fn style(&self, target: Target, property: &str) -> Option<String> {
        self.node(target).styles.get(property).cloned()
    }

    pub fn attribute(&self, target: Target, name: &str) -> Option<String> {
        self.node(target).attributes.get(name).cloned()
    }

    pub fn text(&self, target: Target) -> String {
        self.node(target).text
    }

    pub fn is_disabled(&self, target: Target) -> bool {
        self.node(target).disabled
    }

    /// Nodes currently mounted, in insertion order.
    pub fn mounted(&self) -> Vec<Mount> {
        self.mounted.borrow().clone()
    }

    /// Toasts currently mounted.
    pub fn toasts(&self) -> Vec<(u32, ToastKind, String)> {
        self.mounted
            .borrow()
            .iter()
            .filter_map(|m| match m {
                Mount::Toast { id, kind, message } => Some((*id, *kind, message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn scrolls(&self) -> Vec<(f64, bool)> {
        self.scrolls.borrow().clone()
    }

    pub fn form_resets(&self) -> usize {
        self.form_resets.get()
    }

    /// Total number of mutations applied so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ViewState for MemoryView {
    fn set_class(&self, target: Target, class: Class, on: bool) {
        self.bump();
        self.node_mut(target, |node| node.classes.set(class, on));
    }

    fn set_style(&self, target: Target, property: &str, value: &str) {
        self.bump();
        self.node_mut(target, |node| {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        });
    }

    fn set_text(&self, target: Target, text: &str) {
        self.bump();
        self.node_mut(target, |node| node.text = text.to_string());
    }

    fn set_attribute(&self, target: Target, name: &str, value: &str) {
        self.bump();
        self.node_mut(target, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_attribute(&self, target: Target, name: &str) {
        self.bump();
        self.node_mut(target, |node| {
            node.attributes.remove(name);
        });
    }

    fn set_disabled(&self, target: Target, disabled: bool) {
        self.bump();
        self.node_mut(target, |node| node.disabled = disabled);
    }

    fn mount(&self, node: Mount) {
        self.bump();
        self.mounted.borrow_mut().push(node);
    }

    fn remove(&self, target: Target) {
        self.bump();
        self.mounted.borrow_mut().retain(|m| m.target() != Some(target));
        self.nodes.borrow_mut().remove(&target);
    }

    fn reset_form(&self) {
        self.bump();
        self.form_resets.set(self.form_resets.get() + 1);
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        self.bump();
        self.scrolls.borrow_mut().push((top, smooth));
    }
}

// =============================================================================
// TESTS
// =============================================================================
