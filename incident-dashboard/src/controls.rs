//! UI bindings
//!
//! The controller never looks elements up itself. Callers hand it typed
//! references, and an element that is missing from the page is passed as
//! `None` and skipped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use incident_charts::Period;

/// A clickable element whose state the controller drives
pub trait Control: Send + Sync {
    /// Toggle the `active` marker.
    fn set_active(&self, active: bool);

    fn set_disabled(&self, disabled: bool);

    /// Replace the element's inner content.
    fn set_content(&self, html: &str);
}

pub type ControlRef = Arc<dyn Control>;

/// Full-page navigation
pub trait PageNavigator: Send + Sync {
    fn reload(&self);
}

/// An element whose text can be replaced
pub trait TextTarget: Send + Sync {
    fn set_text(&self, text: &str);
}

/// A period-selector button and the window it selects
#[derive(Clone)]
pub struct PeriodButton {
    pub control: ControlRef,
    pub period: Period,
}

impl PeriodButton {
    pub fn new(control: ControlRef, period: Period) -> Self {
        Self { control, period }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ControlState {
    active: bool,
    disabled: bool,
    content: String,
}

/// Control with no rendering surface; records the state it is given
#[derive(Debug, Default)]
pub struct HeadlessControl {
    state: Mutex<ControlState>,
}

impl HeadlessControl {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ControlState {
                content: content.into(),
                ..ControlState::default()
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.with_state(|state| state.active)
    }

    pub fn is_disabled(&self) -> bool {
        self.with_state(|state| state.disabled)
    }

    pub fn content(&self) -> String {
        self.with_state(|state| state.content.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ControlState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl Control for HeadlessControl {
    fn set_active(&self, active: bool) {
        self.with_state(|state| state.active = active);
    }

    fn set_disabled(&self, disabled: bool) {
        self.with_state(|state| state.disabled = disabled);
    }

    fn set_content(&self, html: &str) {
        self.with_state(|state| state.content = html.to_string());
    }
}

/// Navigator that counts reload requests
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    reloads: AtomicUsize,
}

impl HeadlessNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageNavigator for HeadlessNavigator {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Text element that keeps its latest text
#[derive(Debug, Default)]
pub struct HeadlessText {
    text: Mutex<String>,
}

impl HeadlessText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TextTarget for HeadlessText {
    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.to_string();
    }
}
