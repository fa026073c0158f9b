//! Display state for each data-bound view.
//!
//! A `View<T>` pairs what the view should show right now (`ViewState`) with
//! the last payload that loaded successfully.

use std::fmt;

/// Mutually exclusive display states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Never requested.
    Idle,
    Loading,
    /// The request failed. Earlier data, if any, is still held.
    Error(String),
    /// The request succeeded but returned nothing to show.
    Empty,
    Populated,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => f.write_str("idle"),
            ViewState::Loading => f.write_str("loading"),
            ViewState::Error(message) => write!(f, "error: {}", message),
            ViewState::Empty => f.write_str("no data"),
            ViewState::Populated => f.write_str("populated"),
        }
    }
}

/// State plus last successful payload for one view.
#[derive(Debug, Clone)]
pub struct View<T> {
    state: ViewState,
    data: Option<T>,
}

impl<T> Default for View<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            data: None,
        }
    }
}

impl<T> View<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    /// Mark a request in flight. The previous payload stays visible.
    pub fn start_loading(&mut self) {
        self.state = ViewState::Loading;
    }

    /// Replace the payload entirely. `empty` selects `Empty` over `Populated`.
    pub fn succeed(&mut self, data: T, empty: bool) {
        self.state = if empty {
            ViewState::Empty
        } else {
            ViewState::Populated
        };
        self.data = Some(data);
    }

    /// Record a failure without touching the payload.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = ViewState::Error(message.into());
    }

    /// Drop the payload and return to `Idle`.
    pub fn clear(&mut self) {
        self.state = ViewState::Idle;
        self.data = None;
    }
}
