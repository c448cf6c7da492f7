//! Capabilities the embedding page provides.
//!
//! The subsystem touches the outside world only through these traits: a text
//! input, a result surface, a "search-active" flag, navigation, and a
//! visibility signal.

use tokio::sync::watch;

use crate::render::ResultItem;

/// The search text input.
pub trait TextInput {
    /// Current raw value.
    fn input_value(&self) -> String;
    /// Empties the input.
    fn clear_input(&mut self);
    /// Gives the input keyboard focus.
    fn focus_input(&mut self);
    /// Removes keyboard focus from the input.
    fn blur_input(&mut self);
    /// True while the input has keyboard focus.
    fn input_focused(&self) -> bool;
}

/// The region results are materialized into.
pub trait ResultSurface {
    /// Removes all items and any placeholder.
    fn clear_results(&mut self);
    /// Appends one result item.
    fn append_result(&mut self, item: ResultItem);
    /// Shows the "no results" placeholder.
    fn show_placeholder(&mut self, text: &str);
    /// Shows or hides the surface.
    fn set_results_visible(&mut self, visible: bool);
}

/// The page-level "search-active" flag, for dimming surrounding chrome.
pub trait ActiveFlag {
    /// Sets the flag.
    fn set_search_active(&mut self, active: bool);
}

/// Changes the current page.
pub trait Navigator {
    /// Sets the current location to `url`.
    fn navigate(&mut self, url: &str);
}

/// Whether the search input is currently visible on the page.
pub trait Visibility {
    /// True when the input is visible.
    fn is_visible(&self) -> bool;
}

impl Visibility for watch::Receiver<bool> {
    fn is_visible(&self) -> bool {
        *self.borrow()
    }
}

impl Visibility for bool {
    fn is_visible(&self) -> bool {
        *self
    }
}

/// Everything the input controller drives.
pub trait Host: TextInput + ResultSurface + ActiveFlag + Navigator {}

impl<T: TextInput + ResultSurface + ActiveFlag + Navigator> Host for T {}

/// Where focus went when the input lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// An element inside the result surface, such as a result link.
    ResultSurface,
    /// Anywhere else on the page.
    Elsewhere,
}
