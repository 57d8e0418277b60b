//! Keyboard-driven focus navigation.
//!
//! [`NavigationManager`] holds the shortcut table and the focus graph and
//! knows nothing about the browser; [`NavigationService`] wires it to window
//! events for the running app.

mod dispatcher;
mod dom;
mod geometry;
mod navigator;
mod sampler;
mod service;
mod shortcut;

#[cfg(test)]
mod testing;

pub use dispatcher::{DispatcherState, KeyOutcome, NavigationManager};
pub use dom::{DomElement, DomSampler, FOCUSABLE_SELECTOR};
pub use geometry::Rect;
pub use navigator::{
    Direction, FocusCommand, NavigationContext, Navigator, DEFAULT_LATERAL_TOLERANCE,
};
pub use sampler::{ElementKind, FocusSampler, FocusTarget};
pub use service::NavigationService;
pub use shortcut::{
    default_shortcuts, Chord, KeyInput, Shortcut, ShortcutAction, ShortcutGroup,
    ShortcutRegistry, ShortcutSummary,
};
