use std::rc::Rc;

use super::navigator::Navigator;
use super::sampler::FocusSampler;
use super::shortcut::{default_shortcuts, KeyInput, Shortcut, ShortcutAction, ShortcutGroup, ShortcutRegistry};
use crate::feedback::{FeedbackKind, FeedbackSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatcherState {
    Enabled,
    Disabled,
}

/// Result of feeding one key-down into the manager.
pub enum KeyOutcome {
    /// Dispatcher is disabled.
    Ignored,
    /// No shortcut applies to this key.
    Unbound,
    /// A shortcut ran to completion.
    Handled,
    /// A component callback matched. The caller runs it once it no longer
    /// holds the manager, so the callback may call back into it.
    Deferred(Rc<dyn Fn()>),
}

impl KeyOutcome {
    /// The browser default for the key must be suppressed.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled | Self::Deferred(_))
    }
}

/// Keyboard shortcut dispatch plus focus navigation for one application.
pub struct NavigationManager<S: FocusSampler> {
    registry: ShortcutRegistry,
    navigator: Navigator<S>,
    state: DispatcherState,
    feedback: Box<dyn FeedbackSink>,
    router: Box<dyn Fn(&str)>,
    on_help: Box<dyn Fn()>,
}

impl<S: FocusSampler> NavigationManager<S> {
    /// A manager with the portal's default shortcuts, starting enabled.
    pub fn new(navigator: Navigator<S>, feedback: Box<dyn FeedbackSink>) -> Self {
        let mut registry = ShortcutRegistry::new();
        for shortcut in default_shortcuts() {
            registry.register(shortcut);
        }
        Self {
            registry,
            navigator,
            state: DispatcherState::Enabled,
            feedback,
            router: Box::new(|path| log::debug!("no router attached, dropping {path}")),
            on_help: Box::new(|| {}),
        }
    }

    pub fn with_router(mut self, router: impl Fn(&str) + 'static) -> Self {
        self.router = Box::new(router);
        self
    }

    pub fn with_help(mut self, on_help: impl Fn() + 'static) -> Self {
        self.on_help = Box::new(on_help);
        self
    }

    pub fn register_shortcut(&mut self, shortcut: Shortcut) {
        log::debug!("shortcut {} -> {}", shortcut.chord, shortcut.description);
        self.registry.register(shortcut);
    }

    pub fn enable(&mut self) {
        self.state = DispatcherState::Enabled;
    }

    pub fn disable(&mut self) {
        self.state = DispatcherState::Disabled;
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == DispatcherState::Enabled
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        self.registry.shortcuts()
    }

    pub fn shortcut_groups(&self) -> Vec<ShortcutGroup> {
        self.registry.groups()
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        if !self.is_enabled() {
            return KeyOutcome::Ignored;
        }
        let Some(shortcut) = self.registry.resolve(input) else {
            return KeyOutcome::Unbound;
        };
        if input.in_text_field && !shortcut.global {
            return KeyOutcome::Unbound;
        }
        let action = shortcut.action.clone();

        self.feedback.pulse(FeedbackKind::Light);

        match action {
            ShortcutAction::Focus(command) => {
                self.navigator.execute(command);
                KeyOutcome::Handled
            }
            ShortcutAction::Navigate(path) => {
                (self.router)(&path);
                KeyOutcome::Handled
            }
            ShortcutAction::ShowHelp => {
                (self.on_help)();
                self.feedback.pulse(FeedbackKind::Success);
                KeyOutcome::Handled
            }
            ShortcutAction::Run(f) => KeyOutcome::Deferred(f),
        }
    }

    pub fn handle_focus(&mut self, target: &S::Target) {
        self.navigator.on_focus_changed(target);
    }

    pub fn page_changed(&mut self, path: &str) {
        self.navigator.set_page(path);
    }

    pub fn dom_changed(&mut self) {
        self.navigator.resample();
    }
}
