use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::navigator::{Direction, FocusCommand};

/// A key press as seen by the dispatcher, already detached from the DOM event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Focus is inside an input, textarea or contenteditable region.
    pub in_text_field: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn typing(mut self) -> Self {
        self.in_text_field = true;
        self
    }
}

/// Normalized key combination.
///
/// Ctrl and Meta are folded together so `Cmd+S` on macOS and `Ctrl+S`
/// elsewhere resolve to the same shortcut. The key is lowercased.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chord {
    key: String,
    meta: bool,
    shift: bool,
    alt: bool,
}

impl Chord {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_lowercase(),
            ..Default::default()
        }
    }

    /// Cmd on macOS, Ctrl everywhere else.
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn ctrl(self) -> Self {
        self.meta()
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn from_input(input: &KeyInput) -> Self {
        Self {
            key: input.key.to_lowercase(),
            meta: input.meta || input.ctrl,
            shift: input.shift,
            alt: input.alt,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human readable label for the help overlay, e.g. `Ctrl+Shift+?`.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.meta {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        let key = match self.key.as_str() {
            "arrowup" => "↑".to_string(),
            "arrowdown" => "↓".to_string(),
            "arrowleft" => "←".to_string(),
            "arrowright" => "→".to_string(),
            "escape" => "Esc".to_string(),
            "enter" => "Enter".to_string(),
            "tab" => "Tab".to_string(),
            k if k.chars().count() == 1 => k.to_uppercase(),
            k => k.to_string(),
        };
        parts.push(key);
        parts.join("+")
    }
}

impl fmt::Display for Chord {
    /// Identity string: `meta+shift+alt+key`, omitting absent modifiers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meta {
            f.write_str("meta+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        f.write_str(&self.key)
    }
}

/// What a shortcut does once resolved.
#[derive(Clone)]
pub enum ShortcutAction {
    /// Handled by the navigator against the current navigation context.
    Focus(FocusCommand),
    /// Client-side route change.
    Navigate(String),
    /// Open the shortcut help surface.
    ShowHelp,
    /// Arbitrary effect supplied by the registering component.
    Run(Rc<dyn Fn()>),
}

impl fmt::Debug for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focus(cmd) => f.debug_tuple("Focus").field(cmd).finish(),
            Self::Navigate(path) => f.debug_tuple("Navigate").field(path).finish(),
            Self::ShowHelp => f.write_str("ShowHelp"),
            Self::Run(_) => f.write_str("Run(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Shortcut {
    pub chord: Chord,
    pub description: String,
    pub category: String,
    pub action: ShortcutAction,
    /// Global shortcuts fire even while the user is typing in a text field.
    /// Unlike the rest of the defaults, the arrow keys, Enter, `/` and `?`
    /// are local, so typing them into a field never moves focus.
    pub global: bool,
}

impl Shortcut {
    pub fn new(
        chord: Chord,
        description: impl Into<String>,
        category: impl Into<String>,
        action: ShortcutAction,
    ) -> Self {
        Self {
            chord,
            description: description.into(),
            category: category.into(),
            action,
            global: true,
        }
    }

    pub fn run(
        chord: Chord,
        description: impl Into<String>,
        category: impl Into<String>,
        f: impl Fn() + 'static,
    ) -> Self {
        Self::new(chord, description, category, ShortcutAction::Run(Rc::new(f)))
    }

    /// Skip this shortcut while focus is inside a text field.
    pub fn local(mut self) -> Self {
        self.global = false;
        self
    }
}

/// Help-surface view of the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutGroup {
    pub category: String,
    pub entries: Vec<ShortcutSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutSummary {
    pub keys: String,
    pub description: String,
}

/// Chord → shortcut map that keeps registration order for display.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: Vec<Shortcut>,
    index: HashMap<Chord, usize>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or silently replace the shortcut bound to the same chord.
    pub fn register(&mut self, shortcut: Shortcut) {
        match self.index.get(&shortcut.chord) {
            Some(&i) => self.entries[i] = shortcut,
            None => {
                self.index.insert(shortcut.chord.clone(), self.entries.len());
                self.entries.push(shortcut);
            }
        }
    }

    pub fn resolve(&self, input: &KeyInput) -> Option<&Shortcut> {
        self.index
            .get(&Chord::from_input(input))
            .map(|&i| &self.entries[i])
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shortcuts grouped by category, categories in first-seen order.
    pub fn groups(&self) -> Vec<ShortcutGroup> {
        let mut out: Vec<ShortcutGroup> = Vec::new();
        for s in &self.entries {
            let summary = ShortcutSummary {
                keys: s.chord.label(),
                description: s.description.clone(),
            };
            match out.iter_mut().find(|g| g.category == s.category) {
                Some(group) => group.entries.push(summary),
                None => out.push(ShortcutGroup {
                    category: s.category.clone(),
                    entries: vec![summary],
                }),
            }
        }
        out
    }
}

/// The portal's built-in bindings.
pub fn default_shortcuts() -> Vec<Shortcut> {
    let go = |key: &str, description: &str, path: &str| {
        Shortcut::new(
            Chord::new(key).meta(),
            description,
            "Navigation",
            ShortcutAction::Navigate(path.to_string()),
        )
    };
    let focus = |chord: Chord, description: &str, category: &str, cmd: FocusCommand| {
        Shortcut::new(chord, description, category, ShortcutAction::Focus(cmd))
    };

    vec![
        go("h", "Go to Home/Dashboard", "/"),
        go("s", "Go to Subjects", "/subjects"),
        go("t", "Go to Tests", "/tests"),
        go("p", "Go to PYQs", "/pyqs"),
        go("c", "Go to Community", "/community"),
        go("m", "Go to Mentors", "/connect-mentor"),
        go("r", "Go to Resources", "/resources"),
        focus(
            Chord::new("Tab"),
            "Navigate to next focusable element",
            "Focus Navigation",
            FocusCommand::Next,
        ),
        focus(
            Chord::new("Tab").shift(),
            "Navigate to previous focusable element",
            "Focus Navigation",
            FocusCommand::Previous,
        ),
        focus(
            Chord::new("/"),
            "Focus search",
            "Quick Actions",
            FocusCommand::FocusSearch,
        )
        .local(),
        focus(
            Chord::new("Escape"),
            "Clear focus / Close modals",
            "Quick Actions",
            FocusCommand::ClearOrClose,
        ),
        Shortcut::new(
            Chord::new("?").shift(),
            "Show keyboard shortcuts help",
            "Help",
            ShortcutAction::ShowHelp,
        )
        .local(),
        focus(
            Chord::new("ArrowDown"),
            "Navigate down",
            "Arrow Navigation",
            FocusCommand::Move(Direction::Down),
        )
        .local(),
        focus(
            Chord::new("ArrowUp"),
            "Navigate up",
            "Arrow Navigation",
            FocusCommand::Move(Direction::Up),
        )
        .local(),
        focus(
            Chord::new("ArrowLeft"),
            "Navigate left",
            "Arrow Navigation",
            FocusCommand::Move(Direction::Left),
        )
        .local(),
        focus(
            Chord::new("ArrowRight"),
            "Navigate right",
            "Arrow Navigation",
            FocusCommand::Move(Direction::Right),
        )
        .local(),
        focus(
            Chord::new("Enter"),
            "Activate focused element",
            "Interaction",
            FocusCommand::Activate,
        )
        .local(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn noop(chord: Chord, description: &str) -> Shortcut {
        Shortcut::run(chord, description, "Test", || {})
    }

    #[test]
    fn test_chord_identity_string() {
        assert_eq!(Chord::new("S").meta().to_string(), "meta+s");
        assert_eq!(Chord::new("?").shift().to_string(), "shift+?");
        assert_eq!(
            Chord::new("ArrowUp").alt().shift().meta().to_string(),
            "meta+shift+alt+arrowup"
        );
    }

    #[test]
    fn test_ctrl_and_meta_fold_together() {
        assert_eq!(Chord::new("k").ctrl(), Chord::new("k").meta());
        let a = Chord::from_input(&KeyInput::new("K").ctrl());
        let b = Chord::from_input(&KeyInput::new("k").meta());
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_matches_exact_modifiers_only() {
        let mut reg = ShortcutRegistry::new();
        reg.register(noop(Chord::new("Tab"), "next"));
        reg.register(noop(Chord::new("Tab").shift(), "prev"));

        let next = reg.resolve(&KeyInput::new("Tab")).expect("tab bound");
        assert_eq!(next.description, "next");
        let prev = reg.resolve(&KeyInput::new("Tab").shift()).expect("shift+tab bound");
        assert_eq!(prev.description, "prev");
        assert!(reg.resolve(&KeyInput::new("Tab").alt()).is_none());
        assert!(reg.resolve(&KeyInput::new("x")).is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let hits = Rc::new(Cell::new(0));
        let mut reg = ShortcutRegistry::new();

        let first = hits.clone();
        reg.register(Shortcut::run(Chord::new("g").meta(), "first", "A", move || {
            first.set(first.get() + 1)
        }));
        let second = hits.clone();
        reg.register(Shortcut::run(Chord::new("G").ctrl(), "second", "B", move || {
            second.set(second.get() + 10)
        }));

        assert_eq!(reg.len(), 1);
        let s = reg.resolve(&KeyInput::new("g").meta()).expect("bound");
        assert_eq!(s.description, "second");
        match &s.action {
            ShortcutAction::Run(f) => f(),
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn test_overwrite_keeps_original_position() {
        let mut reg = ShortcutRegistry::new();
        reg.register(noop(Chord::new("a"), "a"));
        reg.register(noop(Chord::new("b"), "b"));
        reg.register(noop(Chord::new("a"), "a2"));

        let names: Vec<_> = reg.shortcuts().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["a2", "b"]);
    }

    #[test]
    fn test_groups_follow_first_seen_category_order() {
        let mut reg = ShortcutRegistry::new();
        for s in default_shortcuts() {
            reg.register(s);
        }
        let groups = reg.groups();
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Navigation",
                "Focus Navigation",
                "Quick Actions",
                "Help",
                "Arrow Navigation",
                "Interaction"
            ]
        );
        assert_eq!(groups[0].entries.len(), 7);
        assert_eq!(groups[0].entries[0].keys, "Ctrl+H");
    }

    #[test]
    fn test_default_help_binding_requires_shift() {
        let mut reg = ShortcutRegistry::new();
        for s in default_shortcuts() {
            reg.register(s);
        }
        let help = reg.resolve(&KeyInput::new("?").shift()).expect("help bound");
        assert!(matches!(help.action, ShortcutAction::ShowHelp));
        assert!(reg.resolve(&KeyInput::new("?")).is_none());
    }
}
