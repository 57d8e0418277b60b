use super::sampler::{ElementKind, FocusSampler, FocusTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Focus operations a shortcut can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusCommand {
    Next,
    Previous,
    Move(Direction),
    Activate,
    FocusSearch,
    ClearOrClose,
}

/// Snapshot of the focus graph for one page view.
#[derive(Clone, Debug)]
pub struct NavigationContext<T> {
    pub current_page: String,
    pub elements: Vec<T>,
    /// `None` when focus is outside the sampled set.
    pub current_index: Option<usize>,
}

impl<T> Default for NavigationContext<T> {
    fn default() -> Self {
        Self {
            current_page: "/".to_string(),
            elements: Vec::new(),
            current_index: None,
        }
    }
}

/// Lateral tolerance used when nothing is configured: one full width (for
/// vertical moves) or height (for horizontal moves) of the focused element.
pub const DEFAULT_LATERAL_TOLERANCE: f64 = 1.0;

pub struct Navigator<S: FocusSampler> {
    sampler: S,
    context: NavigationContext<S::Target>,
    lateral_tolerance: f64,
}

impl<S: FocusSampler> Navigator<S> {
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            context: NavigationContext::default(),
            lateral_tolerance: DEFAULT_LATERAL_TOLERANCE,
        }
    }

    pub fn with_lateral_tolerance(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.lateral_tolerance = factor;
        }
        self
    }

    pub fn context(&self) -> &NavigationContext<S::Target> {
        &self.context
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Start a new page view: the old snapshot is dropped and rebuilt.
    pub fn set_page(&mut self, page: &str) {
        self.context.current_page = page.to_string();
        self.resample();
    }

    /// Rebuild the element list and relocate the focused element in it.
    pub fn resample(&mut self) {
        self.context.elements = self.sampler.enumerate_focusable();
        self.context.current_index = self
            .sampler
            .active()
            .and_then(|active| self.position_of(&active));
    }

    /// Focus moved by other means (mouse, script); keep the index in sync.
    pub fn on_focus_changed(&mut self, target: &S::Target) {
        if let Some(i) = self.position_of(target) {
            self.context.current_index = Some(i);
        }
    }

    pub fn execute(&mut self, command: FocusCommand) -> bool {
        match command {
            FocusCommand::Next => self.next(),
            FocusCommand::Previous => self.previous(),
            FocusCommand::Move(direction) => self.move_focus(direction),
            FocusCommand::Activate => self.activate(),
            FocusCommand::FocusSearch => self.focus_search(),
            FocusCommand::ClearOrClose => self.clear_focus_or_close(),
        }
    }

    pub fn next(&mut self) -> bool {
        self.resample();
        let len = self.context.elements.len();
        if len == 0 {
            return false;
        }
        let index = match self.context.current_index {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.focus_at(index)
    }

    pub fn previous(&mut self) -> bool {
        self.resample();
        let len = self.context.elements.len();
        if len == 0 {
            return false;
        }
        let index = match self.context.current_index {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.focus_at(index)
    }

    /// Geometric move from the focused element to the nearest candidate in
    /// `direction`, using the last sampled element list.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(current) = self.sampler.active() else {
            return false;
        };
        let from = current.rect();
        let tolerance = self.lateral_tolerance;

        let mut candidates = self
            .context
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| {
                let r = el.rect();
                match direction {
                    Direction::Down => r.is_below(&from) && r.shares_column(&from, tolerance),
                    Direction::Up => r.is_above(&from) && r.shares_column(&from, tolerance),
                    Direction::Right => r.is_right_of(&from) && r.shares_row(&from, tolerance),
                    Direction::Left => r.is_left_of(&from) && r.shares_row(&from, tolerance),
                }
            })
            .map(|(i, _)| i);

        let picked = match direction {
            Direction::Down | Direction::Right => candidates.next(),
            Direction::Up | Direction::Left => candidates.last(),
        };

        match picked {
            Some(i) => self.focus_at(i),
            None => false,
        }
    }

    pub fn activate(&mut self) -> bool {
        let Some(el) = self.sampler.active() else {
            return false;
        };
        match el.kind() {
            ElementKind::Button | ElementKind::Link => {
                el.click();
                true
            }
            ElementKind::Checkbox => {
                el.toggle_checked();
                true
            }
            _ => false,
        }
    }

    pub fn focus_search(&mut self) -> bool {
        let Some(input) = self.sampler.search_input() else {
            return false;
        };
        match self.position_of(&input) {
            Some(i) => self.focus_at(i),
            None => {
                input.focus();
                true
            }
        }
    }

    /// Close the first open dialog, or drop focus when nothing is open.
    pub fn clear_focus_or_close(&mut self) -> bool {
        if let Some(close) = self.sampler.close_control() {
            close.click();
            return true;
        }
        match self.sampler.active() {
            Some(el) => {
                el.blur();
                self.context.current_index = None;
                true
            }
            None => false,
        }
    }

    fn focus_at(&mut self, index: usize) -> bool {
        let Some(el) = self.context.elements.get(index) else {
            return false;
        };
        el.focus();
        el.scroll_into_view();
        self.context.current_index = Some(index);
        true
    }

    fn position_of(&self, target: &S::Target) -> Option<usize> {
        self.context.elements.iter().position(|el| el == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::geometry::Rect;
    use crate::nav::testing::{FakePage, FakeSampler};

    fn grid() -> (std::rc::Rc<FakePage>, Navigator<FakeSampler>) {
        // A B
        // C
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("A", Rect::new(0.0, 0.0, 50.0, 30.0))
            .button("B", Rect::new(0.0, 100.0, 50.0, 30.0))
            .button("C", Rect::new(50.0, 0.0, 50.0, 30.0));
        let mut nav = Navigator::new(sampler);
        nav.set_page("/dashboard");
        (page, nav)
    }

    #[test]
    fn test_down_and_right_from_top_left() {
        let (page, mut nav) = grid();
        page.set_focus("A");
        nav.resample();

        assert!(nav.move_focus(Direction::Down));
        assert_eq!(page.focused().as_deref(), Some("C"));
        assert_eq!(nav.context().current_index, Some(2));

        page.set_focus("A");
        assert!(nav.move_focus(Direction::Right));
        assert_eq!(page.focused().as_deref(), Some("B"));
        assert_eq!(nav.context().current_index, Some(1));
    }

    #[test]
    fn test_up_and_left_pick_closest_in_document_order() {
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("top", Rect::new(0.0, 0.0, 50.0, 30.0))
            .button("middle", Rect::new(40.0, 0.0, 50.0, 30.0))
            .button("left", Rect::new(80.0, 0.0, 50.0, 30.0))
            .button("bottom", Rect::new(80.0, 100.0, 50.0, 30.0));
        let mut nav = Navigator::new(sampler);
        nav.resample();

        page.set_focus("left");
        assert!(nav.move_focus(Direction::Up));
        assert_eq!(page.focused().as_deref(), Some("middle"));

        page.set_focus("bottom");
        assert!(nav.move_focus(Direction::Left));
        assert_eq!(page.focused().as_deref(), Some("left"));
    }

    #[test]
    fn test_no_candidate_leaves_focus_alone() {
        let (page, mut nav) = grid();
        page.set_focus("B");
        nav.resample();
        page.clear_log();

        assert!(!nav.move_focus(Direction::Right));
        assert!(!nav.move_focus(Direction::Up));
        assert_eq!(page.focused().as_deref(), Some("B"));
        assert!(page.log().is_empty());
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("a", Rect::new(0.0, 0.0, 50.0, 30.0))
            .button("b", Rect::new(60.0, 40.0, 50.0, 30.0));

        let mut strict = Navigator::new(sampler).with_lateral_tolerance(0.5);
        strict.resample();
        page.set_focus("a");
        assert!(!strict.move_focus(Direction::Down));

        let loose_sampler = FakeSampler::new(page.clone())
            .button("a", Rect::new(0.0, 0.0, 50.0, 30.0))
            .button("b", Rect::new(60.0, 40.0, 50.0, 30.0));
        let mut loose = Navigator::new(loose_sampler);
        loose.resample();
        assert!(loose.move_focus(Direction::Down));
        assert_eq!(page.focused().as_deref(), Some("b"));
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let (page, mut nav) = grid();
        page.set_focus("B");
        for _ in 0..3 {
            assert!(nav.next());
        }
        assert_eq!(page.focused().as_deref(), Some("B"));
    }

    #[test]
    fn test_previous_undoes_next() {
        let (page, mut nav) = grid();
        for start in ["A", "B", "C"] {
            page.set_focus(start);
            nav.next();
            nav.previous();
            assert_eq!(page.focused().as_deref(), Some(start));
        }
    }

    #[test]
    fn test_unknown_focus_starts_at_ends() {
        let (page, mut nav) = grid();
        assert!(nav.next());
        assert_eq!(page.focused().as_deref(), Some("A"));

        page.blur_all();
        assert!(nav.previous());
        assert_eq!(page.focused().as_deref(), Some("C"));
    }

    #[test]
    fn test_focus_change_scrolls_into_view() {
        let (page, mut nav) = grid();
        nav.next();
        assert_eq!(page.log(), vec!["focus:A", "scroll:A"]);
    }

    #[test]
    fn test_empty_set_is_a_noop_everywhere() {
        let page = FakePage::new();
        let mut nav = Navigator::new(FakeSampler::new(page.clone()));
        nav.resample();

        assert!(!nav.next());
        assert!(!nav.previous());
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!nav.move_focus(d));
        }
        assert!(page.focused().is_none());
        assert!(page.log().is_empty());
    }

    #[test]
    fn test_activate_clicks_buttons_and_toggles_checkboxes() {
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("go", Rect::new(0.0, 0.0, 50.0, 30.0))
            .checkbox("remember", Rect::new(40.0, 0.0, 20.0, 20.0))
            .text_field("name", Rect::new(80.0, 0.0, 120.0, 30.0));
        let mut nav = Navigator::new(sampler);
        nav.resample();

        page.set_focus("go");
        assert!(nav.activate());
        page.set_focus("remember");
        assert!(nav.activate());
        assert!(page.is_checked("remember"));
        page.set_focus("name");
        assert!(!nav.activate());

        assert_eq!(page.log(), vec!["click:go", "toggle:remember"]);
    }

    #[test]
    fn test_focus_changed_ignores_unknown_elements() {
        let (page, mut nav) = grid();
        page.set_focus("A");
        nav.resample();

        let stranger = FakeSampler::new(page.clone())
            .button("elsewhere", Rect::new(500.0, 500.0, 10.0, 10.0))
            .enumerate_focusable()
            .remove(0);
        nav.on_focus_changed(&stranger);
        assert_eq!(nav.context().current_index, Some(0));

        let c = nav.context().elements[2].clone();
        nav.on_focus_changed(&c);
        assert_eq!(nav.context().current_index, Some(2));
    }

    #[test]
    fn test_clear_prefers_close_control() {
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("open", Rect::new(0.0, 0.0, 50.0, 30.0))
            .button("dismiss", Rect::new(0.0, 100.0, 50.0, 30.0))
            .with_close_control("dismiss");
        let mut nav = Navigator::new(sampler);
        page.set_focus("open");
        nav.resample();

        assert!(nav.clear_focus_or_close());
        assert_eq!(page.log(), vec!["click:dismiss"]);
    }

    #[test]
    fn test_clear_blurs_without_dialog() {
        let (page, mut nav) = grid();
        page.set_focus("A");
        nav.resample();

        assert!(nav.clear_focus_or_close());
        assert!(page.focused().is_none());
        assert_eq!(nav.context().current_index, None);
    }

    #[test]
    fn test_focus_search() {
        let page = FakePage::new();
        let sampler = FakeSampler::new(page.clone())
            .button("menu", Rect::new(0.0, 0.0, 50.0, 30.0))
            .text_field("search", Rect::new(0.0, 100.0, 200.0, 30.0))
            .with_search_input("search");
        let mut nav = Navigator::new(sampler);
        nav.resample();

        assert!(nav.execute(FocusCommand::FocusSearch));
        assert_eq!(page.focused().as_deref(), Some("search"));
        assert_eq!(nav.context().current_index, Some(1));
    }
}
