//! In-memory focus graph for exercising the navigator without a browser.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::geometry::Rect;
use super::sampler::{ElementKind, FocusSampler, FocusTarget};

#[derive(Default)]
pub(crate) struct FakePage {
    focused: RefCell<Option<String>>,
    checked: RefCell<HashSet<String>>,
    log: RefCell<Vec<String>>,
}

impl FakePage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_focus(&self, id: &str) {
        *self.focused.borrow_mut() = Some(id.to_string());
    }

    pub fn blur_all(&self) {
        *self.focused.borrow_mut() = None;
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.borrow().contains(id)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: &str, id: &str) {
        self.log.borrow_mut().push(format!("{event}:{id}"));
    }
}

#[derive(Clone)]
pub(crate) struct FakeElement {
    pub id: String,
    pub rect: Rect,
    pub kind: ElementKind,
    page: Rc<FakePage>,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeElement").field("id", &self.id).finish()
    }
}

impl FocusTarget for FakeElement {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn focus(&self) {
        self.page.set_focus(&self.id);
        self.page.record("focus", &self.id);
    }

    fn blur(&self) {
        if self.page.focused().as_deref() == Some(self.id.as_str()) {
            self.page.blur_all();
        }
        self.page.record("blur", &self.id);
    }

    fn scroll_into_view(&self) {
        self.page.record("scroll", &self.id);
    }

    fn click(&self) {
        self.page.record("click", &self.id);
    }

    fn toggle_checked(&self) {
        let mut checked = self.page.checked.borrow_mut();
        if !checked.remove(&self.id) {
            checked.insert(self.id.clone());
        }
        drop(checked);
        self.page.record("toggle", &self.id);
    }
}

pub(crate) struct FakeSampler {
    page: Rc<FakePage>,
    elements: RefCell<Vec<FakeElement>>,
    search: Option<String>,
    close: Option<String>,
}

impl FakeSampler {
    pub fn new(page: Rc<FakePage>) -> Self {
        Self {
            page,
            elements: RefCell::new(Vec::new()),
            search: None,
            close: None,
        }
    }

    fn with(self, id: &str, rect: Rect, kind: ElementKind) -> Self {
        self.elements.borrow_mut().push(FakeElement {
            id: id.to_string(),
            rect,
            kind,
            page: self.page.clone(),
        });
        self
    }

    pub fn button(self, id: &str, rect: Rect) -> Self {
        self.with(id, rect, ElementKind::Button)
    }

    pub fn checkbox(self, id: &str, rect: Rect) -> Self {
        self.with(id, rect, ElementKind::Checkbox)
    }

    pub fn text_field(self, id: &str, rect: Rect) -> Self {
        self.with(id, rect, ElementKind::TextField)
    }

    pub fn with_search_input(mut self, id: &str) -> Self {
        self.search = Some(id.to_string());
        self
    }

    pub fn with_close_control(mut self, id: &str) -> Self {
        self.close = Some(id.to_string());
        self
    }

    /// Simulates a DOM mutation.
    pub fn remove(&self, id: &str) {
        self.elements.borrow_mut().retain(|e| e.id != id);
    }

    fn find(&self, id: &str) -> Option<FakeElement> {
        self.elements.borrow().iter().find(|e| e.id == id).cloned()
    }
}

impl FocusSampler for FakeSampler {
    type Target = FakeElement;

    fn enumerate_focusable(&self) -> Vec<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.rect.has_area())
            .cloned()
            .collect()
    }

    fn active(&self) -> Option<FakeElement> {
        let id = self.page.focused()?;
        self.find(&id)
    }

    fn search_input(&self) -> Option<FakeElement> {
        self.search.as_deref().and_then(|id| self.find(id))
    }

    fn close_control(&self) -> Option<FakeElement> {
        self.close.as_deref().and_then(|id| self.find(id))
    }
}
