//! Browser-backed focus graph.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::geometry::Rect;
use super::sampler::{ElementKind, FocusSampler, FocusTarget};
use super::shortcut::KeyInput;

pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), input:not([disabled]), \
     select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"]), \
     [contenteditable=\"true\"]";

const SEARCH_SELECTOR: &str = "input[type=\"search\"], input[placeholder*=\"search\" i]";
const CLOSE_SELECTOR: &str = "[data-close], [aria-label*=\"close\" i]";

#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(HtmlElement);

impl DomElement {
    pub fn new(el: HtmlElement) -> Self {
        Self(el)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.0
    }

    fn is_visible(&self) -> bool {
        if !self.rect().has_area() {
            return false;
        }
        let hidden = web_sys::window()
            .and_then(|w| w.get_computed_style(&self.0).ok().flatten())
            .and_then(|style| style.get_property_value("visibility").ok())
            .is_some_and(|v| v == "hidden");
        !hidden
    }
}

impl FocusTarget for DomElement {
    fn rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.top(), r.left(), r.width(), r.height())
    }

    fn kind(&self) -> ElementKind {
        let input_type = self.0.dyn_ref::<HtmlInputElement>().map(|i| i.type_());
        ElementKind::from_tag(&self.0.tag_name(), input_type.as_deref())
    }

    fn focus(&self) {
        let _ = self.0.focus();
    }

    fn blur(&self) {
        let _ = self.0.blur();
    }

    fn scroll_into_view(&self) {
        let opts = web_sys::ScrollIntoViewOptions::new();
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        opts.set_block(web_sys::ScrollLogicalPosition::Center);
        self.0.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    fn click(&self) {
        self.0.click();
    }

    fn toggle_checked(&self) {
        let Some(input) = self.0.dyn_ref::<HtmlInputElement>() else {
            return;
        };
        input.set_checked(!input.checked());

        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        match web_sys::Event::new_with_event_init_dict("change", &init) {
            Ok(ev) => {
                let _ = input.dispatch_event(&ev);
            }
            Err(e) => log::warn!("could not build change event: {e:?}"),
        }
    }
}

/// Samples the live document on every call.
pub struct DomSampler {
    document: Document,
}

impl DomSampler {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }

    fn first(&self, selector: &str) -> Option<DomElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
    }
}

impl FocusSampler for DomSampler {
    type Target = DomElement;

    fn enumerate_focusable(&self) -> Vec<DomElement> {
        let Ok(list) = self.document.query_selector_all(FOCUSABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .filter(DomElement::is_visible)
            .collect()
    }

    fn active(&self) -> Option<DomElement> {
        let el = self
            .document
            .active_element()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        // Nothing focused reports the body.
        if self.document.body().is_some_and(|body| body == el) {
            return None;
        }
        Some(DomElement(el))
    }

    fn search_input(&self) -> Option<DomElement> {
        self.first(SEARCH_SELECTOR)
    }

    fn close_control(&self) -> Option<DomElement> {
        self.first(CLOSE_SELECTOR)
    }
}

fn is_text_field(target: Option<web_sys::EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    if el.is_content_editable() {
        return true;
    }
    DomElement(el).kind() == ElementKind::TextField
}

impl From<&web_sys::KeyboardEvent> for KeyInput {
    fn from(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: ev.key(),
            meta: ev.meta_key(),
            ctrl: ev.ctrl_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
            in_text_field: is_text_field(ev.target()),
        }
    }
}
