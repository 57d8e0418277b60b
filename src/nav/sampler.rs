use super::geometry::Rect;

/// Element categories the navigator treats differently on activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Link,
    Checkbox,
    TextField,
    Other,
}

impl ElementKind {
    pub fn from_tag(tag: &str, input_type: Option<&str>) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "button" => Self::Button,
            "a" => Self::Link,
            "textarea" => Self::TextField,
            "input" => match input_type.map(|t| t.to_ascii_lowercase()) {
                Some(t) if t == "checkbox" => Self::Checkbox,
                Some(t) if t == "button" || t == "submit" || t == "reset" => Self::Other,
                _ => Self::TextField,
            },
            _ => Self::Other,
        }
    }
}

/// Handle to one focusable element.
///
/// Handles are compared by identity; two handles are equal when they point at
/// the same element.
pub trait FocusTarget: Clone + PartialEq {
    fn rect(&self) -> Rect;
    fn kind(&self) -> ElementKind;
    fn focus(&self);
    fn blur(&self);
    /// Bring the element to the middle of the viewport.
    fn scroll_into_view(&self);
    fn click(&self);
    /// Flip a checkbox and notify listeners with a bubbling `change` event.
    fn toggle_checked(&self);
}

/// Source of the focus graph.
///
/// Implementations recompute on every call; layout may change in between.
pub trait FocusSampler {
    type Target: FocusTarget;

    /// Visible focusable elements in document order.
    fn enumerate_focusable(&self) -> Vec<Self::Target>;

    /// The element that currently holds focus, if any.
    fn active(&self) -> Option<Self::Target>;

    fn search_input(&self) -> Option<Self::Target> {
        None
    }

    fn close_control(&self) -> Option<Self::Target> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(ElementKind::from_tag("BUTTON", None), ElementKind::Button);
        assert_eq!(ElementKind::from_tag("A", None), ElementKind::Link);
        assert_eq!(
            ElementKind::from_tag("INPUT", Some("Checkbox")),
            ElementKind::Checkbox
        );
        assert_eq!(ElementKind::from_tag("input", None), ElementKind::TextField);
        assert_eq!(ElementKind::from_tag("input", Some("submit")), ElementKind::Other);
        assert_eq!(ElementKind::from_tag("select", None), ElementKind::Other);
    }
}
