/// Viewport-relative bounding box of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Zero-area boxes are not rendered and cannot take focus.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn is_below(&self, other: &Rect) -> bool {
        self.top > other.bottom()
    }

    pub fn is_above(&self, other: &Rect) -> bool {
        self.bottom() < other.top
    }

    pub fn is_right_of(&self, other: &Rect) -> bool {
        self.left > other.right()
    }

    pub fn is_left_of(&self, other: &Rect) -> bool {
        self.right() < other.left
    }

    /// Same column: left edges closer than `factor` widths of `other`.
    pub fn shares_column(&self, other: &Rect, factor: f64) -> bool {
        (self.left - other.left).abs() < other.width * factor
    }

    /// Same row: top edges closer than `factor` heights of `other`.
    pub fn shares_row(&self, other: &Rect, factor: f64) -> bool {
        (self.top - other.top).abs() < other.height * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.right(), 50.0);
        assert!(r.has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).has_area());
    }

    #[test]
    fn test_touching_edges_are_not_strictly_below() {
        let a = Rect::new(0.0, 0.0, 50.0, 30.0);
        let touching = Rect::new(30.0, 0.0, 50.0, 30.0);
        let gap = Rect::new(31.0, 0.0, 50.0, 30.0);
        assert!(!touching.is_below(&a));
        assert!(gap.is_below(&a));
        assert!(a.is_above(&gap));
    }

    #[test]
    fn test_column_tolerance_scales_with_factor() {
        let current = Rect::new(0.0, 100.0, 50.0, 30.0);
        let offset = Rect::new(60.0, 140.0, 50.0, 30.0);
        assert!(offset.shares_column(&current, 1.0));
        assert!(!offset.shares_column(&current, 0.5));
    }
}
