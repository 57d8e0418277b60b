//! Inertial scroll model driven once per animation frame.

pub const WHEEL_GAIN: f64 = 1.2;
pub const TOUCH_GAIN: f64 = 2.5;
const FRAMES_PER_SECOND: f64 = 60.0;
const SETTLE_DISTANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollPhysics {
    target: f64,
    current: f64,
    max_scroll: f64,
    smooth: f64,
    animating: bool,
    touch_y: Option<f64>,
}

impl Default for ScrollPhysics {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ScrollPhysics {
    /// `smooth` is roughly the seconds a jump takes to settle; non-positive
    /// values fall back to 1.
    pub fn new(smooth: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            max_scroll: 0.0,
            smooth: if smooth.is_finite() && smooth > 0.0 {
                smooth
            } else {
                1.0
            },
            animating: false,
            touch_y: None,
        }
    }

    pub fn set_max_scroll(&mut self, max: f64) {
        self.max_scroll = max.max(0.0);
        self.target = self.clamp(self.target);
        self.current = self.clamp(self.current);
    }

    fn clamp(&self, v: f64) -> f64 {
        v.clamp(0.0, self.max_scroll)
    }

    /// Returns true when a new animation loop must be started.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        self.push(delta_y * WHEEL_GAIN)
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_y = Some(y);
    }

    /// Returns true when a new animation loop must be started.
    pub fn touch_move(&mut self, y: f64) -> bool {
        let Some(start) = self.touch_y else {
            return false;
        };
        self.touch_y = Some(y);
        self.push((start - y) * TOUCH_GAIN)
    }

    pub fn touch_end(&mut self) {
        self.touch_y = None;
    }

    pub fn scroll_to(&mut self, position: f64) -> bool {
        self.target = self.clamp(position);
        self.start()
    }

    fn push(&mut self, delta: f64) -> bool {
        self.target = self.clamp(self.target + delta);
        self.start()
    }

    fn start(&mut self) -> bool {
        if self.animating {
            false
        } else {
            self.animating = true;
            true
        }
    }

    /// Advance one frame. Returns whether another frame is needed.
    pub fn step(&mut self) -> bool {
        let diff = self.target - self.current;
        self.current += diff / (self.smooth * FRAMES_PER_SECOND);
        if diff.abs() > SETTLE_DISTANCE {
            true
        } else {
            self.current = self.target;
            self.animating = false;
            false
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Fraction of the scrollable range the target sits at, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.max_scroll > 0.0 {
            self.target / self.max_scroll
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(p: &mut ScrollPhysics) -> usize {
        let mut frames = 0;
        while p.step() {
            frames += 1;
            assert!(frames < 10_000, "did not converge");
        }
        frames
    }

    #[test]
    fn test_wheel_is_amplified_and_clamped() {
        let mut p = ScrollPhysics::default();
        p.set_max_scroll(500.0);
        assert!(p.wheel(100.0));
        assert_eq!(p.target(), 120.0);
        // Already animating: no second loop.
        assert!(!p.wheel(1000.0));
        assert_eq!(p.target(), 500.0);
        p.wheel(-10_000.0);
        assert_eq!(p.target(), 0.0);
    }

    #[test]
    fn test_first_frame_moves_one_sixtieth() {
        let mut p = ScrollPhysics::default();
        p.set_max_scroll(1000.0);
        p.scroll_to(600.0);
        assert!(p.step());
        assert!((p.scroll_top() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_converges_and_snaps() {
        let mut p = ScrollPhysics::new(0.5);
        p.set_max_scroll(1000.0);
        p.scroll_to(400.0);
        settle(&mut p);
        assert_eq!(p.scroll_top(), 400.0);
        assert!(!p.is_animating());
        assert_eq!(p.progress(), 0.4);
    }

    #[test]
    fn test_touch_drag_moves_opposite_to_finger() {
        let mut p = ScrollPhysics::default();
        p.set_max_scroll(1000.0);
        assert!(!p.touch_move(100.0));
        p.touch_start(300.0);
        assert!(p.touch_move(260.0));
        assert_eq!(p.target(), 100.0);
        p.touch_move(250.0);
        assert_eq!(p.target(), 125.0);
        p.touch_end();
        assert!(!p.touch_move(0.0));
    }

    #[test]
    fn test_nothing_to_scroll() {
        let mut p = ScrollPhysics::new(-2.0);
        p.wheel(300.0);
        assert_eq!(p.target(), 0.0);
        assert_eq!(p.progress(), 0.0);
        assert_eq!(settle(&mut p), 0);
    }

    #[test]
    fn test_shrinking_content_clamps_position() {
        let mut p = ScrollPhysics::default();
        p.set_max_scroll(1000.0);
        p.scroll_to(900.0);
        settle(&mut p);
        p.set_max_scroll(200.0);
        assert_eq!(p.scroll_top(), 200.0);
        assert_eq!(p.target(), 200.0);
    }
}
