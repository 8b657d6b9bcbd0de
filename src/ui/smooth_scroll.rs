//! Scroll-position smoothing with exponential ease-out.
//!
//! The page snaps section by section.  Rather than jumping, the visible
//! offset chases the snap target: each tick it closes a fixed fraction of the
//! remaining distance, so motion starts fast and visibly decelerates.

/// Scroll offset animator (units are terminal rows).
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    /// Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Move immediately, without animation.
    pub fn jump_to(&mut self, position: f64) {
        if position.is_finite() {
            self.position = position;
            self.target = position;
        }
    }

    /// Advance one frame and return the new position.
    pub fn tick(&mut self) -> f64 {
        let remaining = self.target - self.position;
        self.position += remaining * self.speed;
        if (self.target - self.position).abs() < 0.4 {
            self.position = self.target;
        }
        self.position
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True until the position has reached its target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
