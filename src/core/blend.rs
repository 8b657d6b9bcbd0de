//! Intersection blend engine: continuous `[0, 1]` coefficients derived from
//! a section's visibility, used for gradual colour and shape transitions.

use super::observer::{threshold_steps, IntersectionEntry, Observation, ScrollRoot};
use super::section::SectionId;

pub fn clamp01(n: f64) -> f64 {
    if n.is_finite() {
        n.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `clamp01((raw - deadzone) / spread)`.
///
/// The deadzone keeps the boundary line itself from jittering; the spread
/// finishes the blend well before the section is fully visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendCurve {
    pub deadzone: f64,
    pub spread: f64,
}

impl Default for BlendCurve {
    fn default() -> Self {
        Self {
            deadzone: 0.03,
            spread: 0.55,
        }
    }
}

impl BlendCurve {
    pub fn apply(&self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return 0.0;
        }
        if self.spread <= 0.0 || !self.spread.is_finite() {
            return if raw > self.deadzone { 1.0 } else { 0.0 };
        }
        if raw <= self.deadzone {
            return 0.0;
        }
        if raw >= self.deadzone + self.spread {
            return 1.0;
        }
        clamp01((raw - self.deadzone) / self.spread)
    }
}

/// Maps visibility to a corner radius that collapses from fully rounded to
/// square as the target scrolls in.  Ratios past `cap` are treated as `cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusCollapse {
    pub max_radius: u32,
    pub cap: f64,
}

impl Default for RadiusCollapse {
    fn default() -> Self {
        Self {
            max_radius: 9999,
            cap: 0.8,
        }
    }
}

impl RadiusCollapse {
    pub fn radius(&self, raw: f64) -> u32 {
        if !(self.cap > 0.0) {
            return 0;
        }
        let ratio = clamp01(raw).min(self.cap);
        (self.max_radius as f64 * (1.0 - ratio / self.cap)).round() as u32
    }

    /// Radius as a fraction of `max_radius`.
    pub fn fraction(&self, radius: u32) -> f64 {
        if self.max_radius == 0 {
            return 0.0;
        }
        clamp01(radius as f64 / self.max_radius as f64)
    }
}

/// A blend coefficient that follows one section's visibility.
pub struct BlendChannel {
    curve: BlendCurve,
    value: f64,
    observation: Observation,
}

impl BlendChannel {
    /// Observe `target` with 21 evenly spaced thresholds.
    pub fn observe(root: &mut ScrollRoot, target: SectionId, curve: BlendCurve) -> Self {
        let observation = root.observe(target, &threshold_steps(20));
        Self {
            curve,
            value: 0.0,
            observation,
        }
    }

    pub fn target(&self) -> SectionId {
        self.observation.target()
    }

    /// Current blend, read by consumers as-is.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Update from an entry; returns `true` when the entry belonged here.
    pub fn on_entry(&mut self, entry: &IntersectionEntry) -> bool {
        if entry.observer != self.observation.id() {
            return false;
        }
        self.value = self.curve.apply(entry.ratio);
        true
    }
}

/// Corner radius that follows the contact section's visibility.
pub struct RadiusChannel {
    collapse: RadiusCollapse,
    radius: u32,
    observation: Observation,
}

impl RadiusChannel {
    /// Observe `target` at 0.0, 0.1, … 0.8.
    pub fn observe(root: &mut ScrollRoot, target: SectionId, collapse: RadiusCollapse) -> Self {
        let thresholds: Vec<f64> = (0..9).map(|i| i as f64 * 0.1).collect();
        let observation = root.observe(target, &thresholds);
        Self {
            collapse,
            radius: collapse.max_radius,
            observation,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// `1.0` fully rounded, `0.0` square.
    pub fn fraction(&self) -> f64 {
        self.collapse.fraction(self.radius)
    }

    pub fn on_entry(&mut self, entry: &IntersectionEntry) -> bool {
        if entry.observer != self.observation.id() {
            return false;
        }
        self.radius = self.collapse.radius(entry.ratio);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_zero_inside_the_deadzone() {
        let c = BlendCurve::default();
        assert_eq!(c.apply(0.0), 0.0);
        assert_eq!(c.apply(0.03), 0.0);
        assert_eq!(c.apply(-1.0), 0.0);
    }

    #[test]
    fn curve_saturates_after_the_spread() {
        let c = BlendCurve::default();
        assert_eq!(c.apply(c.deadzone + c.spread), 1.0);
        assert_eq!(c.apply(0.6), 1.0);
        assert_eq!(c.apply(0.9), 1.0);
        assert_eq!(c.apply(1.0), 1.0);
        assert_eq!(c.apply(7.0), 1.0);
    }

    #[test]
    fn curve_is_monotonic_and_bounded() {
        let c = BlendCurve::default();
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = c.apply(i as f64 / 1000.0);
            assert!((0.0..=1.0).contains(&v));
            assert!(v >= prev, "not monotonic at step {i}");
            prev = v;
        }
    }

    #[test]
    fn curve_midpoint() {
        let c = BlendCurve::default();
        assert!((c.apply(0.305) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_spread_is_a_step() {
        let c = BlendCurve {
            deadzone: 0.2,
            spread: 0.0,
        };
        assert_eq!(c.apply(0.1), 0.0);
        assert_eq!(c.apply(0.3), 1.0);
        assert_eq!(c.apply(f64::NAN), 0.0);
    }

    #[test]
    fn radius_collapses_to_square_at_the_cap() {
        let r = RadiusCollapse::default();
        assert_eq!(r.radius(0.0), 9999);
        assert_eq!(r.radius(0.4), 5000);
        assert_eq!(r.radius(0.8), 0);
        assert_eq!(r.radius(1.0), 0);

        let mut prev = u32::MAX;
        for i in 0..=100 {
            let v = r.radius(i as f64 / 100.0);
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn channels_follow_their_section() {
        let mut root = ScrollRoot::new(20.0);
        let mut works = BlendChannel::observe(&mut root, SectionId::Works, BlendCurve::default());
        let mut contact =
            RadiusChannel::observe(&mut root, SectionId::Contact, RadiusCollapse::default());
        assert_eq!(contact.radius(), 9999);

        for e in root.scroll_to(40.0) {
            works.on_entry(&e);
            contact.on_entry(&e);
        }
        assert_eq!(works.value(), 1.0);

        for e in root.scroll_to(30.0) {
            works.on_entry(&e);
            contact.on_entry(&e);
        }
        assert!((works.value() - (0.5 - 0.03) / 0.55).abs() < 1e-9);

        for e in root.scroll_to(80.0) {
            works.on_entry(&e);
            contact.on_entry(&e);
        }
        assert_eq!(works.value(), 0.0);
        assert_eq!(contact.radius(), 0);
        assert_eq!(contact.fraction(), 0.0);
    }
}
