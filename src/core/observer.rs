//! Viewport intersection observation over the page's scroll container.
//!
//! [`ScrollRoot`] owns the scroll geometry: the viewport height, the current
//! scroll offset and one rectangle per section.  Observers register a target
//! section and a list of visibility thresholds; every geometry change reports
//! an [`IntersectionEntry`] for each observer whose threshold bucket changed.
//!
//! Registration hands back an [`Observation`] guard.  Dropping the guard
//! unregisters the observer, so a component that goes away can never leave a
//! callback behind.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::section::{Section, SectionId};

/// Identifies one registered observer; entries carry it back to their owner.
pub type ObserverId = u64;

/// One visibility report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub observer: ObserverId,
    pub target: SectionId,
    /// Fraction of the target's area inside the viewport, in `[0, 1]`.
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Vertical extent of a section in page coordinates (rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRect {
    pub top: f64,
    pub height: f64,
}

impl TargetRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// `count + 1` evenly spaced thresholds from 0 to 1 inclusive.
pub fn threshold_steps(count: usize) -> Vec<f64> {
    let count = count.max(1);
    (0..=count).map(|i| i as f64 / count as f64).collect()
}

struct Registration {
    id: ObserverId,
    target: SectionId,
    thresholds: Vec<f64>,
    /// `(bucket, intersecting)` last reported; `None` until the first report.
    last: Option<(usize, bool)>,
}

type Registry = Rc<RefCell<Vec<Registration>>>;

/// Scoped observer registration.  Unregisters on drop.
#[must_use = "dropping an Observation stops the observation immediately"]
pub struct Observation {
    id: ObserverId,
    target: SectionId,
    registry: Weak<RefCell<Vec<Registration>>>,
}

impl Observation {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn target(&self) -> SectionId {
        self.target
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().retain(|r| r.id != self.id);
        }
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("id", &self.id)
            .field("target", &self.target)
            .finish()
    }
}

/// The page's scrolling container.
pub struct ScrollRoot {
    viewport_height: f64,
    offset: f64,
    rects: Vec<(SectionId, TargetRect)>,
    registry: Registry,
    next_id: ObserverId,
}

impl ScrollRoot {
    /// A root whose sections are stacked one viewport tall each.
    pub fn new(viewport_height: f64) -> Self {
        let viewport_height = sanitize_height(viewport_height);
        Self::with_layout(viewport_height, stack_layout(viewport_height))
    }

    /// A root with an explicit section layout.
    pub fn with_layout(viewport_height: f64, rects: Vec<(SectionId, TargetRect)>) -> Self {
        Self {
            viewport_height: sanitize_height(viewport_height),
            offset: 0.0,
            rects,
            registry: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
        }
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f64 {
        let content = self
            .rects
            .iter()
            .map(|(_, r)| r.bottom())
            .fold(0.0_f64, f64::max);
        (content - self.viewport_height).max(0.0)
    }

    pub fn rect(&self, target: SectionId) -> Option<TargetRect> {
        self.rects
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, r)| *r)
    }

    /// Scroll offset that puts `target`'s top edge at the top of the viewport.
    pub fn snap_offset(&self, target: SectionId) -> Option<f64> {
        self.rect(target).map(|r| r.top.clamp(0.0, self.max_offset()))
    }

    /// Number of observers still registered.
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Start observing `target`.  The first [`poll`](Self::poll) after
    /// registration always reports the target's current state.
    pub fn observe(&mut self, target: SectionId, thresholds: &[f64]) -> Observation {
        let id = self.next_id;
        self.next_id += 1;

        let mut thresholds: Vec<f64> = thresholds
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }

        self.registry.borrow_mut().push(Registration {
            id,
            target,
            thresholds,
            last: None,
        });

        Observation {
            id,
            target,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Visible fraction of `target` at the current offset.
    #[cfg(test)]
    pub fn ratio(&self, target: SectionId) -> f64 {
        self.rect(target)
            .map(|r| self.visible_fraction(r).0)
            .unwrap_or(0.0)
    }

    /// Move the viewport and report the resulting threshold crossings.
    pub fn scroll_to(&mut self, offset: f64) -> Vec<IntersectionEntry> {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.offset = offset.clamp(0.0, self.max_offset());
        self.poll()
    }

    /// Re-lay out the stacked sections for a new viewport height, keeping the
    /// same relative scroll position.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> Vec<IntersectionEntry> {
        let viewport_height = sanitize_height(viewport_height);
        let scale = viewport_height / self.viewport_height;
        self.viewport_height = viewport_height;
        self.rects = stack_layout(viewport_height);
        self.offset = (self.offset * scale).clamp(0.0, self.max_offset());
        self.poll()
    }

    /// Report every observer whose `(bucket, intersecting)` state changed
    /// since its last report.  Entries come out in registration order.
    pub fn poll(&mut self) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        let mut registry = self.registry.borrow_mut();
        for reg in registry.iter_mut() {
            let Some(rect) = self.rect(reg.target) else {
                continue;
            };
            if rect.height <= 0.0 {
                continue;
            }
            let (ratio, is_intersecting) = self.visible_fraction(rect);
            let bucket = if is_intersecting {
                reg.thresholds.iter().filter(|t| ratio >= **t).count()
            } else {
                0
            };
            let state = (bucket, is_intersecting);
            if reg.last == Some(state) {
                continue;
            }
            reg.last = Some(state);
            entries.push(IntersectionEntry {
                observer: reg.id,
                target: reg.target,
                ratio,
                is_intersecting,
            });
        }
        entries
    }

    fn visible_fraction(&self, rect: TargetRect) -> (f64, bool) {
        if rect.height <= 0.0 {
            return (0.0, false);
        }
        let view_top = self.offset;
        let view_bottom = self.offset + self.viewport_height;
        let overlap = rect.bottom().min(view_bottom) - rect.top.max(view_top);
        if overlap <= 0.0 {
            return (0.0, false);
        }
        ((overlap / rect.height).clamp(0.0, 1.0), true)
    }
}

fn sanitize_height(h: f64) -> f64 {
    if h.is_finite() && h >= 1.0 {
        h
    } else {
        1.0
    }
}

/// Sections stacked top to bottom, each exactly one viewport tall.
fn stack_layout(viewport_height: f64) -> Vec<(SectionId, TargetRect)> {
    Section::all()
        .into_iter()
        .map(|s| {
            (
                s.id,
                TargetRect {
                    top: s.order as f64 * viewport_height,
                    height: viewport_height,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_reports_every_observer_once() {
        let mut root = ScrollRoot::new(20.0);
        let _cover = root.observe(SectionId::Cover, &[0.1]);
        let _about = root.observe(SectionId::About, &[0.1]);

        let entries = root.poll();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].target, SectionId::Cover);
        assert_eq!(entries[0].ratio, 1.0);
        assert!(entries[0].is_intersecting);
        assert_eq!(entries[1].target, SectionId::About);
        assert!(!entries[1].is_intersecting);

        assert!(root.poll().is_empty());
    }

    #[test]
    fn entries_fire_only_on_bucket_changes() {
        let mut root = ScrollRoot::new(20.0);
        let _about = root.observe(SectionId::About, &[0.1]);
        root.poll();

        // 1 row of About visible: intersecting, but below the threshold.
        let entries = root.scroll_to(1.0);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!((entries[0].ratio - 0.05).abs() < 1e-9);

        // Still in the same bucket.
        assert!(root.scroll_to(1.5).is_empty());

        // Crosses 0.1.
        let entries = root.scroll_to(3.0);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].ratio - 0.15).abs() < 1e-9);
    }

    #[test]
    fn dropping_the_guard_unregisters() {
        let mut root = ScrollRoot::new(10.0);
        let obs = root.observe(SectionId::Works, &threshold_steps(20));
        assert_eq!(root.observer_count(), 1);
        drop(obs);
        assert_eq!(root.observer_count(), 0);
        assert!(root.scroll_to(15.0).is_empty());
    }

    #[test]
    fn scroll_offset_is_clamped() {
        let mut root = ScrollRoot::new(10.0);
        root.scroll_to(-5.0);
        assert_eq!(root.offset(), 0.0);
        root.scroll_to(1_000.0);
        assert_eq!(root.offset(), 40.0);
        root.scroll_to(f64::NAN);
        assert_eq!(root.offset(), 0.0);
    }

    #[test]
    fn zero_height_targets_are_inert() {
        let mut root = ScrollRoot::with_layout(
            10.0,
            vec![(
                SectionId::Works,
                TargetRect {
                    top: 0.0,
                    height: 0.0,
                },
            )],
        );
        let _obs = root.observe(SectionId::Works, &[0.0, 0.5]);
        assert!(root.poll().is_empty());
        assert_eq!(root.ratio(SectionId::Works), 0.0);
    }

    #[test]
    fn absent_targets_are_inert() {
        let mut root = ScrollRoot::with_layout(10.0, Vec::new());
        let _obs = root.observe(SectionId::Members, &[0.5]);
        assert!(root.poll().is_empty());
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut root = ScrollRoot::new(10.0);
        root.scroll_to(20.0);
        root.set_viewport_height(30.0);
        assert_eq!(root.offset(), 60.0);
        assert_eq!(root.snap_offset(SectionId::Works), Some(60.0));
    }

    #[test]
    fn threshold_steps_are_inclusive() {
        let t = threshold_steps(20);
        assert_eq!(t.len(), 21);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[20], 1.0);
    }
}
