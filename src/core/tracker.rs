//! Section tracker: the single source of truth for which section is on
//! screen.
//!
//! Every section is observed with one visibility threshold.  A section takes
//! over as soon as its visible fraction crosses the threshold *while
//! increasing*; the last crossing delivered wins.  Leaving sections never
//! steal the active slot back, which keeps the value stable when the
//! observation stream is noisy near a boundary.

use std::collections::HashMap;

use super::observer::{IntersectionEntry, Observation, ObserverId, ScrollRoot};
use super::section::SectionId;

/// A change of the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChange {
    pub from: SectionId,
    pub to: SectionId,
}

pub struct SectionTracker {
    active: SectionId,
    threshold: f64,
    observations: Vec<Observation>,
    /// Last sampled ratio per section, used to detect increasing crossings.
    last_ratio: HashMap<SectionId, f64>,
}

impl SectionTracker {
    /// Register every section of `root` with `threshold` and start tracking.
    /// The page starts on [`SectionId::Cover`].
    pub fn observe(root: &mut ScrollRoot, threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.01, 1.0)
        } else {
            0.1
        };
        let observations = SectionId::ALL
            .iter()
            .map(|&id| root.observe(id, &[threshold]))
            .collect();
        Self {
            active: SectionId::Cover,
            threshold,
            observations,
            last_ratio: HashMap::new(),
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Whether `observer` is one of this tracker's registrations.
    pub fn owns(&self, observer: ObserverId) -> bool {
        self.observations.iter().any(|o| o.id() == observer)
    }

    #[cfg(test)]
    pub fn is_observing(&self) -> bool {
        !self.observations.is_empty()
    }

    /// Feed one intersection entry.  Returns the transition, if any.
    pub fn on_entry(&mut self, entry: &IntersectionEntry) -> Option<SectionChange> {
        if !self.owns(entry.observer) {
            return None;
        }
        let previous = self
            .last_ratio
            .insert(entry.target, entry.ratio)
            .unwrap_or(0.0);

        let crossed_in = entry.is_intersecting
            && entry.ratio >= self.threshold
            && entry.ratio > previous;
        if !crossed_in || entry.target == self.active {
            return None;
        }

        let change = SectionChange {
            from: self.active,
            to: entry.target,
        };
        self.active = entry.target;
        tracing::debug!(from = %change.from, to = %change.to, ratio = entry.ratio, "active section changed");
        Some(change)
    }

    /// Stop observing every section.  The active value is kept.
    pub fn disconnect(&mut self) {
        self.observations.clear();
        self.last_ratio.clear();
    }
}
