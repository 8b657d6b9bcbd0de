//! The page orchestrator.
//!
//! Owns the scroll root and every component observing it, and is the only
//! place where their outputs meet:
//!
//! * intersection entries are routed to the blend channels, the radius
//!   channel and the section tracker;
//! * section changes engage or release the About pager and start or abandon
//!   entrance sequences;
//! * wheel input goes to the pager first and only reaches the outer scroll
//!   when the pager does not consume it;
//! * the outer scroll snaps section by section through [`SmoothScroll`].

use std::time::{Duration, Instant};

use crate::app::sequence_runtime::{GenerationSlot, StageDone};
use crate::config::Tuning;
use crate::core::blend::{BlendChannel, RadiusChannel};
use crate::core::content::Topic;
use crate::core::observer::{IntersectionEntry, ScrollRoot};
use crate::core::pager::{PagerMode, PagerState, ScrollDirection, SubPager, WheelOutcome};
use crate::core::section::SectionId;
use crate::core::sequence::{EntranceSequencer, Generation, Stage, StagePose, StageSpec};
use crate::core::tracker::{SectionChange, SectionTracker};
use crate::core::works::{WorkEntry, WorksListing};
use crate::ui::smooth_scroll::SmoothScroll;

/// Fraction of the remaining scroll distance covered per frame.
const SCROLL_SPEED: f64 = 0.35;

/// A sequence run whose stage timers still have to be started.
#[derive(Debug, Clone)]
pub struct SequenceRequest {
    pub section: SectionId,
    pub generation: Generation,
    pub durations: Vec<Duration>,
    pub slot: GenerationSlot,
}

/// What a wheel event ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelEffect {
    /// Dropped (noise, or a snap already in flight).
    None,
    /// Handled by the About pager.
    Pager(WheelOutcome),
    /// The outer scroll started moving toward a section.
    Scrolled(SectionId),
}

struct Entrance {
    section: SectionId,
    sequencer: EntranceSequencer,
    slot: GenerationSlot,
}

impl Entrance {
    fn new(section: SectionId, stages: Vec<StageSpec>) -> Self {
        Self {
            section,
            sequencer: EntranceSequencer::new(stages),
            slot: GenerationSlot::default(),
        }
    }

    fn begin(&mut self, now: Instant) -> SequenceRequest {
        let generation = self.sequencer.begin(now);
        self.slot.publish(generation);
        SequenceRequest {
            section: self.section,
            generation,
            durations: self.sequencer.stages().iter().map(|s| s.duration).collect(),
            slot: self.slot.clone(),
        }
    }

    fn abandon(&mut self, now: Instant) {
        self.sequencer.abandon(now);
        self.slot.publish(self.sequencer.generation());
    }
}

pub struct Page {
    root: ScrollRoot,
    tracker: SectionTracker,
    works_blend: BlendChannel,
    members_blend: BlendChannel,
    contact_radius: RadiusChannel,
    pager: SubPager,
    about: Entrance,
    works_entrance: Entrance,
    works: WorksListing,
    scroll: SmoothScroll,
    noise_floor: f64,
    requests: Vec<SequenceRequest>,
}

impl Page {
    pub fn new(
        viewport_height: f64,
        topics: Vec<Topic>,
        works: &[WorkEntry],
        mode: PagerMode,
        tuning: &Tuning,
        now: Instant,
    ) -> Self {
        let mut root = ScrollRoot::new(viewport_height);
        let tracker = SectionTracker::observe(&mut root, tuning.section_threshold);
        let works_blend = BlendChannel::observe(&mut root, SectionId::Works, tuning.blend_curve());
        let members_blend =
            BlendChannel::observe(&mut root, SectionId::Members, tuning.blend_curve());
        let contact_radius =
            RadiusChannel::observe(&mut root, SectionId::Contact, tuning.radius_collapse());

        let mut page = Self {
            root,
            tracker,
            works_blend,
            members_blend,
            contact_radius,
            pager: SubPager::new(topics, mode, tuning.pager_timing()),
            about: Entrance::new(SectionId::About, StageSpec::about()),
            works_entrance: Entrance::new(SectionId::Works, StageSpec::works()),
            works: WorksListing::new(works),
            scroll: SmoothScroll::new(SCROLL_SPEED),
            noise_floor: tuning.noise_floor,
            requests: Vec::new(),
        };
        let initial = page.root.poll();
        page.route(initial, now);
        page
    }

    // ── read access ─────────────────────────────────────────────

    pub fn active(&self) -> SectionId {
        self.tracker.active()
    }

    pub fn offset(&self) -> f64 {
        self.root.offset()
    }

    pub fn viewport_height(&self) -> f64 {
        self.root.viewport_height()
    }

    pub fn works_blend(&self) -> f64 {
        self.works_blend.value()
    }

    pub fn members_blend(&self) -> f64 {
        self.members_blend.value()
    }

    /// `1.0` fully rounded, `0.0` square.
    pub fn contact_roundness(&self) -> f64 {
        self.contact_radius.fraction()
    }

    pub fn contact_radius(&self) -> u32 {
        self.contact_radius.radius()
    }

    pub fn pager(&self) -> &SubPager {
        &self.pager
    }

    pub fn works(&self) -> &WorksListing {
        &self.works
    }

    pub fn about_pose(&self, stage: Stage, now: Instant) -> StagePose {
        self.about.sequencer.pose_of(stage, now)
    }

    pub fn works_pose(&self, stage: Stage, now: Instant) -> StagePose {
        self.works_entrance.sequencer.pose_of(stage, now)
    }

    /// Whether the next frame will differ from the current one without input.
    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
            || self.about.sequencer.is_animating()
            || self.works_entrance.sequencer.is_animating()
    }

    /// Sequence runs started since the last call.
    pub fn take_requests(&mut self) -> Vec<SequenceRequest> {
        std::mem::take(&mut self.requests)
    }

    // ── input ───────────────────────────────────────────────────

    /// One wheel event (mouse notch or scroll key).
    pub fn on_wheel(&mut self, delta_y: f64, now: Instant) -> WheelEffect {
        if self.tracker.active() == SectionId::About {
            let was_released = self.pager.state() == PagerState::Released;
            let outcome = self.pager.on_wheel(delta_y, now);
            if outcome.consumed() {
                if let WheelOutcome::Stepped { .. } = outcome {
                    self.replay_about(now);
                }
                return WheelEffect::Pager(outcome);
            }
            // A fresh release only stands if the outer scroll can move now.
            if outcome == WheelOutcome::Released && !was_released && self.scroll.is_animating() {
                self.pager.hold_boundary();
                return WheelEffect::None;
            }
        }
        if !delta_y.is_finite() || delta_y.abs() < self.noise_floor {
            return WheelEffect::None;
        }
        // One section per gesture: input during a snap is dropped.
        if self.scroll.is_animating() {
            return WheelEffect::None;
        }
        let current = self.snap_section();
        let next = match ScrollDirection::of(delta_y) {
            ScrollDirection::Down => current.next(),
            ScrollDirection::Up => current.prev(),
        };
        match next {
            Some(section) => {
                self.scroll_to_section(section);
                WheelEffect::Scrolled(section)
            }
            None => WheelEffect::None,
        }
    }

    /// Start a smooth scroll to `section` (nav click, section keys).
    pub fn scroll_to_section(&mut self, section: SectionId) {
        if let Some(offset) = self.root.snap_offset(section) {
            tracing::debug!(%section, offset, "snap");
            self.scroll.set_target(offset);
        }
    }

    /// Topic list click.
    pub fn select_topic(&mut self, index: usize, now: Instant) {
        if self.pager.select(index) {
            self.replay_about(now);
        }
    }

    pub fn toggle_works_expanded(&mut self) {
        self.works.toggle_expanded();
    }

    pub fn toggle_work_row(&mut self, index: usize) {
        self.works.toggle_row(index);
    }

    /// New language: topics and works are re-derived, indices clamped.
    pub fn set_content(&mut self, topics: Vec<Topic>, works: &[WorkEntry], now: Instant) {
        self.pager.set_topics(topics);
        self.works.set_entries(works);
        if self.tracker.active() == SectionId::About {
            self.replay_about(now);
        }
    }

    pub fn on_stage_done(&mut self, done: StageDone, now: Instant) -> bool {
        let entrance = match done.section {
            SectionId::About => &mut self.about,
            SectionId::Works => &mut self.works_entrance,
            _ => return false,
        };
        entrance.sequencer.complete(done.generation, done.stage, now)
    }

    // ── time & geometry ─────────────────────────────────────────

    /// Advance the scroll animation by one frame.
    pub fn tick(&mut self, now: Instant) {
        if !self.scroll.is_animating() {
            return;
        }
        let position = self.scroll.tick();
        let entries = self.root.scroll_to(position);
        self.route(entries, now);
    }

    /// Re-lay out for a new viewport height, keeping the active section
    /// aligned to the top.
    pub fn resize(&mut self, viewport_height: f64, now: Instant) {
        let entries = self.root.set_viewport_height(viewport_height);
        self.route(entries, now);
        if let Some(offset) = self.root.snap_offset(self.tracker.active()) {
            self.scroll.jump_to(offset);
            let entries = self.root.scroll_to(offset);
            self.route(entries, now);
        }
    }

    /// Stop tracking sections.  The active section keeps its last value.
    pub fn disconnect(&mut self) {
        self.tracker.disconnect();
        tracing::debug!(remaining = self.root.observer_count(), "section tracking stopped");
    }

    // ── internals ───────────────────────────────────────────────

    /// The section the outer scroll is resting on or heading to.
    fn snap_section(&self) -> SectionId {
        let vh = self.root.viewport_height();
        let order = (self.scroll.target() / vh).round().max(0.0) as usize;
        SectionId::from_order(order).unwrap_or(SectionId::Contact)
    }

    fn route(&mut self, entries: Vec<IntersectionEntry>, now: Instant) {
        for entry in &entries {
            if self.works_blend.on_entry(entry)
                || self.members_blend.on_entry(entry)
                || self.contact_radius.on_entry(entry)
            {
                continue;
            }
            if let Some(change) = self.tracker.on_entry(entry) {
                self.on_section_change(change, now);
            }
        }
    }

    fn on_section_change(&mut self, change: SectionChange, now: Instant) {
        tracing::info!(from = %change.from, to = %change.to, "section");
        match change.from {
            SectionId::About => {
                self.pager.deactivate();
                self.about.abandon(now);
            }
            SectionId::Works => self.works_entrance.abandon(now),
            _ => {}
        }
        match change.to {
            SectionId::About => {
                self.pager.activate(now);
                self.replay_about(now);
            }
            SectionId::Works => {
                let request = self.works_entrance.begin(now);
                self.requests.push(request);
            }
            _ => {}
        }
    }

    fn replay_about(&mut self, now: Instant) {
        let request = self.about.begin(now);
        self.requests.push(request);
    }
}
