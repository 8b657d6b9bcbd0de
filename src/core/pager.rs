//! Sub-pager with scroll capture.  Pages through the About topics with the
//! wheel and hands scroll control back to the page at either end.
//!
//! ```text
//!   Idle ──activate──▶ Paging ──first outward event at an end──▶ BoundaryPending
//!                        ▲                                          │
//!                        └──────────── inward event ◀───────────────┤
//!                                                                   │ second outward
//!   Idle ◀──deactivate── Released ◀─── event inside the window ─────┘
//! ```
//!
//! While the pager owns the wheel every qualifying event is consumed.  One
//! topic step is taken per event, and after a step further events are dropped
//! until the cool-down expires.  Leaving requires a deliberate second gesture
//! at the boundary, so scrolling to the last topic never spills into the next
//! section by accident.

use std::time::{Duration, Instant};

use super::content::Topic;

/// Lifecycle of the pager relative to its owning section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerState {
    /// Outer scroll active; the section is not on screen.
    #[default]
    Idle,
    /// The pager owns the wheel.
    Paging,
    /// Sitting at the first/last topic after an absorbed outward event.
    BoundaryPending,
    /// Control handed back to the outer scroll.
    Released,
}

/// Boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerMode {
    /// A boundary must be confirmed by a second outward event.
    #[default]
    Sticky,
    /// Steps clamp to the ends and a boundary event releases immediately.
    Clamp,
}

impl PagerMode {
    pub fn label(self) -> &'static str {
        match self {
            PagerMode::Sticky => "sticky",
            PagerMode::Clamp => "clamp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sticky" => Some(PagerMode::Sticky),
            "clamp" | "simple" => Some(PagerMode::Clamp),
            _ => None,
        }
    }
}

/// Feel-tuning constants for wheel handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerTiming {
    /// Wheel deltas below this magnitude are noise.
    pub noise_floor: f64,
    /// Minimum spacing between two topic steps.
    pub cooldown: Duration,
    /// A second outward boundary event inside this window releases.
    pub exit_window: Duration,
    /// Wheel input is swallowed for this long after the section activates.
    pub entry_grace: Duration,
}

impl Default for PagerTiming {
    fn default() -> Self {
        Self {
            noise_floor: 6.0,
            cooldown: Duration::from_millis(650),
            exit_window: Duration::from_millis(900),
            entry_grace: Duration::from_millis(400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn of(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }
}

/// What happened to one wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not consumed and not acted on.
    Ignored,
    /// Consumed without changing the topic.
    Consumed,
    /// Consumed; the active topic moved.
    Stepped { from: usize, to: usize },
    /// Not consumed; the outer scroll should move to the adjacent section.
    Released,
}

impl WheelOutcome {
    /// Whether the outer scroll must not see this event.
    pub fn consumed(self) -> bool {
        matches!(self, WheelOutcome::Consumed | WheelOutcome::Stepped { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExitIntent {
    direction: ScrollDirection,
    at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LockKind {
    #[default]
    Cooldown,
    Grace,
}

/// Wheel lock owned by the pager.
#[derive(Debug, Clone, Copy, Default)]
struct ScrollLock {
    locked_until: Option<Instant>,
    kind: LockKind,
    exit_intent: Option<ExitIntent>,
}

impl ScrollLock {
    fn is_locked(&self, kind: LockKind, now: Instant) -> bool {
        self.kind == kind && self.locked_until.is_some_and(|until| now < until)
    }

    fn lock(&mut self, kind: LockKind, until: Instant) {
        self.kind = kind;
        self.locked_until = Some(until);
    }
}

pub struct SubPager {
    topics: Vec<Topic>,
    index: usize,
    state: PagerState,
    mode: PagerMode,
    timing: PagerTiming,
    lock: ScrollLock,
}

impl SubPager {
    pub fn new(topics: Vec<Topic>, mode: PagerMode, timing: PagerTiming) -> Self {
        Self {
            topics,
            index: 0,
            state: PagerState::Idle,
            mode,
            timing,
            lock: ScrollLock::default(),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn active_topic(&self) -> Option<&Topic> {
        self.topics.get(self.index)
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn mode(&self) -> PagerMode {
        self.mode
    }

    /// Replace the topic list (language switch).  The index is clamped.
    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
        self.index = self.index.min(self.topics.len().saturating_sub(1));
    }

    /// The owning section became active: restart from the first topic and
    /// hold the wheel for the entry grace period.
    pub fn activate(&mut self, now: Instant) {
        self.index = 0;
        self.state = PagerState::Paging;
        self.lock = ScrollLock::default();
        self.lock.lock(LockKind::Grace, now + self.timing.entry_grace);
        tracing::debug!(topics = self.topics.len(), "sub-pager engaged");
    }

    /// The owning section is no longer active.
    pub fn deactivate(&mut self) {
        if self.state != PagerState::Idle {
            tracing::debug!(state = ?self.state, index = self.index, "sub-pager idle");
        }
        self.state = PagerState::Idle;
        self.lock = ScrollLock::default();
    }

    /// Jump straight to `index` (topic list click).  Returns `true` when the
    /// active topic changed.
    pub fn select(&mut self, index: usize) -> bool {
        if self.topics.is_empty() {
            return false;
        }
        let index = index.min(self.topics.len() - 1);
        self.lock.exit_intent = None;
        if self.state == PagerState::BoundaryPending {
            self.state = PagerState::Paging;
        }
        let changed = index != self.index;
        self.index = index;
        changed
    }

    /// Handle one wheel event.
    pub fn on_wheel(&mut self, delta_y: f64, now: Instant) -> WheelOutcome {
        if self.state == PagerState::Idle || self.topics.is_empty() {
            return WheelOutcome::Ignored;
        }
        if !delta_y.is_finite() || delta_y.abs() < self.timing.noise_floor {
            return WheelOutcome::Ignored;
        }
        if self.state == PagerState::Released {
            return WheelOutcome::Released;
        }

        if self.lock.is_locked(LockKind::Grace, now) {
            return WheelOutcome::Consumed;
        }

        let direction = ScrollDirection::of(delta_y);
        let last = self.topics.len() - 1;
        let at_boundary = match direction {
            ScrollDirection::Up => self.index == 0,
            ScrollDirection::Down => self.index == last,
        };

        if at_boundary {
            return self.on_boundary(direction, now);
        }

        if self.lock.is_locked(LockKind::Cooldown, now) {
            return WheelOutcome::Consumed;
        }

        let from = self.index;
        self.index = match direction {
            ScrollDirection::Up => from - 1,
            ScrollDirection::Down => from + 1,
        };
        self.lock.exit_intent = None;
        self.lock.lock(LockKind::Cooldown, now + self.timing.cooldown);
        self.state = PagerState::Paging;
        tracing::debug!(from, to = self.index, "topic step");
        WheelOutcome::Stepped {
            from,
            to: self.index,
        }
    }

    fn on_boundary(&mut self, direction: ScrollDirection, now: Instant) -> WheelOutcome {
        if self.mode == PagerMode::Clamp {
            self.release(direction);
            return WheelOutcome::Released;
        }

        let confirmed = self.lock.exit_intent.is_some_and(|intent| {
            intent.direction == direction && now.duration_since(intent.at) < self.timing.exit_window
        });
        self.lock.exit_intent = Some(ExitIntent { direction, at: now });

        if !confirmed {
            self.state = PagerState::BoundaryPending;
            return WheelOutcome::Consumed;
        }

        self.release(direction);
        WheelOutcome::Released
    }

    /// The page could not act on the last release (the outer scroll was still
    /// moving).  Falls back to the boundary with the exit intent kept, so the
    /// next outward event inside the window releases again.
    pub fn hold_boundary(&mut self) {
        if self.state == PagerState::Released {
            self.state = PagerState::BoundaryPending;
            tracing::debug!(index = self.index, "release not taken, back at boundary");
        }
    }

    fn release(&mut self, direction: ScrollDirection) {
        self.state = PagerState::Released;
        self.lock.locked_until = None;
        tracing::debug!(?direction, index = self.index, "sub-pager released scroll");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(title: &str) -> Topic {
        Topic {
            title: title.to_string(),
            body: String::new(),
        }
    }

    fn three_topics() -> Vec<Topic> {
        vec![
            topic("Who We Are"),
            topic("Sectors We Serve"),
            topic("Our Methodology"),
        ]
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// An engaged pager past its entry grace period, and the time at which
    /// the grace expired.
    fn engaged(mode: PagerMode) -> (SubPager, Instant) {
        let t0 = Instant::now();
        let mut pager = SubPager::new(three_topics(), mode, PagerTiming::default());
        pager.activate(t0);
        (pager, t0 + ms(400))
    }

    #[test]
    fn idle_pager_ignores_the_wheel() {
        let mut pager = SubPager::new(three_topics(), PagerMode::Sticky, PagerTiming::default());
        assert_eq!(pager.on_wheel(100.0, Instant::now()), WheelOutcome::Ignored);
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn empty_topic_list_is_inert() {
        let mut pager = SubPager::new(Vec::new(), PagerMode::Sticky, PagerTiming::default());
        let now = Instant::now();
        pager.activate(now);
        assert_eq!(pager.on_wheel(100.0, now + ms(1000)), WheelOutcome::Ignored);
        assert!(!pager.select(3));
        assert!(pager.active_topic().is_none());
    }

    #[test]
    fn entry_grace_swallows_input() {
        let t0 = Instant::now();
        let mut pager = SubPager::new(three_topics(), PagerMode::Sticky, PagerTiming::default());
        pager.activate(t0);
        assert_eq!(pager.on_wheel(100.0, t0 + ms(100)), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(-100.0, t0 + ms(200)), WheelOutcome::Consumed);
        assert_eq!(pager.index(), 0);
        assert_eq!(pager.state(), PagerState::Paging);
        assert_eq!(
            pager.on_wheel(100.0, t0 + ms(400)),
            WheelOutcome::Stepped { from: 0, to: 1 }
        );
    }

    #[test]
    fn noise_is_neither_consumed_nor_acted_on() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        for delta in [5.9, -5.9, 0.0, 3.0, f64::NAN] {
            let outcome = pager.on_wheel(delta, t);
            assert_eq!(outcome, WheelOutcome::Ignored);
            assert!(!outcome.consumed());
        }
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn one_step_per_event_regardless_of_magnitude() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        assert_eq!(
            pager.on_wheel(10_000.0, t),
            WheelOutcome::Stepped { from: 0, to: 1 }
        );
    }

    #[test]
    fn rapid_events_step_once_per_cooldown() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        assert!(matches!(pager.on_wheel(50.0, t), WheelOutcome::Stepped { .. }));
        let second = pager.on_wheel(50.0, t + ms(200));
        assert_eq!(second, WheelOutcome::Consumed);
        assert!(second.consumed());
        assert_eq!(pager.index(), 1);

        assert_eq!(
            pager.on_wheel(50.0, t + ms(650)),
            WheelOutcome::Stepped { from: 1, to: 2 }
        );
    }

    #[test]
    fn boundary_at_first_topic_is_sticky() {
        let (mut pager, t) = engaged(PagerMode::Sticky);

        let first = pager.on_wheel(-40.0, t);
        assert_eq!(first, WheelOutcome::Consumed);
        assert_eq!(pager.index(), 0);
        assert_eq!(pager.state(), PagerState::BoundaryPending);

        let second = pager.on_wheel(-40.0, t + ms(500));
        assert_eq!(second, WheelOutcome::Released);
        assert!(!second.consumed());
        assert_eq!(pager.index(), 0);
        assert_eq!(pager.state(), PagerState::Released);
    }

    #[test]
    fn expired_exit_intent_is_absorbed_again() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        assert_eq!(pager.on_wheel(-40.0, t), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(-40.0, t + ms(900)), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(-40.0, t + ms(1200)), WheelOutcome::Released);
    }

    #[test]
    fn inward_event_leaves_the_boundary() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        assert_eq!(pager.on_wheel(-40.0, t), WheelOutcome::Consumed);
        assert_eq!(
            pager.on_wheel(40.0, t + ms(100)),
            WheelOutcome::Stepped { from: 0, to: 1 }
        );
        assert_eq!(pager.state(), PagerState::Paging);
        // The earlier upward intent no longer counts.
        assert_eq!(
            pager.on_wheel(-40.0, t + ms(800)),
            WheelOutcome::Stepped { from: 1, to: 0 }
        );
        assert_eq!(pager.on_wheel(-40.0, t + ms(1500)), WheelOutcome::Consumed);
    }

    #[test]
    fn opposite_direction_does_not_confirm_exit() {
        let t0 = Instant::now();
        let mut pager = SubPager::new(vec![topic("only")], PagerMode::Sticky, PagerTiming::default());
        pager.activate(t0);
        let t = t0 + ms(400);
        assert_eq!(pager.on_wheel(40.0, t), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(-40.0, t + ms(100)), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(-40.0, t + ms(200)), WheelOutcome::Released);
    }

    #[test]
    fn walk_through_topics_and_release_at_the_end() {
        let t0 = Instant::now();
        let mut pager = SubPager::new(three_topics(), PagerMode::Sticky, PagerTiming::default());
        pager.activate(t0);
        let titles: Vec<&str> = pager.topics().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Who We Are", "Sectors We Serve", "Our Methodology"]);

        // The first event lands inside the entry grace; the next two are
        // spaced past the cool-down.
        let mut seen = Vec::new();
        for at in [100, 500, 1200] {
            assert!(pager.on_wheel(60.0, t0 + ms(at)).consumed());
            seen.push(pager.index());
        }
        assert_eq!(seen, [0, 1, 2]);

        // Fourth event: already on the last topic, so it is the first
        // boundary event and stays inside About.
        assert_eq!(pager.on_wheel(60.0, t0 + ms(1900)), WheelOutcome::Consumed);
        assert_eq!(pager.index(), 2);
        assert_eq!(pager.state(), PagerState::BoundaryPending);

        // Fifth, within 900ms of the fourth: released to the page.
        assert_eq!(pager.on_wheel(60.0, t0 + ms(2300)), WheelOutcome::Released);
        assert_eq!(pager.index(), 2);
    }

    #[test]
    fn boundary_check_precedes_the_cooldown() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        pager.on_wheel(60.0, t);
        pager.on_wheel(60.0, t + ms(700));
        assert_eq!(pager.index(), 2);
        // Still inside the step cool-down, but at the end: counts as the
        // first boundary event.
        assert_eq!(pager.on_wheel(60.0, t + ms(800)), WheelOutcome::Consumed);
        assert_eq!(pager.on_wheel(60.0, t + ms(900)), WheelOutcome::Released);
    }

    #[test]
    fn released_pager_passes_events_through() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        pager.on_wheel(-40.0, t);
        pager.on_wheel(-40.0, t + ms(10));
        assert_eq!(pager.state(), PagerState::Released);
        assert_eq!(pager.on_wheel(40.0, t + ms(20)), WheelOutcome::Released);
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn held_release_returns_to_the_boundary() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        pager.on_wheel(-40.0, t);
        assert_eq!(pager.on_wheel(-40.0, t + ms(100)), WheelOutcome::Released);
        pager.hold_boundary();
        assert_eq!(pager.state(), PagerState::BoundaryPending);

        // Exit intent survives: another outward event releases at once.
        assert_eq!(pager.on_wheel(-40.0, t + ms(300)), WheelOutcome::Released);
        pager.hold_boundary();
        // Inward still pages.
        assert_eq!(
            pager.on_wheel(40.0, t + ms(400)),
            WheelOutcome::Stepped { from: 0, to: 1 }
        );
        assert_eq!(pager.state(), PagerState::Paging);
    }

    #[test]
    fn hold_boundary_outside_a_release_is_a_no_op() {
        let (mut pager, _) = engaged(PagerMode::Sticky);
        pager.hold_boundary();
        assert_eq!(pager.state(), PagerState::Paging);
    }

    #[test]
    fn reentering_always_restarts_from_the_first_topic() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        pager.on_wheel(60.0, t);
        pager.on_wheel(60.0, t + ms(700));
        assert_eq!(pager.index(), 2);

        pager.deactivate();
        assert_eq!(pager.state(), PagerState::Idle);
        assert_eq!(pager.on_wheel(60.0, t + ms(2000)), WheelOutcome::Ignored);

        pager.activate(t + ms(3000));
        assert_eq!(pager.index(), 0);
        assert_eq!(pager.state(), PagerState::Paging);
    }

    #[test]
    fn clamp_mode_releases_at_once() {
        let (mut pager, t) = engaged(PagerMode::Clamp);
        assert_eq!(pager.on_wheel(-40.0, t), WheelOutcome::Released);
        assert_eq!(pager.state(), PagerState::Released);
    }

    #[test]
    fn clamp_mode_still_pages_in_the_middle() {
        let (mut pager, t) = engaged(PagerMode::Clamp);
        assert_eq!(
            pager.on_wheel(40.0, t),
            WheelOutcome::Stepped { from: 0, to: 1 }
        );
        assert_eq!(pager.on_wheel(40.0, t + ms(100)), WheelOutcome::Consumed);
    }

    #[test]
    fn select_clamps_and_clears_boundary() {
        let (mut pager, t) = engaged(PagerMode::Sticky);
        pager.on_wheel(-40.0, t);
        assert_eq!(pager.state(), PagerState::BoundaryPending);
        assert!(pager.select(99));
        assert_eq!(pager.index(), 2);
        assert_eq!(pager.state(), PagerState::Paging);
        assert!(!pager.select(2));
    }

    #[test]
    fn shrinking_topic_list_clamps_the_index() {
        let (mut pager, _) = engaged(PagerMode::Sticky);
        pager.select(2);
        pager.set_topics(vec![topic("a")]);
        assert_eq!(pager.index(), 0);
        pager.set_topics(Vec::new());
        assert_eq!(pager.index(), 0);
        assert!(pager.active_topic().is_none());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(PagerMode::parse("Sticky"), Some(PagerMode::Sticky));
        assert_eq!(PagerMode::parse("simple"), Some(PagerMode::Clamp));
        assert_eq!(PagerMode::parse("other"), None);
    }
}
