//! Entrance sequences: a fixed list of stages played strictly one after the
//! other whenever a section becomes active.
//!
//! The sequencer is pure state.  It never sleeps; whoever drives it (see
//! `app::sequence_runtime`) reports stage completions back with the
//! [`Generation`] they were scheduled under.  Every `begin` and `abandon`
//! bumps the generation, so a completion from a superseded run is ignored
//! instead of advancing the new one.

use std::time::{Duration, Instant};

use super::ease::Ease;

/// Stamp of one sequence run.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Divider,
    Content,
}

/// How one stage moves from its pre-animation pose to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSpec {
    pub stage: Stage,
    pub duration: Duration,
    pub ease: Ease,
    /// Downward offset in pixels at progress 0.
    pub rise: f64,
    pub fades: bool,
    pub scales_x: bool,
}

impl StageSpec {
    const fn new(stage: Stage, millis: u64, ease: Ease) -> Self {
        Self {
            stage,
            duration: Duration::from_millis(millis),
            ease,
            rise: 0.0,
            fades: false,
            scales_x: false,
        }
    }

    const fn rising(mut self, rise: f64) -> Self {
        self.rise = rise;
        self.fades = true;
        self
    }

    const fn scaling(mut self) -> Self {
        self.scales_x = true;
        self
    }

    /// Header, divider, content.
    pub fn works() -> Vec<StageSpec> {
        vec![
            Self::new(Stage::Header, 220, Ease::Out).rising(14.0),
            Self::new(Stage::Divider, 280, Ease::InOut).scaling(),
            Self::new(Stage::Content, 220, Ease::Out).rising(10.0),
        ]
    }

    /// Title, then topic list and body.
    pub fn about() -> Vec<StageSpec> {
        vec![
            Self::new(Stage::Header, 220, Ease::Out).rising(14.0),
            Self::new(Stage::Content, 280, Ease::Out).rising(10.0),
        ]
    }

    /// Visual pose at eased progress `p`.
    pub fn pose(&self, p: f64) -> StagePose {
        let p = p.clamp(0.0, 1.0);
        StagePose {
            opacity: if self.fades { p } else { 1.0 },
            offset: self.rise * (1.0 - p),
            scale_x: if self.scales_x { p } else { 1.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePose {
    pub opacity: f64,
    /// Pixels below the resting position.
    pub offset: f64,
    pub scale_x: f64,
}

impl StagePose {
    pub const REST: StagePose = StagePose {
        opacity: 1.0,
        offset: 0.0,
        scale_x: 1.0,
    };

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale_x > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Never started; everything sits in the pre-animation pose.
    Pending,
    Running { stage: usize, started: Instant },
    Finished,
}

pub struct EntranceSequencer {
    stages: Vec<StageSpec>,
    generation: Generation,
    state: SequenceState,
    /// Eased progress captured by `abandon`.
    frozen: Option<Vec<f64>>,
}

impl EntranceSequencer {
    pub fn new(stages: Vec<StageSpec>) -> Self {
        Self {
            stages,
            generation: 0,
            state: SequenceState::Pending,
            frozen: None,
        }
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[cfg(test)]
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Number of stages that reached rest in the current run.
    #[cfg(test)]
    pub fn completed(&self) -> usize {
        match self.state {
            SequenceState::Pending => 0,
            SequenceState::Running { stage, .. } => stage,
            SequenceState::Finished => self.stages.len(),
        }
    }

    /// Restart from stage zero.  All stages drop to their pre-animation pose
    /// before this returns.
    pub fn begin(&mut self, now: Instant) -> Generation {
        self.generation += 1;
        self.frozen = None;
        self.state = if self.stages.is_empty() {
            SequenceState::Finished
        } else {
            SequenceState::Running {
                stage: 0,
                started: now,
            }
        };
        tracing::debug!(generation = self.generation, "entrance sequence started");
        self.generation
    }

    /// A stage finished.  Advances only when `generation` is current and
    /// `stage` is the one running; anything else is stale.
    pub fn complete(&mut self, generation: Generation, stage: usize, now: Instant) -> bool {
        if generation != self.generation || self.frozen.is_some() {
            return false;
        }
        let SequenceState::Running { stage: running, .. } = self.state else {
            return false;
        };
        if running != stage {
            return false;
        }
        let next = stage + 1;
        self.state = if next < self.stages.len() {
            SequenceState::Running {
                stage: next,
                started: now,
            }
        } else {
            SequenceState::Finished
        };
        true
    }

    /// Stop scheduling.  Poses hold wherever they were at `now`.
    pub fn abandon(&mut self, now: Instant) {
        if self.frozen.is_some() {
            return;
        }
        if matches!(self.state, SequenceState::Running { .. }) {
            tracing::debug!(generation = self.generation, "entrance sequence abandoned");
        }
        self.frozen = Some(self.progress(now));
        self.generation += 1;
    }

    /// Eased progress per stage: finished stages 1, the running one by
    /// elapsed time, later ones 0.
    pub fn progress(&self, now: Instant) -> Vec<f64> {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }
        self.stages
            .iter()
            .enumerate()
            .map(|(i, spec)| match self.state {
                SequenceState::Pending => 0.0,
                SequenceState::Finished => 1.0,
                SequenceState::Running { stage, started } => {
                    if i < stage {
                        1.0
                    } else if i > stage {
                        0.0
                    } else {
                        let elapsed = now.saturating_duration_since(started).as_secs_f64();
                        let total = spec.duration.as_secs_f64();
                        let t = if total > 0.0 { elapsed / total } else { 1.0 };
                        spec.ease.apply(t)
                    }
                }
            })
            .collect()
    }

    pub fn pose(&self, now: Instant) -> Vec<StagePose> {
        self.stages
            .iter()
            .zip(self.progress(now))
            .map(|(spec, p)| spec.pose(p))
            .collect()
    }

    /// Pose of the first stage of kind `stage`; at rest when there is none.
    pub fn pose_of(&self, stage: Stage, now: Instant) -> StagePose {
        self.stages
            .iter()
            .position(|s| s.stage == stage)
            .and_then(|i| self.pose(now).get(i).copied())
            .unwrap_or(StagePose::REST)
    }

    /// Whether a frame is needed to show motion.
    pub fn is_animating(&self) -> bool {
        self.frozen.is_none() && matches!(self.state, SequenceState::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn begin_resets_to_the_hidden_pose() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        seq.begin(t0);
        let poses = seq.pose(t0);
        assert_eq!(poses[0].opacity, 0.0);
        assert_eq!(poses[0].offset, 14.0);
        assert_eq!(poses[1].scale_x, 0.0);
        assert_eq!(poses[2].offset, 10.0);
    }

    #[test]
    fn stages_advance_strictly_in_order() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        let gen = seq.begin(t0);

        // Out of order.
        assert!(!seq.complete(gen, 1, t0 + ms(220)));
        assert!(seq.complete(gen, 0, t0 + ms(220)));
        assert_eq!(seq.completed(), 1);
        // Duplicate.
        assert!(!seq.complete(gen, 0, t0 + ms(230)));
        assert!(seq.complete(gen, 1, t0 + ms(500)));
        assert!(seq.complete(gen, 2, t0 + ms(720)));
        assert_eq!(seq.state(), SequenceState::Finished);
        assert!(seq.pose(t0 + ms(720)).iter().all(|p| *p == StagePose::REST));
    }

    #[test]
    fn running_stage_eases_with_time() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        seq.begin(t0);
        let p = seq.progress(t0 + ms(110));
        assert!(p[0] > 0.5 && p[0] < 1.0);
        assert_eq!(p[1], 0.0);
        // Past its duration but not yet reported: held at rest.
        assert_eq!(seq.progress(t0 + ms(400))[0], 1.0);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        let old = seq.begin(t0);
        let new = seq.begin(t0 + ms(100));
        assert_ne!(old, new);
        assert!(!seq.complete(old, 0, t0 + ms(220)));
        assert_eq!(seq.completed(), 0);
        assert!(seq.complete(new, 0, t0 + ms(320)));
    }

    #[test]
    fn restart_mid_sequence_goes_back_to_stage_zero() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        let gen = seq.begin(t0);
        seq.complete(gen, 0, t0 + ms(220));
        seq.complete(gen, 1, t0 + ms(500));
        seq.begin(t0 + ms(510));
        assert_eq!(seq.completed(), 0);
        assert_eq!(seq.pose(t0 + ms(510))[2].opacity, 0.0);
    }

    #[test]
    fn abandon_freezes_and_stops_scheduling() {
        let t0 = Instant::now();
        let mut seq = EntranceSequencer::new(StageSpec::works());
        let gen = seq.begin(t0);
        seq.complete(gen, 0, t0 + ms(220));
        seq.abandon(t0 + ms(360));

        let frozen = seq.progress(t0 + ms(360));
        assert_eq!(frozen[0], 1.0);
        assert!(frozen[1] > 0.0 && frozen[1] < 1.0);
        assert_eq!(seq.progress(t0 + ms(5_000)), frozen);
        assert!(!seq.complete(gen, 1, t0 + ms(500)));
        assert!(!seq.is_animating());
        assert_eq!(seq.completed(), 1);
    }

    #[test]
    fn pending_sequencer_is_hidden_and_pose_of_missing_stage_is_rest() {
        let now = Instant::now();
        let seq = EntranceSequencer::new(StageSpec::about());
        assert_eq!(seq.pose_of(Stage::Header, now).opacity, 0.0);
        assert_eq!(seq.pose_of(Stage::Divider, now), StagePose::REST);
    }
}
