//! Background timers for entrance sequences.
//!
//! Each run gets one task that sleeps through the stage durations and
//! reports every finished stage over the channel.  Before reporting, the task
//! checks the shared latest-generation slot; once a newer run (or an
//! abandon) has replaced its generation the task exits quietly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::core::section::SectionId;
use crate::core::sequence::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDone {
    pub section: SectionId,
    pub generation: Generation,
    pub stage: usize,
}

/// Latest generation per sequence, shared with its timer tasks.
#[derive(Debug, Clone, Default)]
pub struct GenerationSlot(Arc<AtomicU64>);

impl GenerationSlot {
    pub fn publish(&self, generation: Generation) {
        self.0.store(generation, Ordering::Release);
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.0.load(Ordering::Acquire) == generation
    }
}

pub fn spawn_sequence(
    tx: mpsc::UnboundedSender<StageDone>,
    section: SectionId,
    generation: Generation,
    durations: Vec<Duration>,
    slot: GenerationSlot,
) {
    slot.publish(generation);
    tokio::spawn(async move {
        for (stage, duration) in durations.into_iter().enumerate() {
            tokio::time::sleep(duration).await;
            if !slot.is_current(generation) {
                tracing::trace!(%section, generation, stage, "stale sequence timer dropped");
                return;
            }
            let done = StageDone {
                section,
                generation,
                stage,
            };
            if tx.send(done).is_err() {
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test]
    async fn reports_every_stage_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let slot = GenerationSlot::default();
        spawn_sequence(tx, SectionId::Works, 1, vec![ms(5), ms(5), ms(5)], slot);

        let mut stages = Vec::new();
        while let Some(done) = rx.recv().await {
            assert_eq!(done.generation, 1);
            assert_eq!(done.section, SectionId::Works);
            stages.push(done.stage);
        }
        assert_eq!(stages, [0, 1, 2]);
    }

    #[tokio::test]
    async fn superseded_run_goes_quiet() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let slot = GenerationSlot::default();
        spawn_sequence(tx.clone(), SectionId::About, 1, vec![ms(5), ms(200)], slot.clone());

        let first = rx.recv().await.unwrap();
        assert_eq!((first.generation, first.stage), (1, 0));

        // A newer run replaces generation 1 before its second stage ends.
        spawn_sequence(tx, SectionId::About, 2, vec![ms(5)], slot);
        let next = rx.recv().await.unwrap();
        assert_eq!(next.generation, 2);
        // Both senders are gone once the tasks exit.
        assert!(rx.recv().await.is_none());
    }
}
