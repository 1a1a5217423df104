//! Deferred step actions that sequence a move across ticks.
//!
//! A resolved move queues [`StepAction::AwaitAnimations`] followed by
//! [`StepAction::CommitAndSpawn`]. While anything is queued the board ignores
//! new directions, so at most one move is in flight.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Barrier: done once no tile is sliding.
    AwaitAnimations,
    /// Drop absorbed tiles and spawn a new one.
    CommitAndSpawn,
}

/// What running an action this tick amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Try again next tick.
    Pending,
    /// Finished; remove from the queue.
    Terminated,
}

#[derive(Debug, Clone, Default)]
pub struct StepScheduler {
    queue: VecDeque<StepAction>,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<StepAction> {
        self.queue.front().copied()
    }

    pub fn push(&mut self, action: StepAction) {
        self.queue.push_back(action);
    }

    /// Queue the two-phase protocol for a resolved move.
    pub fn schedule_move(&mut self) {
        self.push(StepAction::AwaitAnimations);
        self.push(StepAction::CommitAndSpawn);
    }

    /// Run the front action through `run`, popping it once it terminates.
    ///
    /// Returns the action that terminated this step, if any. An error leaves
    /// the action queued and is handed back to the caller.
    pub fn step<E>(
        &mut self,
        run: impl FnOnce(StepAction) -> Result<StepStatus, E>,
    ) -> Result<Option<StepAction>, E> {
        let Some(action) = self.front() else {
            return Ok(None);
        };
        match run(action)? {
            StepStatus::Pending => Ok(None),
            StepStatus::Terminated => {
                self.queue.pop_front();
                Ok(Some(action))
            }
        }
    }
}
