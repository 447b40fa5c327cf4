//! Single-flight gate for the initial dataset load
//!
//! The gate is a tri-state flag behind a mutex. The first caller to find it
//! `NotStarted` becomes the initiator and runs the load; every other caller
//! waits on a [`Notify`] until that run completes and returns its outcome.
//!
//! After a failed run the gate either re-arms (`RetryOnFailure`) so the next
//! caller starts a fresh run, or stays closed (`Sticky`) and keeps returning
//! the failure. Callers that were already waiting on the failed run receive
//! its outcome in both cases. If the initiator's future is dropped mid-run
//! the gate re-arms and one of the waiters takes over.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::config::GatePolicy;

/// Observable state of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    NotStarted,
    InProgress,
    /// Closed with the outcome of the run that closed it
    Done(bool),
}

#[derive(Debug)]
struct GateState {
    phase: GatePhase,
    /// Incremented each time a run starts
    generation: u64,
    /// Generation and outcome of the most recently finished run
    finished: Option<(u64, bool)>,
}

/// Runs a load at most once at a time and shares its outcome
#[derive(Debug)]
pub struct LoadGate {
    policy: GatePolicy,
    state: Mutex<GateState>,
    notify: Notify,
}

/// Re-arms the gate if the initiator is dropped before finishing
struct RunGuard<'a> {
    gate: &'a LoadGate,
    armed: bool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Dataset load was cancelled before completing");
            self.gate.lock().phase = GatePhase::NotStarted;
            self.gate.notify.notify_waiters();
        }
    }
}

impl LoadGate {
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(GateState {
                phase: GatePhase::NotStarted,
                generation: 0,
                finished: None,
            }),
            notify: Notify::new(),
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.lock().phase
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `load` unless a run is in progress or the gate is closed
    ///
    /// Returns the outcome of the run this call started or waited on, or
    /// the outcome that closed the gate.
    pub async fn run<F, Fut>(&self, load: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before inspecting the state so a completion between
            // the check and the await is not missed
            notified.as_mut().enable();

            let awaited = {
                let mut state = self.lock();
                match state.phase {
                    GatePhase::Done(outcome) => return outcome,
                    GatePhase::InProgress => state.generation,
                    GatePhase::NotStarted => {
                        state.phase = GatePhase::InProgress;
                        state.generation += 1;
                        debug!("Starting dataset load (run {})", state.generation);
                        break;
                    }
                }
            };

            debug!("Waiting for dataset load (run {})", awaited);
            notified.await;

            if let Some((generation, outcome)) = self.lock().finished {
                if generation == awaited {
                    return outcome;
                }
            }
        }

        let mut guard = RunGuard {
            gate: self,
            armed: true,
        };
        let outcome = load().await;
        guard.armed = false;

        {
            let mut state = self.lock();
            state.finished = Some((state.generation, outcome));
            state.phase = match (outcome, self.policy) {
                (false, GatePolicy::RetryOnFailure) => GatePhase::NotStarted,
                _ => GatePhase::Done(outcome),
            };
        }
        self.notify.notify_waiters();
        outcome
    }
}
