use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pwned_range::{RangeTransport, check_password};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::clock::{Clock, TokioClock};
use crate::config::PipelineConfig;
use crate::listener::{BreachCheckFailed, BreachEvent, BreachListener};

/// Lifecycle of the current check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending.
    Idle,
    /// Waiting for the debounce delay to elapse.
    Armed,
    /// The range request for the current input is outstanding.
    InFlight,
}

/// Debounced breach checks for a single input field.
///
/// Every [`schedule`](Self::schedule) supersedes the previous one. Only the last
/// password scheduled before a quiet period of `delay` is looked up, and a result is
/// only delivered if nothing has superseded or cancelled it by the time it resolves.
///
/// The handle is cheap to clone; clones share the same state. Scheduling spawns onto
/// the ambient tokio runtime.
pub struct BreachPipeline<T, C = TokioClock> {
    shared: Arc<Shared<T, C>>,
}

impl<T, C> Clone for BreachPipeline<T, C> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

struct Shared<T, C> {
    transport: T,
    clock: C,
    listener: Box<dyn BreachListener>,
    delay: Duration,
    slot: Mutex<Slot>,
}

struct Slot {
    /// Bumped on every schedule and cancel; a task may only apply its result while
    /// its own generation is still the current one.
    generation: u64,
    phase: Phase,
    task: Option<JoinHandle<()>>,
}

impl Slot {
    /// Invalidates whatever is pending and returns the new generation.
    ///
    /// An armed timer is aborted outright. An in-flight request is left to finish
    /// but can no longer apply its result.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            if self.phase == Phase::Armed {
                task.abort();
            }
        }
        self.phase = Phase::Idle;
        self.generation
    }
}

impl<T> BreachPipeline<T, TokioClock>
where
    T: RangeTransport + 'static,
{
    pub fn new(
        transport: T,
        listener: impl BreachListener + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self::with_clock(transport, TokioClock, listener, config)
    }
}

impl<T, C> BreachPipeline<T, C>
where
    T: RangeTransport + 'static,
    C: Clock + 'static,
{
    pub fn with_clock(
        transport: T,
        clock: C,
        listener: impl BreachListener + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                transport,
                clock,
                listener: Box::new(listener),
                delay: config.delay,
                slot: Mutex::new(Slot { generation: 0, phase: Phase::Idle, task: None }),
            }),
        }
    }

    /// Arms a check of `password`, replacing any pending one.
    ///
    /// The password is captured by value; nothing touches the network until the
    /// debounce delay elapses.
    pub fn schedule(&self, password: impl Into<String>) {
        let password = password.into();
        let mut slot = self.shared.lock();
        let generation = slot.supersede();
        slot.phase = Phase::Armed;

        let shared = Arc::clone(&self.shared);
        slot.task = Some(tokio::spawn(shared.run(generation, password)));
        debug!(generation, "breach check armed");
    }

    /// Drops any pending or in-flight check without notifying the listener.
    ///
    /// Does nothing when the pipeline is idle.
    pub fn cancel(&self) {
        let mut slot = self.shared.lock();
        if slot.phase == Phase::Idle {
            return;
        }
        let generation = slot.supersede();
        debug!(generation, "breach check cancelled");
    }

    /// Cancels and reports [`BreachEvent::WaitingForInput`]. Used when the input
    /// becomes empty.
    pub fn reset(&self) {
        {
            let mut slot = self.shared.lock();
            if slot.phase != Phase::Idle {
                slot.supersede();
            }
        }
        self.shared.listener.on_event(BreachEvent::WaitingForInput);
    }

    pub fn phase(&self) -> Phase {
        self.shared.lock().phase
    }

    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    /// True while a check is armed or in flight.
    pub fn is_busy(&self) -> bool {
        self.phase() != Phase::Idle
    }

    pub fn delay(&self) -> Duration {
        self.shared.delay
    }
}

impl<T, C> Shared<T, C>
where
    T: RangeTransport,
    C: Clock,
{
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(self: Arc<Self>, generation: u64, password: String) {
        self.clock.sleep(self.delay).await;

        {
            let mut slot = self.lock();
            if slot.generation != generation {
                return;
            }
            slot.phase = Phase::InFlight;
        }
        debug!(generation, "breach check in flight");

        let outcome = check_password(&self.transport, &password).await;
        drop(password);

        // The listener runs after the guard is released so it may call back into
        // the pipeline.
        {
            let mut slot = self.lock();
            if slot.generation != generation {
                trace!(generation, current = slot.generation, "dropping stale breach result");
                return;
            }
            slot.phase = Phase::Idle;
            slot.task = None;
        }

        let event = match outcome {
            Ok(result) => {
                debug!(generation, breached = result.breached, "breach check complete");
                BreachEvent::Checked(result)
            }
            Err(e) => {
                warn!(generation, error = %e, "breach check failed");
                BreachEvent::Failed(BreachCheckFailed::from(&e))
            }
        };
        self.listener.on_event(event);
    }
}
