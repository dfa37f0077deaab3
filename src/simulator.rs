use crate::chat::{Message, Sender};
use log::debug;
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle, time};

/// Emitted by a reply timer when it fires. The generation tags which
/// scheduling the echo belongs to, so the event loop can reject an echo
/// whose timer was superseded after firing but before being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatorEvent {
    Echo { text: String, generation: u64 },
}

/// Fixed-delay echo responder. A two-state machine: `Idle` (no timer handle)
/// and `Pending` (a spawned timer task held in `timer`). `evaluate` is
/// invoked explicitly after every append to the conversation log.
///
/// A user message arriving while a reply is pending supersedes it: the old
/// timer task is aborted and a fresh one is scheduled, so only the delay
/// relative to the latest user message governs when the reply lands.
#[derive(Debug)]
pub struct ResponseSimulator {
    delay: Duration,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<SimulatorEvent>,
}

impl ResponseSimulator {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<SimulatorEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                generation: 0,
                timer: None,
                events,
            },
            rx,
        )
    }

    /// Re-evaluates the machine against the newest message in the log.
    /// Bot messages leave it idle; a user message (re)schedules the echo.
    pub fn evaluate(&mut self, latest: &Message) {
        if latest.sender() != Sender::User {
            return;
        }
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let text = latest.text().to_string();
        let delay = self.delay;
        let events = self.events.clone();
        debug!("scheduling echo (generation {generation}) in {}ms", delay.as_millis());
        self.timer = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            // Receiver gone means the widget is tearing down.
            let _ = events.send(SimulatorEvent::Echo { text, generation });
        }));
    }

    /// Accepts a fired echo. Returns true and clears the pending timer only
    /// when the generation is current and a timer is still outstanding;
    /// stale echoes from superseded timers are rejected.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.timer.is_none() {
            debug!("rejecting stale echo (generation {generation})");
            return false;
        }
        self.timer = None;
        true
    }

    /// True from the moment a user message schedules a reply until that
    /// reply is accepted or cancelled.
    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Aborts any outstanding timer. Called on supersession and teardown.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("cancelling pending echo (generation {})", self.generation);
            timer.abort();
        }
    }
}

impl Drop for ResponseSimulator {
    fn drop(&mut self) {
        self.cancel();
    }
}
