//! Countdown driver for a quiz session.
//!
//! The timer runs as a tokio task and only talks to the session through a
//! channel, so ticks are applied on the same loop that handles key input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;
use uuid::Uuid;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

/// A running countdown bound to one session. Dropping it stops the task.
pub struct SessionTimer {
    session_id: Uuid,
    rx: mpsc::UnboundedReceiver<TimerEvent>,
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Spawn a one-second ticker. Must be called inside a tokio runtime.
    pub fn start(session_id: Uuid) -> Self {
        Self::with_interval(session_id, TICK_INTERVAL)
    }

    fn with_interval(session_id: Uuid, period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            // First tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(TimerEvent::Tick).is_err() {
                    break;
                }
            }
        });

        debug!(session = %session_id, "timer started");
        Self {
            session_id,
            rx,
            handle,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Next pending event without waiting.
    pub fn try_next(&mut self) -> Option<TimerEvent> {
        self.rx.try_recv().ok()
    }

    /// Stop ticking and discard events that were not consumed yet.
    pub fn stop(&mut self) {
        if !self.handle.is_finished() {
            self.handle.abort();
            debug!(session = %self.session_id, "timer stopped");
        }
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let mut timer = SessionTimer::start(Uuid::new_v4());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(timer.try_next(), None);

        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(timer.try_next(), Some(TimerEvent::Tick));
        assert_eq!(timer.try_next(), None);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(timer.try_next(), Some(TimerEvent::Tick));
        assert_eq!(timer.try_next(), Some(TimerEvent::Tick));
        assert_eq!(timer.try_next(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop() {
        let mut timer = SessionTimer::start(Uuid::new_v4());
        time::sleep(Duration::from_millis(1500)).await;

        timer.stop();
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(timer.try_next(), None);
    }
}
