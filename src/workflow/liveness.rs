use crate::target::Target;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Defines how a liveness poll ended
#[derive(Clone, Debug, PartialEq)]
pub enum PollEnd {
    /// The health check failed; `checks` includes the failed one
    TargetLost { checks: usize, reason: String },

    /// The stop flag was raised
    Interrupted { checks: usize },
}

/// Keeps the program alive while the solver session is reachable
///
/// The target is checked at a fixed interval; the first failed check ends the poll. No retry,
/// no backoff. The stop flag is read before every check, so raising it (e.g., from a signal
/// handler or another thread) ends the poll within one interval.
pub struct LivenessPoll {
    /// Interval between checks
    interval: Duration,

    /// Raised to end the poll
    stop: Arc<AtomicBool>,
}

impl LivenessPoll {
    /// Allocates a new instance
    pub fn new(interval: Duration) -> Self {
        LivenessPoll {
            interval,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the interval between checks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns a handle to the stop flag
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Returns a closure that raises the stop flag
    ///
    /// Meant for an interrupt handler such as `ctrlc::set_handler`.
    pub fn interrupter(&self) -> impl FnMut() + Send + 'static {
        let stop = Arc::clone(&self.stop);
        move || stop.store(true, Ordering::SeqCst)
    }

    /// Polls until the target is lost or the stop flag is raised (blocking)
    pub fn run(&self, target: &mut dyn Target) -> PollEnd {
        self.run_with(target, thread::sleep)
    }

    /// Polls using a custom sleep function
    pub fn run_with<F>(&self, target: &mut dyn Target, mut sleep: F) -> PollEnd
    where
        F: FnMut(Duration),
    {
        let mut checks = 0;
        loop {
            if self.stop.load(Ordering::SeqCst) {
                info!("liveness poll interrupted after {} check(s)", checks);
                return PollEnd::Interrupted { checks };
            }
            checks += 1;
            if let Err(reason) = target.check_health() {
                warn!("solver session lost after {} check(s): {}", checks, reason);
                return PollEnd::TargetLost {
                    checks,
                    reason: reason.to_string(),
                };
            }
            sleep(self.interval);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
