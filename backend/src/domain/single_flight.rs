//! Single-flight guards for the mutating workflows.
//!
//! A guard admits one holder at a time. A caller that finds the guard held is
//! turned away rather than queued. The holder's [`FlightPermit`] releases the
//! guard when dropped, so every exit path (success, validation error, storage
//! failure, panic) frees it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SingleFlight {
    name: &'static str,
    in_flight: Arc<AtomicBool>,
}

impl SingleFlight {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Take the guard, or `None` when another holder has it
    pub fn try_acquire(&self) -> Option<FlightPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                debug!("{} guard acquired", self.name);
                FlightPermit {
                    name: self.name,
                    in_flight: Arc::clone(&self.in_flight),
                }
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding a [`SingleFlight`] guard
#[derive(Debug)]
pub struct FlightPermit {
    name: &'static str,
    in_flight: Arc<AtomicBool>,
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
        debug!("{} guard released", self.name);
    }
}
