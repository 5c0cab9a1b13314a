//! Open-connection accounting shared by the factories
//!
//! Every connection carries a [`Lease`]; dropping the connection drops the
//! lease and decrements the count, whichever way the lookup ended.

use scholarnet::{StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct LeaseTracker {
    open: Arc<AtomicUsize>,
    closed: AtomicBool,
}

impl LeaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a lease, or fail once the tracker has been closed
    pub fn lease(&self) -> StoreResult<Lease> {
        if self.is_closed() {
            return Err(StoreError::ShutDown);
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        Ok(Lease { open: Arc::clone(&self.open) })
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// Held by a live connection
#[derive(Debug)]
pub struct Lease {
    open: Arc<AtomicUsize>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_released_on_drop() {
        let tracker = LeaseTracker::new();
        let a = tracker.lease().unwrap();
        let b = tracker.lease().unwrap();
        assert_eq!(tracker.open(), 2);
        drop(a);
        assert_eq!(tracker.open(), 1);
        drop(b);
        assert_eq!(tracker.open(), 0);
    }

    #[test]
    fn test_closed_tracker_refuses() {
        let tracker = LeaseTracker::new();
        let held = tracker.lease().unwrap();
        tracker.close();
        assert_eq!(tracker.lease().unwrap_err(), StoreError::ShutDown);
        // outstanding leases still release
        drop(held);
        assert_eq!(tracker.open(), 0);
    }
}
