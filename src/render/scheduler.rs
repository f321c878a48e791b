// src/render/scheduler.rs
//
// A request/cancel frame primitive for hosts without a built-in one.
// The host calls `take_due` once per display refresh and hands each
// handle to whoever requested it.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    requested_total: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested_total += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    /// Returns false if the frame already ran or was cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        if let Some(pos) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total number of frames ever requested.
    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    /// Drains the frames due this tick, oldest first. Frames requested while
    /// the caller dispatches these are due on the next tick.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_ordered() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(scheduler.take_due(), vec![a, b]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();

        assert!(scheduler.cancel_frame(a));
        assert!(!scheduler.cancel_frame(a));
        assert!(!scheduler.is_pending(a));
        assert!(scheduler.is_pending(b));
        assert_eq!(scheduler.take_due(), vec![b]);
        assert_eq!(scheduler.requested_total(), 2);
    }

    #[test]
    fn test_requests_during_dispatch_wait_for_next_tick() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request_frame();

        let due = scheduler.take_due();
        assert_eq!(due.len(), 1);
        let next = scheduler.request_frame();

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.take_due(), vec![next]);
    }
}
