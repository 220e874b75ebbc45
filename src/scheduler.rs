//! Animation-frame scheduling.
//!
//! Work triggered by DOM notifications is deferred to the next paint frame so
//! a burst of notifications collapses into one unit of work. [`PendingFrame`]
//! holds at most one outstanding request; scheduling again cancels the
//! previous one.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::trace;
use tokio::task::JoinHandle;

pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Host primitive behind `requestAnimationFrame` / `cancelAnimationFrame`.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameId;

    /// Cancelling an already fired or unknown frame is a no-op.
    fn cancel_frame(&self, id: FrameId);
}

/// Single-slot pending task: a new request replaces the pending one.
pub struct PendingFrame {
    scheduler: Rc<dyn FrameScheduler>,
    slot: Rc<Cell<Option<FrameId>>>,
}

impl PendingFrame {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            slot: Rc::new(Cell::new(None)),
        }
    }

    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        self.cancel();
        let slot = self.slot.clone();
        let id = self.scheduler.request_frame(Box::new(move || {
            slot.set(None);
            callback();
        }));
        self.slot.set(Some(id));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.slot.take() {
            trace!(target: "Theme/Frame", "Cancelling frame {id:?}");
            self.scheduler.cancel_frame(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Frames fire only when the host calls [`run_frame`](Self::run_frame).
#[derive(Default)]
pub struct ManualFrameScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(FrameId, FrameCallback)>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every frame requested so far. Frames requested by the callbacks
    /// themselves wait for the next call. Returns the number fired.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let fired = due.len();
        for (_, callback) in due {
            callback();
        }
        fired
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
    }
}

/// Fires each frame after a fixed interval on the current `LocalSet`.
pub struct TokioFrameScheduler {
    interval: Duration,
    next_id: Cell<u64>,
    tasks: RefCell<HashMap<FrameId, JoinHandle<()>>>,
}

impl TokioFrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: Cell::new(0),
            tasks: RefCell::new(HashMap::new()),
        }
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let interval = self.interval;
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(interval).await;
            callback();
        });

        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(id, handle);
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Some(task) = self.tasks.borrow_mut().remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioFrameScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.get_mut().drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedule_replaces_pending_frame() {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let pending = PendingFrame::new(scheduler.clone());
        let hits = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let hits = hits.clone();
            pending.schedule(move || hits.borrow_mut().push(n));
        }
        assert!(pending.is_pending());
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*hits.borrow(), vec![2]);
        assert!(!pending.is_pending());
    }

    #[test]
    fn cancel_clears_slot() {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let pending = PendingFrame::new(scheduler.clone());
        pending.schedule(|| panic!("cancelled frame must not fire"));
        pending.cancel();
        assert!(!pending.is_pending());
        assert_eq!(scheduler.run_frame(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires_after_interval() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = Rc::new(TokioFrameScheduler::new(Duration::from_millis(16)));
                let pending = PendingFrame::new(scheduler.clone());
                let hits = Rc::new(Cell::new(0));

                let h = hits.clone();
                pending.schedule(move || h.set(h.get() + 1));
                let h = hits.clone();
                pending.schedule(move || h.set(h.get() + 10));

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert_eq!(hits.get(), 10);
                assert!(!pending.is_pending());
            })
            .await;
    }
}
