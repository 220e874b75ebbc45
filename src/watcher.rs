//! Coalesces message-list insertions into one recompute per frame.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::dom::MutationRecord;
use crate::error::Result;
use crate::recompute::PassReport;
use crate::scheduler::{FrameScheduler, PendingFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    PassScheduled,
}

type Pass = dyn Fn() -> Result<PassReport>;

/// Watches one message-list container. The container is recreated on
/// navigation, and each new container gets its own watcher.
pub struct MutationWatcher {
    state: Rc<Cell<WatcherState>>,
    pending: PendingFrame,
    pass: Rc<Pass>,
    passes_run: Rc<Cell<usize>>,
    connected: Cell<bool>,
}

impl MutationWatcher {
    pub fn new(
        scheduler: Rc<dyn FrameScheduler>,
        pass: impl Fn() -> Result<PassReport> + 'static,
    ) -> Self {
        Self {
            state: Rc::new(Cell::new(WatcherState::Idle)),
            pending: PendingFrame::new(scheduler),
            pass: Rc::new(pass),
            passes_run: Rc::new(Cell::new(0)),
            connected: Cell::new(true),
        }
    }

    /// Handle one batch from the mutation observer. Batches without added
    /// nodes are ignored. Returns whether a pass was scheduled.
    pub fn on_mutations(&self, records: &[MutationRecord]) -> bool {
        if !self.connected.get() || !records.iter().any(|r| r.added_nodes > 0) {
            return false;
        }
        self.schedule();
        true
    }

    /// Schedule a pass without a mutation, e.g. right after attaching.
    pub fn schedule(&self) {
        let state = self.state.clone();
        let pass = self.pass.clone();
        let passes_run = self.passes_run.clone();

        self.state.set(WatcherState::PassScheduled);
        self.pending.schedule(move || {
            // Back to idle first so mutations caused by the pass's own writes
            // can schedule a fresh pass.
            state.set(WatcherState::Idle);
            passes_run.set(passes_run.get() + 1);
            match pass() {
                Ok(report) => debug!(target: "Theme/Watcher", "Pass done: {report:?}"),
                Err(e) => warn!(target: "Theme/Watcher", "Pass failed: {e}"),
            }
        });
    }

    pub fn state(&self) -> WatcherState {
        self.state.get()
    }

    pub fn passes_run(&self) -> usize {
        self.passes_run.get()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Stop observing: drop any pending pass and ignore later notifications.
    pub fn disconnect(&self) {
        self.connected.set(false);
        self.pending.cancel();
        self.state.set(WatcherState::Idle);
    }
}

impl Drop for MutationWatcher {
    fn drop(&mut self) {
        self.pending.cancel();
    }
}
