//! Bookkeeping for the `requestAnimationFrame` chain.
//!
//! At most one frame request is outstanding at a time. `attach` and the
//! frame callback only request a new frame when none is pending, and
//! `detach` hands back the pending id so it can be cancelled.

#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    pending: Option<i32>,
}

impl FrameLoop {
    /// Mark the loop running. Returns whether a frame must be requested.
    pub fn begin(&mut self) -> bool {
        self.running = true;
        self.pending.is_none()
    }

    /// Record the id returned by `requestAnimationFrame`.
    pub fn scheduled(&mut self, id: i32) {
        self.pending = Some(id);
    }

    /// A requested frame fired. Returns whether to render and reschedule.
    pub fn fire(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Stop the loop. Returns the request to cancel, if one is outstanding.
    pub fn stop(&mut self) -> Option<i32> {
        self.running = false;
        self.pending.take()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
