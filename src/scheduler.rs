//! Frame scheduling.
//!
//! The render loop is a [`FrameTask`] driven by a [`Scheduler`]. In the
//! browser the scheduler is `requestAnimationFrame` (see `web::frame_loop`);
//! here [`ManualScheduler`] steps frames deterministically at a fixed cadence.

use std::cell::RefCell;
use std::rc::Rc;

/// Nominal frame duration (60fps).
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Work performed once per animation frame.
pub trait FrameTask {
    /// Called with the frame timestamp in milliseconds.
    fn on_frame(&mut self, timestamp_ms: f64);
}

/// Shared handle to a frame task.
pub type SharedTask = Rc<RefCell<dyn FrameTask>>;

/// Start/stop control over a free-running frame loop.
pub trait Scheduler {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Scheduler that only advances when asked to.
pub struct ManualScheduler {
    task: SharedTask,
    running: bool,
    frames: u64,
    clock_ms: f64,
}

impl ManualScheduler {
    pub fn new(task: SharedTask) -> Self {
        Self {
            task,
            running: false,
            frames: 0,
            clock_ms: 0.0,
        }
    }

    /// Run one frame. Returns false (and does nothing) while stopped.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.clock_ms += FRAME_MS;
        self.frames += 1;
        self.task.borrow_mut().on_frame(self.clock_ms);
        true
    }

    /// Run up to `n` frames, returning how many actually ran.
    pub fn run_frames(&mut self, n: usize) -> usize {
        (0..n).take_while(|_| self.step()).count()
    }

    /// Frames run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        stamps: Vec<f64>,
    }

    impl FrameTask for Counter {
        fn on_frame(&mut self, timestamp_ms: f64) {
            self.stamps.push(timestamp_ms);
        }
    }

    #[test]
    fn test_stopped_scheduler_does_not_tick() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut scheduler = ManualScheduler::new(counter.clone());

        assert!(!scheduler.step());
        assert!(counter.borrow().stamps.is_empty());
    }

    #[test]
    fn test_start_stop() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut scheduler = ManualScheduler::new(counter.clone());

        scheduler.start();
        assert_eq!(scheduler.run_frames(3), 3);
        scheduler.stop();
        assert_eq!(scheduler.run_frames(3), 0);

        assert_eq!(scheduler.frames(), 3);
        let stamps = &counter.borrow().stamps;
        assert_eq!(stamps.len(), 3);
        assert!(stamps.windows(2).all(|w| w[1] > w[0]));
    }
}
