use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One step of the client: advance state, then present it.
pub trait Frame {
    fn update(&mut self);
    fn render(&mut self);
}

/// Decides when the next frame runs and when the loop ends.
pub trait FrameScheduler {
    /// Blocks until the next frame is due. Returns `false` to stop the loop.
    fn next_frame(&mut self) -> bool;
}

/// Drives `frame` until the scheduler stops it. Returns the number of frames
/// that ran.
pub fn run_frames<F: Frame, S: FrameScheduler>(frame: &mut F, scheduler: &mut S) -> u64 {
    let mut frames = 0;
    while scheduler.next_frame() {
        frame.update();
        frame.render();
        frames += 1;
    }
    frames
}

/// Paces frames at a fixed tick rate, sleeping off whatever is left of each
/// tick. Stops after `frame_limit` frames or once `running` is cleared.
pub struct FixedRateScheduler {
    tick_duration: Duration,
    frame_limit: Option<u64>,
    frames_started: u64,
    tick_start: Option<Instant>,
    running: Arc<AtomicBool>,
}

impl FixedRateScheduler {
    pub fn new(tick_rate: u32, frame_limit: Option<u64>, running: Arc<AtomicBool>) -> Self {
        Self {
            tick_duration: Duration::from_secs(1) / tick_rate.max(1),
            frame_limit,
            frames_started: 0,
            tick_start: None,
            running,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn next_frame(&mut self) -> bool {
        if self
            .frame_limit
            .is_some_and(|limit| self.frames_started >= limit)
        {
            return false;
        }

        if let Some(tick_start) = self.tick_start {
            let elapsed = tick_start.elapsed();
            if elapsed < self.tick_duration {
                std::thread::sleep(self.tick_duration - elapsed);
            }
        }

        // Checked after the sleep so an interrupt during it stops the loop.
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }

        self.tick_start = Some(Instant::now());
        self.frames_started += 1;
        true
    }
}
