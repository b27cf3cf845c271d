//! Frame loop: pose from wall-clock time, render, present, pace.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::display::Scanout;
use crate::render::{draw_triangle, Canvas, TrianglePose, Vertex};

/// Triangle pose `elapsed` after the animation started on a
/// `width` x `height` screen.
pub fn pose_at(elapsed: Duration, width: u32, height: u32) -> TrianglePose {
    let t = elapsed.as_secs_f32();
    TrianglePose {
        center: Vertex::new(
            (width / 2) as f32 + 300.0 * (t * 0.3).cos(),
            (height / 2) as f32 + 150.0 * (t * 0.2).sin(),
        ),
        angle: t * 0.8,
        size: 200.0 + 100.0 * (t * 0.5).sin(),
    }
}

/// Pads each frame to a fixed budget
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// How long to sleep after a frame that took `frame_time`.
    pub fn remaining(&self, frame_time: Duration) -> Option<Duration> {
        self.budget
            .checked_sub(frame_time)
            .filter(|left| !left.is_zero())
    }

    /// Sleep out whatever is left of the frame that began at `frame_start`.
    pub fn pace(&self, frame_start: Instant) {
        if let Some(left) = self.remaining(frame_start.elapsed()) {
            thread::sleep(left);
        }
    }
}

/// Counters reported when the loop ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub failed_presents: u64,
}

/// Render until `shutdown` is set. The flag is checked once per frame.
///
/// Presentation errors are logged and rendering carries on.
pub fn run<S: Scanout>(
    canvas: &mut Canvas<'_>,
    scanout: &mut S,
    pacer: &FramePacer,
    shutdown: &AtomicBool,
) -> LoopStats {
    let start = Instant::now();
    let (width, height) = (canvas.width(), canvas.height());
    let mut stats = LoopStats::default();
    let mut failing = false;

    debug!(budget_us = pacer.budget().as_micros() as u64, "Entering frame loop");

    while !shutdown.load(Ordering::SeqCst) {
        let frame_start = Instant::now();
        let pose = pose_at(frame_start.duration_since(start), width, height);

        canvas.clear();
        draw_triangle(&mut *canvas, &pose).unwrap_or_else(|never| match never {});

        match scanout.present(canvas.as_bytes()) {
            Ok(()) => {
                if failing {
                    info!(frame = stats.frames, "Presentation recovered");
                    failing = false;
                }
            }
            Err(e) => {
                stats.failed_presents += 1;
                if failing {
                    debug!(frame = stats.frames, error = %e, "Presentation failed");
                } else {
                    warn!(frame = stats.frames, error = %e, "Presentation failed, still rendering");
                    failing = true;
                }
            }
        }

        stats.frames += 1;
        pacer.pace(frame_start);
    }

    stats
}
