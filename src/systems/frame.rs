//! Frame timing
//!
//! Measures how long each frame takes and logs a summary once per second.

use std::time::{Duration, Instant};
use quadview_render::FrameStats;

/// Aggregated timings over one reporting interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub frames: u32,
    pub average_frame_ms: f32,
    pub triangles_per_frame: usize,
}

impl FrameSummary {
    pub fn fps(&self) -> f32 {
        if self.average_frame_ms > 0.0 {
            1000.0 / self.average_frame_ms
        } else {
            0.0
        }
    }
}

/// Tracks per-frame timing
pub struct FrameSystem {
    interval: Duration,
    last_frame: Instant,
    elapsed: Duration,
    frames: u32,
    triangles: usize,
}

impl Default for FrameSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSystem {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Instant::now(),
            elapsed: Duration::ZERO,
            frames: 0,
            triangles: 0,
        }
    }

    /// Mark the end of a frame and log when an interval completes
    pub fn end_frame(&mut self, stats: &FrameStats) -> Option<FrameSummary> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        let summary = self.record(dt, stats.triangles)?;
        log::debug!(
            "{} frames, {:.2} ms/frame ({:.0} fps), {} triangles/frame",
            summary.frames,
            summary.average_frame_ms,
            summary.fps(),
            summary.triangles_per_frame
        );
        Some(summary)
    }

    /// Accumulate one frame of `dt`; returns a summary once `interval` has passed
    pub fn record(&mut self, dt: Duration, triangles: usize) -> Option<FrameSummary> {
        self.elapsed += dt;
        self.frames += 1;
        self.triangles += triangles;

        if self.elapsed < self.interval {
            return None;
        }

        let summary = FrameSummary {
            frames: self.frames,
            average_frame_ms: self.elapsed.as_secs_f32() * 1000.0 / self.frames as f32,
            triangles_per_frame: self.triangles / self.frames as usize,
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.triangles = 0;
        Some(summary)
    }
}
