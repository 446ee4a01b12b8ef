//! Fixed-cadence frame loop.

use std::time::{Duration, Instant};

use court_renderer::FrameRenderer;

use crate::app::{AppContext, ViewerError};

/// Drives `tick` at a steady rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    interval: Duration,
    max_frames: Option<u64>,
}

impl FrameLoop {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            max_frames: None,
        }
    }

    /// Stop after `frames` ticks even if the viewer keeps running.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tick until the context stops running. Returns the frames rendered.
    pub fn run<R: FrameRenderer>(&self, ctx: &mut AppContext<R>) -> Result<u64, ViewerError> {
        let mut frames = 0;
        let mut window_start = Instant::now();
        let mut window_frames = 0u32;

        while ctx.is_running() && self.max_frames.is_none_or(|max| frames < max) {
            let start = Instant::now();
            let stats = ctx.tick()?;
            frames += 1;
            window_frames += 1;

            let elapsed = window_start.elapsed();
            if elapsed >= Duration::from_secs(1) {
                let textures = ctx.textures().counts();
                tracing::debug!(
                    fps = window_frames as f32 / elapsed.as_secs_f32(),
                    draw_calls = stats.draw_calls,
                    textures_pending = textures.pending,
                    textures_failed = textures.failed,
                    "Frame loop"
                );
                window_start = Instant::now();
                window_frames = 0;
            }

            if let Some(remaining) = self.interval.checked_sub(start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        tracing::info!(frames, "Frame loop stopped");
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::input::KeyEvent;

    #[test]
    fn test_stops_at_max_frames() {
        let mut ctx = AppContext::headless(AppConfig::new()).unwrap();
        let frames = FrameLoop::new(1000).with_max_frames(3).run(&mut ctx).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(ctx.renderer().frames_rendered(), 3);
        assert!(ctx.is_running());
    }

    #[test]
    fn test_stops_on_quit() {
        let mut ctx = AppContext::headless(AppConfig::new()).unwrap();
        ctx.input().push(KeyEvent::new('q'));
        let frames = FrameLoop::new(1000).with_max_frames(100).run(&mut ctx).unwrap();
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_interval() {
        assert_eq!(FrameLoop::new(50).interval(), Duration::from_millis(20));
        assert_eq!(FrameLoop::new(0).interval(), Duration::from_secs(1));
    }
}
