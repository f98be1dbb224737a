//! 帧时间统计

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// 帧时间数据
#[derive(Debug, Default, Clone)]
pub struct FrameTiming {
    last_frame: Option<Instant>,
    window_start: Option<Instant>,
    frames_in_window: u32,
    delta: f32,
    fps: u32,
    frame_id: u64,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录新的一帧
    ///
    /// 第一帧的间隔为 0；时钟回拨时间隔按 0 处理。
    pub fn tick(&mut self, now: Instant) {
        self.delta = self
            .last_frame
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.frame_id += 1;

        match self.window_start {
            None => {
                self.window_start = Some(now);
                self.frames_in_window = 1;
            }
            Some(start) if now.saturating_duration_since(start) >= FPS_WINDOW => {
                self.fps = self.frames_in_window;
                self.window_start = Some(now);
                self.frames_in_window = 1;
            }
            Some(_) => self.frames_in_window += 1,
        }
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut timing = FrameTiming::new();
        timing.tick(Instant::now());
        assert_eq!(timing.delta(), 0.0);
        assert_eq!(timing.frame_id(), 1);
        assert_eq!(timing.fps(), 0);
    }

    #[test]
    fn test_delta_and_fps() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();

        // 0ms, 100ms, ..., 1000ms 共 11 帧；窗口内（1 秒前）有 10 帧
        for i in 0..=10u64 {
            timing.tick(start + Duration::from_millis(i * 100));
        }

        assert!((timing.delta() - 0.1).abs() < 0.001);
        assert_eq!(timing.fps(), 10);
        assert_eq!(timing.frame_id(), 11);
    }
}
