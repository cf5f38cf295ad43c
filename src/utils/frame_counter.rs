use std::collections::VecDeque;
use std::time::Duration;

const DEFAULT_RUNNING_SIZE: usize = 60;

/// Rolling average over the last frame times.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    frame_times: VecDeque<f32>,
    total_frames: u64,
}

impl FrameCounter {
    pub fn new_frame(&mut self, delta_time: f32) {
        if self.frame_times.len() >= DEFAULT_RUNNING_SIZE {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta_time);
        self.total_frames += 1;
    }

    pub fn new_frame_from_delta(&mut self, delta: Duration) {
        self.new_frame(delta.as_secs_f32());
    }

    pub fn mean_delta_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> u32 {
        let mean = self.mean_delta_time();
        if mean <= 0.0 {
            return 0;
        }
        (1.0 / mean) as u32
    }

    /// Frames counted since creation, including ones that fell out of the window.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}
