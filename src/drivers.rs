// Capabilities the controller consumes: view, media, fullscreen, timers.
// The browser binding implements these over web-sys; tests use recording fakes.

use crate::error::Result;
use crate::types::{Timestamp, TimerHandle, TimerKind};

/// Applies controller state to whatever draws the slides.
pub trait ViewRenderer {
    /// Mark `index` active and every other slide hidden.
    fn set_active(&mut self, index: usize);
    fn set_indicator(&mut self, index: usize, selected: bool);
    fn set_counter_text(&mut self, text: &str);
    /// Progress bar width, 0.0 to 100.0.
    fn set_progress(&mut self, percent: f64);
    /// Play/pause affordance: `true` shows "pause".
    fn set_playing(&mut self, playing: bool);
}

/// The video element on the video slide.
///
/// `play` may complete asynchronously; a driver reports late failures through its own log.
/// An `Err` here means the request was refused outright.
pub trait MediaDriver {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn is_paused(&self) -> bool;
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
}

pub trait FullscreenDriver {
    fn is_fullscreen(&self) -> bool;
    fn request_enter(&mut self) -> Result<()>;
    fn request_exit(&mut self) -> Result<()>;
}

/// Recurring timers plus the clock they are measured against.
///
/// A started timer must deliver `Slideshow::on_timer(kind)` every `period_ms` until cancelled.
pub trait TimerDriver {
    fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle>;
    fn cancel(&mut self, handle: TimerHandle);
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;

    use super::*;
    use crate::error::SlideshowError;

    #[derive(Debug, Default)]
    pub struct RecordingView {
        pub active: Option<usize>,
        pub indicators: HashMap<usize, bool>,
        pub counter: String,
        pub progress: Vec<f64>,
        pub playing: bool,
    }

    impl RecordingView {
        pub fn last_progress(&self) -> Option<f64> {
            self.progress.last().copied()
        }
    }

    impl ViewRenderer for RecordingView {
        fn set_active(&mut self, index: usize) {
            self.active = Some(index);
        }

        fn set_indicator(&mut self, index: usize, selected: bool) {
            self.indicators.insert(index, selected);
        }

        fn set_counter_text(&mut self, text: &str) {
            self.counter = text.to_string();
        }

        fn set_progress(&mut self, percent: f64) {
            self.progress.push(percent);
        }

        fn set_playing(&mut self, playing: bool) {
            self.playing = playing;
        }
    }

    #[derive(Debug)]
    pub struct FakeMedia {
        pub paused: bool,
        pub time: f64,
        pub block_play: bool,
        pub fail_pause: bool,
        pub play_calls: usize,
        pub pause_calls: usize,
        pub seeks: Vec<f64>,
    }

    impl Default for FakeMedia {
        fn default() -> Self {
            FakeMedia {
                paused: true,
                time: 0.0,
                block_play: false,
                fail_pause: false,
                play_calls: 0,
                pause_calls: 0,
                seeks: Vec::new(),
            }
        }
    }

    impl MediaDriver for FakeMedia {
        fn play(&mut self) -> Result<()> {
            self.play_calls += 1;
            if self.block_play {
                return Err(SlideshowError::PlaybackBlocked("NotAllowedError".to_string()));
            }
            self.paused = false;
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.pause_calls += 1;
            if self.fail_pause {
                return Err(SlideshowError::PlaybackBlocked("pause rejected".to_string()));
            }
            self.paused = true;
            Ok(())
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn current_time(&self) -> f64 {
            self.time
        }

        fn set_current_time(&mut self, secs: f64) {
            self.seeks.push(secs);
            self.time = secs;
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeFullscreen {
        pub active: bool,
        pub deny: bool,
        pub enter_calls: usize,
        pub exit_calls: usize,
    }

    impl FullscreenDriver for FakeFullscreen {
        fn is_fullscreen(&self) -> bool {
            self.active
        }

        fn request_enter(&mut self) -> Result<()> {
            self.enter_calls += 1;
            if self.deny {
                return Err(SlideshowError::FullscreenDenied("permission denied".to_string()));
            }
            self.active = true;
            Ok(())
        }

        fn request_exit(&mut self) -> Result<()> {
            self.exit_calls += 1;
            self.active = false;
            Ok(())
        }
    }

    /// Manual clock plus a table of live intervals.
    #[derive(Debug, Default)]
    pub struct FakeTimers {
        pub now_us: u64,
        next_id: i32,
        pub live: HashMap<TimerHandle, (TimerKind, u32)>,
        pub started: usize,
        pub cancelled: usize,
    }

    impl FakeTimers {
        pub fn live_of(&self, kind: TimerKind) -> usize {
            self.live.values().filter(|(k, _)| *k == kind).count()
        }

        pub fn advance_ms(&mut self, ms: u64) {
            self.now_us += ms * 1000;
        }
    }

    impl TimerDriver for FakeTimers {
        fn start_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle> {
            self.next_id += 1;
            self.started += 1;
            let handle = TimerHandle::new(self.next_id);
            self.live.insert(handle, (kind, period_ms));
            Some(handle)
        }

        fn cancel(&mut self, handle: TimerHandle) {
            if self.live.remove(&handle).is_some() {
                self.cancelled += 1;
            }
        }

        fn now(&self) -> Timestamp {
            Timestamp::from_micros(self.now_us)
        }
    }
}
