// Strong typing over strings. Newtypes for timestamps and timer handles, plus the JSON config.
// Everything here crosses the JS boundary, so it all derives serde.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlideshowError};

/// Timestamp in microseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    /// Browser clocks report fractional milliseconds; negative or NaN input maps to zero.
    pub fn from_millis(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Timestamp((ms * 1000.0).round() as u64)
        } else {
            Timestamp(0)
        }
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Microseconds elapsed since `earlier`, zero if the clock went backwards.
    pub fn micros_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Opaque handle returned by a timer driver (the `setInterval` id in the browser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(i32);

impl TimerHandle {
    pub fn new(id: i32) -> Self {
        TimerHandle(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }
}

/// The two recurring timers a slideshow may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Advances to the next slide every autoplay interval.
    Advance,
    /// Samples elapsed time for the progress bar.
    Progress,
}

/// A touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        TouchPoint { x, y }
    }
}

/// Outcome of a recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Finger moved left.
    Next,
    /// Finger moved right.
    Prev,
}

/// Keys the slideshow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Fullscreen,
    Home,
    End,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            " " | "Spacebar" => Key::Space,
            "f" | "F" => Key::Fullscreen,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => Key::Other,
        }
    }
}

/// Any input the slideshow can receive, for hosts that forward events uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Input {
    Next,
    Prev,
    GoTo { index: i64 },
    ToggleAutoplay,
    ToggleFullscreen,
    Key { key: Key, default_prevented: bool },
    TouchStart { touches: Vec<TouchPoint> },
    TouchEnd { point: TouchPoint },
    Timer { kind: TimerKind },
    VideoEnded,
}

/// Element ids used by the browser binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomIds {
    pub slides: String,
    pub prev_button: String,
    pub next_button: String,
    pub play_button: String,
    pub fullscreen_button: String,
    pub counter: String,
    pub dots: String,
    pub progress_bar: String,
    pub presentation: String,
    pub video: String,
}

impl Default for DomIds {
    fn default() -> Self {
        DomIds {
            slides: "slides".to_string(),
            prev_button: "btnPrev".to_string(),
            next_button: "btnNext".to_string(),
            play_button: "btnPlay".to_string(),
            fullscreen_button: "btnFullscreen".to_string(),
            counter: "counter".to_string(),
            dots: "dots".to_string(),
            progress_bar: "progressBar".to_string(),
            presentation: "presentation".to_string(),
            video: "videoSlide5".to_string(),
        }
    }
}

/// Slideshow configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideshowConfig {
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    /// Time between automatic advances (milliseconds).
    #[serde(default = "default_autoplay_interval")]
    pub autoplay_interval_ms: u32,
    /// Progress bar sampling period (milliseconds).
    #[serde(default = "default_progress_tick")]
    pub progress_tick_ms: u32,
    /// Minimum horizontal travel for a swipe, in client pixels.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Zero-based index of the video slide, if any.
    #[serde(default = "default_video_slide")]
    pub video_slide: Option<usize>,
    /// Playback position drift (seconds) past which the video is rewound on entry.
    #[serde(default = "default_rewind_tolerance")]
    pub rewind_tolerance_secs: f64,
    #[serde(default)]
    pub autoplay_on_start: bool,
    #[serde(default)]
    pub dom: DomIds,
}

fn default_slide_count() -> usize {
    7
}

fn default_autoplay_interval() -> u32 {
    5000
}

fn default_progress_tick() -> u32 {
    100
}

fn default_swipe_threshold() -> f64 {
    40.0
}

fn default_video_slide() -> Option<usize> {
    Some(4) // fifth slide
}

fn default_rewind_tolerance() -> f64 {
    0.05
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        SlideshowConfig {
            slide_count: default_slide_count(),
            autoplay_interval_ms: default_autoplay_interval(),
            progress_tick_ms: default_progress_tick(),
            swipe_threshold: default_swipe_threshold(),
            video_slide: default_video_slide(),
            rewind_tolerance_secs: default_rewind_tolerance(),
            autoplay_on_start: false,
            dom: DomIds::default(),
        }
    }
}

impl SlideshowConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SlideshowConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slide_count == 0 {
            return Err(SlideshowError::InvalidConfig(
                "slide_count must be at least 1".to_string(),
            ));
        }
        if self.autoplay_interval_ms == 0 || self.progress_tick_ms == 0 {
            return Err(SlideshowError::InvalidConfig(
                "autoplay_interval_ms and progress_tick_ms must be positive".to_string(),
            ));
        }
        if let Some(video) = self.video_slide {
            if video >= self.slide_count {
                return Err(SlideshowError::InvalidConfig(format!(
                    "video_slide {} out of range for {} slides",
                    video, self.slide_count
                )));
            }
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
            return Err(SlideshowError::InvalidConfig(
                "swipe_threshold must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_video_slide(&self, index: usize) -> bool {
        self.video_slide == Some(index)
    }
}

/// Snapshot of controller state returned to JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideshowState {
    pub index: usize,
    pub total: usize,
    pub autoplay: bool,
    pub video_active: bool,
    pub resume_autoplay_after_video: bool,
    pub progress_running: bool,
}
