// Slideshow controller: slide index, autoplay + progress timers, video-slide override.
// Every transition runs to completion on &mut self; drivers are called, never awaited.

use log::{debug, warn};

use crate::drivers::{FullscreenDriver, MediaDriver, TimerDriver, ViewRenderer};
use crate::error::Result;
use crate::gesture::SwipeTracker;
use crate::navigation::{counter_text, wrap_index};
use crate::progress::ProgressRun;
use crate::types::*;
use crate::video::{VideoPhase, VideoTransition};

/// Owns all slideshow state and drives the view, media, fullscreen and timer drivers.
pub struct Slideshow<V, M, F, T> {
    config: SlideshowConfig,
    index: usize,
    autoplay: bool,
    advance_timer: Option<TimerHandle>,
    progress: Option<ProgressRun>,
    video: VideoPhase,
    swipe: SwipeTracker,
    view: V,
    media: Option<M>,
    fullscreen: F,
    timers: T,
}

impl<V, M, F, T> Slideshow<V, M, F, T>
where
    V: ViewRenderer,
    M: MediaDriver,
    F: FullscreenDriver,
    T: TimerDriver,
{
    /// Build a controller on slide 0 with autoplay off. Nothing is rendered until `init`.
    pub fn new(
        config: SlideshowConfig,
        view: V,
        media: Option<M>,
        fullscreen: F,
        timers: T,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Slideshow {
            swipe: SwipeTracker::new(config.swipe_threshold),
            config,
            index: 0,
            autoplay: false,
            advance_timer: None,
            progress: None,
            video: VideoPhase::Normal,
            view,
            media,
            fullscreen,
            timers,
        })
    }

    /// First render, then autoplay if configured.
    pub fn init(&mut self) {
        self.view.set_playing(false);
        self.refresh();
        if self.config.autoplay_on_start {
            self.start_autoplay();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.config.slide_count
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn video_phase(&self) -> VideoPhase {
        self.video
    }

    pub fn config(&self) -> &SlideshowConfig {
        &self.config
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn state(&self) -> SlideshowState {
        SlideshowState {
            index: self.index,
            total: self.total(),
            autoplay: self.autoplay,
            video_active: self.video.is_active(),
            resume_autoplay_after_video: self.video.resume_autoplay(),
            progress_running: self.progress.is_some(),
        }
    }

    fn on_video_slide(&self) -> bool {
        self.config.is_video_slide(self.index)
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    pub fn go_to(&mut self, target: i64) {
        self.index = wrap_index(target, self.total());
        debug!("slide {} of {}", self.index + 1, self.total());
        self.refresh();
        if self.autoplay {
            self.restart_progress();
        }
    }

    pub fn next(&mut self) {
        self.go_to(self.index as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.index as i64 - 1);
    }

    /// Push the current index to the view and settle video/progress state.
    pub fn refresh(&mut self) {
        self.view.set_active(self.index);
        for i in 0..self.total() {
            self.view.set_indicator(i, i == self.index);
        }
        self.view.set_counter_text(&counter_text(self.index, self.total()));

        self.sync_video();

        if !self.autoplay || self.on_video_slide() {
            self.view.set_progress(0.0);
            self.cancel_progress();
        }
    }

    // ---------------------------------------------------------------------
    // Video slide
    // ---------------------------------------------------------------------

    fn sync_video(&mut self) {
        if self.media.is_none() {
            return;
        }
        let on_video = self.on_video_slide();
        match self.video.sync(on_video, self.autoplay) {
            None => {}
            Some(VideoTransition::Enter { stop_autoplay })
            | Some(VideoTransition::Reenter { stop_autoplay }) => {
                debug!(
                    "entering video slide (resume autoplay later: {})",
                    self.video.resume_autoplay()
                );
                if stop_autoplay {
                    self.stop_autoplay();
                }
                self.view.set_progress(0.0);
                self.start_video();
            }
            Some(VideoTransition::Exit { resume_autoplay }) => {
                debug!("leaving video slide (resume autoplay: {})", resume_autoplay);
                self.halt_video();
                if resume_autoplay {
                    self.start_autoplay();
                }
            }
        }
    }

    fn start_video(&mut self) {
        let tolerance = self.config.rewind_tolerance_secs;
        if let Some(media) = self.media.as_mut() {
            if media.current_time().abs() > tolerance {
                media.set_current_time(0.0);
            }
            if let Err(e) = media.play() {
                // Left for the user to start manually.
                warn!("{}", e);
            }
        }
    }

    fn halt_video(&mut self) {
        if let Some(media) = self.media.as_mut() {
            if !media.is_paused() {
                if let Err(e) = media.pause() {
                    debug!("ignoring pause failure: {}", e);
                }
            }
        }
    }

    /// Media `ended` callback. Only meaningful while the video slide is showing.
    pub fn video_ended(&mut self) {
        if self.video.is_active() {
            self.next();
        } else {
            debug!("ignoring ended event outside the video slide");
        }
    }

    // ---------------------------------------------------------------------
    // Autoplay
    // ---------------------------------------------------------------------

    pub fn start_autoplay(&mut self) {
        self.autoplay = true;
        self.view.set_playing(true);
        if let Some(handle) = self.advance_timer.take() {
            self.timers.cancel(handle);
        }
        self.advance_timer = self
            .timers
            .start_interval(TimerKind::Advance, self.config.autoplay_interval_ms);
        self.restart_progress();
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay = false;
        self.view.set_playing(false);
        if let Some(handle) = self.advance_timer.take() {
            self.timers.cancel(handle);
        }
        self.view.set_progress(0.0);
        self.cancel_progress();
    }

    pub fn toggle_autoplay(&mut self) {
        if self.autoplay {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
    }

    /// Restart the progress bar from zero. Never runs on the video slide.
    pub fn restart_progress(&mut self) {
        if self.on_video_slide() {
            return;
        }
        self.cancel_progress();
        let started = self.timers.now();
        self.progress = self
            .timers
            .start_interval(TimerKind::Progress, self.config.progress_tick_ms)
            .map(|handle| ProgressRun::new(handle, started));
    }

    fn cancel_progress(&mut self) {
        if let Some(run) = self.progress.take() {
            self.timers.cancel(run.handle);
        }
    }

    /// Timer callback from the driver.
    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Advance => {
                if self.advance_timer.is_some() {
                    self.next();
                } else {
                    debug!("stale advance tick");
                }
            }
            TimerKind::Progress => self.sample_progress(),
        }
    }

    fn sample_progress(&mut self) {
        let Some(run) = self.progress else {
            debug!("stale progress tick");
            return;
        };
        let fraction = run.fraction_at(self.timers.now(), self.config.autoplay_interval_ms);
        self.view.set_progress(fraction * 100.0);
        if fraction >= 1.0 {
            self.cancel_progress();
        }
    }

    // ---------------------------------------------------------------------
    // Fullscreen
    // ---------------------------------------------------------------------

    pub fn toggle_fullscreen(&mut self) {
        let result = if self.fullscreen.is_fullscreen() {
            self.fullscreen.request_exit()
        } else {
            self.fullscreen.request_enter()
        };
        if let Err(e) = result {
            warn!("{}", e);
        }
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        self.swipe.touch_start(touches);
    }

    pub fn touch_end(&mut self, point: TouchPoint) {
        match self.swipe.touch_end(point) {
            Some(SwipeDirection::Next) => self.next(),
            Some(SwipeDirection::Prev) => self.prev(),
            None => {}
        }
    }

    /// Handle a key press. Returns `true` when the host should suppress the default action.
    pub fn key_down(&mut self, key: Key, default_prevented: bool) -> bool {
        if default_prevented {
            return false;
        }
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Space => {
                // Space belongs to the native video controls on the video slide.
                if !self.on_video_slide() {
                    self.toggle_autoplay();
                    return true;
                }
            }
            Key::Fullscreen => self.toggle_fullscreen(),
            Key::Home => self.go_to(0),
            Key::End => self.go_to(self.total() as i64 - 1),
            Key::Other => {}
        }
        false
    }

    /// Dispatch any input. Returns `true` when the host should suppress the default action.
    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Next => self.next(),
            Input::Prev => self.prev(),
            Input::GoTo { index } => self.go_to(index),
            Input::ToggleAutoplay => self.toggle_autoplay(),
            Input::ToggleFullscreen => self.toggle_fullscreen(),
            Input::Key {
                key,
                default_prevented,
            } => return self.key_down(key, default_prevented),
            Input::TouchStart { touches } => self.touch_start(&touches),
            Input::TouchEnd { point } => self.touch_end(point),
            Input::Timer { kind } => self.on_timer(kind),
            Input::VideoEnded => self.video_ended(),
        }
        false
    }
}
