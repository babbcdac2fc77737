// Video-slide state machine. Normal <-> VideoActive, with the pre-video autoplay flag carried
// by the VideoActive state so that leaving it consumes the flag.

use serde::{Deserialize, Serialize};

/// Where the slideshow stands relative to the video slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VideoPhase {
    #[default]
    Normal,
    /// On the video slide. `resume_autoplay` is the override flag.
    VideoActive { resume_autoplay: bool },
}

/// Side effects the controller must run for a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoTransition {
    /// Normal -> VideoActive: stop autoplay if `stop_autoplay`, rewind, play.
    Enter { stop_autoplay: bool },
    /// VideoActive -> VideoActive: same entry actions, flag kept.
    Reenter { stop_autoplay: bool },
    /// VideoActive -> Normal: pause, then resume autoplay if the flag was set.
    Exit { resume_autoplay: bool },
}

impl VideoPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, VideoPhase::VideoActive { .. })
    }

    pub fn resume_autoplay(&self) -> bool {
        matches!(
            self,
            VideoPhase::VideoActive {
                resume_autoplay: true
            }
        )
    }

    /// Advance the machine for a refresh that lands on (or off) the video slide.
    /// `autoplay` is the autoplay flag at the moment of the refresh.
    pub fn sync(&mut self, on_video: bool, autoplay: bool) -> Option<VideoTransition> {
        match (*self, on_video) {
            (VideoPhase::Normal, false) => None,
            (VideoPhase::Normal, true) => {
                *self = VideoPhase::VideoActive {
                    resume_autoplay: autoplay,
                };
                Some(VideoTransition::Enter {
                    stop_autoplay: autoplay,
                })
            }
            (VideoPhase::VideoActive { resume_autoplay }, true) => {
                *self = VideoPhase::VideoActive {
                    resume_autoplay: resume_autoplay || autoplay,
                };
                Some(VideoTransition::Reenter {
                    stop_autoplay: autoplay,
                })
            }
            (VideoPhase::VideoActive { resume_autoplay }, false) => {
                *self = VideoPhase::Normal;
                Some(VideoTransition::Exit { resume_autoplay })
            }
        }
    }
}
