// Touch swipe recognition.
// A swipe counts when horizontal travel beats both vertical travel and the threshold.

use crate::types::{SwipeDirection, TouchPoint};

/// Tracks one single-finger gesture between touch-start and touch-end.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<TouchPoint>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        SwipeTracker {
            threshold,
            start: None,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.start.is_some()
    }

    /// Record the start of a gesture. Multi-finger starts are ignored.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        if let [only] = touches {
            self.start = Some(*only);
        }
    }

    /// Finish the gesture and classify it.
    pub fn touch_end(&mut self, end: TouchPoint) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        classify(end.x - start.x, end.y - start.y, self.threshold)
    }
}

fn classify(dx: f64, dy: f64, threshold: f64) -> Option<SwipeDirection> {
    if dx.abs() > dy.abs() && dx.abs() > threshold {
        if dx < 0.0 {
            Some(SwipeDirection::Next)
        } else {
            Some(SwipeDirection::Prev)
        }
    } else {
        None
    }
}
