//! Frame acquisition port.

use std::collections::VecDeque;

use crate::errors::VisualError;
use crate::models::Frame;

/// Produces the frames the agent perceives. A platform backend wraps a
/// screen grabber; tests feed scripted frames.
pub trait FrameSource {
    fn capture(&mut self) -> Result<Frame, VisualError>;
}

/// [`FrameSource`] that replays a fixed sequence of frames, repeating the
/// final frame once the script runs out.
pub struct ScriptedFrameSource {
    pending: VecDeque<Frame>,
    last: Option<Frame>,
}

impl ScriptedFrameSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
            last: None,
        }
    }
}

impl FrameSource for ScriptedFrameSource {
    fn capture(&mut self) -> Result<Frame, VisualError> {
        if let Some(frame) = self.pending.pop_front() {
            self.last = Some(frame.clone());
            return Ok(frame);
        }
        self.last
            .clone()
            .ok_or_else(|| VisualError::CaptureFailed("scripted source is empty".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_scripted_source_repeats_last_frame() {
        let a = Frame::solid(2, 2, Rgba([0, 0, 0, 255]));
        let b = Frame::solid(4, 4, Rgba([255, 255, 255, 255]));
        let mut source = ScriptedFrameSource::new([a, b]);

        assert_eq!(source.capture().unwrap().width(), 2);
        assert_eq!(source.capture().unwrap().width(), 4);
        assert_eq!(source.capture().unwrap().width(), 4);
    }

    #[test]
    fn test_empty_script_is_a_capture_failure() {
        let mut source = ScriptedFrameSource::new([]);
        assert!(matches!(
            source.capture(),
            Err(VisualError::CaptureFailed(_))
        ));
    }
}
