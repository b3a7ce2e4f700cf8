//! Display refresh-rate requests for the chosen playlist.
use crate::types::FrameRate;
use std::path::Path;

impl FrameRate {
    /// The frame rate in frames per second, `None` if unknown.
    pub fn fps(self) -> Option<f64> {
        match self {
            FrameRate::Fps59_94 => Some(59.94),
            FrameRate::Fps50 => Some(50.0),
            FrameRate::Fps29_97 => Some(29.97),
            FrameRate::Fps25 => Some(25.0),
            FrameRate::Fps24 => Some(24.0),
            FrameRate::Fps23_976 => Some(23.976),
            FrameRate::Unknown => None,
        }
    }
}

/// Switches the display to a refresh rate matching the content.
///
/// Implemented by the host; this crate only decides when to ask.
pub trait RefreshRateChanger {
    fn change_refresh_rate(&self, fps: f64, path: &Path);
}

/// Never changes anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRefreshRateChange;

impl RefreshRateChanger for NoRefreshRateChange {
    fn change_refresh_rate(&self, _fps: f64, _path: &Path) {}
}

/// Asks `changer` for a refresh-rate switch if `frame_rate` is known.
///
/// Returns the requested rate.
pub fn request_refresh_rate(
    frame_rate: Option<FrameRate>,
    path: &Path,
    changer: &dyn RefreshRateChanger,
) -> Option<f64> {
    let fps = frame_rate.and_then(FrameRate::fps)?;
    tracing::debug!("Initiating refresh rate change: {}", fps);
    changer.change_refresh_rate(fps, path);
    Some(fps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<f64>>);

    impl RefreshRateChanger for Recorder {
        fn change_refresh_rate(&self, fps: f64, _path: &Path) {
            self.0.borrow_mut().push(fps);
        }
    }

    #[test]
    fn table() {
        assert_eq!(FrameRate::Fps29_97.fps(), Some(29.97));
        assert_eq!(FrameRate::Fps23_976.fps(), Some(23.976));
        assert_eq!(FrameRate::Fps59_94.fps(), Some(59.94));
        assert_eq!(FrameRate::Fps50.fps(), Some(50.0));
        assert_eq!(FrameRate::Fps25.fps(), Some(25.0));
        assert_eq!(FrameRate::Fps24.fps(), Some(24.0));
        assert_eq!(FrameRate::Unknown.fps(), None);
    }

    #[test]
    fn unknown_rate_issues_no_request() {
        let recorder = Recorder::default();
        let path = Path::new("/disc/BDMV/PLAYLIST/00800.mpls");

        assert_eq!(request_refresh_rate(Some(FrameRate::Unknown), path, &recorder), None);
        assert_eq!(request_refresh_rate(None, path, &recorder), None);
        assert!(recorder.0.borrow().is_empty());

        assert_eq!(
            request_refresh_rate(Some(FrameRate::Fps29_97), path, &recorder),
            Some(29.97)
        );
        assert_eq!(*recorder.0.borrow(), vec![29.97]);
    }
}
