//! Interactive region selection.
//!
//! The selector runs before any annotation exists: the user drags out a
//! screen rectangle, and committing it captures the pixels and opens a
//! [`CaptureSession`]. Actual pixel grabbing is behind the
//! [`CaptureProvider`] trait so the engine never talks to a compositor
//! directly and tests can substitute a fake.

use thiserror::Error;

use crate::config::Config;
use crate::image::Pixmap;
use crate::session::CaptureSession;
use crate::util::{self, Rect};

/// Errors surfaced by a capture backend.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No backend is available (e.g. no screenshot portal on this system).
    #[error("capture backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the capture.
    #[error("screen capture permission denied")]
    PermissionDenied,

    /// The backend failed mid-capture.
    #[error("capture failed: {0}")]
    Backend(String),

    /// `commit` was called without a completed selection.
    #[error("no selection to commit")]
    NoSelection,
}

/// Source of captured screen pixels.
pub trait CaptureProvider {
    /// Grabs the pixels of the given screen rectangle.
    fn capture_region(&self, rect: Rect) -> Result<Pixmap, CaptureError>;
}

/// Where the selector is in its lifecycle.
///
/// `Committed` and `Cancelled` are terminal; a selector in a terminal
/// state ignores all further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// Waiting for the first press.
    Idle,
    /// Dragging out a rectangle.
    Selecting {
        anchor: (i32, i32),
        current: (i32, i32),
    },
    /// Drag finished; the rectangle can be committed or replaced.
    Selected { rect: Rect },
    /// A session was created from the selection.
    Committed,
    /// Selection was abandoned.
    Cancelled,
}

/// Region-selection state machine over a fixed screen size.
#[derive(Debug)]
pub struct RegionSelector {
    screen_width: i32,
    screen_height: i32,
    state: SelectorState,
}

impl RegionSelector {
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width: screen_width.max(1),
            screen_height: screen_height.max(1),
            state: SelectorState::Idle,
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            SelectorState::Committed | SelectorState::Cancelled
        )
    }

    /// Starts a drag. A press while a completed selection exists replaces
    /// it; a press during an active drag is ignored.
    pub fn press(&mut self, x: f64, y: f64) {
        if self.is_terminal() {
            return;
        }
        if let SelectorState::Selecting { .. } = self.state {
            log::warn!("Ignoring press during an active selection drag");
            return;
        }

        let point = util::clamp_point(x, y, self.screen_width, self.screen_height);
        self.state = SelectorState::Selecting {
            anchor: point,
            current: point,
        };
    }

    /// Updates the drag preview. Coordinates are clamped to the screen.
    pub fn motion(&mut self, x: f64, y: f64) {
        if let SelectorState::Selecting { current, .. } = &mut self.state {
            *current = util::clamp_point(x, y, self.screen_width, self.screen_height);
        }
    }

    /// Ends the drag. A zero-area drag cancels the selector outright.
    pub fn release(&mut self) {
        if let SelectorState::Selecting { anchor, current } = self.state {
            match Rect::from_corners(anchor.0, anchor.1, current.0, current.1) {
                Some(rect) => {
                    self.state = SelectorState::Selected { rect };
                }
                None => {
                    log::debug!("Zero-area selection, cancelling");
                    self.state = SelectorState::Cancelled;
                }
            }
        }
    }

    /// The rectangle to highlight while selecting, if the drag currently
    /// spans any area.
    pub fn preview_rect(&self) -> Option<Rect> {
        match self.state {
            SelectorState::Selecting { anchor, current } => {
                Rect::from_corners(anchor.0, anchor.1, current.0, current.1)
            }
            SelectorState::Selected { rect } => Some(rect),
            _ => None,
        }
    }

    /// Abandons the selection from any non-terminal state.
    pub fn cancel(&mut self) {
        if !self.is_terminal() {
            self.state = SelectorState::Cancelled;
        }
    }

    /// Captures the selected region and opens an annotation session.
    ///
    /// On backend failure the selection is kept, so the caller may retry
    /// or cancel. On success the selector is `Committed` and done.
    pub fn commit(
        &mut self,
        provider: &dyn CaptureProvider,
        config: &Config,
    ) -> Result<CaptureSession, CaptureError> {
        let SelectorState::Selected { rect } = self.state else {
            return Err(CaptureError::NoSelection);
        };

        let base = provider.capture_region(rect).inspect_err(|err| {
            log::error!("Region capture failed: {err}");
        })?;

        self.state = SelectorState::Committed;
        log::info!(
            "Captured {}x{} region at ({}, {})",
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
        Ok(CaptureSession::new(base, rect, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::WHITE;

    struct FakeProvider;

    impl CaptureProvider for FakeProvider {
        fn capture_region(&self, rect: Rect) -> Result<Pixmap, CaptureError> {
            Ok(Pixmap::solid(rect.width, rect.height, WHITE))
        }
    }

    struct FailingProvider;

    impl CaptureProvider for FailingProvider {
        fn capture_region(&self, _rect: Rect) -> Result<Pixmap, CaptureError> {
            Err(CaptureError::Unavailable("no backend".to_string()))
        }
    }

    #[test]
    fn drag_produces_a_normalized_selection() {
        let mut selector = RegionSelector::new(1920, 1080);
        selector.press(500.0, 400.0);
        selector.motion(100.0, 150.0);
        selector.release();

        assert_eq!(
            selector.state(),
            SelectorState::Selected {
                rect: Rect::new(100, 150, 400, 250).unwrap()
            }
        );
    }

    #[test]
    fn zero_drag_cancels() {
        let mut selector = RegionSelector::new(1920, 1080);
        selector.press(300.0, 300.0);
        selector.release();
        assert_eq!(selector.state(), SelectorState::Cancelled);
    }

    #[test]
    fn preview_is_clamped_to_the_screen() {
        let mut selector = RegionSelector::new(800, 600);
        selector.press(100.0, 100.0);
        selector.motion(5000.0, -50.0);

        let rect = selector.preview_rect().unwrap();
        assert_eq!(rect, Rect::new(100, 0, 699, 100).unwrap());
    }

    #[test]
    fn commit_captures_and_terminates() {
        let mut selector = RegionSelector::new(1920, 1080);
        selector.press(10.0, 10.0);
        selector.motion(110.0, 90.0);
        selector.release();

        let config = Config::default();
        let session = selector.commit(&FakeProvider, &config).unwrap();
        assert_eq!(session.canvas().width(), 100);
        assert_eq!(session.canvas().height(), 80);
        assert_eq!(selector.state(), SelectorState::Committed);

        // Terminal states are sticky.
        selector.press(0.0, 0.0);
        assert_eq!(selector.state(), SelectorState::Committed);
        assert!(matches!(
            selector.commit(&FakeProvider, &config),
            Err(CaptureError::NoSelection)
        ));
    }

    #[test]
    fn failed_capture_keeps_the_selection_for_retry() {
        let mut selector = RegionSelector::new(1920, 1080);
        selector.press(0.0, 0.0);
        selector.motion(50.0, 50.0);
        selector.release();

        let config = Config::default();
        assert!(matches!(
            selector.commit(&FailingProvider, &config),
            Err(CaptureError::Unavailable(_))
        ));
        assert!(matches!(selector.state(), SelectorState::Selected { .. }));

        assert!(selector.commit(&FakeProvider, &config).is_ok());
    }

    #[test]
    fn commit_without_selection_is_rejected() {
        let mut selector = RegionSelector::new(1920, 1080);
        assert!(matches!(
            selector.commit(&FakeProvider, &Config::default()),
            Err(CaptureError::NoSelection)
        ));
    }

    #[test]
    fn cancel_is_sticky() {
        let mut selector = RegionSelector::new(1920, 1080);
        selector.press(10.0, 10.0);
        selector.cancel();
        assert_eq!(selector.state(), SelectorState::Cancelled);

        selector.press(20.0, 20.0);
        selector.release();
        assert_eq!(selector.state(), SelectorState::Cancelled);
    }

    #[test]
    fn non_finite_pointer_input_is_sanitized() {
        let mut selector = RegionSelector::new(800, 600);
        selector.press(f64::NAN, 100.0);
        selector.motion(200.0, f64::INFINITY);
        selector.release();

        assert_eq!(
            selector.state(),
            SelectorState::Selected {
                rect: Rect::new(0, 100, 200, 499).unwrap()
            }
        );
    }
}
