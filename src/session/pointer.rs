//! Pointer event handling for the session.

use super::CaptureSession;
use crate::draw::Annotation;
use crate::util;

impl CaptureSession {
    /// Handles a pointer press at raw host coordinates (canvas-local,
    /// but possibly out of bounds or non-finite).
    ///
    /// Pressing while text entry is open commits the pending text first
    /// (focus loss), then the press starts the next interaction. Counter
    /// bubbles commit immediately; the text tool opens text entry; every
    /// other tool starts a drag gesture.
    pub fn on_pointer_press(&mut self, x: f64, y: f64) {
        let (x, y) = util::clamp_point(x, y, self.canvas.width(), self.canvas.height());

        if self.gesture.is_text_entry() {
            self.commit_pending_text();
        }

        let tool = self.tool;
        if tool.commits_on_press() {
            let number = self.take_counter();
            let annotation = Annotation::CounterBubble {
                x,
                y,
                number,
                color: self.style.color,
                radius: self.style.counter_radius(),
                font: self.style.font.clone(),
            };
            self.canvas.append(annotation);
        } else if tool.is_text() {
            self.gesture.begin_text(self.style.clone(), x, y);
        } else {
            self.gesture.begin(tool, self.style.clone(), x, y);
        }
    }

    /// Handles pointer motion. Only an active drag cares.
    pub fn on_pointer_motion(&mut self, x: f64, y: f64) {
        let (x, y) = util::clamp_point(x, y, self.canvas.width(), self.canvas.height());
        self.gesture.update(x, y);
    }

    /// Handles pointer release, committing whatever the gesture produced.
    pub fn on_pointer_release(&mut self) {
        if let Some(annotation) = self.gesture.end(&self.canvas) {
            self.canvas.append(annotation);
        }
    }
}
