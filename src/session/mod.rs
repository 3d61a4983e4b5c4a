//! The annotation session: the root aggregate tying canvas, tools, and
//! input together.
//!
//! A [`CaptureSession`] is created from a committed region selection and
//! lives until the user saves, copies, or cancels. The host event loop
//! feeds it pointer and key events and blits the frames it renders;
//! everything else (gesture tracking, undo, counter numbering, shortcut
//! routing) happens in here.

mod pointer;
pub mod shortcuts;

#[cfg(test)]
mod tests;

pub use shortcuts::{Action, Key, KeyBinding, Modifiers, ShortcutMap};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::draw::Color;
use crate::image::Pixmap;
use crate::tools::{Gesture, ToolKind, ToolStyle};
use crate::util::Rect;

/// One capture-and-annotate session.
#[derive(Debug)]
pub struct CaptureSession {
    canvas: Canvas,
    tool: ToolKind,
    style: ToolStyle,
    gesture: Gesture,
    /// Next counter-bubble number. Monotonic for the whole session;
    /// undoing a bubble burns its number rather than reusing it.
    next_counter: u32,
    shortcuts: ShortcutMap,
}

impl CaptureSession {
    /// Wraps a captured region in a fresh session configured from the
    /// user's settings.
    pub fn new(base: Pixmap, region: Rect, config: &Config) -> Self {
        Self {
            canvas: Canvas::new(base, region, config.history.max_depth),
            tool: config.default_tool(),
            style: config.tool_style(),
            gesture: Gesture::default(),
            next_counter: 1,
            shortcuts: ShortcutMap::from_config(&config.keybindings),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switches the active tool. An in-flight gesture keeps the tool it
    /// started with.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool changed to {}", tool.name());
        self.tool = tool;
    }

    pub fn style(&self) -> &ToolStyle {
        &self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_thickness(&mut self, thickness: f64) {
        if !(1.0..=20.0).contains(&thickness) {
            log::warn!("Thickness {thickness:.1} out of range, clamping");
        }
        self.style.thickness = thickness.clamp(1.0, 20.0);
    }

    pub fn set_font_size(&mut self, size: f64) {
        if !(8.0..=72.0).contains(&size) {
            log::warn!("Font size {size:.1} out of range, clamping");
        }
        self.style.font_size = size.clamp(8.0, 72.0);
    }

    /// Number the next counter bubble will take.
    pub fn next_counter(&self) -> u32 {
        self.next_counter
    }

    pub(crate) fn take_counter(&mut self) -> u32 {
        let number = self.next_counter;
        self.next_counter += 1;
        number
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.canvas.redo()
    }

    /// Renders the frame the host should display: the committed canvas
    /// plus the in-flight gesture preview, if any.
    pub fn render_frame(&mut self) -> Pixmap {
        let preview = self.gesture.preview();
        self.canvas.render_with_preview(preview.as_ref())
    }

    /// Flattened committed state, as handed to the export module.
    pub fn flatten(&self) -> Pixmap {
        self.canvas.flatten()
    }

    pub(crate) fn commit_pending_text(&mut self) {
        if let Some(annotation) = self.gesture.commit_text() {
            self.canvas.append(annotation);
        }
    }

    /// Routes a key event.
    ///
    /// While text entry is active, keys edit the buffer (Return commits,
    /// Escape discards) and shortcuts are suppressed. Otherwise undo and
    /// redo are applied in place; save, copy, and cancel are returned for
    /// the host to act on. Escape first cancels an in-flight gesture and
    /// only reaches the host when there is nothing to abort locally.
    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) -> Option<Action> {
        if self.gesture.is_text_entry() {
            match key {
                Key::Return if !modifiers.ctrl && !modifiers.alt => self.commit_pending_text(),
                Key::Escape => self.gesture.cancel(),
                Key::Backspace => self.gesture.text_backspace(),
                Key::Char(c) if !modifiers.ctrl && !modifiers.alt => self.gesture.text_insert(c),
                _ => {}
            }
            return None;
        }

        match self.shortcuts.resolve(key, modifiers)? {
            Action::Undo => {
                if !self.canvas.undo() {
                    log::debug!("Nothing to undo");
                }
                None
            }
            Action::Redo => {
                if !self.canvas.redo() {
                    log::debug!("Nothing to redo");
                }
                None
            }
            Action::Cancel => {
                if self.gesture.is_idle() {
                    Some(Action::Cancel)
                } else {
                    self.gesture.cancel();
                    None
                }
            }
            action => Some(action),
        }
    }
}
