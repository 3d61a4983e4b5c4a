//! Layered composition of a captured image and its annotations.
//!
//! A [`Canvas`] owns the base capture and the z-ordered annotation list.
//! Composition never mutates the base: every render starts from a fresh
//! copy, rasterizes vector annotations in order, and pastes redaction
//! patches where they fall in that order. Rendering the same state twice
//! yields byte-identical output, so the result is cached until the next
//! mutation.

pub mod history;

use crate::draw::{Annotation, render};
use crate::image::{self, Pixmap};
use crate::util::Rect;
use history::History;

pub use history::HistoryEntry;

/// A base capture plus its annotation stack and edit history.
#[derive(Debug)]
pub struct Canvas {
    base: Pixmap,
    /// Where the capture came from, in screen coordinates. Annotation
    /// geometry is canvas-local (origin at this rect's top-left corner).
    region: Rect,
    annotations: Vec<Annotation>,
    history: History,
    render_cache: Option<Pixmap>,
}

impl Canvas {
    /// Wraps a captured image taken from `region` of the screen.
    /// `max_history` caps the undo depth (0 = unbounded).
    pub fn new(base: Pixmap, region: Rect, max_history: usize) -> Self {
        Self {
            base,
            region,
            annotations: Vec::new(),
            history: History::new(max_history),
            render_cache: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.base.width()
    }

    pub fn height(&self) -> i32 {
        self.base.height()
    }

    /// Screen-space origin of the capture.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// The untouched capture.
    pub fn base(&self) -> &Pixmap {
        &self.base
    }

    /// Committed annotations in z-order (oldest first).
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Commits an annotation on top of the stack and records it for undo.
    pub fn append(&mut self, annotation: Annotation) {
        let index = self.annotations.len();
        self.history.record(index, annotation.clone());
        self.annotations.push(annotation);
        self.render_cache = None;
        log::debug!("Committed annotation #{index}");
    }

    /// Removes the most recently committed annotation. Returns false if
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                let index = entry.index;
                self.annotations.remove(index);
                self.render_cache = None;
                log::debug!("Undo removed annotation #{index}");
                true
            }
            None => false,
        }
    }

    /// Reinstates the most recently undone annotation at its original
    /// position. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                let index = entry.index;
                let annotation = entry.annotation.clone();
                self.annotations.insert(index, annotation);
                self.render_cache = None;
                log::debug!("Redo reinstated annotation #{index}");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Renders the committed state, reusing the cached result when no
    /// mutation happened since the last call.
    pub fn render(&mut self) -> &Pixmap {
        if self.render_cache.is_none() {
            self.render_cache = Some(self.flatten());
        }
        self.render_cache.as_ref().unwrap()
    }

    /// Renders the committed state with a provisional annotation drawn on
    /// top. The committed state and its cache are untouched.
    pub fn render_with_preview(&mut self, preview: Option<&Annotation>) -> Pixmap {
        let mut out = self.render().clone();
        if let Some(preview) = preview {
            match preview.redaction_patch() {
                Some(patch) => {
                    image::flatten_patches(&mut out, std::slice::from_ref(&patch));
                }
                None => {
                    out.with_cairo(|ctx| render::render_annotation(ctx, preview));
                }
            }
        }
        out
    }

    /// Flattens the base and all committed annotations into a new pixmap.
    ///
    /// Vector annotations between redactions are batched into a single
    /// Cairo pass; each redaction patch is pasted at its place in the
    /// z-order so later vector marks can draw over redacted pixels.
    pub fn flatten(&self) -> Pixmap {
        let mut out = self.base.clone();

        let mut batch_start = 0;
        for (i, annotation) in self.annotations.iter().enumerate() {
            if let Some(patch) = annotation.redaction_patch() {
                self.render_batch(&mut out, batch_start..i);
                image::flatten_patches(&mut out, std::slice::from_ref(&patch));
                batch_start = i + 1;
            }
        }
        self.render_batch(&mut out, batch_start..self.annotations.len());

        out
    }

    fn render_batch(&self, out: &mut Pixmap, range: std::ops::Range<usize>) {
        if range.is_empty() {
            return;
        }
        let batch = &self.annotations[range];
        out.with_cairo(|ctx| render::render_annotations(ctx, batch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RedactionEffect;
    use crate::draw::color::{BLUE, GREEN, RED, WHITE};
    use crate::image::pixmap::pack_color;

    fn canvas() -> Canvas {
        Canvas::new(
            Pixmap::solid(64, 64, WHITE),
            Rect::new(100, 100, 64, 64).unwrap(),
            0,
        )
    }

    fn red_rect() -> Annotation {
        Annotation::Rect {
            rect: Rect::new(10, 10, 30, 20).unwrap(),
            color: RED,
            thickness: 3.0,
        }
    }

    fn blue_line() -> Annotation {
        Annotation::Line {
            x1: 5,
            y1: 5,
            x2: 50,
            y2: 50,
            color: BLUE,
            thickness: 2.0,
        }
    }

    #[test]
    fn render_is_deterministic_and_cached() {
        let mut canvas = canvas();
        canvas.append(red_rect());
        canvas.append(blue_line());
        let first = canvas.render().clone();
        assert_eq!(canvas.render().data(), first.data());
        assert_eq!(canvas.flatten().data(), first.data());
    }

    #[test]
    fn render_does_not_mutate_the_base() {
        let mut canvas = canvas();
        let base_before = canvas.base().clone();
        canvas.append(blue_line());
        let _ = canvas.render();
        assert_eq!(canvas.base(), &base_before);
    }

    #[test]
    fn undo_restores_previous_pixels_exactly() {
        let mut canvas = canvas();
        canvas.append(red_rect());
        let before = canvas.render().clone();

        canvas.append(blue_line());
        assert_ne!(canvas.render().data(), before.data());

        assert!(canvas.undo());
        assert_eq!(canvas.render().data(), before.data());
    }

    #[test]
    fn redo_mirrors_undo() {
        let mut canvas = canvas();
        canvas.append(red_rect());
        canvas.append(blue_line());
        let after = canvas.render().clone();

        assert!(canvas.undo());
        assert!(canvas.redo());
        assert_eq!(canvas.render().data(), after.data());
        assert!(!canvas.redo());
    }

    #[test]
    fn undo_on_empty_canvas_is_a_noop() {
        let mut canvas = canvas();
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn append_after_undo_discards_redo() {
        let mut canvas = canvas();
        canvas.append(red_rect());
        canvas.undo();
        canvas.append(blue_line());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn redaction_patch_is_pasted_at_its_z_position() {
        let mut canvas = canvas();
        canvas.append(blue_line());
        canvas.append(Annotation::Redaction {
            rect: Rect::new(0, 0, 20, 20).unwrap(),
            patch: Pixmap::solid(20, 20, GREEN),
            effect: RedactionEffect::Blur { radius: 2 },
        });

        let composed = canvas.render();
        // The patch covers the start of the line.
        assert_eq!(composed.pixel(5, 5), pack_color(GREEN));
        // Pixels outside the patch keep the line.
        assert_eq!(composed.pixel(40, 40), pack_color(BLUE));
    }

    #[test]
    fn undoing_a_redaction_restores_the_original_pixels() {
        let mut canvas = canvas();
        let before = canvas.render().clone();

        canvas.append(Annotation::Redaction {
            rect: Rect::new(8, 8, 16, 16).unwrap(),
            patch: Pixmap::solid(16, 16, GREEN),
            effect: RedactionEffect::Pixelate { block_size: 4 },
        });
        assert_ne!(canvas.render().data(), before.data());

        assert!(canvas.undo());
        assert_eq!(canvas.render().data(), before.data());
    }

    #[test]
    fn preview_draws_on_top_without_committing() {
        let mut canvas = canvas();
        canvas.append(red_rect());
        let committed = canvas.render().clone();

        let with_preview = canvas.render_with_preview(Some(&blue_line()));
        assert_ne!(with_preview.data(), committed.data());

        // The provisional mark left no trace on the committed state.
        assert_eq!(canvas.render().data(), committed.data());
        assert_eq!(canvas.annotations().len(), 1);
    }

    #[test]
    fn history_cap_limits_undo_depth() {
        let mut canvas = Canvas::new(
            Pixmap::solid(32, 32, WHITE),
            Rect::new(0, 0, 32, 32).unwrap(),
            2,
        );
        canvas.append(red_rect());
        canvas.append(blue_line());
        canvas.append(red_rect());

        assert!(canvas.undo());
        assert!(canvas.undo());
        assert!(!canvas.undo());
        assert_eq!(canvas.annotations().len(), 1);
    }
}
