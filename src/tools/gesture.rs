//! In-flight gesture tracking.
//!
//! A gesture is everything that happens between pointer press and release
//! (or, for text, between placement and confirmation). The gesture owns a
//! snapshot of the tool style taken at press time, so toolbar changes made
//! mid-drag never alter the mark being drawn. Nothing here touches the
//! canvas until the gesture ends; previews are provisional annotations the
//! compositor draws on top without committing.

use crate::canvas::Canvas;
use crate::draw::{Annotation, RedactionEffect};
use crate::image;
use crate::tools::{ToolKind, ToolStyle};
use crate::util::{self, Rect};

/// Gesture state machine.
#[derive(Debug, Default)]
pub enum Gesture {
    /// No interaction in progress.
    #[default]
    Idle,

    /// Pointer is down and dragging.
    Active {
        tool: ToolKind,
        style: ToolStyle,
        anchor: (i32, i32),
        current: (i32, i32),
        /// Point trail, recorded only for freehand tools.
        points: Vec<(i32, i32)>,
    },

    /// Text placement is waiting for keyboard input.
    TextEntry {
        x: i32,
        y: i32,
        buffer: String,
        style: ToolStyle,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_text_entry(&self) -> bool {
        matches!(self, Gesture::TextEntry { .. })
    }

    /// Starts a drag gesture at the given (already clamped) position.
    ///
    /// A second press while a gesture is in flight is a device conflict
    /// (multi-button or multi-touch); it is logged and ignored so the
    /// original gesture continues undisturbed.
    pub fn begin(&mut self, tool: ToolKind, style: ToolStyle, x: i32, y: i32) -> bool {
        if !self.is_idle() {
            log::warn!("Ignoring gesture start while another is in flight");
            return false;
        }

        let points = if tool.is_freehand() {
            vec![(x, y)]
        } else {
            Vec::new()
        };
        *self = Gesture::Active {
            tool,
            style,
            anchor: (x, y),
            current: (x, y),
            points,
        };
        true
    }

    /// Extends the active gesture to a new pointer position. Motion
    /// without an active drag is ignored.
    pub fn update(&mut self, x: i32, y: i32) {
        if let Gesture::Active {
            tool,
            current,
            points,
            ..
        } = self
        {
            *current = (x, y);
            if tool.is_freehand() && points.last() != Some(&(x, y)) {
                points.push((x, y));
            }
        }
    }

    /// Ends the active drag and produces the committed annotation, if any.
    ///
    /// Zero-drag shape and redaction gestures produce nothing. Redaction
    /// gestures read the current flattened composite, transform the
    /// covered pixels, and bake the result into the annotation.
    pub fn end(&mut self, canvas: &Canvas) -> Option<Annotation> {
        let Gesture::Active {
            tool,
            style,
            anchor,
            current,
            points,
        } = std::mem::take(self)
        else {
            return None;
        };

        let (x1, y1) = anchor;
        let (x2, y2) = current;

        match tool {
            ToolKind::Pencil => Some(Annotation::Stroke {
                points,
                color: style.color,
                thickness: style.thickness,
            }),
            ToolKind::Marker => Some(Annotation::Marker {
                points,
                color: style.color,
                thickness: style.thickness,
            }),
            ToolKind::Line => {
                if anchor == current {
                    return None;
                }
                Some(Annotation::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: style.color,
                    thickness: style.thickness,
                })
            }
            ToolKind::Arrow => {
                if anchor == current {
                    return None;
                }
                Some(Annotation::Arrow {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: style.color,
                    thickness: style.thickness,
                    head_length: style.arrow_length,
                    head_angle: style.arrow_angle,
                })
            }
            ToolKind::Rect => Rect::from_corners(x1, y1, x2, y2).map(|rect| Annotation::Rect {
                rect,
                color: style.color,
                thickness: style.thickness,
            }),
            ToolKind::Ellipse => {
                let (cx, cy, rx, ry) = util::ellipse_bounds(x1, y1, x2, y2);
                if rx == 0 || ry == 0 {
                    return None;
                }
                Some(Annotation::Ellipse {
                    cx,
                    cy,
                    rx,
                    ry,
                    color: style.color,
                    thickness: style.thickness,
                })
            }
            ToolKind::Pixelate | ToolKind::Blur => {
                let rect = Rect::from_corners(x1, y1, x2, y2)?;
                redact(canvas, rect, tool, &style)
            }
            // Counter and Text never reach the drag phase.
            ToolKind::Counter | ToolKind::Text => None,
        }
    }

    /// Drops the active gesture without committing anything.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("Gesture cancelled");
            *self = Gesture::Idle;
        }
    }

    /// Places the text cursor and starts collecting keyboard input.
    pub fn begin_text(&mut self, style: ToolStyle, x: i32, y: i32) -> bool {
        if !self.is_idle() {
            log::warn!("Ignoring text placement while another gesture is in flight");
            return false;
        }
        *self = Gesture::TextEntry {
            x,
            y,
            buffer: String::new(),
            style,
        };
        true
    }

    /// Appends a character to the text buffer.
    pub fn text_insert(&mut self, c: char) {
        if let Gesture::TextEntry { buffer, .. } = self {
            buffer.push(c);
        }
    }

    /// Removes the last character from the text buffer.
    pub fn text_backspace(&mut self) {
        if let Gesture::TextEntry { buffer, .. } = self {
            buffer.pop();
        }
    }

    /// Confirms the text entry. An empty buffer commits nothing.
    pub fn commit_text(&mut self) -> Option<Annotation> {
        let Gesture::TextEntry {
            x,
            y,
            buffer,
            style,
        } = std::mem::take(self)
        else {
            return None;
        };

        if buffer.is_empty() {
            return None;
        }
        Some(Annotation::Text {
            x,
            y,
            text: buffer,
            color: style.color,
            size: style.font_size,
            font: style.font,
        })
    }

    /// Provisional annotation for rendering on top of the committed
    /// canvas while the gesture is in flight.
    ///
    /// Redaction gestures preview as a plain outline; the pixel transform
    /// is only computed once, at commit.
    pub fn preview(&self) -> Option<Annotation> {
        match self {
            Gesture::Idle => None,
            Gesture::Active {
                tool,
                style,
                anchor,
                current,
                points,
            } => {
                let (x1, y1) = *anchor;
                let (x2, y2) = *current;
                match tool {
                    ToolKind::Pencil => Some(Annotation::Stroke {
                        points: points.clone(),
                        color: style.color,
                        thickness: style.thickness,
                    }),
                    ToolKind::Marker => Some(Annotation::Marker {
                        points: points.clone(),
                        color: style.color,
                        thickness: style.thickness,
                    }),
                    ToolKind::Line => Some(Annotation::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: style.color,
                        thickness: style.thickness,
                    }),
                    ToolKind::Arrow => Some(Annotation::Arrow {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: style.color,
                        thickness: style.thickness,
                        head_length: style.arrow_length,
                        head_angle: style.arrow_angle,
                    }),
                    ToolKind::Rect => {
                        Rect::from_corners(x1, y1, x2, y2).map(|rect| Annotation::Rect {
                            rect,
                            color: style.color,
                            thickness: style.thickness,
                        })
                    }
                    ToolKind::Ellipse => {
                        let (cx, cy, rx, ry) = util::ellipse_bounds(x1, y1, x2, y2);
                        if rx == 0 || ry == 0 {
                            return None;
                        }
                        Some(Annotation::Ellipse {
                            cx,
                            cy,
                            rx,
                            ry,
                            color: style.color,
                            thickness: style.thickness,
                        })
                    }
                    ToolKind::Pixelate | ToolKind::Blur => {
                        Rect::from_corners(x1, y1, x2, y2).map(|rect| Annotation::Rect {
                            rect,
                            color: style.color,
                            thickness: 1.0,
                        })
                    }
                    ToolKind::Counter | ToolKind::Text => None,
                }
            }
            Gesture::TextEntry {
                x,
                y,
                buffer,
                style,
            } => {
                if buffer.is_empty() {
                    return None;
                }
                Some(Annotation::Text {
                    x: *x,
                    y: *y,
                    text: buffer.clone(),
                    color: style.color,
                    size: style.font_size,
                    font: style.font.clone(),
                })
            }
        }
    }
}

/// Builds a redaction annotation from the current canvas composite.
///
/// The covered pixels come from the flattened state, so earlier
/// annotations inside the region are obscured along with the capture.
fn redact(canvas: &Canvas, rect: Rect, tool: ToolKind, style: &ToolStyle) -> Option<Annotation> {
    let rect = rect.intersect(&canvas.base().bounds())?;
    let composite = canvas.flatten();
    let mut patch = composite.crop(rect);
    let patch_bounds = patch.bounds();

    let effect = match tool {
        ToolKind::Pixelate => {
            let block_size = style.pixelate_block_size();
            image::pixelate(&mut patch, patch_bounds, block_size);
            RedactionEffect::Pixelate { block_size }
        }
        ToolKind::Blur => {
            let radius = style.blur_radius();
            image::blur(&mut patch, patch_bounds, radius);
            RedactionEffect::Blur { radius }
        }
        _ => return None,
    };

    Some(Annotation::Redaction {
        rect,
        patch,
        effect,
    })
}
