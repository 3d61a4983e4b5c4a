//! Cairo-based rendering functions for annotations.

use super::annotation::Annotation;
use super::color::Color;
use super::font::FontDescriptor;
use crate::util;

/// Fixed opacity applied to marker strokes, regardless of the stored color.
pub const MARKER_OPACITY: f64 = 0.4;

/// Markers render wider than the pen at the same configured thickness.
pub const MARKER_WIDTH_SCALE: f64 = 3.0;

/// Renders a run of vector annotations to a Cairo context, in slice order
/// (first annotation = bottom layer).
///
/// Redaction annotations are skipped here; their pixels are pasted by the
/// composition engine outside of Cairo.
pub fn render_annotations(ctx: &cairo::Context, annotations: &[Annotation]) {
    for annotation in annotations {
        render_annotation(ctx, annotation);
    }
}

/// Renders a single annotation, dispatching on its variant.
pub fn render_annotation(ctx: &cairo::Context, annotation: &Annotation) {
    match annotation {
        Annotation::Stroke {
            points,
            color,
            thickness,
        } => {
            render_polyline(ctx, points, *color, *thickness);
        }
        Annotation::Marker {
            points,
            color,
            thickness,
        } => {
            render_polyline(
                ctx,
                points,
                color.with_alpha(MARKER_OPACITY),
                thickness * MARKER_WIDTH_SCALE,
            );
        }
        Annotation::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        } => {
            render_line(ctx, *x1, *y1, *x2, *y2, *color, *thickness);
        }
        Annotation::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
            head_length,
            head_angle,
        } => {
            render_arrow(
                ctx,
                *x1,
                *y1,
                *x2,
                *y2,
                *color,
                *thickness,
                *head_length,
                *head_angle,
            );
        }
        Annotation::Rect {
            rect,
            color,
            thickness,
        } => {
            render_rect(
                ctx,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                *color,
                *thickness,
            );
        }
        Annotation::Ellipse {
            cx,
            cy,
            rx,
            ry,
            color,
            thickness,
        } => {
            render_ellipse(ctx, *cx, *cy, *rx, *ry, *color, *thickness);
        }
        Annotation::CounterBubble {
            x,
            y,
            number,
            color,
            radius,
            font,
        } => {
            render_counter_bubble(ctx, *x, *y, *number, *color, *radius, font);
        }
        Annotation::Text {
            x,
            y,
            text,
            color,
            size,
            font,
        } => {
            render_text(ctx, *x, *y, text, *color, *size, font);
        }
        Annotation::Redaction { .. } => {}
    }
}

/// Render a polyline through the recorded points. A single point renders
/// as a dot (round cap, zero-length segment).
fn render_polyline(ctx: &cairo::Context, points: &[(i32, i32)], color: Color, thickness: f64) {
    if points.is_empty() {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let (x0, y0) = points[0];
    ctx.move_to(x0 as f64, y0 as f64);

    if points.len() == 1 {
        ctx.line_to(x0 as f64, y0 as f64);
    } else {
        for &(x, y) in &points[1..] {
            ctx.line_to(x as f64, y as f64);
        }
    }

    let _ = ctx.stroke();
}

/// Render a straight line
fn render_line(
    ctx: &cairo::Context,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
    thickness: f64,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x1 as f64, y1 as f64);
    ctx.line_to(x2 as f64, y2 as f64);
    let _ = ctx.stroke();
}

/// Render a rectangle outline
fn render_rect(ctx: &cairo::Context, x: i32, y: i32, w: i32, h: i32, color: Color, thickness: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.rectangle(x as f64, y as f64, w as f64, h as f64);
    let _ = ctx.stroke();
}

/// Render an ellipse using Cairo's arc with scaling
fn render_ellipse(
    ctx: &cairo::Context,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: Color,
    thickness: f64,
) {
    if rx == 0 || ry == 0 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness);

    ctx.save().ok();
    ctx.translate(cx as f64, cy as f64);
    ctx.scale(rx as f64, ry as f64);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore().ok();

    let _ = ctx.stroke();
}

/// Render an arrow: a shaft plus a V-shaped head at the end point.
#[allow(clippy::too_many_arguments)]
fn render_arrow(
    ctx: &cairo::Context,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
    thickness: f64,
    head_length: f64,
    head_angle: f64,
) {
    render_line(ctx, x1, y1, x2, y2, color, thickness);

    let barbs = util::arrowhead_points(x1, y1, x2, y2, head_length, head_angle);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(x2 as f64, y2 as f64);
    ctx.line_to(barbs[0].0, barbs[0].1);
    let _ = ctx.stroke();

    ctx.move_to(x2 as f64, y2 as f64);
    ctx.line_to(barbs[1].0, barbs[1].1);
    let _ = ctx.stroke();
}

/// Renders a filled circle with its number centered inside.
///
/// The digit color is picked for contrast against the bubble fill: white
/// on dark fills, black on light ones.
fn render_counter_bubble(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    number: u32,
    color: Color,
    radius: f64,
    font: &FontDescriptor,
) {
    let radius = radius.max(1.0);

    ctx.save().ok();

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.arc(x as f64, y as f64, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.fill();

    let brightness = color.r * 0.299 + color.g * 0.587 + color.b * 0.114;
    let (text_r, text_g, text_b) = if brightness > 0.5 {
        (0.0, 0.0, 0.0)
    } else {
        (1.0, 1.0, 1.0)
    };

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(radius * 1.1));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(&number.to_string());

    let (text_width, text_height) = layout.pixel_size();
    ctx.move_to(
        x as f64 - f64::from(text_width) / 2.0,
        y as f64 - f64::from(text_height) / 2.0,
    );
    ctx.set_source_rgba(text_r, text_g, text_b, 1.0);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Renders text at a baseline position with multi-line support using Pango.
///
/// Text is drawn with a thin contrasting outline so it stays readable
/// over busy screenshot content. Newlines in the text produce multiple
/// lines with spacing from the font metrics.
pub fn render_text(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
    size: f64,
    font: &FontDescriptor,
) {
    if text.is_empty() {
        return;
    }

    ctx.save().ok();

    // Gray antialiasing; subpixel rendering fringes on composited buffers.
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    let brightness = color.r * 0.299 + color.g * 0.587 + color.b * 0.114;
    let (outline_r, outline_g, outline_b) = if brightness > 0.5 {
        (0.0, 0.0, 0.0)
    } else {
        (1.0, 1.0, 1.0)
    };

    // Pango measures from the top-left corner; (x, y) is the baseline of
    // the first line.
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    let adjusted_y = y as f64 - baseline;

    ctx.move_to(x as f64, adjusted_y);
    pangocairo::functions::layout_path(ctx, &layout);

    ctx.set_source_rgba(outline_r, outline_g, outline_b, 1.0);
    ctx.set_line_width(size * 0.06);
    ctx.set_line_join(cairo::LineJoin::Round);
    let _ = ctx.stroke_preserve();

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.fill();

    ctx.restore().ok();
}
