//! Pixel-level transforms applied to captured image data.
//!
//! These operate directly on [`Pixmap`] bytes rather than going through
//! Cairo. All transforms treat the four channels symmetrically, so they
//! work on any channel ordering.

use crate::image::Pixmap;
use crate::util::Rect;

/// A rectangular block of pixels positioned on a larger image.
///
/// Redaction annotations carry their rasterized output as a patch; the
/// composition engine pastes patches over the base capture in z-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub x: i32,
    pub y: i32,
    pub pixels: Pixmap,
}

/// Pastes each patch onto the base image at its recorded position,
/// in slice order. Patches extending past the base are clipped.
pub fn flatten_patches(base: &mut Pixmap, patches: &[Patch]) {
    for patch in patches {
        base.blit(patch.x, patch.y, &patch.pixels);
    }
}

/// Pixelates a region by replacing each `block_size` square with the
/// average color of the pixels it covers.
///
/// The region is clamped to the image bounds, blocks at the right and
/// bottom edges shrink to fit, and a block size below 1 is treated as 1
/// (which leaves the pixels unchanged).
pub fn pixelate(pixmap: &mut Pixmap, rect: Rect, block_size: i32) {
    let Some(rect) = rect.intersect(&pixmap.bounds()) else {
        return;
    };
    let block = block_size.max(1);
    if block == 1 {
        return;
    }

    let mut by = rect.y;
    while by < rect.bottom() {
        let bh = block.min(rect.bottom() - by);
        let mut bx = rect.x;
        while bx < rect.right() {
            let bw = block.min(rect.right() - bx);
            average_block(pixmap, bx, by, bw, bh);
            bx += block;
        }
        by += block;
    }
}

/// Replaces one block with its per-channel average color.
fn average_block(pixmap: &mut Pixmap, x: i32, y: i32, w: i32, h: i32) {
    let mut sums = [0u64; 4];
    for py in y..y + h {
        for px in x..x + w {
            let bytes = pixmap.pixel(px, py).to_ne_bytes();
            for (sum, byte) in sums.iter_mut().zip(bytes) {
                *sum += u64::from(byte);
            }
        }
    }

    let count = (w as u64) * (h as u64);
    let mut avg = [0u8; 4];
    for (out, sum) in avg.iter_mut().zip(sums) {
        *out = ((sum + count / 2) / count) as u8;
    }
    let value = u32::from_ne_bytes(avg);

    for py in y..y + h {
        for px in x..x + w {
            pixmap.set_pixel(px, py, value);
        }
    }
}

/// Box-blurs a region with the given radius.
///
/// Runs a separable horizontal-then-vertical pass over the clamped
/// region. Samples never leave the region, so pixels outside it do not
/// bleed in. A radius of 0 is a no-op.
pub fn blur(pixmap: &mut Pixmap, rect: Rect, radius: i32) {
    let Some(rect) = rect.intersect(&pixmap.bounds()) else {
        return;
    };
    if radius <= 0 {
        return;
    }

    blur_pass(pixmap, rect, radius, true);
    blur_pass(pixmap, rect, radius, false);
}

fn blur_pass(pixmap: &mut Pixmap, rect: Rect, radius: i32, horizontal: bool) {
    let mut out = Vec::with_capacity((rect.width as usize) * (rect.height as usize));

    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let mut sums = [0u64; 4];
            let mut count = 0u64;
            for offset in -radius..=radius {
                let (sx, sy) = if horizontal { (x + offset, y) } else { (x, y + offset) };
                let (sx, sy) = rect.clamp(sx, sy);
                // Clamping repeats edge samples inside the region, so the
                // window weight stays constant and uniform areas stay uniform.
                let bytes = pixmap.pixel(sx, sy).to_ne_bytes();
                for (sum, byte) in sums.iter_mut().zip(bytes) {
                    *sum += u64::from(byte);
                }
                count += 1;
            }
            let mut avg = [0u8; 4];
            for (dst, sum) in avg.iter_mut().zip(sums) {
                *dst = ((sum + count / 2) / count) as u8;
            }
            out.push(u32::from_ne_bytes(avg));
        }
    }

    let mut it = out.into_iter();
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(value) = it.next() {
                pixmap.set_pixel(x, y, value);
            }
        }
    }
}
