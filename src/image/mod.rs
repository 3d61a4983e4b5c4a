//! Image buffers and pixel transforms.

pub mod ops;
pub mod pixmap;

pub use ops::{Patch, blur, flatten_patches, pixelate};
pub use pixmap::Pixmap;
