//! Pixel classification of painted mask images

/// HSV conversion, hue ranges, and per-pixel masks
pub mod color;
/// Category masks for combined and paired mask images
pub mod masks;
