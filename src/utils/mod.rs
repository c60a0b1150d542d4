//! Utility module
//!
//! Helpers that sit around the relaxation core: vector distances and
//! decoding of states into images.

pub mod distance;
pub mod image;

pub use distance::*;
pub use image::*;
