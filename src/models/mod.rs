pub mod canvas;
pub mod common;
pub mod image;

pub use canvas::*;
pub use common::*;
pub use image::*;
