pub mod canvas;

pub use canvas::{InkColor, SurfaceCanvas, SurfaceVertex};
