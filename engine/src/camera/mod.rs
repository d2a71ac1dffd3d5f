//! Camera Module
//!
//! Maps window pixels onto the world plane. Window-system agnostic: it only
//! deals with camera state and math.

pub mod ortho;

pub use ortho::OrthoCamera2D;
