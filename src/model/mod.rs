pub mod color;
pub mod sample;
pub mod series;

pub use color::*;
pub use sample::*;
pub use series::*;
