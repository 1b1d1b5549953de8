pub mod geometry;
pub mod sweep;
