pub mod builder;
pub mod camera;
pub mod keyframes;
