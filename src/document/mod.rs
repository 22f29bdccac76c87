pub mod backend;
pub mod render;
