pub mod drag;
pub mod grid_builder;
pub mod pickup;
pub mod pointer;
pub mod preview;
pub mod screen;
