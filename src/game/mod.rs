pub mod config;
pub mod grid;
pub mod item;
pub mod pool;
pub mod shape;
