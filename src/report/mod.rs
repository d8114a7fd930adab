//! Report building and rendering.

pub mod generator;

pub use generator::*;
