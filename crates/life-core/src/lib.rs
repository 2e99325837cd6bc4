//! Core traits and types for the life video pipeline.
//!
//! Everything advances one clock step at a time. Component timing derives
//! from the step count alone; there is no shared wall clock between the
//! compute and display domains.

mod geometry;
mod noise;
mod ram;
mod tickable;

pub use geometry::FrameGeometry;
pub use noise::NoiseSource;
pub use ram::FrameRam;
pub use tickable::Tickable;

/// Cells packed into one word. Every data path in the pipeline is one word
/// wide; the rule evaluator runs this many lanes in parallel.
pub const CELLS_PER_WORD: u32 = 16;
