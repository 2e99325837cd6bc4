//! Pipeline orchestrator for the life video generator.
//!
//! [`LifeWriter`] sits in the compute domain and owns everything but the
//! display: the frame store, the three-line window with its filler and
//! reader, the rule evaluator and the noise source. Each time the display
//! side swaps the double buffer, it computes one line of the next
//! generation, streams it to the buffer followed by a tag word, and writes
//! it back to the frame store in place. The display side holds only the
//! [`DoubleBufferReader`](life_double_buffer::DoubleBufferReader) returned
//! at construction.

mod counters;
mod writer;

pub use counters::FrameCounters;
pub use writer::LifeWriter;
