//! Scrolling three-line window over the frame store.
//!
//! The rule evaluator needs a 3x3 neighbourhood, so the compute side only
//! ever materialises three lines of the frame: the line above, the line
//! being evaluated, and the line below. [`WindowBuffer`] holds those lines
//! in rotating slots; [`WindowFiller`] refills it from the frame store one
//! line at a time; [`WindowReader`] streams neighbourhood-ready words out
//! of it, handling horizontal wrap within the line. Vertical wrap is closed
//! by the buffer's save slot: the first line of the frame is saved while
//! loading and substituted back as the neighbour of the last line.

mod buffer;
mod filler;
mod reader;

pub use buffer::WindowBuffer;
pub use filler::{FillMode, WindowFiller};
pub use reader::WindowReader;
