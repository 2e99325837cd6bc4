//! Word-addressed storage port with one-step read latency.

/// Word-addressed storage with one-step read latency.
///
/// The pipeline reads and writes the frame of record through this port. Each
/// `tick` applies one address: a write commits `data_in` at `addr`, a read
/// latches the word at `addr` so that `data_out()` returns it from the next
/// step onward. Addresses wrap at the implementation's capacity.
pub trait FrameRam {
    /// Apply one storage cycle.
    fn tick(&mut self, addr: u32, data_in: u16, write: bool);

    /// Word latched by the most recent read tick. A write tick leaves the
    /// output cleared, matching single-port RAM behaviour.
    fn data_out(&self) -> u16;
}
