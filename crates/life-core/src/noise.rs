//! Noise source port.

/// A word-wide noise source with a one-step request latency.
///
/// The source runs freely; a tick with `enable` set latches a fresh word,
/// which `word()` returns from the next step until the following request.
pub trait NoiseSource {
    /// Advance one step, latching a new word when `enable` is set.
    fn tick(&mut self, enable: bool);

    /// Word latched by the most recent enabled tick.
    fn word(&self) -> u16;
}
