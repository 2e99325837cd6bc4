//! Trait for components that can be advanced by clock steps.

/// A component that can be advanced by clock steps.
///
/// This is the core abstraction for the pipeline. Every stateful component
/// (buffers, sequencers, the orchestrator) implements this trait. Inputs are
/// registered by method calls before a step; outputs reflect the state latched
/// during the most recent step.
pub trait Tickable {
    /// Advance the component by one clock step.
    fn tick(&mut self);

    /// Advance the component by multiple steps.
    ///
    /// Default implementation calls `tick()` in a loop. Components may
    /// override for efficiency, but must produce identical results.
    fn tick_n(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }
}
