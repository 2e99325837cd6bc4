//! Persistent full-frame cell storage.
//!
//! One word per 16 cells, addressed linearly and row-major. The frame store
//! is the memory of record: the filler reads the current generation out of
//! it three lines at a time, and the orchestrator writes the next generation
//! back one word per step. It persists across frames.
//!
//! Modelled on a single-port synchronous RAM: reads have one step of
//! latency, and a write step leaves the read output cleared.

use life_core::FrameRam;

/// Word-addressed frame storage with one-step read latency.
pub struct FrameStore {
    mem: Box<[u16]>,
    data_out: u16,
}

impl FrameStore {
    /// Create a zeroed store of `total_words` words.
    ///
    /// # Panics
    ///
    /// Panics if `total_words` is zero.
    #[must_use]
    pub fn new(total_words: u32) -> Self {
        assert!(total_words > 0, "frame store needs at least one word");
        Self {
            mem: vec![0; total_words as usize].into_boxed_slice(),
            data_out: 0,
        }
    }

    /// Directly read a word, bypassing the port. Test and seeding aid.
    #[must_use]
    pub fn peek(&self, addr: u32) -> u16 {
        self.mem[addr as usize % self.mem.len()]
    }

    /// Directly write a word, bypassing the port. Test and seeding aid.
    pub fn poke(&mut self, addr: u32, word: u16) {
        let len = self.mem.len();
        self.mem[addr as usize % len] = word;
    }
}

impl FrameRam for FrameStore {
    fn tick(&mut self, addr: u32, data_in: u16, write: bool) {
        let a = addr as usize % self.mem.len();
        if write {
            self.mem[a] = data_in;
            self.data_out = 0;
        } else {
            self.data_out = self.mem[a];
        }
    }

    fn data_out(&self) -> u16 {
        self.data_out
    }
}
