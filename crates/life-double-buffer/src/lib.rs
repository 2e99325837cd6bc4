//! Double buffer for passing one line at a time between two timing domains.
//!
//! The producer and consumer each work with one half of a shared word array.
//! The consumer owns a "front" pointer naming the half it reads; the producer
//! learns of that pointer only through a multi-stage synchronizer and writes
//! the other half. When the consumer toggles the pointer the halves swap.
//!
//! This scheme only works when writing is faster than reading: the consumer
//! controls the swap and there is no feedback from producer to consumer. If
//! the producer has not finished a line when the consumer toggles into it,
//! the consumer sees stale words. That is a documented precondition, not a
//! detected error — the cells are atomic so the failure mode is stale data,
//! never undefined behaviour.
//!
//! Both sides address their half with an LFSR rather than a counter, keeping
//! the per-step work O(1) on the fast display side. The two address
//! sequencers share a configuration, so they visit slots in the same order
//! and the scrambled slot order is invisible to either side.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use life_core::Tickable;
use life_lfsr::{Lfsr, LfsrConfig, WatchId};

/// Synchronizer depth for the cross-domain front pointer.
const SYNC_STAGES: usize = 3;

/// State shared between the two halves: the word cells and the single
/// cross-domain front pointer.
struct Shared {
    cells: Box<[AtomicU16]>,
    /// Which half the consumer currently reads. Written only by the
    /// consumer (release), sampled by the producer (acquire).
    front: AtomicBool,
}

impl Shared {
    /// Cell index for an LFSR register value in the given half.
    fn slot(&self, value: u32, half: bool, bits: u32) -> usize {
        (value as usize) | (usize::from(half) << bits)
    }
}

/// Double buffer sized for lines of `num_words` words.
///
/// `num_words` includes the per-line tag word, so a producer of
/// `words_per_line` data words creates a buffer of `words_per_line + 1`.
pub struct DoubleBuffer;

impl DoubleBuffer {
    /// Create the two ends of a double buffer.
    ///
    /// # Panics
    ///
    /// Panics if `num_words < 2` (the LFSR addressing needs a cycle).
    #[must_use]
    pub fn new(num_words: u32) -> (DoubleBufferWriter, DoubleBufferReader) {
        let config = LfsrConfig::num_steps(num_words);
        let bits = config.bits();
        // Each half spans 2^bits cells; LFSR values index within a half.
        let cells = (0..(1usize << (bits + 1)))
            .map(|_| AtomicU16::new(0))
            .collect();
        let shared = Arc::new(Shared {
            cells,
            front: AtomicBool::new(false),
        });

        let writer = DoubleBufferWriter {
            shared: Arc::clone(&shared),
            lfsr: Lfsr::new(config),
            bits,
            sync: [false; SYNC_STAGES],
            last_front: false,
            ready: false,
            pending: None,
        };
        let mut lfsr = Lfsr::new(config);
        let last_watch = lfsr.watch(num_words - 1);
        let reader = DoubleBufferReader {
            shared,
            lfsr,
            bits,
            last_watch,
            front: false,
            data: 0,
            next_pending: false,
            toggle_pending: false,
        };
        (writer, reader)
    }
}

/// Producer side of a [`DoubleBuffer`]. Lives in the compute domain.
pub struct DoubleBufferWriter {
    shared: Arc<Shared>,
    lfsr: Lfsr,
    bits: u32,
    /// Synchronizer stages carrying the consumer's front pointer into this
    /// domain.
    sync: [bool; SYNC_STAGES],
    last_front: bool,
    ready: bool,
    pending: Option<u16>,
}

impl DoubleBufferWriter {
    /// One-step pulse: the consumer has just swapped halves, so the back
    /// half is writable again and the write address has been reset.
    #[must_use]
    pub const fn ready(&self) -> bool {
        self.ready
    }

    /// Queue a word for the next tick. Each written word advances the write
    /// address automatically.
    pub fn write(&mut self, word: u16) {
        self.pending = Some(word);
    }
}

impl Tickable for DoubleBufferWriter {
    fn tick(&mut self) {
        let front = self.sync[SYNC_STAGES - 1];
        self.ready = front != self.last_front;
        if self.ready {
            self.lfsr.restart();
        }
        let wrote = if let Some(word) = self.pending.take() {
            let slot = self.shared.slot(self.lfsr.value(), front, self.bits);
            self.shared.cells[slot].store(word, Ordering::Relaxed);
            true
        } else {
            false
        };
        self.lfsr.tick(wrote);

        self.last_front = front;
        // Shift the synchronizer towards the output stage.
        for i in (1..SYNC_STAGES).rev() {
            self.sync[i] = self.sync[i - 1];
        }
        self.sync[0] = self.shared.front.load(Ordering::Acquire);
    }
}

/// Consumer side of a [`DoubleBuffer`]. Lives in the display domain.
pub struct DoubleBufferReader {
    shared: Arc<Shared>,
    lfsr: Lfsr,
    bits: u32,
    last_watch: WatchId,
    /// Local front pointer; the shared copy trails it by the producer's
    /// synchronizer depth.
    front: bool,
    data: u16,
    next_pending: bool,
    toggle_pending: bool,
}

impl DoubleBufferReader {
    /// Advance to the next word. The new word is visible after the next tick.
    pub fn next(&mut self) {
        self.next_pending = true;
    }

    /// Swap halves on the next tick. Resets the read address to the first
    /// word of the newly front half.
    pub fn toggle(&mut self) {
        self.toggle_pending = true;
    }

    /// Word at the current read address, as of the last tick.
    #[must_use]
    pub const fn data(&self) -> u16 {
        self.data
    }

    /// True while the read address sits on the final word of the half.
    #[must_use]
    pub fn last(&self) -> bool {
        self.lfsr.at_target(self.last_watch)
    }
}

impl Tickable for DoubleBufferReader {
    fn tick(&mut self) {
        if self.toggle_pending {
            self.toggle_pending = false;
            self.front = !self.front;
            self.shared.front.store(self.front, Ordering::Release);
            self.lfsr.restart();
        }
        let stepping = self.next_pending;
        self.next_pending = false;
        self.lfsr.tick(stepping);

        // Registered read. The pointer names the producer's half; the
        // consumer always reads the complement.
        let slot = self.shared.slot(self.lfsr.value(), !self.front, self.bits);
        self.data = self.shared.cells[slot].load(Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUM_WORDS: u32 = 101;

    /// Tick the writer until `ready` pulses, with a sanity bound.
    fn wait_ready(writer: &mut DoubleBufferWriter) {
        for _ in 0..20 {
            writer.tick();
            if writer.ready() {
                return;
            }
        }
        panic!("writer never saw the toggle");
    }

    fn write_line(writer: &mut DoubleBufferWriter, base: u16) {
        for i in 0..NUM_WORDS as u16 {
            writer.write(base + i);
            writer.tick();
        }
    }

    #[test]
    fn round_trip_one_line() {
        let (mut writer, mut reader) = DoubleBuffer::new(NUM_WORDS);

        // Kick the producer: the consumer owns the swap.
        reader.toggle();
        reader.tick();
        wait_ready(&mut writer);
        write_line(&mut writer, 1000);

        // Swap into the written half and drain it.
        reader.toggle();
        reader.tick();
        for i in 0..NUM_WORDS as u16 {
            assert_eq!(reader.data(), 1000 + i, "word {i}");
            assert_eq!(reader.last(), u32::from(i) == NUM_WORDS - 1);
            reader.next();
            reader.tick();
        }
    }

    #[test]
    fn round_trip_many_lines() {
        let (mut writer, mut reader) = DoubleBuffer::new(NUM_WORDS);
        reader.toggle();
        reader.tick();

        for line in 0u16..5 {
            wait_ready(&mut writer);
            write_line(&mut writer, line * 5000);

            reader.toggle();
            reader.tick();
            // Re-read every second line twice: rate decoupling means the
            // consumer may traverse its half more than once.
            for _ in 0..=line % 2 {
                for i in 0..NUM_WORDS as u16 {
                    assert_eq!(reader.data(), line * 5000 + i);
                    reader.next();
                    reader.tick();
                }
            }
        }
    }

    #[test]
    fn ready_pulses_once_per_toggle() {
        let (mut writer, mut reader) = DoubleBuffer::new(NUM_WORDS);
        reader.toggle();
        reader.tick();

        let mut pulses = 0;
        for _ in 0..20 {
            writer.tick();
            pulses += i32::from(writer.ready());
        }
        assert_eq!(pulses, 1);
    }

    #[test]
    fn idle_reader_rereads_current_word() {
        let (mut writer, mut reader) = DoubleBuffer::new(NUM_WORDS);
        reader.toggle();
        reader.tick();
        wait_ready(&mut writer);
        write_line(&mut writer, 42);

        reader.toggle();
        reader.tick();
        for _ in 0..10 {
            assert_eq!(reader.data(), 42);
            reader.tick();
        }
    }

    #[test]
    fn halves_swap_across_threads() {
        let (mut writer, mut reader) = DoubleBuffer::new(NUM_WORDS);
        reader.toggle();
        reader.tick();

        let handle = std::thread::spawn(move || {
            wait_ready(&mut writer);
            write_line(&mut writer, 7000);
            writer
        });
        let _writer = handle.join().expect("producer thread");

        reader.toggle();
        reader.tick();
        for i in 0..NUM_WORDS as u16 {
            assert_eq!(reader.data(), 7000 + i);
            reader.next();
            reader.tick();
        }
    }
}
