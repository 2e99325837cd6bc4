//! Rotating three-line buffer with a save slot.

use life_core::Tickable;

struct PendingWrite {
    addr: usize,
    word: u16,
    save: bool,
}

/// Buffers three lines of cell data plus one savable line.
///
/// Reads return one word from each of the three logical lines at a shared
/// address, with one step of latency. A rotate remaps which physical slot
/// answers which logical position — the line that was newest becomes the
/// middle, the middle becomes the oldest, and the old oldest slot becomes
/// writable. No data moves.
///
/// The save slot is independent of the rotation: a write with `save` set
/// mirrors the word into it, and a read with the saved flag set substitutes
/// it for the newest line. The pairing preserves the frame's first line for
/// reuse against its last line (toroidal vertical wrap).
///
/// Writes and rotates must not be queued for the same tick; the machines
/// driving this buffer rotate one step before the first write of a line.
pub struct WindowBuffer {
    words_per_line: usize,
    slots: [Box<[u16]>; 3],
    save_slot: Box<[u16]>,
    /// Rotation position: logical line `i` lives in slot `(pos + i) % 3`.
    pos: usize,
    rotate_pending: bool,
    read_addr: usize,
    saved: bool,
    /// Words latched from all four slots at the read address.
    latched: [u16; 4],
    pending: Option<PendingWrite>,
}

impl WindowBuffer {
    /// Create a zeroed buffer for lines of `words_per_line` words.
    ///
    /// # Panics
    ///
    /// Panics if `words_per_line` is zero.
    #[must_use]
    pub fn new(words_per_line: u32) -> Self {
        assert!(words_per_line > 0, "window lines need at least one word");
        let line = || vec![0u16; words_per_line as usize].into_boxed_slice();
        Self {
            words_per_line: words_per_line as usize,
            slots: [line(), line(), line()],
            save_slot: line(),
            pos: 0,
            rotate_pending: false,
            read_addr: 0,
            saved: false,
            latched: [0; 4],
            pending: None,
        }
    }

    /// Rotate the lines on the next tick.
    pub fn rotate(&mut self) {
        self.rotate_pending = true;
    }

    /// Address whose three words the next tick latches.
    pub fn set_read_addr(&mut self, addr: u32) {
        self.read_addr = addr as usize % self.words_per_line;
    }

    /// Substitute the save slot for the newest line on reads.
    pub fn set_saved(&mut self, saved: bool) {
        self.saved = saved;
    }

    /// Queue a word for the writable (oldest) slot, applied on the next
    /// tick. With `save` set the word is mirrored into the save slot.
    pub fn write(&mut self, addr: u32, word: u16, save: bool) {
        self.pending = Some(PendingWrite {
            addr: addr as usize % self.words_per_line,
            word,
            save,
        });
    }

    /// Words at the latched read address: oldest line, middle line, and the
    /// newest line (or the save slot when the saved flag is set).
    #[must_use]
    pub fn read_data(&self) -> [u16; 3] {
        [
            self.latched[self.pos],
            self.latched[(self.pos + 1) % 3],
            if self.saved {
                self.latched[3]
            } else {
                self.latched[(self.pos + 2) % 3]
            },
        ]
    }
}

impl Tickable for WindowBuffer {
    fn tick(&mut self) {
        if self.rotate_pending {
            self.rotate_pending = false;
            self.pos = (self.pos + 1) % 3;
        }
        // Latch before applying the write: reads are not transparent.
        for (latched, slot) in self.latched.iter_mut().zip(&self.slots) {
            *latched = slot[self.read_addr];
        }
        self.latched[3] = self.save_slot[self.read_addr];
        if let Some(w) = self.pending.take() {
            self.slots[(self.pos + 2) % 3][w.addr] = w.word;
            if w.save {
                self.save_slot[w.addr] = w.word;
            }
        }
    }
}
