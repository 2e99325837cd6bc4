//! Compute-domain line producer.

use life_core::{FrameGeometry, FrameRam, NoiseSource, Tickable};
use life_double_buffer::{DoubleBuffer, DoubleBufferReader, DoubleBufferWriter};
use life_rules::life_word;
use life_window::{FillMode, WindowBuffer, WindowFiller, WindowReader};

use crate::FrameCounters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitStart,
    Fill,
    Process,
    WriteTag,
}

/// Produces one line of the next generation per double-buffer swap.
///
/// The cycle per line: wait for the display side to swap halves, top up the
/// window from the frame store, then stream the window through the rule
/// evaluator. Every produced word goes both to the double buffer and back
/// into the frame store at the same address it was read from, so the frame
/// store always holds the newest generation behind the write position and
/// the previous one ahead of it. After the line's words a tag word is
/// written; it is nonzero only for the frame's first line, which lets the
/// display side find the top of the frame without any other feedback.
///
/// Every `noise_cadence`-th word of a frame is replaced by a word from the
/// noise source instead of the computed value. The cadence phase restarts
/// with each frame, so the reseeded positions form fixed columns rather
/// than drifting, and dead screens recover regardless of frame size.
pub struct LifeWriter<R: FrameRam, N: NoiseSource> {
    geometry: FrameGeometry,
    state: State,
    db: DoubleBufferWriter,
    ram: R,
    window: WindowBuffer,
    filler: WindowFiller,
    reader: WindowReader,
    noise: N,
    counters: FrameCounters,
    write_addr: u32,
    noise_cadence: u32,
}

impl<R: FrameRam, N: NoiseSource> LifeWriter<R, N> {
    /// Create a writer over an existing frame store, returning the display
    /// side of its double buffer.
    ///
    /// # Panics
    ///
    /// Panics if `noise_cadence` is zero.
    #[must_use]
    pub fn new(
        geometry: FrameGeometry,
        ram: R,
        noise: N,
        noise_cadence: u32,
    ) -> (Self, DoubleBufferReader) {
        assert!(noise_cadence > 0, "noise cadence must be at least 1");
        // One slot per data word plus the tag word.
        let (db, display) = DoubleBuffer::new(geometry.words_per_line() + 1);
        let writer = Self {
            geometry,
            state: State::WaitStart,
            db,
            ram,
            window: WindowBuffer::new(geometry.words_per_line()),
            filler: WindowFiller::new(geometry.words_per_line(), geometry.total_words()),
            reader: WindowReader::new(geometry.words_per_line()),
            noise,
            counters: FrameCounters::new(geometry),
            write_addr: 0,
            noise_cadence,
        };
        (writer, display)
    }

    /// True while waiting for the display side to swap halves.
    #[must_use]
    pub fn idle(&self) -> bool {
        self.state == State::WaitStart
    }

    /// Position counters for the word being produced.
    #[must_use]
    pub const fn counters(&self) -> &FrameCounters {
        &self.counters
    }

    fn fill_mode(&self) -> FillMode {
        if self.counters.line() == 0 {
            FillMode::First
        } else if self.counters.on_last_line() {
            FillMode::Last
        } else {
            FillMode::Middle
        }
    }
}

impl<R: FrameRam, N: NoiseSource> Tickable for LifeWriter<R, N> {
    fn tick(&mut self) {
        let mut db_word = None;
        let mut noise_used = false;

        match self.state {
            State::WaitStart => {
                if self.db.ready() {
                    self.filler.start(self.fill_mode());
                    self.state = State::Fill;
                }
            }
            State::Fill => {
                self.reader.set_last_line(self.counters.on_last_line());
                self.filler.tick(&mut self.window, &mut self.ram);
                self.window.tick();
                if self.filler.finished() {
                    self.reader.begin();
                    self.state = State::Process;
                }
            }
            State::Process => {
                self.reader.set_last_line(self.counters.on_last_line());
                self.reader.tick(&mut self.window);
                self.window.tick();
                if self.reader.valid() {
                    let frame_word =
                        self.counters.line() * self.geometry.words_per_line() + self.counters.word();
                    noise_used = frame_word % self.noise_cadence == self.noise_cadence - 1;
                    let val = if noise_used {
                        self.noise.word()
                    } else {
                        life_word(self.reader.life_data())
                    };
                    db_word = Some(val);
                    self.ram.tick(self.write_addr, val, true);
                    self.write_addr = (self.write_addr + 1) % self.geometry.total_words();
                    if self.counters.increment() {
                        self.state = State::WriteTag;
                    }
                }
            }
            State::WriteTag => {
                // The line counter has already advanced, so the tag marking
                // the frame's first line tests for line 1.
                db_word = Some(u16::from(self.counters.line() == 1));
                self.state = State::WaitStart;
            }
        }

        if let Some(word) = db_word {
            self.db.write(word);
        }
        // The buffer's synchronizer and the noise lanes run every step.
        self.db.tick();
        self.noise.tick(noise_used);
    }
}
