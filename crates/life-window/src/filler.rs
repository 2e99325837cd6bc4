//! Line filler for the window buffer.

use crate::WindowBuffer;
use life_core::FrameRam;

/// How much of the window a fill pass loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Prime the window for line 0: load the frame's last line, then its
    /// first line (saving it), then its second line.
    First,
    /// Rotate and load the next line below the window.
    Middle,
    /// Rotate only; the saved first line stands in for the line below.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePhase {
    Begin,
    Wait,
    Working,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    FirstInit,
    FirstLastLine,
    FirstFirstLine,
    FirstSecondLine,
    MiddleInit,
    MiddleRead,
    Last,
}

/// Streams lines from the frame store into a [`WindowBuffer`].
///
/// A fill pass is started with [`start`](WindowFiller::start) and runs over
/// the following ticks; [`finished`](WindowFiller::finished) pulses for one
/// tick when the pass completes. Each loaded line costs one rotate tick, one
/// tick of read latency, and one tick per word.
///
/// The caller ticks the window buffer after this machine each cycle, so the
/// rotates and writes queued here land on the same edge the frame store
/// data does.
pub struct WindowFiller {
    words_per_line: u32,
    total_words: u32,
    state: State,
    line: LinePhase,
    begin_line: bool,
    save: bool,
    write_addr: u32,
    ram_addr: u32,
    start: Option<FillMode>,
    finished: bool,
}

impl WindowFiller {
    /// Create a filler for frames of `total_words` words in lines of
    /// `words_per_line`.
    ///
    /// # Panics
    ///
    /// Panics if the frame is not a whole number of at least two lines.
    #[must_use]
    pub fn new(words_per_line: u32, total_words: u32) -> Self {
        assert!(words_per_line > 0);
        assert!(
            total_words >= 2 * words_per_line && total_words % words_per_line == 0,
            "frame must be a whole number of at least two lines"
        );
        Self {
            words_per_line,
            total_words,
            state: State::Idle,
            line: LinePhase::Begin,
            begin_line: false,
            save: false,
            write_addr: 0,
            ram_addr: 0,
            start: None,
            finished: false,
        }
    }

    /// Begin a fill pass on the next tick. Only valid while idle.
    pub fn start(&mut self, mode: FillMode) {
        self.start = Some(mode);
    }

    /// True for the one tick on which a fill pass completed.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// True when no fill pass is running or queued.
    #[must_use]
    pub fn idle(&self) -> bool {
        self.state == State::Idle && self.start.is_none()
    }

    /// Run one cycle, driving the window's write port and the frame store's
    /// read port.
    pub fn tick(&mut self, window: &mut WindowBuffer, ram: &mut impl FrameRam) {
        self.finished = false;
        // The store's output this cycle answers last cycle's address; the
        // address presented below is captured before the sub-machine may
        // advance it.
        let addr_now = self.ram_addr;
        let data_in = ram.data_out();

        // One-line loader, run under the outer machine. Reading a word takes
        // a cycle, so the address runs one word ahead of the write.
        let mut ended = false;
        if self.state != State::Idle && self.state != State::Last {
            match self.line {
                LinePhase::Begin => {
                    if self.begin_line {
                        self.begin_line = false;
                        window.rotate();
                        self.line = LinePhase::Wait;
                    }
                }
                LinePhase::Wait => {
                    self.write_addr = 0;
                    self.ram_addr = (self.ram_addr + 1) % self.total_words;
                    self.line = LinePhase::Working;
                }
                LinePhase::Working => {
                    window.write(self.write_addr, data_in, self.save);
                    ended = self.write_addr == self.words_per_line - 1;
                    if ended {
                        self.line = LinePhase::Begin;
                    } else {
                        self.ram_addr = (self.ram_addr + 1) % self.total_words;
                    }
                    self.write_addr += 1;
                }
            }
        }

        match self.state {
            State::Idle => {
                if let Some(mode) = self.start.take() {
                    self.state = match mode {
                        FillMode::First => State::FirstInit,
                        FillMode::Middle => State::MiddleInit,
                        FillMode::Last => State::Last,
                    };
                }
            }
            State::FirstInit => {
                self.ram_addr = self.total_words - self.words_per_line;
                self.begin_line = true;
                self.state = State::FirstLastLine;
            }
            State::FirstLastLine => {
                if ended {
                    self.ram_addr = 0;
                    self.save = true;
                    self.begin_line = true;
                    self.state = State::FirstFirstLine;
                }
            }
            State::FirstFirstLine => {
                if ended {
                    self.save = false;
                    self.begin_line = true;
                    self.state = State::FirstSecondLine;
                }
            }
            State::FirstSecondLine => {
                if ended {
                    self.finished = true;
                    self.state = State::Idle;
                }
            }
            State::MiddleInit => {
                self.begin_line = true;
                self.state = State::MiddleRead;
            }
            State::MiddleRead => {
                if ended {
                    self.finished = true;
                    self.state = State::Idle;
                }
            }
            State::Last => {
                window.rotate();
                self.finished = true;
                self.state = State::Idle;
            }
        }

        ram.tick(addr_now, 0, false);
    }
}
