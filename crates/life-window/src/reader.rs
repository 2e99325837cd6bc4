//! Neighbourhood reader for the window buffer.

use crate::WindowBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Wait,
    ReadPrev,
    Read0,
    Read1,
    Loop,
    Ended,
}

/// Streams neighbourhood-ready words out of a [`WindowBuffer`].
///
/// For each of the line's words this produces three 18-bit lanes, one per
/// window line: bit 0 is the previous word's top cell, bits 1..=16 are the
/// word itself, bit 17 is the next word's bottom cell. The previous word of
/// word 0 is the line's last word and vice versa, closing the horizontal
/// wrap. A pass reads `words_per_line + 2` words to cover both wrap edges.
///
/// Start a pass with [`begin`](WindowReader::begin); after a few priming
/// ticks [`valid`](WindowReader::valid) holds for exactly `words_per_line`
/// ticks, then [`ended`](WindowReader::ended) pulses once. The caller ticks
/// the window buffer after this machine each cycle.
pub struct WindowReader {
    words_per_line: u32,
    state: State,
    count: u32,
    /// 17-bit shift registers, one per window line: the previous word's top
    /// cell followed by the current word.
    sr: [u32; 3],
    begin_pending: bool,
    last_line: bool,
    valid: bool,
    ended: bool,
    out_count: u32,
    life_data: [u32; 3],
    curr_word: u16,
}

impl WindowReader {
    /// Create a reader for lines of `words_per_line` words.
    ///
    /// # Panics
    ///
    /// Panics if `words_per_line` is less than four.
    #[must_use]
    pub fn new(words_per_line: u32) -> Self {
        assert!(words_per_line >= 4, "need at least four words per line");
        Self {
            words_per_line,
            state: State::Wait,
            count: 0,
            sr: [0; 3],
            begin_pending: false,
            last_line: false,
            valid: false,
            ended: false,
            out_count: 0,
            life_data: [0; 3],
            curr_word: 0,
        }
    }

    /// Start a read pass on the next tick. Only valid while waiting.
    pub fn begin(&mut self) {
        self.begin_pending = true;
    }

    /// Substitute the window's saved line for its newest line, for passes
    /// over the frame's last line.
    pub fn set_last_line(&mut self, last: bool) {
        self.last_line = last;
    }

    /// True while [`life_data`](WindowReader::life_data) holds a word's
    /// neighbourhood.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// True for the one tick after a pass's final valid word.
    #[must_use]
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Index of the word currently presented.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.out_count
    }

    /// The three 18-bit neighbourhood lanes, window lines top to bottom.
    #[must_use]
    pub fn life_data(&self) -> [u32; 3] {
        self.life_data
    }

    /// The presented word of the middle line, for display passthrough.
    #[must_use]
    pub fn curr_word(&self) -> u16 {
        self.curr_word
    }

    /// Run one cycle against the window buffer.
    pub fn tick(&mut self, window: &mut WindowBuffer) {
        window.set_saved(self.last_line);
        let rd = window.read_data();

        self.valid = self.state == State::Loop;
        self.ended = self.state == State::Ended;
        self.out_count = self.count;
        for (ld, (&sr, &word)) in self
            .life_data
            .iter_mut()
            .zip(self.sr.iter().zip(rd.iter()))
        {
            *ld = sr | (u32::from(word) & 1) << 17;
        }
        self.curr_word = (self.life_data[1] >> 1) as u16;

        match self.state {
            State::Wait => {
                if self.begin_pending {
                    self.begin_pending = false;
                    self.count = 0;
                    self.state = State::ReadPrev;
                }
            }
            State::ReadPrev => {
                window.set_read_addr(self.words_per_line - 1);
                self.state = State::Read0;
            }
            State::Read0 => {
                window.set_read_addr(0);
                self.state = State::Read1;
            }
            State::Read1 => {
                window.set_read_addr(1);
                self.state = State::Loop;
            }
            State::Loop => {
                window.set_read_addr((self.count + 2) % self.words_per_line);
                if self.count == self.words_per_line - 1 {
                    self.state = State::Ended;
                }
                self.count += 1;
            }
            State::Ended => {
                self.state = State::Wait;
            }
        }

        for (sr, &word) in self.sr.iter_mut().zip(rd.iter()) {
            *sr = (*sr >> 16 & 1) | u32::from(word) << 1;
        }
    }
}
