//! Frame position counters.

use life_core::FrameGeometry;

/// Tracks the word, line and frame currently being produced.
///
/// The word counter advances once per processed word; the line and frame
/// counters ripple from it. The frame counter is free-running and never
/// wraps in practice.
#[derive(Debug, Clone, Copy)]
pub struct FrameCounters {
    geometry: FrameGeometry,
    word: u32,
    line: u32,
    frame: u32,
}

impl FrameCounters {
    #[must_use]
    pub const fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            word: 0,
            line: 0,
            frame: 0,
        }
    }

    /// Word index within the current line.
    #[must_use]
    pub const fn word(&self) -> u32 {
        self.word
    }

    /// Line index within the current frame.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Frames completed so far.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// True while the word counter sits on the line's last word.
    #[must_use]
    pub const fn on_last_word(&self) -> bool {
        self.word == self.geometry.words_per_line() - 1
    }

    /// True while the line counter sits on the frame's last line.
    #[must_use]
    pub const fn on_last_line(&self) -> bool {
        self.line == self.geometry.active_lines() - 1
    }

    /// Advance by one word, rippling into the line and frame counters.
    /// Returns true when this word completed a line.
    pub fn increment(&mut self) -> bool {
        if !self.on_last_word() {
            self.word += 1;
            return false;
        }
        self.word = 0;
        if self.on_last_line() {
            self.line = 0;
            self.frame += 1;
        } else {
            self.line += 1;
        }
        true
    }
}
