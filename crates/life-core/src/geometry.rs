//! Static frame geometry.

use crate::CELLS_PER_WORD;

/// Frame geometry for a pipeline instance.
///
/// Fixed at construction; nothing in the pipeline is runtime-resizable. All
/// addressing is linear and row-major: word `w` of line `l` lives at
/// `l * words_per_line + w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    words_per_line: u32,
    active_lines: u32,
}

impl FrameGeometry {
    /// Create a frame geometry.
    ///
    /// # Panics
    ///
    /// Panics if `words_per_line < 4` (the window reader's look-ahead prime
    /// needs four distinct word positions) or `active_lines < 2`.
    #[must_use]
    pub fn new(words_per_line: u32, active_lines: u32) -> Self {
        assert!(words_per_line >= 4, "need at least 4 words per line");
        assert!(active_lines >= 2, "need at least 2 active lines");
        Self {
            words_per_line,
            active_lines,
        }
    }

    #[must_use]
    pub const fn words_per_line(self) -> u32 {
        self.words_per_line
    }

    #[must_use]
    pub const fn active_lines(self) -> u32 {
        self.active_lines
    }

    /// Total words in one frame.
    #[must_use]
    pub const fn total_words(self) -> u32 {
        self.words_per_line * self.active_lines
    }

    /// Cells in one line.
    #[must_use]
    pub const fn cells_per_line(self) -> u32 {
        self.words_per_line * CELLS_PER_WORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_sizes() {
        let g = FrameGeometry::new(4, 5);
        assert_eq!(g.words_per_line(), 4);
        assert_eq!(g.active_lines(), 5);
        assert_eq!(g.total_words(), 20);
        assert_eq!(g.cells_per_line(), 64);
    }

    #[test]
    #[should_panic(expected = "words per line")]
    fn rejects_narrow_lines() {
        let _ = FrameGeometry::new(3, 5);
    }

    #[test]
    #[should_panic(expected = "active lines")]
    fn rejects_short_frames() {
        let _ = FrameGeometry::new(4, 1);
    }
}
