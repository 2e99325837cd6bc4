//! Conway life rule evaluator.
//!
//! The per-cell rule is pure combinational logic: a cell is alive in the
//! next generation iff its 3x3 neighbourhood holds exactly 3 live cells, or
//! the centre is alive and the neighbourhood holds exactly 4. The word
//! evaluator applies the rule to 16 lanes at once, each lane consuming a
//! horizontally adjacent 3-bit slice of the three 18-bit window rows
//! (16 data bits plus one wrap bit on each side).

/// Next state of a single cell from its 3x3 neighbourhood.
///
/// `bits` packs the neighbourhood row-major into the low 9 bits; bit 4 is
/// the centre cell.
#[must_use]
pub fn life_cell(bits: u16) -> bool {
    let total = (bits & 0x1FF).count_ones();
    total == 3 || (bits & 0x10 != 0 && total == 4)
}

/// Next generation of 16 cells from three 18-bit rows.
///
/// Each row carries 16 data bits in bits 1..=16, the preceding word's top
/// bit in bit 0 and the following word's bottom bit in bit 17. Lane `i`
/// reads bits `i..i+3` of every row.
#[must_use]
pub fn life_word(rows: [u32; 3]) -> u16 {
    let mut out = 0u16;
    for lane in 0..16 {
        let bits = ((rows[0] >> lane) & 7)
            | (((rows[1] >> lane) & 7) << 3)
            | (((rows[2] >> lane) & 7) << 6);
        out |= u16::from(life_cell(bits as u16)) << lane;
    }
    out
}

/// Reference model: next generation of a row's centre cells.
///
/// Takes three rows of `n + 2` cells (wrap bits included on both ends) and
/// returns the `n` next-generation cells of the centre row. Used to check
/// the word evaluator and the full pipeline against an unpacked bit list.
///
/// # Panics
///
/// Panics if the rows differ in length.
#[must_use]
pub fn life_row(above: &[bool], centre: &[bool], below: &[bool]) -> Vec<bool> {
    assert_eq!(above.len(), centre.len());
    assert_eq!(centre.len(), below.len());
    (1..centre.len() - 1)
        .map(|i| {
            let mut bits = 0u16;
            for (row_idx, row) in [above, centre, below].into_iter().enumerate() {
                for k in 0..3 {
                    bits |= u16::from(row[i - 1 + k]) << (row_idx as u16 * 3 + k as u16);
                }
            }
            life_cell(bits)
        })
        .collect()
}
