/// Index of the only set bit in `mask`.
///
/// Returns `None` when no bit or more than one bit is set. The index is
/// found by halving the search window (16, 8, 4, 2, 1 bits) instead of
/// scanning.
#[inline]
pub fn isolated_bit_index(mask: u32) -> Option<u32> {
    if mask == 0 || mask & (mask - 1) != 0 {
        return None;
    }
    let mut calc = mask;
    let mut index = 0;
    if calc > 0xffff {
        calc >>= 16;
        index += 16;
    }
    if calc > 0xff {
        calc >>= 8;
        index += 8;
    }
    if calc > 0xf {
        calc >>= 4;
        index += 4;
    }
    if calc > 0x3 {
        calc >>= 2;
        index += 2;
    }
    Some(index + (calc >> 1))
}
