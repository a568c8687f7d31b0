//! Slot decoding
//!
//! Two ways to pull a slot out of an edge record: the word path masks the
//! whole 32-bit word, the byte fast path reads only the 1-3 bytes the slot
//! actually covers. Both must return the same value for every bit pattern.

use crate::access::EdgeBytesAccess;
use crate::allocator::Placement;

#[inline]
fn low_mask(bits: u32) -> u32 {
    debug_assert!(bits <= 24);
    (1u32 << bits) - 1
}

/// Decode a slot that fits in one byte
#[inline]
pub fn extract_byte(b0: u8, bits: u32, shift: u32) -> u32 {
    ((b0 as u32) >> shift) & low_mask(bits)
}

/// Decode a slot that fits in two consecutive bytes, `b0` being the lower one
#[inline]
pub fn extract_two_bytes(b1: u8, b0: u8, bits: u32, shift: u32) -> u32 {
    let v = ((b1 as u32) << 8) | (b0 as u32);
    (v >> shift) & low_mask(bits)
}

/// Decode a slot that fits in three consecutive bytes, `b0` being the lowest one
#[inline]
pub fn extract_three_bytes(b2: u8, b1: u8, b0: u8, bits: u32, shift: u32) -> u32 {
    let v = ((b2 as u32) << 16) | ((b1 as u32) << 8) | (b0 as u32);
    (v >> shift) & low_mask(bits)
}

/// Decode a slot from its full word
#[inline]
pub fn extract_word(word: u32, mask: u32, shift: u32) -> u32 {
    (word & mask) >> shift
}

/// Read the raw (unsigned, unshifted-by-minimum) value of a slot.
///
/// With `byte_support` the number of bytes read is chosen from the slot's
/// footprint inside its first byte (`byte_bit_shift + bits`); slots spanning
/// all four bytes, and attributes without byte support, use the word path.
pub fn extract_value<A: EdgeBytesAccess + ?Sized>(
    edge_id: u32,
    access: &A,
    slot: &Placement,
    bits: u32,
    byte_support: bool,
) -> u32 {
    let offset = slot.word_byte_offset();
    if !byte_support {
        return extract_word(access.get_int(edge_id, offset), slot.bit_mask, slot.bit_shift);
    }

    let shift = slot.byte_bit_shift();
    let offset = offset + slot.byte_offset() as usize;
    let footprint = shift + bits;
    if footprint <= 8 {
        extract_byte(access.get_byte(edge_id, offset), bits, shift)
    } else if footprint <= 16 {
        extract_two_bytes(
            access.get_byte(edge_id, offset + 1),
            access.get_byte(edge_id, offset),
            bits,
            shift,
        )
    } else if footprint <= 24 {
        extract_three_bytes(
            access.get_byte(edge_id, offset + 2),
            access.get_byte(edge_id, offset + 1),
            access.get_byte(edge_id, offset),
            bits,
            shift,
        )
    } else {
        extract_word(
            access.get_int(edge_id, slot.word_byte_offset()),
            slot.bit_mask,
            slot.bit_shift,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::EdgeBytes;
    use crate::allocator::BitAllocator;

    #[test]
    fn test_extract_byte() {
        assert_eq!(extract_byte(0b1011_0100, 3, 2), 0b101);
        assert_eq!(extract_byte(0xff, 8, 0), 0xff);
    }

    #[test]
    fn test_extract_two_bytes() {
        // bits 6..16 of 0xABCD
        assert_eq!(extract_two_bytes(0xab, 0xcd, 10, 6), 0xabcd >> 6);
    }

    #[test]
    fn test_extract_three_bytes() {
        assert_eq!(extract_three_bytes(0x12, 0x34, 0x56, 20, 3), (0x123456 >> 3) & 0xfffff);
    }

    #[test]
    fn test_paths_agree_on_every_shift() {
        let mut edges = EdgeBytes::new(1, 4);
        edges.set_int(0, 0, 0xdead_beef);

        for bits in 1..=32u32 {
            for shift in 0..=(32 - bits) {
                let mask = (((1u64 << bits) - 1) as u32) << shift;
                let slot = Placement { word_index: 0, bit_shift: shift, bit_mask: mask };
                let fast = extract_value(0, &edges, &slot, bits, true);
                let slow = extract_value(0, &edges, &slot, bits, false);
                assert_eq!(fast, slow, "bits={bits} shift={shift}");
            }
        }
    }

    #[test]
    fn test_second_word() {
        let mut alloc = BitAllocator::new();
        alloc.next(32);
        let slot = alloc.next(7);

        let mut edges = EdgeBytes::new(1, 8);
        edges.set_int(0, 0, u32::MAX);
        edges.set_int(0, 4, 0x55);
        assert_eq!(extract_value(0, &edges, &slot, 7, true), 0x55);
    }
}
