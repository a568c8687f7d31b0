//! Bit-layout allocator
//!
//! Hands out contiguous bit ranges inside the 32-bit words of an edge record.
//! One allocator is shared by every attribute registered in a schema build;
//! it only ever moves forward.

/// Where an attribute slot lives inside an edge record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Index of the 32-bit word within the record
    pub word_index: u32,
    /// Position of the lowest bit of the slot within the word
    pub bit_shift: u32,
    /// `bits` set bits starting at `bit_shift`
    pub bit_mask: u32,
}

impl Placement {
    /// Byte offset of the word inside the edge record
    #[inline]
    pub fn word_byte_offset(&self) -> usize {
        self.word_index as usize * 4
    }

    /// Byte within the word holding the slot's lowest bit
    #[inline]
    pub fn byte_offset(&self) -> u32 {
        self.bit_shift / 8
    }

    /// Shift of the slot's lowest bit within that byte
    #[inline]
    pub fn byte_bit_shift(&self) -> u32 {
        self.bit_shift % 8
    }
}

/// Shared layout cursor for one schema build session.
///
/// A request that does not fit in the remainder of the current word starts at
/// the beginning of the next one, so a slot never straddles two words.
#[derive(Debug, Clone, Default)]
pub struct BitAllocator {
    /// Word the cursor is in, `None` before the first allocation
    word_index: Option<u32>,
    /// Next free bit in the current word
    next_shift: u32,
    bits_requested: u32,
}

impl BitAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `bits` contiguous bits, `1..=32`.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is zero or larger than a word. Attribute constructors
    /// validate their width before they ever reach the allocator.
    pub fn next(&mut self, bits: u32) -> Placement {
        assert!(
            (1..=32).contains(&bits),
            "cannot allocate {bits} bits in a 32-bit word"
        );

        let word_index = match self.word_index {
            Some(idx) if self.next_shift + bits <= 32 => idx,
            Some(idx) => {
                self.next_shift = 0;
                idx + 1
            }
            None => {
                self.next_shift = 0;
                0
            }
        };
        self.word_index = Some(word_index);

        let bit_shift = self.next_shift;
        let bit_mask = (((1u64 << bits) - 1) as u32) << bit_shift;
        self.next_shift += bits;
        self.bits_requested += bits;

        Placement {
            word_index,
            bit_shift,
            bit_mask,
        }
    }

    /// Number of words touched so far, i.e. the minimal record size in words
    pub fn required_words(&self) -> u32 {
        self.word_index.map_or(0, |idx| idx + 1)
    }

    /// Minimal record size in bytes
    pub fn required_bytes(&self) -> usize {
        self.required_words() as usize * 4
    }

    /// Sum of all requested widths, excluding padding at word ends
    pub fn bits_requested(&self) -> u32 {
        self.bits_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_allocation_starts_at_zero() {
        let mut alloc = BitAllocator::new();
        assert_eq!(alloc.required_words(), 0);

        let p = alloc.next(5);
        assert_eq!(p, Placement { word_index: 0, bit_shift: 0, bit_mask: 0b11111 });
        assert_eq!(alloc.required_bytes(), 4);
    }

    #[test]
    fn test_allocations_are_packed() {
        let mut alloc = BitAllocator::new();
        alloc.next(5);
        let p = alloc.next(3);
        assert_eq!(p.word_index, 0);
        assert_eq!(p.bit_shift, 5);
        assert_eq!(p.bit_mask, 0b111 << 5);
        assert_eq!(p.byte_offset(), 0);
        assert_eq!(p.byte_bit_shift(), 5);

        let p = alloc.next(10);
        assert_eq!(p.bit_shift, 8);
        assert_eq!(p.byte_offset(), 1);
        assert_eq!(p.byte_bit_shift(), 0);
    }

    #[test]
    fn test_no_straddling() {
        let mut alloc = BitAllocator::new();
        alloc.next(30);
        let p = alloc.next(3);
        assert_eq!(p.word_index, 1);
        assert_eq!(p.bit_shift, 0);
        assert_eq!(p.word_byte_offset(), 4);
        assert_eq!(alloc.bits_requested(), 33);
        assert_eq!(alloc.required_words(), 2);
    }

    #[test]
    fn test_exact_fit_stays_in_word() {
        let mut alloc = BitAllocator::new();
        alloc.next(16);
        let p = alloc.next(16);
        assert_eq!(p.word_index, 0);
        assert_eq!(p.bit_shift, 16);
        assert_eq!(p.bit_mask, 0xffff_0000);

        let p = alloc.next(1);
        assert_eq!(p.word_index, 1);
        assert_eq!(p.bit_shift, 0);
    }

    #[test]
    fn test_full_word() {
        let mut alloc = BitAllocator::new();
        alloc.next(1);
        let p = alloc.next(32);
        assert_eq!(p.word_index, 1);
        assert_eq!(p.bit_mask, u32::MAX);
    }

    #[test]
    #[should_panic]
    fn test_zero_bits_panics() {
        BitAllocator::new().next(0);
    }
}
