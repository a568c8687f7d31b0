//! Attribute contract
//!
//! An encoded value is a named, fixed-width value attached to a directed edge.
//! It is registered once against the schema's [`BitAllocator`] and afterwards
//! reads and writes its bits in the edge records.

use butterfly_common::Result;

use crate::access::EdgeBytesAccess;
use crate::allocator::BitAllocator;

/// Traversal direction of an edge relative to how it was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// A named value stored in the edge records
pub trait EncodedValue {
    fn name(&self) -> &str;

    /// Reserve this value's bits. Must be called exactly once, before any
    /// read or write; returns the number of bits consumed.
    fn init(&mut self, allocator: &mut BitAllocator) -> Result<u32>;

    /// True if forward and reverse traversal have independent slots
    fn is_store_two_directions(&self) -> bool;
}

/// An integer-valued attribute.
///
/// Writes are a read-modify-write of a word that other attributes may share.
/// Callers must not write the same edge record from several threads at once;
/// once writing is finished, reads can be shared freely.
pub trait IntEncodedValue: EncodedValue {
    /// Read the value for `direction`. Single-slot attributes ignore the
    /// direction unless they negate the reverse value.
    fn get_int(&self, direction: Direction, edge_id: u32, access: &dyn EdgeBytesAccess) -> Result<i32>;

    /// Validate and store `value` for `direction`
    fn set_int(
        &mut self,
        direction: Direction,
        edge_id: u32,
        access: &mut dyn EdgeBytesAccess,
        value: i32,
    ) -> Result<()>;

    fn max_storable_int(&self) -> i32;

    fn min_storable_int(&self) -> i32;

    /// Largest value written so far, or the storable maximum if nothing was written
    fn max_or_max_storable_int(&self) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert!(Direction::Reverse.is_reverse());
        assert!(!Direction::Forward.is_reverse());
        assert_eq!(Direction::Forward.name(), "forward");
    }
}
