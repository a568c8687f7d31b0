//! Edge record access
//!
//! Word- and byte-granularity access to the per-edge attribute records. The
//! encoding layer is the only interpreter of the bits stored here; this module
//! just moves bytes.
//!
//! Layout (little-endian, one fixed-size record per edge):
//!
//! ```text
//! edge 0: [w0 b0 b1 b2 b3][w1 b0 b1 b2 b3]...
//! edge 1: [w0 b0 b1 b2 b3][w1 b0 b1 b2 b3]...
//! ```
//!
//! Words are composed least-significant-byte first, so byte `k` of a word
//! holds bits `8k..8k+8`. The byte fast path of the integer codec relies on it.

/// Raw access to edge records, addressed by edge id and byte offset within the record.
///
/// Implementations are not expected to synchronise. A word write is a plain
/// store: callers that share a word between attributes must serialise writers.
pub trait EdgeBytesAccess {
    /// Read the 4-byte word starting at `byte_offset` of the edge's record
    fn get_int(&self, edge_id: u32, byte_offset: usize) -> u32;

    /// Overwrite the 4-byte word starting at `byte_offset` of the edge's record
    fn set_int(&mut self, edge_id: u32, byte_offset: usize, value: u32);

    /// Read a single byte of the edge's record
    fn get_byte(&self, edge_id: u32, byte_offset: usize) -> u8;
}

/// In-memory edge record store backed by a flat byte vector.
///
/// Out-of-range edge ids or offsets panic like slice indexing does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeBytes {
    bytes_per_edge: usize,
    data: Vec<u8>,
}

impl EdgeBytes {
    /// Allocate zeroed records for `edge_count` edges of `bytes_per_edge` bytes each
    pub fn new(edge_count: usize, bytes_per_edge: usize) -> Self {
        Self {
            bytes_per_edge,
            data: vec![0u8; edge_count * bytes_per_edge],
        }
    }

    pub fn bytes_per_edge(&self) -> usize {
        self.bytes_per_edge
    }

    pub fn edge_count(&self) -> usize {
        if self.bytes_per_edge == 0 {
            0
        } else {
            self.data.len() / self.bytes_per_edge
        }
    }

    /// Raw bytes of one edge record
    pub fn record(&self, edge_id: u32) -> &[u8] {
        let start = self.record_start(edge_id);
        &self.data[start..start + self.bytes_per_edge]
    }

    /// Overwrite one edge record, e.g. when loading a record captured elsewhere
    pub fn set_record(&mut self, edge_id: u32, bytes: &[u8]) {
        assert_eq!(
            bytes.len(),
            self.bytes_per_edge,
            "record length mismatch for edge {edge_id}"
        );
        let start = self.record_start(edge_id);
        self.data[start..start + self.bytes_per_edge].copy_from_slice(bytes);
    }

    #[inline]
    fn record_start(&self, edge_id: u32) -> usize {
        edge_id as usize * self.bytes_per_edge
    }
}

impl EdgeBytesAccess for EdgeBytes {
    #[inline]
    fn get_int(&self, edge_id: u32, byte_offset: usize) -> u32 {
        let pos = self.record_start(edge_id) + byte_offset;
        u32::from_le_bytes([
            self.data[pos],
            self.data[pos + 1],
            self.data[pos + 2],
            self.data[pos + 3],
        ])
    }

    #[inline]
    fn set_int(&mut self, edge_id: u32, byte_offset: usize, value: u32) {
        let pos = self.record_start(edge_id) + byte_offset;
        self.data[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn get_byte(&self, edge_id: u32, byte_offset: usize) -> u8 {
        self.data[self.record_start(edge_id) + byte_offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_little_endian() {
        let mut edges = EdgeBytes::new(2, 8);
        edges.set_int(1, 4, 0x1234_5678);

        assert_eq!(edges.get_int(1, 4), 0x1234_5678);
        assert_eq!(edges.get_byte(1, 4), 0x78);
        assert_eq!(edges.get_byte(1, 5), 0x56);
        assert_eq!(edges.get_byte(1, 6), 0x34);
        assert_eq!(edges.get_byte(1, 7), 0x12);
    }

    #[test]
    fn test_records_are_independent() {
        let mut edges = EdgeBytes::new(3, 4);
        edges.set_int(0, 0, u32::MAX);
        edges.set_int(2, 0, 7);

        assert_eq!(edges.get_int(1, 0), 0);
        assert_eq!(edges.record(0), &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(edges.record(2), &[7, 0, 0, 0]);
        assert_eq!(edges.edge_count(), 3);
    }

    #[test]
    fn test_set_record() {
        let mut edges = EdgeBytes::new(2, 4);
        edges.set_record(1, &[1, 2, 3, 4]);
        assert_eq!(edges.get_int(1, 0), 0x0403_0201);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_edge_panics() {
        let edges = EdgeBytes::new(1, 4);
        edges.get_int(1, 0);
    }
}
