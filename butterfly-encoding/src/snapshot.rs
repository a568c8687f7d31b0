//! Persisted schema form
//!
//! A snapshot carries every attribute with its registered layout, so a graph
//! opened later reads its edge records without running the allocator again.
//! Field names are the on-disk JSON keys.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use butterfly_common::Result;
use serde::{Deserialize, Serialize};

/// One registered integer attribute, field for field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntEncodedValueSnapshot {
    pub name: String,
    /// Stored width, including the negation bit
    pub bits: u32,
    pub min_storable_value: i32,
    pub max_storable_value: i32,
    /// Running maximum, `i32::MIN` if never written
    pub max_value: i32,
    pub negate_reverse_direction: bool,
    pub store_two_directions: bool,
    pub fwd_data_index: u32,
    /// Zero unless `store_two_directions`
    pub bwd_data_index: u32,
    pub fwd_shift: u32,
    pub bwd_shift: u32,
    pub fwd_mask: u32,
    pub bwd_mask: u32,
    pub byte_support: bool,
}

/// All attributes of a schema in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub bytes_per_edge: usize,
    pub attributes: Vec<IntEncodedValueSnapshot>,
}

impl SchemaSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty-printed JSON
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
