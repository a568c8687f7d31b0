//! Attribute schema
//!
//! [`SchemaBuilder`] collects attribute definitions and registers them, in
//! insertion order, against a single [`BitAllocator`]. The resulting
//! [`EncodingSchema`] owns the registered attributes, looks them up by name
//! and knows how large an edge record has to be.

use std::collections::HashMap;

use butterfly_common::{suggest_correction, Error, Result};

use crate::access::EdgeBytes;
use crate::allocator::BitAllocator;
use crate::config::SchemaConfig;
use crate::encoded_value::EncodedValue;
use crate::int_encoded::{IntEncodedValueImpl, IntSettings};
use crate::name::NameValidator;
use crate::snapshot::SchemaSnapshot;

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    validator: NameValidator,
    values: Vec<IntEncodedValueImpl>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: NameValidator) -> Self {
        Self {
            validator,
            values: Vec::new(),
        }
    }

    /// Builder holding every attribute of a schema definition file
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        let mut builder = Self::with_validator(config.validator());
        for attr in &config.attributes {
            builder.add(&attr.name, attr.settings())?;
        }
        Ok(builder)
    }

    /// Define a new integer attribute, validated with this builder's name rules
    pub fn add(&mut self, name: &str, settings: IntSettings) -> Result<&mut Self> {
        let value = IntEncodedValueImpl::with_validator(name, settings, &self.validator)?;
        self.add_value(value)
    }

    /// Add an attribute constructed elsewhere; it must not be registered yet
    pub fn add_value(&mut self, value: IntEncodedValueImpl) -> Result<&mut Self> {
        if self.values.iter().any(|v| v.name() == value.name()) {
            return Err(Error::Config(format!(
                "attribute {} already defined",
                value.name()
            )));
        }
        self.values.push(value);
        Ok(self)
    }

    /// Register all attributes against one allocator session
    pub fn build(self) -> Result<EncodingSchema> {
        let mut allocator = BitAllocator::new();
        let mut values = self.values;
        let mut total_bits = 0;
        for value in values.iter_mut() {
            total_bits += value.init(&mut allocator)?;
        }

        let bytes_per_edge = allocator.required_bytes();
        tracing::debug!(
            attributes = values.len(),
            total_bits,
            bytes_per_edge,
            "finalized attribute schema"
        );
        EncodingSchema::from_values(values, bytes_per_edge)
    }
}

/// Registered attributes plus the edge record size they need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingSchema {
    values: Vec<IntEncodedValueImpl>,
    index: HashMap<String, usize>,
    bytes_per_edge: usize,
}

impl EncodingSchema {
    fn from_values(values: Vec<IntEncodedValueImpl>, bytes_per_edge: usize) -> Result<Self> {
        let mut index = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            if index.insert(value.name().to_string(), i).is_some() {
                return Err(Error::Config(format!(
                    "attribute {} already defined",
                    value.name()
                )));
            }
        }
        Ok(Self {
            values,
            index,
            bytes_per_edge,
        })
    }

    /// Restore a schema from its snapshot, trusting the persisted layout
    pub fn from_snapshot(snapshot: SchemaSnapshot) -> Result<Self> {
        let values = snapshot
            .attributes
            .into_iter()
            .map(IntEncodedValueImpl::from_snapshot)
            .collect();
        Self::from_values(values, snapshot.bytes_per_edge)
    }

    pub fn snapshot(&self) -> SchemaSnapshot {
        SchemaSnapshot {
            bytes_per_edge: self.bytes_per_edge,
            attributes: self.values.iter().map(|v| v.to_snapshot()).collect(),
        }
    }

    pub fn bytes_per_edge(&self) -> usize {
        self.bytes_per_edge
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attributes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &IntEncodedValueImpl> {
        self.values.iter()
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&IntEncodedValueImpl> {
        match self.index.get(name) {
            Some(&i) => Ok(&self.values[i]),
            None => Err(self.unknown(name)),
        }
    }

    /// Mutable access for writing; writes update the attribute's running maximum
    pub fn get_mut(&mut self, name: &str) -> Result<&mut IntEncodedValueImpl> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.values[i]),
            None => Err(self.unknown(name)),
        }
    }

    /// Zeroed edge records sized for this schema
    pub fn new_edge_store(&self, edge_count: usize) -> EdgeBytes {
        EdgeBytes::new(edge_count, self.bytes_per_edge)
    }

    fn unknown(&self, name: &str) -> Error {
        let names: Vec<&str> = self.values.iter().map(|v| v.name()).collect();
        Error::UnknownAttribute {
            name: name.to_string(),
            suggestion: suggest_correction(name, &names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoded_value::{Direction, IntEncodedValue};

    fn road_schema() -> EncodingSchema {
        let mut builder = SchemaBuilder::new();
        builder
            .add("max_speed", IntSettings::new(5).with_two_directions(true))
            .unwrap()
            .add("slope", IntSettings::new(7).with_negate_reverse(true))
            .unwrap()
            .add("road_class", IntSettings::new(20))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_layout() {
        let schema = road_schema();
        assert_eq!(schema.len(), 3);

        let speed = schema.get("max_speed").unwrap();
        assert_eq!(speed.fwd_placement().bit_shift, 0);
        assert_eq!(speed.bwd_placement().unwrap().bit_shift, 5);

        let slope = schema.get("slope").unwrap();
        assert_eq!(slope.fwd_placement().bit_shift, 10);
        assert_eq!(slope.fwd_placement().word_index, 0);

        // 18 bits used, 20 more do not fit
        let class = schema.get("road_class").unwrap();
        assert_eq!(class.fwd_placement().word_index, 1);
        assert_eq!(class.fwd_placement().bit_shift, 0);
        assert_eq!(schema.bytes_per_edge(), 8);
    }

    #[test]
    fn test_attributes_share_records() {
        let mut schema = road_schema();
        let mut edges = schema.new_edge_store(4);

        schema.get_mut("max_speed").unwrap().set_int(Direction::Forward, 2, &mut edges, 31).unwrap();
        schema.get_mut("max_speed").unwrap().set_int(Direction::Reverse, 2, &mut edges, 12).unwrap();
        schema.get_mut("slope").unwrap().set_int(Direction::Forward, 2, &mut edges, -5).unwrap();
        schema.get_mut("road_class").unwrap().set_int(Direction::Forward, 2, &mut edges, 1_000_000).unwrap();

        let speed = schema.get("max_speed").unwrap();
        assert_eq!(speed.get_int(Direction::Forward, 2, &edges).unwrap(), 31);
        assert_eq!(speed.get_int(Direction::Reverse, 2, &edges).unwrap(), 12);
        assert_eq!(schema.get("slope").unwrap().get_int(Direction::Reverse, 2, &edges).unwrap(), 5);
        assert_eq!(schema.get("road_class").unwrap().get_int(Direction::Forward, 2, &edges).unwrap(), 1_000_000);
        assert!(edges.record(1).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_duplicate_name() {
        let mut builder = SchemaBuilder::new();
        builder.add("speed", IntSettings::new(5)).unwrap();
        assert!(matches!(builder.add("speed", IntSettings::new(3)), Err(Error::Config(_))));
    }

    #[test]
    fn test_registered_value_rejected_by_build() {
        let mut value = IntEncodedValueImpl::new("speed", 5, false).unwrap();
        value.init(&mut BitAllocator::new()).unwrap();

        let mut builder = SchemaBuilder::new();
        builder.add_value(value).unwrap();
        assert!(matches!(builder.build(), Err(Error::State(_))));
    }

    #[test]
    fn test_unknown_attribute_suggestion() {
        let schema = road_schema();
        match schema.get("max_sped") {
            Err(Error::UnknownAttribute { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("max_speed"));
            }
            other => panic!("expected UnknownAttribute, got {other:?}"),
        }
        assert!(!schema.has("max_sped"));
        assert!(schema.has("slope"));
    }

    #[test]
    fn test_snapshot_roundtrip_keeps_data_readable() {
        let mut schema = road_schema();
        let mut edges = schema.new_edge_store(1);
        schema.get_mut("slope").unwrap().set_int(Direction::Reverse, 0, &mut edges, 100).unwrap();

        let json = schema.snapshot().to_json().unwrap();
        let restored = EncodingSchema::from_snapshot(SchemaSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored, schema);

        let slope = restored.get("slope").unwrap();
        assert_eq!(slope.get_int(Direction::Forward, 0, &edges).unwrap(), -100);
        assert_eq!(slope.max_or_max_storable_int(), -100);
    }

    #[test]
    fn test_from_config() {
        let cfg = SchemaConfig::from_json(
            r#"{"reserved_words":[],"attributes":[{"name":"match","bits":2},{"name":"lanes","bits":3,"min_storable":1}]}"#,
        )
        .unwrap();
        let schema = SchemaBuilder::from_config(&cfg).unwrap().build().unwrap();
        assert_eq!(schema.get("lanes").unwrap().max_storable_int(), 8);
        assert_eq!(schema.get("lanes").unwrap().fwd_placement().bit_shift, 2);
        assert_eq!(schema.bytes_per_edge(), 4);
    }

    #[test]
    fn test_empty_schema() {
        let schema = SchemaBuilder::new().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.bytes_per_edge(), 0);
    }
}
