//! Schema definition file
//!
//! ```json
//! {
//!   "reserved_words": ["speed"],
//!   "attributes": [
//!     { "name": "max_speed", "bits": 5, "store_two_directions": true },
//!     { "name": "slope", "bits": 7, "negate_reverse": true },
//!     { "name": "lanes", "bits": 3, "min_storable": 1, "byte_support": false }
//!   ]
//! }
//! ```
//!
//! `reserved_words` replaces the default deny-list when present.

use std::fs;
use std::path::Path;

use butterfly_common::Result;
use serde::{Deserialize, Serialize};

use crate::int_encoded::IntSettings;
use crate::name::NameValidator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_words: Option<Vec<String>>,
    pub attributes: Vec<AttributeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
    pub name: String,
    pub bits: u32,
    #[serde(default)]
    pub min_storable: i32,
    #[serde(default)]
    pub negate_reverse: bool,
    #[serde(default)]
    pub store_two_directions: bool,
    #[serde(default = "default_byte_support")]
    pub byte_support: bool,
}

fn default_byte_support() -> bool {
    true
}

impl AttributeConfig {
    pub fn settings(&self) -> IntSettings {
        IntSettings::new(self.bits)
            .with_min_storable(self.min_storable)
            .with_negate_reverse(self.negate_reverse)
            .with_two_directions(self.store_two_directions)
            .with_byte_support(self.byte_support)
    }
}

impl SchemaConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema definition from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn validator(&self) -> NameValidator {
        match &self.reserved_words {
            Some(words) => NameValidator::with_reserved_words(words.iter().cloned()),
            None => NameValidator::default(),
        }
    }
}
