//! # butterfly-encoding
//!
//! Bit-packed per-edge attributes for butterfly-osm road graphs.
//!
//! Each edge owns a fixed-size record of 32-bit words. Attributes such as
//! speed, access or slope are registered once against a shared
//! [`BitAllocator`], which gives every attribute its own bit range, and are
//! then written and read through [`IntEncodedValue`].
//!
//! ```
//! use butterfly_encoding::{Direction, IntEncodedValue, IntSettings, SchemaBuilder};
//!
//! # fn main() -> butterfly_common::Result<()> {
//! let mut builder = SchemaBuilder::new();
//! builder
//!     .add("max_speed", IntSettings::new(5).with_two_directions(true))?
//!     .add("slope", IntSettings::new(7).with_negate_reverse(true))?;
//! let mut schema = builder.build()?;
//! let mut edges = schema.new_edge_store(10);
//!
//! schema.get_mut("slope")?.set_int(Direction::Reverse, 3, &mut edges, 40)?;
//! assert_eq!(schema.get("slope")?.get_int(Direction::Forward, 3, &edges)?, -40);
//! # Ok(())
//! # }
//! ```
//!
//! Nothing here synchronises. Writes need `&mut` on both the attribute and the
//! edge store; finished stores can be read from many threads.

pub mod access;
pub mod allocator;
pub mod config;
pub mod encoded_value;
pub mod extract;
pub mod int_encoded;
pub mod name;
pub mod schema;
pub mod snapshot;

pub use butterfly_common::{Error, RangeKind, Result};

pub use access::{EdgeBytes, EdgeBytesAccess};
pub use allocator::{BitAllocator, Placement};
pub use config::{AttributeConfig, SchemaConfig};
pub use encoded_value::{Direction, EncodedValue, IntEncodedValue};
pub use int_encoded::{IntEncodedValueImpl, IntSettings};
pub use name::NameValidator;
pub use schema::{EncodingSchema, SchemaBuilder};
pub use snapshot::{IntEncodedValueSnapshot, SchemaSnapshot};
