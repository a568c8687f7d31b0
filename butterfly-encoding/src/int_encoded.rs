//! Integer attribute codec
//!
//! Stores a bounded integer in `bits` bits of an edge record, optionally with
//! a second slot for the reverse direction. With `negate_reverse` the reverse
//! value is the negated forward value: one slot, one extra bit, no second
//! slot. Values are stored offset by the storable minimum, so the raw field
//! is always unsigned.

use std::fmt;

use butterfly_common::{Error, RangeKind, Result};

use crate::access::EdgeBytesAccess;
use crate::allocator::{BitAllocator, Placement};
use crate::encoded_value::{Direction, EncodedValue, IntEncodedValue};
use crate::extract::extract_value;
use crate::name::NameValidator;
use crate::snapshot::IntEncodedValueSnapshot;

/// `max_value` before the first write. Reserved, so never a valid minimum.
pub const UNSET_MAX: i32 = i32::MIN;

/// Largest width a caller may request; negation adds one more bit on top
pub const MAX_BITS: u32 = 31;

/// Construction parameters of an [`IntEncodedValueImpl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSettings {
    pub bits: u32,
    pub min_storable: i32,
    pub negate_reverse: bool,
    pub store_two_directions: bool,
    pub byte_support: bool,
}

impl IntSettings {
    /// `bits` wide, zero based, one direction, byte fast path enabled
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            min_storable: 0,
            negate_reverse: false,
            store_two_directions: false,
            byte_support: true,
        }
    }

    pub fn with_min_storable(mut self, min_storable: i32) -> Self {
        self.min_storable = min_storable;
        self
    }

    pub fn with_negate_reverse(mut self, negate_reverse: bool) -> Self {
        self.negate_reverse = negate_reverse;
        self
    }

    pub fn with_two_directions(mut self, store_two_directions: bool) -> Self {
        self.store_two_directions = store_two_directions;
        self
    }

    pub fn with_byte_support(mut self, byte_support: bool) -> Self {
        self.byte_support = byte_support;
        self
    }
}

/// Bounded integer attribute, see the module docs for the storage scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntEncodedValueImpl {
    name: String,
    /// Stored width, including the extra bit for negation
    bits: u32,
    min_storable: i32,
    max_storable: i32,
    negate_reverse: bool,
    store_two_directions: bool,
    byte_support: bool,
    max_value: i32,
    fwd: Placement,
    bwd: Option<Placement>,
}

impl IntEncodedValueImpl {
    /// Zero-based attribute with byte support, validated against the default name rules
    pub fn new(name: &str, bits: u32, store_two_directions: bool) -> Result<Self> {
        Self::with_settings(
            name,
            IntSettings::new(bits).with_two_directions(store_two_directions),
        )
    }

    pub fn with_settings(name: &str, settings: IntSettings) -> Result<Self> {
        Self::with_validator(name, settings, &NameValidator::default())
    }

    /// Validate `name` and `settings` and build an unregistered attribute
    pub fn with_validator(
        name: &str,
        settings: IntSettings,
        validator: &NameValidator,
    ) -> Result<Self> {
        if !validator.is_valid(name) {
            return Err(Error::Config(format!(
                "attribute name wasn't valid: {name}. Use lower case letters, numbers and at most one underscore"
            )));
        }
        let IntSettings {
            bits,
            min_storable,
            negate_reverse,
            store_two_directions,
            byte_support,
        } = settings;

        if bits == 0 {
            return Err(Error::Config(format!("{name}: bits cannot be zero")));
        }
        if bits > MAX_BITS {
            return Err(Error::Config(format!(
                "{name}: the number of reserved bits cannot be more than {MAX_BITS} but was {bits}"
            )));
        }
        if negate_reverse && (min_storable != 0 || store_two_directions) {
            return Err(Error::Config(format!(
                "{name}: negating value for reverse direction only works for min_storable == 0 \
                 and !store_two_directions but was min_storable={min_storable}, store_two_directions={store_two_directions}"
            )));
        }
        if min_storable == UNSET_MAX {
            return Err(Error::Config(format!(
                "{name}: {UNSET_MAX} is not allowed as min_storable"
            )));
        }

        let max = ((1u64 << bits) - 1) as i32;
        let max_storable = max.checked_add(min_storable).ok_or_else(|| {
            Error::Config(format!(
                "{name}: min_storable={min_storable} with {bits} bits exceeds the i32 range"
            ))
        })?;

        Ok(Self {
            name: name.to_string(),
            bits: if negate_reverse { bits + 1 } else { bits },
            min_storable: if negate_reverse { -max } else { min_storable },
            max_storable,
            negate_reverse,
            store_two_directions,
            byte_support,
            max_value: UNSET_MAX,
            fwd: Placement::default(),
            bwd: None,
        })
    }

    /// Rebuild a registered attribute from its persisted form.
    ///
    /// The snapshot is trusted: neither the name rules nor the allocator run.
    pub fn from_snapshot(snapshot: IntEncodedValueSnapshot) -> Self {
        let bwd = snapshot.store_two_directions.then_some(Placement {
            word_index: snapshot.bwd_data_index,
            bit_shift: snapshot.bwd_shift,
            bit_mask: snapshot.bwd_mask,
        });
        tracing::trace!(name = %snapshot.name, "restored attribute from snapshot");
        Self {
            name: snapshot.name,
            bits: snapshot.bits,
            min_storable: snapshot.min_storable_value,
            max_storable: snapshot.max_storable_value,
            negate_reverse: snapshot.negate_reverse_direction,
            store_two_directions: snapshot.store_two_directions,
            byte_support: snapshot.byte_support,
            max_value: snapshot.max_value,
            fwd: Placement {
                word_index: snapshot.fwd_data_index,
                bit_shift: snapshot.fwd_shift,
                bit_mask: snapshot.fwd_mask,
            },
            bwd,
        }
    }

    pub fn to_snapshot(&self) -> IntEncodedValueSnapshot {
        let bwd = self.bwd.unwrap_or_default();
        IntEncodedValueSnapshot {
            name: self.name.clone(),
            bits: self.bits,
            min_storable_value: self.min_storable,
            max_storable_value: self.max_storable,
            max_value: self.max_value,
            negate_reverse_direction: self.negate_reverse,
            store_two_directions: self.store_two_directions,
            fwd_data_index: self.fwd.word_index,
            bwd_data_index: bwd.word_index,
            fwd_shift: self.fwd.bit_shift,
            bwd_shift: bwd.bit_shift,
            fwd_mask: self.fwd.bit_mask,
            bwd_mask: bwd.bit_mask,
            byte_support: self.byte_support,
        }
    }

    /// Stored width in bits, including the negation bit
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn is_negate_reverse(&self) -> bool {
        self.negate_reverse
    }

    pub fn has_byte_support(&self) -> bool {
        self.byte_support
    }

    /// An attribute is registered once its forward slot has a mask
    pub fn is_initialized(&self) -> bool {
        self.fwd.bit_mask != 0
    }

    pub fn fwd_placement(&self) -> Placement {
        self.fwd
    }

    pub fn bwd_placement(&self) -> Option<Placement> {
        self.bwd
    }

    fn check_value(&self, value: i32) -> Result<()> {
        if !self.is_initialized() {
            return Err(Error::State(format!(
                "attribute {} not initialized",
                self.name
            )));
        }
        if value > self.max_storable {
            return Err(Error::Range {
                name: self.name.clone(),
                value,
                bound: self.max_storable,
                kind: RangeKind::TooLarge,
            });
        }
        if value < self.min_storable {
            return Err(Error::Range {
                name: self.name.clone(),
                value,
                bound: self.min_storable,
                kind: RangeKind::TooSmall,
            });
        }
        Ok(())
    }

    /// Store `value` without the range check. The caller guarantees
    /// `min_storable <= value <= max_storable` on a registered attribute.
    pub(crate) fn unchecked_set(
        &mut self,
        direction: Direction,
        edge_id: u32,
        access: &mut dyn EdgeBytesAccess,
        value: i32,
    ) -> Result<()> {
        let mut reverse = direction.is_reverse();
        let mut value = value;
        if self.negate_reverse {
            if reverse {
                reverse = false;
                value = -value;
            }
        } else if reverse && !self.store_two_directions {
            return Err(Error::DirectionConflict(self.name.clone()));
        }

        let slot = if reverse {
            self.bwd.ok_or_else(|| {
                Error::State(format!("attribute {} has no reverse slot", self.name))
            })?
        } else {
            self.fwd
        };

        // Tracks the value actually stored, so negated reverse writes count with their sign flipped.
        self.max_value = self.max_value.max(value);

        let raw = (i64::from(value) - i64::from(self.min_storable)) as u32;
        let offset = slot.word_byte_offset();
        let word = access.get_int(edge_id, offset) & !slot.bit_mask;
        access.set_int(edge_id, offset, word | (raw << slot.bit_shift));
        Ok(())
    }

    #[inline]
    fn decode(&self, raw: u32) -> i32 {
        (i64::from(self.min_storable) + i64::from(raw)) as i32
    }
}

impl EncodedValue for IntEncodedValueImpl {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, allocator: &mut BitAllocator) -> Result<u32> {
        if self.is_initialized() {
            return Err(Error::State(format!(
                "cannot call init multiple times for {}",
                self.name
            )));
        }

        self.fwd = allocator.next(self.bits);
        if self.store_two_directions {
            self.bwd = Some(allocator.next(self.bits));
        }

        tracing::debug!(
            name = %self.name,
            bits = self.bits,
            fwd_word = self.fwd.word_index,
            fwd_shift = self.fwd.bit_shift,
            bwd_word = self.bwd.map(|p| p.word_index),
            bwd_shift = self.bwd.map(|p| p.bit_shift),
            "registered attribute layout"
        );

        Ok(if self.store_two_directions {
            2 * self.bits
        } else {
            self.bits
        })
    }

    fn is_store_two_directions(&self) -> bool {
        self.store_two_directions
    }
}

impl IntEncodedValue for IntEncodedValueImpl {
    fn get_int(&self, direction: Direction, edge_id: u32, access: &dyn EdgeBytesAccess) -> Result<i32> {
        if !self.is_initialized() {
            return Err(Error::State(format!(
                "attribute {} not initialized",
                self.name
            )));
        }

        // Without a reverse slot the direction only matters for negation.
        if self.store_two_directions && direction.is_reverse() {
            let bwd = self.bwd.ok_or_else(|| {
                Error::State(format!("attribute {} has no reverse slot", self.name))
            })?;
            let raw = extract_value(edge_id, access, &bwd, self.bits, self.byte_support);
            return Ok(self.decode(raw));
        }

        let raw = extract_value(edge_id, access, &self.fwd, self.bits, self.byte_support);
        let value = self.decode(raw);
        if self.negate_reverse && direction.is_reverse() {
            Ok(-value)
        } else {
            Ok(value)
        }
    }

    fn set_int(
        &mut self,
        direction: Direction,
        edge_id: u32,
        access: &mut dyn EdgeBytesAccess,
        value: i32,
    ) -> Result<()> {
        self.check_value(value)?;
        self.unchecked_set(direction, edge_id, access, value)
    }

    fn max_storable_int(&self) -> i32 {
        self.max_storable
    }

    fn min_storable_int(&self) -> i32 {
        self.min_storable
    }

    fn max_or_max_storable_int(&self) -> i32 {
        if self.max_value == UNSET_MAX {
            self.max_storable
        } else {
            self.max_value
        }
    }
}

impl fmt::Display for IntEncodedValueImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
