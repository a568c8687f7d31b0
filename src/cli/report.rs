//! Human-readable schema reports for the command-line interface

use std::fmt::Write;

use butterfly_encoding::{EncodedValue, EncodingSchema, IntEncodedValue, NameValidator, Placement};

fn format_slot(slot: &Placement) -> String {
    format!(
        "w{} >>{:<2} mask=0x{:08x} byte={}+{}",
        slot.word_index,
        slot.bit_shift,
        slot.bit_mask,
        slot.byte_offset(),
        slot.byte_bit_shift()
    )
}

/// One line per attribute: name, width, storable range, flags, forward and reverse slot
pub fn format_layout(schema: &EncodingSchema) -> String {
    let mut out = String::new();
    let name_width = schema.iter().map(|v| v.name().len()).max().unwrap_or(4).max(4);

    let _ = writeln!(
        out,
        "{:<name_width$}  {:>4}  {:>23}  {:<5}  {:<36}  reverse",
        "name", "bits", "range", "flags", "forward"
    );
    for value in schema.iter() {
        let mut flags = String::new();
        flags.push(if value.is_store_two_directions() { '2' } else { '-' });
        flags.push(if value.is_negate_reverse() { 'n' } else { '-' });
        flags.push(if value.has_byte_support() { 'b' } else { '-' });

        let reverse = match value.bwd_placement() {
            Some(slot) => format_slot(&slot),
            None if value.is_negate_reverse() => "= -forward".to_string(),
            None => "= forward".to_string(),
        };
        let range = format!("[{}, {}]", value.min_storable_int(), value.max_storable_int());

        let _ = writeln!(
            out,
            "{:<name_width$}  {:>4}  {:>23}  {:<5}  {:<36}  {}",
            value.name(),
            value.bits(),
            range,
            flags,
            format_slot(&value.fwd_placement()),
            reverse
        );
    }
    let _ = write!(
        out,
        "{} attributes, {} bytes per edge",
        schema.len(),
        schema.bytes_per_edge()
    );
    out
}

/// Validation verdict for a single attribute name
pub fn format_name_check(validator: &NameValidator, name: &str) -> (bool, String) {
    if validator.is_valid(name) {
        (true, format!("✓ {name}"))
    } else if validator.is_reserved(name) {
        (false, format!("✗ {name}: reserved word"))
    } else {
        (false, format!("✗ {name}: not a valid attribute name"))
    }
}
