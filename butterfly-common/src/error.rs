//! Error types and utilities for the butterfly-osm toolkit
//!
//! Provides the shared error taxonomy for edge attribute encoding and fuzzy
//! matching for attribute name lookups.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Errors raised while defining, registering, reading or writing edge attributes.
///
/// Every variant is fatal to the operation that raised it. Nothing in the
/// encoding layer retries or partially applies a failed call.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid attribute definition (name grammar, bit width, option combination)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Operation not allowed in the attribute's current lifecycle state
    #[error("Invalid state: {0}")]
    State(String),

    /// Value outside the attribute's storable range
    #[error("{name} value too {} for encoding: {value}, {}Value: {bound}", adjective(.kind), bound_label(.kind))]
    Range {
        name: String,
        value: i32,
        bound: i32,
        kind: RangeKind,
    },

    /// Reverse write on an attribute that only has a forward slot
    #[error("{0}: value for reverse direction would overwrite forward direction. Enable store_two_directions for this attribute or don't write the reverse direction")]
    DirectionConflict(String),

    /// Attribute lookup by name failed
    #[error("Attribute '{name}' not found{}", suggestion_hint(.suggestion))]
    UnknownAttribute {
        name: String,
        suggestion: Option<String>,
    },

    /// Schema snapshot (de)serialization failure
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which side of the storable range a rejected value fell on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    TooLarge,
    TooSmall,
}

fn adjective(kind: &RangeKind) -> &'static str {
    match kind {
        RangeKind::TooLarge => "large",
        RangeKind::TooSmall => "small",
    }
}

fn bound_label(kind: &RangeKind) -> &'static str {
    match kind {
        RangeKind::TooLarge => "max",
        RangeKind::TooSmall => "min",
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{s}'?"),
        None => String::new(),
    }
}

/// Result type alias for the butterfly-osm toolkit
pub type Result<T> = std::result::Result<T, Error>;

/// Find the best fuzzy match using hybrid semantic + character-based scoring
///
/// Combines character-based similarity (Jaro-Winkler 70% + Normalized Levenshtein 30%)
/// with semantic bonuses:
/// - Prefix matching: 20% bonus for strong prefix similarity (≥4 chars)
/// - Word matching: 12% bonus per underscore-separated part (max_speed, road_class)
/// - Length similarity: 10% bonus for appropriate length matches
///
/// Minimum threshold: 0.65 similarity
fn find_best_fuzzy_match(input: &str, candidates: &[&str]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }

    let input_lower = input.to_lowercase();
    let mut best_match = None;
    let mut best_score = 0.0f64;

    let min_threshold = 0.65;

    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();

        // Jaro-Winkler catches transpositions ("sped" -> "speed"), Levenshtein
        // catches insertions and deletions ("maxspeed" -> "max_speed").
        let jw_score = jaro_winkler(&input_lower, &candidate_lower);
        let lev_score = normalized_levenshtein(&input_lower, &candidate_lower);
        let combined_score = (jw_score * 0.7) + (lev_score * 0.3);

        let mut semantic_bonus = 0.0;

        let prefix_len = input_lower.chars().count().min(7);
        if prefix_len >= 4 {
            let input_prefix = input_lower.chars().take(prefix_len).collect::<String>();
            let candidate_prefix = candidate_lower.chars().take(prefix_len).collect::<String>();

            let prefix_similarity = normalized_levenshtein(&input_prefix, &candidate_prefix);
            if prefix_similarity > 0.7 {
                semantic_bonus += 0.2 * prefix_similarity;
            }
        }

        if input_lower.len() >= 8 && candidate_lower.len() >= 8 {
            let length_ratio = 1.0
                - ((input_lower.len() as f64 - candidate_lower.len() as f64).abs()
                    / input_lower.len().max(candidate_lower.len()) as f64);
            if length_ratio > 0.7 {
                semantic_bonus += 0.1 * length_ratio;
            }
        }

        if candidate_lower.contains('_') {
            for part in candidate_lower.split('_') {
                if part.len() >= 4 {
                    let part_similarity = jaro_winkler(&input_lower, part);
                    if part_similarity > 0.85 {
                        semantic_bonus += 0.12 * part_similarity;
                    }
                }
            }
        }

        let final_score = combined_score + semantic_bonus;

        if final_score >= min_threshold && final_score > best_score {
            best_score = final_score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

/// Suggest a known attribute name for a possibly misspelled one
///
/// Returns `None` when the input already names a candidate exactly or when
/// nothing is similar enough.
pub fn suggest_correction(name: &str, candidates: &[&str]) -> Option<String> {
    if candidates.iter().any(|c| *c == name) {
        return None;
    }
    find_best_fuzzy_match(name, candidates)
}
