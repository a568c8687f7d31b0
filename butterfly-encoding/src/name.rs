//! Attribute name grammar
//!
//! Names are lower-case identifiers: at least two characters, starting with
//! `a-z`, continuing with `a-z` and `0-9`, with at most one underscore joining
//! two words (`average_speed`, not `average_speed_limit`). Names starting
//! with `in_` or `backward_` are reserved for derived attributes, and the
//! deny-list keeps names from colliding with keywords of whatever language
//! generated expressions are compiled to.

use std::collections::HashSet;

/// Prefixes reserved for attributes derived from other attributes
pub const RESERVED_PREFIXES: &[&str] = &["in_", "backward_"];

/// Default deny-list: Rust strict and reserved keywords plus the boolean literals
pub const DEFAULT_RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
    "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
    "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while",
    "yield",
];

/// Attribute name validator with a configurable reserved-word deny-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValidator {
    reserved: HashSet<String>,
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::with_reserved_words(DEFAULT_RESERVED_WORDS.iter().copied())
    }
}

impl NameValidator {
    /// Validator that rejects exactly the given reserved words (on top of the grammar)
    pub fn with_reserved_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Check `name` against the grammar, the reserved prefixes and the deny-list
    pub fn is_valid(&self, name: &str) -> bool {
        is_valid_identifier(name) && !self.is_reserved(name)
    }
}

/// Grammar and prefix check, without the deny-list
pub fn is_valid_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < 2
        || !bytes[0].is_ascii_lowercase()
        || RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
    {
        return false;
    }

    let mut underscores = 0;
    for &c in &bytes[1..] {
        if c == b'_' {
            underscores += 1;
            if underscores > 1 {
                return false;
            }
        } else if !c.is_ascii_lowercase() && !c.is_ascii_digit() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        let v = NameValidator::default();
        assert!(v.is_valid("speed"));
        assert!(v.is_valid("average_speed"));
        assert!(v.is_valid("max_speed2"));
        assert!(v.is_valid("a1"));
        assert!(v.is_valid("toll_"));
    }

    #[test]
    fn test_invalid_grammar() {
        let v = NameValidator::default();
        assert!(!v.is_valid(""));
        assert!(!v.is_valid("s"));
        assert!(!v.is_valid("Speed"));
        assert!(!v.is_valid("speeD"));
        assert!(!v.is_valid("_speed"));
        assert!(!v.is_valid("1speed"));
        assert!(!v.is_valid("average__speed"));
        assert!(!v.is_valid("average_speed_limit"));
        assert!(!v.is_valid("road_class_"));
        assert!(!v.is_valid("max-speed"));
        assert!(!v.is_valid("max speed"));
        assert!(!v.is_valid("höhe"));
    }

    #[test]
    fn test_reserved_prefixes() {
        let v = NameValidator::default();
        assert!(!v.is_valid("in_city"));
        assert!(!v.is_valid("backward_speed"));
        assert!(v.is_valid("inner_city"));
        assert!(v.is_valid("backwards"));
    }

    #[test]
    fn test_reserved_words() {
        let v = NameValidator::default();
        assert!(!v.is_valid("true"));
        assert!(!v.is_valid("match"));
        assert!(is_valid_identifier("match"));

        let custom = NameValidator::with_reserved_words(["speed"]);
        assert!(!custom.is_valid("speed"));
        assert!(custom.is_valid("match"));
    }
}
