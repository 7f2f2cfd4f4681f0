//! Locale-aware string ordering.
//!
//! Three comparison levels, like a dictionary: letters first (case and the
//! `ё`/`е` distinction ignored), then the `ё`/`е` distinction, then case
//! (lowercase first). The raw string breaks any remaining tie so the order is
//! total.

use std::cmp::Ordering;

/// Sort key of a string under the grid's collation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<char>,
    secondary: Vec<u8>,
    tertiary: Vec<u8>,
    raw: String,
}

impl CollationKey {
    /// Builds the key of `s`.
    pub fn new(s: &str) -> Self {
        let mut primary = Vec::with_capacity(s.len());
        let mut secondary = Vec::with_capacity(s.len());
        let mut tertiary = Vec::with_capacity(s.len());

        for c in s.chars() {
            let lower = c.to_lowercase().next().unwrap_or(c);
            let (base, accent) = match lower {
                'ё' => ('е', 1),
                other => (other, 0),
            };
            primary.push(base);
            secondary.push(accent);
            tertiary.push(u8::from(lower != c));
        }

        Self {
            primary,
            secondary,
            tertiary,
            raw: s.to_string(),
        }
    }
}

/// Compares two strings under the grid's collation.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use usergrid_lib::grid::collate;
///
/// // byte order would put every uppercase letter first
/// assert_eq!(collate("apple", "Banana"), Ordering::Less);
/// // byte order would put ё after я
/// assert_eq!(collate("ёж", "яма"), Ordering::Less);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_is_ignored_at_primary_level() {
        assert_eq!(collate("alpha", "BETA"), Ordering::Less);
        assert_eq!(collate("Zulu", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(collate("smith", "Smith"), Ordering::Less);
    }

    #[test]
    fn test_cyrillic_yo_sorts_with_ye() {
        assert_eq!(collate("ёж", "еда"), Ordering::Greater);
        assert_eq!(collate("Ёлка", "ель"), Ordering::Less);
        assert_eq!(collate("ель", "ёль"), Ordering::Less);
    }

    #[test]
    fn test_cyrillic_alphabet_order() {
        let mut words = vec!["Яковлев", "Борисов", "Ёжиков", "Андреев", "Жуков"];
        words.sort_by(|a, b| collate(a, b));
        assert_eq!(words, vec!["Андреев", "Борисов", "Ёжиков", "Жуков", "Яковлев"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(collate("Ivanov", "Ivanova"), Ordering::Less);
        assert_eq!(collate("", "a"), Ordering::Less);
    }

    #[test]
    fn test_equal() {
        assert_eq!(collate("Kazan", "Kazan"), Ordering::Equal);
    }
}
