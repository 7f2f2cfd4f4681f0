//! Gender canonicalization

/// Canonical gender categories.
///
/// The declaration order is the sort order used by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Male,
    Female,
}

/// Every accepted spelling, lowercase, with its canonical category.
///
/// Covers the raw endpoint tokens plus what an operator is likely to type
/// into a filter box: single letters and whole words, English and Russian.
const SYNONYMS: &[(&str, Gender)] = &[
    ("m", Gender::Male),
    ("male", Gender::Male),
    ("man", Gender::Male),
    ("м", Gender::Male),
    ("муж", Gender::Male),
    ("мужской", Gender::Male),
    ("мужчина", Gender::Male),
    ("f", Gender::Female),
    ("female", Gender::Female),
    ("woman", Gender::Female),
    ("ж", Gender::Female),
    ("жен", Gender::Female),
    ("женский", Gender::Female),
    ("женщина", Gender::Female),
];

impl Gender {
    /// Maps any known spelling to its category, ignoring case and surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use usergrid_lib::model::Gender;
    ///
    /// assert_eq!(Gender::canonicalize("М"), Some(Gender::Male));
    /// assert_eq!(Gender::canonicalize(" female "), Some(Gender::Female));
    /// assert_eq!(Gender::canonicalize("x"), None);
    /// ```
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        SYNONYMS
            .iter()
            .find(|(spelling, _)| *spelling == needle)
            .map(|(_, gender)| *gender)
    }

    /// The token the endpoint uses for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Position in the grid's category order.
    ///
    /// Unrecognized values rank `0`, before every known category.
    pub fn rank(raw: &str) -> u8 {
        match Self::canonicalize(raw) {
            None => 0,
            Some(Gender::Male) => 1,
            Some(Gender::Female) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(Gender::canonicalize("m"), Some(Gender::Male));
        assert_eq!(Gender::canonicalize("F"), Some(Gender::Female));
        assert_eq!(Gender::canonicalize("м"), Some(Gender::Male));
        assert_eq!(Gender::canonicalize("Ж"), Some(Gender::Female));
    }

    #[test]
    fn test_words() {
        assert_eq!(Gender::canonicalize("Мужской"), Some(Gender::Male));
        assert_eq!(Gender::canonicalize("женщина"), Some(Gender::Female));
        assert_eq!(Gender::canonicalize("MALE"), Some(Gender::Male));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(Gender::canonicalize(""), None);
        assert_eq!(Gender::canonicalize("ma"), None);
        assert_eq!(Gender::canonicalize("other"), None);
    }

    #[test]
    fn test_rank_orders_unknown_first() {
        assert!(Gender::rank("unknown") < Gender::rank("male"));
        assert!(Gender::rank("male") < Gender::rank("female"));
        assert_eq!(Gender::rank("M"), Gender::rank("мужчина"));
    }

    #[test]
    fn test_every_synonym_is_lowercase() {
        for (spelling, _) in SYNONYMS {
            assert_eq!(*spelling, spelling.to_lowercase());
        }
    }
}
