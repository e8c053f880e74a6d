//! Ordered keyword rules.
//!
//! A rule pairs a substring condition with the value it produces. Keywords
//! are matched verbatim, so case-insensitive tables hold lowercase keywords
//! and are evaluated against lowercased text. Table order is precedence.

/// Substring condition of a [`KeywordRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Every keyword must appear.
    All(&'static [&'static str]),
    /// At least one keyword must appear.
    Any(&'static [&'static str]),
}

impl Match {
    #[must_use]
    pub fn test(&self, text: &str) -> bool {
        match self {
            Self::All(keywords) => keywords.iter().all(|k| text.contains(k)),
            Self::Any(keywords) => keywords.iter().any(|k| text.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule<T: 'static = &'static str> {
    pub when: Match,
    pub value: T,
}

impl<T: Copy> KeywordRule<T> {
    pub const fn all(keywords: &'static [&'static str], value: T) -> Self {
        Self {
            when: Match::All(keywords),
            value,
        }
    }

    pub const fn any(keywords: &'static [&'static str], value: T) -> Self {
        Self {
            when: Match::Any(keywords),
            value,
        }
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.when.test(text)
    }
}

/// Value of the first matching rule, or `default`.
#[must_use]
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str, default: T) -> T {
    rules
        .iter()
        .find(|rule| rule.matches(text))
        .map_or(default, |rule| rule.value)
}

/// Values of every matching rule in table order, without duplicates.
#[must_use]
pub fn all_matches<T: Copy + PartialEq>(rules: &[KeywordRule<T>], text: &str) -> Vec<T> {
    let mut values: Vec<T> = Vec::new();
    for rule in rules.iter().filter(|rule| rule.matches(text)) {
        if !values.contains(&rule.value) {
            values.push(rule.value);
        }
    }
    values
}
