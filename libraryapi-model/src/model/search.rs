//! Author search criteria and queries.
//!
//! Searches come in two flavours. Strict searches compare whole values and
//! pick one of a fixed set of shapes depending on which criteria are present.
//! Example searches compare by case-insensitive containment and ignore every
//! criterion that was not supplied.

use serde::{Deserialize, Serialize};

/// Read access to the attributes an [`AuthorQuery`] matches on.
pub trait AuthorAttributes {
    fn name(&self) -> &str;
    fn nationality(&self) -> &str;
}

/// Partially specified search input.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// A query over the author collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorQuery {
    /// Every author.
    All,
    /// Authors whose name equals the value exactly.
    ByName(String),
    /// Authors whose nationality equals the value exactly.
    ByNationality(String),
    /// Authors matching both values exactly.
    ByNameAndNationality { name: String, nationality: String },
    /// Authors containing each supplied value, ignoring letter case.
    Example(AuthorExample),
}

/// Example record for containment matching.
///
/// Identifier and birth date never take part in the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorExample {
    pub name: Option<String>,
    pub nationality: Option<String>,
}

impl SearchCriteria {
    pub fn new<N, C>(name: Option<N>, nationality: Option<C>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            name: name.map(Into::into),
            nationality: nationality.map(Into::into),
        }
    }

    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_nationality<S: Into<String>>(mut self, nationality: S) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    /// Non-blank criteria, passed on exactly as given.
    fn fields(&self) -> (Option<&str>, Option<&str>) {
        fn present(value: Option<&String>) -> Option<&str> {
            value
                .map(String::as_str)
                .filter(|value| !value.trim().is_empty())
        }
        (present(self.name.as_ref()), present(self.nationality.as_ref()))
    }
}

impl AuthorQuery {
    /// Builds an exact-match query shaped by which criteria are present.
    pub fn strict(criteria: &SearchCriteria) -> Self {
        match criteria.fields() {
            (Some(name), Some(nationality)) => Self::ByNameAndNationality {
                name: name.into(),
                nationality: nationality.into(),
            },
            (Some(name), None) => Self::ByName(name.into()),
            (None, Some(nationality)) => Self::ByNationality(nationality.into()),
            (None, None) => Self::All,
        }
    }

    /// Builds a containment query from the supplied criteria.
    pub fn example(criteria: &SearchCriteria) -> Self {
        let (name, nationality) = criteria.fields();
        Self::Example(AuthorExample {
            name: name.map(Into::into),
            nationality: nationality.map(Into::into),
        })
    }

    pub fn matches<A: AuthorAttributes + ?Sized>(&self, author: &A) -> bool {
        match self {
            Self::All => true,
            Self::ByName(name) => author.name() == name,
            Self::ByNationality(nationality) => author.nationality() == nationality,
            Self::ByNameAndNationality { name, nationality } => {
                author.name() == name && author.nationality() == nationality
            }
            Self::Example(example) => {
                example
                    .name
                    .as_deref()
                    .is_none_or(|name| contains_ignore_case(author.name(), name))
                    && example
                        .nationality
                        .as_deref()
                        .is_none_or(|nationality| {
                            contains_ignore_case(author.nationality(), nationality)
                        })
            }
        }
    }
}

/// Whether `haystack` contains `needle`, ignoring letter case.
///
/// Uses full Unicode lowercasing so accented letters compare as expected.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
