use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};
use ulid::Ulid;

use crate::model::{error::CommonError, search::AuthorAttributes};

/// An author in the catalog.
///
/// `id` is assigned by the store and stays `None` until the first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AuthorId>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorId(pub Ulid);

impl AuthorModel {
    pub const NAME_PATTERN: &str = "authors/{author_id}";

    pub const NAME_FIELD_NAME: &str = "name";
    pub const BIRTH_DATE_FIELD_NAME: &str = "birth_date";
    pub const NATIONALITY_FIELD_NAME: &str = "nationality";

    pub const NAME_MAX_LENGTH: usize = 255;
    pub const NATIONALITY_MIN_LENGTH: usize = 2;
    pub const NATIONALITY_MAX_LENGTH: usize = 50;

    /// Creates an unpersisted author.
    pub fn new<N, C>(name: N, birth_date: NaiveDate, nationality: C) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            id: None,
            name: name.into(),
            birth_date,
            nationality: nationality.into(),
            create_time: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: AuthorId) -> Self {
        self.id = Some(id);
        self
    }

    /// Strips surrounding whitespace from the text attributes.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.nationality = self.nationality.trim().to_string();
        self
    }
}

impl AuthorAttributes for AuthorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn nationality(&self) -> &str {
        &self.nationality
    }
}

impl AuthorId {
    pub fn new<T: Into<Ulid>>(id: T) -> Self {
        Self(id.into())
    }

    /// Generates a new sortable identifier.
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Parses either a resource name (`authors/{id}`) or a bare id.
    pub fn parse_name<S: AsRef<str>>(name: S) -> Option<Self> {
        let name = name.as_ref();
        let id = name.strip_prefix("authors/").unwrap_or(name);
        Ulid::from_string(id).ok().map(Self)
    }

    pub fn to_name(&self) -> String {
        format!("authors/{}", self.0)
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_name().fmt(f)
    }
}

impl FromStr for AuthorId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| CommonError::InvalidName {
            expected_format: AuthorModel::NAME_PATTERN.into(),
            name: s.to_string(),
        })
    }
}

impl Serialize for AuthorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_name())
    }
}

impl<'de> Deserialize<'de> for AuthorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse_name(&name).ok_or_else(|| {
            serde::de::Error::invalid_value(
                Unexpected::Str(name.as_str()),
                &AuthorModel::NAME_PATTERN,
            )
        })
    }
}
