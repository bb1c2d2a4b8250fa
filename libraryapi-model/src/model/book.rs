use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};
use ulid::Ulid;

use crate::model::{author::AuthorId, error::CommonError};

/// A book registered in the catalog.
///
/// Every book references exactly one author. While at least one book names an
/// author, that author cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookModel {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    pub create_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub Ulid);

impl BookModel {
    pub const NAME_PATTERN: &str = "books/{book_id}";

    pub const TITLE_FIELD_NAME: &str = "title";
    pub const TITLE_MAX_LENGTH: usize = 150;
}

impl BookId {
    pub fn new<T: Into<Ulid>>(id: T) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    pub fn parse_name<S: AsRef<str>>(name: S) -> Option<Self> {
        let name = name.as_ref();
        let id = name.strip_prefix("books/").unwrap_or(name);
        Ulid::from_string(id).ok().map(Self)
    }

    pub fn to_name(&self) -> String {
        format!("books/{}", self.0)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_name().fmt(f)
    }
}

impl FromStr for BookId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| CommonError::InvalidName {
            expected_format: BookModel::NAME_PATTERN.into(),
            name: s.to_string(),
        })
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_name())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse_name(&name).ok_or_else(|| {
            serde::de::Error::invalid_value(
                Unexpected::Str(name.as_str()),
                &BookModel::NAME_PATTERN,
            )
        })
    }
}
