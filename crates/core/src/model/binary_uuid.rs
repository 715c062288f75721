use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Build identifier of one binary image.
///
/// Accepts both the 32-digit and the hyphenated spelling found in reports;
/// always displayed upper-case and hyphenated so two spellings of the same
/// build compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryUuid(Uuid);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid binary UUID '{0}'")]
pub struct UuidParseError(pub String);

impl BinaryUuid {
    pub fn parse(text: &str) -> Result<Self, UuidParseError> {
        Uuid::parse_str(text.trim()).map(BinaryUuid).map_err(|_| UuidParseError(text.to_string()))
    }
}

impl fmt::Display for BinaryUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        f.write_str(self.0.hyphenated().encode_upper(&mut buf))
    }
}

impl FromStr for BinaryUuid {
    type Err = UuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryUuid::parse(s)
    }
}

impl Serialize for BinaryUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BinaryUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BinaryUuid::parse(&text).map_err(de::Error::custom)
    }
}
