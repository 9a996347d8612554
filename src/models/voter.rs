//! Voter record model representing one enrolled person on an electoral roll.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared reference to a VoterRecord.
///
/// The corpus, the index and every search result point at the same record
/// instead of cloning it per query.
pub type VoterRef = Arc<VoterRecord>;

/// Gender as printed on the roll.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a bilingual roll label such as "Female / സ്ത്രീ".
    ///
    /// "Female" is checked first because it contains "male".
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("female") || label.contains("സ്ത്രീ") {
            Gender::Female
        } else if lower.contains("male") || label.contains("പുരുഷൻ") {
            Gender::Male
        } else {
            Gender::Unknown
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Snapshot strings are frequently `null`; they become empty strings.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()).unwrap_or_default())
}

fn deserialize_gender<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| Gender::from_label(&s)).unwrap_or_default())
}

/// Serial numbers come out of extraction as integers but older snapshots
/// carry them as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum SerialValue {
    Number(u64),
    Text(String),
}

fn deserialize_serial<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<SerialValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(SerialValue::Number(n)) => Some(n.to_string()),
        Some(SerialValue::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

/// A single voter entry from the electoral roll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct VoterRecord {
    /// Structural identifier, e.g. "ABC1234567"
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub voter_id: String,

    /// Given name in the native script
    #[serde(
        rename = "name_ml",
        alias = "name_local",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub name_local: String,

    /// Given name transliterated into Latin script
    #[serde(
        rename = "name_en",
        alias = "name_latin",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub name_latin: String,

    /// Guardian or relative name in the native script
    #[serde(
        rename = "relative_name_ml",
        alias = "relative_name_local",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub relative_name_local: String,

    /// Guardian or relative name transliterated into Latin script
    #[serde(
        rename = "relative_name_en",
        alias = "relative_name_latin",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub relative_name_latin: String,

    /// Relation label, e.g. "Father's Name"
    #[serde(
        rename = "relation_type",
        alias = "relation_label",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub relation_label: String,

    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub house_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(deserialize_with = "deserialize_gender")]
    pub gender: Gender,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_serial"
    )]
    pub serial_no: Option<String>,

    /// Source document the record was extracted from
    #[serde(rename = "pdf_source", skip_serializing_if = "Option::is_none")]
    pub source_document: Option<String>,
}

impl VoterRecord {
    /// Create a record with only an identifier set.
    pub fn new(voter_id: impl Into<String>) -> Self {
        Self {
            voter_id: voter_id.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the Latin name.
    pub fn with_name_latin(mut self, name: impl Into<String>) -> Self {
        self.name_latin = name.into();
        self
    }

    /// Builder-style setter for the native-script name.
    pub fn with_name_local(mut self, name: impl Into<String>) -> Self {
        self.name_local = name.into();
        self
    }

    /// Builder-style setter for the relative's names and relation label.
    pub fn with_relative(
        mut self,
        latin: impl Into<String>,
        local: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.relative_name_latin = latin.into();
        self.relative_name_local = local.into();
        self.relation_label = label.into();
        self
    }

    /// Builder-style setter for the house number.
    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = house_number.into();
        self
    }

    /// Display name, preferring the transliterated form.
    pub fn display_name(&self) -> &str {
        if self.name_latin.is_empty() {
            &self.name_local
        } else {
            &self.name_latin
        }
    }
}
