use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The shape an answer takes for a given field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerShape {
    /// A single string (text-like, date, single choice).
    Scalar,

    /// An ordered list of strings (multi choice, ranking).
    List,

    /// A mapping from sub-input id to string (multi-input).
    Map,
}

/// The fixed vocabulary of field type tags.
///
/// Tags are serialized in kebab-case, e.g. `"short-text"` or `"multi-input"`.
/// Tags outside the vocabulary are preserved as `Unknown` instead of being
/// rejected, so a form built by a newer builder still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Legacy single-line text tag.
    Text,
    ShortText,
    LongText,
    /// Legacy multi-line text tag.
    Textarea,
    Email,
    Number,
    Phone,
    Url,
    Date,
    DateRange,
    Time,
    Dropdown,
    Radio,
    Checkbox,
    MultiSelect,
    YesNo,
    Rating,
    OpinionScale,
    Signature,
    File,
    Statement,
    Legal,
    Hidden,
    PictureChoice,
    Ranking,
    Matrix,
    MultiInput,

    /// A tag outside the known vocabulary.
    Unknown(String),
}

const KNOWN: &[(&str, FieldType)] = &[
    ("text", FieldType::Text),
    ("short-text", FieldType::ShortText),
    ("long-text", FieldType::LongText),
    ("textarea", FieldType::Textarea),
    ("email", FieldType::Email),
    ("number", FieldType::Number),
    ("phone", FieldType::Phone),
    ("url", FieldType::Url),
    ("date", FieldType::Date),
    ("date-range", FieldType::DateRange),
    ("time", FieldType::Time),
    ("dropdown", FieldType::Dropdown),
    ("radio", FieldType::Radio),
    ("checkbox", FieldType::Checkbox),
    ("multi-select", FieldType::MultiSelect),
    ("yesno", FieldType::YesNo),
    ("rating", FieldType::Rating),
    ("opinion-scale", FieldType::OpinionScale),
    ("signature", FieldType::Signature),
    ("file", FieldType::File),
    ("statement", FieldType::Statement),
    ("legal", FieldType::Legal),
    ("hidden", FieldType::Hidden),
    ("picture-choice", FieldType::PictureChoice),
    ("ranking", FieldType::Ranking),
    ("matrix", FieldType::Matrix),
    ("multi-input", FieldType::MultiInput),
];

impl FieldType {
    /// Get the kebab-case tag for this field type.
    pub fn tag(&self) -> &str {
        if let Self::Unknown(tag) = self {
            return tag;
        }
        KNOWN
            .iter()
            .find(|(_, known)| known == self)
            .map(|(tag, _)| *tag)
            .unwrap_or_default()
    }

    /// Check if this tag is outside the known vocabulary.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KNOWN
            .iter()
            .find(|(tag, _)| *tag == s)
            .map(|(_, ty)| ty.clone())
            .unwrap_or_else(|| Self::Unknown(s.to_string())))
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}
