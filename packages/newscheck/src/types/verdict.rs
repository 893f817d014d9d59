//! Verdict vocabularies for trust annotations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Misinformation verdict attached to an article at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MisinfoVerdict {
    #[serde(rename = "Likely Safe")]
    LikelySafe,
    #[serde(rename = "Potentially Misleading")]
    PotentiallyMisleading,
    #[serde(rename = "Likely Misinformation")]
    LikelyMisinformation,
    /// Sentinel used when the classifier was unavailable or failed.
    Unknown,
}

impl MisinfoVerdict {
    /// True for the failure sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, MisinfoVerdict::Unknown)
    }
}

impl fmt::Display for MisinfoVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MisinfoVerdict::LikelySafe => "Likely Safe",
            MisinfoVerdict::PotentiallyMisleading => "Potentially Misleading",
            MisinfoVerdict::LikelyMisinformation => "Likely Misinformation",
            MisinfoVerdict::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Fact-check verdict for a claim checked against retrieved context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactVerdict {
    #[serde(rename = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Likely False")]
    LikelyFalse,
    #[serde(rename = "Partially Verified")]
    PartiallyVerified,
    #[serde(rename = "Conflicting Information")]
    ConflictingInformation,
    Unverified,
    /// Sentinel used when the oracle was unavailable or failed.
    Unknown,
}

impl FactVerdict {
    /// True for the failure sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FactVerdict::Unknown)
    }
}

impl fmt::Display for FactVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FactVerdict::LikelyTrue => "Likely True",
            FactVerdict::LikelyFalse => "Likely False",
            FactVerdict::PartiallyVerified => "Partially Verified",
            FactVerdict::ConflictingInformation => "Conflicting Information",
            FactVerdict::Unverified => "Unverified",
            FactVerdict::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Source credibility: a score in `[0.0, 1.0]`, or not available.
///
/// Serializes as a JSON number, or the string `"N/A"` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Credibility {
    Score(f32),
    NotAvailable,
}

impl Credibility {
    /// The numeric score, if one is available.
    pub fn score(&self) -> Option<f32> {
        match self {
            Credibility::Score(s) => Some(*s),
            Credibility::NotAvailable => None,
        }
    }
}

impl fmt::Display for Credibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credibility::Score(s) => write!(f, "{s:.2}"),
            Credibility::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Credibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Credibility::Score(s) => serializer.serialize_f32(*s),
            Credibility::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Credibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(f32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Score(s) => Ok(Credibility::Score(s)),
            Raw::Text(_) => Ok(Credibility::NotAvailable),
        }
    }
}
