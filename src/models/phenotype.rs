//! Phenotype record model
//!
//! A phenotype record ties one trait of a disorder to how it is discovered,
//! how frequently it occurs and whether it needs a presenting symptom.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a phenotype becomes known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscoveryCategory {
    /// Apparent from birth or early life
    Developmental,
    /// Observable by the patient
    Symptom,
    /// Only revealed through clinical investigation
    Finding,
    /// Duplicate of another phenotype; never enters a catalog
    Redundant,
}

impl DiscoveryCategory {
    /// Parse the single-letter discovery group code used by the source table
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "D" | "d" => Some(Self::Developmental),
            "S" | "s" => Some(Self::Symptom),
            "F" | "f" => Some(Self::Finding),
            "R" | "r" => Some(Self::Redundant),
            _ => None,
        }
    }

    /// The single-letter code for this category
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Developmental => "D",
            Self::Symptom => "S",
            Self::Finding => "F",
            Self::Redundant => "R",
        }
    }

    /// Get the display name for this category
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Developmental => "Developmental Trait",
            Self::Symptom => "Symptom",
            Self::Finding => "Clinical Finding",
            Self::Redundant => "Redundant",
        }
    }

    /// The categories shown to users, in discovery order
    #[must_use]
    pub const fn display_order() -> [Self; 3] {
        [Self::Developmental, Self::Symptom, Self::Finding]
    }
}

impl fmt::Display for DiscoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A string-keyed phenotype category (the HPO category of a record)
///
/// Gated findings name the category of symptom that would prompt the
/// investigation revealing them; that name is matched against this tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTag(String);

impl CategoryTag {
    /// Create a tag, trimming surrounding whitespace
    #[must_use]
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_string())
    }

    /// The tag text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One phenotype of one disorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeRecord {
    /// Disorder this phenotype belongs to
    pub disorder: String,
    /// Phenotype name as shown to users
    pub name: String,
    /// How the phenotype is discovered
    pub discovery: DiscoveryCategory,
    /// Relative frequency within the disorder
    pub probability: f64,
    /// Phenotype category this record belongs to, if known
    pub category: Option<CategoryTag>,
    /// Category of presenting symptom required before this finding is investigated
    pub prerequisite: Option<CategoryTag>,
}

impl PhenotypeRecord {
    /// Create a record with no category tag and no prerequisite
    #[must_use]
    pub fn new(
        disorder: impl Into<String>,
        name: impl Into<String>,
        discovery: DiscoveryCategory,
        probability: f64,
    ) -> Self {
        Self {
            disorder: disorder.into(),
            name: name.into(),
            discovery,
            probability,
            category: None,
            prerequisite: None,
        }
    }

    /// Set the record's own category tag
    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryTag>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Mark the record as needing a presenting symptom of the given category
    #[must_use]
    pub fn with_prerequisite(mut self, category: impl Into<CategoryTag>) -> Self {
        self.prerequisite = Some(category.into());
        self
    }

    /// Whether a presenting symptom must precede this phenotype
    #[must_use]
    pub const fn needs_prerequisite(&self) -> bool {
        self.prerequisite.is_some()
    }

    /// Whether the record can take part in sampling at all
    #[must_use]
    pub fn is_sampleable(&self) -> bool {
        self.discovery != DiscoveryCategory::Redundant
            && self.probability.is_finite()
            && self.probability > 0.0
    }
}
