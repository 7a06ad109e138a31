//! Assembled phenotype profiles
//!
//! A profile is an identity prefix followed by three phenotype segments in
//! discovery order: developmental traits, symptoms, clinical findings. The
//! order is fixed by [`ProfileBuilder`], whatever order segments are supplied in.

use std::fmt;

/// Position of an entry within a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Caller-supplied identity fields
    Identity,
    /// Traits noticed from birth or early life
    Developmental,
    /// Patient-observable symptoms, including injected prerequisites
    Symptom,
    /// Clinically investigated findings
    Finding,
}

/// An ordered synthetic case for one disorder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileResult {
    identity: Vec<String>,
    developmental: Vec<String>,
    symptoms: Vec<String>,
    findings: Vec<String>,
}

impl ProfileResult {
    /// Start building a profile behind the given identity fields
    #[must_use]
    pub fn builder(identity: Vec<String>) -> ProfileBuilder {
        ProfileBuilder::new(identity)
    }

    /// Identity fields, unchanged from the caller
    #[must_use]
    pub fn identity(&self) -> &[String] {
        &self.identity
    }

    /// Developmental trait segment
    #[must_use]
    pub fn developmental(&self) -> &[String] {
        &self.developmental
    }

    /// Symptom segment
    #[must_use]
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Clinical finding segment
    #[must_use]
    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    /// Phenotype names in display order, without the identity prefix
    pub fn phenotypes(&self) -> impl Iterator<Item = &str> {
        self.developmental
            .iter()
            .chain(&self.symptoms)
            .chain(&self.findings)
            .map(String::as_str)
    }

    /// Every entry in order, identity prefix first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identity
            .iter()
            .map(String::as_str)
            .chain(self.phenotypes())
    }

    /// Every entry paired with the segment it belongs to
    pub fn iter_segments(&self) -> impl Iterator<Item = (Segment, &str)> {
        tagged(Segment::Identity, &self.identity)
            .chain(tagged(Segment::Developmental, &self.developmental))
            .chain(tagged(Segment::Symptom, &self.symptoms))
            .chain(tagged(Segment::Finding, &self.findings))
    }

    /// Number of phenotypes across all three segments
    #[must_use]
    pub fn phenotype_count(&self) -> usize {
        self.developmental.len() + self.symptoms.len() + self.findings.len()
    }

    /// Total number of entries including identity fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.identity.len() + self.phenotype_count()
    }

    /// Whether the profile holds nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The phenotype segment a name was placed in, if present
    #[must_use]
    pub fn segment_of(&self, name: &str) -> Option<Segment> {
        self.iter_segments()
            .filter(|(segment, _)| *segment != Segment::Identity)
            .find(|(_, item)| *item == name)
            .map(|(segment, _)| segment)
    }

    /// The full ordered sequence as owned strings
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Consume the profile into its full ordered sequence
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        let mut out = self.identity;
        out.extend(self.developmental);
        out.extend(self.symptoms);
        out.extend(self.findings);
        out
    }
}

impl fmt::Display for ProfileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(item)?;
        }
        Ok(())
    }
}

fn tagged(segment: Segment, items: &[String]) -> impl Iterator<Item = (Segment, &str)> {
    items.iter().map(move |item| (segment, item.as_str()))
}

/// Builder that appends phenotypes to their segment and emits them in discovery order
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    profile: ProfileResult,
}

impl ProfileBuilder {
    /// Create a builder with the given identity prefix
    #[must_use]
    pub fn new(identity: Vec<String>) -> Self {
        Self {
            profile: ProfileResult {
                identity,
                ..ProfileResult::default()
            },
        }
    }

    /// Append names to one segment
    #[must_use]
    pub fn append<I, S>(mut self, segment: Segment, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = match segment {
            Segment::Identity => &mut self.profile.identity,
            Segment::Developmental => &mut self.profile.developmental,
            Segment::Symptom => &mut self.profile.symptoms,
            Segment::Finding => &mut self.profile.findings,
        };
        target.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append developmental traits
    #[must_use]
    pub fn developmental<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(Segment::Developmental, names)
    }

    /// Append symptoms
    #[must_use]
    pub fn symptoms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(Segment::Symptom, names)
    }

    /// Append clinical findings
    #[must_use]
    pub fn findings<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(Segment::Finding, names)
    }

    /// Finish the profile
    #[must_use]
    pub fn build(self) -> ProfileResult {
        self.profile
    }
}
