//! First-name generation for synthetic users

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{PhenoError, Result};

/// Source of random first names
pub trait NameSource {
    /// Draw one first name
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
}

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Aaron", "Abigail", "Adam", "Alice", "Amara", "Andrew", "Anna", "Arthur", "Ava",
    "Benjamin", "Bethany", "Caleb", "Camila", "Charlotte", "Chloe", "Daniel", "David", "Eleanor",
    "Elijah", "Ella", "Emily", "Ethan", "Evelyn", "Fatima", "Finn", "Freya", "Gabriel", "Grace",
    "Hannah", "Harper", "Henry", "Isaac", "Isla", "Jack", "James", "Jasmine", "Joseph", "Julia",
    "Kai", "Layla", "Leo", "Lily", "Lucas", "Maria", "Mason", "Maya", "Mia", "Noah", "Nora",
    "Oliver", "Olivia", "Omar", "Priya", "Rosa", "Ruby", "Samuel", "Sara", "Sofia", "Thomas",
    "Yusuf", "Zara", "Zoe",
];

/// Built-in list of common first names
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNames;

impl NameSource for BuiltinNames {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        FIRST_NAMES
            .choose(rng)
            .map_or_else(String::new, |name| (*name).to_string())
    }
}

/// Caller-supplied list of names
#[derive(Debug, Clone)]
pub struct NameList {
    names: Vec<String>,
}

impl NameList {
    /// Create a name source from a non-empty list
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(PhenoError::Config("name list must not be empty".to_string()));
        }
        Ok(Self { names })
    }
}

impl NameSource for NameList {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.names.choose(rng).cloned().unwrap_or_default()
    }
}
