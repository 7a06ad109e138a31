//! Data models for phenotype catalogs and assembled profiles

pub mod phenotype;
pub mod profile;

pub use phenotype::{CategoryTag, DiscoveryCategory, PhenotypeRecord};
pub use profile::{ProfileBuilder, ProfileResult, Segment};
