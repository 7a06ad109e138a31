//! Algorithm implementations for synthetic phenotype profiles
//!
//! This module contains the sampling engine, profile assembly and the
//! cohort drivers that build lab-study and peer-matching datasets.

pub mod cohort;
pub mod profile;
pub mod sampling;
