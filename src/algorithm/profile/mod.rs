//! Profile assembly and presenting-symptom resolution

pub mod assembler;
pub mod prerequisite;

pub use assembler::ProfileAssembler;
pub use prerequisite::PrerequisiteResolver;
