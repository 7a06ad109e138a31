//! Weighted sampling of phenotype partitions

pub mod sampler;

pub use sampler::{
    WeightedSampler, draw_without_replacement, expected_size, normalized_weights, subset_weight,
};
