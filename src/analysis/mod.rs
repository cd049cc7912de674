//! Listing-text analysis: normalization, work-arrangement classification
//! and skill tallies over a date window.

pub mod aggregate;
pub mod arrangement;
pub mod normalize;
pub mod skills;
