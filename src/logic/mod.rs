//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Error classification and display messages
//! - export: Export file naming and writing
//! - filtering: Review filter matching and source options
//! - metrics: Metrics response normalisation
//! - sorting: Review comparators and source collation
//! - stats: Tonality totals and percentages
//! - tonality: Tonality labels, descriptions and colours
//! - validation: Login/register form rules
//! - versions: Version labels, ordering and selection

pub mod errors;
pub mod export;
pub mod filtering;
pub mod metrics;
pub mod sorting;
pub mod stats;
pub mod tonality;
pub mod validation;
pub mod versions;
