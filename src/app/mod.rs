//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in sentui::model)
//! - Services (API worker, cache)
//! - Logic (pure business logic in sentui::logic)
//!
//! Methods are kept as `impl App` but organized by functional domain.

pub(crate) mod auth;
pub(crate) mod demo;
pub(crate) mod filters;
pub(crate) mod metrics;
pub(crate) mod table;
pub(crate) mod versions;
