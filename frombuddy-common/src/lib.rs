//! # FromBuddy Common Library
//!
//! Shared code for the FromBuddy guidance service including:
//! - Guide data model (steps, checklist, explanation) and its validation
//! - Static service catalog access
//! - Bootstrap configuration loading
//! - Common error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod guide;

pub use error::{Error, Result};
pub use guide::{GuideData, GuideStep};
