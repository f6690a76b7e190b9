#![doc = "project-analyzer-core: analysis pipeline library for project-analyzer."]

//! This crate holds the data model and every step of the analysis pipeline:
//! traversal, scoring, metadata, sampling, and aggregation, plus the prompt
//! formatters and token estimates that consume the result.
//! Network I/O lives in the CLI crate behind [`contract::Completer`].
//!
//! # Usage
//! Call [`analyze::analyze_project`] with a root and an [`config::AnalysisConfig`],
//! then render the [`contract::ProjectInfo`] with a [`prompt::Provider`].

pub mod analyze;
pub mod config;
pub mod contract;
pub mod filter;
pub mod metadata;
pub mod prompt;
pub mod sample;
pub mod score;
pub mod tokens;
pub mod walk;

pub use analyze::analyze_project;
pub use config::{AnalysisConfig, IgnorePattern};
pub use contract::{AnalysisError, ProjectInfo};
pub use prompt::Provider;
