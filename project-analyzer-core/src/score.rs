//! Additive importance heuristic used to rank files before truncation.

use crate::config::AnalysisConfig;
use crate::filter::extension_of;
use once_cell::sync::Lazy;
use regex::Regex;

static ENTRY_POINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(main|index|app)\.").unwrap());

const PRIORITY_FILE: u32 = 100;
const ENTRY_POINT_NAME: u32 = 50;
const DOCUMENTATION_EXTENSION: &str = ".md";
const DOCUMENTATION_POINTS: u32 = 10;

/// Case-insensitive name fragments and the points each one adds.
const NAME_FRAGMENTS: &[(&str, u32)] = &[
    ("service", 30),
    ("controller", 30),
    ("route", 20),
    ("util", 10),
];

/// Score a file by name. Every rule that fires adds its points; 0 is valid.
///
/// `_relative_path` is part of the signature so path-based rules can be added
/// without touching callers.
pub fn score(file_name: &str, _relative_path: &str, config: &AnalysisConfig) -> u32 {
    let mut total = 0;

    if config.priority_files.iter().any(|p| p == file_name) {
        total += PRIORITY_FILE;
    }
    if ENTRY_POINT.is_match(file_name) {
        total += ENTRY_POINT_NAME;
    }

    let lowered = file_name.to_lowercase();
    total += NAME_FRAGMENTS
        .iter()
        .filter(|(fragment, _)| lowered.contains(fragment))
        .map(|(_, points)| points)
        .sum::<u32>();

    if extension_of(file_name) == DOCUMENTATION_EXTENSION {
        total += DOCUMENTATION_POINTS;
    }

    total
}
