//! Parsing statistics and result structures for almanac exports
//!
//! This module provides types for tracking per-block outcomes and organizing
//! the parsed datasets for the calendar renderer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::models::{Metadata, ObjectDataset, ObservableObject};

/// Parsing result with metadata, per-object datasets and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Shared metadata of the export
    pub metadata: Arc<Metadata>,

    /// One dataset per object, in document order
    pub datasets: Vec<ObjectDataset>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Dataset of the given object, if its block was parsed
    pub fn get(&self, object: &ObservableObject) -> Option<&ObjectDataset> {
        self.datasets
            .iter()
            .find(|dataset| dataset.bound_object == object)
    }

    /// Objects with a dataset, in document order
    pub fn objects(&self) -> impl Iterator<Item = &'static ObservableObject> + '_ {
        self.datasets.iter().map(|dataset| dataset.bound_object)
    }

    /// Mapping from object identity to dataset
    pub fn into_map(self) -> HashMap<&'static ObservableObject, ObjectDataset> {
        self.datasets
            .into_iter()
            .map(|dataset| (dataset.bound_object, dataset))
            .collect()
    }
}

/// An object block that was skipped
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockFailure {
    /// Object name as written in the block
    pub object: String,

    /// Zero-based body row, if the failure belongs to a row
    pub row: Option<usize>,

    /// Rendered error
    pub message: String,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of object blocks matched in the document
    pub blocks_found: usize,

    /// Number of object blocks turned into datasets
    pub blocks_parsed: usize,

    /// Number of rows across all parsed blocks
    pub rows_parsed: usize,

    /// Blocks skipped under the skip-and-continue policy
    pub failures: Vec<BlockFailure>,

    /// Trailing text dropped because it was not terminated by an empty line
    pub dropped_trailing_text: Option<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage of found blocks
    pub fn success_rate(&self) -> f64 {
        if self.blocks_found == 0 {
            0.0
        } else {
            (self.blocks_parsed as f64 / self.blocks_found as f64) * 100.0
        }
    }

    /// Check if every found block was parsed and nothing was dropped
    pub fn is_successful(&self) -> bool {
        self.blocks_found > 0
            && self.failures.is_empty()
            && self.blocks_parsed == self.blocks_found
            && self.dropped_trailing_text.is_none()
    }
}
