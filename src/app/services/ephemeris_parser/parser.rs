//! Core almanac export parser implementation
//!
//! This module provides the parser orchestration: reading the document,
//! extracting the metadata line once and turning every object block into a
//! dataset under the configured block error policy.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::column_mapping::{ColumnName, HeaderLayout};
use super::field_parsers::{parse_delta_t, parse_number};
use super::grammar::{ObjectBlock, match_metadata, object_blocks};
use super::record_parser::parse_row;
use super::stats::{BlockFailure, ParseResult, ParseStats};
use crate::app::models::{Coordinate, Metadata, ObjectDataset};
use crate::app::services::object_registry::resolve_alias;
use crate::config::{BlockErrorPolicy, Config};
use crate::{Error, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parser for German almanac ephemeris exports
///
/// The parser is stateless apart from its configuration:
/// - The first line must be the metadata line
/// - Every following object block is resolved to a known object by its name
/// - Column positions are derived from each block's own header line
/// - Failing blocks abort the parse or are skipped, as configured
#[derive(Debug, Clone, Default)]
pub struct EphemerisParser {
    config: Config,
}

impl EphemerisParser {
    /// Create a new parser with an explicit configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse an export file and return the datasets with statistics
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing almanac export: {}", file_path.display());

        let content = std::fs::read_to_string(file_path).map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let result = self.parse_str(&content)?;
        info!(
            "Parsed {} rows from {}/{} object blocks",
            result.stats.rows_parsed, result.stats.blocks_parsed, result.stats.blocks_found
        );

        Ok(result)
    }

    /// Read only the metadata line of an export file
    pub fn read_metadata(&self, file_path: &Path) -> Result<Metadata> {
        let file = File::open(file_path).map_err(|e| {
            Error::io(format!("Failed to open file {}", file_path.display()), e)
        })?;

        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(|e| Error::io(format!("Failed to read file {}", file_path.display()), e))?;

        self.parse_metadata(&first_line)
    }

    /// Parse a metadata line
    pub fn parse_metadata(&self, line: &str) -> Result<Metadata> {
        let line = line.trim_start_matches(BYTE_ORDER_MARK).trim_end();
        let captures = match_metadata(line).ok_or_else(|| Error::malformed_metadata(line))?;

        let equinox = captures
            .equinox
            .map(|value| parse_number("equinox", value))
            .transpose()?;

        let metadata = Metadata {
            place: captures.place.trim().to_string(),
            coordinate: Coordinate::new(captures.lat.trim(), captures.lon.trim()),
            equinox,
            delta_t: parse_delta_t(captures.delta_t, captures.delta_t_unit)?,
        };

        debug!(
            "Parsed metadata: place={}, coordinate={}, equinox={:?}, delta_t={}ms",
            metadata.place,
            metadata.coordinate.combined(),
            metadata.equinox,
            metadata.delta_t.num_milliseconds()
        );

        Ok(metadata)
    }

    /// Parse a whole export held in memory
    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        let content = normalize_line_endings(content);
        let content = content.trim_start_matches(BYTE_ORDER_MARK);

        let (first_line, body) = content.split_once('\n').unwrap_or((content, ""));
        let metadata = Arc::new(self.parse_metadata(first_line)?);

        let mut stats = ParseStats::new();
        let mut datasets: Vec<ObjectDataset> = Vec::new();
        let mut cursor = 0;

        for block in object_blocks(body) {
            let gap = &body[cursor..block.span.start];
            cursor = block.span.end;

            if !gap.trim().is_empty() {
                stats.blocks_found += 1;
                let error = Error::malformed_block(gap.trim(), "text does not form an object block")
                    .in_block(first_token(gap), None);
                self.handle_block_failure(error, &mut stats)?;
            }

            stats.blocks_found += 1;
            match self.parse_block(&block, &metadata) {
                Ok(dataset) => {
                    stats.blocks_parsed += 1;
                    stats.rows_parsed += dataset.len();
                    merge_dataset(&mut datasets, dataset);
                }
                Err(error) => self.handle_block_failure(error, &mut stats)?,
            }
        }

        let trailing = body[cursor..].trim();
        if !trailing.is_empty() {
            warn!(
                "Dropped trailing text starting with '{}': the last object block must be followed by an empty line",
                first_token(trailing)
            );
            stats.dropped_trailing_text = Some(trailing.to_string());
        }

        Ok(ParseResult {
            metadata,
            datasets,
            stats,
        })
    }

    /// Parse one object block into a dataset
    ///
    /// A header without a date column fails the block before any row is
    /// read. Errors carry the block's object name and, for row failures, the
    /// zero-based row index.
    fn parse_block(&self, block: &ObjectBlock<'_>, metadata: &Arc<Metadata>) -> Result<ObjectDataset> {
        let object = resolve_alias(block.name).map_err(|e| e.in_block(block.name, None))?;
        let layout = HeaderLayout::resolve(block.header).map_err(|e| e.in_block(block.name, None))?;
        if !layout.has_column(ColumnName::Date) {
            return Err(Error::missing_column(block.header, ColumnName::Date.as_str())
                .in_block(block.name, None));
        }

        let mut dataset = ObjectDataset::new(object, Arc::clone(metadata));
        for (index, line) in block.rows().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let row = parse_row(object, &layout, line)
                .map_err(|e| e.in_block(block.name, Some(index)))?;
            dataset.rows.push(row);
        }

        debug!("Parsed {} rows for '{}'", dataset.len(), object);
        Ok(dataset)
    }

    fn handle_block_failure(&self, error: Error, stats: &mut ParseStats) -> Result<()> {
        match self.config.block_error_policy {
            BlockErrorPolicy::Abort => Err(error),
            BlockErrorPolicy::SkipAndContinue => {
                warn!("Skipping object block: {}", error);
                stats.failures.push(block_failure(&error));
                Ok(())
            }
        }
    }
}

fn block_failure(error: &Error) -> BlockFailure {
    match error {
        Error::Block {
            object,
            row,
            source,
        } => BlockFailure {
            object: object.clone(),
            row: *row,
            message: source.to_string(),
        },
        other => BlockFailure {
            object: String::new(),
            row: None,
            message: other.to_string(),
        },
    }
}

/// Append the rows of a repeated object to its first dataset
fn merge_dataset(datasets: &mut Vec<ObjectDataset>, dataset: ObjectDataset) {
    match datasets
        .iter_mut()
        .find(|existing| existing.bound_object == dataset.bound_object)
    {
        Some(existing) => {
            debug!("Merging repeated block for '{}'", dataset.bound_object);
            existing.rows.extend(dataset.rows);
        }
        None => datasets.push(dataset),
    }
}

fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or_default()
}
