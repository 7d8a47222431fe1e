// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Merge pipeline: reconciles independently-sourced genomics reference
//! files and per-study screen result tables into one normalized
//! dependency catalogue, inside a single all-or-nothing transaction.

mod enrichment;
mod interactions;
mod logging;
mod nomenclature;
mod pipeline;
mod results;
mod screens;
mod table;
mod xref;

pub use enrichment::{
    apply_driver_details, apply_inhibitors, apply_protein_ids, apply_summaries, DriverDetailCounts,
};
pub use interactions::{annotate_interactions, InteractionCounts, InteractionNetwork};
pub use logging::{ImportEvent, ImportLog, ImportStage};
pub use nomenclature::load_gene_records;
pub use pipeline::{run_import, ImportOptions, ImportReport};
pub use results::{entrez_from_composite, insert_result_row, parse_result_rows, ResultRow, RowOutcome};
pub use screens::{load_screen_descriptions, ScreenEntry};
pub use xref::ProteinAliasMaps;

use cgd_model::ParseError;
use cgd_store::StoreError;
use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "cgd-ingest";

/// Unrecoverable import failure. Anything that surfaces as this error
/// aborts the run and rolls back the whole transaction; recoverable
/// conditions are logged and counted instead.
#[derive(Debug)]
pub struct ImportError(pub String);

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ImportError {}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        Self(err.to_string())
    }
}

impl From<ParseError> for ImportError {
    fn from(err: ParseError) -> Self {
        Self(err.to_string())
    }
}
