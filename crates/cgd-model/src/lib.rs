// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! CGD model SSOT.
//!
//! Every record shape shared between the ingest pipeline and the
//! record store lives here: bounded identifier newtypes, closed enums
//! for the fixed vocabularies, and the composite dependency key.

mod dependency;
mod gene;
mod interaction;
mod policy;
mod study;

pub use dependency::{
    DependencyKey, DependencyRecord, DependencyScores, Histotype, HISTOTYPE_MAX_LEN,
};
pub use gene::{
    EntrezId, GeneRecord, ParseError, COSMIC_ID_MAX_LEN, ENSEMBL_ID_MAX_LEN,
    ENSEMBL_PROTEIN_ID_MAX_LEN, ENTREZ_ID_MAX_LEN, FULL_NAME_MAX_LEN, GENE_NAME_MAX_LEN,
    HGNC_ID_MAX_LEN, OMIM_ID_MAX_LEN, ORIGINAL_NAME_MAX_LEN, UNIPROT_ID_MAX_LEN, VEGA_ID_MAX_LEN,
};
pub use interaction::{Confidence, INTERACTION_SCORE_FLOOR, SELF_INTERACTION_SCORE};
pub use policy::DuplicateRowPolicy;
pub use study::{
    ExperimentType, Pmid, StudyRecord, JOURNAL_MAX_LEN, PMID_MAX_LEN, PUB_DATE_MAX_LEN,
    SHORT_NAME_MAX_LEN, STUDY_CODE_MAX_LEN, TITLE_MAX_LEN,
};

pub const CRATE_NAME: &str = "cgd-model";
