// SPDX-License-Identifier: Apache-2.0

use crate::gene::{check_bounded, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const PMID_MAX_LEN: usize = 30;
pub const STUDY_CODE_MAX_LEN: usize = 1;
pub const SHORT_NAME_MAX_LEN: usize = 50;
pub const TITLE_MAX_LEN: usize = 250;
pub const JOURNAL_MAX_LEN: usize = 100;
pub const PUB_DATE_MAX_LEN: usize = 30;

/// PubMed identifier, primary key for studies. Pre-publication
/// entries use a "Pending..." placeholder, so this stays free-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Pmid(String);

impl Pmid {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("pmid"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("pmid"));
        }
        if input.len() > PMID_MAX_LEN {
            return Err(ParseError::TooLong("pmid", PMID_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Pmid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ExperimentType {
    KinomeSirna,
    GenomeWideShrna,
}

impl ExperimentType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "kinome siRNA" => Ok(Self::KinomeSirna),
            "genome-wide shRNA" => Ok(Self::GenomeWideShrna),
            _ => Err(ParseError::InvalidFormat(
                "experiment type must be 'kinome siRNA' or 'genome-wide shRNA'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KinomeSirna => "kinome siRNA",
            Self::GenomeWideShrna => "genome-wide shRNA",
        }
    }
}

/// One research screen. Created once from the study-description
/// source and immutable afterwards; dependencies reference it by pmid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StudyRecord {
    pub pmid: Pmid,
    pub code: String,
    pub short_name: String,
    pub title: String,
    pub authors: String,
    pub experiment_type: ExperimentType,
    pub abstract_text: String,
    pub summary: String,
    pub journal: String,
    pub pub_date: String,
    pub num_targets: u32,
}

impl StudyRecord {
    pub fn validate(&self) -> Result<(), ParseError> {
        check_bounded("code", &self.code, STUDY_CODE_MAX_LEN)?;
        check_bounded("short_name", &self.short_name, SHORT_NAME_MAX_LEN)?;
        check_bounded("title", &self.title, TITLE_MAX_LEN)?;
        check_bounded("journal", &self.journal, JOURNAL_MAX_LEN)?;
        check_bounded("pub_date", &self.pub_date, PUB_DATE_MAX_LEN)?;
        Ok(())
    }
}
