// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ENTREZ_ID_MAX_LEN: usize = 10;
pub const GENE_NAME_MAX_LEN: usize = 25;
pub const ORIGINAL_NAME_MAX_LEN: usize = 30;
pub const FULL_NAME_MAX_LEN: usize = 200;
pub const ENSEMBL_ID_MAX_LEN: usize = 20;
pub const ENSEMBL_PROTEIN_ID_MAX_LEN: usize = 20;
pub const COSMIC_ID_MAX_LEN: usize = 25;
pub const OMIM_ID_MAX_LEN: usize = 10;
pub const UNIPROT_ID_MAX_LEN: usize = 20;
pub const VEGA_ID_MAX_LEN: usize = 25;
pub const HGNC_ID_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

pub(crate) fn check_bounded(
    name: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ParseError> {
    if value.len() > max {
        return Err(ParseError::TooLong(name, max));
    }
    Ok(())
}

/// Canonical gene identifier. Numeric NCBI Entrez ID, primary join key
/// across every input source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct EntrezId(String);

impl EntrezId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("entrez_id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("entrez_id"));
        }
        if input.len() > ENTREZ_ID_MAX_LEN {
            return Err(ParseError::TooLong("entrez_id", ENTREZ_ID_MAX_LEN));
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat("entrez_id must be numeric"));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntrezId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical record for one gene. Cross-reference identifiers are
/// optional and filled incrementally by successive enrichment passes;
/// a value already set is never overwritten by a later source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneRecord {
    pub entrez_id: EntrezId,
    pub gene_name: String,
    pub original_name: String,
    pub full_name: String,
    pub is_driver: bool,
    pub is_target: bool,
    pub alteration_considered: Option<String>,
    pub ensembl_id: Option<String>,
    pub ensembl_protein_id: Option<String>,
    pub cosmic_id: Option<String>,
    pub omim_id: Option<String>,
    pub uniprot_id: Option<String>,
    pub vega_id: Option<String>,
    pub hgnc_id: Option<String>,
    pub prevname_synonyms: String,
    pub inhibitors: Option<String>,
    pub ncbi_summary: Option<String>,
}

impl GeneRecord {
    #[must_use]
    pub fn new(entrez_id: EntrezId, gene_name: &str, full_name: &str) -> Self {
        Self {
            entrez_id,
            gene_name: gene_name.to_string(),
            original_name: gene_name.to_string(),
            full_name: full_name.to_string(),
            is_driver: false,
            is_target: false,
            alteration_considered: None,
            ensembl_id: None,
            ensembl_protein_id: None,
            cosmic_id: None,
            omim_id: None,
            uniprot_id: None,
            vega_id: None,
            hgnc_id: None,
            prevname_synonyms: String::new(),
            inhibitors: None,
            ncbi_summary: None,
        }
    }

    /// Length bounds mirror the declared column widths in the record
    /// store. Overflow must surface here as a fatal error, never as a
    /// silent truncation: several of these fields carry uniqueness.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.gene_name.is_empty() {
            return Err(ParseError::Empty("gene_name"));
        }
        check_bounded("gene_name", &self.gene_name, GENE_NAME_MAX_LEN)?;
        check_bounded("original_name", &self.original_name, ORIGINAL_NAME_MAX_LEN)?;
        check_bounded("full_name", &self.full_name, FULL_NAME_MAX_LEN)?;
        if let Some(v) = &self.ensembl_id {
            check_bounded("ensembl_id", v, ENSEMBL_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.ensembl_protein_id {
            check_bounded("ensembl_protein_id", v, ENSEMBL_PROTEIN_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.cosmic_id {
            check_bounded("cosmic_id", v, COSMIC_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.omim_id {
            check_bounded("omim_id", v, OMIM_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.uniprot_id {
            check_bounded("uniprot_id", v, UNIPROT_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.vega_id {
            check_bounded("vega_id", v, VEGA_ID_MAX_LEN)?;
        }
        if let Some(v) = &self.hgnc_id {
            check_bounded("hgnc_id", v, HGNC_ID_MAX_LEN)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntrezId, GeneRecord, ParseError, GENE_NAME_MAX_LEN};

    #[test]
    fn entrez_id_rejects_empty_nonnumeric_and_overlong() {
        assert_eq!(EntrezId::parse(""), Err(ParseError::Empty("entrez_id")));
        assert!(matches!(
            EntrezId::parse("ERBB2"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert_eq!(
            EntrezId::parse("12345678901"),
            Err(ParseError::TooLong("entrez_id", 10))
        );
        assert_eq!(EntrezId::parse("2064").expect("valid id").as_str(), "2064");
    }

    #[test]
    fn overflowing_gene_name_is_a_fatal_validation_error() {
        let entrez = EntrezId::parse("1").expect("entrez");
        let mut gene = GeneRecord::new(entrez, "BRCA1", "breast cancer 1");
        gene.gene_name = "X".repeat(GENE_NAME_MAX_LEN + 1);
        assert_eq!(
            gene.validate(),
            Err(ParseError::TooLong("gene_name", GENE_NAME_MAX_LEN))
        );
    }

    #[test]
    fn new_gene_keeps_symbol_as_original_name() {
        let entrez = EntrezId::parse("2064").expect("entrez");
        let gene = GeneRecord::new(entrez, "ERBB2", "erb-b2 receptor tyrosine kinase 2");
        assert_eq!(gene.original_name, "ERBB2");
        assert!(!gene.is_driver);
        assert!(gene.ensembl_protein_id.is_none());
        gene.validate().expect("fresh record validates");
    }
}
