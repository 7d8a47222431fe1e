// SPDX-License-Identifier: Apache-2.0

use crate::ImportError;
use cgd_model::GeneRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// STRING identifiers arrive taxon-prefixed ("9606.ENSP..."); only
/// the bare protein identifier is kept.
pub(crate) fn strip_taxon_prefix(raw: &str) -> &str {
    raw.split_once('.').map_or(raw, |(_, id)| id)
}

/// Cross-reference maps from three independent sources for resolving
/// a gene to its protein identifier. Built once before the enrichment
/// pass and consulted read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct ProteinAliasMaps {
    by_entrez: BTreeMap<String, String>,
    by_ensembl_gene: BTreeMap<String, String>,
    by_uniprot: BTreeMap<String, String>,
}

impl ProteinAliasMaps {
    /// `mapping_path` is the direct canonical-id to protein-id table
    /// (header line, then entrez and taxon-prefixed protein columns).
    /// `alias_path` mixes record types: the marker column tells
    /// Ensembl-gene alias rows and UniProt accession rows apart;
    /// every other alias kind is ignored.
    pub fn load(mapping_path: &Path, alias_path: &Path) -> Result<Self, ImportError> {
        let mut maps = Self::default();

        let mapping = fs::File::open(mapping_path)
            .map_err(|e| ImportError(format!("cannot open {}: {e}", mapping_path.display())))?;
        for (idx, line) in BufReader::new(mapping).lines().enumerate() {
            let line = line
                .map_err(|e| ImportError(format!("read {}: {e}", mapping_path.display())))?;
            if idx == 0 || line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let (Some(entrez), Some(protein)) = (cols.next(), cols.next()) else {
                return Err(ImportError(format!(
                    "malformed mapping row in {}: '{line}'",
                    mapping_path.display()
                )));
            };
            maps.by_entrez.insert(
                entrez.trim().to_string(),
                strip_taxon_prefix(protein.trim()).to_string(),
            );
        }

        let aliases = fs::File::open(alias_path)
            .map_err(|e| ImportError(format!("cannot open {}: {e}", alias_path.display())))?;
        for line in BufReader::new(aliases).lines() {
            let line =
                line.map_err(|e| ImportError(format!("read {}: {e}", alias_path.display())))?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 3 {
                continue;
            }
            let protein = strip_taxon_prefix(cols[0].trim()).to_string();
            let alias = cols[1].trim();
            let marker = cols[2];
            if alias.starts_with("ENSG") {
                maps.by_ensembl_gene.insert(alias.to_string(), protein);
            } else if marker.contains("BLAST_UniProt_AC") {
                maps.by_uniprot.insert(alias.to_string(), protein);
            }
        }

        Ok(maps)
    }

    /// Resolution priority, first match wins: the direct canonical
    /// mapping, then the Ensembl-gene alias, then the UniProt alias.
    /// Later sources are never consulted once an earlier one matched.
    #[must_use]
    pub fn resolve(&self, gene: &GeneRecord) -> Option<&str> {
        if let Some(protein) = self.by_entrez.get(gene.entrez_id.as_str()) {
            return Some(protein);
        }
        if let Some(protein) = gene
            .ensembl_id
            .as_deref()
            .and_then(|ensembl| self.by_ensembl_gene.get(ensembl))
        {
            return Some(protein);
        }
        gene.uniprot_id
            .as_deref()
            .and_then(|uniprot| self.by_uniprot.get(uniprot))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_entrez.is_empty() && self.by_ensembl_gene.is_empty() && self.by_uniprot.is_empty()
    }
}
