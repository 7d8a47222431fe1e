// SPDX-License-Identifier: Apache-2.0

use crate::results::entrez_from_composite;
use crate::table::{read_keyed_rows, required_field};
use crate::xref::ProteinAliasMaps;
use crate::ImportError;
use cgd_model::EntrezId;
use cgd_store::StoreTx;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriverDetailCounts {
    pub flagged: u64,
    pub skipped: u64,
}

/// Marks driver genes and records their considered alteration types.
/// The source keys rows by composite gene name; a row whose gene is
/// not in the catalogue is logged and skipped, never fatal.
pub fn apply_driver_details(
    tx: &StoreTx<'_>,
    path: &Path,
) -> Result<DriverDetailCounts, ImportError> {
    let mut counts = DriverDetailCounts::default();
    for row in read_keyed_rows(path, b',')? {
        let composite = required_field(&row, "Gene", path)?;
        let alterations = required_field(&row, "Alterations Considered", path)?.to_string();
        let Some(entrez_raw) = entrez_from_composite(composite) else {
            warn!(gene = composite, "driver detail row has no entrez component, skipping");
            counts.skipped += 1;
            continue;
        };
        let entrez = match EntrezId::parse(entrez_raw) {
            Ok(id) => id,
            Err(err) => {
                warn!(gene = composite, %err, "driver detail row has a bad entrez id, skipping");
                counts.skipped += 1;
                continue;
            }
        };
        match tx.get_gene(&entrez) {
            Ok(mut gene) => {
                gene.is_driver = true;
                gene.alteration_considered = Some(alterations);
                tx.update_gene(&gene)?;
                counts.flagged += 1;
            }
            Err(err) if err.is_not_found() => {
                warn!(gene = composite, "driver gene not in catalogue, skipping");
                counts.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(counts)
}

/// Fills `ensembl_protein_id` for every gene the fallback chain can
/// resolve. Genes with no entry in any source are left untouched.
pub fn apply_protein_ids(tx: &StoreTx<'_>, maps: &ProteinAliasMaps) -> Result<u64, ImportError> {
    let mut resolved = 0;
    for mut gene in tx.all_genes()? {
        if let Some(protein) = maps.resolve(&gene) {
            gene.ensembl_protein_id = Some(protein.to_string());
            tx.update_gene(&gene)?;
            resolved += 1;
        }
    }
    Ok(resolved)
}

fn load_annotation_map(
    path: &Path,
    value_column: &str,
) -> Result<BTreeMap<String, String>, ImportError> {
    let mut map = BTreeMap::new();
    for row in read_keyed_rows(path, b'\t')? {
        let entrez = required_field(&row, "EntrezID", path)?;
        let value = required_field(&row, value_column, path)?;
        if !entrez.is_empty() && !value.is_empty() {
            map.insert(entrez.to_string(), value.to_string());
        }
    }
    Ok(map)
}

/// Sets one free-text annotation per matching gene; absence from the
/// secondary source is expected and leaves the field empty.
fn apply_annotation(
    tx: &StoreTx<'_>,
    annotations: &BTreeMap<String, String>,
    set: impl Fn(&mut cgd_model::GeneRecord, String),
) -> Result<u64, ImportError> {
    let mut applied = 0;
    for mut gene in tx.all_genes()? {
        if let Some(value) = annotations.get(gene.entrez_id.as_str()) {
            set(&mut gene, value.clone());
            tx.update_gene(&gene)?;
            applied += 1;
        }
    }
    Ok(applied)
}

pub fn apply_inhibitors(tx: &StoreTx<'_>, path: &Path) -> Result<u64, ImportError> {
    let inhibitors = load_annotation_map(path, "Inhibitors")?;
    apply_annotation(tx, &inhibitors, |gene, value| {
        gene.inhibitors = Some(value);
    })
}

pub fn apply_summaries(tx: &StoreTx<'_>, path: &Path) -> Result<u64, ImportError> {
    let summaries = load_annotation_map(path, "Summary")?;
    apply_annotation(tx, &summaries, |gene, value| {
        gene.ncbi_summary = Some(value);
    })
}
