// SPDX-License-Identifier: Apache-2.0

use crate::table::read_keyed_rows;
use crate::ImportError;
use cgd_model::{EntrezId, GeneRecord};
use std::collections::BTreeSet;
use std::path::Path;

/// Unions the alias and previous-symbol lists into one deduplicated,
/// deterministically ordered, human-readable string.
fn synonym_union(alias_symbols: &str, prev_symbols: &str) -> String {
    let mut merged: BTreeSet<&str> = BTreeSet::new();
    for raw in alias_symbols.split('|').chain(prev_symbols.split('|')) {
        let symbol = raw.trim();
        if !symbol.is_empty() {
            merged.insert(symbol);
        }
    }
    merged.into_iter().collect::<Vec<_>>().join(" | ")
}

fn optional(raw: Option<&String>) -> Option<String> {
    raw.map(String::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The HGNC column carries its own prefix ("HGNC:5"); only the bare
/// number is stored.
fn strip_hgnc_prefix(raw: &str) -> &str {
    raw.split_once(':').map_or(raw, |(_, id)| id)
}

/// Loads the primary nomenclature table. Rows without both a canonical
/// identifier and a display symbol carry no usable join key and are
/// skipped; every surviving row becomes exactly one gene record.
pub fn load_gene_records(path: &Path) -> Result<Vec<GeneRecord>, ImportError> {
    let rows = read_keyed_rows(path, b'\t')?;
    let mut out = Vec::new();
    for row in rows {
        let entrez_raw = row.get("entrez_id").map(String::as_str).unwrap_or("");
        let symbol = row.get("symbol").map(String::as_str).unwrap_or("");
        if entrez_raw.is_empty() || symbol.is_empty() {
            continue;
        }
        let entrez_id = EntrezId::parse(entrez_raw)?;
        let full_name = row.get("name").map(String::as_str).unwrap_or("");
        let mut gene = GeneRecord::new(entrez_id, symbol, full_name);
        gene.prevname_synonyms = synonym_union(
            row.get("alias_symbol").map(String::as_str).unwrap_or(""),
            row.get("prev_symbol").map(String::as_str).unwrap_or(""),
        );
        gene.ensembl_id = optional(row.get("ensembl_gene_id"));
        gene.vega_id = optional(row.get("vega_id"));
        gene.hgnc_id = optional(row.get("hgnc_id")).map(|v| strip_hgnc_prefix(&v).to_string());
        gene.omim_id = optional(row.get("omim_id"));
        gene.cosmic_id = optional(row.get("cosmic"));
        gene.uniprot_id = optional(row.get("uniprot_ids"))
            .and_then(|v| v.split('|').next().map(str::to_string));
        out.push(gene);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{load_gene_records, strip_hgnc_prefix, synonym_union};
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "hgnc_id\tsymbol\tname\talias_symbol\tprev_symbol\tentrez_id\tensembl_gene_id\tvega_id\tomim_id\tcosmic\tuniprot_ids";

    #[test]
    fn synonyms_are_unioned_deduplicated_and_sorted() {
        assert_eq!(
            synonym_union("NEU|HER-2|CD340", "NGL|HER-2"),
            "CD340 | HER-2 | NEU | NGL"
        );
        assert_eq!(synonym_union("", ""), "");
    }

    #[test]
    fn hgnc_prefix_is_stripped() {
        assert_eq!(strip_hgnc_prefix("HGNC:3430"), "3430");
        assert_eq!(strip_hgnc_prefix("3430"), "3430");
    }

    #[test]
    fn rows_without_canonical_key_or_symbol_are_skipped() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("hgnc.txt");
        fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 HGNC:3430\tERBB2\terb-b2 receptor tyrosine kinase 2\tNEU|HER-2\tNGL\t2064\tENSG00000141736\tOTTHUMG00000179300\t164870\tERBB2\tP04626|X12345\n\
                 HGNC:9999\t\tno symbol\t\t\t999\t\t\t\t\t\n\
                 HGNC:9998\tNOKEY\tno entrez\t\t\t\t\t\t\t\t\n"
            ),
        )
        .expect("write fixture");
        let genes = load_gene_records(&path).expect("load");
        assert_eq!(genes.len(), 1);
        let gene = &genes[0];
        assert_eq!(gene.entrez_id.as_str(), "2064");
        assert_eq!(gene.gene_name, "ERBB2");
        assert_eq!(gene.original_name, "ERBB2");
        assert_eq!(gene.hgnc_id.as_deref(), Some("3430"));
        assert_eq!(gene.uniprot_id.as_deref(), Some("P04626"));
        assert_eq!(gene.prevname_synonyms, "HER-2 | NEU | NGL");
        assert_eq!(gene.ensembl_protein_id, None);
    }
}
