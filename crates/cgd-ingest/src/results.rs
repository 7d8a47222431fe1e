// SPDX-License-Identifier: Apache-2.0

use crate::table::{parse_float, read_keyed_rows, required_field};
use crate::ImportError;
use cgd_model::{
    DependencyKey, DependencyRecord, DependencyScores, DuplicateRowPolicy, EntrezId, Histotype,
    Pmid,
};
use cgd_store::StoreTx;
use std::path::Path;
use tracing::warn;

/// Composite gene keys embed the canonical identifier as the second
/// underscore-delimited component, e.g. `ERBB2_2064`.
#[must_use]
pub fn entrez_from_composite(raw: &str) -> Option<&str> {
    raw.split('_').nth(1).filter(|id| !id.is_empty())
}

/// One raw row of a per-study result table, with scores parsed and
/// the tissue column defaulted to the cross-tissue aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub marker: String,
    pub target: String,
    pub histotype: Histotype,
    pub scores: DependencyScores,
}

pub fn parse_result_rows(path: &Path) -> Result<Vec<ResultRow>, ImportError> {
    let mut out = Vec::new();
    for row in read_keyed_rows(path, b'\t')? {
        let histotype = match row.get("tissue") {
            Some(tissue) => Histotype::parse(tissue).map_err(|err| {
                ImportError(format!("{}: {err}", path.display()))
            })?,
            None => Histotype::Pancan,
        };
        out.push(ResultRow {
            marker: required_field(&row, "marker", path)?.to_string(),
            target: required_field(&row, "target", path)?.to_string(),
            histotype,
            scores: DependencyScores {
                wilcox_p: parse_float(required_field(&row, "wilcox.p", path)?, "wilcox.p", path)?,
                effect_size: parse_float(required_field(&row, "CLES", path)?, "CLES", path)?,
                za: parse_float(required_field(&row, "zA", path)?, "zA", path)?,
                zb: parse_float(required_field(&row, "zB", path)?, "zB", path)?,
                zdiff: parse_float(required_field(&row, "ZDiff", path)?, "ZDiff", path)?,
                boxplot_data: required_field(&row, "boxplot_data", path)?.to_string(),
            },
        });
    }
    Ok(out)
}

/// What the duplicate resolver decided for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    /// An existing record for the same key was overwritten because
    /// this row's p-value is strictly lower.
    Improved,
    /// A statistically weaker (or tied) duplicate measurement;
    /// discarded by policy, not an error.
    DiscardedWeaker,
    /// Driver or target could not be resolved to a catalogued gene.
    SkippedMissingGene,
}

fn resolve_gene_key(composite: &str) -> Option<EntrezId> {
    entrez_from_composite(composite).and_then(|raw| EntrezId::parse(raw).ok())
}

/// Routes one result row through the duplicate resolver.
///
/// With `DuplicatesImpossible` the row is inserted unconditionally:
/// the uniqueness check is skipped for sources declared clean, and a
/// wrongly declared source fails on the store's compound constraint.
/// With `DuplicatesPossible` an existing record under the same
/// (driver, target, histotype, study) key survives unless the new row
/// carries a strictly lower `wilcox_p`, in which case its score
/// fields and plot payload are overwritten in place.
pub fn insert_result_row(
    tx: &StoreTx<'_>,
    study: &Pmid,
    row: &ResultRow,
    policy: DuplicateRowPolicy,
) -> Result<RowOutcome, ImportError> {
    let (Some(driver), Some(target)) = (resolve_gene_key(&row.marker), resolve_gene_key(&row.target))
    else {
        warn!(
            marker = %row.marker,
            target = %row.target,
            "result row key has no usable entrez component, skipping"
        );
        return Ok(RowOutcome::SkippedMissingGene);
    };

    match tx.get_gene(&driver) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            warn!(marker = %row.marker, target = %row.target, "unknown driver gene, skipping row");
            return Ok(RowOutcome::SkippedMissingGene);
        }
        Err(err) => return Err(err.into()),
    }
    let mut target_gene = match tx.get_gene(&target) {
        Ok(gene) => gene,
        Err(err) if err.is_not_found() => {
            warn!(marker = %row.marker, target = %row.target, "unknown target gene, skipping row");
            return Ok(RowOutcome::SkippedMissingGene);
        }
        Err(err) => return Err(err.into()),
    };

    if !target_gene.is_target {
        target_gene.is_target = true;
        tx.update_gene(&target_gene)?;
    }

    let key = DependencyKey {
        driver,
        target,
        histotype: row.histotype,
        study: study.clone(),
    };

    match policy {
        DuplicateRowPolicy::DuplicatesImpossible => {
            tx.insert_dependency(&DependencyRecord::new(key, row.scores.clone()))?;
            Ok(RowOutcome::Inserted)
        }
        DuplicateRowPolicy::DuplicatesPossible => match tx.get_dependency(&key) {
            Err(err) if err.is_not_found() => {
                tx.insert_dependency(&DependencyRecord::new(key, row.scores.clone()))?;
                Ok(RowOutcome::Inserted)
            }
            Err(err) => Err(err.into()),
            Ok(existing) => {
                if row.scores.wilcox_p < existing.scores.wilcox_p {
                    tx.update_dependency_scores(&key, &row.scores)?;
                    Ok(RowOutcome::Improved)
                } else {
                    Ok(RowOutcome::DiscardedWeaker)
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{entrez_from_composite, insert_result_row, parse_result_rows, RowOutcome};
    use cgd_model::{
        DuplicateRowPolicy, EntrezId, ExperimentType, GeneRecord, Histotype, Pmid, StudyRecord,
    };
    use cgd_store::SqliteStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn composite_keys_yield_their_entrez_component() {
        assert_eq!(entrez_from_composite("ERBB2_2064"), Some("2064"));
        assert_eq!(entrez_from_composite("ERBB2"), None);
        assert_eq!(entrez_from_composite("ERBB2_"), None);
    }

    #[test]
    fn tissue_column_is_optional_and_defaults_to_pancan() {
        let tmp = tempdir().expect("tempdir");
        let with_tissue = tmp.path().join("with_tissue.txt");
        fs::write(
            &with_tissue,
            "marker\ttarget\twilcox.p\tCLES\tzA\tzB\tZDiff\ttissue\tboxplot_data\n\
             ERBB2_2064\tMAP2K3_5606\t0.003\t0.81\t-1.2\t0.4\t-1.6\tBREAST\tc1,-1.2;c2,0.4\n",
        )
        .expect("write");
        let rows = parse_result_rows(&with_tissue).expect("parse");
        assert_eq!(rows[0].histotype, Histotype::Breast);
        assert_eq!(rows[0].scores.wilcox_p, 0.003);

        let without = tmp.path().join("without_tissue.txt");
        fs::write(
            &without,
            "marker\ttarget\twilcox.p\tCLES\tzA\tzB\tZDiff\tboxplot_data\n\
             ERBB2_2064\tMAP2K3_5606\t0.01\t0.7\t-1\t0\t-1\tpayload\n",
        )
        .expect("write");
        let rows = parse_result_rows(&without).expect("parse");
        assert_eq!(rows[0].histotype, Histotype::Pancan);
    }

    #[test]
    fn unknown_tissue_code_is_fatal() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("bad_tissue.txt");
        fs::write(
            &path,
            "marker\ttarget\twilcox.p\tCLES\tzA\tzB\tZDiff\ttissue\tboxplot_data\n\
             A_1\tB_2\t0.01\t0.7\t-1\t0\t-1\tCERVICAL\tpayload\n",
        )
        .expect("write");
        assert!(parse_result_rows(&path).is_err());
    }

    fn seeded_store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().expect("store");
        {
            let tx = store.transaction().expect("tx");
            tx.create_gene(&GeneRecord::new(
                EntrezId::parse("1").expect("entrez"),
                "DRV",
                "driver gene",
            ))
            .expect("driver");
            tx.create_gene(&GeneRecord::new(
                EntrezId::parse("2").expect("entrez"),
                "TGT",
                "target gene",
            ))
            .expect("target");
            tx.create_study(&StudyRecord {
                pmid: Pmid::parse("100").expect("pmid"),
                code: "X".to_string(),
                short_name: "Study".to_string(),
                title: "Title".to_string(),
                authors: "Authors".to_string(),
                experiment_type: ExperimentType::GenomeWideShrna,
                abstract_text: String::new(),
                summary: String::new(),
                journal: "J".to_string(),
                pub_date: "2020".to_string(),
                num_targets: 1,
            })
            .expect("study");
            tx.commit().expect("commit");
        }
        store
    }

    fn row(p: f64, payload: &str) -> super::ResultRow {
        super::ResultRow {
            marker: "DRV_1".to_string(),
            target: "TGT_2".to_string(),
            histotype: Histotype::Pancan,
            scores: cgd_model::DependencyScores {
                wilcox_p: p,
                effect_size: 0.7,
                za: -1.0,
                zb: 0.0,
                zdiff: -1.0,
                boxplot_data: payload.to_string(),
            },
        }
    }

    #[test]
    fn lower_p_value_wins_and_ties_keep_the_first_row() {
        let mut store = seeded_store();
        let tx = store.transaction().expect("tx");
        let study = Pmid::parse("100").expect("pmid");
        let policy = DuplicateRowPolicy::DuplicatesPossible;

        assert_eq!(
            insert_result_row(&tx, &study, &row(0.05, "first"), policy).expect("insert"),
            RowOutcome::Inserted
        );
        assert_eq!(
            insert_result_row(&tx, &study, &row(0.05, "tied"), policy).expect("tie"),
            RowOutcome::DiscardedWeaker
        );
        assert_eq!(
            insert_result_row(&tx, &study, &row(0.01, "better"), policy).expect("improve"),
            RowOutcome::Improved
        );
        assert_eq!(
            insert_result_row(&tx, &study, &row(0.02, "worse"), policy).expect("worse"),
            RowOutcome::DiscardedWeaker
        );

        let deps = tx.all_dependencies().expect("deps");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].scores.wilcox_p, 0.01);
        assert_eq!(deps[0].scores.boxplot_data, "better");
    }

    #[test]
    fn unknown_gene_rows_are_skipped_without_aborting() {
        let mut store = seeded_store();
        let tx = store.transaction().expect("tx");
        let study = Pmid::parse("100").expect("pmid");
        let policy = DuplicateRowPolicy::DuplicatesPossible;

        let mut unknown = row(0.01, "payload");
        unknown.target = "GHOST_404".to_string();
        assert_eq!(
            insert_result_row(&tx, &study, &unknown, policy).expect("skip"),
            RowOutcome::SkippedMissingGene
        );
        // Subsequent rows in the same file still land.
        assert_eq!(
            insert_result_row(&tx, &study, &row(0.01, "payload"), policy).expect("insert"),
            RowOutcome::Inserted
        );
        assert_eq!(tx.dependency_count().expect("count"), 1);
    }

    #[test]
    fn accepted_rows_flag_the_target_gene_role() {
        let mut store = seeded_store();
        let tx = store.transaction().expect("tx");
        let study = Pmid::parse("100").expect("pmid");
        insert_result_row(
            &tx,
            &study,
            &row(0.01, "payload"),
            DuplicateRowPolicy::DuplicatesImpossible,
        )
        .expect("insert");
        let target = tx
            .get_gene(&EntrezId::parse("2").expect("entrez"))
            .expect("target gene");
        assert!(target.is_target);
        let driver = tx
            .get_gene(&EntrezId::parse("1").expect("entrez"))
            .expect("driver gene");
        assert!(!driver.is_target);
    }
}
