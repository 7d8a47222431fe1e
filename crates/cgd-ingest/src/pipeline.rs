// SPDX-License-Identifier: Apache-2.0

use crate::enrichment::{
    apply_driver_details, apply_inhibitors, apply_protein_ids, apply_summaries,
};
use crate::interactions::{annotate_interactions, InteractionNetwork};
use crate::logging::{ImportLog, ImportStage};
use crate::nomenclature::load_gene_records;
use crate::results::{insert_result_row, parse_result_rows, RowOutcome};
use crate::screens::load_screen_descriptions;
use crate::xref::ProteinAliasMaps;
use crate::ImportError;
use cgd_model::{Confidence, DuplicateRowPolicy, Pmid};
use cgd_store::{SqliteStore, StoreTx};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Locations of every input the import consumes. Reference files live
/// under one directory, per-study result tables under another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub nomenclature_path: PathBuf,
    pub alteration_path: PathBuf,
    pub protein_map_path: PathBuf,
    pub protein_alias_path: PathBuf,
    pub protein_links_path: PathBuf,
    pub inhibitor_path: PathBuf,
    pub summary_path: PathBuf,
    pub screens_path: PathBuf,
    pub results_dir: PathBuf,
}

impl ImportOptions {
    /// Conventional file names under a single input directory.
    #[must_use]
    pub fn from_root(input_dir: &Path, results_dir: &Path) -> Self {
        Self {
            nomenclature_path: input_dir.join("hgnc_complete_set.txt"),
            alteration_path: input_dir.join("AlterationDetails.csv"),
            protein_map_path: input_dir.join("entrez_gene_id.vs.string.v10.28042015.tsv"),
            protein_alias_path: input_dir.join("9606.protein.aliases.v10.txt"),
            protein_links_path: input_dir.join("9606.protein.links.v10.txt"),
            inhibitor_path: input_dir.join("dgi_drug_targets.txt"),
            summary_path: input_dir.join("entrez_summaries.txt"),
            screens_path: input_dir.join("ScreenDescriptions.txt"),
            results_dir: results_dir.to_path_buf(),
        }
    }
}

/// Counters for one completed import, emitted as machine output.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportReport {
    pub genes: u64,
    pub studies: u64,
    pub dependencies: u64,
    pub drivers_flagged: u64,
    pub driver_rows_skipped: u64,
    pub protein_ids_resolved: u64,
    pub inhibitors_applied: u64,
    pub summaries_applied: u64,
    pub rows_inserted: u64,
    pub rows_improved: u64,
    pub rows_discarded_weaker: u64,
    pub rows_skipped_missing_gene: u64,
    pub result_files_loaded: u64,
    pub result_files_aborted: u64,
    pub interactions_annotated: u64,
    pub self_interactions: u64,
    pub interactions_highest: u64,
    pub interactions_high: u64,
    pub interactions_medium: u64,
}

/// Runs the full reload: wipes the previous catalogue and rebuilds it
/// from scratch inside one transaction. Any fatal error rolls the
/// store back to its pre-import state.
pub fn run_import(
    store: &mut SqliteStore,
    opts: &ImportOptions,
    log: &mut ImportLog,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();
    let tx = store.transaction()?;

    let prior = tx.gene_count()? + tx.study_count()? + tx.dependency_count()?;
    info!(records = prior, "clearing previous catalogue");
    tx.delete_all()?;
    log.emit_count(ImportStage::Reset, "records_deleted", prior);

    let screens = load_screen_descriptions(&opts.screens_path)?;
    for entry in &screens {
        tx.create_study(&entry.study)?;
    }
    report.studies = tx.study_count()?;
    info!(studies = report.studies, "studies loaded");
    log.emit_count(ImportStage::Studies, "studies_created", report.studies);

    for gene in load_gene_records(&opts.nomenclature_path)? {
        tx.create_gene(&gene)?;
    }
    report.genes = tx.gene_count()?;
    info!(genes = report.genes, "gene catalogue loaded");
    log.emit_count(ImportStage::Genes, "genes_created", report.genes);

    let driver_counts = apply_driver_details(&tx, &opts.alteration_path)?;
    report.drivers_flagged = driver_counts.flagged;
    report.driver_rows_skipped = driver_counts.skipped;
    log.emit_count(
        ImportStage::Enrichment,
        "drivers_flagged",
        driver_counts.flagged,
    );

    let alias_maps = ProteinAliasMaps::load(&opts.protein_map_path, &opts.protein_alias_path)?;
    report.protein_ids_resolved = apply_protein_ids(&tx, &alias_maps)?;
    log.emit_count(
        ImportStage::Enrichment,
        "protein_ids_resolved",
        report.protein_ids_resolved,
    );

    report.inhibitors_applied = apply_inhibitors(&tx, &opts.inhibitor_path)?;
    report.summaries_applied = apply_summaries(&tx, &opts.summary_path)?;
    log.emit_count(
        ImportStage::Enrichment,
        "inhibitors_applied",
        report.inhibitors_applied,
    );
    log.emit_count(
        ImportStage::Enrichment,
        "summaries_applied",
        report.summaries_applied,
    );

    for entry in &screens {
        for file_name in &entry.result_files {
            let path = opts.results_dir.join(file_name);
            ingest_result_file(&tx, &entry.study.pmid, &path, entry.duplicates, &mut report)?;
        }
    }
    report.dependencies = tx.dependency_count()?;
    info!(
        dependencies = report.dependencies,
        inserted = report.rows_inserted,
        improved = report.rows_improved,
        discarded = report.rows_discarded_weaker,
        skipped = report.rows_skipped_missing_gene,
        "dependency tables merged"
    );
    log.emit_count(
        ImportStage::Dependencies,
        "dependencies_stored",
        report.dependencies,
    );

    let driver_proteins: BTreeSet<String> = tx
        .driver_genes()?
        .into_iter()
        .filter_map(|gene| gene.ensembl_protein_id)
        .collect();
    let network = InteractionNetwork::load(&opts.protein_links_path, &driver_proteins)?;
    let interaction_counts = annotate_interactions(&tx, &network)?;
    report.interactions_annotated = interaction_counts.annotated;
    report.self_interactions = interaction_counts.self_interactions;
    report.interactions_highest = tx.count_by_interaction(Confidence::Highest)?;
    report.interactions_high = tx.count_by_interaction(Confidence::High)?;
    report.interactions_medium = tx.count_by_interaction(Confidence::Medium)?;
    info!(
        annotated = report.interactions_annotated,
        highest = report.interactions_highest,
        high = report.interactions_high,
        medium = report.interactions_medium,
        "interaction evidence annotated"
    );
    log.emit_count(
        ImportStage::Interactions,
        "dependencies_annotated",
        report.interactions_annotated,
    );

    tx.commit()?;
    log.emit_count(ImportStage::Finalize, "committed", 1);
    info!("import committed");
    Ok(report)
}

/// Ingests one per-study result table. A file whose study is not in
/// the loaded study set is logged and abandoned; the rest of the run
/// continues.
fn ingest_result_file(
    tx: &StoreTx<'_>,
    study: &Pmid,
    path: &Path,
    policy: DuplicateRowPolicy,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    match tx.get_study(study) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            error!(
                study = %study,
                file = %path.display(),
                "result file references an unknown study, aborting file"
            );
            report.result_files_aborted += 1;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }
    info!(study = %study, file = %path.display(), "loading result table");
    for row in parse_result_rows(path)? {
        match insert_result_row(tx, study, &row, policy)? {
            RowOutcome::Inserted => report.rows_inserted += 1,
            RowOutcome::Improved => report.rows_improved += 1,
            RowOutcome::DiscardedWeaker => report.rows_discarded_weaker += 1,
            RowOutcome::SkippedMissingGene => report.rows_skipped_missing_gene += 1,
        }
    }
    report.result_files_loaded += 1;
    Ok(())
}
