// SPDX-License-Identifier: Apache-2.0

use crate::{map_sqlite_error, StoreError, StoreErrorCode};
use cgd_model::{
    Confidence, DependencyKey, DependencyRecord, DependencyScores, EntrezId, ExperimentType,
    GeneRecord, Histotype, Pmid, StudyRecord,
};
use rusqlite::{params, Connection, Row};

fn decode_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::new(
        StoreErrorCode::Internal,
        format!("stored value failed to decode: {err}"),
    )
}

fn validation_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::new(StoreErrorCode::Validation, err.to_string())
}

fn gene_from_row(row: &Row<'_>) -> rusqlite::Result<GeneRecord> {
    Ok(GeneRecord {
        entrez_id: EntrezId::parse(&row.get::<_, String>(0)?).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        gene_name: row.get(1)?,
        original_name: row.get(2)?,
        full_name: row.get(3)?,
        is_driver: row.get::<_, i64>(4)? != 0,
        is_target: row.get::<_, i64>(5)? != 0,
        alteration_considered: row.get(6)?,
        ensembl_id: row.get(7)?,
        ensembl_protein_id: row.get(8)?,
        cosmic_id: row.get(9)?,
        omim_id: row.get(10)?,
        uniprot_id: row.get(11)?,
        vega_id: row.get(12)?,
        hgnc_id: row.get(13)?,
        prevname_synonyms: row.get(14)?,
        inhibitors: row.get(15)?,
        ncbi_summary: row.get(16)?,
    })
}

const GENE_COLUMNS: &str = "entrez_id, gene_name, original_name, full_name, is_driver, is_target, \
     alteration_considered, ensembl_id, ensembl_protein_id, cosmic_id, omim_id, uniprot_id, \
     vega_id, hgnc_id, prevname_synonyms, inhibitors, ncbi_summary";

pub fn create_gene(conn: &Connection, gene: &GeneRecord) -> Result<(), StoreError> {
    gene.validate().map_err(validation_error)?;
    conn.execute(
        &format!(
            "INSERT INTO genes ({GENE_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        ),
        params![
            gene.entrez_id.as_str(),
            gene.gene_name,
            gene.original_name,
            gene.full_name,
            gene.is_driver as i64,
            gene.is_target as i64,
            gene.alteration_considered,
            gene.ensembl_id,
            gene.ensembl_protein_id,
            gene.cosmic_id,
            gene.omim_id,
            gene.uniprot_id,
            gene.vega_id,
            gene.hgnc_id,
            gene.prevname_synonyms,
            gene.inhibitors,
            gene.ncbi_summary,
        ],
    )
    .map_err(map_sqlite_error)?;
    Ok(())
}

pub fn get_gene(conn: &Connection, entrez_id: &EntrezId) -> Result<GeneRecord, StoreError> {
    conn.query_row(
        &format!("SELECT {GENE_COLUMNS} FROM genes WHERE entrez_id = ?1"),
        params![entrez_id.as_str()],
        gene_from_row,
    )
    .map_err(map_sqlite_error)
}

pub fn update_gene(conn: &Connection, gene: &GeneRecord) -> Result<(), StoreError> {
    gene.validate().map_err(validation_error)?;
    let changed = conn
        .execute(
            "UPDATE genes SET gene_name = ?2, original_name = ?3, full_name = ?4, \
             is_driver = ?5, is_target = ?6, alteration_considered = ?7, ensembl_id = ?8, \
             ensembl_protein_id = ?9, cosmic_id = ?10, omim_id = ?11, uniprot_id = ?12, \
             vega_id = ?13, hgnc_id = ?14, prevname_synonyms = ?15, inhibitors = ?16, \
             ncbi_summary = ?17 WHERE entrez_id = ?1",
            params![
                gene.entrez_id.as_str(),
                gene.gene_name,
                gene.original_name,
                gene.full_name,
                gene.is_driver as i64,
                gene.is_target as i64,
                gene.alteration_considered,
                gene.ensembl_id,
                gene.ensembl_protein_id,
                gene.cosmic_id,
                gene.omim_id,
                gene.uniprot_id,
                gene.vega_id,
                gene.hgnc_id,
                gene.prevname_synonyms,
                gene.inhibitors,
                gene.ncbi_summary,
            ],
        )
        .map_err(map_sqlite_error)?;
    if changed == 0 {
        return Err(StoreError::new(
            StoreErrorCode::NotFound,
            format!("gene {} does not exist", gene.entrez_id),
        ));
    }
    Ok(())
}

pub fn all_genes(conn: &Connection) -> Result<Vec<GeneRecord>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {GENE_COLUMNS} FROM genes ORDER BY entrez_id"
        ))
        .map_err(map_sqlite_error)?;
    let rows = stmt
        .query_map([], gene_from_row)
        .map_err(map_sqlite_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sqlite_error)
}

pub fn driver_genes(conn: &Connection) -> Result<Vec<GeneRecord>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {GENE_COLUMNS} FROM genes WHERE is_driver = 1 ORDER BY entrez_id"
        ))
        .map_err(map_sqlite_error)?;
    let rows = stmt
        .query_map([], gene_from_row)
        .map_err(map_sqlite_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sqlite_error)
}

pub fn create_study(conn: &Connection, study: &StudyRecord) -> Result<(), StoreError> {
    study.validate().map_err(validation_error)?;
    conn.execute(
        "INSERT INTO studies (pmid, code, short_name, title, authors, experiment_type, \
         abstract, summary, journal, pub_date, num_targets) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            study.pmid.as_str(),
            study.code,
            study.short_name,
            study.title,
            study.authors,
            study.experiment_type.as_str(),
            study.abstract_text,
            study.summary,
            study.journal,
            study.pub_date,
            study.num_targets,
        ],
    )
    .map_err(map_sqlite_error)?;
    Ok(())
}

pub fn get_study(conn: &Connection, pmid: &Pmid) -> Result<StudyRecord, StoreError> {
    let raw = conn
        .query_row(
            "SELECT pmid, code, short_name, title, authors, experiment_type, abstract, \
             summary, journal, pub_date, num_targets FROM studies WHERE pmid = ?1",
            params![pmid.as_str()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                    row.get::<_, String>(9)?,
                    row.get::<_, u32>(10)?,
                ))
            },
        )
        .map_err(map_sqlite_error)?;
    Ok(StudyRecord {
        pmid: Pmid::parse(&raw.0).map_err(decode_error)?,
        code: raw.1,
        short_name: raw.2,
        title: raw.3,
        authors: raw.4,
        experiment_type: ExperimentType::parse(&raw.5).map_err(decode_error)?,
        abstract_text: raw.6,
        summary: raw.7,
        journal: raw.8,
        pub_date: raw.9,
        num_targets: raw.10,
    })
}

fn dependency_from_parts(
    driver: String,
    target: String,
    study: String,
    histotype: String,
    scores: DependencyScores,
    interaction: Option<String>,
) -> Result<DependencyRecord, StoreError> {
    let interaction = match interaction {
        Some(raw) => Some(Confidence::parse(&raw).map_err(decode_error)?),
        None => None,
    };
    Ok(DependencyRecord {
        key: DependencyKey {
            driver: EntrezId::parse(&driver).map_err(decode_error)?,
            target: EntrezId::parse(&target).map_err(decode_error)?,
            histotype: Histotype::parse(&histotype).map_err(decode_error)?,
            study: Pmid::parse(&study).map_err(decode_error)?,
        },
        scores,
        interaction,
    })
}

type RawDependencyRow = (
    String,
    String,
    String,
    String,
    f64,
    f64,
    f64,
    f64,
    f64,
    Option<String>,
    String,
);

fn raw_dependency_from_row(row: &Row<'_>) -> rusqlite::Result<RawDependencyRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
    ))
}

fn assemble_dependency(raw: RawDependencyRow) -> Result<DependencyRecord, StoreError> {
    let scores = DependencyScores {
        wilcox_p: raw.4,
        effect_size: raw.5,
        za: raw.6,
        zb: raw.7,
        zdiff: raw.8,
        boxplot_data: raw.10,
    };
    dependency_from_parts(raw.0, raw.1, raw.2, raw.3, scores, raw.9)
}

const DEPENDENCY_COLUMNS: &str =
    "driver, target, study, histotype, wilcox_p, effect_size, za, zb, zdiff, interaction, boxplot_data";

pub fn insert_dependency(conn: &Connection, dep: &DependencyRecord) -> Result<(), StoreError> {
    conn.execute(
        &format!(
            "INSERT INTO dependencies ({DEPENDENCY_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ),
        params![
            dep.key.driver.as_str(),
            dep.key.target.as_str(),
            dep.key.study.as_str(),
            dep.key.histotype.as_code(),
            dep.scores.wilcox_p,
            dep.scores.effect_size,
            dep.scores.za,
            dep.scores.zb,
            dep.scores.zdiff,
            dep.interaction.map(Confidence::as_str),
            dep.scores.boxplot_data,
        ],
    )
    .map_err(map_sqlite_error)?;
    Ok(())
}

pub fn get_dependency(
    conn: &Connection,
    key: &DependencyKey,
) -> Result<DependencyRecord, StoreError> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {DEPENDENCY_COLUMNS} FROM dependencies \
                 WHERE driver = ?1 AND target = ?2 AND histotype = ?3 AND study = ?4"
            ),
            params![
                key.driver.as_str(),
                key.target.as_str(),
                key.histotype.as_code(),
                key.study.as_str(),
            ],
            raw_dependency_from_row,
        )
        .map_err(map_sqlite_error)?;
    assemble_dependency(raw)
}

pub fn update_dependency_scores(
    conn: &Connection,
    key: &DependencyKey,
    scores: &DependencyScores,
) -> Result<(), StoreError> {
    let changed = conn
        .execute(
            "UPDATE dependencies SET wilcox_p = ?5, effect_size = ?6, za = ?7, zb = ?8, \
             zdiff = ?9, boxplot_data = ?10 \
             WHERE driver = ?1 AND target = ?2 AND histotype = ?3 AND study = ?4",
            params![
                key.driver.as_str(),
                key.target.as_str(),
                key.histotype.as_code(),
                key.study.as_str(),
                scores.wilcox_p,
                scores.effect_size,
                scores.za,
                scores.zb,
                scores.zdiff,
                scores.boxplot_data,
            ],
        )
        .map_err(map_sqlite_error)?;
    if changed == 0 {
        return Err(StoreError::new(
            StoreErrorCode::NotFound,
            "dependency key does not exist",
        ));
    }
    Ok(())
}

pub fn set_dependency_interaction(
    conn: &Connection,
    key: &DependencyKey,
    confidence: Confidence,
) -> Result<(), StoreError> {
    let changed = conn
        .execute(
            "UPDATE dependencies SET interaction = ?5 \
             WHERE driver = ?1 AND target = ?2 AND histotype = ?3 AND study = ?4",
            params![
                key.driver.as_str(),
                key.target.as_str(),
                key.histotype.as_code(),
                key.study.as_str(),
                confidence.as_str(),
            ],
        )
        .map_err(map_sqlite_error)?;
    if changed == 0 {
        return Err(StoreError::new(
            StoreErrorCode::NotFound,
            "dependency key does not exist",
        ));
    }
    Ok(())
}

pub fn all_dependencies(conn: &Connection) -> Result<Vec<DependencyRecord>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {DEPENDENCY_COLUMNS} FROM dependencies \
             ORDER BY driver, target, histotype, study"
        ))
        .map_err(map_sqlite_error)?;
    let raws = stmt
        .query_map([], raw_dependency_from_row)
        .map_err(map_sqlite_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sqlite_error)?;
    raws.into_iter().map(assemble_dependency).collect()
}

pub fn count(conn: &Connection, table: &str) -> Result<u64, StoreError> {
    // Table names come from a fixed internal set, never from input.
    debug_assert!(matches!(table, "genes" | "studies" | "dependencies"));
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as u64)
    .map_err(map_sqlite_error)
}

pub fn count_by_interaction(
    conn: &Connection,
    confidence: Confidence,
) -> Result<u64, StoreError> {
    conn.query_row(
        "SELECT COUNT(*) FROM dependencies WHERE interaction = ?1",
        params![confidence.as_str()],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u64)
    .map_err(map_sqlite_error)
}

pub fn delete_all(conn: &Connection) -> Result<(), StoreError> {
    // Dependencies first: they hold the foreign keys.
    conn.execute_batch(
        "DELETE FROM dependencies;
         DELETE FROM studies;
         DELETE FROM genes;",
    )
    .map_err(map_sqlite_error)
}
