// SPDX-License-Identifier: Apache-2.0

use crate::schema::{SCHEMA_SQL, SCHEMA_VERSION};
use crate::{map_sqlite_error, ops, StoreError};
use cgd_model::{
    Confidence, DependencyKey, DependencyRecord, DependencyScores, EntrezId, GeneRecord, Pmid,
    StudyRecord,
};
use rusqlite::{Connection, Transaction};
use std::path::Path;

/// SQLite-backed record store. All mutations happen through a
/// [`StoreTx`]; reads are available on both the store and an open
/// transaction.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL).map_err(map_sqlite_error)?;
        conn.execute(
            "INSERT OR REPLACE INTO cgd_meta (k, v) VALUES ('schema_version', ?1)",
            [SCHEMA_VERSION.to_string()],
        )
        .map_err(map_sqlite_error)?;
        Ok(Self { conn })
    }

    /// Opens the all-or-nothing scope for a full import. Dropping the
    /// returned scope without calling [`StoreTx::commit`] rolls back
    /// every change made inside it.
    pub fn transaction(&mut self) -> Result<StoreTx<'_>, StoreError> {
        let tx = self.conn.transaction().map_err(map_sqlite_error)?;
        Ok(StoreTx { tx })
    }

    pub fn get_gene(&self, entrez_id: &EntrezId) -> Result<GeneRecord, StoreError> {
        ops::get_gene(&self.conn, entrez_id)
    }

    pub fn get_study(&self, pmid: &Pmid) -> Result<StudyRecord, StoreError> {
        ops::get_study(&self.conn, pmid)
    }

    pub fn get_dependency(&self, key: &DependencyKey) -> Result<DependencyRecord, StoreError> {
        ops::get_dependency(&self.conn, key)
    }

    pub fn all_genes(&self) -> Result<Vec<GeneRecord>, StoreError> {
        ops::all_genes(&self.conn)
    }

    pub fn all_dependencies(&self) -> Result<Vec<DependencyRecord>, StoreError> {
        ops::all_dependencies(&self.conn)
    }

    pub fn gene_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.conn, "genes")
    }

    pub fn study_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.conn, "studies")
    }

    pub fn dependency_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.conn, "dependencies")
    }

    pub fn count_by_interaction(&self, confidence: Confidence) -> Result<u64, StoreError> {
        ops::count_by_interaction(&self.conn, confidence)
    }
}

/// One import-wide transaction over the record store.
pub struct StoreTx<'a> {
    tx: Transaction<'a>,
}

impl StoreTx<'_> {
    pub fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().map_err(map_sqlite_error)
    }

    pub fn delete_all(&self) -> Result<(), StoreError> {
        ops::delete_all(&self.tx)
    }

    pub fn create_gene(&self, gene: &GeneRecord) -> Result<(), StoreError> {
        ops::create_gene(&self.tx, gene)
    }

    pub fn get_gene(&self, entrez_id: &EntrezId) -> Result<GeneRecord, StoreError> {
        ops::get_gene(&self.tx, entrez_id)
    }

    pub fn update_gene(&self, gene: &GeneRecord) -> Result<(), StoreError> {
        ops::update_gene(&self.tx, gene)
    }

    pub fn all_genes(&self) -> Result<Vec<GeneRecord>, StoreError> {
        ops::all_genes(&self.tx)
    }

    pub fn driver_genes(&self) -> Result<Vec<GeneRecord>, StoreError> {
        ops::driver_genes(&self.tx)
    }

    pub fn create_study(&self, study: &StudyRecord) -> Result<(), StoreError> {
        ops::create_study(&self.tx, study)
    }

    pub fn get_study(&self, pmid: &Pmid) -> Result<StudyRecord, StoreError> {
        ops::get_study(&self.tx, pmid)
    }

    pub fn insert_dependency(&self, dep: &DependencyRecord) -> Result<(), StoreError> {
        ops::insert_dependency(&self.tx, dep)
    }

    pub fn get_dependency(&self, key: &DependencyKey) -> Result<DependencyRecord, StoreError> {
        ops::get_dependency(&self.tx, key)
    }

    pub fn update_dependency_scores(
        &self,
        key: &DependencyKey,
        scores: &DependencyScores,
    ) -> Result<(), StoreError> {
        ops::update_dependency_scores(&self.tx, key, scores)
    }

    pub fn set_dependency_interaction(
        &self,
        key: &DependencyKey,
        confidence: Confidence,
    ) -> Result<(), StoreError> {
        ops::set_dependency_interaction(&self.tx, key, confidence)
    }

    pub fn all_dependencies(&self) -> Result<Vec<DependencyRecord>, StoreError> {
        ops::all_dependencies(&self.tx)
    }

    pub fn gene_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.tx, "genes")
    }

    pub fn study_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.tx, "studies")
    }

    pub fn dependency_count(&self) -> Result<u64, StoreError> {
        ops::count(&self.tx, "dependencies")
    }

    pub fn count_by_interaction(&self, confidence: Confidence) -> Result<u64, StoreError> {
        ops::count_by_interaction(&self.tx, confidence)
    }
}
