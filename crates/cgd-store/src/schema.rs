// SPDX-License-Identifier: Apache-2.0

pub const SCHEMA_VERSION: i64 = 1;

// Length bounds are enforced with CHECK constraints so that an
// overlong value fails the statement instead of being truncated.
// Truncating a uniqueness-bearing key would corrupt the catalogue.
pub const SCHEMA_SQL: &str = "
PRAGMA foreign_keys=ON;
CREATE TABLE IF NOT EXISTS genes (
  entrez_id TEXT PRIMARY KEY CHECK(length(entrez_id) <= 10),
  gene_name TEXT NOT NULL UNIQUE CHECK(length(gene_name) <= 25),
  original_name TEXT NOT NULL CHECK(length(original_name) <= 30),
  full_name TEXT NOT NULL CHECK(length(full_name) <= 200),
  is_driver INTEGER NOT NULL DEFAULT 0,
  is_target INTEGER NOT NULL DEFAULT 0,
  alteration_considered TEXT,
  ensembl_id TEXT CHECK(ensembl_id IS NULL OR length(ensembl_id) <= 20),
  ensembl_protein_id TEXT CHECK(ensembl_protein_id IS NULL OR length(ensembl_protein_id) <= 20),
  cosmic_id TEXT CHECK(cosmic_id IS NULL OR length(cosmic_id) <= 25),
  omim_id TEXT CHECK(omim_id IS NULL OR length(omim_id) <= 10),
  uniprot_id TEXT CHECK(uniprot_id IS NULL OR length(uniprot_id) <= 20),
  vega_id TEXT CHECK(vega_id IS NULL OR length(vega_id) <= 25),
  hgnc_id TEXT CHECK(hgnc_id IS NULL OR length(hgnc_id) <= 10),
  prevname_synonyms TEXT NOT NULL DEFAULT '',
  inhibitors TEXT,
  ncbi_summary TEXT
) WITHOUT ROWID;
CREATE TABLE IF NOT EXISTS studies (
  pmid TEXT PRIMARY KEY CHECK(length(pmid) <= 30),
  code TEXT NOT NULL CHECK(length(code) <= 1),
  short_name TEXT NOT NULL CHECK(length(short_name) <= 50),
  title TEXT NOT NULL CHECK(length(title) <= 250),
  authors TEXT NOT NULL,
  experiment_type TEXT NOT NULL,
  abstract TEXT NOT NULL,
  summary TEXT NOT NULL,
  journal TEXT NOT NULL CHECK(length(journal) <= 100),
  pub_date TEXT NOT NULL CHECK(length(pub_date) <= 30),
  num_targets INTEGER NOT NULL DEFAULT 0
) WITHOUT ROWID;
CREATE TABLE IF NOT EXISTS dependencies (
  id INTEGER PRIMARY KEY,
  driver TEXT NOT NULL REFERENCES genes(entrez_id),
  target TEXT NOT NULL REFERENCES genes(entrez_id),
  study TEXT NOT NULL REFERENCES studies(pmid),
  histotype TEXT NOT NULL CHECK(length(histotype) <= 35),
  wilcox_p REAL NOT NULL,
  effect_size REAL NOT NULL,
  za REAL NOT NULL,
  zb REAL NOT NULL,
  zdiff REAL NOT NULL,
  interaction TEXT,
  boxplot_data TEXT NOT NULL DEFAULT '',
  UNIQUE(driver, target, histotype, study)
);
CREATE INDEX IF NOT EXISTS idx_dependencies_driver ON dependencies(driver);
CREATE INDEX IF NOT EXISTS idx_dependencies_target ON dependencies(target);
CREATE INDEX IF NOT EXISTS idx_dependencies_wilcox_p ON dependencies(wilcox_p);
CREATE INDEX IF NOT EXISTS idx_dependencies_interaction ON dependencies(interaction);
CREATE INDEX IF NOT EXISTS idx_genes_is_driver ON genes(is_driver);
CREATE TABLE IF NOT EXISTS cgd_meta (
  k TEXT PRIMARY KEY,
  v TEXT NOT NULL
) WITHOUT ROWID;
";
