// SPDX-License-Identifier: Apache-2.0

use crate::table::{parse_float, read_columns};
use crate::xref::strip_taxon_prefix;
use crate::ImportError;
use cgd_model::{Confidence, INTERACTION_SCORE_FLOOR, SELF_INTERACTION_SCORE};
use cgd_store::StoreTx;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Protein-interaction evidence, filtered at load time to pairs that
/// touch a known driver protein and score at or above the persistence
/// floor. Sub-threshold pairs are discarded entirely, never stored as
/// "Low".
#[derive(Debug, Default, Clone)]
pub struct InteractionNetwork {
    scores: BTreeMap<(String, String), f64>,
}

impl InteractionNetwork {
    /// The network file is space-delimited with a header line:
    /// protein1, protein2, combined score, both proteins
    /// taxon-prefixed.
    pub fn load(path: &Path, driver_proteins: &BTreeSet<String>) -> Result<Self, ImportError> {
        let mut network = Self::default();
        for cols in read_columns(path, b' ', true)? {
            if cols.len() < 3 {
                return Err(ImportError(format!(
                    "malformed interaction row in {}: expected 3 columns, got {}",
                    path.display(),
                    cols.len()
                )));
            }
            let score = parse_float(&cols[2], "combined_score", path)?;
            if score < INTERACTION_SCORE_FLOOR {
                continue;
            }
            let a = strip_taxon_prefix(&cols[0]).to_string();
            let b = strip_taxon_prefix(&cols[1]).to_string();
            if driver_proteins.contains(&a) || driver_proteins.contains(&b) {
                network.scores.insert((a, b), score);
            }
        }
        Ok(network)
    }

    /// Interaction evidence is undirected: both orientations are
    /// consulted and, when they disagree, the stronger score wins so
    /// the answer never depends on file order.
    #[must_use]
    pub fn undirected_score(&self, a: &str, b: &str) -> Option<f64> {
        let forward = self.scores.get(&(a.to_string(), b.to_string()));
        let reverse = self.scores.get(&(b.to_string(), a.to_string()));
        match (forward, reverse) {
            (Some(f), Some(r)) => Some(f.max(*r)),
            (Some(f), None) => Some(*f),
            (None, Some(r)) => Some(*r),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InteractionCounts {
    pub annotated: u64,
    pub self_interactions: u64,
}

/// Annotates every dependency whose driver and target both resolve to
/// protein identifiers. Self-interactions are forced into the top
/// bucket regardless of network evidence.
pub fn annotate_interactions(
    tx: &StoreTx<'_>,
    network: &InteractionNetwork,
) -> Result<InteractionCounts, ImportError> {
    let protein_by_entrez: BTreeMap<String, String> = tx
        .all_genes()?
        .into_iter()
        .filter_map(|gene| {
            gene.ensembl_protein_id
                .map(|protein| (gene.entrez_id.as_str().to_string(), protein))
        })
        .collect();

    let mut counts = InteractionCounts::default();
    for dep in tx.all_dependencies()? {
        let driver_protein = protein_by_entrez.get(dep.key.driver.as_str());
        let target_protein = protein_by_entrez.get(dep.key.target.as_str());
        let (Some(driver_protein), Some(target_protein)) = (driver_protein, target_protein) else {
            continue;
        };
        if driver_protein == target_protein {
            let bucket = Confidence::from_score(SELF_INTERACTION_SCORE);
            tx.set_dependency_interaction(&dep.key, bucket)?;
            counts.annotated += 1;
            counts.self_interactions += 1;
            continue;
        }
        if let Some(score) = network.undirected_score(driver_protein, target_protein) {
            tx.set_dependency_interaction(&dep.key, Confidence::from_score(score))?;
            counts.annotated += 1;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::{annotate_interactions, InteractionNetwork};
    use cgd_model::{
        Confidence, DependencyKey, DependencyRecord, DependencyScores, EntrezId, ExperimentType,
        GeneRecord, Histotype, Pmid, StudyRecord,
    };
    use cgd_store::SqliteStore;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    fn drivers(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_keeps_only_driver_touching_pairs_at_or_above_the_floor() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("protein.links.txt");
        fs::write(
            &path,
            "protein1 protein2 combined_score\n\
             9606.ENSP1 9606.ENSP2 650\n\
             9606.ENSP1 9606.ENSP3 399\n\
             9606.ENSP4 9606.ENSP5 950\n",
        )
        .expect("write");
        let network =
            InteractionNetwork::load(&path, &drivers(&["ENSP1"])).expect("load network");
        // ENSP1-ENSP3 is sub-threshold, ENSP4-ENSP5 touches no driver.
        assert_eq!(network.len(), 1);
        assert_eq!(network.undirected_score("ENSP1", "ENSP2"), Some(650.0));
        assert_eq!(network.undirected_score("ENSP1", "ENSP3"), None);
        assert_eq!(network.undirected_score("ENSP4", "ENSP5"), None);
    }

    #[test]
    fn lookup_is_undirected_and_prefers_the_stronger_score() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("protein.links.txt");
        fs::write(
            &path,
            "protein1 protein2 combined_score\n\
             9606.ENSP1 9606.ENSP2 650\n\
             9606.ENSP2 9606.ENSP1 910\n",
        )
        .expect("write");
        let network =
            InteractionNetwork::load(&path, &drivers(&["ENSP1"])).expect("load network");
        assert_eq!(network.undirected_score("ENSP1", "ENSP2"), Some(910.0));
        assert_eq!(network.undirected_score("ENSP2", "ENSP1"), Some(910.0));
    }

    fn gene_with_protein(entrez: &str, name: &str, protein: &str) -> GeneRecord {
        let mut gene = GeneRecord::new(EntrezId::parse(entrez).expect("entrez"), name, "");
        gene.ensembl_protein_id = Some(protein.to_string());
        gene
    }

    #[test]
    fn self_interactions_annotate_highest_without_network_evidence() {
        let mut store = SqliteStore::open_in_memory().expect("store");
        let tx = store.transaction().expect("tx");
        tx.create_gene(&gene_with_protein("1", "DRV", "ENSP1"))
            .expect("driver");
        tx.create_gene(&gene_with_protein("2", "TGT", "ENSP1"))
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
        let key = DependencyKey {
            driver: EntrezId::parse("1").expect("entrez"),
            target: EntrezId::parse("2").expect("entrez"),
            histotype: Histotype::Pancan,
            study: Pmid::parse("100").expect("pmid"),
        };
        tx.insert_dependency(&DependencyRecord::new(
            key.clone(),
            DependencyScores {
                wilcox_p: 0.01,
                effect_size: 0.7,
                za: -1.0,
                zb: 0.0,
                zdiff: -1.0,
                boxplot_data: "payload".to_string(),
            },
        ))
        .expect("dependency");

        let counts =
            annotate_interactions(&tx, &InteractionNetwork::default()).expect("annotate");
        assert_eq!(counts.annotated, 1);
        assert_eq!(counts.self_interactions, 1);
        let dep = tx.get_dependency(&key).expect("dependency back");
        assert_eq!(dep.interaction, Some(Confidence::Highest));
    }
}
