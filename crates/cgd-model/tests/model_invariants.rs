// SPDX-License-Identifier: Apache-2.0

use cgd_model::{
    Confidence, DependencyKey, DependencyRecord, DependencyScores, EntrezId, GeneRecord,
    Histotype, Pmid,
};
use proptest::prelude::*;

fn key(driver: &str, target: &str, histotype: Histotype, pmid: &str) -> DependencyKey {
    DependencyKey {
        driver: EntrezId::parse(driver).expect("driver entrez"),
        target: EntrezId::parse(target).expect("target entrez"),
        histotype,
        study: Pmid::parse(pmid).expect("pmid"),
    }
}

#[test]
fn dependency_key_equality_is_the_full_tuple() {
    let a = key("1", "2", Histotype::Pancan, "100");
    let b = key("1", "2", Histotype::Pancan, "100");
    let c = key("1", "2", Histotype::Breast, "100");
    let d = key("1", "2", Histotype::Pancan, "101");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
fn fresh_dependency_has_no_interaction_annotation() {
    let record = DependencyRecord::new(
        key("1", "2", Histotype::Pancan, "100"),
        DependencyScores {
            wilcox_p: 0.01,
            effect_size: 0.8,
            za: -1.0,
            zb: 1.0,
            zdiff: -2.0,
            boxplot_data: String::new(),
        },
    );
    assert_eq!(record.interaction, None);
}

#[test]
fn gene_record_serde_round_trip() {
    let mut gene = GeneRecord::new(
        EntrezId::parse("2064").expect("entrez"),
        "ERBB2",
        "erb-b2 receptor tyrosine kinase 2",
    );
    gene.is_driver = true;
    gene.ensembl_protein_id = Some("ENSP00000269571".to_string());
    let json = serde_json::to_string(&gene).expect("serialize");
    let back: GeneRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, gene);
}

proptest! {
    #[test]
    fn confidence_bucketing_is_monotonic(a in 0.0f64..1100.0, b in 0.0f64..1100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Confidence::from_score(lo) <= Confidence::from_score(hi));
    }

    #[test]
    fn confidence_bucketing_is_pure(score in 0.0f64..1100.0) {
        prop_assert_eq!(Confidence::from_score(score), Confidence::from_score(score));
    }
}
