// SPDX-License-Identifier: Apache-2.0

use crate::gene::{EntrezId, ParseError};
use crate::interaction::Confidence;
use crate::study::Pmid;
use serde::{Deserialize, Serialize};

// 'HAEMATOPOIETIC_AND_LYMPHOID_TISSUE' is 35 characters.
pub const HISTOTYPE_MAX_LEN: usize = 35;

/// Tissue-of-origin category. `Pancan` is the cross-tissue aggregate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Histotype {
    Bone,
    Breast,
    CentralNervousSystem,
    Cervix,
    Endometrium,
    HaematopoieticAndLymphoidTissue,
    HeadNeck,
    Intestine,
    Kidney,
    LargeIntestine,
    Lung,
    Oesophagus,
    Ovary,
    Pancreas,
    Pleura,
    Prostate,
    Skin,
    SoftTissue,
    Stomach,
    UrinaryTract,
    Pancan,
}

impl Histotype {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "BONE" => Ok(Self::Bone),
            "BREAST" => Ok(Self::Breast),
            "CENTRAL_NERVOUS_SYSTEM" => Ok(Self::CentralNervousSystem),
            "CERVIX" => Ok(Self::Cervix),
            "ENDOMETRIUM" => Ok(Self::Endometrium),
            "HAEMATOPOIETIC_AND_LYMPHOID_TISSUE" => Ok(Self::HaematopoieticAndLymphoidTissue),
            "HEADNECK" => Ok(Self::HeadNeck),
            "INTESTINE" => Ok(Self::Intestine),
            "KIDNEY" => Ok(Self::Kidney),
            "LARGE_INTESTINE" => Ok(Self::LargeIntestine),
            "LUNG" => Ok(Self::Lung),
            "OESOPHAGUS" => Ok(Self::Oesophagus),
            "OVARY" => Ok(Self::Ovary),
            "PANCREAS" => Ok(Self::Pancreas),
            "PLEURA" => Ok(Self::Pleura),
            "PROSTATE" => Ok(Self::Prostate),
            "SKIN" => Ok(Self::Skin),
            "SOFT_TISSUE" => Ok(Self::SoftTissue),
            "STOMACH" => Ok(Self::Stomach),
            "URINARY_TRACT" => Ok(Self::UrinaryTract),
            "PANCAN" => Ok(Self::Pancan),
            _ => Err(ParseError::InvalidFormat(
                "histotype is not in the fixed tissue vocabulary",
            )),
        }
    }

    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Bone => "BONE",
            Self::Breast => "BREAST",
            Self::CentralNervousSystem => "CENTRAL_NERVOUS_SYSTEM",
            Self::Cervix => "CERVIX",
            Self::Endometrium => "ENDOMETRIUM",
            Self::HaematopoieticAndLymphoidTissue => "HAEMATOPOIETIC_AND_LYMPHOID_TISSUE",
            Self::HeadNeck => "HEADNECK",
            Self::Intestine => "INTESTINE",
            Self::Kidney => "KIDNEY",
            Self::LargeIntestine => "LARGE_INTESTINE",
            Self::Lung => "LUNG",
            Self::Oesophagus => "OESOPHAGUS",
            Self::Ovary => "OVARY",
            Self::Pancreas => "PANCREAS",
            Self::Pleura => "PLEURA",
            Self::Prostate => "PROSTATE",
            Self::Skin => "SKIN",
            Self::SoftTissue => "SOFT_TISSUE",
            Self::Stomach => "STOMACH",
            Self::UrinaryTract => "URINARY_TRACT",
            Self::Pancan => "PANCAN",
        }
    }

    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Bone => "Bone",
            Self::Breast => "Breast",
            Self::CentralNervousSystem => "CNS",
            Self::Cervix => "Cervix",
            Self::Endometrium => "Endometrium",
            Self::HaematopoieticAndLymphoidTissue => "Blood & Lymph",
            Self::HeadNeck => "Head & Neck",
            Self::Intestine => "Intestine",
            Self::Kidney => "Kidney",
            Self::LargeIntestine => "Large Intestine",
            Self::Lung => "Lung",
            Self::Oesophagus => "Esophagus",
            Self::Ovary => "Ovary",
            Self::Pancreas => "Pancreas",
            Self::Pleura => "Pleura",
            Self::Prostate => "Prostate",
            Self::Skin => "Skin",
            Self::SoftTissue => "Soft tissue",
            Self::Stomach => "Stomach",
            Self::UrinaryTract => "Urinary tract",
            Self::Pancan => "Pan cancer",
        }
    }
}

/// The compound uniqueness key: at most one dependency record may
/// exist per (driver, target, histotype, study).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(deny_unknown_fields)]
pub struct DependencyKey {
    pub driver: EntrezId,
    pub target: EntrezId,
    pub histotype: Histotype,
    pub study: Pmid,
}

/// The score fields that a stronger (lower p-value) duplicate row is
/// allowed to overwrite in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DependencyScores {
    pub wilcox_p: f64,
    pub effect_size: f64,
    pub za: f64,
    pub zb: f64,
    pub zdiff: f64,
    pub boxplot_data: String,
}

/// One scored driver-to-target relationship within one tissue context,
/// reported by one study. References genes and study by key, never
/// owns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DependencyRecord {
    pub key: DependencyKey,
    pub scores: DependencyScores,
    pub interaction: Option<Confidence>,
}

impl DependencyRecord {
    #[must_use]
    pub fn new(key: DependencyKey, scores: DependencyScores) -> Self {
        Self {
            key,
            scores,
            interaction: None,
        }
    }
}
