// SPDX-License-Identifier: Apache-2.0

use crate::table::{read_keyed_rows, required_field};
use crate::ImportError;
use cgd_model::{DuplicateRowPolicy, ExperimentType, Pmid, StudyRecord};
use std::path::Path;

/// One study-description row: the study record plus its associated
/// result files and their declared duplicate mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenEntry {
    pub study: StudyRecord,
    pub result_files: Vec<String>,
    pub duplicates: DuplicateRowPolicy,
}

pub fn load_screen_descriptions(path: &Path) -> Result<Vec<ScreenEntry>, ImportError> {
    let mut out = Vec::new();
    for row in read_keyed_rows(path, b'\t')? {
        let pmid = Pmid::parse(required_field(&row, "PMID", path)?)?;
        let experiment_type = ExperimentType::parse(required_field(&row, "Type", path)?)?;
        let num_targets_raw = required_field(&row, "Targets", path)?.trim();
        let num_targets = if num_targets_raw.is_empty() {
            0
        } else {
            num_targets_raw.parse::<u32>().map_err(|_| {
                ImportError(format!(
                    "study {pmid}: Targets is not an integer: '{num_targets_raw}'"
                ))
            })?
        };
        let study = StudyRecord {
            pmid,
            code: required_field(&row, "Code", path)?.to_string(),
            short_name: required_field(&row, "ShortName", path)?.to_string(),
            title: required_field(&row, "Title", path)?.to_string(),
            authors: required_field(&row, "Authors", path)?.to_string(),
            experiment_type,
            abstract_text: required_field(&row, "Abstract", path)?.to_string(),
            summary: required_field(&row, "Summary", path)?.to_string(),
            journal: required_field(&row, "Journal", path)?.to_string(),
            pub_date: required_field(&row, "Date", path)?.to_string(),
            num_targets,
        };
        study.validate()?;
        let result_files = required_field(&row, "CGD_files", path)?
            .split(';')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        let duplicates =
            DuplicateRowPolicy::from_flag(required_field(&row, "DuplicateGenes", path)?);
        out.push(ScreenEntry {
            study,
            result_files,
            duplicates,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::load_screen_descriptions;
    use cgd_model::{DuplicateRowPolicy, ExperimentType};
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str =
        "PMID\tCode\tShortName\tTitle\tAuthors\tAbstract\tSummary\tType\tJournal\tDate\tTargets\tCGD_files\tDuplicateGenes";

    #[test]
    fn screens_carry_their_result_files_and_duplicate_mode() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("ScreenDescriptions.txt");
        fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 26947069\tC\tCampbell (2016)\tKinase dependencies\tCampbell J, et al\tabstract\tkinome screen\tkinome siRNA\tCell Rep\t2016\t713\tcampbell_pancan.txt;campbell_breast.txt\t0\n\
                 25984343\tA\tCowley (2014)\tAchilles screens\tCowley G, et al\tabstract\tshRNA screen\tgenome-wide shRNA\tSci Data\t2014\t\tachilles_pancan.txt\t1\n"
            ),
        )
        .expect("write fixture");
        let screens = load_screen_descriptions(&path).expect("load");
        assert_eq!(screens.len(), 2);

        assert_eq!(screens[0].study.pmid.as_str(), "26947069");
        assert_eq!(screens[0].study.experiment_type, ExperimentType::KinomeSirna);
        assert_eq!(screens[0].study.num_targets, 713);
        assert_eq!(
            screens[0].result_files,
            vec!["campbell_pancan.txt", "campbell_breast.txt"]
        );
        assert_eq!(
            screens[0].duplicates,
            DuplicateRowPolicy::DuplicatesImpossible
        );

        assert_eq!(screens[1].study.num_targets, 0);
        assert_eq!(
            screens[1].duplicates,
            DuplicateRowPolicy::DuplicatesPossible
        );
    }

    #[test]
    fn unknown_experiment_type_is_fatal() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("ScreenDescriptions.txt");
        fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 1\tX\tShort\tTitle\tAuthors\tabstract\tsummary\tCRISPR knockout\tJournal\t2020\t1\tfile.txt\t0\n"
            ),
        )
        .expect("write fixture");
        assert!(load_screen_descriptions(&path).is_err());
    }
}
