// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Per-source duplicate mode, declared by the caller for each result
/// file rather than inferred from the data.
///
/// `DuplicatesImpossible` inserts every row unconditionally and is
/// valid only for sources known to emit one row per logical key.
/// `DuplicatesPossible` routes every row through the keep-lowest-p
/// resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRowPolicy {
    DuplicatesImpossible,
    DuplicatesPossible,
}

impl DuplicateRowPolicy {
    /// The study-description source flags duplicate-capable files
    /// with a literal "1".
    #[must_use]
    pub fn from_flag(raw: &str) -> Self {
        if raw.trim() == "1" {
            Self::DuplicatesPossible
        } else {
            Self::DuplicatesImpossible
        }
    }
}

impl Default for DuplicateRowPolicy {
    fn default() -> Self {
        Self::DuplicatesImpossible
    }
}

#[cfg(test)]
mod tests {
    use super::DuplicateRowPolicy;

    #[test]
    fn flag_parsing_defaults_to_impossible() {
        assert_eq!(
            DuplicateRowPolicy::from_flag("1"),
            DuplicateRowPolicy::DuplicatesPossible
        );
        assert_eq!(
            DuplicateRowPolicy::from_flag("0"),
            DuplicateRowPolicy::DuplicatesImpossible
        );
        assert_eq!(
            DuplicateRowPolicy::from_flag(""),
            DuplicateRowPolicy::DuplicatesImpossible
        );
    }
}
