// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Reset,
    Studies,
    Genes,
    Enrichment,
    Dependencies,
    Interactions,
    Finalize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportEvent {
    pub stage: ImportStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// Deterministic in-memory record of the pipeline's progress, kept
/// separate from the tracing diagnostics so it can be emitted as
/// machine output after the run.
#[derive(Debug, Default, Clone)]
pub struct ImportLog {
    events: Vec<ImportEvent>,
}

impl ImportLog {
    pub fn emit(
        &mut self,
        stage: ImportStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        self.events.push(ImportEvent {
            stage,
            name: name.into(),
            fields,
        });
    }

    pub fn emit_count(&mut self, stage: ImportStage, name: impl Into<String>, count: u64) {
        let mut fields = BTreeMap::new();
        fields.insert("count".to_string(), count.to_string());
        self.emit(stage, name, fields);
    }

    #[must_use]
    pub fn events(&self) -> &[ImportEvent] {
        &self.events
    }
}
