use crate::{
    Error,
    write::{OutputWriter, WriteReport},
};
use gmlgen_build::{LabelMap, Timestamp};
use gmlgen_schema::{load::load_model, plan::plan_entities, types::UnknownTypePolicy};
use std::{collections::BTreeSet, path::PathBuf};

///
/// GenerateRequest
///

#[derive(Clone, Debug)]
pub struct GenerateRequest {
    /// Entities to generate; empty means every entity in the model.
    pub entities: BTreeSet<String>,
    pub model_path: PathBuf,
    pub output_root: PathBuf,
    pub unknown_types: UnknownTypePolicy,

    /// Stamp for generated headers; the current time when absent.
    pub timestamp: Option<Timestamp>,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(model_path: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            entities: BTreeSet::new(),
            model_path: model_path.into(),
            output_root: output_root.into(),
            unknown_types: UnknownTypePolicy::default(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn unknown_types(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

///
/// EntityFailure
/// An entity whose scripts could not be written.
///

#[derive(Debug)]
pub struct EntityFailure {
    pub entity: String,
    pub error: Error,
}

///
/// Summary
///

#[derive(Debug, Default)]
pub struct Summary {
    /// Entities whose scripts were written, in model order.
    pub generated: Vec<String>,
    pub written: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<EntityFailure>,
    pub labels: Vec<LabelMap>,
}

impl Summary {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Every entity's label map folded into one.
    #[must_use]
    pub fn merged_labels(&self) -> LabelMap {
        LabelMap::merged(&self.labels)
    }

    fn record(&mut self, entity: &str, report: WriteReport) {
        self.generated.push(entity.to_string());
        self.written.extend(report.written);
        self.skipped.extend(report.skipped);
    }
}

/// Load, classify, emit and write.
///
/// Model, selection and classification problems abort before any file is
/// touched. Write problems fail only the entity they belong to; the run
/// carries on and records them in the summary.
pub fn run(request: &GenerateRequest) -> Result<Summary, Error> {
    let model = load_model(&request.model_path)?;
    let plans = plan_entities(&model, &request.entities, request.unknown_types)?;

    let timestamp = request.timestamp.clone().unwrap_or_else(Timestamp::now);
    let mut writer = OutputWriter::new(&request.output_root);
    let mut summary = Summary::default();

    for plan in &plans {
        let snippets = gmlgen_build::generate(plan, &timestamp);
        summary.labels.push(LabelMap::from_plan(plan));

        match writer.write(&plan.name, &snippets) {
            Ok(report) => {
                log::info!("saved {}", plan.name);
                summary.record(&plan.name, report);
            }
            Err(err) => {
                log::warn!("{}: {err}", plan.name);
                summary.failures.push(EntityFailure {
                    entity: plan.name.clone(),
                    error: err.into(),
                });
            }
        }
    }

    Ok(summary)
}

///
/// TESTS
///
