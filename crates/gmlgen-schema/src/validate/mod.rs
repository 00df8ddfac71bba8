//! Structural validation of the entity model, run before any classification.

pub mod naming;

use crate::node::{EntitySchema, Model};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ValidationError
/// Every problem found on one entity, in field order.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("entity '{entity}' failed validation: {}", issues.join("; "))]
pub struct ValidationError {
    pub entity: String,
    pub issues: Vec<String>,
}

/// Validate every entity of the model plus model-wide uniqueness.
/// Stops at the first entity (in model order) that has problems.
pub fn validate_model(model: &Model) -> Result<(), ValidationError> {
    validate_unique(model)?;

    model.entities().iter().try_for_each(validate_entity)
}

/// Model-wide checks only: every entity name appears once.
pub fn validate_unique(model: &Model) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();

    for entity in model.entities() {
        if !seen.insert(entity.name.as_str()) {
            return Err(ValidationError {
                entity: entity.name.clone(),
                issues: vec![format!("duplicate entity name '{}'", entity.name)],
            });
        }
    }

    Ok(())
}

/// Validate a single entity: names are identifiers, types are non-empty,
/// field names are unique.
pub fn validate_entity(entity: &EntitySchema) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if let Err(e) = naming::validate_entity_name(&entity.name) {
        issues.push(e);
    }

    let mut seen = BTreeSet::new();
    for field in &entity.fields {
        if let Err(e) = naming::validate_field_name(&field.name)
            .and_then(|()| naming::validate_field_local(&entity.name, &field.name))
        {
            issues.push(e);
        }
        if field.ty.trim().is_empty() {
            issues.push(format!("field '{}' has an empty type", field.name));
        }
        if !field.name.is_empty() && !seen.insert(field.name.as_str()) {
            issues.push(format!("duplicate field name '{}'", field.name));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            entity: entity.name.clone(),
            issues,
        })
    }
}

///
/// TESTS
///
