use crate::{
    Error,
    node::{EntitySchema, Model},
    types::{
        Classified, ContainerKind, TypeContext, TypeError, TypeExpr, UnknownTypePolicy,
        classify_expr,
    },
    validate::{validate_entity, validate_unique},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// PlanError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("entity '{entity}' field '{field}' has unusable type '{ty}': {source}")]
pub struct PlanError {
    pub entity: String,
    pub field: String,
    pub ty: String,
    #[source]
    pub source: TypeError,
}

///
/// PlannedField
///
/// One field after classification. `index` is the field's storage slot,
/// fixed by declaration order; `ty` is the canonical rendering of the
/// declared type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedField {
    pub index: usize,
    pub name: String,
    pub ty: String,
    pub class: Classified,
}

impl PlannedField {
    #[must_use]
    pub const fn container(&self) -> ContainerKind {
        self.class.container()
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.class.is_entity()
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.class.optional
    }

    /// The referenced entity name, for Entity-family fields only.
    #[must_use]
    pub fn entity_ref(&self) -> Option<&str> {
        self.is_entity().then_some(self.class.element.as_str())
    }
}

///
/// EntityPlan
///
/// The classified, ordered field list of one entity. Every emitter reads
/// from this and nothing else.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityPlan {
    pub name: String,
    pub fields: Vec<PlannedField>,
}

impl EntityPlan {
    /// Classify every field of `entity`, stopping at the first one that fails.
    pub fn new(entity: &EntitySchema, ctx: &TypeContext<'_>) -> Result<Self, PlanError> {
        let fields = entity
            .fields
            .iter()
            .enumerate()
            .map(|(index, decl)| {
                let fail = |source: TypeError| PlanError {
                    entity: entity.name.clone(),
                    field: decl.name.clone(),
                    ty: decl.ty.clone(),
                    source,
                };
                let expr = TypeExpr::parse(&decl.ty).map_err(|e| fail(e.into()))?;
                let class = classify_expr(&expr, ctx).map_err(fail)?;

                Ok(PlannedField {
                    index,
                    name: decl.name.clone(),
                    ty: expr.to_string(),
                    class,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        Ok(Self {
            name: entity.name.clone(),
            fields,
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PlannedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Select the requested entities, validate them and classify them.
///
/// Entity names must be unique across the whole model; every other check
/// only applies to the selected entities.
///
/// Everything here happens before a single byte is generated: a missing
/// entity, an invalid name or an unusable type aborts the whole run.
pub fn plan_entities(
    model: &Model,
    filter: &BTreeSet<String>,
    policy: UnknownTypePolicy,
) -> Result<Vec<EntityPlan>, Error> {
    let selected = model.select(filter)?;
    validate_unique(model)?;
    for entity in &selected {
        validate_entity(entity)?;
    }

    let names = model.entity_names();
    let plans = selected
        .into_iter()
        .map(|entity| {
            let ctx = TypeContext::for_entity(entity)
                .with_entities(names.iter().copied())
                .with_policy(policy);

            EntityPlan::new(entity, &ctx)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(plans)
}

///
/// TESTS
///
