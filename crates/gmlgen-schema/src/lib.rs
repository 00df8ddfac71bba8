//! Entity model, type-expression classification and per-entity generation plans.
//!
//! This crate is pure: it never touches the filesystem except through
//! [`load::load_model`], and everything downstream of loading is a function of
//! the model alone.

pub mod load;
pub mod node;
pub mod plan;
pub mod types;
pub mod validate;

/// Maximum length for entity identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::{load::LoadError, plan::PlanError, validate::ValidationError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        node::*,
        plan::{EntityPlan, PlannedField},
        types::{
            Classified, ContainerKind, FieldCategory, TypeContext, TypeExpr, UnknownTypePolicy,
            ValueKind,
        },
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
