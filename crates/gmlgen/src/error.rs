use crate::write::WriteError;
use derive_more::Display;
use gmlgen_schema::{Error as SchemaError, load::LoadError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        let kind = match &err {
            LoadError::EntityNotFound { .. } => ErrorKind::EntityNotFound,
            LoadError::ModelNotFound { .. } => ErrorKind::ModelNotFound,
            LoadError::Parse { .. } => ErrorKind::ModelParse,
            LoadError::Read { .. } => ErrorKind::Io,
        };

        Self::new(kind, err.to_string())
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Load(err) => err.into(),
            SchemaError::Plan(err) => Self::new(ErrorKind::Classification, err.to_string()),
            SchemaError::Validation(err) => {
                Self::new(ErrorKind::SchemaValidation, err.to_string())
            }
        }
    }
}

impl From<WriteError> for Error {
    fn from(err: WriteError) -> Self {
        let kind = match &err {
            WriteError::DuplicateDestination { .. } => ErrorKind::DuplicateDestination,
            WriteError::Io { .. } => ErrorKind::Io,
            WriteError::ScaffoldingMissing { .. } => ErrorKind::ScaffoldingMissing,
        };

        Self::new(kind, err.to_string())
    }
}

///
/// ErrorKind
///
/// Model, selection, validation and classification kinds abort a run before
/// anything is written. Write kinds are recorded per entity while the run
/// continues; `Io` can be either, depending on when it happens.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    Classification,
    DuplicateDestination,
    EntityNotFound,
    Io,
    ModelNotFound,
    ModelParse,
    ScaffoldingMissing,
    SchemaValidation,
}

impl ErrorKind {
    /// True for kinds that only fail a single entity's write step.
    #[must_use]
    pub const fn is_entity_level(self) -> bool {
        matches!(self, Self::DuplicateDestination | Self::ScaffoldingMissing)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use gmlgen_schema::validate::ValidationError;
    use std::path::PathBuf;

    #[test]
    fn load_errors_map_to_kinds() {
        let err: Error = LoadError::EntityNotFound {
            name: "Foo".to_string(),
        }
        .into();

        assert_eq!(err.kind, ErrorKind::EntityNotFound);
        assert!(err.message.contains("Foo"));
    }

    #[test]
    fn schema_errors_unwrap_to_the_inner_kind() {
        let err: Error = SchemaError::Validation(ValidationError {
            entity: "Mob".to_string(),
            issues: vec!["field name is empty".to_string()],
        })
        .into();
        assert_eq!(err.kind, ErrorKind::SchemaValidation);

        let err: Error = SchemaError::Load(LoadError::ModelNotFound {
            path: PathBuf::from("model.json"),
        })
        .into();
        assert_eq!(err.kind, ErrorKind::ModelNotFound);
    }

    #[test]
    fn write_errors_are_entity_level() {
        let err: Error = WriteError::ScaffoldingMissing {
            script: "createMob".to_string(),
            path: PathBuf::from("scripts/createMob"),
        }
        .into();

        assert!(err.kind.is_entity_level());
        assert!(!ErrorKind::ModelParse.is_entity_level());
    }
}
