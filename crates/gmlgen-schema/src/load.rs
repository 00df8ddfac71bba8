use crate::node::Model;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// LoadError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum LoadError {
    #[error("entity '{name}' wasn't found in the model")]
    EntityNotFound { name: String },

    #[error("model file '{}' wasn't found", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("model file '{}' is not a valid entity model: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read model file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read and decode the entity model document at `path`.
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an entity model from an in-memory JSON document.
pub fn parse_model(json: &str) -> Result<Model, serde_json::Error> {
    serde_json::from_str(json)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_model_not_found() {
        let err = load_model(Path::new("/definitely/not/here/model.json")).unwrap_err();

        assert!(matches!(err, LoadError::ModelNotFound { .. }));
        assert!(err.to_string().contains("wasn't found"));
    }

    #[test]
    fn parses_array_of_entities() {
        let model = parse_model(
            r#"[
                { "name": "A", "schema": { "x": "int" }, "enums": [], "primitives": ["int"] },
                { "name": "B", "schema": { "a": "A" }, "enums": [], "primitives": [] }
            ]"#,
        )
        .unwrap();

        assert_eq!(model.entities().len(), 2);
        assert!(model.get("B").is_some());
    }

    #[test]
    fn rejects_non_string_type_expressions() {
        let result = parse_model(r#"[{ "name": "A", "schema": { "x": 3 } }]"#);

        assert!(result.is_err());
    }
}
