use crate::{load::LoadError, node::EntitySchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// Model
/// The whole entity-model document, in file order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Model {
    entities: Vec<EntitySchema>,
}

impl Model {
    #[must_use]
    pub const fn new(entities: Vec<EntitySchema>) -> Self {
        Self { entities }
    }

    #[must_use]
    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn entity_names(&self) -> BTreeSet<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Entities named by `filter`, in model order. An empty filter selects
    /// every entity; a requested name missing from the model is an error
    /// reported before anything else happens.
    pub fn select(&self, filter: &BTreeSet<String>) -> Result<Vec<&EntitySchema>, LoadError> {
        if filter.is_empty() {
            return Ok(self.entities.iter().collect());
        }

        if let Some(missing) = filter.iter().find(|name| self.get(name).is_none()) {
            return Err(LoadError::EntityNotFound {
                name: missing.clone(),
            });
        }

        Ok(self
            .entities
            .iter()
            .filter(|e| filter.contains(&e.name))
            .collect())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::new(vec![
            EntitySchema::new("Bar"),
            EntitySchema::new("Alpha"),
            EntitySchema::new("Mob"),
        ])
    }

    fn filter(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_filter_selects_everything_in_model_order() {
        let model = model();
        let names: Vec<_> = model
            .select(&BTreeSet::new())
            .unwrap()
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(names, ["Bar", "Alpha", "Mob"]);
    }

    #[test]
    fn filter_keeps_model_order() {
        let model = model();
        let names: Vec<_> = model
            .select(&filter(&["Mob", "Bar"]))
            .unwrap()
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(names, ["Bar", "Mob"]);
    }

    #[test]
    fn unmatched_filter_name_is_entity_not_found() {
        let model = Model::new(vec![EntitySchema::new("Bar")]);
        let err = model.select(&filter(&["Foo"])).unwrap_err();

        assert!(matches!(err, LoadError::EntityNotFound { ref name } if name == "Foo"));
    }
}
