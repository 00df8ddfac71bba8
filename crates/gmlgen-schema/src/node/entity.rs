use crate::node::{FieldDecl, FieldList};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// EntitySchema
///
/// A named record type. `primitives` and `enums` are the type names this
/// entity treats as plain values; anything else a field names is an entity
/// reference.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntitySchema {
    pub name: String,

    #[serde(rename = "schema")]
    pub fields: FieldList,

    #[serde(default)]
    pub primitives: BTreeSet<String>,

    #[serde(default)]
    pub enums: BTreeSet<String>,
}

impl EntitySchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldList::default(),
            primitives: BTreeSet::new(),
            enums: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(FieldDecl::new(name, ty));
        self
    }

    #[must_use]
    pub fn primitives<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primitives.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn enums<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums.extend(names.into_iter().map(Into::into));
        self
    }

    /// True when `name` is stored as a plain value rather than an entity.
    #[must_use]
    pub fn is_value_type(&self, name: &str) -> bool {
        self.primitives.contains(name) || self.enums.contains(name)
    }
}

///
/// TESTS
///
