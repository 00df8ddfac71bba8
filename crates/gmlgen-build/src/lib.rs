//! Emitters that turn a classified entity into GML script source.

pub mod body;
pub mod emit;
pub mod header;
pub mod naming;
pub mod runtime;
pub mod snippet;

pub use emit::label::LabelMap;
pub use header::Timestamp;
pub use snippet::{CodeBlock, CodeSnippet, SnippetKind};

use crate::{header::FunctionHeader, naming::EntityNames};
use gmlgen_schema::plan::{EntityPlan, PlannedField};

/// Generate every snippet for one entity.
#[must_use]
pub fn generate(plan: &EntityPlan, timestamp: &Timestamp) -> Vec<CodeSnippet> {
    EntityBuilder::new(plan, timestamp).generate()
}

///
/// EntityBuilder
///

pub struct EntityBuilder<'a> {
    pub plan: &'a EntityPlan,
    pub names: EntityNames,
    pub timestamp: &'a Timestamp,
}

impl<'a> EntityBuilder<'a> {
    #[must_use]
    pub fn new(plan: &'a EntityPlan, timestamp: &'a Timestamp) -> Self {
        Self {
            plan,
            names: EntityNames::new(&plan.name),
            timestamp,
        }
    }

    /// Generate the full snippet set, in emitter order.
    #[must_use]
    pub fn generate(&self) -> Vec<CodeSnippet> {
        vec![
            emit::create::generate(self),
            emit::serialize::generate(self),
            emit::deserialize::generate(self),
            emit::destroy::generate(self),
            emit::accessor::getters(self),
            emit::accessor::setters(self),
            emit::label::generate(self),
        ]
    }

    #[must_use]
    pub fn fields(&self) -> &[PlannedField] {
        &self.plan.fields
    }

    /// Build a routed block from a header and body text.
    #[must_use]
    pub fn block(&self, header: &FunctionHeader, body: String) -> CodeBlock {
        let mut text = header.render(self.timestamp);
        text.push_str(&body);

        CodeBlock::routed(header.name(), text)
    }

    /// `getEntityField(entity)`
    #[must_use]
    pub fn get_call(&self, field: &PlannedField) -> String {
        format!("{}({})", self.names.getter(&field.name), self.names.object)
    }

    /// `setEntityField(entity, value);`
    #[must_use]
    pub fn set_call(&self, field: &PlannedField, value: &str) -> String {
        format!(
            "{}({}, {value});",
            self.names.setter(&field.name),
            self.names.object
        )
    }
}

///
/// TESTS
///
