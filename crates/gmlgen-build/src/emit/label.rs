use crate::{
    EntityBuilder,
    naming::lower_first,
    snippet::{CodeBlock, CodeSnippet, SnippetKind},
};
use gmlgen_schema::plan::EntityPlan;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

///
/// LabelMap
///
/// `"<entity>.<field>" -> "<field>"` for every field, in declaration order.
/// Several maps can be folded into one with [`LabelMap::merged`].
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelMap {
    entries: Vec<(String, String)>,
}

impl LabelMap {
    #[must_use]
    pub fn from_plan(plan: &EntityPlan) -> Self {
        let prefix = lower_first(&plan.name);
        let entries = plan
            .fields
            .iter()
            .map(|f| (format!("{prefix}.{}", f.name), f.name.clone()))
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn merged<'a>(maps: impl IntoIterator<Item = &'a Self>) -> Self {
        let entries = maps
            .into_iter()
            .flat_map(|m| m.entries.iter().cloned())
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tab-indented JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;

        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

// generate
#[must_use]
pub fn generate(builder: &EntityBuilder) -> CodeSnippet {
    let text = LabelMap::from_plan(builder.plan)
        .to_json()
        .unwrap_or_default();

    CodeSnippet::single(SnippetKind::Labels, CodeBlock::unrouted(text))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{plan, stamp};
    use gmlgen_schema::node::EntitySchema;

    fn stat() -> EntityPlan {
        plan(
            &EntitySchema::new("MobStat")
                .field("zeta", "int")
                .field("alpha", "int")
                .primitives(["int"]),
        )
    }

    #[test]
    fn labels_keep_declaration_order_and_tabs() {
        let json = LabelMap::from_plan(&stat()).to_json().unwrap();

        assert_eq!(
            json,
            "{\n\t\"mobStat.zeta\": \"zeta\",\n\t\"mobStat.alpha\": \"alpha\"\n}"
        );
    }

    #[test]
    fn label_block_is_not_routed() {
        let plan = stat();
        let ts = stamp();
        let snippet = generate(&EntityBuilder::new(&plan, &ts));

        assert_eq!(snippet.kind, SnippetKind::Labels);
        assert_eq!(snippet.blocks[0].target(), None);
        assert_eq!(snippet.routed().count(), 0);
    }

    #[test]
    fn merged_maps_concatenate_in_order() {
        let a = LabelMap::from_plan(&stat());
        let b = LabelMap::from_plan(&plan(&EntitySchema::new("Loot").field("value", "int")));
        let merged = LabelMap::merged([&a, &b]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("loot.value"), Some("value"));
        assert_eq!(merged.get("mobStat.alpha"), Some("alpha"));
    }
}
