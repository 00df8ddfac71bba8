use crate::{
    node::EntitySchema,
    types::{ContainerKind, FieldCategory, ParseError, TypeExpr, ValueKind},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// UnknownTypePolicy
///
/// What to do with an element type that is neither a primitive nor an enum.
/// `Permissive` treats it as an entity reference whatever it is called;
/// `Reject` additionally requires it to be an entity of the loaded model.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypePolicy {
    #[default]
    #[display("permissive")]
    Permissive,

    #[display("reject")]
    Reject,
}

///
/// TypeContext
/// Name sets a type expression is resolved against.
///

#[derive(Clone, Debug)]
pub struct TypeContext<'a> {
    primitives: &'a BTreeSet<String>,
    enums: &'a BTreeSet<String>,
    entities: BTreeSet<&'a str>,
    policy: UnknownTypePolicy,
}

impl<'a> TypeContext<'a> {
    #[must_use]
    pub const fn new(primitives: &'a BTreeSet<String>, enums: &'a BTreeSet<String>) -> Self {
        Self {
            primitives,
            enums,
            entities: BTreeSet::new(),
            policy: UnknownTypePolicy::Permissive,
        }
    }

    /// Context built from an entity's own primitive and enum sets.
    #[must_use]
    pub const fn for_entity(entity: &'a EntitySchema) -> Self {
        Self::new(&entity.primitives, &entity.enums)
    }

    #[must_use]
    pub fn with_entities(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.entities.extend(names);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnknownTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> UnknownTypePolicy {
        self.policy
    }

    // value_kind
    // primitive/enum membership decides the family
    fn value_kind(&self, name: &str) -> Result<ValueKind, TypeError> {
        if self.primitives.contains(name) || self.enums.contains(name) {
            return Ok(ValueKind::Primitive);
        }

        match self.policy {
            UnknownTypePolicy::Permissive => Ok(ValueKind::Entity),
            UnknownTypePolicy::Reject if self.entities.contains(name) => Ok(ValueKind::Entity),
            UnknownTypePolicy::Reject => Err(TypeError::UnknownType {
                name: name.to_string(),
            }),
        }
    }
}

///
/// Classified
///
/// Result of classifying one field type. `element` is the contained type
/// name (the referenced entity for Entity-family fields, the value type of a
/// map), `key` is the map key type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classified {
    pub category: FieldCategory,
    pub optional: bool,
    pub element: String,
    pub key: Option<String>,
}

impl Classified {
    #[must_use]
    pub const fn container(&self) -> ContainerKind {
        self.category.container
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.category.is_entity()
    }
}

///
/// TypeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum TypeError {
    #[error("'Optional' may only wrap the whole field type, found '{expr}'")]
    MisplacedOptional { expr: String },

    #[error("containers nested inside containers are not supported, found '{expr}'")]
    NestedContainer { expr: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown type '{name}' is neither a primitive, an enum nor a model entity")]
    UnknownType { name: String },
}

/// Parse and classify a field type string.
pub fn classify(src: &str, ctx: &TypeContext<'_>) -> Result<Classified, TypeError> {
    let expr = TypeExpr::parse(src)?;

    classify_expr(&expr, ctx)
}

/// Classify an already-parsed type expression.
pub fn classify_expr(expr: &TypeExpr, ctx: &TypeContext<'_>) -> Result<Classified, TypeError> {
    let (inner, optional) = match expr {
        TypeExpr::Optional(inner) => (inner.as_ref(), true),
        other => (other, false),
    };

    let (container, key, element) = match inner {
        TypeExpr::Named(name) => (ContainerKind::Scalar, None, name.as_str()),
        TypeExpr::Array(elem) => (ContainerKind::Array, None, element_name(elem, expr)?),
        TypeExpr::Container { kind, args } => match args.as_slice() {
            [key, value] if *kind == ContainerKind::Map => (
                ContainerKind::Map,
                Some(element_name(key, expr)?),
                element_name(value, expr)?,
            ),
            [elem] if *kind != ContainerKind::Map => (*kind, None, element_name(elem, expr)?),
            _ => {
                return Err(ParseError::Arity {
                    head: kind.to_string(),
                    expected: kind.arity(),
                    found: args.len(),
                }
                .into());
            }
        },
        TypeExpr::Optional(_) => {
            return Err(TypeError::MisplacedOptional {
                expr: expr.to_string(),
            });
        }
    };

    if let Some(key) = key {
        ctx.value_kind(key)?;
    }
    let value = ctx.value_kind(element)?;

    Ok(Classified {
        category: FieldCategory::new(value, container),
        optional,
        element: element.to_string(),
        key: key.map(ToString::to_string),
    })
}

// element_name
// container arguments must be plain names
fn element_name<'e>(elem: &'e TypeExpr, whole: &TypeExpr) -> Result<&'e str, TypeError> {
    match elem {
        TypeExpr::Named(name) => Ok(name),
        TypeExpr::Optional(_) => Err(TypeError::MisplacedOptional {
            expr: whole.to_string(),
        }),
        TypeExpr::Array(_) | TypeExpr::Container { .. } => Err(TypeError::NestedContainer {
            expr: whole.to_string(),
        }),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn check(src: &str) -> Classified {
        let primitives = names(&["int", "real", "string", "bool"]);
        let enums = names(&["MobType"]);

        classify(src, &TypeContext::new(&primitives, &enums)).unwrap()
    }

    #[test]
    fn classifies_scalars() {
        let id = check("int");
        assert_eq!(id.category, FieldCategory::primitive(ContainerKind::Scalar));
        assert!(!id.optional);

        let kind = check("MobType");
        assert_eq!(kind.category, FieldCategory::primitive(ContainerKind::Scalar));

        let loot = check("Loot");
        assert_eq!(loot.category, FieldCategory::entity(ContainerKind::Scalar));
        assert_eq!(loot.element, "Loot");
    }

    #[test]
    fn classifies_every_container_for_both_families() {
        let cases = [
            ("int[]", "Loot[]", ContainerKind::Array),
            ("List<int>", "List<Loot>", ContainerKind::List),
            ("Map<string::int>", "Map<string::Loot>", ContainerKind::Map),
            ("Stack<int>", "Stack<Loot>", ContainerKind::Stack),
            ("Grid<int>", "Grid<Loot>", ContainerKind::Grid),
            ("Queue<int>", "Queue<Loot>", ContainerKind::Queue),
            (
                "PriorityQueue<int>",
                "PriorityQueue<Loot>",
                ContainerKind::PriorityQueue,
            ),
        ];

        for (prim, ent, kind) in cases {
            assert_eq!(check(prim).category, FieldCategory::primitive(kind), "{prim}");
            assert_eq!(check(ent).category, FieldCategory::entity(kind), "{ent}");
            assert_eq!(check(ent).element, "Loot");
        }
    }

    #[test]
    fn priority_queue_is_not_mistaken_for_queue() {
        assert_eq!(
            check("PriorityQueue<Loot>").container(),
            ContainerKind::PriorityQueue
        );
        assert_eq!(check("Queue<Loot>").container(), ContainerKind::Queue);
    }

    #[test]
    fn map_value_type_decides_the_family() {
        let by_value = check("Map<Loot::int>");
        assert_eq!(by_value.category, FieldCategory::primitive(ContainerKind::Map));
        assert_eq!(by_value.key.as_deref(), Some("Loot"));

        let entity_values = check("Map<string, Loot>");
        assert_eq!(entity_values.category, FieldCategory::entity(ContainerKind::Map));
        assert_eq!(entity_values.key.as_deref(), Some("string"));
    }

    #[test]
    fn optional_is_stripped_and_remembered() {
        let tags = check("Optional<List<string>>");

        assert!(tags.optional);
        assert_eq!(tags.category, FieldCategory::primitive(ContainerKind::List));

        let loot = check("Optional<Loot>");
        assert!(loot.optional);
        assert_eq!(loot.category, FieldCategory::entity(ContainerKind::Scalar));
    }

    #[test]
    fn nested_containers_are_rejected() {
        let primitives = names(&["int"]);
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums);

        for src in ["List<List<int>>", "Map<string::int[]>", "Grid<int>[]"] {
            assert!(
                matches!(classify(src, &ctx), Err(TypeError::NestedContainer { .. })),
                "{src}"
            );
        }
    }

    #[test]
    fn optional_inside_a_container_is_rejected() {
        let primitives = names(&["int"]);
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums);

        assert!(matches!(
            classify("List<Optional<int>>", &ctx),
            Err(TypeError::MisplacedOptional { .. })
        ));
        assert!(matches!(
            classify("Optional<Optional<int>>", &ctx),
            Err(TypeError::MisplacedOptional { .. })
        ));
    }

    #[test]
    fn permissive_policy_treats_unknown_names_as_entities() {
        let primitives = names(&["int"]);
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums);

        let typo = classify("itn", &ctx).unwrap();
        assert_eq!(typo.category, FieldCategory::entity(ContainerKind::Scalar));
    }

    #[test]
    fn reject_policy_requires_a_known_entity() {
        let primitives = names(&["int"]);
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums)
            .with_entities(["Loot"])
            .with_policy(UnknownTypePolicy::Reject);

        assert!(classify("List<Loot>", &ctx).is_ok());
        assert!(classify("int", &ctx).is_ok());
        assert_eq!(
            classify("itn", &ctx),
            Err(TypeError::UnknownType {
                name: "itn".to_string()
            })
        );
    }

    #[test]
    fn reject_policy_checks_map_keys() {
        let primitives = names(&["int", "string"]);
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums)
            .with_entities(["Loot"])
            .with_policy(UnknownTypePolicy::Reject);

        assert!(classify("Map<string::Loot>", &ctx).is_ok());
        assert_eq!(
            classify("Map<Ky::int>", &ctx),
            Err(TypeError::UnknownType {
                name: "Ky".to_string()
            })
        );
    }

    #[test]
    fn parse_failures_surface_as_type_errors() {
        let primitives = BTreeSet::new();
        let enums = BTreeSet::new();
        let ctx = TypeContext::new(&primitives, &enums);

        assert!(matches!(
            classify("", &ctx),
            Err(TypeError::Parse(ParseError::Empty))
        ));
    }

    fn arb_element() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("int".to_string()),
            Just("string".to_string()),
            Just("MobType".to_string()),
            "[A-Z][a-zA-Z0-9]{0,8}",
        ]
    }

    fn arb_shape() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("{}"),
            Just("{}[]"),
            Just("List<{}>"),
            Just("Map<string::{}>"),
            Just("Stack<{}>"),
            Just("Grid<{}>"),
            Just("Queue<{}>"),
            Just("PriorityQueue<{}>"),
        ]
    }

    proptest! {
        #[test]
        fn optional_wrapper_only_changes_the_flag(elem in arb_element(), shape in arb_shape()) {
            let src = shape.replace("{}", &elem);
            let required = check(&src);
            let optional = check(&format!("Optional<{src}>"));

            prop_assert!(!required.optional);
            prop_assert!(optional.optional);
            prop_assert_eq!(required.category, optional.category);
            prop_assert_eq!(required.element, optional.element);
        }

        #[test]
        fn classification_is_deterministic(elem in arb_element(), shape in arb_shape()) {
            let src = shape.replace("{}", &elem);

            prop_assert_eq!(check(&src), check(&src));
        }
    }
}
