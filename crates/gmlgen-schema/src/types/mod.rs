mod classify;
mod expr;

pub use classify::*;
pub use expr::*;

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ContainerKind
///
/// The storage shape of a field. `Scalar` and `Array` are plain values in the
/// target runtime; every other kind is a runtime data structure the entity
/// owns and must release.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ContainerKind {
    Scalar,
    Array,
    List,
    Map,
    Stack,
    Grid,
    Queue,
    PriorityQueue,
}

impl ContainerKind {
    pub const ALL: [Self; 8] = [
        Self::Scalar,
        Self::Array,
        Self::List,
        Self::Map,
        Self::Stack,
        Self::Grid,
        Self::Queue,
        Self::PriorityQueue,
    ];

    /// The container named by a generic head such as `List<..>`.
    #[must_use]
    pub fn from_generic_head(head: &str) -> Option<Self> {
        match head {
            "List" => Some(Self::List),
            "Map" => Some(Self::Map),
            "Stack" => Some(Self::Stack),
            "Grid" => Some(Self::Grid),
            "Queue" => Some(Self::Queue),
            "PriorityQueue" => Some(Self::PriorityQueue),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar)
    }

    /// True for kinds backed by a runtime data structure.
    #[must_use]
    pub const fn owns_data_structure(self) -> bool {
        !matches!(self, Self::Scalar | Self::Array)
    }

    /// Number of type arguments the generic form takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::Map => 2,
            _ => 1,
        }
    }
}

///
/// ValueKind
/// Whether a field's element is a plain value or a reference to another entity.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ValueKind {
    Primitive,
    Entity,
}

///
/// FieldCategory
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[display("{value}-{container}")]
pub struct FieldCategory {
    pub value: ValueKind,
    pub container: ContainerKind,
}

impl FieldCategory {
    #[must_use]
    pub const fn new(value: ValueKind, container: ContainerKind) -> Self {
        Self { value, container }
    }

    #[must_use]
    pub const fn primitive(container: ContainerKind) -> Self {
        Self::new(ValueKind::Primitive, container)
    }

    #[must_use]
    pub const fn entity(container: ContainerKind) -> Self {
        Self::new(ValueKind::Entity, container)
    }

    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(self.value, ValueKind::Entity)
    }

    /// Every category the classifier can produce.
    #[must_use]
    pub fn all() -> Vec<Self> {
        [ValueKind::Primitive, ValueKind::Entity]
            .into_iter()
            .flat_map(|value| ContainerKind::ALL.map(|c| Self::new(value, c)))
            .collect()
    }
}

///
/// TESTS
///
