//! Identifier helpers shared by every emitter.

// upper_first
#[must_use]
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

// lower_first
#[must_use]
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Routine names for one entity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityNames {
    pub class: String,
    pub object: String,
}

impl EntityNames {
    #[must_use]
    pub fn new(entity: &str) -> Self {
        Self {
            class: upper_first(entity),
            object: lower_first(entity),
        }
    }

    #[must_use]
    pub fn create(&self) -> String {
        create_fn(&self.class)
    }

    #[must_use]
    pub fn serialize(&self) -> String {
        serialize_fn(&self.class)
    }

    #[must_use]
    pub fn deserialize(&self) -> String {
        deserialize_fn(&self.class)
    }

    #[must_use]
    pub fn destroy(&self) -> String {
        destroy_fn(&self.class)
    }

    #[must_use]
    pub fn getter(&self, field: &str) -> String {
        format!("get{}{}", self.class, upper_first(field))
    }

    #[must_use]
    pub fn setter(&self, field: &str) -> String {
        format!("set{}{}", self.class, upper_first(field))
    }
}

#[must_use]
pub fn create_fn(entity: &str) -> String {
    format!("create{}", upper_first(entity))
}

#[must_use]
pub fn serialize_fn(entity: &str) -> String {
    format!("serialize{}", upper_first(entity))
}

#[must_use]
pub fn deserialize_fn(entity: &str) -> String {
    format!("deserialize{}", upper_first(entity))
}

#[must_use]
pub fn destroy_fn(entity: &str) -> String {
    format!("destroy{}", upper_first(entity))
}

///
/// TESTS
///
