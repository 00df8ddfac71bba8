use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};
use std::{fmt, slice};

///
/// FieldDecl
/// One declared field: its name and the raw type expression.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: String,
}

impl FieldDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

///
/// FieldList
///
/// Fields in declaration order. The order is the storage layout of the
/// generated entity, so the JSON object is read key by key and never
/// through a hashed map.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldList {
    fields: Vec<FieldDecl>,
}

impl FieldList {
    #[must_use]
    pub const fn new(fields: Vec<FieldDecl>) -> Self {
        Self { fields }
    }

    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Zero-based declaration position of a field.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn iter(&self) -> slice::Iter<'_, FieldDecl> {
        self.fields.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FieldDecl;
    type IntoIter = slice::Iter<'a, FieldDecl>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<FieldDecl> for FieldList {
    fn from_iter<I: IntoIterator<Item = FieldDecl>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|f| (&f.name, &f.ty)))
    }
}

impl<'de> Deserialize<'de> for FieldList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldListVisitor)
    }
}

// FieldListVisitor
// duplicate keys are kept so validation can report them by name
struct FieldListVisitor;

impl<'de> Visitor<'de> for FieldListVisitor {
    type Value = FieldList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping field names to type expressions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, ty)) = access.next_entry::<String, String>()? {
            fields.push(FieldDecl { name, ty });
        }

        Ok(FieldList::new(fields))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_instead_of_sorting() {
        let list: FieldList =
            serde_json::from_str(r#"{"zeta":"int","alpha":"string","mid":"bool"}"#).unwrap();

        let names: Vec<_> = list.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(list.position("alpha"), Some(1));
    }

    #[test]
    fn keeps_duplicate_keys_for_validation() {
        let list: FieldList = serde_json::from_str(r#"{"hp":"int","hp":"real"}"#).unwrap();

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn serializes_back_in_declaration_order() {
        let list: FieldList = [FieldDecl::new("b", "int"), FieldDecl::new("a", "string")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"b":"int","a":"string"}"#);
    }
}
