use crate::{MAX_ENTITY_NAME_LEN, MAX_FIELD_NAME_LEN};

/// Words the target runtime reserves; a field or entity may not use them as
/// its bare name.
const RESERVED: &[&str] = &[
    "all", "and", "argument", "argument_count", "begin", "break", "case", "catch", "constructor",
    "continue", "default", "delete", "div", "do", "else", "end", "enum", "exit", "false",
    "finally", "for", "function", "global", "if", "mod", "new", "noone", "not", "or", "other",
    "repeat", "return", "self", "static", "switch", "then", "throw", "true", "try", "undefined",
    "until", "var", "while", "with", "xor",
];

/// Locals every generated routine may declare.
const ROUTINE_LOCALS: &[&str] = &[
    "entity", "index", "jsonObject", "jsonString", "key", "xIndex", "yIndex",
];

/// Ensure an entity name is a usable identifier.
pub(crate) fn validate_entity_name(name: &str) -> Result<(), String> {
    validate_ident("entity name", name, MAX_ENTITY_NAME_LEN)
}

/// Ensure a field name is a usable identifier.
pub(crate) fn validate_field_name(name: &str) -> Result<(), String> {
    validate_ident("field name", name, MAX_FIELD_NAME_LEN)
}

/// Ensure a field does not shadow a local of the entity's generated routines.
pub(crate) fn validate_field_local(entity: &str, field: &str) -> Result<(), String> {
    let mut chars = entity.chars();
    let object = chars
        .next()
        .map(|c| c.to_ascii_lowercase().to_string() + chars.as_str())
        .unwrap_or_default();

    if ROUTINE_LOCALS.contains(&field) || field == object || field == format!("{object}JsonString")
    {
        return Err(format!(
            "field name '{field}' collides with a generated local variable"
        ));
    }

    Ok(())
}

// validate_ident
fn validate_ident(what: &str, ident: &str, max_len: usize) -> Result<(), String> {
    if ident.is_empty() {
        return Err(format!("{what} is empty"));
    }
    if ident.len() > max_len {
        return Err(format!("{what} '{ident}' exceeds max length {max_len}"));
    }

    let mut chars = ident.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("{what} '{ident}' is not a valid identifier"));
    }

    if RESERVED.contains(&ident) || is_argument_slot(ident) {
        return Err(format!("{what} '{ident}' is a reserved word"));
    }

    Ok(())
}

// is_argument_slot
// argument0, argument1, ...
fn is_argument_slot(ident: &str) -> bool {
    ident
        .strip_prefix("argument")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

///
/// TESTS
///
