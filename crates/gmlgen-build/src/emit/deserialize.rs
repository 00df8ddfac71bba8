use crate::{
    EntityBuilder,
    body::Body,
    header::FunctionHeader,
    naming::deserialize_fn,
    runtime::Container,
    snippet::{CodeSnippet, SnippetKind},
};
use gmlgen_schema::plan::PlannedField;

// generate
// Every field is read by label; an absent one only logs a warning and the
// final constructor call decides what is required.
#[must_use]
pub fn generate(builder: &EntityBuilder) -> CodeSnippet {
    let names = &builder.names;
    let fn_name = names.deserialize();

    let header = FunctionHeader::new(
        &fn_name,
        format!(
            "Deserialize {} from JSON String to {} entity.",
            names.class, names.class
        ),
    )
    .param("jsonString", "String")
    .returns(&names.class, &names.object);

    let mut body = Body::new();
    body.line("var jsonString = argument0;");
    body.blank();
    body.line("var jsonObject = decodeJson(jsonString);");
    body.blank();

    for field in builder.fields() {
        body.line(format!("var {} = {};", field.name, read_call(field)));
        body.open(format!("if (!isOptionalPresent({}))", field.name));
        body.line(missing_warning(&fn_name, field));
        body.close();
        body.blank();
    }

    let args: Vec<&str> = builder.fields().iter().map(|f| f.name.as_str()).collect();
    body.line(format!("return {}({});", names.create(), args.join(", ")));

    CodeSnippet::single(
        SnippetKind::Deserialize,
        builder.block(&header, body.finish()),
    )
}

// read_call
fn read_call(field: &PlannedField) -> String {
    let tag = Container::of(field.container()).tag_arg();

    match field.entity_ref() {
        Some(entity) => format!(
            "getJsonObjectEntityValue(jsonObject, \"{}\", {}{tag})",
            field.name,
            deserialize_fn(entity)
        ),
        None => format!("getJsonObjectFieldValue(jsonObject, \"{}\"{tag})", field.name),
    }
}

// missing_warning
fn missing_warning(fn_name: &str, field: &PlannedField) -> String {
    let what = if field.is_optional() {
        "Optional field"
    } else {
        "Required field"
    };

    format!(
        "logger(\"[{fn_name}] {what} \\\"{}\\\" is missing\", LogType.WARNING);",
        field.name
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{plan, stamp};
    use gmlgen_schema::node::EntitySchema;

    fn deserialize(entity: &EntitySchema) -> String {
        let plan = plan(entity);

        generate(&EntityBuilder::new(&plan, &stamp())).blocks[0]
            .text()
            .to_string()
    }

    #[test]
    fn reads_by_label_and_rebuilds_through_constructor() {
        let text = deserialize(
            &EntitySchema::new("Foo")
                .field("id", "int")
                .field("name", "string")
                .field("tags", "List<string>")
                .primitives(["int", "string"]),
        );

        assert!(text.starts_with("///@function deserializeFoo(jsonString)\n"));
        assert!(text.contains("///@return {Foo} foo\n"));
        assert!(text.contains("\tvar id = getJsonObjectFieldValue(jsonObject, \"id\");\n"));
        assert!(
            text.contains("\tvar tags = getJsonObjectFieldValue(jsonObject, \"tags\", List);\n")
        );
        assert!(text.ends_with("\treturn createFoo(id, name, tags);\n"));
    }

    #[test]
    fn entity_fields_pass_their_deserializer() {
        let text = deserialize(&EntitySchema::new("Mob").field("stash", "Map<string::Loot>"));

        assert!(text.contains(
            "\tvar stash = getJsonObjectEntityValue(jsonObject, \"stash\", deserializeLoot, Map);\n"
        ));
    }

    #[test]
    fn absent_fields_warn_and_never_assert() {
        let text = deserialize(
            &EntitySchema::new("Mob")
                .field("hp", "Optional<int>")
                .field("id", "int")
                .primitives(["int"]),
        );

        assert!(text.contains(
            "\tif (!isOptionalPresent(hp)) {\n\
             \t\tlogger(\"[deserializeMob] Optional field \\\"hp\\\" is missing\", LogType.WARNING);\n\
             \t}\n"
        ));
        assert!(text.contains("[deserializeMob] Required field \\\"id\\\" is missing"));
        assert!(!text.contains("assertNoOptional"));
        assert_eq!(text.matches("LogType.WARNING").count(), 2);
    }
}
