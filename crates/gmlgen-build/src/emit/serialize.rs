use crate::{
    EntityBuilder,
    body::Body,
    header::FunctionHeader,
    naming::serialize_fn,
    runtime::Container,
    snippet::{CodeSnippet, SnippetKind},
};
use gmlgen_schema::plan::PlannedField;

// generate
#[must_use]
pub fn generate(builder: &EntityBuilder) -> CodeSnippet {
    let names = &builder.names;
    let obj = &names.object;
    let result = format!("{obj}JsonString");

    let header = FunctionHeader::new(
        names.serialize(),
        format!("Serialize {} to JSON string.", names.class),
    )
    .param(obj, &names.class)
    .returns("String", &result);

    let mut body = Body::new();
    body.line(format!("var {obj} = argument0;"));
    body.blank();
    body.line("var jsonObject = createJsonObject();");
    body.blank();

    for field in builder.fields() {
        let value = builder.get_call(field);
        let cond = format!("isOptionalPresent({value})");

        body.guarded(field.is_optional(), &cond, |b| {
            b.line(append_call(field, &value));
        });
    }

    body.blank();
    body.line(format!("var {result} = encodeJson(jsonObject);"));
    body.blank();
    body.line(format!("return {result};"));

    CodeSnippet::single(SnippetKind::Serialize, builder.block(&header, body.finish()))
}

// append_call
// entity-family values go through the referenced entity's own serializer
fn append_call(field: &PlannedField, value: &str) -> String {
    let tag = Container::of(field.container()).tag_arg();

    match field.entity_ref() {
        Some(entity) => format!(
            "appendEntityToJsonObject(jsonObject, \"{}\", {value}, {}{tag});",
            field.name,
            serialize_fn(entity)
        ),
        None => format!(
            "appendFieldToJsonObject(jsonObject, \"{}\", {value}{tag});",
            field.name
        ),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{plan, stamp};
    use gmlgen_schema::node::EntitySchema;

    fn serialize(entity: &EntitySchema) -> String {
        let plan = plan(entity);

        generate(&EntityBuilder::new(&plan, &stamp())).blocks[0]
            .text()
            .to_string()
    }

    #[test]
    fn primitives_append_raw_values_with_container_tag() {
        let text = serialize(
            &EntitySchema::new("Foo")
                .field("id", "int")
                .field("tags", "List<string>")
                .primitives(["int", "string"]),
        );

        assert!(text.starts_with("///@function serializeFoo(foo)\n"));
        assert!(text.contains("///@return {String} fooJsonString\n"));
        assert!(text.contains("\tappendFieldToJsonObject(jsonObject, \"id\", getFooId(foo));\n"));
        assert!(text.contains(
            "\tappendFieldToJsonObject(jsonObject, \"tags\", getFooTags(foo), List);\n"
        ));
        assert!(text.contains("\tvar fooJsonString = encodeJson(jsonObject);\n"));
    }

    #[test]
    fn entities_pass_their_serializer() {
        let text = serialize(
            &EntitySchema::new("Mob")
                .field("boss", "Mob")
                .field("drops", "Loot[]")
                .field("queue", "PriorityQueue<Loot>"),
        );

        assert!(text.contains(
            "\tappendEntityToJsonObject(jsonObject, \"boss\", getMobBoss(mob), serializeMob);\n"
        ));
        assert!(text.contains("getMobDrops(mob), serializeLoot, Array);\n"));
        assert!(text.contains("getMobQueue(mob), serializeLoot, PriorityQueue);\n"));
    }

    #[test]
    fn optional_fields_are_guarded() {
        let text = serialize(
            &EntitySchema::new("Mob")
                .field("hp", "Optional<int>")
                .primitives(["int"]),
        );

        assert!(text.contains(
            "\tif (isOptionalPresent(getMobHp(mob))) {\n\
             \t\tappendFieldToJsonObject(jsonObject, \"hp\", getMobHp(mob));\n\
             \t}\n"
        ));
    }
}
