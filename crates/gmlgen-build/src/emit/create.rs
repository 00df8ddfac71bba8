use crate::{
    EntityBuilder,
    body::Body,
    header::FunctionHeader,
    snippet::{CodeSnippet, SnippetKind},
};

// generate
// createEntity(..) from positional arguments, one setter per field
#[must_use]
pub fn generate(builder: &EntityBuilder) -> CodeSnippet {
    let names = &builder.names;
    let obj = &names.object;

    let mut header = FunctionHeader::new(
        names.create(),
        format!("Constructor for {} entity.", names.class),
    );
    for field in builder.fields() {
        header = header.param(&field.name, &field.ty);
    }
    header = header.returns(&names.class, obj);

    let mut body = Body::new();
    for field in builder.fields() {
        body.line(format!("var {} = argument{};", field.name, field.index));
    }
    body.blank();
    body.line(format!("var {obj} = createEntity({});", names.class));
    body.blank();

    for field in builder.fields() {
        let value = if field.is_optional() {
            field.name.clone()
        } else {
            format!("assertNoOptional({})", field.name)
        };
        body.line(builder.set_call(field, &value));
    }
    if !builder.fields().is_empty() {
        body.blank();
    }
    body.line(format!("return {obj};"));

    CodeSnippet::single(SnippetKind::Create, builder.block(&header, body.finish()))
}

///
/// TESTS
///
