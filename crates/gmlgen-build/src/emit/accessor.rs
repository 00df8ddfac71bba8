use crate::{
    EntityBuilder,
    body::Body,
    header::FunctionHeader,
    snippet::{CodeBlock, CodeSnippet, SnippetKind},
};
use gmlgen_schema::plan::PlannedField;

/// One getter per field, reading the field's storage slot.
#[must_use]
pub fn getters(builder: &EntityBuilder) -> CodeSnippet {
    let blocks = builder.fields().iter().map(|f| getter(builder, f)).collect();

    CodeSnippet::new(SnippetKind::Getters, blocks)
}

/// One setter per field, writing the field's storage slot.
#[must_use]
pub fn setters(builder: &EntityBuilder) -> CodeSnippet {
    let blocks = builder.fields().iter().map(|f| setter(builder, f)).collect();

    CodeSnippet::new(SnippetKind::Setters, blocks)
}

fn getter(builder: &EntityBuilder, field: &PlannedField) -> CodeBlock {
    let names = &builder.names;
    let header = FunctionHeader::new(names.getter(&field.name), "Getter.")
        .param(&names.object, &names.class)
        .returns(&field.ty, &field.name);

    let mut body = Body::new();
    body.line(format!("return argument0[@ {}];", field.index));

    builder.block(&header, body.finish())
}

fn setter(builder: &EntityBuilder, field: &PlannedField) -> CodeBlock {
    let names = &builder.names;
    let header = FunctionHeader::new(names.setter(&field.name), "Setter.")
        .param(&names.object, &names.class)
        .param(&field.name, &field.ty);

    let mut body = Body::new();
    body.line(format!("argument0[@ {}] = argument1;", field.index));

    builder.block(&header, body.finish())
}

///
/// TESTS
///
