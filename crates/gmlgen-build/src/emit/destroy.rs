use crate::{
    EntityBuilder,
    body::Body,
    header::FunctionHeader,
    naming::destroy_fn,
    runtime::Container,
    snippet::{CodeSnippet, SnippetKind},
};
use gmlgen_schema::plan::PlannedField;

// generate
//
// Three passes over the fields, all in declaration order:
// read every field that owns payload, tear that payload down, then clear
// every field through its setter.
#[must_use]
pub fn generate(builder: &EntityBuilder) -> CodeSnippet {
    let names = &builder.names;
    let obj = &names.object;

    let header = FunctionHeader::new(names.destroy(), format!("Destroy {} entity.", names.class))
        .param(obj, &names.class);

    let owning: Vec<&PlannedField> = builder
        .fields()
        .iter()
        .filter(|f| owns_payload(f))
        .collect();

    let mut body = Body::new();
    body.line(format!("var {obj} = argument0;"));
    body.blank();

    // -------------------------
    // Read
    // -------------------------

    for field in &owning {
        body.line(format!("var {} = {};", field.name, builder.get_call(field)));
    }
    if !owning.is_empty() {
        body.blank();
    }

    // -------------------------
    // Teardown
    // -------------------------

    for field in &owning {
        let cond = format!("isOptionalPresent({})", field.name);

        body.guarded(field.is_optional(), &cond, |b| {
            teardown(b, field, &names.class);
        });
        body.blank();
    }

    // -------------------------
    // Clear
    // -------------------------

    for field in builder.fields() {
        body.line(builder.set_call(field, "undefined"));
    }

    CodeSnippet::single(SnippetKind::Destroy, builder.block(&header, body.finish()))
}

// owns_payload
// entity references and runtime data structures need explicit teardown
fn owns_payload(field: &PlannedField) -> bool {
    field.is_entity() || field.container().owns_data_structure()
}

// teardown
fn teardown(body: &mut Body, field: &PlannedField, owner: &str) {
    let container = Container::of(field.container());

    if let Some(entity) = field.entity_ref() {
        let destroy = destroy_fn(entity);
        container.each_element(body, &field.name, |b, el| {
            b.line(format!("{destroy}({el});"));
        });
    }

    if let Some(release) = container.release_call(&field.name, owner) {
        body.line(release);
    }
}

///
/// TESTS
///
