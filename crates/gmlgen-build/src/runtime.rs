//! How each container kind looks in the target runtime.
//!
//! Every emitter consults this table instead of switching on the sixteen
//! field categories itself.

use crate::body::Body;
use gmlgen_schema::types::ContainerKind;

/// Variable holding the current element inside a teardown loop.
pub const ELEMENT_VAR: &str = "entity";

///
/// Container
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Container {
    pub kind: ContainerKind,

    /// Tag passed to the runtime's JSON helpers; absent for scalars.
    pub tag: Option<&'static str>,

    /// Whether the value is a runtime data structure that must be released.
    pub releases: bool,
}

impl Container {
    #[must_use]
    pub const fn of(kind: ContainerKind) -> Self {
        let tag = match kind {
            ContainerKind::Scalar => None,
            ContainerKind::Array => Some("Array"),
            ContainerKind::List => Some("List"),
            ContainerKind::Map => Some("Map"),
            ContainerKind::Stack => Some("Stack"),
            ContainerKind::Grid => Some("Grid"),
            ContainerKind::Queue => Some("Queue"),
            ContainerKind::PriorityQueue => Some("PriorityQueue"),
        };

        Self {
            kind,
            tag,
            releases: kind.owns_data_structure(),
        }
    }

    /// Trailing helper argument carrying the container tag, or nothing.
    #[must_use]
    pub fn tag_arg(&self) -> String {
        self.tag.map(|t| format!(", {t}")).unwrap_or_default()
    }

    /// The call that releases `var`, if this kind owns a data structure.
    #[must_use]
    pub fn release_call(&self, var: &str, owner: &str) -> Option<String> {
        let tag = self.tag.filter(|_| self.releases)?;

        Some(format!(
            "destroyDataStructure({var}, {tag}, \"Unable to destroy {tag} {var} in {owner}\");"
        ))
    }

    /// Visit every element stored in `var`, once each.
    ///
    /// Scalars visit the value itself. Stacks and queues are drained, so the
    /// loop ends once the structure is empty.
    pub fn each_element(&self, body: &mut Body, var: &str, visit: impl FnOnce(&mut Body, &str)) {
        let el = ELEMENT_VAR;

        match self.kind {
            ContainerKind::Scalar => visit(body, var),
            ContainerKind::Array => {
                body.open(format!(
                    "for (var index = 0; index < array_length({var}); index++)"
                ));
                body.line(format!("var {el} = {var}[@ index];"));
                visit(body, el);
                body.close();
            }
            ContainerKind::List => {
                body.open(format!(
                    "for (var index = 0; index < ds_list_size({var}); index++)"
                ));
                body.line(format!("var {el} = {var}[| index];"));
                visit(body, el);
                body.close();
            }
            ContainerKind::Map => {
                body.open(format!(
                    "for (var key = ds_map_find_first({var}); !is_undefined(key); key = ds_map_find_next({var}, key))"
                ));
                body.line(format!("var {el} = {var}[? key];"));
                visit(body, el);
                body.close();
            }
            ContainerKind::Stack => {
                body.open(format!("while (ds_stack_size({var}) > 0)"));
                body.line(format!("var {el} = ds_stack_pop({var});"));
                visit(body, el);
                body.close();
            }
            ContainerKind::Grid => {
                body.open(format!(
                    "for (var yIndex = 0; yIndex < ds_grid_height({var}); yIndex++)"
                ));
                body.open(format!(
                    "for (var xIndex = 0; xIndex < ds_grid_width({var}); xIndex++)"
                ));
                body.line(format!("var {el} = {var}[# xIndex, yIndex];"));
                visit(body, el);
                body.close();
                body.close();
            }
            ContainerKind::Queue => {
                body.open(format!("while (ds_queue_size({var}) > 0)"));
                body.line(format!("var {el} = ds_queue_dequeue({var});"));
                visit(body, el);
                body.close();
            }
            ContainerKind::PriorityQueue => {
                body.open(format!("while (ds_priority_size({var}) > 0)"));
                body.line(format!("var {el} = ds_priority_delete_min({var});"));
                visit(body, el);
                body.close();
            }
        }
    }
}

///
/// TESTS
///
