//! ## Crate layout
//! - `schema`: entity model, type classification and generation plans.
//! - `build`: the six script emitters and their shared header/runtime tables.
//! - `dialogue`: designer dialogue graph normalization.
//! - `write`: routes generated blocks into existing GameMaker script assets.
//! - `generate`: the end-to-end pipeline and its run summary.

pub use gmlgen_build as build;
pub use gmlgen_dialogue as dialogue;
pub use gmlgen_schema as schema;

pub mod error;
pub mod generate;
pub mod write;

pub use error::{Error, ErrorKind};
pub use generate::{EntityFailure, GenerateRequest, Summary, run};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind, GenerateRequest, Summary,
        build::{CodeBlock, CodeSnippet, LabelMap, SnippetKind, Timestamp},
        run,
        schema::types::UnknownTypePolicy,
        write::{OVERRIDE_MARKER, OutputWriter},
    };
}
