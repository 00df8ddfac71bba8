use crate::snippet::FUNCTION_MARKER;
use derive_more::Display;
use std::fmt::Write as _;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// Timestamp
///
/// The `@generated` stamp embedded in every header. Injected by the caller so
/// that generation stays reproducible under test.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current UTC time in RFC 3339 form.
    #[must_use]
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        let stamp = now
            .format(&Rfc3339)
            .unwrap_or_else(|_| now.unix_timestamp().to_string());

        Self(stamp)
    }

    #[must_use]
    pub fn fixed(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// FunctionHeader
///
/// Documentation comment that opens every routable block:
///
/// ```text
/// ///@function name(a, b)
/// ///@description ...
/// ///@param {Type} a
/// ///@return {Type} name
/// ///@throws {Exception}
/// ///@generated {timestamp}
/// ```
///

#[derive(Clone, Debug)]
pub struct FunctionHeader {
    name: String,
    description: String,
    params: Vec<(String, String)>,
    returns: Option<(String, String)>,
}

impl FunctionHeader {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            returns: None,
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push((name.into(), ty.into()));
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.returns = Some((ty.into(), name.into()));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn render(&self, timestamp: &Timestamp) -> String {
        let names: Vec<&str> = self.params.iter().map(|(n, _)| n.as_str()).collect();

        let mut out = String::new();
        let _ = writeln!(out, "{FUNCTION_MARKER} {}({})", self.name, names.join(", "));
        let _ = writeln!(out, "///@description {}", self.description);
        for (name, ty) in &self.params {
            let _ = writeln!(out, "///@param {{{}}} {name}", ty.replace(", ", "::"));
        }
        if let Some((ty, name)) = &self.returns {
            let _ = writeln!(out, "///@return {{{}}} {name}", ty.replace(", ", "::"));
        }
        out.push_str("///@throws {Exception}\n");
        let _ = writeln!(out, "///@generated {{{timestamp}}}");
        out.push('\n');

        out
    }
}

///
/// TESTS
///
