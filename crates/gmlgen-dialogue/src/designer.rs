//! Shapes of the dialogue designer's export format.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Language code to text; only the selected language is ever read.
pub type Localized = BTreeMap<String, Option<String>>;

/// Name of the sentinel node that points at the first real node.
pub const START_NODE: &str = "START";

///
/// DesignerNode
///

#[derive(Clone, Debug, Deserialize)]
pub struct DesignerNode {
    pub node_name: String,

    #[serde(default)]
    pub character: Option<Vec<String>>,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub text: Option<DesignerText>,

    #[serde(default)]
    pub choices: Option<Vec<DesignerChoice>>,

    #[serde(default)]
    pub branches: Option<DesignerBranches>,
}

impl DesignerNode {
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.character.as_ref()?.first().map(String::as_str)
    }
}

///
/// DesignerText
/// A plain string is an action; an object maps language codes to lines.
/// Languages the designer left blank come through as `null`.
///

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum DesignerText {
    Action(String),
    Localized(Localized),
}

///
/// DesignerChoice
///

#[derive(Clone, Debug, Deserialize)]
pub struct DesignerChoice {
    #[serde(default)]
    pub next: Option<String>,

    pub text: Localized,

    #[serde(default)]
    pub is_condition: bool,

    #[serde(default)]
    pub condition: Option<String>,
}

///
/// DesignerBranches
///

#[derive(Clone, Debug, Deserialize)]
pub struct DesignerBranches {
    #[serde(rename = "True", default)]
    pub truthy: Option<serde_json::Value>,

    #[serde(rename = "False", default)]
    pub falsy: Option<serde_json::Value>,
}

impl DesignerBranches {
    /// Successors, when the `True` side names a node.
    #[must_use]
    pub fn targets(&self) -> Option<(&str, Option<&str>)> {
        let truthy = self.truthy.as_ref()?.as_str()?;
        let falsy = self.falsy.as_ref().and_then(serde_json::Value::as_str);

        Some((truthy, falsy))
    }
}
