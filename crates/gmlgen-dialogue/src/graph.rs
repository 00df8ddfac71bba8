use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Dialogue
/// A normalized dialogue graph, keyed by node name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub name: String,
    pub start_node: String,
    pub nodes: BTreeMap<String, DialogueNode>,
}

///
/// DialogueNode
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DialogueNode {
    Line {
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        text: String,
        next_node: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<DialogueChoice>,
    },

    Action {
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        action: String,
        next_node: Option<String>,
    },

    Branch {
        truthy: String,
        falsy: Option<String>,
    },
}

impl DialogueNode {
    /// Every node name this node can lead to.
    #[must_use]
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Self::Line {
                next_node, choices, ..
            } => next_node
                .iter()
                .map(String::as_str)
                .chain(choices.iter().filter_map(|c| c.next_node.as_deref()))
                .collect(),
            Self::Action { next_node, .. } => next_node.iter().map(String::as_str).collect(),
            Self::Branch { truthy, falsy } => {
                std::iter::once(truthy.as_str()).chain(falsy.as_deref()).collect()
            }
        }
    }
}

///
/// DialogueChoice
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueChoice {
    pub next_node: Option<String>,
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_data: Option<String>,
}
