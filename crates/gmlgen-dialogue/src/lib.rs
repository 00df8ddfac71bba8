//! Normalizes dialogue designer exports into a directed node graph.
//!
//! Cycles are legal and left alone; the graph is a plain adjacency map.

pub mod designer;
pub mod graph;

pub use graph::{Dialogue, DialogueChoice, DialogueNode};

use crate::designer::{DesignerNode, DesignerText, Localized, START_NODE};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

/// Language used when the caller does not pick one.
pub const DEFAULT_LANG: &str = "en_EN";

///
/// DialogueError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum DialogueError {
    #[error("dialogue '{dialogue}' defines node '{node}' more than once")]
    DuplicateNode { dialogue: String, node: String },

    #[error("dialogue '{dialogue}' has no designer[0].nodes array")]
    MissingNodes { dialogue: String },

    #[error("dialogue '{dialogue}' has no START node")]
    MissingStart { dialogue: String },

    #[error("dialogue '{dialogue}' node #{index} ('{node}'): {reason}")]
    Parse {
        dialogue: String,
        index: usize,
        node: String,
        reason: String,
    },
}

/// Build the graph for one designer export.
///
/// `designer` is the whole exported document; its first element's `nodes`
/// array is read. The `START` node contributes only the entry point.
pub fn build_dialogue(name: &str, designer: &Value, lang: &str) -> Result<Dialogue, DialogueError> {
    let nodes = designer
        .get(0)
        .and_then(|d| d.get("nodes"))
        .and_then(Value::as_array)
        .ok_or_else(|| DialogueError::MissingNodes {
            dialogue: name.to_string(),
        })?;

    let mut start = None;
    let mut graph = BTreeMap::new();

    for (index, raw) in nodes.iter().enumerate() {
        let parse_error = |reason: String| DialogueError::Parse {
            dialogue: name.to_string(),
            index,
            node: raw
                .get("node_name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>")
                .to_string(),
            reason,
        };

        let node: DesignerNode =
            serde_json::from_value(raw.clone()).map_err(|e| parse_error(e.to_string()))?;

        if node.node_name == START_NODE {
            let next = node
                .next
                .ok_or_else(|| parse_error("START has no successor".to_string()))?;
            start = Some(next);
            continue;
        }

        let normalized = normalize(&node, lang).map_err(parse_error)?;
        if graph.insert(node.node_name.clone(), normalized).is_some() {
            return Err(DialogueError::DuplicateNode {
                dialogue: name.to_string(),
                node: node.node_name,
            });
        }
    }

    let start_node = start.ok_or_else(|| DialogueError::MissingStart {
        dialogue: name.to_string(),
    })?;
    log::info!("dialogue {name} parsed");

    Ok(Dialogue {
        name: name.to_string(),
        start_node,
        nodes: graph,
    })
}

// normalize
// branches win over text; a string text is an action, an object is a line
fn normalize(node: &DesignerNode, lang: &str) -> Result<DialogueNode, String> {
    if let Some((truthy, falsy)) = node.branches.as_ref().and_then(|b| b.targets()) {
        return Ok(DialogueNode::Branch {
            truthy: truthy.to_string(),
            falsy: falsy.map(ToString::to_string),
        });
    }

    let author = node.author().map(ToString::to_string);
    let next_node = node.next.clone();

    match &node.text {
        Some(DesignerText::Action(action)) => Ok(DialogueNode::Action {
            author,
            action: action.clone(),
            next_node,
        }),
        Some(DesignerText::Localized(texts)) => {
            let text = translation(texts, lang)?;
            let choices = node
                .choices
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, choice)| {
                    let text =
                        translation(&choice.text, lang).map_err(|e| format!("choice #{i}: {e}"))?;
                    let condition_data = if choice.is_condition {
                        choice.condition.clone()
                    } else {
                        None
                    };

                    Ok(DialogueChoice {
                        next_node: choice.next.clone(),
                        text,
                        condition_data,
                    })
                })
                .collect::<Result<Vec<_>, String>>()?;

            Ok(DialogueNode::Line {
                author,
                text,
                next_node,
                choices,
            })
        }
        None => Err("node has neither text nor branches".to_string()),
    }
}

fn translation(texts: &Localized, lang: &str) -> Result<String, String> {
    texts
        .get(lang)
        .cloned()
        .flatten()
        .ok_or_else(|| format!("missing '{lang}' text"))
}

///
/// TESTS
///
