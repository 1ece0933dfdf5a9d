//! AST builder.
//!
//! Converts a decoded document into a typed [`Forest`]. The first malformed
//! value anywhere in the tree aborts the build; there is no partial result.
//!
//! Accepted entry shape:
//! ```text
//! { "node_type": { "<KIND>": { ...payload } }, "children"?: [ Entry, ... ] }
//! ```
//! The `node_type` wrapper may be omitted, in which case the entry itself is
//! read as the node-type object. Unknown extra keys are ignored.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use super::{Action, ActionKind, AstNode, Forest};
use crate::error::BuildError;

/// Build every top-level entry of `root`, which must be an array.
pub fn build_forest(root: &Value) -> Result<Forest, BuildError> {
    let entries = root.as_array().ok_or_else(|| BuildError::NotASequence {
        raw: BuildError::raw(root),
    })?;

    let mut forest = Forest::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        trace!(target: "corel::builder", index, "Building top-level entry");
        forest.push(build_node(entry)?);
    }

    debug!(target: "corel::builder", roots = forest.len(), "Built forest");
    Ok(forest)
}

/// Build a single node from an entry (or from an already-unwrapped node-type object).
pub fn build_node(entry: &Value) -> Result<AstNode, BuildError> {
    let (type_value, attached) = match entry.get("node_type") {
        Some(inner) => (inner, entry.get("children")),
        None => (entry, None),
    };

    let action = build_action(type_value)?;
    let kind = action.kind();
    let node = AstNode::new(action);

    let Some(attached) = attached else {
        return Ok(node);
    };
    let items = attached.as_array().ok_or_else(|| BuildError::InvalidChildren {
        raw: BuildError::raw(attached),
    })?;
    if items.is_empty() {
        return Ok(node);
    }

    warn!(
        target: "corel::builder",
        %kind,
        count = items.len(),
        "Entry-level children found next to node_type; they run once after the node. \
         Use a LOOP body to group steps"
    );
    let children = items.iter().map(build_node).collect::<Result<Vec<_>, _>>()?;
    Ok(node.with_children(children))
}

fn build_action(type_value: &Value) -> Result<Action, BuildError> {
    let map = type_value
        .as_object()
        .ok_or_else(|| BuildError::UnknownNodeType {
            raw: BuildError::raw(type_value),
        })?;

    let present: Vec<ActionKind> = ActionKind::ALL
        .into_iter()
        .filter(|k| map.contains_key(k.key()))
        .collect();
    let kind = match present.as_slice() {
        [] => {
            return Err(BuildError::UnknownNodeType {
                raw: BuildError::raw(type_value),
            });
        }
        [kind] => *kind,
        many => {
            return Err(BuildError::AmbiguousNodeType {
                keys: many.iter().map(|k| k.key().to_string()).collect(),
                raw: BuildError::raw(type_value),
            });
        }
    };

    let payload_value = &map[kind.key()];
    let payload = payload_value
        .as_object()
        .ok_or_else(|| BuildError::PayloadNotAnObject {
            kind: kind.key(),
            raw: BuildError::raw(type_value),
        })?;
    let fields = Fields {
        kind,
        payload,
        raw: payload_value,
    };

    let action = match kind {
        ActionKind::Wait => Action::Wait {
            value: fields.integer("value")?,
            magnitude: fields.text("magnitude")?,
        },
        ActionKind::Move => Action::Move {
            value: fields.integer("value")?,
            direction: fields.text("direction")?,
        },
        ActionKind::Press => Action::Press {
            button: fields.text("value")?,
        },
        ActionKind::Click => Action::Click {
            button: fields.text("value")?,
        },
        ActionKind::Key => Action::Key {
            key: fields.text("value")?,
        },
        ActionKind::Loop => build_loop(&fields)?,
    };
    trace!(target: "corel::builder", %kind, "Built action");
    Ok(action)
}

fn build_loop(fields: &Fields<'_>) -> Result<Action, BuildError> {
    let value = fields.get("value")?;
    let repeat_count = match (value.as_u64(), value.as_i64()) {
        (Some(count), _) => count,
        (None, Some(count)) => {
            return Err(BuildError::NegativeRepeatCount {
                count,
                raw: BuildError::raw(fields.raw),
            });
        }
        (None, None) => return Err(fields.wrong_type("value", "a non-negative integer")),
    };

    let children = fields
        .payload
        .get("children")
        .and_then(Value::as_array)
        .ok_or_else(|| BuildError::MissingLoopChildren {
            raw: BuildError::raw(fields.raw),
        })?;

    let body = children
        .iter()
        .map(build_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Action::Loop { repeat_count, body })
}

/// Typed accessors over one action payload.
struct Fields<'a> {
    kind: ActionKind,
    payload: &'a Map<String, Value>,
    raw: &'a Value,
}

impl Fields<'_> {
    fn get(&self, field: &'static str) -> Result<&Value, BuildError> {
        self.payload
            .get(field)
            .ok_or_else(|| BuildError::MissingField {
                kind: self.kind.key(),
                field,
                raw: BuildError::raw(self.raw),
            })
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> BuildError {
        BuildError::WrongFieldType {
            kind: self.kind.key(),
            field,
            expected,
            raw: BuildError::raw(self.raw),
        }
    }

    fn integer(&self, field: &'static str) -> Result<i64, BuildError> {
        self.get(field)?
            .as_i64()
            .ok_or_else(|| self.wrong_type(field, "an integer"))
    }

    fn text(&self, field: &'static str) -> Result<String, BuildError> {
        self.get(field)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }
}
