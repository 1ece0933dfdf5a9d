/*!
Typed Corel program tree.

A program is a [`Forest`]: an ordered list of independent top-level [`AstNode`]s.
Each node wraps exactly one [`Action`] and owns its children outright; nothing
is shared and nothing is mutated after the builder returns.

Submodules:
- `builder`: turns a decoded `serde_json::Value` into a `Forest`, validating shape.
- `printer`: indented, pre-order text rendering used for diagnostics.
*/

use std::fmt;

use crate::config::models::{Entry, LabelPayload, LoopPayload, MovePayload, NodeTypeValue, WaitPayload};

pub mod builder;
pub mod printer;

pub use builder::{build_forest, build_node};
pub use printer::{render, render_forest};

/// Top-level statements of a program, in execution order.
pub type Forest = Vec<AstNode>;

/// Discriminant of [`Action`], named after the document key that selects it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Wait,
    Move,
    Press,
    Click,
    Key,
    Loop,
}

impl ActionKind {
    /// Every kind, in the order the builder probes for them.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Wait,
        ActionKind::Move,
        ActionKind::Press,
        ActionKind::Click,
        ActionKind::Key,
        ActionKind::Loop,
    ];

    /// Document key for this kind (`"WAIT"`, `"LOOP"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            ActionKind::Wait => "WAIT",
            ActionKind::Move => "MOVE",
            ActionKind::Press => "PRESS",
            ActionKind::Click => "CLICK",
            ActionKind::Key => "KEY",
            ActionKind::Loop => "LOOP",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One primitive action or a bounded repetition.
///
/// Textual fields are opaque labels here. Whether `"left"` is a real button is
/// for the effector to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Wait `value` units of `magnitude` (e.g. `"s"`, `"ms"`).
    Wait { value: i64, magnitude: String },

    /// Move the pointer `value` units along `direction`.
    Move { value: i64, direction: String },

    /// Hold a button.
    Press { button: String },

    /// Tap a button.
    Click { button: String },

    /// Send a keyboard key.
    Key { key: String },

    /// Run `body` in order, `repeat_count` times.
    Loop {
        repeat_count: u64,
        body: Vec<AstNode>,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Wait { .. } => ActionKind::Wait,
            Action::Move { .. } => ActionKind::Move,
            Action::Press { .. } => ActionKind::Press,
            Action::Click { .. } => ActionKind::Click,
            Action::Key { .. } => ActionKind::Key,
            Action::Loop { .. } => ActionKind::Loop,
        }
    }
}

/// A node of the program tree.
///
/// `children` holds nodes attached at the entry level of the document (next to
/// `node_type`). A loop's body is not stored here but inside [`Action::Loop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    action: Action,
    children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            children: Vec::new(),
        }
    }

    /// Attach entry-level children, replacing any already present.
    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    /// Number of effector calls a fully successful run of this node makes,
    /// loop-begin markers included. Saturates instead of overflowing.
    pub fn expected_reports(&self) -> u64 {
        let own = match &self.action {
            Action::Loop { repeat_count, body } => {
                let per_pass = body
                    .iter()
                    .fold(0u64, |acc, n| acc.saturating_add(n.expected_reports()));
                1u64.saturating_add(repeat_count.saturating_mul(per_pass))
            }
            _ => 1,
        };
        self.children
            .iter()
            .fold(own, |acc, n| acc.saturating_add(n.expected_reports()))
    }

    /// Total number of nodes in this subtree, loop bodies included.
    pub fn node_count(&self) -> usize {
        let body = match &self.action {
            Action::Loop { body, .. } => body.iter().map(AstNode::node_count).sum(),
            _ => 0,
        };
        1 + body
            + self
                .children
                .iter()
                .map(AstNode::node_count)
                .sum::<usize>()
    }

    /// Convert back into the canonical document shape.
    pub fn to_entry(&self) -> Entry {
        let node_type = match &self.action {
            Action::Wait { value, magnitude } => NodeTypeValue::Wait(WaitPayload {
                value: *value,
                magnitude: magnitude.clone(),
            }),
            Action::Move { value, direction } => NodeTypeValue::Move(MovePayload {
                value: *value,
                direction: direction.clone(),
            }),
            Action::Press { button } => NodeTypeValue::Press(LabelPayload {
                value: button.clone(),
            }),
            Action::Click { button } => NodeTypeValue::Click(LabelPayload {
                value: button.clone(),
            }),
            Action::Key { key } => NodeTypeValue::Key(LabelPayload { value: key.clone() }),
            Action::Loop { repeat_count, body } => NodeTypeValue::Loop(LoopPayload {
                value: *repeat_count,
                children: body.iter().map(AstNode::to_entry).collect(),
            }),
        };
        Entry {
            node_type,
            children: self.children.iter().map(AstNode::to_entry).collect(),
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, 0))
    }
}

/// Sum of [`AstNode::expected_reports`] over a forest.
pub fn expected_reports(forest: &[AstNode]) -> u64 {
    forest
        .iter()
        .fold(0u64, |acc, n| acc.saturating_add(n.expected_reports()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> AstNode {
        AstNode::new(Action::Key { key: k.into() })
    }

    #[test]
    fn test_expected_reports_counts_loop_passes() {
        let inner = AstNode::new(Action::Loop {
            repeat_count: 2,
            body: vec![key("a"), key("b")],
        });
        let outer = AstNode::new(Action::Loop {
            repeat_count: 3,
            body: vec![inner, key("c")],
        });
        // outer marker + 3 * (inner marker + 2*2 keys + 1 key)
        assert_eq!(outer.expected_reports(), 1 + 3 * (1 + 4 + 1));
        assert_eq!(outer.node_count(), 5);
    }

    #[test]
    fn test_zero_count_loop_reports_only_marker() {
        let node = AstNode::new(Action::Loop {
            repeat_count: 0,
            body: vec![key("x")],
        });
        assert_eq!(node.expected_reports(), 1);
    }

    #[test]
    fn test_entry_children_counted_once() {
        let node = key("a").with_children(vec![key("b"), key("c")]);
        assert_eq!(node.expected_reports(), 3);
        assert_eq!(expected_reports(&[node.clone(), node]), 6);
    }

    #[test]
    fn test_kind_keys() {
        let keys: Vec<_> = ActionKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys, ["WAIT", "MOVE", "PRESS", "CLICK", "KEY", "LOOP"]);
        assert_eq!(
            Action::Click {
                button: "left".into()
            }
            .kind()
            .to_string(),
            "CLICK"
        );
    }
}
