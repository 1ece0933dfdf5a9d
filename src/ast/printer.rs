//! Indented pre-order rendering of a program tree, for diagnostics.
//!
//! Each node is one line, indented two spaces per depth level. A loop's body
//! follows the loop line, then any entry-level children, both one level deeper.

use std::fmt::Write as _;

use super::{Action, AstNode};

const INDENT: &str = "  ";

/// Render `node` and its descendants starting at `depth`.
pub fn render(node: &AstNode, depth: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, node, depth);
    out
}

/// Render every root of `forest` at depth 0.
pub fn render_forest(forest: &[AstNode]) -> String {
    let mut out = String::new();
    for node in forest {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &AstNode, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    // Writing into a String cannot fail.
    let _ = match node.action() {
        Action::Wait { value, magnitude } => writeln!(out, "WAIT {value} {magnitude}"),
        Action::Move { value, direction } => writeln!(out, "MOVE {value} {direction}"),
        Action::Press { button } => writeln!(out, "PRESS {button}"),
        Action::Click { button } => writeln!(out, "CLICK {button}"),
        Action::Key { key } => writeln!(out, "KEY {key}"),
        Action::Loop { repeat_count, .. } => writeln!(out, "LOOP {repeat_count}"),
    };

    if let Action::Loop { body, .. } = node.action() {
        for child in body {
            write_node(out, child, depth + 1);
        }
    }
    for child in node.children() {
        write_node(out, child, depth + 1);
    }
}
