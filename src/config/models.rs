use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A whole Corel document: the top-level entries, in execution order.
///
/// These models describe the canonical document shape. They are used to
/// generate the JSON Schema and to re-serialize a built forest; the builder
/// itself works on untyped `serde_json::Value`s so it can report exactly which
/// raw value was malformed.
pub type Document = Vec<Entry>;

/// One statement of the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entry {
    /// The action this entry performs. Exactly one key must be present.
    pub node_type: NodeTypeValue,

    /// Entries attached next to `node_type`. They run once, after the action.
    /// Prefer putting repeated steps inside a `LOOP` body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Entry>,
}

/// Action selector. Serialized externally tagged, e.g. `{"WAIT": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeTypeValue {
    /// Wait for a duration.
    Wait(WaitPayload),

    /// Move the pointer along an axis.
    Move(MovePayload),

    /// Hold a button; `value` is the button label.
    Press(LabelPayload),

    /// Tap a button; `value` is the button label.
    Click(LabelPayload),

    /// Send a key; `value` is the key label.
    Key(LabelPayload),

    /// Repeat `children` `value` times.
    Loop(LoopPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WaitPayload {
    pub value: i64,
    /// Unit label: "s", "ms", "cs" or "ds".
    pub magnitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MovePayload {
    pub value: i64,
    /// Axis label: "x" or "y".
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelPayload {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoopPayload {
    /// Repeat count. Zero runs the body zero times.
    pub value: u64,
    /// Loop body, in execution order. Required, may be empty.
    pub children: Vec<Entry>,
}

/// Switches that shape a single run of the CLI or an embedding application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Validate domain labels (magnitudes, directions, buttons) while executing.
    pub strict: bool,
    /// Render the built forest before executing it.
    pub print_ast: bool,
    /// Print the canonical JSON re-serialization of the built forest.
    pub emit_json: bool,
    /// Stop after building (and printing); do not execute.
    pub no_run: bool,
}
