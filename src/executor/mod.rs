#![allow(clippy::missing_errors_doc)]

/*!
Executor module for Corel.

This module wires together:
- `actions`: the `Effector` boundary (one operation per action kind) and the
  log-only `ReportingEffector`
- `runtime`: the tree-walking `Interpreter` with per-statement failure isolation

Typical usage:
- Build a forest with `corel::ast::build_forest` (or a `config::load_forest_*` helper).
- Construct an `Interpreter` over it and call `run`.

Example:
```no_run
use corel::ast::build_forest;
use corel::executor::{Interpreter, ReportingEffector};
use serde_json::json;

let doc = json!([{"node_type": {"KEY": {"value": "A"}}}]);
let forest = build_forest(&doc).unwrap();
let report = Interpreter::new(&forest, ReportingEffector::new(false)).run();
assert!(report.is_success());
```

Public re-exports:
- `Effector`: trait implemented by action backends.
- `ReportingEffector`: logs intended actions instead of performing them.
- `Interpreter`, `RunReport`, `RootFailure`: execution and its outcome.
*/

pub mod actions;
pub mod runtime;

// Re-exports for convenient access from `corel::executor::*`
pub use actions::{Effector, ReportingEffector, wait_duration};
pub use runtime::{Interpreter, RootFailure, RunReport};
