use tracing::{debug, error, info, trace};

use crate::ast::{self, Action, ActionKind, AstNode};
use crate::error::ExecError;
use crate::executor::actions::Effector;

/// A top-level statement that failed, and why.
#[derive(Debug)]
pub struct RootFailure {
    /// Position of the failed root in the forest.
    pub index: usize,
    pub error: ExecError,
}

/// Outcome of one [`Interpreter::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of top-level statements attempted.
    pub roots: usize,
    pub failures: Vec<RootFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of roots that ran to completion.
    pub fn succeeded(&self) -> usize {
        self.roots.saturating_sub(self.failures.len())
    }
}

/// Interpreter is responsible for:
/// - walking a borrowed forest in order
/// - dispatching every node to the effector by kind
/// - repeating loop bodies
/// - isolating failures per top-level statement
///
/// It keeps no state between runs; `run` may be called any number of times.
pub struct Interpreter<'a, E> {
    forest: &'a [AstNode],
    effector: E,
}

impl<'a, E: Effector> Interpreter<'a, E> {
    /// Create an interpreter over `forest` that reports through `effector`.
    pub fn new(forest: &'a [AstNode], effector: E) -> Self {
        Self { forest, effector }
    }

    pub fn forest(&self) -> &'a [AstNode] {
        self.forest
    }

    pub fn effector(&self) -> &E {
        &self.effector
    }

    /// Give back the effector (e.g. to inspect what it recorded).
    pub fn into_effector(self) -> E {
        self.effector
    }

    /// Execute every top-level statement once, in order.
    ///
    /// A failing statement is logged and recorded in the report; the next
    /// statement still runs. This never returns an error.
    pub fn run(&mut self) -> RunReport {
        let forest = self.forest;
        info!(
            target: "corel::runtime",
            roots = forest.len(),
            effector = self.effector.name(),
            "Starting program"
        );
        debug!(
            target: "corel::runtime",
            expected_reports = ast::expected_reports(forest),
            "Expected action reports"
        );

        let mut failures = Vec::new();
        for (index, node) in forest.iter().enumerate() {
            trace!(target: "corel::runtime", index, kind = %node.action().kind(), "Executing root");
            if let Err(error) = self.run_node(node) {
                error!(
                    target: "corel::runtime",
                    root = index,
                    kind = %node.action().kind(),
                    error = %error,
                    "Statement failed; continuing with the next one"
                );
                failures.push(RootFailure { index, error });
            }
        }

        info!(
            target: "corel::runtime",
            roots = forest.len(),
            failed = failures.len(),
            "Program completed"
        );
        RunReport {
            roots: forest.len(),
            failures,
        }
    }

    /// Execute one node and everything beneath it.
    ///
    /// The first error aborts the rest of this subtree, remaining loop
    /// iterations included.
    pub fn run_node(&mut self, node: &AstNode) -> Result<(), ExecError> {
        let kind = node.action().kind();
        match node.action() {
            Action::Wait { value, magnitude } => self
                .effector
                .do_wait(*value, magnitude)
                .map_err(effector_failure(kind))?,
            Action::Move { value, direction } => self
                .effector
                .do_move(*value, direction)
                .map_err(effector_failure(kind))?,
            Action::Press { button } => self
                .effector
                .do_press(button)
                .map_err(effector_failure(kind))?,
            Action::Click { button } => self
                .effector
                .do_click(button)
                .map_err(effector_failure(kind))?,
            Action::Key { key } => self.effector.do_key(key).map_err(effector_failure(kind))?,
            Action::Loop { repeat_count, body } => {
                self.effector
                    .begin_loop(*repeat_count)
                    .map_err(effector_failure(kind))?;
                for iteration in 0..*repeat_count {
                    trace!(target: "corel::runtime", iteration, "Loop iteration");
                    for child in body {
                        self.run_node(child)?;
                    }
                }
            }
        }

        for child in node.children() {
            self.run_node(child)?;
        }
        Ok(())
    }
}

fn effector_failure(kind: ActionKind) -> impl FnOnce(anyhow::Error) -> ExecError {
    move |source| ExecError::Effector {
        action: kind.key(),
        source,
    }
}
