//! Runtime limits for one evaluation.

use crate::errors::{budget_exceeded, depth_exceeded, EvalError};

/// Host-supplied evaluation limits. Both are unlimited by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum node nesting depth, or `None` for unlimited (native stack
    /// growth keeps deep trees safe).
    pub max_depth: Option<usize>,
    /// Maximum number of nodes evaluated, or `None` for unlimited.
    pub node_budget: Option<u64>,
}

impl EvalOptions {
    pub const UNLIMITED: EvalOptions = EvalOptions {
        max_depth: None,
        node_budget: None,
    };

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = Some(node_budget);
        self
    }
}

/// Per-evaluation counters checked against [`EvalOptions`].
#[derive(Debug)]
pub(crate) struct LimitState {
    options: EvalOptions,
    depth: usize,
    nodes: u64,
}

impl LimitState {
    pub(crate) fn new(options: EvalOptions) -> Self {
        LimitState {
            options,
            depth: 0,
            nodes: 0,
        }
    }

    /// Account for entering one node.
    ///
    /// On error the depth is left unchanged, so no matching `exit` is due.
    pub(crate) fn enter(&mut self) -> Result<(), EvalError> {
        self.nodes = self.nodes.saturating_add(1);
        if let Some(budget) = self.options.node_budget {
            if self.nodes > budget {
                return Err(budget_exceeded(budget));
            }
        }
        let depth = self.depth.saturating_add(1);
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(depth_exceeded(limit));
            }
        }
        self.depth = depth;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Nodes evaluated so far.
    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }
}
