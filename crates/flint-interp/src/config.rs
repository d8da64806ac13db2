// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Evaluator configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Nested calls allowed before an invocation fails with
    /// `CallDepthExceeded`.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { max_call_depth: 256 }
    }
}
