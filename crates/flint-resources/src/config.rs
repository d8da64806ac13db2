// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Checker configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the resource checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Upper bound on passes over a loop body while looking for the
    /// loop-head fixed point. The availability lattice is shallow, so real
    /// programs converge in two or three passes. At least one pass always
    /// runs; a head still moving at the bound is widened to
    /// `MaybeAvailable`.
    pub max_loop_iterations: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self { max_loop_iterations: 16 }
    }
}
