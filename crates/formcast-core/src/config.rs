//! Validator configuration
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// How a model's `condition` list is evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionPolicy {
    /// Evaluate every condition in order; the first failing one is reported
    #[default]
    FirstFailure,
    /// Evaluate only the first declared condition
    FirstOnly,
}

/// Configuration shared by the leaf and tree validators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub condition_policy: ConditionPolicy,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that only looks at the first declared condition
    pub fn first_only() -> Self {
        Self {
            condition_policy: ConditionPolicy::FirstOnly,
        }
    }

    pub fn with_condition_policy(mut self, policy: ConditionPolicy) -> Self {
        self.condition_policy = policy;
        self
    }
}
