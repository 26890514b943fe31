use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Comparison operator of a condition node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConditionOperator {
    /// Full-string equality.
    Equals,
    /// Substring presence.
    Contains,
}

/// Test applied by a condition node to a captured variable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Condition {
    /// Name of the variable to test.
    #[serde(default)]
    pub variable: String,
    pub operator: ConditionOperator,
    /// Comparison literal.
    #[serde(default)]
    pub value: String,
}

impl Condition {
    /// Evaluate against the variable bag. Comparison is case-insensitive;
    /// a missing variable reads as the empty string.
    pub fn evaluate(
        &self,
        variables: &HashMap<String, String>,
    ) -> bool {
        let actual = variables.get(&self.variable).map(String::as_str).unwrap_or("").to_lowercase();
        let expected = self.value.to_lowercase();

        match self.operator {
            ConditionOperator::Equals => actual == expected,
            ConditionOperator::Contains => actual.contains(&expected),
        }
    }
}
