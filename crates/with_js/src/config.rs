//! Serializable settings for [`crate::apply_with_config`].

use anyhow::{Context as _, Error};
use serde::{Deserialize, Serialize};

use crate::apply::{DEFAULT_SELECTOR, Target};
use crate::operations::{DEFAULT_OPERATIONS, OperationTable};

/// Which elements to scan and which builtin operations they may invoke.
///
/// Missing fields take their defaults, so `{}` is the default configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WithJsConfig {
    /// Selector for the elements to process.
    pub selector: String,
    /// Allowlist of operation names. `None` enables every builtin.
    pub operations: Option<Vec<String>>,
}

impl Default for WithJsConfig {
    fn default() -> Self {
        Self {
            selector: String::from(DEFAULT_SELECTOR),
            operations: None,
        }
    }
}

impl WithJsConfig {
    pub const fn new(selector: String, operations: Option<Vec<String>>) -> Self {
        Self {
            selector,
            operations,
        }
    }

    /// # Errors
    /// Malformed JSON, unknown fields, or fields of the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).context("invalid with-js configuration")
    }

    /// The builtin table, narrowed to the allowlist when there is one.
    pub fn operation_table(&self) -> OperationTable {
        let Some(names) = &self.operations else {
            return DEFAULT_OPERATIONS.clone();
        };
        for name in names {
            if !DEFAULT_OPERATIONS.contains(name) {
                log::warn!(target: "with_js", "allowlisted operation {name:?} is not a builtin");
            }
        }
        DEFAULT_OPERATIONS.restricted_to(names)
    }

    pub fn target(&self) -> Target<'_> {
        Target::selector(&self.selector)
    }
}
