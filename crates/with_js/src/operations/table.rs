use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{BuiltinOperation, Operation, OperationError};
use html::{DOM, NodeId};
use once_cell::sync::Lazy;

/// The builtin table, built once and shared.
pub static DEFAULT_OPERATIONS: Lazy<OperationTable> = Lazy::new(OperationTable::builtin);

/// Operation name to implementation. Lookups are exact and case-sensitive;
/// names missing from the table are skipped by the executor.
#[derive(Clone, Default)]
pub struct OperationTable {
    operations: BTreeMap<String, Arc<dyn Operation>>,
}

impl OperationTable {
    /// A table with nothing in it; every update is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `remove`, `addAttribute`, `removeAttribute`, `addClass` and `removeClass`.
    pub fn builtin() -> Self {
        BuiltinOperation::ALL
            .into_iter()
            .fold(Self::empty(), |table, operation| {
                table.with_operation(operation.name(), operation)
            })
    }

    /// Builder form of [`OperationTable::insert`].
    #[must_use]
    pub fn with_operation(mut self, name: &str, operation: impl Operation + 'static) -> Self {
        self.insert(name, operation);
        self
    }

    /// Register a closure under `name`.
    #[must_use]
    pub fn with_fn<F>(self, name: &str, operation: F) -> Self
    where
        F: Fn(&mut DOM, NodeId, &[String]) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        self.with_operation(name, operation)
    }

    /// Register `operation` under `name`, returning whatever it replaced.
    pub fn insert(
        &mut self,
        name: &str,
        operation: impl Operation + 'static,
    ) -> Option<Arc<dyn Operation>> {
        self.operations.insert(name.to_owned(), Arc::new(operation))
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Operation>> {
        self.operations.remove(name)
    }

    /// A copy holding only the entries whose names are listed. Listed names
    /// that this table lacks are ignored.
    #[must_use]
    pub fn restricted_to<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let operations = names
            .iter()
            .filter_map(|name| {
                let (name, operation) = self.operations.get_key_value(name.as_ref())?;
                Some((name.clone(), Arc::clone(operation)))
            })
            .collect();
        Self { operations }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operation> {
        self.operations.get(name).map(|operation| &**operation)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Debug for OperationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
