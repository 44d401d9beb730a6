//! Per-run state shared by every action.

use serde_json::Value;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// The mutable state passed to each action of one run.
///
/// Holds the automation handle and the results of the actions that have
/// already completed, indexed by execution order. An action that produced
/// nothing is recorded as `Value::Null`, so indices always line up with
/// positions in the action list.
#[derive(Debug)]
pub struct ExecutionContext<H> {
    handle: H,
    results: Vec<Value>,
}

impl<H> ExecutionContext<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            results: Vec::new(),
        }
    }

    /// The automation target.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    /// Results of every completed action so far, oldest first.
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    /// The result recorded for the action at `index`.
    pub fn result(&self, index: usize) -> Option<&Value> {
        self.results.get(index)
    }

    pub fn last_result(&self) -> Option<&Value> {
        self.results.last()
    }

    /// Gives back the handle, discarding the results.
    pub fn into_handle(self) -> H {
        self.handle
    }

    pub(crate) fn record(&mut self, value: Value) {
        self.results.push(value);
    }

    pub(crate) fn reset(&mut self) {
        self.results.clear();
    }
}
