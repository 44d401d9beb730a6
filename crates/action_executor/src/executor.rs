//! Sequential action executor.
//!
//! Runs an ordered list of actions against one [`ExecutionContext`]. Each
//! action sees the results of every action before it. The first error stops
//! the run and is returned to the caller as is; nothing is retried here.

use std::{fmt, time::Instant};

use tracing::{debug, info, warn};

use crate::{
    action::{action_fn, Action, ActionFuture},
    context::ExecutionContext,
    errors::ActionResult,
};

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Runs actions strictly in order against a shared context.
pub struct ActionExecutor<H> {
    actions: Vec<Box<dyn Action<H>>>,
    context: ExecutionContext<H>,
    state: ExecutionState,
}

impl<H> fmt::Debug for ActionExecutor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionExecutor")
            .field("actions", &self.action_names())
            .field("state", &self.state)
            .field("results", &self.context.results())
            .finish()
    }
}

impl<H> ActionExecutor<H> {
    /// Creates an idle executor with no actions.
    pub fn new(handle: H) -> Self {
        Self {
            actions: Vec::new(),
            context: ExecutionContext::new(handle),
            state: ExecutionState::Idle,
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn context(&self) -> &ExecutionContext<H> {
        &self.context
    }

    /// Consumes the executor, returning the context of the last run.
    pub fn into_context(self) -> ExecutionContext<H> {
        self.context
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|action| action.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Appends an action to the end of the list.
    pub fn push(&mut self, action: Box<dyn Action<H>>) {
        self.actions.push(action);
    }
}

impl<H: Send + 'static> ActionExecutor<H> {
    /// Builder form of [`ActionExecutor::push`].
    pub fn with_action(mut self, action: impl Action<H> + 'static) -> Self {
        self.push(Box::new(action));
        self
    }

    /// Appends a closure-based action.
    pub fn then<F>(self, name: impl Into<String>, run: F) -> Self
    where
        F: for<'a> Fn(&'a mut ExecutionContext<H>) -> ActionFuture<'a> + Send + Sync + 'static,
    {
        self.with_action(action_fn(name, run))
    }

    /// Runs every action in order.
    ///
    /// Running an executor that has already run starts over with an empty
    /// result list.
    ///
    /// # Errors
    ///
    /// Returns the error of the first action that fails. Later actions are
    /// not started and the state becomes [`ExecutionState::Failed`].
    pub async fn execute(&mut self) -> ActionResult<()> {
        if self.state != ExecutionState::Idle {
            self.context.reset();
        }
        self.state = ExecutionState::Running;

        let run_started = Instant::now();
        info!(
            message = "Executing actions",
            count = self.actions.len()
        );

        for (index, action) in self.actions.iter().enumerate() {
            let started = Instant::now();
            debug!(message = "Action started", action = action.name(), index = index);

            match action.run(&mut self.context).await {
                Ok(value) => {
                    debug!(
                        message = "Action finished",
                        action = action.name(),
                        index = index,
                        elapsed_ms = started.elapsed().as_millis() as u64
                    );
                    self.context.record(value);
                }
                Err(e) => {
                    warn!(
                        message = "Action failed",
                        action = action.name(),
                        index = index,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %e
                    );
                    self.state = ExecutionState::Failed;
                    return Err(e);
                }
            }
        }

        self.state = ExecutionState::Succeeded;
        info!(
            message = "All actions finished",
            count = self.actions.len(),
            elapsed_ms = run_started.elapsed().as_millis() as u64
        );
        Ok(())
    }
}
