//! The action abstraction.
//!
//! An action is one named step of a script. It receives the shared
//! [`ExecutionContext`], may drive the automation handle, and returns a
//! value that later actions can read back from the context.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use crate::{context::ExecutionContext, errors::ActionResult};

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;

/// The future returned by closure-based actions.
pub type ActionFuture<'a> = BoxFuture<'a, ActionResult<Value>>;

/// One named step run by the executor against a handle of type `H`.
#[async_trait]
pub trait Action<H>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Runs the step.
    ///
    /// # Errors
    ///
    /// Any error returned here stops the run and is handed to the caller of
    /// the executor unchanged.
    async fn run(&self, context: &mut ExecutionContext<H>) -> ActionResult<Value>;
}

/// An action backed by a closure. Built with [`action_fn`].
pub struct FnAction<H, F> {
    name: String,
    run: F,
    _handle: PhantomData<fn(H)>,
}

impl<H, F> std::fmt::Debug for FnAction<H, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAction").field("name", &self.name).finish()
    }
}

/// Wraps a closure as an [`Action`].
///
/// The closure receives the context and returns a boxed future, which is
/// usually written as `|ctx| Box::pin(async move { ... })`.
///
/// ```rust
/// use action_executor::{action_fn, ExecutionContext};
/// use serde_json::json;
///
/// let greet = action_fn("greet", |ctx: &mut ExecutionContext<String>| {
///     Box::pin(async move { Ok(json!(format!("hello {}", ctx.handle()))) })
/// });
/// ```
pub fn action_fn<H, F>(name: impl Into<String>, run: F) -> FnAction<H, F>
where
    H: Send + 'static,
    F: for<'a> Fn(&'a mut ExecutionContext<H>) -> ActionFuture<'a> + Send + Sync,
{
    FnAction {
        name: name.into(),
        run,
        _handle: PhantomData,
    }
}

#[async_trait]
impl<H, F> Action<H> for FnAction<H, F>
where
    H: Send + 'static,
    F: for<'a> Fn(&'a mut ExecutionContext<H>) -> ActionFuture<'a> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, context: &mut ExecutionContext<H>) -> ActionResult<Value> {
        (self.run)(context).await
    }
}

/// Turns a timeout or a missing element into `Ok(None)`.
///
/// For optional steps, such as dismissing a dialog that may not appear.
/// Every other error is passed through.
pub fn tolerate_absence<T>(result: ActionResult<T>) -> ActionResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_absence() => {
            debug!(message = "Ignoring expected absence", error = %e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
