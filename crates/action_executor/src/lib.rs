//! # Action Executor
//!
//! A small sequential runner for automation scripts.
//!
//! A script is an ordered list of [`Action`]s sharing one
//! [`ExecutionContext`]. The context carries the automation handle and the
//! result of every action that has finished so far, so later steps can
//! build on earlier ones. The first error stops the run.
//!
//! ## Examples
//!
//! ```rust
//! use action_executor::{ActionExecutor, ExecutionState};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), action_executor::ActionError> {
//! let mut executor = ActionExecutor::new(Vec::<String>::new())
//!     .then("open", |ctx| Box::pin(async move {
//!         ctx.handle_mut().push("opened".to_string());
//!         Ok(json!(1))
//!     }))
//!     .then("check", |ctx| Box::pin(async move {
//!         Ok(json!(ctx.result(0).is_some()))
//!     }));
//!
//! executor.execute().await?;
//! assert_eq!(executor.state(), ExecutionState::Succeeded);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod context;
pub mod errors;
pub mod executor;
pub mod timeout;

pub use action::{action_fn, tolerate_absence, Action, ActionFuture, FnAction};
pub use context::ExecutionContext;
pub use errors::{ActionError, ActionResult};
pub use executor::{ActionExecutor, ExecutionState};
pub use timeout::with_timeout;
