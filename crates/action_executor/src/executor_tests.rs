//! Tests for the sequential executor.

use super::*;
use crate::errors::ActionError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Test handle recording which steps touched it.
#[derive(Debug, Default)]
struct Recorder {
    visited: Vec<String>,
}

/// Action that counts its invocations and returns a fixed value.
struct Counted {
    name: &'static str,
    calls: Arc<AtomicUsize>,
    outcome: ActionResult<Value>,
}

impl Counted {
    fn new(name: &'static str, outcome: ActionResult<Value>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let action = Self {
            name,
            calls: calls.clone(),
            outcome,
        };
        (action, calls)
    }
}

#[async_trait]
impl Action<Recorder> for Counted {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, context: &mut ExecutionContext<Recorder>) -> ActionResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        context.handle_mut().visited.push(self.name.to_string());
        self.outcome.clone()
    }
}

// ============================================================================
// Ordering and results
// ============================================================================

/// Verify an empty executor succeeds immediately.
#[tokio::test]
async fn test_empty_executor_succeeds() {
    let mut executor = ActionExecutor::new(Recorder::default());

    executor.execute().await.unwrap();

    assert_eq!(executor.state(), ExecutionState::Succeeded);
    assert!(executor.context().results().is_empty());
    assert!(executor.is_empty());
}

/// Verify actions run in order and every result is recorded.
#[tokio::test]
async fn test_actions_run_in_order() {
    let (a, _) = Counted::new("a", Ok(json!(1)));
    let (b, _) = Counted::new("b", Ok(Value::Null));
    let (c, _) = Counted::new("c", Ok(json!("three")));
    let mut executor = ActionExecutor::new(Recorder::default())
        .with_action(a)
        .with_action(b)
        .with_action(c);

    assert_eq!(executor.state(), ExecutionState::Idle);
    executor.execute().await.unwrap();

    assert_eq!(executor.state(), ExecutionState::Succeeded);
    assert_eq!(executor.action_names(), vec!["a", "b", "c"]);
    let context = executor.into_context();
    assert_eq!(context.results(), &[json!(1), Value::Null, json!("three")]);
    assert_eq!(context.handle().visited, vec!["a", "b", "c"]);
}

/// Verify a later action sees the result of an earlier one.
#[tokio::test]
async fn test_later_action_sees_earlier_result() {
    let seen = Arc::new(std::sync::Mutex::new(None));
    let seen_in_b = seen.clone();

    let mut executor = ActionExecutor::new(Recorder::default())
        .then("a", |_ctx| Box::pin(async move { Ok(json!("X")) }))
        .then("b", move |ctx| {
            let seen = seen_in_b.clone();
            Box::pin(async move {
                *seen.lock().unwrap() = ctx.results().first().cloned();
                Ok(Value::Null)
            })
        });

    executor.execute().await.unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(json!("X")));
    assert_eq!(executor.context().result(0), Some(&json!("X")));
}

// ============================================================================
// Failure handling
// ============================================================================

/// Verify the first failure stops the run and is returned unchanged.
#[tokio::test]
async fn test_failure_stops_remaining_actions() {
    let failure = ActionError::failed("b", "button missing");
    let (a, a_calls) = Counted::new("a", Ok(json!("from a")));
    let (b, b_calls) = Counted::new("b", Err(failure.clone()));
    let (c, c_calls) = Counted::new("c", Ok(json!("from c")));
    let mut executor = ActionExecutor::new(Recorder::default())
        .with_action(a)
        .with_action(b)
        .with_action(c);

    let error = executor.execute().await.unwrap_err();

    assert_eq!(error, failure);
    assert_eq!(executor.state(), ExecutionState::Failed);
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    assert_eq!(executor.context().results(), &[json!("from a")]);
}

/// Verify an action that handles its own absence does not stop the run.
#[tokio::test]
async fn test_action_can_swallow_expected_failure() {
    let mut executor = ActionExecutor::new(Recorder::default())
        .then("optional-dialog", |_ctx| {
            Box::pin(async move {
                let lookup: ActionResult<Value> = Err(ActionError::ElementNotFound {
                    selector: "#dialog".to_string(),
                });
                let found = crate::action::tolerate_absence(lookup)?;
                Ok(json!(found.is_some()))
            })
        })
        .then("next", |_ctx| Box::pin(async move { Ok(json!("ran")) }));

    executor.execute().await.unwrap();

    assert_eq!(executor.context().results(), &[json!(false), json!("ran")]);
}

// ============================================================================
// Re-running
// ============================================================================

/// Verify running again starts over with fresh results.
#[tokio::test]
async fn test_rerun_resets_results() {
    let (a, a_calls) = Counted::new("a", Ok(json!(1)));
    let mut executor = ActionExecutor::new(Recorder::default()).with_action(a);

    executor.execute().await.unwrap();
    executor.execute().await.unwrap();

    assert_eq!(a_calls.load(Ordering::SeqCst), 2);
    assert_eq!(executor.context().results(), &[json!(1)]);
    assert_eq!(executor.context().handle().visited, vec!["a", "a"]);
}

/// Verify a failed executor can be run again once fixed up.
#[tokio::test]
async fn test_rerun_after_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let mut executor = ActionExecutor::new(Recorder::default()).then("flaky", move |_ctx| {
        let counter = counter.clone();
        Box::pin(async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ActionError::Target("not ready".to_string()))
            } else {
                Ok(json!("ready"))
            }
        })
    });

    assert!(executor.execute().await.is_err());
    assert_eq!(executor.state(), ExecutionState::Failed);

    executor.execute().await.unwrap();
    assert_eq!(executor.state(), ExecutionState::Succeeded);
    assert_eq!(executor.context().results(), &[json!("ready")]);
}
