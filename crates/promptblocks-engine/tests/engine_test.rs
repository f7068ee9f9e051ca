//! Tests for WorkflowEngine with scripted executors and the real invoker.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use promptblocks_config::{CompletionSettings, CredentialSource, StaticCredentials};
use promptblocks_engine::{ChannelNotifier, ExecutionEvent, WorkflowEngine, WorkflowError};
use promptblocks_invoker::{
  BlockExecutor, BlockInvoker, CompletionClient, CompletionError, CompletionRequest,
  CompletionResponse, InvokeError,
};
use promptblocks_registry::BlockRegistry;
use promptblocks_text::{InputValidator, ValidationError};
use tokio::sync::mpsc;

/// Executor that returns scripted results and records every call.
#[derive(Clone, Default)]
struct ScriptedExecutor {
  results: Arc<Mutex<VecDeque<Result<String, InvokeError>>>>,
  calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedExecutor {
  fn new(results: Vec<Result<String, InvokeError>>) -> Self {
    Self {
      results: Arc::new(Mutex::new(results.into())),
      calls: Arc::default(),
    }
  }

  fn calls(&self) -> Vec<(String, String)> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl BlockExecutor for ScriptedExecutor {
  async fn execute_block(&self, block_id: &str, input: &str) -> Result<String, InvokeError> {
    self
      .calls
      .lock()
      .unwrap()
      .push((block_id.to_string(), input.to_string()));
    self
      .results
      .lock()
      .unwrap()
      .pop_front()
      .expect("scripted executor ran out of results")
  }
}

fn registry() -> Arc<BlockRegistry> {
  Arc::new(BlockRegistry::with_builtins())
}

fn create_engine(executor: ScriptedExecutor) -> WorkflowEngine<ScriptedExecutor> {
  WorkflowEngine::new(registry(), InputValidator::default(), executor)
}

#[tokio::test]
async fn test_workflow_chains_outputs() {
  let executor = ScriptedExecutor::new(vec![
    Ok("summary".to_string()),
    Ok("resumen".to_string()),
  ]);
  let engine = create_engine(executor.clone());

  let result = engine
    .execute_workflow(&["summarizeText", "translateText"], "  long text  ")
    .await
    .unwrap();

  assert_eq!(
    executor.calls(),
    vec![
      ("summarizeText".to_string(), "long text".to_string()),
      ("translateText".to_string(), "summary".to_string()),
    ]
  );
  assert_eq!(result.final_output, "resumen");
  assert_eq!(result.steps.len(), 2);
  assert!(result.steps.iter().all(|s| s.success && s.error.is_none()));
  assert_eq!(result.steps[0].block_name, "summarizeText");
  assert_eq!(result.steps[1].input, "summary");
  assert_eq!(result.steps[1].output, "resumen");
  assert!(!result.execution_id.is_empty());
}

#[tokio::test]
async fn test_failure_stops_workflow_with_partial_results() {
  let executor = ScriptedExecutor::new(vec![
    Ok("summary".to_string()),
    Err(InvokeError::Network {
      message: "connection refused".to_string(),
    }),
  ]);
  let engine = create_engine(executor.clone());

  let err = engine
    .execute_workflow(
      &["summarizeText", "translateText", "extractKeyPoints"],
      "long text",
    )
    .await
    .unwrap_err();

  assert_eq!(executor.calls().len(), 2);
  assert_eq!(err.failed_step(), Some(2));
  assert_eq!(
    err.to_string(),
    "Workflow failed at step 2 (translateText): \
     Unable to connect to AI service. Please check your connection."
  );

  let steps = err.partial_results().unwrap();
  assert_eq!(steps.len(), 2);
  assert!(steps[0].success);
  assert_eq!(steps[0].output, "summary");
  assert!(!steps[1].success);
  assert_eq!(steps[1].input, "summary");
  assert_eq!(steps[1].output, "");
  assert_eq!(
    steps[1].error.as_deref(),
    Some("Unable to connect to AI service. Please check your connection.")
  );

  match err {
    WorkflowError::StepFailed { source, .. } => {
      assert!(matches!(source, InvokeError::Network { .. }))
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn test_failure_at_first_step() {
  let executor = ScriptedExecutor::new(vec![Err(InvokeError::MissingCredential)]);
  let engine = create_engine(executor.clone());

  let err = engine
    .execute_workflow(&["summarizeText", "translateText"], "text")
    .await
    .unwrap_err();

  assert_eq!(err.failed_step(), Some(1));
  assert_eq!(err.partial_results().unwrap().len(), 1);
  assert_eq!(executor.calls().len(), 1);
}

#[tokio::test]
async fn test_unknown_block_fails_before_any_step() {
  let executor = ScriptedExecutor::default();
  let engine = create_engine(executor.clone());

  let err = engine
    .execute_workflow(&["summarizeText", "translateText", "nope"], "text")
    .await
    .unwrap_err();

  assert!(matches!(&err, WorkflowError::BlockNotFound { block_id } if block_id == "nope"));
  assert_eq!(err.to_string(), "Block not found: nope");
  assert!(err.partial_results().is_none());
  assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_empty_selection() {
  let executor = ScriptedExecutor::default();
  let engine = create_engine(executor.clone());
  let none: [&str; 0] = [];

  let err = engine.execute_workflow(&none, "text").await.unwrap_err();

  assert!(matches!(err, WorkflowError::EmptySelection));
  assert_eq!(
    err.to_string(),
    "Please select at least one block for the workflow."
  );
  assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_input_validated_before_selection() {
  let executor = ScriptedExecutor::default();
  let engine = create_engine(executor.clone());
  let none: [&str; 0] = [];

  let err = engine.execute_workflow(&none, "   ").await.unwrap_err();
  assert!(matches!(
    err,
    WorkflowError::Validation(ValidationError::Empty)
  ));

  let engine = WorkflowEngine::new(registry(), InputValidator::new(5), executor.clone());
  let err = engine
    .execute_workflow(&["summarizeText"], "too long")
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    WorkflowError::Validation(ValidationError::TooLong { max: 5 })
  ));
  assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_accepts_owned_block_ids() {
  let executor = ScriptedExecutor::new(vec![Ok("done".to_string())]);
  let engine = create_engine(executor);
  let ids = vec!["improveWritingQuality".to_string()];

  let result = engine.execute_workflow(&ids, "teh text").await.unwrap();
  assert_eq!(result.final_output, "done");
}

#[tokio::test]
async fn test_channel_notifier_events() {
  let (tx, mut rx) = mpsc::unbounded_channel();
  let executor = ScriptedExecutor::new(vec![
    Ok("one".to_string()),
    Err(InvokeError::RateLimited { attempts: 4 }),
  ]);
  let engine = WorkflowEngine::with_notifier(
    registry(),
    InputValidator::default(),
    executor,
    ChannelNotifier::new(tx),
  );

  let _ = engine
    .execute_workflow(&["summarizeText", "translateText"], "text")
    .await;
  drop(engine);

  let mut events = Vec::new();
  while let Some(event) = rx.recv().await {
    events.push(event);
  }

  assert_eq!(events.len(), 6);
  let id = match &events[0] {
    ExecutionEvent::WorkflowStarted {
      execution_id,
      block_ids,
    } => {
      assert_eq!(block_ids, &["summarizeText", "translateText"]);
      execution_id.clone()
    }
    other => panic!("unexpected event: {other:?}"),
  };

  assert_eq!(
    events[1],
    ExecutionEvent::StepStarted {
      execution_id: id.clone(),
      step: 1,
      block_id: "summarizeText".to_string(),
    }
  );
  assert_eq!(
    events[2],
    ExecutionEvent::StepCompleted {
      execution_id: id.clone(),
      step: 1,
      block_id: "summarizeText".to_string(),
      output: "one".to_string(),
    }
  );
  assert!(matches!(&events[3], ExecutionEvent::StepStarted { step: 2, .. }));
  assert_eq!(
    events[4],
    ExecutionEvent::StepFailed {
      execution_id: id.clone(),
      step: 2,
      block_id: "translateText".to_string(),
      error: "Too many requests. Please wait a moment and try again.".to_string(),
    }
  );
  assert!(matches!(&events[5], ExecutionEvent::WorkflowFailed { execution_id, .. } if *execution_id == id));
}

#[tokio::test]
async fn test_no_events_when_precheck_fails() {
  let (tx, mut rx) = mpsc::unbounded_channel();
  let engine = WorkflowEngine::with_notifier(
    registry(),
    InputValidator::default(),
    ScriptedExecutor::default(),
    ChannelNotifier::new(tx),
  );

  let _ = engine.execute_workflow(&["missing"], "text").await;
  drop(engine);

  assert!(rx.recv().await.is_none());
}

/// Completion client returning fixed contents in order and counting calls.
#[derive(Clone, Default)]
struct ScriptedClient {
  contents: Arc<Mutex<VecDeque<String>>>,
  calls: Arc<Mutex<usize>>,
}

impl ScriptedClient {
  fn new(contents: &[&str]) -> Self {
    Self {
      contents: Arc::new(Mutex::new(
        contents.iter().map(|c| c.to_string()).collect(),
      )),
      calls: Arc::default(),
    }
  }

  fn call_count(&self) -> usize {
    *self.calls.lock().unwrap()
  }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
  async fn complete(
    &self,
    _request: &CompletionRequest,
    _api_key: &str,
  ) -> Result<CompletionResponse, CompletionError> {
    *self.calls.lock().unwrap() += 1;
    let content = self
      .contents
      .lock()
      .unwrap()
      .pop_front()
      .expect("scripted client ran out of replies");
    Ok(CompletionResponse::with_content(&content))
  }
}

fn create_invoker_engine(client: ScriptedClient) -> WorkflowEngine<BlockInvoker<ScriptedClient>> {
  let registry = registry();
  let credentials: Arc<dyn CredentialSource> = Arc::new(StaticCredentials::new("sk-test"));
  let invoker = BlockInvoker::new(
    registry.clone(),
    InputValidator::default(),
    credentials,
    client,
    CompletionSettings::default(),
  );
  WorkflowEngine::new(registry, InputValidator::default(), invoker)
}

#[tokio::test]
async fn test_invoker_workflow_sanitizes_each_step() {
  let client = ScriptedClient::new(&["```\nsummary\n```", "{\"text\": \"resumen\"}"]);
  let engine = create_invoker_engine(client.clone());

  let result = engine
    .execute_workflow(&["summarizeText", "translateText"], "long text")
    .await
    .unwrap();

  assert_eq!(client.call_count(), 2);
  assert_eq!(result.steps[1].input, "summary");
  assert_eq!(result.final_output, "resumen");
}

#[tokio::test]
async fn test_invoker_unknown_block_makes_no_calls() {
  let client = ScriptedClient::new(&[]);
  let engine = create_invoker_engine(client.clone());

  let err = engine
    .execute_workflow(&["summarizeText", "unknownBlock"], "text")
    .await
    .unwrap_err();

  assert!(matches!(err, WorkflowError::BlockNotFound { .. }));
  assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_empty_intermediate_output_fails_next_step() {
  let client = ScriptedClient::new(&["```\n```"]);
  let engine = create_invoker_engine(client.clone());

  let err = engine
    .execute_workflow(&["summarizeText", "translateText"], "long text")
    .await
    .unwrap_err();

  assert_eq!(client.call_count(), 1);
  assert_eq!(err.failed_step(), Some(2));
  let steps = err.partial_results().unwrap();
  assert_eq!(steps[0].output, "");
  assert_eq!(
    steps[1].error.as_deref(),
    Some("Please enter some text to transform.")
  );
}
