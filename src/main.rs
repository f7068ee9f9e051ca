use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use promptblocks_config::{
  CredentialSource, EnvCredentials, Settings, WorkflowDef, WorkflowStore, sample_workflow,
  sample_workflows,
};
use promptblocks_engine::{
  StepResult, WorkflowEngine, WorkflowError, render_markdown, render_plain,
};
use promptblocks_invoker::{BlockInvoker, HttpCompletionClient};
use promptblocks_registry::BlockRegistry;
use promptblocks_text::InputValidator;

/// PromptBlocks - chain AI text transformations into workflows
#[derive(Parser)]
#[command(name = "promptblocks")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.promptblocks)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Path to a settings file (JSON)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// List the available blocks
  Blocks,

  /// Run a single block or a workflow
  Run {
    #[command(subcommand)]
    target: RunTarget,
  },

  /// Manage saved and sample workflows
  Workflows {
    #[command(subcommand)]
    action: WorkflowsAction,
  },
}

#[derive(Subcommand)]
enum RunTarget {
  /// Run one block against the input text
  Block {
    /// The block ID to execute
    block_id: String,

    /// Input text (reads stdin when omitted)
    #[arg(long)]
    input: Option<String>,

    /// Use the block's sample input
    #[arg(long, conflicts_with = "input")]
    sample: bool,
  },

  /// Run blocks in sequence, each output feeding the next block
  Workflow {
    /// Block IDs in execution order
    #[arg(long = "block", value_name = "ID", conflicts_with_all = ["sample_workflow", "saved"])]
    blocks: Vec<String>,

    /// Run a sample workflow with its sample input
    #[arg(long, value_name = "NAME", conflicts_with = "saved")]
    sample_workflow: Option<String>,

    /// Run a saved workflow by its number in `workflows list`
    #[arg(long, value_name = "N")]
    saved: Option<usize>,

    /// Input text (reads stdin when omitted)
    #[arg(long)]
    input: Option<String>,

    /// Write the successful steps to a markdown file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "plain")]
    json: bool,

    /// Print only the successful outputs, separated by rules
    #[arg(long)]
    plain: bool,
  },
}

#[derive(Subcommand)]
enum WorkflowsAction {
  /// List saved workflows
  List,

  /// List the sample workflows
  Samples,

  /// Save a named workflow
  Save {
    name: String,

    /// Block IDs in execution order
    #[arg(long = "block", value_name = "ID")]
    blocks: Vec<String>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".promptblocks"),
  };

  let rt = tokio::runtime::Runtime::new()?;

  match cli.command {
    Some(Commands::Blocks) => list_blocks(),
    Some(Commands::Run { target }) => {
      rt.block_on(async { run_target(target, cli.config.as_deref(), &data_dir).await })?
    }
    Some(Commands::Workflows { action }) => {
      rt.block_on(async { workflows(action, &data_dir).await })?
    }
    None => {
      println!("promptblocks - use --help to see available commands");
    }
  }

  Ok(())
}

fn list_blocks() {
  for block in BlockRegistry::with_builtins().all() {
    println!("{:<24} {}", block.id, block.description);
  }
}

/// Everything a run needs, built from the settings file.
struct Services {
  registry: Arc<BlockRegistry>,
  validator: InputValidator,
  invoker: BlockInvoker<HttpCompletionClient>,
}

async fn build_services(config: Option<&Path>) -> Result<Services> {
  let settings = Settings::load_or_default(config)
    .await
    .context("failed to load settings")?;

  let registry = Arc::new(BlockRegistry::with_builtins());
  let validator = InputValidator::new(settings.input.max_length);
  let credentials: Arc<dyn CredentialSource> =
    Arc::new(EnvCredentials::new(&settings.credentials.env_var));
  let client = HttpCompletionClient::new(&settings.completion.endpoint)
    .with_context(|| format!("invalid endpoint: {}", settings.completion.endpoint))?;

  let invoker = BlockInvoker::new(
    registry.clone(),
    validator,
    credentials,
    client,
    settings.completion,
  );

  Ok(Services {
    registry,
    validator,
    invoker,
  })
}

async fn run_target(target: RunTarget, config: Option<&Path>, data_dir: &Path) -> Result<()> {
  let services = build_services(config).await?;

  match target {
    RunTarget::Block {
      block_id,
      input,
      sample,
    } => {
      let text = if sample {
        if !services.registry.contains(&block_id) {
          bail!("Block not found: {block_id}");
        }
        services.registry.sample_input(&block_id).to_string()
      } else {
        read_input(input)?
      };

      let output = services.invoker.execute_block(&block_id, &text).await?;
      println!("{output}");
    }
    RunTarget::Workflow {
      blocks,
      sample_workflow: sample_key,
      saved,
      input,
      export,
      json,
      plain,
    } => {
      let format = StepFormat::from_flags(json, plain);
      let (workflow, sample_input) = select_workflow(blocks, sample_key, saved, data_dir).await?;
      let text = match (input, sample_input) {
        (Some(input), _) => input,
        (None, Some(sample)) => sample,
        (None, None) => read_input(None)?,
      };

      eprintln!("Running workflow: {}", workflow.name);

      let engine = WorkflowEngine::new(services.registry, services.validator, services.invoker);
      match engine.execute_workflow(&workflow.blocks, &text).await {
        Ok(result) => {
          let output = match format {
            StepFormat::Json => serde_json::to_string_pretty(&result)?,
            _ => format_steps(&result.steps, format)?,
          };
          println!("{output}");
          if let Some(path) = export {
            export_markdown(&path, &result.steps).await?;
          }
        }
        Err(e) => {
          if let Some(steps) = e.partial_results() {
            println!("{}", format_steps(steps, format)?);
            if let Some(path) = export {
              export_markdown(&path, steps).await?;
            }
          }
          return Err(e.into());
        }
      }
    }
  }

  Ok(())
}

/// Pick the block list from `--block`, `--sample-workflow` or `--saved`.
///
/// Sample workflows also bring their sample input.
async fn select_workflow(
  blocks: Vec<String>,
  sample_key: Option<String>,
  saved: Option<usize>,
  data_dir: &Path,
) -> Result<(WorkflowDef, Option<String>)> {
  if let Some(key) = sample_key {
    let sample = sample_workflow(&key).with_context(|| format!("unknown sample workflow: {key}"))?;
    return Ok((sample.to_def(), Some(sample.sample_input.to_string())));
  }

  if let Some(index) = saved {
    let workflow = WorkflowStore::new(data_dir).get(index).await?;
    return Ok((workflow, None));
  }

  if blocks.is_empty() {
    return Err(WorkflowError::EmptySelection.into());
  }

  Ok((WorkflowDef::new("Custom Workflow", blocks), None))
}

async fn workflows(action: WorkflowsAction, data_dir: &Path) -> Result<()> {
  let store = WorkflowStore::new(data_dir);

  match action {
    WorkflowsAction::List => {
      let saved = store.list().await?;
      if saved.is_empty() {
        println!("No saved workflows.");
      }
      for (i, workflow) in saved.iter().enumerate() {
        let saved_at = workflow
          .saved_at
          .map(|t| t.format(" (saved %Y-%m-%d %H:%M)").to_string())
          .unwrap_or_default();
        println!(
          "{}. {}: {}{}",
          i + 1,
          workflow.name,
          workflow.blocks.join(" → "),
          saved_at
        );
      }
    }
    WorkflowsAction::Samples => {
      for sample in sample_workflows() {
        println!(
          "{:<24} {}: {}",
          sample.key,
          sample.name,
          sample.blocks.join(" → ")
        );
      }
    }
    WorkflowsAction::Save { name, blocks } => {
      let registry = BlockRegistry::with_builtins();
      if let Some(unknown) = blocks.iter().find(|id| !registry.contains(id)) {
        bail!("Block not found: {unknown}");
      }

      let workflow = store.save(WorkflowDef::new(name, blocks)).await?;
      println!(
        "Saved workflow '{}' to {}",
        workflow.name,
        store.path().display()
      );
    }
  }

  Ok(())
}

/// How `run workflow` prints its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepFormat {
  Steps,
  Json,
  Plain,
}

impl StepFormat {
  fn from_flags(json: bool, plain: bool) -> Self {
    match (json, plain) {
      (true, _) => StepFormat::Json,
      (false, true) => StepFormat::Plain,
      (false, false) => StepFormat::Steps,
    }
  }
}

fn format_steps(steps: &[StepResult], format: StepFormat) -> Result<String> {
  let output = match format {
    StepFormat::Json => serde_json::to_string_pretty(steps)?,
    StepFormat::Plain => render_plain(steps),
    StepFormat::Steps => steps
      .iter()
      .enumerate()
      .map(|(i, step)| {
        let body = match &step.error {
          Some(error) => format!("Error: {error}"),
          None => step.output.clone(),
        };
        format!("== Step {}: {} ==\n{}\n", i + 1, step.block_name, body)
      })
      .collect::<Vec<_>>()
      .join("\n"),
  };
  Ok(output)
}

async fn export_markdown(path: &Path, steps: &[StepResult]) -> Result<()> {
  let markdown = render_markdown(steps, &chrono::Local::now());
  tokio::fs::write(path, markdown)
    .await
    .with_context(|| format!("failed to write export file: {}", path.display()))?;
  eprintln!("Exported results to {}", path.display());
  Ok(())
}

/// Input from `--input`, else stdin.
fn read_input(input: Option<String>) -> Result<String> {
  use std::io::IsTerminal;

  if let Some(input) = input {
    return Ok(input);
  }

  if io::stdin().is_terminal() {
    bail!("no input: pass --input or pipe text on stdin");
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read input from stdin")?;
  Ok(input)
}
