use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered list of block ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  pub name: String,
  /// Block ids, executed in this order.
  pub blocks: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub saved_at: Option<DateTime<Utc>>,
}

impl WorkflowDef {
  pub fn new(name: impl Into<String>, blocks: Vec<String>) -> Self {
    Self {
      name: name.into(),
      blocks,
      saved_at: None,
    }
  }
}

/// A ready-made workflow with example input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWorkflow {
  /// Lookup key, e.g. `content-pipeline`.
  pub key: &'static str,
  pub name: &'static str,
  pub blocks: &'static [&'static str],
  pub sample_input: &'static str,
}

impl SampleWorkflow {
  pub fn to_def(&self) -> WorkflowDef {
    WorkflowDef::new(
      self.name,
      self.blocks.iter().map(|b| b.to_string()).collect(),
    )
  }
}

static SAMPLE_WORKFLOWS: [SampleWorkflow; 4] = [
  SampleWorkflow {
    key: "content-pipeline",
    name: "Content Pipeline",
    blocks: &["summarizeText", "extractKeyPoints"],
    sample_input: "Artificial intelligence has transformed the way we interact with technology in our daily lives. From voice assistants like Siri and Alexa to recommendation systems on Netflix and Spotify, AI is everywhere. Machine learning algorithms analyze vast amounts of data to identify patterns and make predictions, enabling personalized experiences for users. Natural language processing allows computers to understand and generate human language, making chatbots and virtual assistants more conversational and helpful.",
  },
  SampleWorkflow {
    key: "communication-pipeline",
    name: "Communication Pipeline",
    blocks: &["improveWritingQuality", "rewriteAsEmail"],
    sample_input: "The company are planning to launch there new product next month but their still working on final testing. Its been a long development process with many challenge but the team is very excited about the results.",
  },
  SampleWorkflow {
    key: "multilingual-workflow",
    name: "Multilingual Workflow",
    blocks: &["summarizeText", "translateText"],
    sample_input: "Welcome to our platform! We are excited to have you here. Our mission is to make technology accessible to everyone. Whether you are a beginner or an expert, we have tools and resources to help you succeed. Please explore our features and let us know if you have any questions.",
  },
  SampleWorkflow {
    key: "data-extraction",
    name: "Data Extraction",
    blocks: &["extractKeyPoints", "convertToTable"],
    sample_input: "In our quarterly meeting, we discussed several important topics. First, the sales team reported a 15% increase in revenue compared to last quarter. Second, the product team announced the upcoming launch of three new features. Third, we reviewed the customer satisfaction scores which showed improvement in support response times.",
  },
];

/// All built-in sample workflows.
pub fn sample_workflows() -> &'static [SampleWorkflow] {
  &SAMPLE_WORKFLOWS
}

/// Look up a sample workflow by key.
pub fn sample_workflow(key: &str) -> Option<&'static SampleWorkflow> {
  SAMPLE_WORKFLOWS.iter().find(|w| w.key == key)
}
