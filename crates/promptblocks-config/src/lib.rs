//! Promptblocks Config
//!
//! Serializable configuration for promptblocks:
//! - [`Settings`] for the completion service and input limits, loaded from
//!   an optional JSON file with every field defaulted
//! - [`CredentialSource`] implementations that supply the API key
//! - [`WorkflowDef`], the named block list a user can run, save and reload
//! - [`WorkflowStore`], the JSON file that holds saved workflows

mod credentials;
mod error;
mod settings;
mod store;
mod workflow;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::ConfigError;
pub use settings::{CompletionSettings, CredentialSettings, InputSettings, Settings};
pub use store::WorkflowStore;
pub use workflow::{SampleWorkflow, WorkflowDef, sample_workflow, sample_workflows};
