//! Block registry for promptblocks.
//!
//! A [`Block`] is a named text transformation: a system instruction that is
//! sent alongside the user's text to a completion model. The
//! [`BlockRegistry`] owns the table of known blocks and is handed to the
//! invoker and workflow engine explicitly.

mod block;
mod builtin;
mod error;
mod registry;

pub use block::Block;
pub use builtin::builtin_blocks;
pub use error::RegistryError;
pub use registry::BlockRegistry;
