use crate::block::Block;
use crate::builtin::builtin_blocks;
use crate::error::RegistryError;

/// In-memory table of blocks, keyed by id and kept in registration order.
///
/// The registry is built up front and then shared read-only (typically behind
/// an `Arc`) with everything that executes blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
  blocks: Vec<Block>,
}

impl BlockRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a registry pre-populated with the built-in blocks.
  pub fn with_builtins() -> Self {
    Self {
      blocks: builtin_blocks(),
    }
  }

  /// Look up a block by id.
  pub fn get(&self, id: &str) -> Option<&Block> {
    self.blocks.iter().find(|b| b.id == id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.get(id).is_some()
  }

  /// All blocks in registration order. The returned vector is a copy.
  pub fn all(&self) -> Vec<Block> {
    self.blocks.clone()
  }

  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  /// Register a block, replacing any existing block with the same id.
  ///
  /// A replaced block keeps its original position.
  pub fn register(&mut self, block: Block) -> Result<(), RegistryError> {
    let required = [
      ("id", &block.id),
      ("name", &block.name),
      ("description", &block.description),
      ("prompt", &block.prompt_template),
    ];
    if let Some(&(field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
      return Err(RegistryError::InvalidBlock { field });
    }

    match self.blocks.iter_mut().find(|b| b.id == block.id) {
      Some(existing) => *existing = block,
      None => self.blocks.push(block),
    }
    Ok(())
  }

  /// Sample input for a block, or an empty string when the id is unknown.
  pub fn sample_input(&self, id: &str) -> &str {
    self.get(id).map(|b| b.sample_input.as_str()).unwrap_or("")
  }
}
