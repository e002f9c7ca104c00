//! Schema lookup for the resource validator.

use crate::error::ReadError;
use crate::types::MetadataBlock;
use indexmap::IndexMap;

/// Supplies metadata block schemas by name.
///
/// Implementations backed by a remote repository do their I/O here, before the
/// validation pass proper starts; the validators themselves never wait.
pub trait MetadataBlockProvider {
    /// Returns the named block, or a [`ReadError`] if it is unknown.
    fn get_metadata_block_by_name(&self, name: &str) -> Result<MetadataBlock, ReadError>;
}

impl MetadataBlockProvider for [MetadataBlock] {
    fn get_metadata_block_by_name(&self, name: &str) -> Result<MetadataBlock, ReadError> {
        self.iter()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| ReadError::block_not_found(name))
    }
}

impl MetadataBlockProvider for Vec<MetadataBlock> {
    fn get_metadata_block_by_name(&self, name: &str) -> Result<MetadataBlock, ReadError> {
        self.as_slice().get_metadata_block_by_name(name)
    }
}

impl<P: MetadataBlockProvider + ?Sized> MetadataBlockProvider for &P {
    fn get_metadata_block_by_name(&self, name: &str) -> Result<MetadataBlock, ReadError> {
        (**self).get_metadata_block_by_name(name)
    }
}

/// In-memory block store keyed by block name.
#[derive(Clone, Debug, Default)]
pub struct MetadataBlockRegistry {
    blocks: IndexMap<String, MetadataBlock>,
}

impl MetadataBlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks<I: IntoIterator<Item = MetadataBlock>>(blocks: I) -> Self {
        let mut registry = Self::new();
        for block in blocks {
            registry.insert(block);
        }
        registry
    }

    /// Adds a block, returning the one it replaced, if any.
    pub fn insert(&mut self, block: MetadataBlock) -> Option<MetadataBlock> {
        self.blocks.insert(block.name.clone(), block)
    }

    pub fn get(&self, name: &str) -> Option<&MetadataBlock> {
        self.blocks.get(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }
}

impl MetadataBlockProvider for MetadataBlockRegistry {
    fn get_metadata_block_by_name(&self, name: &str) -> Result<MetadataBlock, ReadError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ReadError::block_not_found(name))
    }
}
