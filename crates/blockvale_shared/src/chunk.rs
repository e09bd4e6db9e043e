use crate::block::BlockId;
use crate::coords::{local_in_bounds, local_to_index, ChunkPos, LocalPos, CHUNK_VOLUME};

/// One 16x64x16 column of the world. Coordinates passed to `get`/`set` are
/// chunk-local and may be out of range: reads return air, writes are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pos: ChunkPos,
    blocks: Box<[BlockId; CHUNK_VOLUME]>,
}

impl Chunk {
    pub fn new_empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: Box::new([BlockId::AIR; CHUNK_VOLUME]),
        }
    }

    pub fn new_filled(pos: ChunkPos, block: BlockId) -> Self {
        Self {
            pos,
            blocks: Box::new([block; CHUNK_VOLUME]),
        }
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        match local_in_bounds(x, y, z) {
            Some(local) => self.blocks[local_to_index(local)],
            None => BlockId::AIR,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        if let Some(local) = local_in_bounds(x, y, z) {
            self.blocks[local_to_index(local)] = block;
        }
    }

    pub fn get_local(&self, local: LocalPos) -> BlockId {
        self.blocks[local_to_index(local)]
    }

    pub fn blocks(&self) -> &[BlockId] {
        self.blocks.as_slice()
    }

    /// Number of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_air()).count()
    }
}
