use glam::IVec3;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::block::BlockId;
use crate::chunk::Chunk;
use crate::config::WorldConfig;
use crate::coords::{world_to_chunk, ChunkPos};
use crate::worldgen::WorldGenerator;

/// Sparse, append-only map of generated chunks. Chunks are created the first
/// time anything reads or writes them and are never dropped.
#[derive(Debug)]
pub struct World {
    chunks: FxHashMap<ChunkPos, Chunk>,
    generator: WorldGenerator,
}

impl World {
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        Self::with_generator(WorldGenerator::new(seed, config))
    }

    pub fn with_generator(generator: WorldGenerator) -> Self {
        Self {
            chunks: FxHashMap::default(),
            generator,
        }
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed
    }

    pub fn config(&self) -> WorldConfig {
        self.generator.config()
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Already-generated chunk, without generating it.
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn get_chunk(&mut self, pos: ChunkPos) -> &Chunk {
        self.ensure_chunk(pos)
    }

    pub fn get_block(&mut self, world_pos: IVec3) -> BlockId {
        let (chunk_pos, local) = world_to_chunk(world_pos);
        self.ensure_chunk(chunk_pos).get(local.x, local.y, local.z)
    }

    /// Writes a block and returns the one it replaced. Does not touch any
    /// mesh; callers pair this with a chunk rebuild.
    pub fn set_block(&mut self, world_pos: IVec3, block: BlockId) -> BlockId {
        let (chunk_pos, local) = world_to_chunk(world_pos);
        let chunk = self.ensure_chunk(chunk_pos);
        let previous = chunk.get(local.x, local.y, local.z);
        chunk.set(local.x, local.y, local.z, block);
        previous
    }

    fn ensure_chunk(&mut self, pos: ChunkPos) -> &mut Chunk {
        let generator = &self.generator;
        self.chunks.entry(pos).or_insert_with(|| {
            debug!("Generating chunk {pos:?}");
            generator.generate_chunk(pos)
        })
    }
}
