use blockvale_shared::{
    block::BlockRegistry,
    coords::{chunk_containing, chunk_of_column, ChunkPos},
    world::World,
};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::renderer::{
    backend::MeshBackend,
    mesh::{build_chunk_mesh, ChunkMesh},
};

pub const DEFAULT_VIEW_DISTANCE: i32 = 2;

pub struct ChunkMeshEntry<H> {
    pub mesh: ChunkMesh,
    pub handle: H,
}

/// Keeps one uploaded mesh per chunk inside the view square around the
/// viewer. Meshes are never evicted; a chunk is only re-meshed on request.
pub struct ChunkManager<B: MeshBackend> {
    backend: B,
    registry: BlockRegistry,
    view_distance: i32,
    meshes: FxHashMap<ChunkPos, ChunkMeshEntry<B::Handle>>,
}

impl<B: MeshBackend> ChunkManager<B> {
    pub fn new(backend: B, registry: BlockRegistry, view_distance: i32) -> Self {
        Self {
            backend,
            registry,
            view_distance: view_distance.max(0),
            meshes: FxHashMap::default(),
        }
    }

    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn meshed_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, pos: ChunkPos) -> Option<&ChunkMesh> {
        self.meshes.get(&pos).map(|entry| &entry.mesh)
    }

    /// Builds a mesh for every chunk in the view square around the viewer
    /// that does not have one yet. Returns how many meshes were built.
    pub fn update(&mut self, world: &mut World, viewer_x: f32, viewer_z: f32) -> usize {
        let center = chunk_containing(viewer_x, viewer_z);

        let mut missing = Vec::new();
        for dx in -self.view_distance..=self.view_distance {
            for dz in -self.view_distance..=self.view_distance {
                let pos = center + ChunkPos::new(dx, dz);
                if !self.meshes.contains_key(&pos) {
                    missing.push(pos);
                }
            }
        }
        sort_chunks_nearest(&mut missing, center);

        for &pos in &missing {
            self.add_chunk_mesh(world, pos);
        }
        if !missing.is_empty() {
            debug!(
                "Meshed {} chunks around {center:?} ({} cached)",
                missing.len(),
                self.meshes.len()
            );
        }
        missing.len()
    }

    /// Re-meshes the chunk owning world column `(world_x, world_z)`, releasing
    /// its previous mesh first. Neighbouring chunks are left untouched.
    pub fn rebuild_chunk_at_world(&mut self, world: &mut World, world_x: i32, world_z: i32) {
        let pos = chunk_of_column(world_x, world_z);
        if let Some(old) = self.meshes.remove(&pos) {
            self.backend.dispose(old.handle);
        }
        debug!("Rebuilding chunk mesh {pos:?}");
        self.add_chunk_mesh(world, pos);
    }

    fn add_chunk_mesh(&mut self, world: &mut World, pos: ChunkPos) {
        let mesh = build_chunk_mesh(world.get_chunk(pos), &self.registry);
        let handle = self.backend.upload(pos, &mesh);
        self.meshes.insert(pos, ChunkMeshEntry { mesh, handle });
    }
}

fn sort_chunks_nearest(chunks: &mut [ChunkPos], center: ChunkPos) {
    chunks.sort_by_key(|pos| {
        let dx = i64::from(pos.x.wrapping_sub(center.x));
        let dz = i64::from(pos.z.wrapping_sub(center.z));
        (dx * dx + dz * dz, pos.x, pos.z)
    });
}
