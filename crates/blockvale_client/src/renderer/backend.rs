use std::mem;

use blockvale_shared::coords::ChunkPos;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::mesh::{ChunkMesh, ChunkVertex};

/// Destination for built chunk meshes. Every handle returned by `upload` is
/// passed back to `dispose` exactly once before its chunk is re-uploaded.
pub trait MeshBackend {
    type Handle;

    fn upload(&mut self, chunk_pos: ChunkPos, mesh: &ChunkMesh) -> Self::Handle;
    fn dispose(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshUploadStats {
    pub uploads: u64,
    pub disposals: u64,
    pub uploaded_bytes: u64,
    pub uploaded_triangles: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

#[derive(Debug, Clone, Copy)]
struct HeadlessBuffers {
    chunk_pos: ChunkPos,
    vertex_capacity_bytes: u64,
    index_capacity_bytes: u64,
}

/// Keeps buffer bookkeeping in memory instead of on a GPU. Used by the
/// headless client and by tests that check handle lifetimes.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: FxHashMap<MeshHandle, HeadlessBuffers>,
    stats: MeshUploadStats,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> MeshUploadStats {
        self.stats
    }

    pub fn live_handle_count(&self) -> usize {
        self.live.len()
    }

    /// Bytes held by live buffers, counting their rounded-up capacity.
    pub fn live_buffer_bytes(&self) -> u64 {
        self.live
            .values()
            .map(|buffers| buffers.vertex_capacity_bytes + buffers.index_capacity_bytes)
            .sum()
    }
}

impl MeshBackend for HeadlessBackend {
    type Handle = MeshHandle;

    fn upload(&mut self, chunk_pos: ChunkPos, mesh: &ChunkMesh) -> MeshHandle {
        let vertex_bytes = mesh_vertex_bytes(mesh);
        let index_bytes = mesh_index_bytes(mesh);

        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(
            handle,
            HeadlessBuffers {
                chunk_pos,
                vertex_capacity_bytes: grow_capacity(vertex_bytes),
                index_capacity_bytes: grow_capacity(index_bytes),
            },
        );

        self.stats.uploads += 1;
        self.stats.uploaded_bytes += vertex_bytes + index_bytes;
        self.stats.uploaded_triangles += mesh.triangle_count() as u64;
        handle
    }

    fn dispose(&mut self, handle: MeshHandle) {
        let Some(buffers) = self.live.remove(&handle) else {
            warn!("Disposing unknown mesh handle {handle:?}");
            return;
        };
        debug!("Released mesh buffers of chunk {:?}", buffers.chunk_pos);
        self.stats.disposals += 1;
    }
}

fn mesh_vertex_bytes(mesh: &ChunkMesh) -> u64 {
    (mesh.vertices.len() * mem::size_of::<ChunkVertex>()) as u64
}

fn mesh_index_bytes(mesh: &ChunkMesh) -> u64 {
    bytemuck::cast_slice::<u32, u8>(&mesh.indices).len() as u64
}

fn grow_capacity(required: u64) -> u64 {
    required.max(4).next_power_of_two()
}
