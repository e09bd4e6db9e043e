use bytemuck::{Pod, Zeroable};
use blockvale_shared::{
    block::{BlockRegistry, FaceKind},
    chunk::Chunk,
    coords::{ChunkPos, CHUNK_SIZE, WORLD_HEIGHT},
};

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
const WORLD_HEIGHT_I32: i32 = WORLD_HEIGHT as i32;
const ATLAS_COLS: u8 = 4;
const ATLAS_ROWS: u8 = 4;
const TILE_SIZE_U: f32 = 1.0 / ATLAS_COLS as f32;
const TILE_SIZE_V: f32 = 1.0 / ATLAS_ROWS as f32;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}
const _: [(); 32] = [(); std::mem::size_of::<ChunkVertex>()];

/// Indexed triangle list for one chunk. Positions are chunk-local; `origin`
/// is where the chunk's (0, 0, 0) corner sits in world space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub chunk_pos: ChunkPos,
    pub origin: [f32; 3],
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Copy, Clone)]
struct FaceSpec {
    dir: [i32; 3],
    normal: [f32; 3],
    corners: [[f32; 3]; 4],
    kind: FaceKind,
}

const FACE_SPECS: [FaceSpec; 6] = [
    // +X
    FaceSpec {
        dir: [1, 0, 0],
        normal: [1.0, 0.0, 0.0],
        corners: [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
        kind: FaceKind::Side,
    },
    // -X
    FaceSpec {
        dir: [-1, 0, 0],
        normal: [-1.0, 0.0, 0.0],
        corners: [
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
        kind: FaceKind::Side,
    },
    // +Y
    FaceSpec {
        dir: [0, 1, 0],
        normal: [0.0, 1.0, 0.0],
        corners: [
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        kind: FaceKind::Top,
    },
    // -Y
    FaceSpec {
        dir: [0, -1, 0],
        normal: [0.0, -1.0, 0.0],
        corners: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        kind: FaceKind::Bottom,
    },
    // +Z
    FaceSpec {
        dir: [0, 0, 1],
        normal: [0.0, 0.0, 1.0],
        corners: [
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        kind: FaceKind::Side,
    },
    // -Z
    FaceSpec {
        dir: [0, 0, -1],
        normal: [0.0, 0.0, -1.0],
        corners: [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ],
        kind: FaceKind::Side,
    },
];

/// Emits one quad per solid face whose neighbour is air. Neighbours are read
/// through `chunk` only, so faces on the chunk border are always emitted.
pub fn build_chunk_mesh(chunk: &Chunk, registry: &BlockRegistry) -> ChunkMesh {
    let origin = chunk.pos().world_origin();
    let mut mesh = ChunkMesh {
        chunk_pos: chunk.pos(),
        origin: [origin.x as f32, origin.y as f32, origin.z as f32],
        ..ChunkMesh::default()
    };

    for x in 0..CHUNK_SIZE_I32 {
        for y in 0..WORLD_HEIGHT_I32 {
            for z in 0..CHUNK_SIZE_I32 {
                let block = chunk.get(x, y, z);
                if block.is_air() {
                    continue;
                }

                for face in &FACE_SPECS {
                    let [dx, dy, dz] = face.dir;
                    if !chunk.get(x + dx, y + dy, z + dz).is_air() {
                        continue;
                    }

                    let base = [x as f32, y as f32, z as f32];
                    let positions = face.corners.map(|corner| {
                        [
                            base[0] + corner[0],
                            base[1] + corner[1],
                            base[2] + corner[2],
                        ]
                    });
                    let tile = registry.tile_for(block, face.kind);
                    push_quad(&mut mesh, positions, face.normal, tile_uvs(tile));
                }
            }
        }
    }

    mesh
}

/// Corner UVs of an atlas tile in face-corner order.
fn tile_uvs(tile: u8) -> [[f32; 2]; 4] {
    let tile_x = f32::from(tile % ATLAS_COLS);
    let tile_y = f32::from(tile / ATLAS_COLS);
    let u0 = tile_x * TILE_SIZE_U;
    let v0 = tile_y * TILE_SIZE_V;
    let u1 = u0 + TILE_SIZE_U;
    let v1 = v0 + TILE_SIZE_V;
    [[u0, v1], [u1, v1], [u1, v0], [u0, v0]]
}

fn push_quad(
    mesh: &mut ChunkMesh,
    positions: [[f32; 3]; 4],
    normal: [f32; 3],
    tex_coords: [[f32; 2]; 4],
) {
    let base_index = mesh.vertices.len() as u32;
    for i in 0..4 {
        mesh.vertices.push(ChunkVertex {
            position: positions[i],
            normal,
            tex_coord: tex_coords[i],
        });
    }
    mesh.indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);
}
