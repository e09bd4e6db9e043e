use std::fmt;

use noise::{NoiseFn, Perlin};
use tracing::debug;

use crate::block::BlockId;
use crate::chunk::Chunk;
use crate::config::WorldConfig;
use crate::coords::{ChunkPos, CHUNK_SIZE, WORLD_HEIGHT};
use crate::hash::coord_hash;

pub const SEA_LEVEL: i32 = 8;
pub const MIN_COLUMN_HEIGHT: i32 = 2;
pub const MAX_COLUMN_HEIGHT: i32 = WORLD_HEIGHT as i32 - 5;

const HEIGHT_FREQUENCY: f64 = 0.03;
const BIOME_FREQUENCY: f64 = 0.01;
const BIOME_SEED_OFFSET: u64 = 1337;

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
const WORLD_HEIGHT_I32: i32 = WORLD_HEIGHT as i32;

const ORE_SALT: i32 = 555;
const ORE_Y_STRIDE: i32 = 31;
const COAL_BAND: f64 = 0.08;
const IRON_BAND: f64 = COAL_BAND + 0.04;
const DIAMOND_BAND: f64 = IRON_BAND + 0.005;
const IRON_MAX_Y: i32 = 23;
const DIAMOND_MAX_Y: i32 = 10;

const TREE_SALT: i32 = 42;
const TREE_HEIGHT_SALT: i32 = 99;
const TREE_CHANCE: f64 = 0.12;
const CANOPY_REACH: i32 = 2;
const CANOPY_MANHATTAN_LIMIT: i32 = 4;

const DECORATION_SALT: i32 = 999;
const CACTUS_HEIGHT_SALT: i32 = 321;
const CACTUS_CHANCE: f64 = 0.04;
const FLOWER_CHANCE: f64 = 0.08;
const SNOW_LINE_OFFSET: i32 = 6;

const VILLAGE_SALT: i32 = 777;
const VILLAGE_CHANCE: f64 = 0.02;
const VILLAGE_SIZE: i32 = 5;
const VILLAGE_BASE: i32 = CHUNK_SIZE_I32 / 2 - 2;
const VILLAGE_WALL_HEIGHT: i32 = 3;
const VILLAGE_DOOR_HEIGHT: i32 = 2;

/// A 2D noise field sampled in world space. Values are expected in `[-1, 1]`.
pub type NoiseField = Box<dyn NoiseFn<f64, 2> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Biome {
    Ocean,
    Desert,
    Plains,
    Forest,
    Mountains,
}

impl Biome {
    /// Classifies a column from its terrain height and biome noise value.
    pub fn classify(height: i32, biome_value: f64) -> Self {
        if height <= SEA_LEVEL - 2 {
            Biome::Ocean
        } else if biome_value < -0.3 {
            Biome::Desert
        } else if biome_value > 0.4 && biome_value <= 0.75 {
            Biome::Forest
        } else if biome_value > 0.75 {
            Biome::Mountains
        } else {
            Biome::Plains
        }
    }

    pub fn letter(self) -> char {
        match self {
            Biome::Ocean => '~',
            Biome::Desert => 'd',
            Biome::Plains => 'p',
            Biome::Forest => 'f',
            Biome::Mountains => 'M',
        }
    }
}

/// Block placed by a biome's vertical profile at height `y` of a column
/// whose surface is at `height`.
pub fn profile_block(biome: Biome, y: i32, height: i32) -> BlockId {
    match biome {
        Biome::Ocean if y > height - 3 => BlockId::SAND,
        Biome::Desert if y > height - 4 => BlockId::SAND,
        Biome::Plains | Biome::Forest if y == height => BlockId::GRASS,
        Biome::Plains | Biome::Forest if y > height - 3 => BlockId::DIRT,
        Biome::Mountains if y >= height - 1 => BlockId::STONE,
        Biome::Mountains if y > height - 4 => BlockId::DIRT,
        _ => BlockId::STONE,
    }
}

/// Ore replacing a stone cell, given its hash roll. The probability bands are
/// stacked: coal, then iron below y 24, then diamond at or below y 10.
pub fn ore_for_roll(roll: f64, y: i32) -> Option<BlockId> {
    if roll < COAL_BAND {
        Some(BlockId::COAL_ORE)
    } else if y <= IRON_MAX_Y && roll < IRON_BAND {
        Some(BlockId::IRON_ORE)
    } else if y <= DIAMOND_MAX_Y && roll < DIAMOND_BAND {
        Some(BlockId::DIAMOND_ORE)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSample {
    pub height: i32,
    pub biome: Biome,
}

pub struct WorldGenerator {
    pub seed: u64,
    config: WorldConfig,
    height_noise: NoiseField,
    biome_noise: NoiseField,
}

impl fmt::Debug for WorldGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldGenerator")
            .field("seed", &self.seed)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorldGenerator {
    pub fn new(seed: u64, config: WorldConfig) -> Self {
        Self::with_noise(
            seed,
            config,
            Box::new(Perlin::new(seed as u32)),
            Box::new(Perlin::new(seed.wrapping_add(BIOME_SEED_OFFSET) as u32)),
        )
    }

    /// Builds a generator around caller-supplied noise fields.
    pub fn with_noise(
        seed: u64,
        config: WorldConfig,
        height_noise: NoiseField,
        biome_noise: NoiseField,
    ) -> Self {
        Self {
            seed,
            config,
            height_noise,
            biome_noise,
        }
    }

    pub fn config(&self) -> WorldConfig {
        self.config
    }

    pub fn sample_column(&self, world_x: i32, world_z: i32) -> ColumnSample {
        let wx = f64::from(world_x);
        let wz = f64::from(world_z);

        let n = self
            .height_noise
            .get([wx * HEIGHT_FREQUENCY, wz * HEIGHT_FREQUENCY]);
        let raw = (f64::from(self.config.base_height) + n * f64::from(self.config.terrain_amplitude))
            .floor() as i32;
        let height = raw.clamp(MIN_COLUMN_HEIGHT, MAX_COLUMN_HEIGHT);

        let biome_value = self
            .biome_noise
            .get([wx * BIOME_FREQUENCY, wz * BIOME_FREQUENCY]);

        ColumnSample {
            height,
            biome: Biome::classify(height, biome_value),
        }
    }

    /// Whether the chunk at `pos` receives a village hut. Depends only on the
    /// seed and chunk coordinate.
    pub fn has_village(&self, pos: ChunkPos) -> bool {
        coord_hash(self.seed, pos.x, pos.z, VILLAGE_SALT) <= VILLAGE_CHANCE
    }

    pub fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new_empty(pos);
        let origin = pos.world_origin();

        for x in 0..CHUNK_SIZE_I32 {
            for z in 0..CHUNK_SIZE_I32 {
                let world_x = origin.x.wrapping_add(x);
                let world_z = origin.z.wrapping_add(z);
                let column = self.sample_column(world_x, world_z);
                let height = column.height;

                self.fill_column(&mut chunk, x, z, world_x, world_z, column);

                // Every biome fills any gap below sea level with water.
                for y in (height + 1)..=SEA_LEVEL {
                    chunk.set(x, y, z, BlockId::WATER);
                }

                if column.biome == Biome::Forest && height > SEA_LEVEL + 1 {
                    self.maybe_place_tree(&mut chunk, x, z, world_x, world_z, height);
                }

                self.decorate_column(&mut chunk, x, z, world_x, world_z, column);
            }
        }

        if self.has_village(pos) {
            place_village(&mut chunk);
        }

        chunk
    }

    fn fill_column(
        &self,
        chunk: &mut Chunk,
        x: i32,
        z: i32,
        world_x: i32,
        world_z: i32,
        column: ColumnSample,
    ) {
        for y in 0..=column.height {
            let mut block = profile_block(column.biome, y, column.height);
            if block == BlockId::STONE {
                let roll = coord_hash(
                    self.seed,
                    world_x.wrapping_add(y * ORE_Y_STRIDE),
                    world_z,
                    ORE_SALT,
                );
                if let Some(ore) = ore_for_roll(roll, y) {
                    block = ore;
                }
            }
            chunk.set(x, y, z, block);
        }
    }

    fn maybe_place_tree(
        &self,
        chunk: &mut Chunk,
        x: i32,
        z: i32,
        world_x: i32,
        world_z: i32,
        ground_y: i32,
    ) {
        if coord_hash(self.seed, world_x, world_z, TREE_SALT) > TREE_CHANCE {
            return;
        }

        let trunk_height =
            3 + (coord_hash(self.seed, world_x, world_z, TREE_HEIGHT_SALT) * 2.0).floor() as i32;
        for dy in 1..=trunk_height {
            chunk.set(x, ground_y + dy, z, BlockId::LOG);
        }

        let top_y = ground_y + trunk_height;
        for dx in -CANOPY_REACH..=CANOPY_REACH {
            for dy in -CANOPY_REACH..=CANOPY_REACH {
                for dz in -CANOPY_REACH..=CANOPY_REACH {
                    if dx.abs() + dy.abs() + dz.abs() > CANOPY_MANHATTAN_LIMIT {
                        continue;
                    }
                    let (lx, ly, lz) = (x + dx, top_y + dy, z + dz);
                    if ly <= ground_y + 1 {
                        continue;
                    }
                    if chunk.get(lx, ly, lz).is_air() {
                        chunk.set(lx, ly, lz, BlockId::LEAVES);
                    }
                }
            }
        }
    }

    fn decorate_column(
        &self,
        chunk: &mut Chunk,
        x: i32,
        z: i32,
        world_x: i32,
        world_z: i32,
        column: ColumnSample,
    ) {
        let ground_y = column.height;
        let top = chunk.get(x, ground_y, z);
        let roll = coord_hash(self.seed, world_x, world_z, DECORATION_SALT);

        match column.biome {
            Biome::Desert
                if top == BlockId::SAND && ground_y >= SEA_LEVEL - 1 && roll < CACTUS_CHANCE =>
            {
                let cactus_height = 2
                    + (coord_hash(self.seed, world_x, world_z, CACTUS_HEIGHT_SALT) * 2.0).floor()
                        as i32;
                for dy in 1..=cactus_height {
                    let y = ground_y + dy;
                    if y >= WORLD_HEIGHT_I32 {
                        break;
                    }
                    if chunk.get(x, y, z).is_air() {
                        chunk.set(x, y, z, BlockId::CACTUS);
                    }
                }
            }
            Biome::Plains if top == BlockId::GRASS && roll < FLOWER_CHANCE => {
                if chunk.get(x, ground_y + 1, z).is_air() {
                    chunk.set(x, ground_y + 1, z, BlockId::FLOWER);
                }
            }
            Biome::Mountains if ground_y > SEA_LEVEL + SNOW_LINE_OFFSET => {
                if matches!(top, BlockId::STONE | BlockId::DIRT | BlockId::GRASS) {
                    chunk.set(x, ground_y, z, BlockId::SNOW);
                }
            }
            _ => {}
        }
    }
}

/// Stamps a plank hut with a loot chest near the middle of the chunk,
/// resting on the highest non-water block of the centre column.
fn place_village(chunk: &mut Chunk) {
    let base_x = VILLAGE_BASE;
    let base_z = VILLAGE_BASE;
    let centre_x = base_x + 2;
    let centre_z = base_z + 2;

    let ground_y = (0..WORLD_HEIGHT_I32)
        .rev()
        .find(|&y| {
            let block = chunk.get(centre_x, y, centre_z);
            !block.is_air() && block != BlockId::WATER
        })
        .unwrap_or(0);
    let floor_y = ground_y + 1;

    for x in 0..VILLAGE_SIZE {
        for z in 0..VILLAGE_SIZE {
            chunk.set(base_x + x, floor_y, base_z + z, BlockId::PLANKS);
        }
    }

    let last = VILLAGE_SIZE - 1;
    for y in 1..=VILLAGE_WALL_HEIGHT {
        for x in 0..VILLAGE_SIZE {
            for z in 0..VILLAGE_SIZE {
                let is_edge = x == 0 || x == last || z == 0 || z == last;
                if !is_edge {
                    continue;
                }
                let is_door = x == 0 && z == 2 && y <= VILLAGE_DOOR_HEIGHT;
                if is_door {
                    continue;
                }
                chunk.set(base_x + x, floor_y + y, base_z + z, BlockId::PLANKS);
            }
        }
    }

    let roof_y = floor_y + VILLAGE_WALL_HEIGHT + 1;
    for x in -1..=VILLAGE_SIZE {
        for z in -1..=VILLAGE_SIZE {
            chunk.set(base_x + x, roof_y, base_z + z, BlockId::PLANKS);
        }
    }

    chunk.set(base_x + 2, floor_y + 1, base_z + 3, BlockId::CHEST);
    debug!(
        "Placed village in chunk {:?} at floor y={floor_y}",
        chunk.pos()
    );
}

#[cfg(test)]
mod tests {
    use noise::Constant;

    use super::{
        ore_for_roll, profile_block, Biome, WorldGenerator, SEA_LEVEL, VILLAGE_BASE,
    };
    use crate::block::BlockId;
    use crate::chunk::Chunk;
    use crate::config::WorldConfig;
    use crate::coords::{ChunkPos, CHUNK_SIZE, WORLD_HEIGHT};

    fn flat_generator(seed: u64, config: WorldConfig, height: f64, biome: f64) -> WorldGenerator {
        WorldGenerator::with_noise(
            seed,
            config,
            Box::new(Constant::new(height)),
            Box::new(Constant::new(biome)),
        )
    }

    fn village_free_chunk(generator: &WorldGenerator) -> ChunkPos {
        (0..64)
            .map(|x| ChunkPos::new(x, 0))
            .find(|pos| !generator.has_village(*pos))
            .expect("at least one chunk without a village")
    }

    fn village_chunk(generator: &WorldGenerator) -> ChunkPos {
        (-200..200)
            .flat_map(|x| (-50..50).map(move |z| ChunkPos::new(x, z)))
            .find(|pos| generator.has_village(*pos))
            .expect("a 2% gate fires somewhere in 40k chunks")
    }

    fn columns() -> impl Iterator<Item = (i32, i32)> {
        (0..CHUNK_SIZE as i32).flat_map(|x| (0..CHUNK_SIZE as i32).map(move |z| (x, z)))
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = WorldGenerator::new(1234, WorldConfig::default());
        let b = WorldGenerator::new(1234, WorldConfig::default());
        for pos in [ChunkPos::new(0, 0), ChunkPos::new(-3, 7), ChunkPos::new(40, -12)] {
            assert_eq!(a.generate_chunk(pos), b.generate_chunk(pos));
        }
    }

    #[test]
    fn different_seeds_produce_different_terrain() {
        let a = WorldGenerator::new(1, WorldConfig::default());
        let b = WorldGenerator::new(2, WorldConfig::default());
        let pos = ChunkPos::new(0, 0);
        assert_ne!(a.generate_chunk(pos), b.generate_chunk(pos));
    }

    #[test]
    fn biome_classification_thresholds() {
        assert_eq!(Biome::classify(SEA_LEVEL - 2, 0.9), Biome::Ocean);
        assert_eq!(Biome::classify(SEA_LEVEL - 1, -0.31), Biome::Desert);
        assert_eq!(Biome::classify(20, -0.3), Biome::Plains);
        assert_eq!(Biome::classify(20, 0.4), Biome::Plains);
        assert_eq!(Biome::classify(20, 0.41), Biome::Forest);
        assert_eq!(Biome::classify(20, 0.75), Biome::Forest);
        assert_eq!(Biome::classify(20, 0.76), Biome::Mountains);
    }

    #[test]
    fn profiles_layer_surface_subsurface_and_core() {
        assert_eq!(profile_block(Biome::Plains, 10, 10), BlockId::GRASS);
        assert_eq!(profile_block(Biome::Plains, 8, 10), BlockId::DIRT);
        assert_eq!(profile_block(Biome::Plains, 7, 10), BlockId::STONE);
        assert_eq!(profile_block(Biome::Desert, 7, 10), BlockId::SAND);
        assert_eq!(profile_block(Biome::Desert, 6, 10), BlockId::STONE);
        assert_eq!(profile_block(Biome::Ocean, 3, 5), BlockId::SAND);
        assert_eq!(profile_block(Biome::Ocean, 2, 5), BlockId::STONE);
        assert_eq!(profile_block(Biome::Mountains, 20, 20), BlockId::STONE);
        assert_eq!(profile_block(Biome::Mountains, 19, 20), BlockId::STONE);
        assert_eq!(profile_block(Biome::Mountains, 18, 20), BlockId::DIRT);
        assert_eq!(profile_block(Biome::Mountains, 17, 20), BlockId::DIRT);
        assert_eq!(profile_block(Biome::Mountains, 16, 20), BlockId::STONE);
    }

    #[test]
    fn ore_bands_respect_depth_limits() {
        assert_eq!(ore_for_roll(0.05, 30), Some(BlockId::COAL_ORE));
        assert_eq!(ore_for_roll(0.10, 30), None);
        assert_eq!(ore_for_roll(0.121, 30), None);

        assert_eq!(ore_for_roll(0.10, 23), Some(BlockId::IRON_ORE));
        assert_eq!(ore_for_roll(0.10, 24), None);
        assert_eq!(ore_for_roll(0.122, 10), Some(BlockId::DIAMOND_ORE));
        assert_eq!(ore_for_roll(0.122, 11), None);
        assert_eq!(ore_for_roll(0.125, 5), None);
        assert_eq!(ore_for_roll(0.05, 5), Some(BlockId::COAL_ORE));
    }

    #[test]
    fn deep_mountain_stone_above_y24_only_holds_coal() {
        let config = WorldConfig {
            base_height: 40,
            terrain_amplitude: 0,
        };
        let generator = flat_generator(99, config, 0.0, 0.9);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        let mut coal_seen = false;
        for (x, z) in columns() {
            for y in 24..=40 {
                let block = chunk.get(x, y, z);
                assert_ne!(block, BlockId::IRON_ORE, "iron at y={y}");
                assert_ne!(block, BlockId::DIAMOND_ORE, "diamond at y={y}");
                coal_seen |= block == BlockId::COAL_ORE;
            }
        }
        assert!(coal_seen);
    }

    #[test]
    fn flat_plains_have_grass_caps_and_no_water() {
        let generator = flat_generator(5, WorldConfig::default(), 0.0, 0.0);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        for (x, z) in columns() {
            assert_eq!(chunk.get(x, 8, z), BlockId::GRASS);
            assert_eq!(chunk.get(x, 7, z), BlockId::DIRT);
            assert_eq!(chunk.get(x, 6, z), BlockId::DIRT);
            assert!(matches!(chunk.get(x, 9, z), BlockId::AIR | BlockId::FLOWER));
            assert_eq!(chunk.get(x, 10, z), BlockId::AIR);
        }
        assert!(chunk.blocks().iter().all(|block| *block != BlockId::WATER));
    }

    #[test]
    fn oceans_are_sand_floored_and_filled_to_sea_level() {
        let generator = flat_generator(5, WorldConfig::default(), -1.0, 0.0);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        for (x, z) in columns() {
            for y in 0..=2 {
                assert_eq!(chunk.get(x, y, z), BlockId::SAND);
            }
            for y in 3..=SEA_LEVEL {
                assert_eq!(chunk.get(x, y, z), BlockId::WATER);
            }
            assert_eq!(chunk.get(x, SEA_LEVEL + 1, z), BlockId::AIR);
        }
    }

    #[test]
    fn low_land_fills_the_gap_up_to_sea_level() {
        let config = WorldConfig {
            base_height: 7,
            terrain_amplitude: 0,
        };
        let generator = flat_generator(5, config, 0.0, 0.0);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        for (x, z) in columns() {
            assert_eq!(chunk.get(x, 7, z), BlockId::GRASS);
            assert_eq!(chunk.get(x, 8, z), BlockId::WATER);
        }
    }

    #[test]
    fn deserts_grow_short_cacti_on_sand() {
        let generator = flat_generator(17, WorldConfig::default(), 0.5, -0.5);

        let mut cacti = 0;
        for cx in 0..8 {
            let chunk = generator.generate_chunk(ChunkPos::new(cx, 0));
            for (x, z) in columns() {
                assert_eq!(chunk.get(x, 11, z), BlockId::SAND);
                assert_eq!(chunk.get(x, 8, z), BlockId::SAND);
                if chunk.get(x, 12, z) == BlockId::CACTUS {
                    cacti += 1;
                    assert_eq!(chunk.get(x, 13, z), BlockId::CACTUS);
                    assert_ne!(chunk.get(x, 15, z), BlockId::CACTUS);
                }
            }
        }
        assert!(cacti > 0, "expected at least one cactus in eight desert chunks");
    }

    #[test]
    fn forests_grow_trees_with_leaf_canopies() {
        let generator = flat_generator(23, WorldConfig::default(), 1.0, 0.5);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        let mut trees = 0;
        for (x, z) in columns() {
            assert_eq!(chunk.get(x, 14, z), BlockId::GRASS);
            if chunk.get(x, 15, z) == BlockId::LOG {
                trees += 1;
                assert_eq!(chunk.get(x, 16, z), BlockId::LOG);
                assert_eq!(chunk.get(x, 17, z), BlockId::LOG);
                assert_ne!(chunk.get(x, 16, z), BlockId::LEAVES);
            }
        }
        assert!(trees > 0);
        assert!(chunk.blocks().iter().any(|block| *block == BlockId::LEAVES));
        // Leaves never hang at trunk-base height.
        for (x, z) in columns() {
            assert_ne!(chunk.get(x, 15, z), BlockId::LEAVES);
        }
    }

    #[test]
    fn high_mountains_are_capped_with_snow() {
        let config = WorldConfig {
            base_height: 20,
            terrain_amplitude: 0,
        };
        let generator = flat_generator(31, config, 0.0, 0.9);
        let chunk = generator.generate_chunk(village_free_chunk(&generator));

        for (x, z) in columns() {
            let top = chunk.get(x, 20, z);
            assert!(
                matches!(top, BlockId::SNOW | BlockId::COAL_ORE | BlockId::IRON_ORE),
                "unexpected mountain cap {top:?}"
            );
            assert_eq!(chunk.get(x, 18, z), BlockId::DIRT);
        }
    }

    #[test]
    fn column_heights_are_clamped() {
        let tall = WorldConfig {
            base_height: 500,
            terrain_amplitude: 6,
        };
        let generator = flat_generator(1, tall, 0.0, 0.0);
        assert_eq!(generator.sample_column(0, 0).height, WORLD_HEIGHT as i32 - 5);

        let negative = WorldConfig {
            base_height: 8,
            terrain_amplitude: -100,
        };
        let generator = flat_generator(1, negative, 1.0, 0.0);
        assert_eq!(generator.sample_column(0, 0).height, 2);
        assert_eq!(generator.sample_column(0, 0).biome, Biome::Ocean);
    }

    #[test]
    fn village_gate_is_a_pure_function_of_seed_and_position() {
        let a = WorldGenerator::new(77, WorldConfig::default());
        let b = WorldGenerator::new(77, WorldConfig::default());
        let pos = village_chunk(&a);
        assert!(b.has_village(pos));
        for x in -20..20 {
            let pos = ChunkPos::new(x, 3);
            assert_eq!(a.has_village(pos), b.has_village(pos));
        }
    }

    #[test]
    fn village_hut_is_built_on_the_ground_with_one_chest() {
        // Low forest: no trees below SEA_LEVEL + 2 and no flowers outside plains.
        let generator = flat_generator(3, WorldConfig::default(), 0.0, 0.5);
        let pos = village_chunk(&generator);
        let chunk = generator.generate_chunk(pos);

        let floor_y = 9;
        let base = VILLAGE_BASE;
        for x in 0..5 {
            for z in 0..5 {
                assert_eq!(chunk.get(base + x, floor_y, base + z), BlockId::PLANKS);
            }
        }
        // Door gap on the -x wall.
        assert_eq!(chunk.get(base, floor_y + 1, base + 2), BlockId::AIR);
        assert_eq!(chunk.get(base, floor_y + 2, base + 2), BlockId::AIR);
        assert_eq!(chunk.get(base, floor_y + 3, base + 2), BlockId::PLANKS);
        // Roof overhangs by one block.
        assert_eq!(chunk.get(base - 1, floor_y + 4, base - 1), BlockId::PLANKS);
        assert_eq!(chunk.get(base + 5, floor_y + 4, base + 5), BlockId::PLANKS);

        let chests = chunk
            .blocks()
            .iter()
            .filter(|block| **block == BlockId::CHEST)
            .count();
        assert_eq!(chests, 1);
        assert_eq!(chunk.get(base + 2, floor_y + 1, base + 3), BlockId::CHEST);
    }

    #[test]
    fn village_free_chunks_have_no_chest() {
        let generator = flat_generator(3, WorldConfig::default(), 0.0, 0.0);
        let chunk: Chunk = generator.generate_chunk(village_free_chunk(&generator));
        assert!(chunk.blocks().iter().all(|block| *block != BlockId::CHEST));
    }
}
