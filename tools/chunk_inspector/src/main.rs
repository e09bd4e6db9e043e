use std::env;

use blockvale_shared::block::BlockId;
use blockvale_shared::config::WorldConfig;
use blockvale_shared::coords::{ChunkPos, CHUNK_SIZE};
use blockvale_shared::hash::parse_seed;
use blockvale_shared::worldgen::WorldGenerator;

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
const USAGE: &str =
    "Usage: chunk_inspector [--base-height <n>] [--amplitude <n>] <seed> <cx> <cz>";

#[derive(Debug, PartialEq)]
struct InspectArgs {
    seed: u64,
    pos: ChunkPos,
    config: WorldConfig,
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    run(&args);
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<InspectArgs, String> {
    let mut config = WorldConfig::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-height" => config.base_height = flag_value(&arg, args.next())?,
            "--amplitude" => config.terrain_amplitude = flag_value(&arg, args.next())?,
            _ => positional.push(arg),
        }
    }

    let [seed, cx, cz] = positional.as_slice() else {
        return Err(format!("expected 3 positional arguments, got {}", positional.len()));
    };
    let pos = match (cx.parse::<i32>(), cz.parse::<i32>()) {
        (Ok(x), Ok(z)) => ChunkPos::new(x, z),
        _ => return Err(format!("chunk coordinates must be integers, got '{cx}' '{cz}'")),
    };

    Ok(InspectArgs {
        seed: parse_seed(seed),
        pos,
        config,
    })
}

fn flag_value(flag: &str, value: Option<String>) -> Result<i32, String> {
    let Some(value) = value else {
        return Err(format!("{flag} expects an integer argument"));
    };
    value
        .parse::<i32>()
        .map_err(|err| format!("invalid {flag} value '{value}': {err}"))
}

fn run(args: &InspectArgs) {
    let InspectArgs { seed, pos, config } = *args;
    let generator = WorldGenerator::new(seed, config);
    let origin = pos.world_origin();

    println!("Seed: {seed}");
    println!(
        "Terrain: base height {}, amplitude {}",
        config.base_height, config.terrain_amplitude
    );
    println!("Chunk: ({}, {}) at world ({}, {})", pos.x, pos.z, origin.x, origin.z);
    println!("Village: {}", if generator.has_village(pos) { "yes" } else { "no" });
    println!();

    // One row per z, one "height+biome" cell per x.
    for z in 0..CHUNK_SIZE_I32 {
        let row: Vec<String> = (0..CHUNK_SIZE_I32)
            .map(|x| {
                let column =
                    generator.sample_column(origin.x.wrapping_add(x), origin.z.wrapping_add(z));
                format!("{:>2}{}", column.height, column.biome.letter())
            })
            .collect();
        println!("{}", row.join(" "));
    }

    let chunk = generator.generate_chunk(pos);

    let mut counts = [0usize; 256];
    for block in chunk.blocks() {
        counts[usize::from(block.0)] += 1;
    }
    println!();
    println!("Solid cells: {}", chunk.solid_count());
    for (label, id) in [
        ("water", BlockId::WATER),
        ("coal", BlockId::COAL_ORE),
        ("iron", BlockId::IRON_ORE),
        ("diamond", BlockId::DIAMOND_ORE),
        ("logs", BlockId::LOG),
        ("cactus", BlockId::CACTUS),
        ("flowers", BlockId::FLOWER),
        ("snow", BlockId::SNOW),
        ("chests", BlockId::CHEST),
    ] {
        println!("  {label:<8} {}", counts[usize::from(id.0)]);
    }
}
