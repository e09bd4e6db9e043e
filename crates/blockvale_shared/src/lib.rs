pub mod block;
pub mod chunk;
pub mod config;
pub mod coords;
pub mod hash;
pub mod world;
pub mod worldgen;
