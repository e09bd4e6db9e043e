pub mod backend;
pub mod mesh;
