pub mod backend;
pub mod passes;
pub mod renderer;
pub mod settings;
pub mod shaders;
