//! WebGPU rendering module
//!
//! Ray-marches the 3D scene with SDFs in the fragment shader.

pub mod sdf_pipeline;

pub use sdf_pipeline::SceneRenderState;
