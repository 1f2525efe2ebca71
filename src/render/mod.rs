//! GPU rendering subsystem.
//!
//! The triangle renderer owns its GPU resources (pipelines, vertex buffers)
//! and issues draw commands via wgpu.
//!
//! Convention: vertices are already in normalized device coordinates; the
//! vertex shader forwards positions unchanged.

mod ctx;
mod triangles;

pub use ctx::{RenderCtx, RenderTarget};
pub use triangles::TriangleRenderer;
