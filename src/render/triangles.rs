use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{RenderCtx, RenderTarget};

/// The two hardcoded triangles.
///
/// One WGSL module provides the shared vertex stage and two fragment stages
/// (solid green, solid red); each triangle gets its own pipeline and vertex
/// buffer. Resources are created lazily on first use, keyed on the surface
/// format, and never touched again afterwards.
#[derive(Default)]
pub struct TriangleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline_left: Option<wgpu::RenderPipeline>,
    pipeline_right: Option<wgpu::RenderPipeline>,

    vbo_left: Option<wgpu::Buffer>,
    vbo_right: Option<wgpu::Buffer>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one render pass drawing both triangles into `target`.
    ///
    /// The pass loads the existing surface contents (the clear happens in an
    /// earlier pass) and issues exactly two draw calls: left/green first,
    /// right/red second.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipelines(ctx);
        self.ensure_vertex_buffers(ctx);

        let Some(pipeline_left) = self.pipeline_left.as_ref() else { return };
        let Some(pipeline_right) = self.pipeline_right.as_ref() else { return };
        let Some(vbo_left) = self.vbo_left.as_ref() else { return };
        let Some(vbo_right) = self.vbo_right.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("two-triangles pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline_left);
        rpass.set_vertex_buffer(0, vbo_left.slice(..));
        rpass.draw(0..3, 0..1);

        rpass.set_pipeline(pipeline_right);
        rpass.set_vertex_buffer(0, vbo_right.slice(..));
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.pipeline_left.is_some()
            && self.pipeline_right.is_some()
        {
            return;
        }

        let shader_src = include_str!("shaders/triangles.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("two-triangles shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("two-triangles pipeline layout"),
                    bind_group_layouts: &[],
                    immediate_size: 0,
                });

        let build = |label: &str, fs_entry: &str| {
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(label),
                    layout: Some(&pipeline_layout),

                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[TriangleVertex::layout()],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some(fs_entry),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),

                    multiview_mask: None,
                    cache: None,
                })
        };

        self.pipeline_left = Some(build("two-triangles left pipeline", "fs_left"));
        self.pipeline_right = Some(build("two-triangles right pipeline", "fs_right"));
        self.pipeline_format = Some(ctx.surface_format);
    }

    fn ensure_vertex_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo_left.is_some() && self.vbo_right.is_some() {
            return;
        }

        self.vbo_left = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("two-triangles left vbo"),
                contents: bytemuck::cast_slice(&LEFT_TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.vbo_right = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("two-triangles right vbo"),
                contents: bytemuck::cast_slice(&RIGHT_TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct TriangleVertex {
    pos: [f32; 3],
}

impl TriangleVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TriangleVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const LEFT_TRIANGLE: [TriangleVertex; 3] = [
    TriangleVertex { pos: [-0.9, -0.5, 0.0] },
    TriangleVertex { pos: [0.0, -0.5, 0.0] },
    TriangleVertex { pos: [-0.45, 0.5, 0.0] },
];

const RIGHT_TRIANGLE: [TriangleVertex; 3] = [
    TriangleVertex { pos: [0.0, -0.5, 0.0] },
    TriangleVertex { pos: [0.9, -0.5, 0.0] },
    TriangleVertex { pos: [0.45, 0.5, 0.0] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_matches_three_floats() {
        let layout = TriangleVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(
            layout.attributes[0].format,
            wgpu::VertexFormat::Float32x3
        );
    }

    #[test]
    fn triangles_sit_on_opposite_halves() {
        // Left triangle stays in x <= 0, right triangle in x >= 0.
        assert!(LEFT_TRIANGLE.iter().all(|v| v.pos[0] <= 0.0));
        assert!(RIGHT_TRIANGLE.iter().all(|v| v.pos[0] >= 0.0));
    }

    #[test]
    fn triangles_are_flat_in_z() {
        for v in LEFT_TRIANGLE.iter().chain(RIGHT_TRIANGLE.iter()) {
            assert_eq!(v.pos[2], 0.0);
        }
    }

    #[test]
    fn vertex_bytes_round_trip_through_bytemuck() {
        let bytes: &[u8] = bytemuck::cast_slice(&LEFT_TRIANGLE);
        assert_eq!(bytes.len(), 3 * 12);
        let back: &[TriangleVertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back, &LEFT_TRIANGLE);
    }
}
