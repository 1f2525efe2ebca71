//! Two-triangles demo binary.
//!
//! Opens an 800x600 window and draws two hardcoded triangles, one green and
//! one red, every frame until the window closes or Escape is pressed.

use two_triangles::core::{App, AppControl, FrameCtx};
use two_triangles::device::GpuInit;
use two_triangles::input::Key;
use two_triangles::logging::{init_logging, LoggingConfig};
use two_triangles::render::TriangleRenderer;
use two_triangles::window::{Runtime, RuntimeConfig};

/// The original program passes 1.7/1.4 which GL clamps to 1.0.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 0.7,
    a: 1.0,
};

#[derive(Default)]
struct Demo {
    renderer: TriangleRenderer,
}

impl App for Demo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.key_down(Key::Escape) {
            log::info!("escape pressed; closing");
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        ctx.render(CLEAR_COLOR, |rctx, target| renderer.render(rctx, target))
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let result = Runtime::run(RuntimeConfig::default(), GpuInit::default(), Demo::default());

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(-1);
    }
}
