use anyhow::Result;
use renderer::{RenderMode, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let mode = if args.window {
        RenderMode::Windowed
    } else {
        RenderMode::Fullscreen
    };
    tracing::info!(
        vert = %args.vert.display(),
        frag = %args.frag.display(),
        ?mode,
        "starting quadshade"
    );

    let config = RendererConfig {
        vertex_shader: args.vert,
        fragment_shader: args.frag,
        mode,
        requested_size: args.size,
        title: args.title,
    };

    Renderer::new(config).run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
