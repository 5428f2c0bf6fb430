//! Renderer crate for Quadshade.
//!
//! The module glues the winit window, the glutin OpenGL 3.3 core context, and
//! the fullscreen shader pipeline together. The overall flow is:
//!
//! ```text
//!   CLI / quadshade
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ context::create ──▶ winit event loop ──▶ redraw
//!          ▲            (GL 3.3 core)            │
//!          │                                     └─▶ time uniform ─▶ quad draw ─▶ swap
//! ```
//!
//! `context::GlWindow` owns the window, surface, and loaded GL entry points,
//! `compile::ShaderProgram` owns the linked program and its uniform slots,
//! and `window::run` drives the per-frame loop and releases every GL object on
//! the loop-exit path.
#![allow(clippy::missing_safety_doc)]

mod compile;
mod context;
mod diagnostics;
mod error;
mod quad;
mod timeline;
mod window;

use std::path::PathBuf;

use anyhow::Result;

pub use compile::ShaderStageKind;
pub use error::RendererError;

/// Minimum display width a fullscreen session requires.
pub const UHD_WIDTH: u32 = 3840;
/// Minimum display height a fullscreen session requires.
pub const UHD_HEIGHT: u32 = 2160;

/// How the renderer should present frames.
///
/// * `Fullscreen` takes over the primary monitor, gated on UHD capability.
///   The `resolution` uniform is pinned to 3840×2160 for the whole session.
/// * `Windowed` opens an interactive desktop window so shaders can be
///   developed on machines without a 4K display; `resolution` follows the
///   surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Fullscreen,
    Windowed,
}

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors the CLI flags and tells the renderer which shader
/// pair to compile and which presentation mode to use.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path to the vertex stage source.
    pub vertex_shader: PathBuf,
    /// Path to the fragment stage source.
    pub fragment_shader: PathBuf,
    /// Presentation mode (fullscreen vs desktop window).
    pub mode: RenderMode,
    /// Optional window size for windowed mode.
    pub requested_size: Option<(u32, u32)>,
    /// Window title.
    pub title: String,
}

impl Default for RendererConfig {
    /// Provides a fullscreen configuration reading the conventional shader
    /// pair from the working directory.
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("shader.vert"),
            fragment_shader: PathBuf::from("shader.frag"),
            mode: RenderMode::Fullscreen,
            requested_size: None,
            title: "Quadshade".to_string(),
        }
    }
}

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives inside the `window` and `context` modules;
/// `Renderer` simply forwards the request.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the render loop until the user exits.
    ///
    /// Returns an error if initialization fails at any step: event loop or
    /// window creation, a sub-UHD display in fullscreen mode, GL context
    /// creation, or shader compilation and linking.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reads_conventional_shader_pair() {
        let config = RendererConfig::default();
        assert_eq!(config.vertex_shader, PathBuf::from("shader.vert"));
        assert_eq!(config.fragment_shader, PathBuf::from("shader.frag"));
        assert_eq!(config.mode, RenderMode::Fullscreen);
        assert!(config.requested_size.is_none());
    }
}
