//! Window and GL context bootstrap.
//!
//! Builds the winit window (fullscreen on the primary monitor, gated on UHD
//! capability, or a plain desktop window), creates a glutin OpenGL 3.3 core
//! context over it, and loads the GL entry points through glow. Everything
//! the render loop owns for the lifetime of the session comes out of
//! [`create`] as one [`GlWindow`] value.

use std::ffi::CString;
use std::num::NonZeroU32;

use anyhow::{anyhow, Result};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::monitor::{MonitorHandle, VideoMode};
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::error::RendererError;
use crate::{RenderMode, RendererConfig, UHD_HEIGHT, UHD_WIDTH};

/// Everything the render loop needs to own for the lifetime of the window.
pub(crate) struct GlWindow {
    pub window: Window,
    pub surface: glutin::surface::Surface<WindowSurface>,
    pub context: glutin::context::PossiblyCurrentContext,
    pub gl: glow::Context,
}

/// Capability gate applied to the primary monitor before any window exists.
pub(crate) fn meets_uhd_minimum(size: PhysicalSize<u32>) -> bool {
    size.width >= UHD_WIDTH && size.height >= UHD_HEIGHT
}

fn resolve_monitor(event_loop: &EventLoop<()>) -> Result<MonitorHandle, RendererError> {
    event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
        .ok_or(RendererError::NoMonitor)
}

/// Picks the exact UHD exclusive mode when the monitor exposes one,
/// preferring the highest refresh rate.
fn uhd_video_mode(monitor: &MonitorHandle) -> Option<VideoMode> {
    monitor
        .video_modes()
        .filter(|mode| mode.size() == PhysicalSize::new(UHD_WIDTH, UHD_HEIGHT))
        .max_by_key(VideoMode::refresh_rate_millihertz)
}

fn fullscreen_window_builder(
    event_loop: &EventLoop<()>,
    title: &str,
) -> Result<WindowBuilder, RendererError> {
    let monitor = resolve_monitor(event_loop)?;
    let size = monitor.size();
    if !meets_uhd_minimum(size) {
        return Err(RendererError::DisplayTooSmall {
            width: size.width,
            height: size.height,
        });
    }

    let fullscreen = match uhd_video_mode(&monitor) {
        Some(mode) => {
            tracing::info!(
                monitor = %monitor.name().unwrap_or_else(|| "<unnamed>".into()),
                refresh_mhz = mode.refresh_rate_millihertz(),
                "selected exclusive 3840x2160 video mode"
            );
            Fullscreen::Exclusive(mode)
        }
        None => {
            tracing::info!(
                monitor = %monitor.name().unwrap_or_else(|| "<unnamed>".into()),
                width = size.width,
                height = size.height,
                "no exact UHD mode exposed; using borderless fullscreen"
            );
            Fullscreen::Borderless(Some(monitor))
        }
    };

    Ok(WindowBuilder::new()
        .with_title(title)
        .with_fullscreen(Some(fullscreen)))
}

/// Builds the window, GL context, surface, and function loader in one pass.
pub(crate) fn create(event_loop: &EventLoop<()>, config: &RendererConfig) -> Result<GlWindow> {
    let window_builder = match config.mode {
        RenderMode::Fullscreen => fullscreen_window_builder(event_loop, &config.title)?,
        RenderMode::Windowed => {
            let (width, height) = config.requested_size.unwrap_or((1280, 720));
            WindowBuilder::new()
                .with_title(&config.title)
                .with_inner_size(PhysicalSize::new(width, height))
        }
    };

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(0)
        .with_stencil_size(0);

    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("the platform offers at least one GL config")
        })
        .map_err(|err| anyhow!("failed to build GL display: {err}"))?;
    let window = window.ok_or_else(|| anyhow!("display builder did not create a window"))?;
    let gl_display = gl_config.display();
    let raw_window_handle = window.raw_window_handle();

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .build(Some(raw_window_handle));
    // Versionless core-profile retry for drivers that reject explicit 3.3.
    let fallback_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .build(Some(raw_window_handle));

    let not_current_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .or_else(|_| gl_display.create_context(&gl_config, &fallback_attributes))
            .map_err(|err| RendererError::Context(format!("create_context: {err}")))?
    };

    let inner_size = window.inner_size();
    let (width, height) = (inner_size.width.max(1), inner_size.height.max(1));
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(width).expect("surface width clamped above zero"),
        NonZeroU32::new(height).expect("surface height clamped above zero"),
    );
    let surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attributes)
            .map_err(|err| RendererError::Context(format!("create_window_surface: {err}")))?
    };

    let context = not_current_context
        .make_current(&surface)
        .map_err(|err| RendererError::Context(format!("make_current: {err}")))?;

    // The swap is the only frame pacing there is; ask for a vsync'd interval.
    if let Err(err) = surface.set_swap_interval(
        &context,
        SwapInterval::Wait(NonZeroU32::new(1).expect("non-zero interval")),
    ) {
        tracing::warn!(error = %err, "failed to enable vsync; presentation will be unpaced");
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| {
            let symbol = CString::new(symbol).expect("GL symbol names contain no NUL");
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        })
    };

    // Fullscreen sessions render the fixed UHD area whatever the desktop
    // mode ended up as; windowed sessions track the surface.
    let (viewport_width, viewport_height) = match config.mode {
        RenderMode::Fullscreen => (UHD_WIDTH, UHD_HEIGHT),
        RenderMode::Windowed => (width, height),
    };
    unsafe {
        gl.viewport(0, 0, viewport_width as i32, viewport_height as i32);
    }

    tracing::info!(
        width,
        height,
        mode = ?config.mode,
        "created GL 3.3 core window surface"
    );

    Ok(GlWindow {
        window,
        surface,
        context,
        gl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uhd_gate_accepts_the_exact_mode() {
        assert!(meets_uhd_minimum(PhysicalSize::new(3840, 2160)));
    }

    #[test]
    fn uhd_gate_accepts_larger_displays() {
        assert!(meets_uhd_minimum(PhysicalSize::new(7680, 4320)));
        assert!(meets_uhd_minimum(PhysicalSize::new(5120, 2880)));
    }

    #[test]
    fn uhd_gate_rejects_either_axis_short() {
        assert!(!meets_uhd_minimum(PhysicalSize::new(3839, 2160)));
        assert!(!meets_uhd_minimum(PhysicalSize::new(3840, 2159)));
        assert!(!meets_uhd_minimum(PhysicalSize::new(1920, 1080)));
    }
}
