//! The interactive render loop.
//!
//! Owns the window state for the whole session: builds the GL window, uploads
//! the quad, compiles the shader pair, seeds the static `resolution` uniform,
//! then hands everything to the winit event loop. Each redraw pushes the
//! frame clock into `time`, clears, draws the quad, and swaps; the vsync'd
//! swap paces the loop. The quad and program are released on the loop-exit
//! path before the process returns.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _, Result};
use glow::HasContext;
use glutin::prelude::*;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};

use crate::compile::ShaderProgram;
use crate::context::{self, GlWindow};
use crate::diagnostics;
use crate::quad::FullscreenQuad;
use crate::timeline::FrameClock;
use crate::{RenderMode, RendererConfig, UHD_HEIGHT, UHD_WIDTH};

pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let GlWindow {
        window,
        surface,
        context: gl_context,
        gl,
    } = context::create(&event_loop, config)?;

    let quad = unsafe { FullscreenQuad::new(&gl)? };
    unsafe { diagnostics::check_gl_errors(&gl, "vertex setup") };

    let program =
        match unsafe { ShaderProgram::load(&gl, &config.vertex_shader, &config.fragment_shader) } {
            Ok(program) => program,
            Err(err) => {
                // The context dies with this function, but the quad should
                // not outlive the failed program either.
                unsafe { quad.destroy(&gl) };
                return Err(err.into());
            }
        };

    let (resolution_width, resolution_height) = match config.mode {
        RenderMode::Fullscreen => (UHD_WIDTH as f32, UHD_HEIGHT as f32),
        RenderMode::Windowed => {
            let size = window.inner_size();
            (size.width.max(1) as f32, size.height.max(1) as f32)
        }
    };
    unsafe {
        program.bind(&gl);
        program.set_resolution(&gl, resolution_width, resolution_height);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        diagnostics::check_gl_errors(&gl, "static uniform setup");
    }

    let clock = FrameClock::start();
    let mode = config.mode;
    window.request_redraw();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed
                                && matches!(event.logical_key, Key::Named(NamedKey::Escape))
                            {
                                elwt.exit();
                            }
                        }
                        WindowEvent::Resized(new_size) => {
                            if new_size.width == 0 || new_size.height == 0 {
                                return;
                            }
                            surface.resize(
                                &gl_context,
                                NonZeroU32::new(new_size.width)
                                    .expect("resize width checked above"),
                                NonZeroU32::new(new_size.height)
                                    .expect("resize height checked above"),
                            );
                            // Fullscreen keeps the fixed UHD viewport and
                            // resolution; only the preview window tracks
                            // the surface.
                            if mode == RenderMode::Windowed {
                                unsafe {
                                    gl.viewport(
                                        0,
                                        0,
                                        new_size.width as i32,
                                        new_size.height as i32,
                                    );
                                    program.set_resolution(
                                        &gl,
                                        new_size.width as f32,
                                        new_size.height as f32,
                                    );
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            unsafe {
                                program.set_time(&gl, clock.elapsed_secs());
                                diagnostics::check_gl_errors(&gl, "time uniform update");

                                gl.clear(glow::COLOR_BUFFER_BIT);
                                quad.draw(&gl);
                                diagnostics::check_gl_errors(&gl, "draw call");
                            }
                            if let Err(err) = surface.swap_buffers(&gl_context) {
                                tracing::warn!(error = %err, "buffer swap failed; retrying next frame");
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // The blocking swap paces the loop; just keep frames coming.
                    window.request_redraw();
                }
                Event::LoopExiting => unsafe {
                    quad.destroy(&gl);
                    program.destroy(&gl);
                },
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
