//! Shader stage loading and program linking.
//!
//! Sources are read from disk as plain GLSL text and handed to the driver's
//! compiler untouched; `#version` pragmas and everything else stay the shader
//! author's business. Compile and link diagnostics are captured into
//! [`RendererError`] values with the info log clamped to a fixed budget, and
//! failed GL objects are deleted before the error is returned.

use std::fmt;
use std::fs;
use std::path::Path;

use glow::HasContext;

use crate::error::RendererError;

/// Upper bound on captured compiler and linker diagnostics.
const INFO_LOG_LIMIT: usize = 512;

/// The two programmable stages the viewer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl ShaderStageKind {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStageKind::Vertex => glow::VERTEX_SHADER,
            ShaderStageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStageKind::Vertex => f.write_str("vertex"),
            ShaderStageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Reads an entire shader source file; the error names the path so a missing
/// file is diagnosable from the message alone.
pub(crate) fn read_shader_source(path: &Path) -> Result<String, RendererError> {
    fs::read_to_string(path).map_err(|source| RendererError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Clamps an info log to [`INFO_LOG_LIMIT`] bytes on a char boundary.
fn truncate_log(log: &str) -> String {
    let trimmed = log.trim_end();
    if trimmed.len() <= INFO_LOG_LIMIT {
        return trimmed.to_string();
    }
    let mut end = INFO_LOG_LIMIT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{} [truncated]", &trimmed[..end])
}

/// Reads and compiles a single shader stage.
///
/// On compile failure the shader object is deleted before returning, so no GL
/// object outlives the error.
pub(crate) unsafe fn load_shader_stage(
    gl: &glow::Context,
    path: &Path,
    stage: ShaderStageKind,
) -> Result<glow::NativeShader, RendererError> {
    let source = read_shader_source(path)?;

    let shader = gl
        .create_shader(stage.gl_type())
        .map_err(|err| RendererError::Create(format!("create_shader({stage}): {err}")))?;
    gl.shader_source(shader, &source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = truncate_log(&gl.get_shader_info_log(shader));
        gl.delete_shader(shader);
        return Err(RendererError::Compile {
            stage,
            path: path.to_path_buf(),
            log,
        });
    }

    Ok(shader)
}

/// Links two compiled stages into a program.
///
/// The stage objects are detached and deleted whatever the outcome; a linked
/// program retains its compiled code internally.
pub(crate) unsafe fn link_program(
    gl: &glow::Context,
    vertex: glow::NativeShader,
    fragment: glow::NativeShader,
) -> Result<glow::NativeProgram, RendererError> {
    let program = gl
        .create_program()
        .map_err(|err| RendererError::Create(format!("create_program: {err}")))?;
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !gl.get_program_link_status(program) {
        let log = truncate_log(&gl.get_program_info_log(program));
        gl.delete_program(program);
        return Err(RendererError::Link(log));
    }

    Ok(program)
}

/// Linked program plus the uniform slots the render loop updates.
pub(crate) struct ShaderProgram {
    program: glow::NativeProgram,
    time: Option<glow::NativeUniformLocation>,
    resolution: Option<glow::NativeUniformLocation>,
}

impl ShaderProgram {
    /// Compiles both stages from disk, links them, and resolves the `time`
    /// and `resolution` uniforms.
    ///
    /// A uniform the linker optimized out is reported as a warning rather
    /// than an error; a shader that ignores `time` is legal GLSL.
    pub unsafe fn load(
        gl: &glow::Context,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, RendererError> {
        let vertex = load_shader_stage(gl, vertex_path, ShaderStageKind::Vertex)?;
        let fragment = match load_shader_stage(gl, fragment_path, ShaderStageKind::Fragment) {
            Ok(fragment) => fragment,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let program = link_program(gl, vertex, fragment)?;

        let time = gl.get_uniform_location(program, "time");
        if time.is_none() {
            tracing::warn!("shader has no active `time` uniform; animation input will be skipped");
        }
        let resolution = gl.get_uniform_location(program, "resolution");
        if resolution.is_none() {
            tracing::warn!("shader has no active `resolution` uniform");
        }

        Ok(Self {
            program,
            time,
            resolution,
        })
    }

    pub unsafe fn bind(&self, gl: &glow::Context) {
        gl.use_program(Some(self.program));
    }

    /// Uploads elapsed seconds; requires the program to be bound.
    pub unsafe fn set_time(&self, gl: &glow::Context, seconds: f32) {
        gl.uniform_1_f32(self.time.as_ref(), seconds);
    }

    /// Uploads the surface size; requires the program to be bound.
    pub unsafe fn set_resolution(&self, gl: &glow::Context, width: f32, height: f32) {
        gl.uniform_2_f32(self.resolution.as_ref(), width, height);
    }

    pub unsafe fn destroy(&self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_logs_pass_through_trimmed() {
        assert_eq!(truncate_log("0:1(1): error: oops\n"), "0:1(1): error: oops");
    }

    #[test]
    fn long_logs_are_clamped_to_the_budget() {
        let log = "e".repeat(INFO_LOG_LIMIT * 2);
        let clamped = truncate_log(&log);
        assert!(clamped.starts_with(&"e".repeat(INFO_LOG_LIMIT)));
        assert!(clamped.ends_with("[truncated]"));
        assert!(clamped.len() < log.len());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multi-byte characters straddling the limit must not split.
        let log = "é".repeat(INFO_LOG_LIMIT);
        let clamped = truncate_log(&log);
        assert!(clamped.ends_with("[truncated]"));
        assert!(clamped.len() <= INFO_LOG_LIMIT + " [truncated]".len());
    }

    #[test]
    fn missing_source_reports_failed_open_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.frag");
        let err = read_shader_source(&path).expect_err("file does not exist");
        let text = err.to_string();
        assert!(text.contains("failed to open"));
        assert!(text.contains("missing.frag"));
    }

    #[test]
    fn present_source_is_read_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pass.vert");
        std::fs::write(&path, "#version 330 core\nvoid main() {}\n").expect("write shader");
        let source = read_shader_source(&path).expect("readable shader");
        assert!(source.starts_with("#version 330 core"));
    }

    #[test]
    fn stage_kinds_name_their_gl_counterparts() {
        assert_eq!(ShaderStageKind::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStageKind::Fragment.gl_type(), glow::FRAGMENT_SHADER);
        assert_eq!(ShaderStageKind::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStageKind::Fragment.to_string(), "fragment");
    }
}
