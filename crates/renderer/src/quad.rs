//! The viewport-filling quad every frame rasterizes.

use glow::HasContext;

use crate::error::RendererError;

/// Clip-space positions for a 4-vertex triangle strip covering [-1,1]².
const QUAD_VERTICES: [f32; 8] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0, //
];

/// Static vertex state for the quad: one VAO, one VBO, uploaded once.
pub(crate) struct FullscreenQuad {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
}

impl FullscreenQuad {
    pub unsafe fn new(gl: &glow::Context) -> Result<Self, RendererError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|err| RendererError::Create(format!("create_vertex_array: {err}")))?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                gl.delete_vertex_array(vao);
                return Err(RendererError::Create(format!("create_buffer: {err}")));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );
        gl.vertex_attrib_pointer_f32(
            0,
            2,
            glow::FLOAT,
            false,
            2 * std::mem::size_of::<f32>() as i32,
            0,
        );
        gl.enable_vertex_attrib_array(0);

        Ok(Self { vao, vbo })
    }

    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
    }

    pub unsafe fn destroy(&self, gl: &glow::Context) {
        gl.delete_buffer(self.vbo);
        gl.delete_vertex_array(self.vao);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_clip_space() {
        let xs: Vec<f32> = QUAD_VERTICES.iter().step_by(2).copied().collect();
        let ys: Vec<f32> = QUAD_VERTICES.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
    }

    #[test]
    fn vertex_upload_is_eight_floats() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 8 * std::mem::size_of::<f32>());
    }
}
