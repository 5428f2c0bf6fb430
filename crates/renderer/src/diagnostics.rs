use glow::HasContext;

/// Drains the GL error queue, logging every pending code against the phase
/// label. Per-frame errors are never fatal; the loop keeps rendering.
///
/// One `glGetError` call only reports the oldest code, so this loops until
/// the queue is empty rather than letting one error mask the rest.
pub(crate) unsafe fn check_gl_errors(gl: &glow::Context, phase: &str) {
    loop {
        let code = gl.get_error();
        if code == glow::NO_ERROR {
            break;
        }
        tracing::warn!(phase, code, name = error_name(code), "GL error reported");
    }
}

fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(error_name(glow::INVALID_ENUM), "INVALID_ENUM");
        assert_eq!(error_name(glow::INVALID_OPERATION), "INVALID_OPERATION");
        assert_eq!(error_name(glow::OUT_OF_MEMORY), "OUT_OF_MEMORY");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(error_name(0xDEAD), "UNKNOWN");
    }
}
