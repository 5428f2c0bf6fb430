use std::path::PathBuf;

use thiserror::Error;

use crate::compile::ShaderStageKind;

/// Fatal renderer failures surfaced to the caller as ordinary `Result` values.
///
/// Everything here aborts the run before the first frame; per-frame GL errors
/// are drained and logged by `diagnostics` instead of being raised.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("no monitor is connected")]
    NoMonitor,

    #[error("display mode {width}x{height} is below the required 3840x2160")]
    DisplayTooSmall { width: u32, height: u32 },

    #[error("failed to create GL context: {0}")]
    Context(String),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compile error in {path}: {log}")]
    Compile {
        stage: ShaderStageKind,
        path: PathBuf,
        log: String,
    },

    #[error("program link error: {0}")]
    Link(String),

    #[error("failed to create GL object: {0}")]
    Create(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_display_names_the_required_mode() {
        let err = RendererError::DisplayTooSmall {
            width: 2560,
            height: 1440,
        };
        assert_eq!(
            err.to_string(),
            "display mode 2560x1440 is below the required 3840x2160"
        );
    }

    #[test]
    fn compile_error_carries_stage_path_and_log() {
        let err = RendererError::Compile {
            stage: ShaderStageKind::Fragment,
            path: PathBuf::from("shader.frag"),
            log: "0:3(1): error: syntax error".into(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment shader compile error"));
        assert!(text.contains("shader.frag"));
        assert!(text.contains("syntax error"));
    }
}
