use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "quadshade",
    author,
    version,
    about = "Fullscreen procedural GLSL shader viewer for UHD displays"
)]
pub struct Args {
    /// Vertex shader source path.
    #[arg(long, value_name = "PATH", default_value = "shader.vert")]
    pub vert: PathBuf,

    /// Fragment shader source path.
    #[arg(long, value_name = "PATH", default_value = "shader.frag")]
    pub frag: PathBuf,

    /// Render in a desktop window instead of exclusive fullscreen.
    #[arg(long)]
    pub window: bool,

    /// Window size for `--window` mode (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface_size)]
    pub size: Option<(u32, u32)>,

    /// Window title.
    #[arg(long, default_value = "Quadshade")]
    pub title: String,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WxH format, e.g. 1920x1080".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| "invalid width in size specification".to_string())?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| "invalid height in size specification".to_string())?;

    if width == 0 || height == 0 {
        return Err("surface dimensions must be greater than zero".to_string());
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_working_directory_pair() {
        let args = Args::try_parse_from(["quadshade"]).expect("no args is valid");
        assert_eq!(args.vert, PathBuf::from("shader.vert"));
        assert_eq!(args.frag, PathBuf::from("shader.frag"));
        assert!(!args.window);
        assert!(args.size.is_none());
        assert_eq!(args.title, "Quadshade");
    }

    #[test]
    fn shader_paths_are_overridable() {
        let args = Args::try_parse_from([
            "quadshade",
            "--vert",
            "demo/pass.vert",
            "--frag",
            "demo/plasma.frag",
        ])
        .expect("path overrides are valid");
        assert_eq!(args.vert, PathBuf::from("demo/pass.vert"));
        assert_eq!(args.frag, PathBuf::from("demo/plasma.frag"));
    }

    #[test]
    fn windowed_size_parses_wxh() {
        let args = Args::try_parse_from(["quadshade", "--window", "--size", "1280x720"])
            .expect("windowed size is valid");
        assert!(args.window);
        assert_eq!(args.size, Some((1280, 720)));
    }

    #[test]
    fn surface_size_accepts_uppercase_separator() {
        assert_eq!(parse_surface_size("1920X1080"), Ok((1920, 1080)));
    }

    #[test]
    fn surface_size_rejects_missing_separator() {
        assert!(parse_surface_size("1920").is_err());
    }

    #[test]
    fn surface_size_rejects_zero_dimensions() {
        assert!(parse_surface_size("0x720").is_err());
        assert!(parse_surface_size("1280x0").is_err());
    }

    #[test]
    fn surface_size_rejects_garbage() {
        assert!(parse_surface_size("widexhigh").is_err());
    }
}
