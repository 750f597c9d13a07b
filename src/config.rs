use clap::Parser;
use glam::Vec4;

#[derive(Debug, Parser)]
#[command(about = "Draws a single colored triangle with OpenGL 4.6")]
pub struct Config {
    /// Initial window width
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    /// Initial window height
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// Window title
    #[arg(long, default_value = "OpenGL_2D_Game")]
    pub title: String,
    /// Background color as R,G,B or R,G,B,A, components in 0..=1
    #[arg(long, value_parser = parse_clear_color, default_value = "1,1,0,1")]
    pub clear_color: Vec4,
    /// Don't wait for vertical sync when swapping buffers
    #[arg(long)]
    pub no_vsync: bool,
    /// Enable OpenGL debug output, messages are forwarded to the logger
    #[arg(long)]
    pub gl_debug: bool,
}

fn parse_clear_color(s: &str) -> Result<Vec4, String> {
    let comps = s
        .split(',')
        .map(|c| {
            let c = c.trim();
            c.parse::<f32>()
                .map_err(|_| format!("'{c}' is not a number"))
        })
        .collect::<Result<Vec<f32>, String>>()?;

    let color = match comps[..] {
        [r, g, b] => Vec4::new(r, g, b, 1.0),
        [r, g, b, a] => Vec4::new(r, g, b, a),
        _ => return Err(format!("expected 3 or 4 components, got {}", comps.len())),
    };

    let in_range = color.to_array().iter().all(|c| (0.0..=1.0).contains(c));
    if !in_range {
        return Err(String::from("components must be between 0 and 1"));
    }

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("hello_triangle").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.title, "OpenGL_2D_Game");
        assert_eq!(config.clear_color, Vec4::new(1.0, 1.0, 0.0, 1.0));
        assert!(!config.no_vsync);
        assert!(!config.gl_debug);
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--width",
            "1024",
            "--height",
            "768",
            "--title",
            "tri",
            "--clear-color",
            "0.1, 0.2, 0.3",
            "--no-vsync",
            "--gl-debug",
        ])
        .unwrap();

        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.title, "tri");
        assert_eq!(config.clear_color, Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert!(config.no_vsync);
        assert!(config.gl_debug);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--height", "0"]).is_err());
    }

    #[test]
    fn clear_color_with_alpha() {
        assert_eq!(
            parse_clear_color("0,0,0,0.5"),
            Ok(Vec4::new(0.0, 0.0, 0.0, 0.5))
        );
    }

    #[test]
    fn clear_color_arity() {
        assert!(parse_clear_color("1,1").is_err());
        assert!(parse_clear_color("1,1,1,1,1").is_err());
        assert!(parse_clear_color("").is_err());
    }

    #[test]
    fn clear_color_range() {
        assert!(parse_clear_color("1.5,0,0").is_err());
        assert!(parse_clear_color("0,-0.1,0").is_err());
        assert!(parse_clear_color("0,0,nan").is_err());
    }

    #[test]
    fn clear_color_garbage() {
        let err = parse_clear_color("red,0,0").unwrap_err();
        assert!(err.contains("'red'"));
    }
}
