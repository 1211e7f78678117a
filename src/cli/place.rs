//! `place`: put one image on a square canvas.

use anyhow::Result;

use super::args::PlaceArgs;
use crate::icon::{self, composite};
use crate::log;

pub fn place_file(args: &PlaceArgs) -> Result<()> {
    let layout = args.canvas.layout()?;
    let source = args.canvas.load_source(&args.input)?;

    let canvas = composite(source, &layout.canvas(args.size), layout.policy)?;
    let canvas = args.shape.apply(canvas);

    icon::write_file(&args.output, &icon::encode_png(&canvas)?)?;
    log!("place"; "{} ({}x{})", args.output.display(), args.size, args.size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::icon::RasterImage;
    use clap::Parser;
    use image::Rgba;
    use tempfile::TempDir;

    fn place_args(extra: &[&str], temp: &TempDir) -> PlaceArgs {
        let input = temp.path().join("in.png");
        let output = temp.path().join("out.png");
        let img = RasterImage::from_pixel(100, 50, Rgba([20, 40, 60, 255]));
        icon::write_file(&input, &icon::encode_png(&img).unwrap()).unwrap();

        let mut argv = vec![
            "iconsmith".to_string(),
            "place".to_string(),
            input.display().to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Place { args } => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_place_fit_centered() {
        let temp = TempDir::new().unwrap();
        let args = place_args(&["--size", "100"], &temp);
        place_file(&args).unwrap();

        let out = icon::open(&args.output).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.get_pixel(50, 50).0, [20, 40, 60, 255]);
        assert_eq!(out.get_pixel(50, 29)[3], 0);
        assert_eq!(out.get_pixel(50, 30)[3], 255);
        assert_eq!(out.get_pixel(9, 50)[3], 0);
    }

    #[test]
    fn test_place_cover_with_background_and_circle() {
        let temp = TempDir::new().unwrap();
        let args = place_args(
            &["-s", "32", "--policy", "cover", "-b", "#E8B4B8", "--shape", "circle"],
            &temp,
        );
        place_file(&args).unwrap();

        let out = icon::open(&args.output).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(16, 16).0, [20, 40, 60, 255]);
    }

    #[test]
    fn test_place_rejects_bad_options() {
        let temp = TempDir::new().unwrap();
        let args = place_args(&["-s", "32", "--padding", "1.0"], &temp);
        assert!(place_file(&args).is_err());

        let args = place_args(&["-s", "32", "-b", "rose"], &temp);
        assert!(place_file(&args).is_err());

        let args = place_args(&["-s", "0"], &temp);
        assert!(place_file(&args).is_err());
        assert!(!args.output.exists());
    }
}
