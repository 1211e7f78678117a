//! `pack`: build a multi-resolution .ico from one image.

use anyhow::Result;

use super::args::PackArgs;
use crate::icon::{self, IconResolutionSet, composite, pack};
use crate::log;

pub fn pack_file(args: &PackArgs) -> Result<()> {
    let layout = args.canvas.layout()?;
    let source = args.canvas.load_source(&args.input)?;

    let mut set = IconResolutionSet::new();
    for &size in &args.sizes {
        let canvas = composite(source.clone(), &layout.canvas(size), layout.policy)?;
        set.push(canvas, size);
    }
    let bytes = pack(&set)?;

    icon::write_file(&args.output, &bytes)?;
    let sizes = set
        .sizes()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    log!("pack"; "{} [{}]", args.output.display(), sizes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::icon::RasterImage;
    use clap::Parser;
    use image::Rgba;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn pack_args(extra: &[&str], temp: &TempDir) -> PackArgs {
        let input = temp.path().join("logo.png");
        let img = RasterImage::from_pixel(64, 64, Rgba([0, 120, 215, 255]));
        icon::write_file(&input, &icon::encode_png(&img).unwrap()).unwrap();

        let mut argv = vec![
            "iconsmith".to_string(),
            "pack".to_string(),
            input.display().to_string(),
            temp.path().join("app.ico").display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Pack { args } => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_pack_custom_sizes() {
        let temp = TempDir::new().unwrap();
        let args = pack_args(&["--sizes", "16,32,48", "--policy", "stretch"], &temp);
        pack_file(&args).unwrap();

        let bytes = std::fs::read(&args.output).unwrap();
        let dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();
        let sizes: Vec<_> = dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(sizes, vec![16, 32, 48]);

        let first = dir.entries()[0].decode().unwrap();
        assert_eq!(&first.rgba_data()[..4], &[0, 120, 215, 255]);
    }

    #[test]
    fn test_pack_rejects_unordered_sizes() {
        let temp = TempDir::new().unwrap();
        let args = pack_args(&["--sizes", "48,16"], &temp);
        assert!(pack_file(&args).is_err());
        assert!(!args.output.exists());
    }
}
