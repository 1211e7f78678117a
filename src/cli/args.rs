//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::Preset;
use crate::config::PolicyKind;
use crate::icon::Shape;
use crate::icon::matte::DEFAULT_THRESHOLD;
use crate::icon::pack::DEFAULT_ICO_SIZES;

/// App icon generator: matte, place and pack one source image into every
/// platform icon size
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconsmith.toml)
    #[arg(short = 'C', long, global = true, default_value = "iconsmith.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented default config file
    #[command(visible_alias = "i")]
    Init {
        /// Print the config instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Render every configured platform icon
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Make the near-white background of an image transparent
    #[command(visible_alias = "m")]
    Matte {
        /// Source image
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Output PNG
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// Channels above this value count as background
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u8,
    },

    /// Place an image on a square canvas
    #[command(visible_alias = "p")]
    Place {
        #[command(flatten)]
        args: PlaceArgs,
    },

    /// Pack square renditions into a multi-resolution .ico
    Pack {
        #[command(flatten)]
        args: PackArgs,
    },
}

/// `generate` arguments; each overrides the config file.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Source image (relative to current directory)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub source: Option<PathBuf>,

    /// Output root directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Presets to render, replacing the configured list
    #[arg(short, long = "preset", value_delimiter = ',')]
    pub presets: Vec<Preset>,

    /// Matte threshold (0-255)
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Skip background matting
    #[arg(long, conflicts_with = "threshold")]
    pub no_matte: bool,

    /// List the outputs without rendering them
    #[arg(long)]
    pub dry: bool,
}

/// Canvas options shared by `place` and `pack`.
#[derive(clap::Args, Debug, Clone)]
pub struct CanvasArgs {
    /// How the source is fitted onto the canvas
    #[arg(long, value_enum, default_value_t = PolicyKind::Fit)]
    pub policy: PolicyKind,

    /// Margin on each side as a fraction of the canvas (fit only)
    #[arg(long, default_value_t = 0.1)]
    pub padding: f64,

    /// Canvas fill, `#RRGGBB` or `#RRGGBBAA` (default: transparent)
    #[arg(short, long)]
    pub background: Option<String>,

    /// Matte the source first with this threshold
    #[arg(short, long)]
    pub threshold: Option<u8>,
}

/// `place` arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PlaceArgs {
    /// Source image
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output PNG
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Canvas edge length in pixels
    #[arg(short, long)]
    pub size: u32,

    /// Output outline
    #[arg(long, value_enum, default_value_t = Shape::Square)]
    pub shape: Shape,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

/// `pack` arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PackArgs {
    /// Source image
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output .ico
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Entry sizes, ascending
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_ICO_SIZES)]
    pub sizes: Vec<u32>,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_overrides() {
        let cli = Cli::parse_from([
            "iconsmith",
            "g",
            "--preset",
            "android,ios",
            "-t",
            "230",
            "--dry",
        ]);
        let Commands::Generate { args } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.presets, vec![Preset::Android, Preset::Ios]);
        assert_eq!(args.threshold, Some(230));
        assert!(args.dry);
        assert!(!args.no_matte);
    }

    #[test]
    fn test_no_matte_conflicts_with_threshold() {
        let result = Cli::try_parse_from(["iconsmith", "generate", "--no-matte", "-t", "200"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_place_defaults() {
        let cli = Cli::parse_from(["iconsmith", "place", "in.png", "out.png", "--size", "48"]);
        let Commands::Place { args } = cli.command else {
            panic!("expected place");
        };
        assert_eq!(args.size, 48);
        assert_eq!(args.shape, Shape::Square);
        assert_eq!(args.canvas.policy, PolicyKind::Fit);
        assert!((args.canvas.padding - 0.1).abs() < f64::EPSILON);
        assert!(args.canvas.threshold.is_none());
    }

    #[test]
    fn test_pack_default_sizes() {
        let cli = Cli::parse_from(["iconsmith", "-v", "pack", "in.png", "app.ico"]);
        assert!(cli.verbose);
        let Commands::Pack { args } = cli.command else {
            panic!("expected pack");
        };
        assert_eq!(args.sizes, vec![16, 24, 32, 48, 64, 128, 256]);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["iconsmith", "generate", "-C", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
