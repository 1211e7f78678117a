//! Configuration file generation.

use anyhow::{Context, Result};
use std::{fmt::Write as _, fs, path::Path};

use crate::catalog::Preset;
use crate::catalog::preset::IOS_ICON_DIR;
use crate::config::DEFAULT_SOURCE;
use crate::config::section::DEFAULT_PADDING;
use crate::icon::matte::DEFAULT_THRESHOLD;

/// Generate iconsmith.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    let presets = Preset::ALL
        .iter()
        .map(|p| format!("\"{}\"", p.name()))
        .collect::<Vec<_>>()
        .join(", ");

    // Header
    let _ = writeln!(
        out,
        "# iconsmith configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    );

    let _ = writeln!(out, "source = \"{DEFAULT_SOURCE}\"          # Source image, relative to this file");
    let _ = writeln!(out, "output = \".\"                        # Output root");
    let _ = writeln!(out, "presets = [{presets}]");
    let _ = writeln!(out, "ios_dir = \"{IOS_ICON_DIR}\"");
    out.push('\n');

    // [matte] section
    out.push_str("[matte]\n");
    out.push_str("enable = true                       # Make the near-white background transparent\n");
    let _ = writeln!(out, "threshold = {DEFAULT_THRESHOLD}                     # Channels above this count as background");
    out.push_str("stage = \"before-resize\"             # before-resize | after-resize\n");
    out.push('\n');

    // [placement] section
    out.push_str("[placement]\n");
    out.push_str("policy = \"fit\"                      # stretch | fit | cover\n");
    let _ = writeln!(out, "padding = {DEFAULT_PADDING}                       # Margin per side, fraction of the canvas");
    out.push_str("# background = \"#E8B4B8\"            # Canvas fill (default: transparent)\n");
    out.push('\n');

    // [[target]] / [[bundle]] examples
    out.push_str("# Extra PNG outputs; {size} is replaced by the size.\n");
    out.push_str("# [[target]]\n");
    out.push_str("# path = \"web/icon-{size}.png\"\n");
    out.push_str("# size = 192\n");
    out.push_str("# shape = \"circle\"                  # square | circle\n");
    out.push('\n');
    out.push_str("# Extra multi-resolution .ico outputs.\n");
    out.push_str("# [[bundle]]\n");
    out.push_str("# path = \"favicon.ico\"\n");
    out.push_str("# sizes = [16, 32, 48]\n");

    out
}

/// Write default iconsmith.toml configuration
pub fn write_config(path: &Path) -> Result<()> {
    let content = generate_config_template();
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}
