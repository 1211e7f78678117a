//! Configuration section definitions.
//!
//! Each module corresponds to a section in `iconsmith.toml`:
//!
//! | Module      | TOML Section              | Purpose                          |
//! |-------------|---------------------------|----------------------------------|
//! | `matte`     | `[matte]`                 | Background removal               |
//! | `placement` | `[placement]`             | Shared canvas layout             |
//! | `output`    | `[[target]]`, `[[bundle]]`| Custom PNG and ICO outputs       |

mod matte;
mod output;
mod placement;

pub use matte::MatteConfig;
pub use output::{BundleConfig, TargetConfig};
pub use placement::{DEFAULT_PADDING, PlacementConfig, PolicyKind, parse_background};
