//! Built-in platform output tables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::icon::Shape;
use crate::icon::pack::DEFAULT_ICO_SIZES;

/// Android resource root, relative to the output directory.
pub const ANDROID_RES: &str = "android/app/src/main/res";

/// Default iOS app-icon set directory, relative to the output directory.
pub const IOS_ICON_DIR: &str = "ios/App/Images.xcassets/AppIcon.appiconset";

/// Default multi-resolution icon path for the windows preset.
pub const WINDOWS_ICO: &str = "custom_icon.ico";

/// Legacy launcher icons: `mipmap-<density>`.
pub const ANDROID_LAUNCHER: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

/// Adaptive icon foreground layers: `drawable-<density>`.
pub const ANDROID_ADAPTIVE: [(&str, u32); 5] = [
    ("mdpi", 108),
    ("hdpi", 162),
    ("xhdpi", 216),
    ("xxhdpi", 324),
    ("xxxhdpi", 432),
];

pub const IOS_SIZES: [u32; 13] = [20, 29, 40, 58, 60, 76, 80, 87, 120, 152, 167, 180, 1024];

/// One PNG rendition contributed by a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetOutput {
    pub path: PathBuf,
    pub size: u32,
    pub shape: Shape,
}

impl PresetOutput {
    fn square(path: PathBuf, size: u32) -> Self {
        Self {
            path,
            size,
            shape: Shape::Square,
        }
    }
}

/// A named group of outputs for one platform convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// `mipmap-*/ic_launcher.png` and `ic_launcher_round.png`
    Android,
    /// `drawable-*/ic_launcher_foreground.png`
    AndroidAdaptive,
    /// `AppIcon.appiconset/icon-<size>.png`
    Ios,
    /// Multi-resolution `.ico`
    Windows,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Android,
        Preset::AndroidAdaptive,
        Preset::Ios,
        Preset::Windows,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::AndroidAdaptive => "android-adaptive",
            Self::Ios => "ios",
            Self::Windows => "windows",
        }
    }

    /// PNG outputs; round launchers get a circular mask.
    pub fn png_outputs(self, ios_dir: &str) -> Vec<PresetOutput> {
        match self {
            Self::Android => ANDROID_LAUNCHER
                .iter()
                .flat_map(|&(density, size)| {
                    let dir = PathBuf::from(ANDROID_RES).join(format!("mipmap-{density}"));
                    [
                        PresetOutput::square(dir.join("ic_launcher.png"), size),
                        PresetOutput {
                            path: dir.join("ic_launcher_round.png"),
                            size,
                            shape: Shape::Circle,
                        },
                    ]
                })
                .collect(),
            Self::AndroidAdaptive => ANDROID_ADAPTIVE
                .iter()
                .map(|&(density, size)| {
                    let dir = PathBuf::from(ANDROID_RES).join(format!("drawable-{density}"));
                    PresetOutput::square(dir.join("ic_launcher_foreground.png"), size)
                })
                .collect(),
            Self::Ios => IOS_SIZES
                .iter()
                .map(|&size| {
                    PresetOutput::square(PathBuf::from(ios_dir).join(format!("icon-{size}.png")), size)
                })
                .collect(),
            Self::Windows => Vec::new(),
        }
    }

    /// ICO outputs as `(path, sizes)`.
    pub fn ico_outputs(self) -> Vec<(PathBuf, Vec<u32>)> {
        match self {
            Self::Windows => vec![(PathBuf::from(WINDOWS_ICO), DEFAULT_ICO_SIZES.to_vec())],
            _ => Vec::new(),
        }
    }
}
