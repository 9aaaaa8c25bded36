use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::recent_docs::RecentDocs;
use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

/// Available style schemes from syntect, used for code nodes and the
/// editor palette. Each variant maps to a syntect theme key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyntaxTheme {
    #[default]
    Base16OceanDark,
    Base16OceanLight,
    Base16EightiesDark,
    Base16MochaDark,
    SolarizedDark,
    SolarizedLight,
    InspiredGitHub,
}

impl SyntaxTheme {
    pub fn theme_key(&self) -> &'static str {
        match self {
            Self::Base16OceanDark => "base16-ocean.dark",
            Self::Base16OceanLight => "base16-ocean.light",
            Self::Base16EightiesDark => "base16-eighties.dark",
            Self::Base16MochaDark => "base16-mocha.dark",
            Self::SolarizedDark => "Solarized (dark)",
            Self::SolarizedLight => "Solarized (light)",
            Self::InspiredGitHub => "InspiredGitHub",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Base16OceanDark => "Base16 Ocean Dark",
            Self::Base16OceanLight => "Base16 Ocean Light",
            Self::Base16EightiesDark => "Base16 Eighties Dark",
            Self::Base16MochaDark => "Base16 Mocha Dark",
            Self::SolarizedDark => "Solarized Dark",
            Self::SolarizedLight => "Solarized Light",
            Self::InspiredGitHub => "Inspired GitHub",
        }
    }

    pub fn all() -> &'static [SyntaxTheme] {
        &[
            Self::Base16OceanDark,
            Self::Base16OceanLight,
            Self::Base16EightiesDark,
            Self::Base16MochaDark,
            Self::SolarizedDark,
            Self::SolarizedLight,
            Self::InspiredGitHub,
        ]
    }

    pub fn is_dark(&self) -> bool {
        matches!(
            self,
            Self::Base16OceanDark | Self::Base16EightiesDark | Self::Base16MochaDark | Self::SolarizedDark
        )
    }
}

/// Top-level window placement, captured when a window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 900,
            height: 600,
        }
    }
}

/// Where to resume inside a recently opened document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRestore {
    /// Tree path of the selected node, e.g. "0:3:1"
    #[serde(default)]
    pub node_path: String,
    #[serde(default)]
    pub cursor_pos: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub recent_docs: RecentDocs,

    #[serde(default)]
    pub recent_docs_restore: BTreeMap<PathBuf, DocRestore>,

    #[serde(default)]
    pub win_rect: WindowGeometry,

    #[serde(default)]
    pub win_is_maximized: bool,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default)]
    pub syntax_theme: SyntaxTheme,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    /// File this configuration is read from and written back to.
    #[serde(skip)]
    file_path: PathBuf,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_font_size() -> u32 {
    14
}

fn default_line_numbers() -> bool {
    false
}

fn default_word_wrap() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_docs: RecentDocs::new(),
            recent_docs_restore: BTreeMap::new(),
            win_rect: WindowGeometry::default(),
            win_is_maximized: false,
            theme_mode: default_theme_mode(),
            syntax_theme: SyntaxTheme::default(),
            font_size: default_font_size(),
            line_numbers_enabled: default_line_numbers(),
            word_wrap_enabled: default_word_wrap(),
            file_path: Self::get_config_path(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from the per-user config path.
    pub fn load() -> Self {
        Self::load_from(Self::get_config_path())
    }

    /// Load the configuration from `path`, falling back to defaults when the
    /// file is missing or unreadable. Never fails.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut config = match Self::read(&path) {
            Ok(config) => config,
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No configuration at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load configuration {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        };
        config.file_path = path;
        config
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persist the configuration to the file it was loaded from.
    pub fn write_to_file(&self) -> Result<(), AppError> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.file_path, json)?;
        log::debug!("Configuration written to {}", self.file_path.display());

        Ok(())
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Resolve the dark palette for the configured theme mode.
    pub fn is_dark(&self) -> bool {
        match self.theme_mode {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::SystemDefault => self.syntax_theme.is_dark(),
        }
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("cherrypad");
        path.push("config.json");
        path
    }
}
