use serde::Deserialize;
use std::{fmt, fs, path::Path};

use crate::{
    pipeline::MalformedPolicy,
    sources::{ColumnNames, PositionalLayout},
};

const CONFIG_ENV: &str = "REPORT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "report-config.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    #[default]
    Csv,
    Positional,
    Ndjson,
}

/// Single-byte field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "char")]
pub struct Delimiter(u8);

impl Delimiter {
    pub fn byte(self) -> u8 {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self(b';')
    }
}

impl TryFrom<char> for Delimiter {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .filter(u8::is_ascii)
            .map(Self)
            .ok_or_else(|| format!("delimiter must be a single ASCII character, got '{c}'"))
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.0))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    #[serde(default)]
    pub format: SourceFormat,
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default)]
    pub malformed: MalformedPolicy,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub positional: PositionalLayout,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Deployment year: scopes the year report and labels month reports.
    pub year: i32,
    pub output_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                path: "2025.csv".to_string(),
                format: SourceFormat::default(),
                delimiter: Delimiter::default(),
                malformed: MalformedPolicy::default(),
                columns: ColumnNames::default(),
                positional: PositionalLayout::default(),
            },
            report: ReportConfig {
                year: 2025,
                output_path: "raportti.txt".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Read the file named by `REPORT_CONFIG`, else `report-config.toml`.
    /// Built-in defaults apply only when neither is present.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            Err(_) => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config '{path}': {e}"))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}
