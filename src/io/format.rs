use std::{fmt, path::Path, str::FromStr};

/// Encodings a saved ficha can be exported in. JSON is always built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl ExportFormat {
    pub fn available() -> &'static [ExportFormat] {
        &[
            ExportFormat::Json,
            #[cfg(feature = "yaml")]
            ExportFormat::Yaml,
            #[cfg(feature = "toml")]
            ExportFormat::Toml,
        ]
    }

    /// Format implied by a file name, e.g. `ficha.yaml`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            #[cfg(feature = "yaml")]
            ExportFormat::Yaml => "yaml",
            #[cfg(feature = "toml")]
            ExportFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Ok(ExportFormat::Toml),
            other => {
                let known = ExportFormat::available()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(format!("unsupported format '{other}' (expected one of: {known})"))
            }
        }
    }
}
