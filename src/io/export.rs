use std::{
    fmt, fs,
    io::{self, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::domain::SavedFicha;

use super::ExportFormat;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode the ficha as JSON")]
    Json(#[source] serde_json::Error),
    #[cfg(feature = "yaml")]
    #[error("failed to encode the ficha as YAML")]
    Yaml(#[source] serde_yaml::Error),
    #[cfg(feature = "toml")]
    #[error("failed to encode the ficha as TOML")]
    Toml(#[source] toml::ser::Error),
    #[error("failed to write the ficha to {target}")]
    Write {
        target: ExportTarget,
        #[source]
        source: io::Error,
    },
}

/// Where an exported ficha is written; `-` names stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    pub fn inferred_format(&self) -> Option<ExportFormat> {
        match self {
            ExportTarget::Stdout => None,
            ExportTarget::File(path) => ExportFormat::from_path(path),
        }
    }
}

impl FromStr for ExportTarget {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "" => Err("export target cannot be empty".to_string()),
            "-" => Ok(ExportTarget::Stdout),
            path => Ok(ExportTarget::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::Stdout => f.write_str("stdout"),
            ExportTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A saved ficha on its way out of the form. The JSON rendering is the
/// stored record layout, so it can be dropped back into the store as is.
#[derive(Debug, Clone, Copy)]
pub struct FichaExport<'a> {
    ficha: &'a SavedFicha,
    format: ExportFormat,
    pretty: bool,
}

impl<'a> FichaExport<'a> {
    pub fn new(ficha: &'a SavedFicha) -> Self {
        Self {
            ficha,
            format: ExportFormat::Json,
            pretty: true,
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Compact output only applies to JSON; YAML has a single layout.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn render(&self) -> Result<String, ExportError> {
        match self.format {
            ExportFormat::Json if self.pretty => {
                serde_json::to_string_pretty(self.ficha).map_err(ExportError::Json)
            }
            ExportFormat::Json => serde_json::to_string(self.ficha).map_err(ExportError::Json),
            #[cfg(feature = "yaml")]
            ExportFormat::Yaml => serde_yaml::to_string(self.ficha).map_err(ExportError::Yaml),
            #[cfg(feature = "toml")]
            ExportFormat::Toml if self.pretty => {
                toml::to_string_pretty(self.ficha).map_err(ExportError::Toml)
            }
            #[cfg(feature = "toml")]
            ExportFormat::Toml => toml::to_string(self.ficha).map_err(ExportError::Toml),
        }
    }

    /// Renders once and writes the result, newline-terminated, to `target`.
    /// Files are replaced.
    pub fn write_to(&self, target: &ExportTarget) -> Result<(), ExportError> {
        let mut payload = self.render()?;
        if !payload.ends_with('\n') {
            payload.push('\n');
        }
        let written = match target {
            ExportTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(payload.as_bytes())
                    .and_then(|()| stdout.flush())
            }
            ExportTarget::File(path) => fs::write(path, payload.as_bytes()),
        };
        written.map_err(|source| ExportError::Write {
            target: target.clone(),
            source,
        })
    }
}

impl SavedFicha {
    pub fn export(&self) -> FichaExport<'_> {
        FichaExport::new(self)
    }
}
