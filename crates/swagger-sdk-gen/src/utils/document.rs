use std::{ffi::OsStr, path::Path};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::{document::RawDocument, errors::GeneratorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
  #[default]
  Json,
  Yaml,
}

impl DocumentFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// Memory-maps a Swagger document and parses it into a [`RawDocument`].
pub struct DocumentLoader {
  file: AsyncMmapFile,
  format: DocumentFormat,
}

impl DocumentLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = DocumentFormat::from_path(path);
    let file = AsyncMmapFile::open(path).await?;

    Ok(Self { file, format })
  }

  pub fn parse(&self) -> Result<RawDocument, GeneratorError> {
    parse_document(self.file.as_slice(), self.format)
  }
}

/// Parses document bytes, reporting the JSON path of the first offending node.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<RawDocument, GeneratorError> {
  match format {
    DocumentFormat::Json => {
      let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
      serde_path_to_error::deserialize(deserializer).map_err(malformed)
    }
    DocumentFormat::Yaml => {
      let content = std::str::from_utf8(bytes).map_err(|err| GeneratorError::MalformedDocument {
        path: ".".to_string(),
        message: format!("document is not valid UTF-8: {err}"),
      })?;
      let deserializer = serde_yaml::Deserializer::from_str(content);
      serde_path_to_error::deserialize(deserializer).map_err(malformed)
    }
  }
}

fn malformed<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> GeneratorError {
  GeneratorError::MalformedDocument {
    path: err.path().to_string(),
    message: err.inner().to_string(),
  }
}
