//! Export session: exporters plus the filename counters of one user session.

use std::fmt;

use crate::error::{Error, Result};
use crate::export::{ExportFormat, ExporterRegistry, SourceDocument};
use crate::filename::{base_name, FilenamePolicy};
use crate::render::RenderOptions;

/// A packaged artifact ready to be saved or downloaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Filename chosen by the filename policy
    pub filename: String,

    /// MIME type of the artifact
    pub mime_type: &'static str,

    /// Artifact bytes
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Session context threaded through every named export.
///
/// A filename is only taken once its artifact was produced, so a failed
/// export never consumes a counter value.
#[derive(Debug, Default)]
pub struct Session {
    registry: ExporterRegistry,
    filenames: FilenamePolicy,
}

impl Session {
    /// Create a session with the default exporters.
    pub fn new() -> Self {
        Self::with_registry(ExporterRegistry::with_defaults())
    }

    /// Create a session using a custom exporter registry.
    pub fn with_registry(registry: ExporterRegistry) -> Self {
        Self {
            registry,
            filenames: FilenamePolicy::new(),
        }
    }

    /// Get the exporter registry.
    pub fn registry(&self) -> &ExporterRegistry {
        &self.registry
    }

    /// Get the filename policy.
    pub fn filenames(&self) -> &FilenamePolicy {
        &self.filenames
    }

    /// Export `markdown` in `format` and name the artifact.
    pub fn export(
        &self,
        subject: Option<&str>,
        markdown: &str,
        format: ExportFormat,
        options: &RenderOptions,
    ) -> Result<ExportArtifact> {
        let source = SourceDocument::parse(markdown);
        self.export_source(subject, &source, format.key(), options)
    }

    /// Export an already parsed document using the exporter registered for
    /// `key`.
    pub fn export_source(
        &self,
        subject: Option<&str>,
        source: &SourceDocument,
        key: &str,
        options: &RenderOptions,
    ) -> Result<ExportArtifact> {
        let exporter = self
            .registry
            .get(key)
            .ok_or_else(|| Error::UnsupportedFormat(key.to_string()))?;

        let bytes = exporter.export(source, options)?;
        let base = base_name(subject, &source.text);
        let filename = self.filenames.claim(&base, exporter.extension());

        log::info!("Exported {} ({} bytes)", filename, bytes.len());
        Ok(ExportArtifact {
            filename,
            mime_type: exporter.mime_type(),
            bytes,
        })
    }
}
