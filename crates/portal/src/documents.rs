//! Employee document uploads: per-category validation and a simulated
//! upload with progress reporting.
//!
//! Nothing is transferred anywhere; an "upload" is a timer that advances a
//! progress value until it reaches 100.

use core::str::FromStr;
use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hrm_core::{DomainError, UploadId};

const MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Resume,
    #[serde(rename = "id")]
    Identification,
    Certificates,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::Resume,
        DocumentCategory::Identification,
        DocumentCategory::Certificates,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DocumentCategory::Resume => "resume",
            DocumentCategory::Identification => "id",
            DocumentCategory::Certificates => "certificates",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentCategory::Resume => "Resume/CV",
            DocumentCategory::Identification => "ID Documents",
            DocumentCategory::Certificates => "Certificates",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentCategory::Resume => "Upload your latest resume or CV",
            DocumentCategory::Identification => {
                "Government issued ID, passport, or driver's license"
            }
            DocumentCategory::Certificates => {
                "Professional certificates, degrees, and qualifications"
            }
        }
    }

    /// Accepted extensions, lowercase, with the leading dot.
    pub fn accepted_types(&self) -> &'static [&'static str] {
        match self {
            DocumentCategory::Resume => &[".pdf", ".doc", ".docx"],
            DocumentCategory::Identification | DocumentCategory::Certificates => {
                &[".pdf", ".jpg", ".jpeg", ".png"]
            }
        }
    }

    pub fn max_size_mb(&self) -> u64 {
        match self {
            DocumentCategory::Resume => 5,
            DocumentCategory::Identification | DocumentCategory::Certificates => 10,
        }
    }

    pub fn required(&self) -> bool {
        !matches!(self, DocumentCategory::Certificates)
    }
}

impl FromStr for DocumentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentCategory::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown document category: {s:?}")))
    }
}

/// Metadata of a file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    /// Bytes.
    pub size: u64,
    pub content_type: String,
}

impl FileMeta {
    /// Lowercased extension with its leading dot. A name without a dot is
    /// treated as all extension (`README` -> `.readme`).
    pub fn extension(&self) -> String {
        let ext = self.name.rsplit('.').next().unwrap_or_default();
        format!(".{}", ext.to_lowercase())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File type not supported. Accepted types: {accepted}")]
    UnsupportedType { accepted: String },

    #[error("File size too large. Maximum size: {max_mb}MB")]
    TooLarge { max_mb: u64 },
}

pub fn validate_file(file: &FileMeta, category: DocumentCategory) -> Result<(), UploadError> {
    let accepted = category.accepted_types();
    if !accepted.contains(&file.extension().as_str()) {
        return Err(UploadError::UnsupportedType {
            accepted: accepted.join(", "),
        });
    }
    if file.size > category.max_size_mb() * MB {
        return Err(UploadError::TooLarge {
            max_mb: category.max_size_mb(),
        });
    }
    Ok(())
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`.
///
/// Two decimals at most, trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: UploadId,
    pub category: DocumentCategory,
    pub file: FileMeta,
    pub uploaded_at: DateTime<Utc>,
    pub status: UploadStatus,
    /// 0..=100.
    pub progress: u8,
}

/// Advances upload progress on a fixed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSimulator {
    pub tick: Duration,
    /// Percentage points added per tick.
    pub step: u8,
}

impl Default for UploadSimulator {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            step: 15,
        }
    }
}

impl UploadSimulator {
    /// Validate `file`, then run the simulated upload, calling `on_progress`
    /// with each new progress value (strictly increasing, ending at 100).
    pub async fn upload<F>(
        &self,
        file: FileMeta,
        category: DocumentCategory,
        mut on_progress: F,
    ) -> Result<UploadedDocument, UploadError>
    where
        F: FnMut(u8),
    {
        validate_file(&file, category)?;

        let mut document = UploadedDocument {
            id: UploadId::new(),
            category,
            file,
            uploaded_at: Utc::now(),
            status: UploadStatus::Uploading,
            progress: 0,
        };
        let step = self.step.max(1);

        // A zero tick means no waiting between steps.
        let mut interval = (!self.tick.is_zero()).then(|| tokio::time::interval(self.tick));
        if let Some(interval) = interval.as_mut() {
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
        }
        while document.progress < 100 {
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }
            document.progress = document.progress.saturating_add(step).min(100);
            on_progress(document.progress);
        }

        document.status = UploadStatus::Completed;
        tracing::info!(
            upload_id = %document.id,
            category = category.id(),
            file = %document.file.name,
            "document upload completed"
        );
        Ok(document)
    }
}

/// Documents of one employee, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSet {
    files: BTreeMap<DocumentCategory, Vec<UploadedDocument>>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, document: UploadedDocument) {
        self.files.entry(document.category).or_default().push(document);
    }

    /// Remove a document; returns it if it was present.
    pub fn remove(&mut self, category: DocumentCategory, id: UploadId) -> Option<UploadedDocument> {
        let files = self.files.get_mut(&category)?;
        let idx = files.iter().position(|d| d.id == id)?;
        Some(files.remove(idx))
    }

    pub fn files(&self, category: DocumentCategory) -> &[UploadedDocument] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn completed(&self, category: DocumentCategory) -> usize {
        self.files(category)
            .iter()
            .filter(|d| d.status == UploadStatus::Completed)
            .count()
    }

    /// Completed share of a category's files, as a percentage.
    pub fn category_progress(&self, category: DocumentCategory) -> u8 {
        let total = self.files(category).len();
        if total == 0 {
            return 0;
        }
        ((self.completed(category) * 100) / total) as u8
    }

    /// Required categories without a completed document.
    pub fn missing_required(&self) -> Vec<DocumentCategory> {
        DocumentCategory::ALL
            .into_iter()
            .filter(|c| c.required() && self.completed(*c) == 0)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}
