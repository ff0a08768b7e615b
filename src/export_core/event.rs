use std::path::PathBuf;
use time::OffsetDateTime;

/// An event row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub name: Option<String>,
}

impl Event {
    /// The event name, if it is present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A photo row belonging to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Path of the original file (a RAW file when `backing` is set).
    pub source: PathBuf,
    /// Developed JPEG linked to a RAW source.
    pub backing: Option<PathBuf>,
}

impl PhotoRecord {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        PhotoRecord {
            source: source.into(),
            backing: None,
        }
    }

    pub fn with_backing(mut self, backing: impl Into<PathBuf>) -> Self {
        self.backing = Some(backing.into());
        self
    }
}

/// A single file copy planned for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CopyTask {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        CopyTask {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Format a timestamp as the `YYYY-MM` prefix used for event directories.
pub fn event_year_month(earliest_exposure: &OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}",
        earliest_exposure.year(),
        u8::from(earliest_exposure.month())
    )
}
