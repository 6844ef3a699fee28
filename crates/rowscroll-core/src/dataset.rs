//! The fixed, ordered list of film rows.
//!
//! Rows are validated and their media resolved once, when the dataset is
//! built. Afterwards the dataset is immutable and a row's identity is its
//! index.

use crate::media::MediaSource;
use serde::{Deserialize, Serialize};

/// A row as supplied by the manifest, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowRecord {
    /// Short identifier, e.g. `KK–33`
    pub code: String,
    /// Film title
    pub title: String,
    /// Optional line of dialogue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    /// Director(s)
    pub author: String,
    /// Outbound link, also the media source unless `direct_media` is set
    pub media_url: String,
    /// Directly playable video resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_media: Option<String>,
}

impl RowRecord {
    /// Record with the required fields.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            author: author.into(),
            media_url: media_url.into(),
            ..Self::default()
        }
    }

    /// Set the quote.
    #[must_use]
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    /// Set a directly playable resource.
    #[must_use]
    pub fn with_direct_media(mut self, url: impl Into<String>) -> Self {
        self.direct_media = Some(url.into());
        self
    }
}

/// A validated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Position in the dataset
    pub id: usize,
    /// Short identifier
    pub code: String,
    /// Film title
    pub title: String,
    /// Optional line of dialogue (never blank)
    pub quote: Option<String>,
    /// Director(s)
    pub author: String,
    /// Outbound link target, exposed verbatim
    pub media_url: String,
    /// Resolved preview media
    pub media: MediaSource,
}

/// Dataset validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// A required field is empty or whitespace
    #[error("row {index}: required field `{field}` is blank")]
    BlankField {
        /// Row index
        index: usize,
        /// Field name
        field: &'static str,
    },
}

/// Immutable ordered rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Validate records and resolve their media.
    ///
    /// `code`, `title`, `author` and `media_url` must be non-blank. Text
    /// fields are trimmed; `media_url` is kept as given. A blank quote is
    /// treated as absent. An empty dataset is valid.
    pub fn new(records: impl IntoIterator<Item = RowRecord>) -> Result<Self, DatasetError> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::validate(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rows = rows.len(), "dataset loaded");
        Ok(Self { rows })
    }

    fn validate(index: usize, record: RowRecord) -> Result<Row, DatasetError> {
        let required = |field: &'static str, value: String| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(DatasetError::BlankField { index, field })
            } else {
                Ok(trimmed.to_string())
            }
        };

        let code = required("code", record.code)?;
        let title = required("title", record.title)?;
        let author = required("author", record.author)?;
        // exposed verbatim; only its trimmed form must be non-blank
        if record.media_url.trim().is_empty() {
            return Err(DatasetError::BlankField {
                index,
                field: "media_url",
            });
        }
        let media_url = record.media_url;
        let media = MediaSource::resolve(&media_url, record.direct_media.as_deref());
        let quote = record
            .quote
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Ok(Row {
            id: index,
            code,
            title,
            quote,
            author,
            media_url,
            media,
        })
    }

    /// Row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
