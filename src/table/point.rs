//! Point and row record types.

use serde::Serialize;

/// Label used to colour a point (and optionally shown in its tooltip).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClusterLabel {
    /// Categorical label, e.g. a class name
    Category(String),
    /// Numeric label, e.g. a k-means cluster id or a continuous score
    Numeric(f64),
}

impl ClusterLabel {
    /// Parse a table cell: numbers become `Numeric`, other text `Category`,
    /// blank cells no label.
    pub fn parse(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(ClusterLabel::Numeric(value)),
            _ => Some(ClusterLabel::Category(cell.to_string())),
        }
    }
}

impl std::fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterLabel::Category(name) => write!(f, "{}", name),
            ClusterLabel::Numeric(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ClusterLabel {
    fn from(name: &str) -> Self {
        ClusterLabel::Category(name.to_string())
    }
}

/// One input row, as produced by the embedding step.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    /// Embedding position (x, y)
    pub coord: (f64, f64),
    /// Local path or URL of the source image
    pub image_ref: String,
    /// Thumbnail size override (width, height)
    pub display_size: Option<(u32, u32)>,
    /// Metadata shown in the tooltip, in display order
    pub fields: Vec<(String, String)>,
    /// Colouring label
    pub cluster: Option<ClusterLabel>,
}

impl RowRecord {
    /// Create a row with no metadata.
    pub fn new(x: f64, y: f64, image_ref: impl Into<String>) -> Self {
        Self {
            coord: (x, y),
            image_ref: image_ref.into(),
            display_size: None,
            fields: Vec::new(),
            cluster: None,
        }
    }

    /// Append a metadata field.
    pub fn with_field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    /// Set the colouring label.
    pub fn with_cluster(mut self, cluster: impl Into<ClusterLabel>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Override the thumbnail size for this row.
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        self.display_size = Some((width, height));
        self
    }

    /// Placeholder for a record that could not be read at all. Its
    /// coordinates are NaN, so the table build drops and counts it.
    pub fn unreadable() -> Self {
        Self::new(f64::NAN, f64::NAN, "")
    }

    /// Whether both coordinates are finite.
    pub fn has_finite_coord(&self) -> bool {
        self.coord.0.is_finite() && self.coord.1.is_finite()
    }
}

/// A plotted point. `id` equals its position in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Stable 0-based id
    pub id: usize,
    /// Embedding position (x, y), always finite
    pub coord: (f64, f64),
    /// Local path or URL of the source image, checked only on hover
    pub image_ref: String,
    /// Thumbnail size override (width, height)
    pub display_size: Option<(u32, u32)>,
    /// Metadata shown in the tooltip, in display order
    pub fields: Vec<(String, String)>,
    /// Colouring label
    pub cluster: Option<ClusterLabel>,
}

impl Point {
    pub(crate) fn from_row(id: usize, row: RowRecord) -> Self {
        Self {
            id,
            coord: row.coord,
            image_ref: row.image_ref,
            display_size: row.display_size,
            fields: row.fields,
            cluster: row.cluster,
        }
    }

    /// Value of a metadata field by label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}
