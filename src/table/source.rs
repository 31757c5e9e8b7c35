//! Reading the embedding table produced by the dimensionality-reduction step.
//!
//! The input is a CSV file with a header row. Coordinate and image columns are
//! required; display, cluster and size columns are optional and a missing one
//! is reported once and then ignored.

use std::borrow::Cow;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{ClusterLabel, RowRecord, TableError};

/// Which CSV columns feed which point attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBindings {
    /// Column with the first embedding coordinate
    #[serde(default = "default_x_column")]
    pub x: String,
    /// Column with the second embedding coordinate
    #[serde(default = "default_y_column")]
    pub y: String,
    /// Column with the image path or URL
    #[serde(default = "default_image_column")]
    pub image: String,
    /// Columns shown in the tooltip, in this order
    #[serde(default = "default_display_columns")]
    pub display: Vec<String>,
    /// Column used to colour points
    #[serde(default = "default_cluster_column")]
    pub cluster: Option<String>,
    /// Column with a per-row thumbnail width override
    #[serde(default)]
    pub width: Option<String>,
    /// Column with a per-row thumbnail height override
    #[serde(default)]
    pub height: Option<String>,
}

fn default_x_column() -> String {
    "umap_embedding_1".to_string()
}

fn default_y_column() -> String {
    "umap_embedding_2".to_string()
}

fn default_image_column() -> String {
    "url".to_string()
}

fn default_display_columns() -> Vec<String> {
    vec!["image".to_string()]
}

fn default_cluster_column() -> Option<String> {
    Some("k_means".to_string())
}

impl Default for ColumnBindings {
    fn default() -> Self {
        Self {
            x: default_x_column(),
            y: default_y_column(),
            image: default_image_column(),
            display: default_display_columns(),
            cluster: default_cluster_column(),
            width: None,
            height: None,
        }
    }
}

/// Resolved header positions for one file.
struct ColumnIndices {
    x: usize,
    y: usize,
    image: usize,
    display: Vec<(String, usize)>,
    cluster: Option<usize>,
    size: Option<(usize, usize)>,
}

impl ColumnIndices {
    fn resolve(headers: &csv::ByteRecord, bindings: &ColumnBindings) -> Result<Self, TableError> {
        let position = |name: &str| headers.iter().position(|h| decode(h).trim() == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| TableError::MissingColumn {
                column: name.to_string(),
            })
        };
        let optional = |name: &str, role: &str| {
            let found = position(name);
            if found.is_none() {
                log::warn!("{} column '{}' not found, ignoring it", role, name);
            }
            found
        };

        let display = bindings
            .display
            .iter()
            .filter_map(|name| optional(name, "Display").map(|i| (name.clone(), i)))
            .collect();

        let cluster = bindings
            .cluster
            .as_deref()
            .and_then(|name| optional(name, "Cluster"));

        let size = match (bindings.width.as_deref(), bindings.height.as_deref()) {
            (Some(w), Some(h)) => optional(w, "Width").zip(optional(h, "Height")),
            (None, None) => None,
            _ => {
                log::warn!("Size override needs both width and height columns, ignoring it");
                None
            }
        };

        Ok(Self {
            x: required(&bindings.x)?,
            y: required(&bindings.y)?,
            image: required(&bindings.image)?,
            display,
            cluster,
            size,
        })
    }

    fn row(&self, record: &csv::ByteRecord) -> RowRecord {
        let cell = |i: usize| decode(record.get(i).unwrap_or(&[]));
        // Unparseable coordinates become NaN so the table build counts them
        let coord = |i: usize| cell(i).trim().parse::<f64>().unwrap_or(f64::NAN);
        let pixels = |i: usize| cell(i).trim().parse::<u32>().ok().filter(|&v| v > 0);

        RowRecord {
            coord: (coord(self.x), coord(self.y)),
            image_ref: cell(self.image).trim().to_string(),
            display_size: self.size.and_then(|(w, h)| pixels(w).zip(pixels(h))),
            fields: self
                .display
                .iter()
                .map(|(name, i)| (name.clone(), cell(*i).to_string()))
                .collect(),
            cluster: self.cluster.and_then(|i| ClusterLabel::parse(&cell(i))),
        }
    }
}

/// Read rows from a CSV file, keeping a random `display_fraction` of them.
pub fn load_rows(
    path: &Path,
    bindings: &ColumnBindings,
    display_fraction: f64,
) -> Result<Vec<RowRecord>, TableError> {
    validate_fraction(display_fraction)?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let rows = read_rows(&mut reader, bindings)?;
    log::info!("Read {} rows from {:?}", rows.len(), path);

    Ok(subsample(rows, display_fraction, &mut rand::thread_rng()))
}

/// Cells are decoded lossily: invalid UTF-8 becomes U+FFFD instead of
/// failing the row.
fn decode(cell: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cell)
}

/// Read every row from an open CSV reader.
///
/// A record the parser rejects is logged and returned as an unreadable row,
/// which `PointIndexTable::build` drops and counts. Only a missing required
/// column or an I/O failure aborts the read.
pub fn read_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    bindings: &ColumnBindings,
) -> Result<Vec<RowRecord>, TableError> {
    let columns = ColumnIndices::resolve(reader.byte_headers()?, bindings)?;

    let mut rows = Vec::new();
    let mut unreadable = 0;
    for record in reader.byte_records() {
        match record {
            Ok(record) => rows.push(columns.row(&record)),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                log::debug!("Unreadable CSV record: {}", e);
                unreadable += 1;
                rows.push(RowRecord::unreadable());
            }
        }
    }

    if unreadable > 0 {
        log::warn!("{} CSV record(s) could not be read", unreadable);
    }
    Ok(rows)
}

/// Keep a uniform random subset of `round(len * fraction)` items, in order.
pub fn subsample<T, G: Rng + ?Sized>(items: Vec<T>, fraction: f64, rng: &mut G) -> Vec<T> {
    if fraction >= 1.0 {
        return items;
    }

    let total = items.len();
    let amount = ((total as f64) * fraction).round() as usize;
    let mut keep = vec![false; total];
    for index in rand::seq::index::sample(rng, total, amount.min(total)).into_vec() {
        keep[index] = true;
    }

    log::debug!("Subsampled {} of {} rows", amount, total);

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}

/// Check that a display fraction lies in `(0, 1]`.
pub fn validate_fraction(fraction: f64) -> Result<(), TableError> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(TableError::InvalidFraction(fraction))
    }
}
