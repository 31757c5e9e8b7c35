//! The scatter figure a session renders once at start.

use std::collections::HashMap;

use serde::Serialize;

use crate::color_utils::{DEFAULT_POINT_COLOR, category_color, ramp_color};
use crate::constants::{MARKER_SIZE, PLOT_SIZE};
use crate::table::{ClusterLabel, PointIndexTable};

/// One marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigurePoint {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub color: [u8; 3],
}

/// Titles and sizes of the scatter figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
    pub marker_size: f32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            title: "UMAP embeddings of the images".to_string(),
            x_title: "UMAP embeddings 0".to_string(),
            y_title: "UMAP embeddings 1".to_string(),
            width: PLOT_SIZE,
            height: PLOT_SIZE,
            marker_size: MARKER_SIZE,
        }
    }
}

/// Everything a surface needs to draw the scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
    pub marker_size: f32,
    pub points: Vec<FigurePoint>,
}

impl Figure {
    /// Build the figure for a table, colouring points by cluster.
    ///
    /// All-numeric cluster labels map onto a blue-to-red ramp between their
    /// minimum and maximum. Any other labels are categories, coloured in
    /// order of first appearance. Unlabelled points get the default colour.
    pub fn from_table(table: &PointIndexTable, options: &FigureOptions) -> Self {
        let colors = cluster_colors(table);
        let points = table
            .iter()
            .zip(colors)
            .map(|(point, color)| FigurePoint {
                id: point.id,
                x: point.coord.0,
                y: point.coord.1,
                color,
            })
            .collect();

        Self {
            title: options.title.clone(),
            x_title: options.x_title.clone(),
            y_title: options.y_title.clone(),
            width: options.width,
            height: options.height,
            marker_size: options.marker_size,
            points,
        }
    }
}

fn cluster_colors(table: &PointIndexTable) -> Vec<[u8; 3]> {
    let numeric: Option<Vec<Option<f64>>> = table
        .iter()
        .map(|p| match &p.cluster {
            Some(ClusterLabel::Numeric(v)) => Some(Some(*v)),
            Some(ClusterLabel::Category(_)) => None,
            None => Some(None),
        })
        .collect();

    if let Some(values) = numeric {
        let (min, max) = values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = max - min;

        return values
            .into_iter()
            .map(|v| match v {
                Some(v) if span > 0.0 => ramp_color(((v - min) / span) as f32),
                Some(_) => ramp_color(0.0),
                None => DEFAULT_POINT_COLOR,
            })
            .collect();
    }

    let mut categories: HashMap<String, usize> = HashMap::new();
    table
        .iter()
        .map(|p| match &p.cluster {
            Some(label) => {
                let next = categories.len();
                let index = *categories.entry(label.to_string()).or_insert(next);
                category_color(index)
            }
            None => DEFAULT_POINT_COLOR,
        })
        .collect()
}
