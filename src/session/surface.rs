//! Rendering surfaces: where the figure and tooltips end up.

use std::io::{self, Write};

use serde::Serialize;

use super::event::{BoundingBox, HoverPoint};
use super::figure::Figure;
use super::placement::TooltipDirection;
use crate::hover::TooltipPayload;
use crate::table::ClusterLabel;

/// Image element of a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayImage {
    /// Data URI or URL
    pub src: String,
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
}

/// A tooltip ready to be drawn next to a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub point_id: usize,
    pub direction: TooltipDirection,
    pub bbox: Option<BoundingBox>,
    /// `None` when the thumbnail could not be rendered
    pub image: Option<OverlayImage>,
    pub unavailable: bool,
    /// `label: value` lines, followed by the cluster line when present
    pub lines: Vec<String>,
    pub cluster: Option<ClusterLabel>,
}

impl Overlay {
    /// Lay out a resolved payload for the point the pointer is on.
    pub fn new(hover: &HoverPoint, payload: &TooltipPayload) -> Self {
        let (width, height) = payload.display_size;
        let image = payload.thumbnail.src().map(|src| OverlayImage { src, width, height });

        let mut lines: Vec<String> = payload
            .fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();
        if let Some(cluster) = &payload.cluster {
            lines.push(format!("Cluster: {}", cluster));
        }

        Self {
            point_id: payload.point_id,
            direction: TooltipDirection::for_y(hover.y),
            bbox: hover.bbox,
            unavailable: image.is_none(),
            image,
            lines,
            cluster: payload.cluster.clone(),
        }
    }
}

/// Something that can draw the scatter figure and one tooltip at a time.
pub trait PlotSurface {
    /// Draw the figure. Called once when a session starts.
    fn render_figure(&mut self, figure: &Figure) -> io::Result<()>;

    /// Show `overlay`, replacing any visible tooltip.
    fn show_tooltip(&mut self, overlay: &Overlay) -> io::Result<()>;

    /// Remove the visible tooltip, if any.
    fn hide_tooltip(&mut self) -> io::Result<()>;
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Message<'a> {
    Figure(&'a Figure),
    Tooltip(&'a Overlay),
    Hide,
}

/// Writes every surface call as one JSON object per line.
///
/// The consumer on the other end of the stream owns the display, so there is
/// no setting to launch one; whatever reads the lines decides how to show them.
///
/// ```text
/// {"type":"figure","title":"...","points":[...]}
/// {"type":"tooltip","point_id":3,"direction":"below",...}
/// {"type":"hide"}
/// ```
pub struct JsonLinesSurface<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the surface, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, message: &Message<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> PlotSurface for JsonLinesSurface<W> {
    fn render_figure(&mut self, figure: &Figure) -> io::Result<()> {
        self.emit(&Message::Figure(figure))
    }

    fn show_tooltip(&mut self, overlay: &Overlay) -> io::Result<()> {
        self.emit(&Message::Tooltip(overlay))
    }

    fn hide_tooltip(&mut self) -> io::Result<()> {
        self.emit(&Message::Hide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::Thumbnail;

    fn payload(thumbnail: Thumbnail) -> TooltipPayload {
        TooltipPayload {
            point_id: 7,
            coord: (0.5, 2.0),
            thumbnail,
            display_size: (128, 96),
            fields: vec![("name".to_string(), "cat1".to_string())],
            cluster: Some(ClusterLabel::from("A")),
        }
    }

    fn hover(y: f64) -> HoverPoint {
        HoverPoint {
            id: 7,
            x: 0.5,
            y,
            bbox: Some(BoundingBox {
                x0: 10.0,
                x1: 14.0,
                y0: 20.0,
                y1: 24.0,
            }),
        }
    }

    #[test]
    fn test_overlay_layout() {
        let overlay = Overlay::new(
            &hover(2.0),
            &payload(Thumbnail::Url("https://example.org/a.jpg".into())),
        );

        assert_eq!(overlay.direction, TooltipDirection::Below);
        assert_eq!(overlay.lines, vec!["name: cat1", "Cluster: A"]);
        let image = overlay.image.unwrap();
        assert_eq!(image.src, "https://example.org/a.jpg");
        assert_eq!((image.width, image.height), (128, 96));
        assert!(!overlay.unavailable);
        assert_eq!(overlay.bbox.unwrap().x1, 14.0);
    }

    #[test]
    fn test_overlay_unavailable() {
        let overlay = Overlay::new(&hover(0.0), &payload(Thumbnail::Unavailable));
        assert!(overlay.unavailable);
        assert!(overlay.image.is_none());
        assert_eq!(overlay.direction, TooltipDirection::Above);
        assert_eq!(overlay.lines.len(), 2);
    }

    #[test]
    fn test_json_lines_output() {
        let mut surface = JsonLinesSurface::new(Vec::new());
        let overlay = Overlay::new(&hover(0.0), &payload(Thumbnail::Unavailable));
        surface.show_tooltip(&overlay).unwrap();
        surface.hide_tooltip().unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "tooltip");
        assert_eq!(lines[0]["direction"], "above");
        assert_eq!(lines[0]["image"], serde_json::Value::Null);
        assert_eq!(lines[0]["unavailable"], true);
        assert_eq!(lines[0]["cluster"], "A");
        assert_eq!(lines[1], serde_json::json!({ "type": "hide" }));
    }
}
