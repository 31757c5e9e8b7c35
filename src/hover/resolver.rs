//! Resolves hovered point ids into tooltip payloads.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{DisplayConfig, Resolution, TooltipPayload};
use crate::table::{Point, PointIndexTable};
use crate::thumbnail::{
    RenderOptions, Thumbnail, ThumbnailCache, ThumbnailCodec, ThumbnailKey, is_remote_ref,
};

/// Looks up points and renders their thumbnails on demand.
///
/// Shareable across threads: the table is read-only and the thumbnail cache
/// is the only mutable state, behind a single lock.
pub struct HoverResolver {
    table: Arc<PointIndexTable>,
    codec: ThumbnailCodec,
    cache: Mutex<ThumbnailCache>,
}

impl HoverResolver {
    /// Create a resolver without caching.
    pub fn new(table: Arc<PointIndexTable>) -> Self {
        Self::with_cache(table, 0)
    }

    /// Create a resolver caching up to `capacity` encoded thumbnails.
    pub fn with_cache(table: Arc<PointIndexTable>, capacity: usize) -> Self {
        Self {
            table,
            codec: ThumbnailCodec::new(),
            cache: Mutex::new(ThumbnailCache::new(capacity)),
        }
    }

    /// Replace the codec (e.g. to change JPEG quality).
    pub fn with_codec(mut self, codec: ThumbnailCodec) -> Self {
        self.codec = codec;
        self
    }

    /// The table this resolver reads from.
    pub fn table(&self) -> &Arc<PointIndexTable> {
        &self.table
    }

    /// Number of thumbnails currently cached.
    pub fn cached_thumbnails(&self) -> usize {
        self.cache.lock().len()
    }

    /// Resolve a hover event.
    ///
    /// `None` (pointer over no point) yields `NoSelection`. An id outside the
    /// table is a caller bug: it is logged and also yields `NoSelection`.
    pub fn resolve(&self, id: Option<usize>, config: &DisplayConfig) -> Resolution {
        let Some(id) = id else {
            return Resolution::NoSelection;
        };

        let point = match self.table.lookup(id) {
            Ok(point) => point,
            Err(e) => {
                log::error!("Hover event referenced a nonexistent point: {}", e);
                return Resolution::NoSelection;
            }
        };

        let thumbnail = if is_remote_ref(&point.image_ref) {
            Thumbnail::Url(point.image_ref.clone())
        } else {
            self.render_thumbnail(point, config.render_options(point))
        };

        log::debug!(
            "Resolved point {} ({})",
            id,
            if thumbnail.is_unavailable() {
                "no thumbnail"
            } else {
                "with thumbnail"
            }
        );

        Resolution::Tooltip(TooltipPayload {
            point_id: point.id,
            coord: point.coord,
            thumbnail,
            display_size: config.display_size(point),
            fields: point.fields.clone(),
            cluster: if config.show_cluster {
                point.cluster.clone()
            } else {
                None
            },
        })
    }

    fn render_thumbnail(&self, point: &Point, options: RenderOptions) -> Thumbnail {
        let key = ThumbnailKey {
            point_id: point.id,
            options,
        };

        if let Some(artifact) = self.cache.lock().get(&key) {
            log::trace!("Thumbnail cache hit for point {}", point.id);
            return Thumbnail::Encoded(artifact);
        }

        // Render outside the lock so a slow decode never blocks cache readers
        match self.codec.render(&point.image_ref, &options) {
            Ok(artifact) => {
                self.cache.lock().insert(key, artifact.clone());
                Thumbnail::Encoded(artifact)
            }
            Err(e) => {
                log::warn!("Thumbnail unavailable for point {}: {}", point.id, e);
                Thumbnail::Unavailable
            }
        }
    }
}
