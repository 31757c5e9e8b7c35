//! Immutable point table with O(1) lookup by id.

use super::{Point, RowRecord, TableError};

/// Outcome of building a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Rows kept as points
    pub kept: usize,
    /// Rows dropped for non-finite coordinates
    pub dropped: usize,
}

/// All plotted points of a session. Read-only once built.
#[derive(Debug, Clone)]
pub struct PointIndexTable {
    points: Vec<Point>,
    report: BuildReport,
}

impl PointIndexTable {
    /// Build the table from rows in order.
    ///
    /// Rows with a NaN or infinite coordinate are dropped and counted; ids are
    /// assigned by position among the kept rows. Fails only when no row is
    /// left to plot.
    pub fn build(rows: impl IntoIterator<Item = RowRecord>) -> Result<Self, TableError> {
        let mut points = Vec::new();
        let mut dropped = 0;

        for row in rows {
            if row.has_finite_coord() {
                points.push(Point::from_row(points.len(), row));
            } else {
                log::trace!("Dropping row with non-finite coordinates {:?}", row.coord);
                dropped += 1;
            }
        }

        if dropped > 0 {
            log::warn!(
                "Dropped {} row(s) with non-finite coordinates, {} kept",
                dropped,
                points.len()
            );
        }

        if points.is_empty() {
            return Err(TableError::Empty { dropped });
        }

        log::info!("Built point table with {} points", points.len());

        let report = BuildReport {
            kept: points.len(),
            dropped,
        };
        Ok(Self { points, report })
    }

    /// Look up a point by id.
    pub fn lookup(&self, id: usize) -> Result<&Point, TableError> {
        self.points.get(id).ok_or(TableError::OutOfRange {
            id,
            size: self.points.len(),
        })
    }

    /// Number of points.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Check if the table has no points (never true for a built table).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rows kept and dropped while building.
    pub fn report(&self) -> BuildReport {
        self.report
    }

    /// Iterate over points in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointIndexTable {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(coords: &[(f64, f64)]) -> Vec<RowRecord> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| RowRecord::new(x, y, format!("img_{}.png", i)))
            .collect()
    }

    #[test]
    fn test_build_drops_non_finite_rows() {
        let table = PointIndexTable::build(rows(&[(0.0, 0.0), (1.0, 1.0), (f64::NAN, 2.0)])).unwrap();

        assert_eq!(table.size(), 2);
        assert_eq!(table.report(), BuildReport { kept: 2, dropped: 1 });
    }

    #[test]
    fn test_ids_are_positions_after_filtering() {
        let table = PointIndexTable::build(rows(&[
            (f64::INFINITY, 0.0),
            (1.0, 1.0),
            (2.0, f64::NEG_INFINITY),
            (3.0, 3.0),
        ]))
        .unwrap();

        assert_eq!(table.size(), 2);
        assert_eq!(table.lookup(0).unwrap().image_ref, "img_1.png");
        assert_eq!(table.lookup(1).unwrap().image_ref, "img_3.png");
    }

    #[test]
    fn test_lookup_round_trips_every_id() {
        let coords: Vec<_> = (0..50).map(|i| (i as f64, -(i as f64))).collect();
        let table = PointIndexTable::build(rows(&coords)).unwrap();

        for id in 0..table.size() {
            assert_eq!(table.lookup(id).unwrap().id, id);
        }
        assert!(table.iter().enumerate().all(|(i, p)| p.id == i));
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = PointIndexTable::build(rows(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();

        for id in [2, 3, 100, usize::MAX] {
            assert!(matches!(
                table.lookup(id),
                Err(TableError::OutOfRange { id: got, size: 2 }) if got == id
            ));
        }
    }

    #[test]
    fn test_all_rows_invalid_is_fatal() {
        let err = PointIndexTable::build(rows(&[(f64::NAN, 0.0), (0.0, f64::NAN)])).unwrap_err();
        assert!(matches!(err, TableError::Empty { dropped: 2 }));

        let err = PointIndexTable::build(Vec::new()).unwrap_err();
        assert!(matches!(err, TableError::Empty { dropped: 0 }));
    }
}
