/// Uniform grid index over point positions.
///
/// Entities are stored as indices into the caller's position slice, grouped by
/// cell in an offset array: `cell_offsets[i]..cell_offsets[i + 1]` is the
/// range of `entity_indices` that lives in cell `i`. Within a cell, indices
/// keep the order of the input slice.
///
/// Queries return a superset of the entities in range (every entity in the
/// touched cells); callers do the exact distance test.
///
/// # Examples
/// ```
/// use biotope_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(10.0, 100, 100);
/// spatial.build(&[(15.0, 15.0), (25.0, 25.0), (85.0, 85.0)]);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// assert!(nearby.contains(&0) && nearby.contains(&1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: u16,
    pub height: u16,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    pub fn new(cell_size: f64, width: u16, height: u16) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = ((f64::from(width) / cell_size).ceil() as usize).max(1);
        let rows = ((f64::from(height) / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Cell index for a world coordinate. Points outside the world are
    /// clamped to the border cells; non-finite points have no cell.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let cx = ((x / self.cell_size).floor().max(0.0) as usize).min(self.cols - 1);
        let cy = ((y / self.cell_size).floor().max(0.0) as usize).min(self.rows - 1);
        Some(cy * self.cols + cx)
    }

    pub fn build(&mut self, positions: &[(f64, f64)]) {
        let cell_count = self.cols * self.rows;

        let mut counts = vec![0usize; cell_count];
        for &(x, y) in positions {
            if let Some(idx) = self.get_cell_idx(x, y) {
                counts[idx] += 1;
            }
        }

        self.cell_offsets.clear();
        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);
        let mut cursor = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                self.entity_indices[cursor[cell_idx]] = entity_idx;
                cursor[cell_idx] += 1;
            }
        }
    }

    fn cell_range(&self, x: f64, y: f64, radius: f64) -> (i64, i64, i64, i64) {
        let min_cx = ((x - radius) / self.cell_size).floor() as i64;
        let max_cx = ((x + radius) / self.cell_size).floor() as i64;
        let min_cy = ((y - radius) / self.cell_size).floor() as i64;
        let max_cy = ((y + radius) / self.cell_size).floor() as i64;
        (
            min_cx.max(0),
            max_cx.min(self.cols as i64 - 1),
            min_cy.max(0),
            max_cy.min(self.rows as i64 - 1),
        )
    }

    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy as usize * self.cols + cx as usize;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    /// Candidate indices near a point, sorted ascending so that iteration
    /// follows the order of the input slice.
    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(x, y, radius, |idx| result.push(idx));
        result.sort_unstable();
    }

    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        let mut count = 0;
        self.query_callback(x, y, radius, |_| count += 1);
        count
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_spatial_hash_query_finds_nearby() {
        let mut sh = SpatialHash::new(5.0, 20, 20);
        sh.build(&[(1.0, 1.0), (2.0, 2.0), (10.0, 10.0)]);

        let mut count = 0;
        sh.query_callback(1.5, 1.5, 2.0, |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_spatial_hash_clear() {
        let mut sh = SpatialHash::new(5.0, 20, 20);
        sh.build(&[(1.0, 1.0)]);
        sh.build(&[]);
        assert_eq!(sh.count_nearby(1.0, 1.0, 10.0), 0);
    }

    #[test]
    fn test_points_on_far_edge_are_indexed() {
        let mut sh = SpatialHash::new(5.0, 20, 20);
        sh.build(&[(20.0, 20.0), (-1.0, 3.0)]);
        assert_eq!(sh.count_nearby(19.0, 19.0, 1.0), 1);
        assert_eq!(sh.count_nearby(0.0, 3.0, 1.0), 1);
    }

    #[test]
    fn test_query_into_is_sorted() {
        let mut sh = SpatialHash::new(5.0, 20, 20);
        sh.build(&[(12.0, 12.0), (1.0, 1.0), (11.0, 1.0), (1.0, 11.0)]);
        let mut out = Vec::new();
        sh.query_into(10.0, 10.0, 15.0, &mut out);
        assert_eq!(out, vec![0, 1, 2, 3]);
    }
}
