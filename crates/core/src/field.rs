//! The flow field: a grid of force vectors regenerated from coherent noise.
//!
//! A `FlowField` covers a surface of `width x height` units with square
//! cells of `cell_size` units. The grid has `width / cell_size + 1` columns
//! and `height / cell_size + 1` rows, so the far edges are always covered.
//! Vectors are stored in row-major order.
//!
//! Unlike a scalar lattice, surface lookups do not wrap: a position that
//! maps outside the grid has no field coverage.

use crate::config::FlowConfig;
use crate::error::EngineError;
use crate::noise_source::NoiseSource;
use crate::vector::Vector;
use std::f64::consts::TAU;

/// Offset added to the magnitude channel's noise coordinates so it does not
/// repeat the angle channel.
pub const MAGNITUDE_OFFSET: f64 = 40_000.0;

/// Spatial divisor for the magnitude channel.
const MAGNITUDE_ZOOM: f64 = 50.0;

/// Extra divisor applied on top of `angle_zoom` for the angle channel.
const ANGLE_ZOOM_SCALE: f64 = 5.0;

/// Divisor turning the `field_force` dial into a vector magnitude.
const FORCE_SCALE: f64 = 20.0;

/// Grid coordinates of the cell under a surface position.
///
/// Components are signed: positions left of or above the surface map to
/// negative indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    pub column: i64,
    pub row: i64,
}

/// Maps a surface position to the cell containing it.
///
/// Uses floor division, so `-0.5` maps to cell `-1`, not `0`. `cell_size`
/// must be non-zero.
pub fn surface_to_cell(position: Vector, cell_size: usize) -> CellIndex {
    let size = cell_size as f64;
    CellIndex {
        column: (position.x / size).floor() as i64,
        row: (position.y / size).floor() as i64,
    }
}

/// A `columns x rows` grid of vectors driven by two noise channels.
#[derive(Debug, Clone)]
pub struct FlowField {
    columns: usize,
    rows: usize,
    cell_size: usize,
    data: Vec<Vector>,
}

impl FlowField {
    /// Creates a zero-filled field covering a `width x height` surface.
    ///
    /// A zero-sized surface still yields the 1x1 minimum grid.
    ///
    /// Returns `EngineError::InvalidCellSize` if `cell_size` is zero and
    /// `EngineError::InvalidDimensions` if the cell count overflows `usize`.
    pub fn new(width: usize, height: usize, cell_size: usize) -> Result<Self, EngineError> {
        let (columns, rows) = Self::grid_size(width, height, cell_size)?;
        let len = columns
            .checked_mul(rows)
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        Ok(Self {
            columns,
            rows,
            cell_size,
            data: vec![Vector::ZERO; len],
        })
    }

    /// Grid dimensions for a surface: `(width / cell_size + 1, height / cell_size + 1)`.
    pub fn grid_size(
        width: usize,
        height: usize,
        cell_size: usize,
    ) -> Result<(usize, usize), EngineError> {
        if cell_size == 0 {
            return Err(EngineError::InvalidCellSize(cell_size));
        }
        let overflow = EngineError::InvalidDimensions { width, height };
        let columns = (width / cell_size).checked_add(1);
        let rows = (height / cell_size).checked_add(1);
        match (columns, rows) {
            (Some(c), Some(r)) => Ok((c, r)),
            _ => Err(overflow),
        }
    }

    /// Zeroes every cell, keeping the grid dimensions.
    pub fn clear(&mut self) {
        self.data.fill(Vector::ZERO);
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Surface units per cell along each axis.
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Read-only access to the row-major vectors.
    pub fn data(&self) -> &[Vector] {
        &self.data
    }

    /// True if `cell` lies within `[0, columns) x [0, rows)`.
    pub fn contains(&self, cell: CellIndex) -> bool {
        (0..self.columns as i64).contains(&cell.column) && (0..self.rows as i64).contains(&cell.row)
    }

    /// The vector stored at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: CellIndex) -> Option<Vector> {
        if !self.contains(cell) {
            return None;
        }
        let idx = cell.row as usize * self.columns + cell.column as usize;
        Some(self.data[idx])
    }

    /// Samples the field at a surface position.
    ///
    /// Returns `None` when the position maps outside the grid. Callers treat
    /// that as "no force this tick".
    pub fn sample_at(&self, x: f64, y: f64) -> Option<Vector> {
        self.get(surface_to_cell(Vector::new(x, y), self.cell_size))
    }

    /// Regenerates every cell from `noise` at noise time `time`.
    ///
    /// Each cell depends only on its own coordinates, `time`, and `config`,
    /// so identical inputs give a bit-identical grid.
    pub fn recompute(&mut self, time: f64, noise: &dyn NoiseSource, config: &FlowConfig) {
        let columns = self.columns;
        for (idx, cell) in self.data.iter_mut().enumerate() {
            let cx = (idx % columns) as f64;
            let cy = (idx / columns) as f64;
            let angle = noise.noise3(
                cx / config.angle_zoom / ANGLE_ZOOM_SCALE,
                cy / config.angle_zoom / ANGLE_ZOOM_SCALE,
                time,
            ) * TAU;
            let magnitude = noise.noise3(
                cx / MAGNITUDE_ZOOM + MAGNITUDE_OFFSET,
                cy / MAGNITUDE_ZOOM + MAGNITUDE_OFFSET,
                time,
            ) * config.field_force
                / FORCE_SCALE;
            // the magnitude channel only scales; direction comes from `angle` alone
            *cell = Vector::from_polar(angle, magnitude.abs());
        }
    }

    /// Iterates over all cells yielding `(column, row, vector)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Vector)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.columns, i / self.columns, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_source::{ConstantNoise, SimplexNoise};
    use std::f64::consts::FRAC_PI_2;

    /// Returns 0.5 on the magnitude channel and 0 on the angle channel.
    struct ChannelProbe;

    impl NoiseSource for ChannelProbe {
        fn reseed(&mut self, _seed: u32) {}
        fn noise3(&self, x: f64, _y: f64, _z: f64) -> f64 {
            if x >= MAGNITUDE_OFFSET {
                0.5
            } else {
                0.0
            }
        }
    }

    // -- Grid sizing --

    #[test]
    fn grid_is_floor_plus_one() {
        let field = FlowField::new(100, 100, 5).unwrap();
        assert_eq!(field.columns(), 21);
        assert_eq!(field.rows(), 21);
        assert_eq!(field.data().len(), 21 * 21);

        let field = FlowField::new(103, 47, 10).unwrap();
        assert_eq!((field.columns(), field.rows()), (11, 5));
    }

    #[test]
    fn zero_surface_gives_minimum_grid() {
        let field = FlowField::new(0, 0, 5).unwrap();
        assert_eq!((field.columns(), field.rows()), (1, 1));
    }

    #[test]
    fn zero_cell_size_is_error() {
        assert!(matches!(
            FlowField::new(10, 10, 0),
            Err(EngineError::InvalidCellSize(0))
        ));
    }

    #[test]
    fn overflowing_grid_is_error() {
        assert!(matches!(
            FlowField::new(usize::MAX, 4, 1),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(FlowField::new(usize::MAX / 2, usize::MAX / 2, 1).is_err());
    }

    #[test]
    fn new_field_is_zero_filled() {
        let field = FlowField::new(20, 20, 5).unwrap();
        assert!(field.data().iter().all(|v| v.is_zero()));
    }

    // -- Cell mapping --

    #[test]
    fn surface_to_cell_floors() {
        assert_eq!(
            surface_to_cell(Vector::new(12.9, 5.0), 5),
            CellIndex { column: 2, row: 1 }
        );
        assert_eq!(
            surface_to_cell(Vector::new(-0.5, -5.0), 5),
            CellIndex { column: -1, row: -1 }
        );
        assert_eq!(
            surface_to_cell(Vector::new(0.0, 4.999), 5),
            CellIndex { column: 0, row: 0 }
        );
    }

    #[test]
    fn get_rejects_out_of_grid_cells() {
        let field = FlowField::new(20, 10, 5).unwrap(); // 5 x 3
        assert!(field.get(CellIndex { column: 4, row: 2 }).is_some());
        assert!(field.get(CellIndex { column: 5, row: 0 }).is_none());
        assert!(field.get(CellIndex { column: 0, row: 3 }).is_none());
        assert!(field.get(CellIndex { column: -1, row: 0 }).is_none());
        assert!(field.get(CellIndex { column: 0, row: -1 }).is_none());
    }

    #[test]
    fn sample_at_returns_stored_vector() {
        let mut field = FlowField::new(20, 20, 5).unwrap();
        field.recompute(0.0, &ConstantNoise(0.25), &FlowConfig::default());
        let v = field.sample_at(7.0, 19.0).unwrap();
        assert_eq!(v, field.get(CellIndex { column: 1, row: 3 }).unwrap());
    }

    #[test]
    fn sample_at_outside_is_none() {
        let field = FlowField::new(20, 20, 5).unwrap();
        assert!(field.sample_at(-0.1, 3.0).is_none());
        assert!(field.sample_at(3.0, -2.0).is_none());
        assert!(field.sample_at(25.0, 3.0).is_none());
        assert!(field.sample_at(3.0, 25.0).is_none());
        // Last column/row extends one cell past the surface edge.
        assert!(field.sample_at(24.9, 24.9).is_some());
    }

    // -- Recompute --

    #[test]
    fn recompute_uses_angle_and_magnitude_channels() {
        let config = FlowConfig {
            field_force: 10.0,
            ..FlowConfig::default()
        };
        let mut field = FlowField::new(10, 10, 5).unwrap();
        field.recompute(0.0, &ChannelProbe, &config);
        // angle = 0, magnitude = 0.5 * 10 / 20
        for (_, _, v) in field.iter() {
            assert!((v.x - 0.25).abs() < 1e-12, "got {v:?}");
            assert!(v.y.abs() < 1e-12, "got {v:?}");
        }
    }

    /// Fixed angle channel, fixed (possibly negative) magnitude channel.
    struct SplitNoise {
        angle: f64,
        magnitude: f64,
    }

    impl NoiseSource for SplitNoise {
        fn reseed(&mut self, _seed: u32) {}
        fn noise3(&self, x: f64, _y: f64, _z: f64) -> f64 {
            if x >= MAGNITUDE_OFFSET {
                self.magnitude
            } else {
                self.angle
            }
        }
    }

    #[test]
    fn negative_magnitude_keeps_sampled_direction() {
        let config = FlowConfig {
            field_force: 10.0,
            ..FlowConfig::default()
        };
        let mut field = FlowField::new(10, 10, 5).unwrap();
        field.recompute(
            0.0,
            &SplitNoise {
                angle: 0.0,
                magnitude: -0.5,
            },
            &config,
        );
        for (_, _, v) in field.iter() {
            assert!((v.x - 0.25).abs() < 1e-12, "got {v:?}");
            assert!(v.y.abs() < 1e-12, "got {v:?}");
            assert!(v.angle().abs() < 1e-12);
        }

        // angle channel 0.125 -> pi/4; magnitude -0.8 * 10 / 20 -> length 0.4
        field.recompute(
            0.0,
            &SplitNoise {
                angle: 0.125,
                magnitude: -0.8,
            },
            &config,
        );
        for (_, _, v) in field.iter() {
            assert!((v.angle() - std::f64::consts::FRAC_PI_4).abs() < 1e-12, "got {v:?}");
            assert!((v.length() - 0.4).abs() < 1e-12, "got {v:?}");
        }
    }

    #[test]
    fn recompute_with_constant_noise() {
        let config = FlowConfig {
            field_force: 40.0,
            ..FlowConfig::default()
        };
        let mut field = FlowField::new(10, 10, 5).unwrap();
        field.recompute(3.0, &ConstantNoise(0.25), &config);
        // angle = 0.25 * 2pi = pi/2, magnitude = 0.25 * 40 / 20 = 0.5
        for (_, _, v) in field.iter() {
            assert!((v.angle() - FRAC_PI_2).abs() < 1e-12);
            assert!((v.length() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn clear_zeroes_cells_and_keeps_grid() {
        let mut field = FlowField::new(20, 10, 5).unwrap();
        field.recompute(1.0, &ConstantNoise(0.5), &FlowConfig::default());
        field.clear();
        assert_eq!((field.columns(), field.rows()), (5, 3));
        assert!(field.data().iter().all(Vector::is_zero));
    }

    #[test]
    fn recompute_matches_formula_per_cell() {
        let noise = SimplexNoise::new(11);
        let config = FlowConfig::default();
        let mut field = FlowField::new(40, 30, 5).unwrap();
        let t = 0.42;
        field.recompute(t, &noise, &config);
        for (cx, cy, v) in field.iter() {
            let (x, y) = (cx as f64, cy as f64);
            let angle = noise.noise3(x / config.angle_zoom / 5.0, y / config.angle_zoom / 5.0, t)
                * TAU;
            let length = noise.noise3(x / 50.0 + 40_000.0, y / 50.0 + 40_000.0, t)
                * config.field_force
                / 20.0;
            let expected = Vector::from_polar(angle, length.abs());
            assert_eq!(v.x.to_bits(), expected.x.to_bits(), "x at ({cx}, {cy})");
            assert_eq!(v.y.to_bits(), expected.y.to_bits(), "y at ({cx}, {cy})");
        }
    }

    #[test]
    fn recompute_is_bit_identical_for_same_time() {
        let noise = SimplexNoise::new(5);
        let config = FlowConfig::default();
        let mut a = FlowField::new(64, 48, 4).unwrap();
        let mut b = a.clone();
        a.recompute(1.5, &noise, &config);
        b.recompute(0.2, &noise, &config);
        b.recompute(1.5, &noise, &config);
        assert!(a
            .data()
            .iter()
            .zip(b.data())
            .all(|(va, vb)| va.x.to_bits() == vb.x.to_bits() && va.y.to_bits() == vb.y.to_bits()));
    }

    #[test]
    fn iter_is_row_major() {
        let field = FlowField::new(10, 5, 5).unwrap(); // 3 x 2
        let cells: Vec<(usize, usize)> = field.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grid_size_formula(
                w in 0_usize..5000,
                h in 0_usize..5000,
                cell in 1_usize..64,
            ) {
                let field = FlowField::new(w, h, cell).unwrap();
                prop_assert_eq!(field.columns(), w / cell + 1);
                prop_assert_eq!(field.rows(), h / cell + 1);
            }

            #[test]
            fn sample_coverage_matches_bounds(
                x in -100.0_f64..400.0,
                y in -100.0_f64..400.0,
            ) {
                let field = FlowField::new(200, 150, 7).unwrap();
                let cell = surface_to_cell(Vector::new(x, y), 7);
                let inside = cell.column >= 0
                    && cell.row >= 0
                    && (cell.column as usize) < field.columns()
                    && (cell.row as usize) < field.rows();
                prop_assert_eq!(field.sample_at(x, y).is_some(), inside);
            }

            #[test]
            fn magnitudes_bounded_by_force(
                seed: u32,
                t in 0.0_f64..10.0,
                force in 1.0_f64..=100.0,
            ) {
                let noise = SimplexNoise::new(seed);
                let config = FlowConfig { field_force: force, ..FlowConfig::default() };
                let mut field = FlowField::new(60, 60, 5).unwrap();
                field.recompute(t, &noise, &config);
                for v in field.data() {
                    prop_assert!(v.length() <= force / 20.0 + 1e-9);
                }
            }
        }
    }
}
