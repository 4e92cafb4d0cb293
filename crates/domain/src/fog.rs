//! Fog-of-war visibility grid for a tabletop map.
//!
//! A direct-mutation boolean matrix: `true` means the cell is covered,
//! `false` means revealed. The DM toggles cells one at a time; there is no
//! reveal propagation, line-of-sight, or undo.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Default grid height used when a map has no stored grid.
pub const DEFAULT_FOG_ROWS: usize = 20;
/// Default grid width used when a map has no stored grid.
pub const DEFAULT_FOG_COLS: usize = 30;
/// Largest extent accepted on either axis.
pub const MAX_FOG_EXTENT: usize = 500;

/// Extent of a fog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridDimensions")]
pub struct GridDimensions {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Deserialize)]
struct RawGridDimensions {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawGridDimensions> for GridDimensions {
    type Error = DomainError;

    fn try_from(raw: RawGridDimensions) -> Result<Self, Self::Error> {
        GridDimensions::new(raw.rows, raw.cols)
    }
}

impl GridDimensions {
    /// Both extents must lie in `1..=MAX_FOG_EXTENT`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DomainError> {
        let valid = 1..=MAX_FOG_EXTENT;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(DomainError::validation(format!(
                "Fog grid must be between 1x1 and {max}x{max}, got {}x{}",
                rows,
                cols,
                max = MAX_FOG_EXTENT
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_FOG_ROWS,
            cols: DEFAULT_FOG_COLS,
        }
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Per-map visibility grid.
///
/// Serialized as `{ "grid": [[bool, ...], ...] }`, one inner array per row.
/// Deserialization rejects empty or ragged grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredFogGrid", into = "StoredFogGrid")]
pub struct FogGrid {
    dims: GridDimensions,
    /// Row-major cells
    cells: Vec<bool>,
}

impl FogGrid {
    /// A fully covered grid of the given size.
    pub fn create_default(dims: GridDimensions) -> Self {
        Self {
            dims,
            cells: vec![true; dims.cell_count()],
        }
    }

    /// Build from nested rows, validating that the grid is rectangular.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, DomainError> {
        let cols = rows.first().map_or(0, Vec::len);
        let dims = GridDimensions::new(rows.len(), cols)?;
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(DomainError::validation(format!(
                "Fog grid row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        Ok(Self {
            dims,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Cell state, or `None` outside the grid.
    pub fn is_covered(&self, row: usize, col: usize) -> Option<bool> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn covered_count(&self) -> usize {
        self.cells.iter().filter(|&&covered| covered).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.len() - self.covered_count()
    }

    /// Flip exactly one cell and return its new state.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the requester is not the DM
    /// - `OutOfBounds` if `(row, col)` lies outside the grid
    ///
    /// On error the grid is unchanged.
    pub fn toggle_cell(
        &mut self,
        row: usize,
        col: usize,
        requester_is_dm: bool,
    ) -> Result<bool, DomainError> {
        if !requester_is_dm {
            return Err(DomainError::unauthorized("only the DM can edit the fog of war"));
        }
        let index = self
            .index(row, col)
            .ok_or_else(|| DomainError::out_of_bounds(row, col, self.dims.rows, self.dims.cols))?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    /// Replacement grid for a new map image. Nothing of the current grid is
    /// carried over.
    pub fn resize(&self, dims: GridDimensions) -> FogGrid {
        FogGrid::create_default(dims)
    }

    /// Nested row view, as persisted.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.dims.cols)
            .map(<[bool]>::to_vec)
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.dims
            .contains(row, col)
            .then(|| row * self.dims.cols + col)
    }
}

impl Default for FogGrid {
    fn default() -> Self {
        Self::create_default(GridDimensions::default())
    }
}

/// Storage shape of a fog grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFogGrid {
    pub grid: Vec<Vec<bool>>,
}

impl TryFrom<StoredFogGrid> for FogGrid {
    type Error = DomainError;

    fn try_from(stored: StoredFogGrid) -> Result<Self, Self::Error> {
        FogGrid::from_rows(stored.grid)
    }
}

impl From<FogGrid> for StoredFogGrid {
    fn from(grid: FogGrid) -> Self {
        StoredFogGrid {
            grid: grid.to_rows(),
        }
    }
}
