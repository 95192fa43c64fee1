use super::{Centering, GhostBc, Grid};
use crate::StrError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Holds a multi-component field on the structured grid, including ghost layers
///
/// The values are stored row by row (y-major) with the components of each point contiguous.
/// Valid indices are `0 ≤ i < n[0]` and `0 ≤ j < n[1]`; ghost indices extend this range by `ng`
/// on each side, thus negative indices are allowed.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Field<T> {
    /// Location of the values
    centering: Centering,

    /// Number of valid points along each direction
    n: [usize; 2],

    /// Number of ghost layers
    ng: usize,

    /// Number of components
    ncomp: usize,

    /// Values (including ghosts)
    data: Vec<T>,
}

impl<T> Field<T>
where
    T: Copy + Default + Send + Sync,
{
    /// Allocates a new instance filled with the default value
    pub fn new(centering: Centering, grid: &Grid, ncomp: usize, ng: usize) -> Self {
        let n = match centering {
            Centering::Cell => [grid.nx, grid.ny],
            Centering::Node => [grid.nx + 1, grid.ny + 1],
        };
        let ncomp = usize::max(1, ncomp);
        let size = (n[0] + 2 * ng) * (n[1] + 2 * ng) * ncomp;
        Field {
            centering,
            n,
            ng,
            ncomp,
            data: vec![T::default(); size],
        }
    }

    /// Allocates a new cell-centered field
    pub fn new_cell(grid: &Grid, ncomp: usize, ng: usize) -> Self {
        Field::new(Centering::Cell, grid, ncomp, ng)
    }

    /// Allocates a new node-centered field
    pub fn new_node(grid: &Grid, ncomp: usize, ng: usize) -> Self {
        Field::new(Centering::Node, grid, ncomp, ng)
    }

    /// Returns the location of the values
    #[inline]
    pub fn centering(&self) -> Centering {
        self.centering
    }

    /// Returns the number of valid points along each direction
    #[inline]
    pub fn n_valid(&self) -> [usize; 2] {
        self.n
    }

    /// Returns the number of ghost layers
    #[inline]
    pub fn n_ghost(&self) -> usize {
        self.ng
    }

    /// Returns the number of components
    #[inline]
    pub fn n_comp(&self) -> usize {
        self.ncomp
    }

    /// Returns the number of values in one row (including ghosts)
    #[inline]
    fn row_stride(&self) -> usize {
        (self.n[0] + 2 * self.ng) * self.ncomp
    }

    /// Returns the position of the first component of point (i, j) in the data array
    #[inline]
    fn offset(&self, i: isize, j: isize) -> usize {
        let ng = self.ng as isize;
        debug_assert!(i >= -ng && i < self.n[0] as isize + ng);
        debug_assert!(j >= -ng && j < self.n[1] as isize + ng);
        ((j + ng) as usize) * self.row_stride() + ((i + ng) as usize) * self.ncomp
    }

    /// Returns a component of point (i, j)
    #[inline]
    pub fn get(&self, i: isize, j: isize, comp: usize) -> T {
        self.data[self.offset(i, j) + comp]
    }

    /// Sets a component of point (i, j)
    #[inline]
    pub fn set(&mut self, i: isize, j: isize, comp: usize, value: T) {
        let k = self.offset(i, j) + comp;
        self.data[k] = value;
    }

    /// Returns all components of point (i, j)
    #[inline]
    pub fn at(&self, i: isize, j: isize) -> &[T] {
        let k = self.offset(i, j);
        &self.data[k..k + self.ncomp]
    }

    /// Sets all values (including ghosts)
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Copies all values from another field with the same layout
    pub fn copy_from(&mut self, other: &Field<T>) -> Result<(), StrError> {
        if self.n != other.n || self.ng != other.ng || self.ncomp != other.ncomp {
            return Err("fields must have the same layout");
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Returns the values of one component at the valid points, row by row
    pub fn valid_values(&self, comp: usize) -> Vec<T> {
        let mut res = Vec::with_capacity(self.n[0] * self.n[1]);
        for j in 0..self.n[1] as isize {
            for i in 0..self.n[0] as isize {
                res.push(self.get(i, j, comp));
            }
        }
        res
    }

    /// Fills the ghost layers from the valid points
    ///
    /// `bcs[0]` applies to the x-faces and `bcs[1]` to the y-faces.
    pub fn fill_boundary(&mut self, bcs: [GhostBc; 2]) {
        let ng = self.ng as isize;
        if ng == 0 {
            return;
        }
        let (nx, ny) = (self.n[0] as isize, self.n[1] as isize);
        let nc = self.ncomp;
        for j in 0..ny {
            for i in (-ng..0).chain(nx..nx + ng) {
                let src = self.offset(self.source_index(i, 0, bcs[0]), j);
                let dst = self.offset(i, j);
                self.data.copy_within(src..src + nc, dst);
            }
        }
        let row = self.row_stride();
        for j in (-ng..0).chain(ny..ny + ng) {
            let src = self.offset(-ng, self.source_index(j, 1, bcs[1]));
            let dst = self.offset(-ng, j);
            self.data.copy_within(src..src + row, dst);
        }
    }

    /// Maps a ghost index along `dir` onto a valid index
    fn source_index(&self, k: isize, dir: usize, bc: GhostBc) -> isize {
        let n = self.n[dir] as isize;
        let src = match (bc, self.centering) {
            (GhostBc::Neumann, Centering::Cell) => {
                if k < 0 {
                    -k - 1
                } else {
                    2 * n - k - 1
                }
            }
            (GhostBc::Neumann, Centering::Node) => {
                if k < 0 {
                    -k
                } else {
                    2 * (n - 1) - k
                }
            }
            (GhostBc::Periodic, Centering::Cell) => k.rem_euclid(n),
            (GhostBc::Periodic, Centering::Node) => k.rem_euclid(isize::max(1, n - 1)),
        };
        src.clamp(0, n - 1)
    }

    /// Runs a function on every point of the valid region grown by `grow` layers, in parallel
    ///
    /// The function receives `(i, j, values)` where `values` holds all components of the point.
    pub fn par_for_each_mut<F>(&mut self, grow: usize, f: F)
    where
        F: Fn(isize, isize, &mut [T]) + Send + Sync,
    {
        let ng = self.ng as isize;
        let g = usize::min(grow, self.ng) as isize;
        let (nx, ny) = (self.n[0] as isize, self.n[1] as isize);
        let nc = self.ncomp;
        let row = self.row_stride();
        self.data
            .par_chunks_mut(row)
            .enumerate()
            .filter(|(jj, _)| {
                let j = *jj as isize - ng;
                j >= -g && j < ny + g
            })
            .for_each(|(jj, values)| {
                let j = jj as isize - ng;
                for i in -g..nx + g {
                    let k = ((i + ng) as usize) * nc;
                    f(i, j, &mut values[k..k + nc]);
                }
            });
    }

    /// Runs a fallible function on every point of the valid region grown by `grow` layers, in parallel
    pub fn par_try_for_each_mut<F>(&mut self, grow: usize, f: F) -> Result<(), StrError>
    where
        F: Fn(isize, isize, &mut [T]) -> Result<(), StrError> + Send + Sync,
    {
        let ng = self.ng as isize;
        let g = usize::min(grow, self.ng) as isize;
        let (nx, ny) = (self.n[0] as isize, self.n[1] as isize);
        let nc = self.ncomp;
        let row = self.row_stride();
        self.data
            .par_chunks_mut(row)
            .enumerate()
            .filter(|(jj, _)| {
                let j = *jj as isize - ng;
                j >= -g && j < ny + g
            })
            .try_for_each(|(jj, values)| {
                let j = jj as isize - ng;
                for i in -g..nx + g {
                    let k = ((i + ng) as usize) * nc;
                    f(i, j, &mut values[k..k + nc])?;
                }
                Ok(())
            })
    }
}

impl Field<f64> {
    /// Returns true if any valid value is NaN or infinite
    pub fn contains_non_finite(&self) -> bool {
        (0..self.n[1] as isize).into_par_iter().any(|j| {
            (0..self.n[0] as isize).any(|i| self.at(i, j).iter().any(|x| !x.is_finite()))
        })
    }

    /// Returns the smallest and largest valid values of a component
    pub fn min_max(&self, comp: usize) -> (f64, f64) {
        self.valid_values(comp)
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &x| (f64::min(lo, x), f64::max(hi, x)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
