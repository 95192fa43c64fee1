use crate::base::{stencil, Field, Grid};

/// Flags the cells where the damage varies sharply
///
/// A cell is tagged iff `|∇c| · ‖Δx‖ > threshold`, with `∇c` computed by centered differences.
/// The ghost values of `c` must be valid. Returns the number of tagged cells.
pub fn tag_cells(tags: &mut Field<bool>, c: &Field<f64>, grid: &Grid, threshold: f64) -> usize {
    let dr = grid.diagonal();
    tags.par_for_each_mut(0, |i, j, tag| {
        let grad = stencil::gradient(c, 0, grid, i, j);
        let norm = f64::sqrt(grad[0] * grad[0] + grad[1] * grad[1]);
        tag[0] = norm * dr > threshold;
    });
    tags.valid_values(0).iter().filter(|t| **t).count()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::tag_cells;
    use crate::base::{Field, GhostBc, Grid, ParamGrid};

    #[test]
    fn uniform_field_has_no_tags() {
        let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, 3);
        c.fill(0.7);
        let mut tags = Field::<bool>::new_cell(&grid, 1, 0);
        assert_eq!(tag_cells(&mut tags, &c, &grid, 0.0), 0);
    }

    #[test]
    fn sharp_interface_is_tagged() {
        let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
        let mut c = Field::<f64>::new_cell(&grid, 1, 3);
        c.par_for_each_mut(0, |i, _, v| v[0] = if i < 2 { 0.0 } else { 1.0 });
        c.fill_boundary([GhostBc::Neumann, GhostBc::Neumann]);
        let mut tags = Field::<bool>::new_cell(&grid, 1, 0);
        let n = tag_cells(&mut tags, &c, &grid, 0.5);
        // columns 1 and 2 see |∇c| = 1/(2·0.25) = 2; 2·‖Δx‖ ≈ 0.707 > 0.5
        assert_eq!(n, 8);
        for j in 0..4 {
            assert_eq!(tags.get(0, j, 0), false);
            assert_eq!(tags.get(1, j, 0), true);
            assert_eq!(tags.get(2, j, 0), true);
            assert_eq!(tags.get(3, j, 0), false);
        }
    }
}
