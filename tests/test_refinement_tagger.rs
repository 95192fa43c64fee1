use pfsim::prelude::*;
use pfsim::sim::tag_cells;

// Damage ramp along x: c(i, j) = 0.125·i on a 4×4 unit grid (Δx = Δy = 0.25)
//
// Interior cells: |∇c| = (0.125·2)/(2·0.25) = 0.5 (exact)
// Boundary cells: the zero-Neumann ghost halves the centered difference, |∇c| = 0.25
//
// A cell is tagged iff |∇c|·‖Δx‖ > threshold (strictly).

fn ramp_field(grid: &Grid) -> Field<f64> {
    let mut c = Field::<f64>::new_cell(grid, 1, 3);
    c.par_for_each_mut(0, |i, _, v| v[0] = 0.125 * (i as f64));
    c.fill_boundary([GhostBc::Neumann, GhostBc::Neumann]);
    c
}

#[test]
fn test_tagger_on_linear_ramp() {
    let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
    let c = ramp_field(&grid);
    let mut tags = Field::<bool>::new_cell(&grid, 1, 0);
    let g = 0.5;
    let dr = grid.diagonal();

    // below the interior value: interior columns only
    let n = tag_cells(&mut tags, &c, &grid, 0.99 * g * dr);
    assert_eq!(n, 8);
    for j in 0..4 {
        assert_eq!(tags.get(0, j, 0), false);
        assert_eq!(tags.get(1, j, 0), true);
        assert_eq!(tags.get(2, j, 0), true);
        assert_eq!(tags.get(3, j, 0), false);
    }

    // equality is not tagged
    let n = tag_cells(&mut tags, &c, &grid, g * dr);
    assert_eq!(n, 0);

    // below the boundary value: all cells
    let n = tag_cells(&mut tags, &c, &grid, 0.49 * g * dr);
    assert_eq!(n, 16);
}

#[test]
fn test_tagger_is_pure() {
    let grid = Grid::new(&ParamGrid::sample(4)).unwrap();
    let c = ramp_field(&grid);
    let before = c.valid_values(0);
    let mut tags = Field::<bool>::new_cell(&grid, 1, 0);
    let first = tag_cells(&mut tags, &c, &grid, 0.1);
    let tags_first = tags.valid_values(0);
    let second = tag_cells(&mut tags, &c, &grid, 0.1);
    assert_eq!(first, second);
    assert_eq!(tags.valid_values(0), tags_first);
    assert_eq!(c.valid_values(0), before);
}
