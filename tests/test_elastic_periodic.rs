use pfsim::base::N_GHOST_CRACK;
use pfsim::fem::{ElasticFields, ElasticityProblem};
use pfsim::prelude::*;
use russell_lab::approx_eq;

//      periodic              periodic
//        ┌──────────────────────┐
//        │▒▒                    │  uy = δ on top
//        │▒▒  damaged column    │
//        │▒▒  at the seam       │
//        └──────────────────────┘
//          ux = uy = 0 on bottom
//
// The left and right faces are one seam; thus the stiffness and the displacement of the
// nodes on both faces must agree.

const DELTA: f64 = 0.01;

#[test]
fn test_periodic_seam_is_consistent() -> Result<(), StrError> {
    let config = Config::read_json("data/inputs/plate_sin_periodic.json")?;
    let grid = Grid::new(&ParamGrid::sample(6))?;
    let mut param = config.elastic;
    param.tol_rel = 1e-12;
    param.tol_abs = 1e-14;

    let pristine = IsotropicElastic::new(410.0, 305.0);
    let crack = CrackModel::new(&config.crack.model)?;
    let mut problem = ElasticityProblem::new(&grid, pristine, &param, config.crack.modulus_scaling_max)?;
    assert_eq!(problem.bcs.ghost_bcs(), [GhostBc::Periodic, GhostBc::Neumann]);

    let mut c = Field::<f64>::new_cell(&grid, 1, N_GHOST_CRACK);
    c.par_for_each_mut(0, |i, _, v| v[0] = if i == 0 { 0.4 } else { 1.0 });
    c.fill_boundary([GhostBc::Neumann, GhostBc::Neumann]);

    let mut fields = ElasticFields::new(&grid, pristine);
    let report = problem.solve(DELTA, &c, crack.actual.as_ref(), &mut fields)?;
    assert!(report.linear.converged);
    assert!(report.norm_residual < 1e-8);

    let nx = grid.nx as isize;
    for j in 0..=grid.ny as isize {
        assert_eq!(fields.model.get(0, j, 0), fields.model.get(nx, j, 0));
        assert_eq!(fields.disp.get(0, j, 0), fields.disp.get(nx, j, 0));
        assert_eq!(fields.disp.get(0, j, 1), fields.disp.get(nx, j, 1));
    }
    assert!(fields.model.get(0, 3, 0).mu < pristine.mu);
    assert_eq!(fields.model.get(3, 3, 0), pristine);
    approx_eq(fields.disp.get(2, grid.ny as isize, 1), DELTA, 1e-15);
    Ok(())
}
