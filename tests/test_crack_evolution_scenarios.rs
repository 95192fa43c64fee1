use pfsim::base::{set_initial_damage, stencil};
use pfsim::prelude::*;
use pfsim::sim::{evolve_crack, FractureFields};
use russell_lab::approx_eq;

// Explicit damage update on flat fields (zero gradient and Laplacian):
//
//   rhs   = g'(c_old)·E + (Gc/ζ)·w'(c_old) - Gc·ζ·∇²c_old
//   c_new = clamp(c_old - Δt·max(0, rhs)·M, 0, 1)
//
// Evolution swaps the buffers first; thus the "old" values are written into `c` beforehand.

const DT: f64 = 0.01;

fn setup(c_old: f64, energy: f64) -> (Grid, CrackModel, FractureFields) {
    let grid = Grid::new(&ParamGrid::sample(5)).unwrap();
    let crack = CrackModel::new(&ParamCrack::sample_constant()).unwrap();
    let mut fields = FractureFields::new(&grid, IsotropicElastic::default());
    fields.c.fill(c_old);
    fields.elastic.energy_pristine.fill(energy);
    (grid, crack, fields)
}

#[test]
fn test_intact_unloaded_field_is_unchanged() -> Result<(), StrError> {
    // scenario A
    let (grid, crack, mut fields) = setup(1.0, 0.0);
    let n_clamped = evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
    assert_eq!(n_clamped, 0);
    for j in 0..5 {
        for i in 0..5 {
            assert_eq!(fields.driving_force.get(i, j, 3), 0.0);
            assert_eq!(fields.c.get(i, j, 0), 1.0);
            assert_eq!(fields.c_old.get(i, j, 0), 1.0);
        }
    }
    Ok(())
}

#[test]
fn test_uniform_energy_degrades_uniformly() -> Result<(), StrError> {
    // scenario B: g'(1) = 2 (square degradation) and M = 1
    const E0: f64 = 1.5;
    let (grid, crack, mut fields) = setup(1.0, E0);
    evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
    let rhs = crack.actual.dg_phi(1.0) * E0;
    approx_eq(rhs, 3.0, 1e-15);
    for j in 0..5 {
        for i in 0..5 {
            approx_eq(fields.driving_force.get(i, j, 3), rhs, 1e-14);
            approx_eq(fields.c.get(i, j, 0), 1.0 - DT * rhs * crack.actual.mobility(1.0), 1e-14);
        }
    }
    Ok(())
}

#[test]
fn test_negative_force_is_clipped() -> Result<(), StrError> {
    // scenario C: w'(0.75) < 0 with zero energy gives a negative raw force
    let (grid, crack, mut fields) = setup(0.75, 0.0);
    assert!(crack.actual.dw_phi(0.75) < 0.0);
    let n_clamped = evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
    assert_eq!(n_clamped, 0);
    for j in 0..5 {
        for i in 0..5 {
            assert!(fields.driving_force.get(i, j, 1) < 0.0);
            assert_eq!(fields.driving_force.get(i, j, 3), 0.0);
            assert_eq!(fields.c.get(i, j, 0), fields.c_old.get(i, j, 0));
            assert_eq!(fields.c.get(i, j, 0), 0.75);
        }
    }
    Ok(())
}

#[test]
fn test_repeated_updates_keep_intact_field() -> Result<(), StrError> {
    // idempotence: zero energy and a flat intact field
    let (grid, crack, mut fields) = setup(1.0, 0.0);
    for _ in 0..3 {
        evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
        assert_eq!(fields.c.valid_values(0), fields.c_old.valid_values(0));
    }
    assert_eq!(fields.c.min_max(0), (1.0, 1.0));
    Ok(())
}

#[test]
fn test_unloaded_bump_is_driven_by_surface_and_gradient_only() -> Result<(), StrError> {
    // zero energy and a single weakened cell at the center: dx = 0.2, Gc = 1, ζ = 0.05
    let (grid, crack, mut fields) = setup(1.0, 0.0);
    fields.c.set(2, 2, 0, 0.5);
    evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
    for j in 0..5 {
        for i in 0..5 {
            let c_old = fields.c_old.get(i, j, 0);
            let surface = crack.actual.epc(0.0) * crack.actual.dw_phi(c_old);
            let gradient = crack.actual.kappa(0.0) * stencil::laplacian(&fields.c_old, 0, &grid, i, j);
            assert_eq!(fields.driving_force.get(i, j, 0), 0.0);
            approx_eq(fields.driving_force.get(i, j, 1), surface, 1e-14);
            approx_eq(fields.driving_force.get(i, j, 2), gradient, 1e-12);
            approx_eq(fields.driving_force.get(i, j, 3), f64::max(0.0, surface - gradient), 1e-12);
        }
    }

    // center: w'(0.5) = 0 and ∇²c = 4·0.5/0.04 = 50, thus the force is clipped
    approx_eq(fields.driving_force.get(2, 2, 2), 2.5, 1e-12);
    assert_eq!(fields.driving_force.get(2, 2, 3), 0.0);
    assert_eq!(fields.c.get(2, 2, 0), 0.5);

    // neighbors: w'(1) = 0 and ∇²c = -0.5/0.04 = -12.5, thus the damage spreads
    for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        approx_eq(fields.driving_force.get(i, j, 3), 0.625, 1e-12);
        approx_eq(fields.c.get(i, j, 0), 1.0 - DT * 0.625, 1e-14);
    }

    // far cells are untouched
    assert_eq!(fields.driving_force.get(0, 0, 3), 0.0);
    assert_eq!(fields.c.get(0, 0, 0), 1.0);
    Ok(())
}

#[test]
fn test_damage_stays_bounded_and_non_increasing() -> Result<(), StrError> {
    let grid = Grid::new(&ParamGrid::sample(10)).unwrap();
    let crack = CrackModel::new(&ParamCrack::sample_sin()).unwrap();
    let mut fields = FractureFields::new(&grid, IsotropicElastic::default());
    set_initial_damage(&mut fields.c, &grid, &ParamIc::sample_notch());
    fields.elastic.energy_pristine.fill(50.0);
    let mut previous = fields.c.valid_values(0);
    for _ in 0..5 {
        evolve_crack(&mut fields, crack.actual.as_ref(), &grid, DT)?;
        let current = fields.c.valid_values(0);
        for (c_new, c_old) in current.iter().zip(&previous) {
            assert!(*c_new >= 0.0 && *c_new <= 1.0);
            assert!(c_new <= c_old);
        }
        let (df_min, _) = fields.driving_force.min_max(3);
        assert!(df_min >= 0.0);
        previous = current;
    }
    Ok(())
}
