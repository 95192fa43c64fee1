use pfsim::prelude::*;

#[test]
fn test_input_files_are_valid() -> Result<(), StrError> {
    for name in ["notch_constant", "plate_sin_periodic"] {
        let path = format!("data/inputs/{}.json", name);
        let config = Config::read_json(&path)?;
        assert_eq!(config.validate(), None, "{}", name);
        BrittleFracture::new(&config, Output::new_disabled())?;
    }
    Ok(())
}

#[test]
fn test_periodic_input_uses_defaults() -> Result<(), StrError> {
    let config = Config::read_json("data/inputs/plate_sin_periodic.json")?;
    assert_eq!(config.crack.tol_crack, 1e-3);
    assert_eq!(config.elastic.bottom_solver, BottomSolver::Bicgstab);
    assert_eq!(config.elastic.bc.xhi, [BcType::Periodic, BcType::Periodic]);
    assert_eq!(config.elastic.bc.yhi, [BcType::Neumann, BcType::Displacement]);
    assert_eq!(config.loading.disp_init, 0.0);
    assert_eq!(config.control.max_step, 100_000);
    match config.material {
        ParamMaterial::Isotropic { lambda, mu } => {
            assert_eq!(lambda, 410.0);
            assert_eq!(mu, 305.0);
        }
    }
    match config.crack.model {
        ParamCrack::Sin { degradation, .. } => assert_eq!(degradation, Degradation::Quartic),
        _ => panic!("sin model expected"),
    }
    Ok(())
}

#[test]
fn test_unknown_names_are_rejected() {
    let path = format!("{}/unknown_solver.json", DEFAULT_TEST_DIR);
    std::fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
    let text = std::fs::read_to_string("data/inputs/notch_constant.json")
        .unwrap()
        .replace("\"cg\"", "\"multigrid\"");
    std::fs::write(&path, text).unwrap();
    assert_eq!(Config::read_json(&path).err(), Some("cannot parse JSON file"));
}
