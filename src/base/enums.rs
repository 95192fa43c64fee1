use serde::{Deserialize, Serialize};

/// Defines the type of elastic boundary condition on a face, for one displacement component
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BcType {
    /// Prescribed displacement (essential)
    #[serde(alias = "disp")]
    Displacement,

    /// Prescribed traction (natural)
    #[serde(alias = "trac")]
    Traction,

    /// Homogeneous natural condition (the face value is ignored)
    Neumann,

    /// Nodes on the high face share the equation of the matching low-face node
    Periodic,
}

/// Defines the solver used for the elastic linear system
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BottomSolver {
    /// Jacobi-preconditioned conjugate gradient
    Cg,

    /// Jacobi-preconditioned biconjugate gradient stabilized
    Bicgstab,

    /// Sparse direct solver (UMFPACK)
    Direct,
}

/// Defines the stiffness degradation function g(c)
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Degradation {
    /// g = c²
    Square,

    /// g = 4c³ - 3c⁴
    Quartic,
}

impl Default for Degradation {
    fn default() -> Self {
        Degradation::Square
    }
}

/// Defines the boundary treatment of ghost layers (halo) of fields
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum GhostBc {
    /// Even reflection about the boundary (zero normal derivative)
    Neumann,

    /// Wrap-around
    Periodic,
}

/// Defines the location of field values
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Centering {
    /// Values at cell centers
    Cell,

    /// Values at grid nodes (cell corners)
    Node,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{BcType, BottomSolver, Degradation};

    #[test]
    fn bc_type_parses_aliases() {
        let types: Vec<BcType> =
            serde_json::from_str(r#"["displacement", "disp", "traction", "trac", "neumann", "periodic"]"#).unwrap();
        assert_eq!(
            types,
            &[
                BcType::Displacement,
                BcType::Displacement,
                BcType::Traction,
                BcType::Traction,
                BcType::Neumann,
                BcType::Periodic
            ]
        );
        assert!(serde_json::from_str::<BcType>(r#""dirichlet""#).is_err());
    }

    #[test]
    fn bottom_solver_rejects_unknown_names() {
        let s: BottomSolver = serde_json::from_str(r#""bicgstab""#).unwrap();
        assert_eq!(s, BottomSolver::Bicgstab);
        assert!(serde_json::from_str::<BottomSolver>(r#""gmres""#).is_err());
    }

    #[test]
    fn degradation_default_is_square() {
        assert_eq!(Degradation::default(), Degradation::Square);
    }
}
