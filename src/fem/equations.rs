use super::{ElasticBcs, Face};
use crate::base::{BcType, Grid, NDIM};

/// Holds the equation numbers of the nodal displacements and the prescribed values
///
/// Nodes are numbered row by row: `node = j * (nx + 1) + i`.
/// With periodic conditions, the nodes on the high face share the equation of the matching low-face node.
pub struct Equations {
    /// Number of nodes along x
    nnx: usize,

    /// Number of nodes along y
    nny: usize,

    /// Total number of equations
    pub n_equation: usize,

    /// Equation numbers indexed by node then component
    numbers: Vec<[usize; NDIM]>,

    /// Indicates which equations have prescribed displacements
    pub prescribed: Vec<bool>,

    /// Prescribed displacement values (zero for free equations)
    pub values: Vec<f64>,
}

impl Equations {
    /// Allocates a new instance
    pub fn new(grid: &Grid, bcs: &ElasticBcs) -> Self {
        let (nnx, nny) = (grid.nx + 1, grid.ny + 1);
        let mut numbers = vec![[usize::MAX; NDIM]; nnx * nny];
        let mut n_equation = 0;
        for comp in 0..NDIM {
            let px = bcs.periodic(0, comp);
            let py = bcs.periodic(1, comp);
            for j in 0..nny {
                for i in 0..nnx {
                    let ii = if px && i == nnx - 1 { 0 } else { i };
                    let jj = if py && j == nny - 1 { 0 } else { j };
                    if ii == i && jj == j {
                        numbers[j * nnx + i][comp] = n_equation;
                        n_equation += 1;
                    }
                }
            }
            // aliases point to equations assigned above
            for j in 0..nny {
                for i in 0..nnx {
                    let ii = if px && i == nnx - 1 { 0 } else { i };
                    let jj = if py && j == nny - 1 { 0 } else { j };
                    numbers[j * nnx + i][comp] = numbers[jj * nnx + ii][comp];
                }
            }
        }
        let mut eqs = Equations {
            nnx,
            nny,
            n_equation,
            numbers,
            prescribed: vec![false; n_equation],
            values: vec![0.0; n_equation],
        };
        eqs.update_prescribed(bcs);
        eqs
    }

    /// Returns the equation number of a nodal displacement component
    #[inline]
    pub fn eq(&self, i: usize, j: usize, comp: usize) -> usize {
        self.numbers[j * self.nnx + i][comp]
    }

    /// Returns the nodes (i, j) on a face
    pub fn face_nodes(&self, face: Face) -> Vec<(usize, usize)> {
        match face {
            Face::Xlo => (0..self.nny).map(|j| (0, j)).collect(),
            Face::Xhi => (0..self.nny).map(|j| (self.nnx - 1, j)).collect(),
            Face::Ylo => (0..self.nnx).map(|i| (i, 0)).collect(),
            Face::Yhi => (0..self.nnx).map(|i| (i, self.nny - 1)).collect(),
        }
    }

    /// Sets the prescribed equations and values
    ///
    /// Faces are applied in the order xlo, xhi, ylo, yhi; a later face overrides the value of a shared corner.
    pub fn update_prescribed(&mut self, bcs: &ElasticBcs) {
        self.prescribed.iter_mut().for_each(|p| *p = false);
        self.values.iter_mut().for_each(|v| *v = 0.0);
        for face in Face::ALL {
            for comp in 0..NDIM {
                if bcs.get_type(face, comp) != BcType::Displacement {
                    continue;
                }
                let value = bcs.get_value(face, comp);
                for (i, j) in self.face_nodes(face) {
                    let eq = self.eq(i, j, comp);
                    self.prescribed[eq] = true;
                    self.values[eq] = value;
                }
            }
        }
    }

    /// Returns the equation numbers of the four nodes of cell (i, j) in local order
    ///
    /// Local order: node 0 = (i, j), 1 = (i+1, j), 2 = (i+1, j+1), 3 = (i, j+1); x then y per node.
    #[inline]
    pub fn local_to_global(&self, i: usize, j: usize) -> [usize; 8] {
        let nodes = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
        let mut res = [0; 8];
        for (m, (a, b)) in nodes.iter().enumerate() {
            res[2 * m] = self.eq(*a, *b, 0);
            res[2 * m + 1] = self.eq(*a, *b, 1);
        }
        res
    }

    /// Returns the number of prescribed equations
    pub fn n_prescribed(&self) -> usize {
        self.prescribed.iter().filter(|p| **p).count()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
