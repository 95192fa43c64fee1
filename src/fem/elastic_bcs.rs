use crate::base::{BcType, GhostBc, ParamElasticBcs, NDIM};
use crate::StrError;

/// Defines the faces of the rectangular domain
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Face {
    /// x-min face
    Xlo,

    /// x-max face
    Xhi,

    /// y-min face
    Ylo,

    /// y-max face
    Yhi,
}

impl Face {
    /// Returns all faces in the order in which they are applied
    pub const ALL: [Face; 4] = [Face::Xlo, Face::Xhi, Face::Ylo, Face::Yhi];

    /// Returns the index of the face in the arrays of ElasticBcs
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Face::Xlo => 0,
            Face::Xhi => 1,
            Face::Ylo => 2,
            Face::Yhi => 3,
        }
    }
}

/// Holds the elastic boundary conditions (type and value per face and per displacement component)
#[derive(Clone, Copy, Debug)]
pub struct ElasticBcs {
    /// Types indexed by face then component
    pub types: [[BcType; NDIM]; 4],

    /// Values indexed by face then component
    pub values: [[f64; NDIM]; 4],
}

impl ElasticBcs {
    /// Allocates a new instance
    pub fn new(param: &ParamElasticBcs) -> Result<Self, StrError> {
        let bcs = ElasticBcs {
            types: [param.xlo, param.xhi, param.ylo, param.yhi],
            values: [param.left, param.right, param.bottom, param.top],
        };
        for d in 0..NDIM {
            if bcs.periodic(0, d) != (bcs.get_type(Face::Xhi, d) == BcType::Periodic) {
                return Err("periodic conditions must be set on both x faces");
            }
            if bcs.periodic(1, d) != (bcs.get_type(Face::Yhi, d) == BcType::Periodic) {
                return Err("periodic conditions must be set on both y faces");
            }
        }
        Ok(bcs)
    }

    /// Returns the type of condition on a face for a component
    #[inline]
    pub fn get_type(&self, face: Face, comp: usize) -> BcType {
        self.types[face.index()][comp]
    }

    /// Returns the value on a face for a component
    #[inline]
    pub fn get_value(&self, face: Face, comp: usize) -> f64 {
        self.values[face.index()][comp]
    }

    /// Sets the value on a face for a component
    #[inline]
    pub fn set_value(&mut self, face: Face, comp: usize, value: f64) {
        self.values[face.index()][comp] = value;
    }

    /// Returns true if the lower face normal to `dir` is periodic for the component
    #[inline]
    pub fn periodic(&self, dir: usize, comp: usize) -> bool {
        let face = if dir == 0 { Face::Xlo } else { Face::Ylo };
        self.get_type(face, comp) == BcType::Periodic
    }

    /// Returns the ghost-layer treatment for node-centered fields along each direction
    pub fn ghost_bcs(&self) -> [GhostBc; 2] {
        let mut res = [GhostBc::Neumann, GhostBc::Neumann];
        for dir in 0..2 {
            if (0..NDIM).any(|comp| self.periodic(dir, comp)) {
                res[dir] = GhostBc::Periodic;
            }
        }
        res
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
