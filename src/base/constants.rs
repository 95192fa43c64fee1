/// Defines the space dimension
pub const NDIM: usize = 2;

/// Defines the number of components of second-order tensors stored in fields (row-major d×d)
pub const N_TENSOR_COMP: usize = NDIM * NDIM;

/// Defines the number of ghost layers of cell-centered damage fields
pub const N_GHOST_CRACK: usize = 3;

/// Defines the number of ghost layers of the node-centered material-model field
pub const N_GHOST_MODEL: usize = 2;

/// Defines the default Lamé λ parameter of the pristine material
pub const DEFAULT_LAMBDA: f64 = 410.0;

/// Defines the default shear modulus μ of the pristine material
pub const DEFAULT_MU: f64 = 305.0;

/// Defines the load-ramp increment used when the input is negative
pub const DEFAULT_DISP_STEP: f64 = 0.1;

/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/pfsim/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/pfsim/test";
