use super::FractureFields;
use crate::base::{Field, Grid, DEFAULT_OUT_DIR};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs::{self, File};
use std::io::{BufReader, Write as IoWrite};
use std::path::Path;

/// Holds the history of converged load increments
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OutputSummary {
    /// Labels (load step) of the checkpoints
    pub load_steps: Vec<usize>,

    /// Pseudo-time steps of the checkpoints
    pub steps: Vec<usize>,

    /// Pseudo-times of the checkpoints
    pub times: Vec<f64>,

    /// Applied top displacements
    pub ramps: Vec<f64>,

    /// Sum of the y-reactions on the top face
    pub reactions: Vec<f64>,
}

impl OutputSummary {
    /// Reads a JSON file containing the summary
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(summary)
    }
}

/// Holds the damage and displacement data of one checkpoint
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Snapshot {
    pub load_step: usize,
    pub step: usize,
    pub t: f64,
    pub ramp: f64,
    pub reaction_top: f64,

    /// Number of cells along x and y
    pub n_cell: [usize; 2],

    /// Damage at the cells (row-major, x running fastest)
    pub c: Vec<f64>,

    /// Displacement at the nodes (row-major, x running fastest)
    pub disp_x: Vec<f64>,
    pub disp_y: Vec<f64>,

    /// Pristine strain energy at the nodes
    pub energy_pristine: Vec<f64>,
}

impl Snapshot {
    /// Reads a JSON file containing a snapshot
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let snapshot = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(snapshot)
    }
}

/// Writes the checkpoint files of a simulation
///
/// The summary is always recorded in memory; files are only written if the output is enabled.
pub struct Output {
    /// Holds a flag to enable/disable the file generation
    enabled: bool,

    /// Also writes VTU files and the PVD collection
    vtu: bool,

    /// Defines the output directory
    out_dir: String,

    /// Defines the filename stem
    fn_stem: String,

    /// History of checkpoints
    pub summary: OutputSummary,
}

impl Output {
    /// Allocates a new instance that does not write files
    pub fn new_disabled() -> Self {
        Output {
            enabled: false,
            vtu: false,
            out_dir: String::new(),
            fn_stem: String::new(),
            summary: OutputSummary::default(),
        }
    }

    /// Allocates a new instance that writes files
    ///
    /// # Input
    ///
    /// * `fn_stem` -- the last part of the filename without extension, e.g., "notch"
    /// * `out_dir` -- the output directory; None means [DEFAULT_OUT_DIR]
    /// * `vtu` -- also write ParaView files
    pub fn new_enabled(fn_stem: &str, out_dir: Option<&str>, vtu: bool) -> Result<Self, StrError> {
        let out_dir = out_dir.unwrap_or(DEFAULT_OUT_DIR);
        fs::create_dir_all(out_dir).map_err(|_| "cannot create output directory")?;
        Ok(Output {
            enabled: true,
            vtu,
            out_dir: out_dir.to_string(),
            fn_stem: fn_stem.to_string(),
            summary: OutputSummary::default(),
        })
    }

    /// Returns the path of a snapshot file
    pub fn path_snapshot(&self, load_step: usize) -> String {
        format!("{}/{}-crack-{:0>8}.json", self.out_dir, self.fn_stem, load_step)
    }

    /// Returns the path of a VTU file
    pub fn path_vtu(&self, load_step: usize) -> String {
        format!("{}/{}-{:0>8}.vtu", self.out_dir, self.fn_stem, load_step)
    }

    /// Returns the path of the PVD file
    pub fn path_pvd(&self) -> String {
        format!("{}/{}.pvd", self.out_dir, self.fn_stem)
    }

    /// Returns the path of the summary file
    pub fn path_summary(&self) -> String {
        format!("{}/{}-summary.json", self.out_dir, self.fn_stem)
    }

    /// Records a converged load increment and writes its files
    pub fn checkpoint(
        &mut self,
        load_step: usize,
        step: usize,
        t: f64,
        ramp: f64,
        reaction_top: f64,
        grid: &Grid,
        fields: &FractureFields,
    ) -> Result<(), StrError> {
        self.summary.load_steps.push(load_step);
        self.summary.steps.push(step);
        self.summary.times.push(t);
        self.summary.ramps.push(ramp);
        self.summary.reactions.push(reaction_top);
        if !self.enabled {
            return Ok(());
        }

        let snapshot = Snapshot {
            load_step,
            step,
            t,
            ramp,
            reaction_top,
            n_cell: [grid.nx, grid.ny],
            c: fields.c.valid_values(0),
            disp_x: fields.elastic.disp.valid_values(0),
            disp_y: fields.elastic.disp.valid_values(1),
            energy_pristine: fields.elastic.energy_pristine.valid_values(0),
        };
        let path = self.path_snapshot(load_step);
        let mut file = File::create(&path).map_err(|_| "cannot create snapshot file")?;
        serde_json::to_writer(&mut file, &snapshot).map_err(|_| "cannot write snapshot file")?;
        tracing::debug!(path = %path, "checkpoint written");

        if self.vtu {
            let buffer = vtu_string(grid, fields).map_err(|_| "cannot format VTU file")?;
            let path = self.path_vtu(load_step);
            let mut file = File::create(&path).map_err(|_| "cannot create VTU file")?;
            file.write_all(buffer.as_bytes()).map_err(|_| "cannot write VTU file")?;
        }
        Ok(())
    }

    /// Writes the summary and the PVD collection
    pub fn finish(&self) -> Result<(), StrError> {
        if !self.enabled {
            return Ok(());
        }
        let path = self.path_summary();
        let mut file = File::create(&path).map_err(|_| "cannot create summary file")?;
        serde_json::to_writer_pretty(&mut file, &self.summary).map_err(|_| "cannot write summary file")?;

        if self.vtu {
            let mut buffer = String::new();
            pvd_string(&mut buffer, self).map_err(|_| "cannot format PVD file")?;
            let path = self.path_pvd();
            let mut file = File::create(&path).map_err(|_| "cannot create PVD file")?;
            file.write_all(buffer.as_bytes()).map_err(|_| "cannot write PVD file")?;
        }
        Ok(())
    }
}

/// Generates the PVD collection referencing all VTU files
fn pvd_string(buffer: &mut String, output: &Output) -> Result<(), std::fmt::Error> {
    write!(
        buffer,
        "<?xml version=\"1.0\"?>\n\
         <VTKFile type=\"Collection\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
         <Collection>\n"
    )?;
    for (load_step, ramp) in output.summary.load_steps.iter().zip(&output.summary.ramps) {
        write!(
            buffer,
            "<DataSet timestep=\"{:?}\" file=\"{}\" />\n",
            ramp,
            output.path_vtu(*load_step)
        )?;
    }
    write!(buffer, "</Collection>\n</VTKFile>\n")
}

/// Writes a DataArray with the valid values of a field component set
fn write_data_array(
    buffer: &mut String,
    name: &str,
    field: &Field<f64>,
    comps: &[usize],
) -> Result<(), std::fmt::Error> {
    let ncomp = if comps.len() == 2 { 3 } else { comps.len() };
    write!(
        buffer,
        "<DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"{}\" format=\"ascii\">\n",
        name, ncomp
    )?;
    let [nx, ny] = field.n_valid();
    for j in 0..ny as isize {
        for i in 0..nx as isize {
            for comp in comps {
                write!(buffer, "{:?} ", field.get(i, j, *comp))?;
            }
            if comps.len() == 2 {
                write!(buffer, "0.0 ")?;
            }
        }
    }
    write!(buffer, "\n</DataArray>\n")
}

/// Generates a VTU file with the nodal and cell fields to perform visualization with ParaView
fn vtu_string(grid: &Grid, fields: &FractureFields) -> Result<String, std::fmt::Error> {
    let (nnx, nny) = (grid.nx + 1, grid.ny + 1);
    let mut buffer = String::new();

    // header
    write!(
        &mut buffer,
        "<?xml version=\"1.0\"?>\n\
         <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
         <UnstructuredGrid>\n\
         <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
        grid.n_node(),
        grid.n_cell()
    )?;

    // nodes: coordinates
    write!(
        &mut buffer,
        "<Points>\n\
         <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n"
    )?;
    for j in 0..nny as isize {
        for i in 0..nnx as isize {
            let x = grid.node_coords(i, j);
            write!(&mut buffer, "{:?} {:?} 0.0 ", x[0], x[1])?;
        }
    }
    write!(&mut buffer, "\n</DataArray>\n</Points>\n")?;

    // cells: connectivity, offsets, and types (VTK_QUAD = 9)
    write!(
        &mut buffer,
        "<Cells>\n\
         <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
    )?;
    for j in 0..grid.ny {
        for i in 0..grid.nx {
            let a = j * nnx + i;
            write!(&mut buffer, "{} {} {} {} ", a, a + 1, a + 1 + nnx, a + nnx)?;
        }
    }
    write!(
        &mut buffer,
        "\n</DataArray>\n\
         <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
    )?;
    for k in 0..grid.n_cell() {
        write!(&mut buffer, "{} ", 4 * (k + 1))?;
    }
    write!(
        &mut buffer,
        "\n</DataArray>\n\
         <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
    )?;
    for _ in 0..grid.n_cell() {
        write!(&mut buffer, "9 ")?;
    }
    write!(&mut buffer, "\n</DataArray>\n</Cells>\n")?;

    // data: points
    let elastic = &fields.elastic;
    write!(&mut buffer, "<PointData Scalars=\"TheScalars\">\n")?;
    write_data_array(&mut buffer, "displacement", &elastic.disp, &[0, 1])?;
    write_data_array(&mut buffer, "stress_vm", &elastic.stress_vm, &[0])?;
    write_data_array(&mut buffer, "energy", &elastic.energy, &[0])?;
    write_data_array(&mut buffer, "energy_pristine", &elastic.energy_pristine, &[0])?;
    write!(&mut buffer, "</PointData>\n")?;

    // data: cells
    write!(&mut buffer, "<CellData Scalars=\"TheScalars\">\n")?;
    write_data_array(&mut buffer, "c", &fields.c, &[0])?;
    write_data_array(&mut buffer, "c_old", &fields.c_old, &[0])?;
    write_data_array(&mut buffer, "driving_force", &fields.driving_force, &[3])?;
    write!(
        &mut buffer,
        "<DataArray type=\"UInt8\" Name=\"tags\" NumberOfComponents=\"1\" format=\"ascii\">\n"
    )?;
    for tag in fields.tags.valid_values(0) {
        write!(&mut buffer, "{} ", tag as u8)?;
    }
    write!(&mut buffer, "\n</DataArray>\n</CellData>\n")?;

    // footer
    write!(
        &mut buffer,
        "</Piece>\n\
         </UnstructuredGrid>\n\
         </VTKFile>\n"
    )?;
    Ok(buffer)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
