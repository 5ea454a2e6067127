//! Structure loading, chain selection and matrix output helpers.

use crate::atoms::Atom;
use crate::residues::{three_to_one, Residue};
use nalgebra as na;
use pdbtbx::*;
use polars::prelude::*;
use std::{collections::HashSet, path::Path};
use tracing::{debug, warn};

/// Open an atomic data file with [`pdbtbx::open`] and remove non-protein
/// residues.
pub fn load_model(input_file: &String) -> Result<(PDB, Vec<PDBError>), Vec<PDBError>> {
    // Load file as complex structure
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)?;

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| three_to_one(res.name().unwrap_or("")).is_none());

    Ok((pdb, errors))
}

/// Parse a comma-separated chain selection against the chains present in the
/// model. An empty selection means all chains.
pub fn parse_chain_filter(all_chains: &HashSet<String>, selection: &str) -> HashSet<String> {
    let selected: HashSet<String> = selection
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if selected.is_empty() {
        return all_chains.clone();
    }

    // Panic on chain IDs that do not exist in the model
    let missing: Vec<&String> = selected.difference(all_chains).collect();
    if !missing.is_empty() {
        panic!("Chain(s) {missing:?} not found in the model!")
    }

    selected
}

/// Build the ordered residue list from the selected chains of a model.
///
/// Only the first model of multi-model files is used. Residues appear in
/// chain/file order; this order defines the row/column index space of the
/// distance matrix and is never changed afterwards.
pub fn collect_residues(pdb: &PDB, chains: &str) -> Vec<Residue> {
    if pdb.model_count() > 1 {
        warn!(
            "Found {} models; only the first one is used",
            pdb.model_count()
        );
    }

    let model = match pdb.models().next() {
        Some(model) => model,
        None => return Vec::new(),
    };

    let all_chains: HashSet<String> = model.chains().map(|c| c.id().to_string()).collect();
    let selected = parse_chain_filter(&all_chains, chains);

    let mut residues = Vec::new();
    for chain in model.chains().filter(|c| selected.contains(c.id())) {
        for res in chain.residues() {
            let resn = res.name().unwrap_or("");
            if three_to_one(resn).is_none() {
                // Water, ligands and non-standard amino acids are skipped
                debug!("Skipping non-protein residue {resn} {resi}", resi = res.id().0);
                continue;
            }

            let atoms = res
                .atoms()
                .map(|a| {
                    let (x, y, z) = a.pos();
                    Atom::new(a.name(), na::Vector3::new(x, y, z))
                })
                .collect();
            residues.push(Residue::new(resn, res.id().0, atoms));
        }
    }

    residues
}

/// Convert a distance/contact matrix into a `DataFrame` with one column per
/// residue index.
pub fn matrix_to_df(mat: &na::DMatrix<f64>) -> DataFrame {
    let columns: Vec<Column> = (0..mat.ncols())
        .map(|j| {
            Column::new(
                format!("res_{j}").into(),
                mat.column(j).iter().copied().collect::<Vec<f64>>(),
            )
        })
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Format a matrix as plaintext, one row per line with space-separated
/// cells: `%.3f` for distances, `%d` when `binary` is set (contact maps).
pub fn mat_to_plaintext(mat: &na::DMatrix<f64>, binary: bool) -> String {
    let mut out = String::new();
    for i in 0..mat.nrows() {
        let row: Vec<String> = (0..mat.ncols())
            .map(|j| {
                if binary {
                    format!("{}", mat[(i, j)] as i64)
                } else {
                    format!("{:.3}", mat[(i, j)])
                }
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Run a closure on a dedicated rayon thread pool with the given number of
/// threads (0 means all available cores).
pub fn run_with_threads<F, R>(num_threads: usize, f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .unwrap();
    pool.install(f)
}

/// Write a DataFrame to a file in the requested format
pub fn write_df_to_file(df: &mut DataFrame, file_path: &Path, file_type: DataFrameFileType) {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix)).unwrap();
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df).unwrap();
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df).unwrap();
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)
                .unwrap();
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)
                .unwrap();
        }
    }
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}
