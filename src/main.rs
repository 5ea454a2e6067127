use clap::Parser;
use conmat::{
    contact_map, load_model, mat_to_plaintext, matrix_to_df, mirror_upper, run_with_threads,
    write_df_to_file, DataFrameFileType, DistanceMetric,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn, Level};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Comma-separated chain IDs to include, e.g. A,B.
    /// All chains of the first model are used when empty.
    #[arg(short, long, default_value_t = String::new())]
    chains: String,

    /// The inter-residue distance measure
    #[arg(short = 'd', long, value_enum, default_value_t = DistanceMetric::Ca)]
    metric: DistanceMetric,

    /// Contact distance threshold; when set, a binary contact matrix
    /// (distance < threshold) is emitted instead of raw distances
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Write the matrix to stdout as plaintext (recommended for piping into
    /// other CLI programs) instead of an output file
    #[arg(long, default_value_t = false)]
    plaintext: bool,

    /// Output directory
    #[arg(short, long, required_unless_present = "plaintext")]
    output: Option<PathBuf>,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("distmat"))]
    filename: String,

    /// Output file type
    #[arg(long, value_enum, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Number of threads to use for parallel processing (0 for all cores).
    /// One thread should be sufficient unless the system is very large
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    trace!("{args:?}");

    // Make sure `input` exists
    let input_path = match Path::new(&args.input).canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to retrieve input file: {}", e);
            return;
        }
    };
    let input_file: String = input_path.to_str().unwrap().parse().unwrap();

    // Load file as complex structure
    let (pdb, pdb_warnings) = match load_model(&input_file) {
        Ok(res) => res,
        Err(errors) => {
            for e in errors {
                error!("{e}");
            }
            return;
        }
    };
    if !pdb_warnings.is_empty() {
        for e in &pdb_warnings {
            match e.level() {
                pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
                pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
                _ => warn!("{e}"),
            }
        }
    }

    // Use the library function
    let mat = match run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        conmat::get_distance_matrix(&pdb, &args.chains, args.metric)
    }) {
        Ok(mat) => mat,
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    info!(
        "Computed a {n} x {n} {metric} distance matrix",
        n = mat.nrows(),
        metric = args.metric
    );

    // Mirror the upper triangle into a full symmetric matrix for output,
    // thresholding it into a contact map when requested
    let mut full = mirror_upper(&mat);
    if let Some(threshold) = args.threshold {
        full = contact_map(&full, threshold);
        debug!("Applied contact threshold {threshold}");
    }

    if args.plaintext {
        print!("{}", mat_to_plaintext(&full, args.threshold.is_some()));
        return;
    }

    // Prepare output directory
    let output_path = match std::path::absolute(args.output.as_ref().unwrap()) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to resolve the output directory: {}", e);
            return;
        }
    };
    let _ = std::fs::create_dir_all(output_path.clone());
    let output_file = output_path
        .join(args.filename.clone())
        .with_extension(args.output_format.to_string());

    let mut df = matrix_to_df(&full);
    write_df_to_file(&mut df, &output_file, args.output_format);
    let output_file_str = output_file.to_str().unwrap();
    info!("Results saved to {output_file_str}");
}
