//! rkernel Command Line Interface
//!
//! Computes kernel matrices and Nyström approximations of datasets stored as
//! CSV files, and inspects the saved results.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use ndarray::Array2;
use rkernel::api::Gram;
use rkernel::core::{KernelError, Orientation, Result, Scale};
use rkernel::kernel::{
    GammaRationalQuadraticKernel, GaussianKernel, LinearKernel, PolynomialKernel, PowerKernel,
    RationalQuadraticKernel, SigmoidKernel,
};
use rkernel::nystrom::NystromParams;
use rkernel::persistence::{KernelMatrixRecord, NystromRecord, Record};
use rkernel::read_csv_matrix;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rkernel")]
#[command(about = "Kernel matrices, centering and Nystrom approximation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "rkernel contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a kernel matrix
    Matrix(MatrixArgs),
    /// Compute a Nystrom approximation
    Nystrom(NystromArgs),
    /// Display a saved record
    Info(InfoArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    /// (1 + alpha * d^2)^-beta
    #[value(name = "rq")]
    RationalQuadratic,
    /// (1 + alpha * d^(2 gamma))^-beta
    #[value(name = "gamma-rq")]
    GammaRationalQuadratic,
    /// exp(-alpha * d^2)
    #[value(name = "gaussian", alias = "rbf")]
    Gaussian,
    /// scale * <x, y> + offset
    #[value(name = "linear")]
    Linear,
    /// (scale * <x, y> + offset)^degree
    #[value(name = "polynomial")]
    Polynomial,
    /// tanh(scale * <x, y> + offset)
    #[value(name = "sigmoid")]
    Sigmoid,
    /// d^(2 gamma)
    #[value(name = "power")]
    Power,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum CliOrientation {
    /// One observation per row
    #[default]
    #[value(name = "row")]
    Row,
    /// One observation per column
    #[value(name = "col")]
    Col,
}

impl From<CliOrientation> for Orientation {
    fn from(cli_orientation: CliOrientation) -> Self {
        match cli_orientation {
            CliOrientation::Row => Orientation::Row,
            CliOrientation::Col => Orientation::Col,
        }
    }
}

#[derive(Args, Debug)]
struct KernelArgs {
    /// Kernel family
    #[arg(short, long, default_value = "rq")]
    kernel: CliKernel,

    /// Scale parameter, one value or one per feature (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "1.0")]
    alpha: Vec<f64>,

    /// Shape parameter of the rational quadratic kernels
    #[arg(long, default_value = "1.0")]
    beta: f64,

    /// Exponent of the gamma rational quadratic and power kernels, in (0, 1]
    #[arg(long, default_value = "1.0")]
    gamma: f64,

    /// Dot product scale of the linear, polynomial and sigmoid kernels
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Offset of the linear, polynomial and sigmoid kernels
    #[arg(long, default_value = "1.0")]
    offset: f64,

    /// Polynomial degree
    #[arg(long, default_value = "2")]
    degree: u32,
}

impl KernelArgs {
    fn alpha(&self) -> Scale<f64> {
        match self.alpha.as_slice() {
            [a] => Scale::Scalar(*a),
            values => Scale::from(values.to_vec()),
        }
    }
}

/// Run `$body` with `$k` bound to the kernel described by `$args`
macro_rules! with_kernel {
    ($args:expr, $k:ident => $body:expr) => {{
        let args: &KernelArgs = $args;
        match args.kernel {
            CliKernel::RationalQuadratic => {
                let $k = RationalQuadraticKernel::new(args.alpha(), args.beta)?;
                $body
            }
            CliKernel::GammaRationalQuadratic => {
                let $k = GammaRationalQuadraticKernel::new(args.alpha(), args.beta, args.gamma)?;
                $body
            }
            CliKernel::Gaussian => {
                let $k = GaussianKernel::new(args.alpha())?;
                $body
            }
            CliKernel::Linear => {
                let $k = LinearKernel::new(args.scale, args.offset)?;
                $body
            }
            CliKernel::Polynomial => {
                let $k = PolynomialKernel::new(args.scale, args.offset, args.degree)?;
                $body
            }
            CliKernel::Sigmoid => {
                let $k = SigmoidKernel::new(args.scale, args.offset)?;
                $body
            }
            CliKernel::Power => {
                let $k = PowerKernel::new(args.gamma)?;
                $body
            }
        }
    }};
}

#[derive(Args)]
struct MatrixArgs {
    /// Observations (CSV)
    #[arg(long)]
    data: PathBuf,

    /// Second set of observations for a cross kernel matrix (CSV)
    #[arg(long)]
    cross: Option<PathBuf>,

    #[command(flatten)]
    kernel: KernelArgs,

    /// Double-center the result (Gram matrices only)
    #[arg(long, conflicts_with = "cross")]
    center: bool,

    /// Layout of the observations in the data files
    #[arg(long, value_enum, default_value_t = CliOrientation::Row)]
    orientation: CliOrientation,

    /// Output record file (JSON), prints CSV to stdout if not specified
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct NystromArgs {
    /// Observations (CSV)
    #[arg(long)]
    data: PathBuf,

    #[command(flatten)]
    kernel: KernelArgs,

    /// Number of random landmarks
    #[arg(short = 'm', long, conflicts_with = "indices", required_unless_present = "indices")]
    samples: Option<usize>,

    /// Landmark indices (comma separated)
    #[arg(long, value_delimiter = ',')]
    indices: Option<Vec<usize>>,

    /// Seed of the random landmark draw
    #[arg(long)]
    seed: Option<u64>,

    /// Eigenvalue tolerance, defaults to lambda_max * m * epsilon
    #[arg(long)]
    tolerance: Option<f64>,

    /// Layout of the observations in the data file
    #[arg(long, value_enum, default_value_t = CliOrientation::Row)]
    orientation: CliOrientation,

    /// Output record file (JSON)
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
    /// Record file
    record: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Matrix(args) => matrix_command(args),
        Commands::Nystrom(args) => nystrom_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn matrix_command(args: MatrixArgs) -> Result<()> {
    info!("Loading observations from: {:?}", args.data);
    let x = read_csv_matrix(&args.data)?;
    let y = args.cross.as_ref().map(read_csv_matrix).transpose()?;
    let orientation = Orientation::from(args.orientation);

    with_kernel!(&args.kernel, kernel => {
        info!("Kernel: {kernel}");
        let description = kernel.to_string();
        let gram = Gram::new(kernel)
            .with_orientation(orientation)
            .centered(args.center);
        let k = match &y {
            Some(y) => gram.compute_cross(&x, y)?,
            None => gram.compute(&x)?,
        };
        info!("Computed {}x{} kernel matrix", k.nrows(), k.ncols());

        match &args.output {
            Some(path) => {
                let record =
                    KernelMatrixRecord::new(k, &description, orientation, args.center, y.is_some());
                record.save_to_file(path)?;
                info!("Kernel matrix saved to: {path:?}");
            }
            None => write_csv(&k)?,
        }
    });

    Ok(())
}

fn nystrom_command(args: NystromArgs) -> Result<()> {
    info!("Loading observations from: {:?}", args.data);
    let x = read_csv_matrix(&args.data)?;

    let mut params = NystromParams::default().orientation(args.orientation.into());
    params = match (&args.indices, args.samples) {
        (Some(indices), _) => params.indices(indices.clone()),
        (None, Some(m)) => params.n_samples(m).seed(args.seed),
        (None, None) => {
            return Err(KernelError::InvalidSampleSize {
                size: 0,
                n_obs: x.nrows(),
                reason: "either --samples or --indices is required",
            })
        }
    };
    if let Some(tolerance) = args.tolerance {
        params = params.tolerance(tolerance);
    }

    with_kernel!(&args.kernel, kernel => {
        info!("Kernel: {kernel}");
        let factorization = params.fit(kernel, &x)?;
        info!(
            "Rank {} approximation from {} landmarks",
            factorization.rank(),
            factorization.samples().len()
        );
        let record = NystromRecord::from_factorization(&factorization);
        record.save_to_file(&args.output)?;
        info!("Nystrom record saved to: {:?}", args.output);
    });

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading record from: {:?}", args.record);
    let record = Record::load_from_file(&args.record)?;
    record.print_summary();
    Ok(())
}

fn write_csv(k: &Array2<f64>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for row in k.rows() {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkernel::Kernel;

    fn kernel_args(argv: &[&str]) -> KernelArgs {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            kernel: KernelArgs,
        }
        let mut full = vec!["test"];
        full.extend_from_slice(argv);
        Wrapper::parse_from(full).kernel
    }

    #[test]
    fn test_default_kernel_args() {
        let args = kernel_args(&[]);
        assert!(matches!(args.kernel, CliKernel::RationalQuadratic));
        assert_eq!(args.alpha(), Scale::Scalar(1.0));
        assert_eq!(args.degree, 2);
    }

    #[test]
    fn test_vector_alpha() {
        let args = kernel_args(&["--kernel", "gaussian", "--alpha", "0.5,2"]);
        assert_eq!(args.alpha(), Scale::Vector(ndarray::array![0.5, 2.0]));
    }

    #[test]
    fn test_with_kernel_dispatch() -> Result<()> {
        let args = kernel_args(&["--kernel", "polynomial", "--degree", "3", "--offset", "0"]);
        let value = with_kernel!(&args, kernel => {
            kernel.evaluate(&ndarray::array![1.0, 1.0], &ndarray::array![1.0, 0.0])
        });
        assert_eq!(value, 1.0);

        let bad = kernel_args(&["--kernel", "power", "--gamma", "2"]);
        let res: Result<f64> = (|| {
            Ok(with_kernel!(&bad, kernel => {
                kernel.evaluate(&ndarray::array![0.0], &ndarray::array![1.0])
            }))
        })();
        assert!(res.is_err());
        Ok(())
    }
}
