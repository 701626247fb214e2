use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tb_bearing::{BearingConfig, SolverSettings, SommerfeldKind, ViscosityCalibration};
use tb_solver::{Bearing, CoefficientMethod, DEFAULT_GUESS, DynamicCoefficients};

#[derive(Parser)]
#[command(name = "tb-cli")]
#[command(about = "ThermoBearing CLI - THD journal bearing analysis tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case YAML file
        case_path: PathBuf,
    },
    /// Solve a case: equilibrium position plus dynamic coefficients
    Run {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Linearization for the dynamic coefficients
        #[arg(long, value_enum, default_value_t = MethodArg::Lund)]
        method: MethodArg,
        /// Starting eccentricity ratio for the equilibrium search
        #[arg(long, default_value_t = DEFAULT_GUESS[0])]
        eccentricity: f64,
        /// Starting attitude angle [rad]
        #[arg(long, default_value_t = DEFAULT_GUESS[1])]
        attitude: f64,
    },
    /// Solve the built-in example bearing
    Demo {
        /// Linearization for the dynamic coefficients
        #[arg(long, value_enum, default_value_t = MethodArg::Lund)]
        method: MethodArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Lund,
    Perturbation,
}

impl From<MethodArg> for CoefficientMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Lund => CoefficientMethod::Lund,
            MethodArg::Perturbation => CoefficientMethod::Perturbation,
        }
    }
}

/// On-disk case description. Field names carry their units; speed is given
/// in rpm and converted at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CaseDef {
    name: String,
    length_m: f64,
    radius_m: f64,
    clearance_m: f64,
    pad_arc_deg: f64,
    n_z: usize,
    n_theta: usize,
    mu_ref_pas: f64,
    speed_rpm: f64,
    load_x_n: f64,
    load_y_n: f64,
    conductivity_w_mk: f64,
    specific_heat_j_kgk: f64,
    density_kg_m3: f64,
    reservoir_temperature_c: f64,
    mixing_ratio: Vec<f64>,
    calibration: ViscosityCalibration,
    #[serde(default)]
    sommerfeld: SommerfeldKind,
    #[serde(default)]
    settings: SolverSettings,
}

impl CaseDef {
    fn to_config(&self) -> BearingConfig {
        BearingConfig {
            length: self.length_m,
            radius: self.radius_m,
            clearance: self.clearance_m,
            pad_arc_deg: self.pad_arc_deg,
            n_z: self.n_z,
            n_theta: self.n_theta,
            mu_ref: self.mu_ref_pas,
            speed: tb_core::units::rpm_to_rad_s(self.speed_rpm),
            load_x: self.load_x_n,
            load_y: self.load_y_n,
            conductivity: self.conductivity_w_mk,
            specific_heat: self.specific_heat_j_kgk,
            density: self.density_kg_m3,
            reservoir_temperature: self.reservoir_temperature_c,
            mixing_ratio: self.mixing_ratio.clone(),
            calibration: self.calibration,
            sommerfeld: self.sommerfeld,
            settings: self.settings,
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run {
            case_path,
            method,
            eccentricity,
            attitude,
        } => load_case(&case_path).and_then(|(name, config)| {
            cmd_solve(&name, config, method.into(), [eccentricity, attitude])
        }),
        Commands::Demo { method } => cmd_solve(
            "built-in example",
            BearingConfig::example(),
            method.into(),
            DEFAULT_GUESS,
        ),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_case(case_path: &Path) -> Result<(String, BearingConfig), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(case_path)?;
    let case: CaseDef = serde_yaml::from_str(&text)?;
    Ok((case.name.clone(), case.to_config()))
}

fn cmd_validate(case_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating case: {}", case_path.display());
    let (name, config) = load_case(case_path)?;
    config.validate()?;
    println!("✓ Case '{name}' is valid");
    Ok(())
}

fn cmd_solve(
    name: &str,
    config: BearingConfig,
    method: CoefficientMethod,
    guess: [f64; 2],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Solving case: {name}");

    let mut bearing = Bearing::new(config)?;

    let t0 = Instant::now();
    let eq = bearing.find_equilibrium(guess)?;
    let equilibrium_time = t0.elapsed().as_secs_f64();

    if eq.converged {
        println!("✓ Equilibrium found in {} iterations", eq.iterations);
    } else {
        println!(
            "! Equilibrium search exhausted its budget after {} iterations; reporting best point",
            eq.iterations
        );
    }
    println!("  Eccentricity ratio: {:.6}", eq.eccentricity);
    println!("  Attitude angle:     {:.6} rad", eq.attitude);
    println!("  Residual force:     {:.3e} N", eq.residual);

    let t1 = Instant::now();
    let coefs = bearing.coefficients(method)?;
    let coefficient_time = t1.elapsed().as_secs_f64();

    print_coefficients(&coefs);

    println!("\nTiming summary:");
    println!("  Equilibrium:  {equilibrium_time:.3}s");
    println!("  Coefficients: {coefficient_time:.3}s");

    Ok(())
}

fn print_coefficients(coefs: &DynamicCoefficients) {
    let k = &coefs.stiffness;
    let c = &coefs.damping;
    println!("\nStiffness [N/m]:");
    println!("  kxx = {:>13.6e}  kxy = {:>13.6e}", k[(0, 0)], k[(0, 1)]);
    println!("  kyx = {:>13.6e}  kyy = {:>13.6e}", k[(1, 0)], k[(1, 1)]);
    println!("Damping [N.s/m]:");
    println!("  cxx = {:>13.6e}  cxy = {:>13.6e}", c[(0, 0)], c[(0, 1)]);
    println!("  cyx = {:>13.6e}  cyy = {:>13.6e}", c[(1, 0)], c[(1, 1)]);
}
