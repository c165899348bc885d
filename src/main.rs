use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use tracing::info;
use tracing_subscriber::EnvFilter;

use configuration::Configuration;
use sim::composite::CompositeSystem;
use sim::initial_parameters::InitialParameters;
use sim::model::Model;
use sim::system::StellarSystem;
use sim::units::Float;

mod codec;
mod configuration;
mod error;
mod sim;

/// Create an initial configuration for galaxy.exe
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "config.txt")]
    output: String,
    /// Path for configuration files
    #[arg(short, long, default_value = ".")]
    path: PathBuf,
    /// Used to initialize distribution
    #[arg(long, default_value = "plummer")]
    model: String,
    /// Number of bodies
    #[arg(short, long, default_value_t = 100)]
    number_bodies: usize,
    /// Scale radius of each model
    #[arg(short, long, default_value_t = 1.0)]
    radius: Float,
    /// Initialize the random number generator (drawn from the OS if absent)
    #[arg(long)]
    seed: Option<u64>,
    /// YAML description of a composite system
    #[arg(long)]
    composite: Option<PathBuf>,
    /// Theta criterion of the Barnes-Hut algorithm
    #[arg(long, default_value_t = 1.0)]
    theta: Float,
    /// Gravitational constant
    #[arg(long = "g", default_value_t = 1.0)]
    g: Float,
    /// Step size for integration
    #[arg(long, default_value_t = 0.1)]
    dt: Float,
    /// Version written in the configuration header
    #[arg(long, default_value_t = 1.1)]
    config_version: Float,
    /// Log energies, virial ratio and radial quartiles of the generated bodies
    #[arg(long)]
    stats: bool,
    /// Print codec test data and exit
    #[arg(long)]
    generate: bool,
    /// Read the stored configuration back and check it matches
    #[arg(long)]
    verify: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_codec_test_data<R: Rng + ?Sized>(rng: &mut R) {
    let distribution: Uniform<Float> = Uniform::new(-5., 5.);
    for _ in 0..10 {
        let x: Float = distribution.sample(rng);
        println!("assert_eq!(decode(\"{}\").unwrap(), {:?});", codec::encode(x), x);
    }
}

fn log_statistics(system: &StellarSystem, g: Float, radius: Float) {
    let kinetic = system.kinetic_energy();
    let potential = system.potential_energy(g);
    info!(
        "T={:.3}, V={:.3}, E={:.3}, Virial Ratio={:.3}",
        kinetic,
        potential,
        kinetic + potential,
        -potential / kinetic
    );
    info!(
        "Centre of mass {:?}, mean velocity {:?}",
        system.centre_of_mass(),
        system.mean_velocity()
    );
    if let Some(quartiles) = system.radial_quartiles() {
        let expected = StellarSystem::analytic_quartiles().map(|q| radius * q);
        info!(
            "Q1: {:.3}[{:.3}], Q2: {:.3}[{:.3}], Q3: {:.3}[{:.3}]",
            quartiles[0], expected[0], quartiles[1], expected[1], quartiles[2], expected[2]
        );
    }
}

fn main() -> Result<()> {
    init_logging();
    let start = Instant::now();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    if args.generate {
        print_codec_test_data(&mut rng);
        return Ok(());
    }

    info!("Specified seed   = {:?}", args.seed);
    info!("Actual seed      = {}", seed);

    let (bodies, description) = match &args.composite {
        None => {
            let params = InitialParameters {
                model: args.model.parse::<Model>()?,
                body_count: args.number_bodies,
                radius: args.radius,
            };
            info!("Number of bodies = {}", params.body_count);
            let system = StellarSystem::new(&params, &mut rng)?;
            let description = format!(
                "{}: n={}, r={}",
                params.model, params.body_count, params.radius
            );
            (system.bodies, description)
        }
        Some(file) => {
            let composite = CompositeSystem::load(file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            let bodies = composite.expand(args.radius, &mut rng)?;
            let description = format!(
                "{} ({}): n={}, r={}",
                composite.name,
                composite.model,
                composite.body_count(),
                args.radius
            );
            (bodies, description)
        }
    };

    let configuration = Configuration {
        version: args.config_version,
        theta: args.theta,
        g: args.g,
        dt: args.dt,
        ..Configuration::new(bodies)
    };
    let config_file = args.path.join(&args.output);
    configuration
        .save(&config_file)
        .with_context(|| format!("Failed to store {}", config_file.display()))?;
    info!("Created {}", description);

    if args.verify {
        let restored = Configuration::load(&config_file)
            .with_context(|| format!("Failed to read back {}", config_file.display()))?;
        if restored != configuration {
            bail!("{} does not match the generated bodies", config_file.display());
        }
        info!("Verified {} bodies", restored.bodies.len());
    }

    if args.stats {
        let system = StellarSystem {
            bodies: configuration.bodies,
        };
        log_statistics(&system, args.g, args.radius);
    }

    let elapsed = start.elapsed().as_secs_f64();
    let minutes = (elapsed / 60.).floor();
    info!("Elapsed Time {} m {:.2} s", minutes, elapsed - 60. * minutes);
    Ok(())
}
