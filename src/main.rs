use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use pheno_synth::utils::logging::{create_spinner, finish_progress_bar};
use pheno_synth::{
    BuiltinNames, GeneratorConfig, OutputFormat, ProfileAssembler, RecordBatch,
    generate_timeseries_personas, generate_users, load_catalog_async, write_batch,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "pheno-synth")]
#[command(about = "Generate synthetic patient profiles from phenotype frequency tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lab-study personas: three-round games per participant
    Personas {
        /// Disorder to generate games for (repeat for up to three)
        #[arg(short, long = "disorder", required = true)]
        disorders: Vec<String>,

        /// Number of participants
        #[arg(long, default_value_t = 100)]
        participants: usize,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Peer-matching user pool covering every disorder in the catalog
    Users {
        /// Users generated per disorder
        #[arg(long, default_value_t = 25)]
        users_per_disorder: usize,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Phenotype source table (CSV or Parquet); repeat to merge several
    #[arg(short, long = "catalog", required = true)]
    catalogs: Vec<PathBuf>,

    /// Average number of phenotypes per profile
    #[arg(short, long, default_value_t = 10)]
    phenotypes: usize,

    /// Output file (timestamped name in the current directory if not given)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; guessed from the output extension when not given
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Random seed (uses PHENO_SEED, then a random seed, if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generator configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for user generation
    #[arg(long, default_value_t = num_cpus::get())]
    threads: usize,
}

impl CommonArgs {
    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        }
        .with_env_overrides();
        if self.seed.is_some() {
            config.cohort.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }

    fn output_target(&self, dataset: &str) -> (PathBuf, OutputFormat) {
        let format = self
            .format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default();
        let path = self.output.clone().unwrap_or_else(|| {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(format!("{dataset}_{stamp}.{}", format.extension()))
        });
        (path, format)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let common = match &cli.command {
        Command::Personas { common, .. } | Command::Users { common, .. } => common,
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(common.threads.max(1))
        .build_global()
        .context("failed to configure the worker pool")?;

    let config = common.generator_config()?;
    info!("{config}");

    let mut rng = match config.cohort.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let spinner = create_spinner(Some("Loading phenotype catalog"));
    let catalog = load_catalog_async(&common.catalogs).await?;
    finish_progress_bar(&spinner, Some("Catalog loaded"));
    let assembler = ProfileAssembler::new(&catalog, config.sampling.clone());

    let start = Instant::now();
    let (dataset, batch) = match &cli.command {
        Command::Personas {
            disorders,
            participants,
            ..
        } => {
            let personas = generate_timeseries_personas(
                &assembler,
                disorders,
                common.phenotypes,
                *participants,
                &config.cohort,
                &mut rng,
            )?;
            ("personas", personas.to_record_batch()?)
        }
        Command::Users {
            users_per_disorder, ..
        } => {
            let users = generate_users(
                &assembler,
                catalog.disorders(),
                common.phenotypes,
                *users_per_disorder,
                &BuiltinNames,
                &config.cohort,
                &mut rng,
            )?;
            ("users", users.to_record_batch()?)
        }
    };
    info!("Generated {dataset} in {:?}", start.elapsed());

    let (path, format) = common.output_target(dataset);
    save(&batch, &path, format)?;
    Ok(())
}

fn save(batch: &RecordBatch, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    write_batch(batch, path, format)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}
