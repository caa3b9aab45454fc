use std::path::PathBuf;

use clap::{command, Parser};

use ctw::{Catalog, CatalogError, CatalogPathBuf};
use ctw::config::ScanConfig;

fn build_catalog(dir: &PathBuf, config: &Option<PathBuf>) -> Result<Catalog, CatalogError> {
    let mut registry = ctw::handlers::desktop_registry();
    if let Some(config_path) = config {
        if let Some(scan_config) = ScanConfig::load_from(config_path) {
            scan_config.apply(&mut registry);
        }
    }
    Catalog::build(dir, &registry)
}

#[derive(clap::Args)]
struct ScanCommand {
    /// Root directory to scan
    dir: PathBuf,
    /// Path to a catwalk.json with extra collector types
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ScanCommand {
    fn run(&self) {
        match build_catalog(&self.dir, &self.config) {
            Ok(catalog) => {
                let rendered = serde_json::to_string_pretty(&catalog.to_json())
                    .expect("catalog tree always serializes");
                println!("{}", rendered);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

#[derive(clap::Args)]
struct GetCommand {
    /// Root directory to scan
    dir: PathBuf,
    /// Slash-joined address, e.g. /collector/files/wallpaper
    address: String,
    /// Path to a catwalk.json with extra collector types
    #[arg(long)]
    config: Option<PathBuf>,
}

impl GetCommand {
    fn run(&self) {
        let result = CatalogPathBuf::parse(&self.address)
            .and_then(|address| {
                let catalog = build_catalog(&self.dir, &self.config)?;
                Ok(catalog.get(&address)?.to_json())
            });
        match result {
            Ok(node) => {
                let rendered = serde_json::to_string_pretty(&node)
                    .expect("catalog node always serializes");
                println!("{}", rendered);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
enum Commands {
    Scan(ScanCommand),
    Get(GetCommand),
}

#[derive(Parser)]
#[command(name = "catwalk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan(scan) => scan.run(),
        Commands::Get(get) => get.run(),
    }
}
