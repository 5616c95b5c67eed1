//! Lists, describes and exports the datasets known to the catalog.
use anyhow::{Context, Result};
use border_dataset::{Catalog, CatalogConfig, DatasetInfo, DatasetRef, OutputFormat};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

/// Browse dataset descriptors
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file of catalog configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every name/config/version
    List,

    /// Print the record of NAME[/CONFIG][:VERSION]
    Describe {
        dataset: DatasetRef,

        /// json or yaml
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write dataset_info.json of every config and version of a dataset
    Export {
        name: String,

        /// Root directory of exported records
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    match path {
        Some(path) => {
            info!("Load config from {:?}", path);
            CatalogConfig::load(path).with_context(|| format!("Failed to load {:?}", path))
        }
        None => Ok(CatalogConfig::default()),
    }
}

fn list(catalog: &Catalog) -> Result<Vec<String>> {
    let mut lines = vec![];
    for name in catalog.list() {
        let builder = catalog.builder(name)?;
        let default_config = builder.default_config_name();
        let default_version = builder.default_version();
        for config in builder.configs() {
            for v in builder.versions() {
                let mut line = format!("{}/{}/{}", name, config.name, v.version);
                if default_config.as_deref() == Some(config.name.as_str())
                    && v.version == default_version
                {
                    line.push_str(" (default)");
                }
                lines.push(line);
            }
        }
    }
    Ok(lines)
}

fn describe(catalog: &Catalog, dataset: &DatasetRef, format: OutputFormat) -> Result<String> {
    let info = catalog.describe(dataset)?;
    Ok(format.render(&info)?)
}

fn export(catalog: &Catalog, name: &str, data_dir: &Path) -> Result<Vec<PathBuf>> {
    let builder = catalog.builder(name)?;
    let mut paths = vec![];
    for config in builder.configs() {
        for v in builder.versions() {
            let info: DatasetInfo = builder.describe(&config.name, Some(&v.version))?;
            let path = info.save(data_dir)?;
            info!("Exported {} to {:?}", info.full_name(), path);
            paths.push(path);
        }
    }
    Ok(paths)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let catalog = border_d4rl::catalog()?;

    match &args.command {
        Command::List => {
            for line in list(&catalog)? {
                println!("{}", line);
            }
        }
        Command::Describe { dataset, format } => {
            let format = format.unwrap_or(config.format);
            println!("{}", describe(&catalog, dataset, format)?);
        }
        Command::Export { name, data_dir } => {
            let data_dir = data_dir.as_ref().unwrap_or(&config.data_dir);
            let paths = export(&catalog, name, data_dir)?;
            info!("Exported {} records to {:?}", paths.len(), data_dir);
        }
    }

    Ok(())
}
