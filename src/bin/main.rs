//! Blockbridge CLI
//!
//! Translate Java Edition block and item models into a Bedrock resource pack.

use blockbridge::{
    build_pack, load_resources, BridgeConfig, GeometryTransformer, PackPaths, RecordingRegistry,
    ResourceLocation, ResourceStore, StaticCatalog,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockbridge")]
#[command(author, version, about = "Translate Java block and item models into a Bedrock resource pack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a catalog and assemble a .mcpack
    Build {
        /// Catalog JSON describing blocks and items
        #[arg(short, long)]
        catalog: PathBuf,

        /// Bundled resources (mod jar, ZIP or directory)
        #[arg(short, long)]
        resources: PathBuf,

        /// Directory of already generated assets checked before the bundled ones
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Output archive path
        #[arg(short, long)]
        output: PathBuf,

        /// Directory the pack tree is built in (defaults to <output>.d)
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Pack icon PNG
        #[arg(long)]
        icon: Option<PathBuf>,

        /// Pack name
        #[arg(long, default_value = "blockbridge")]
        pack_name: String,

        /// Pack description
        #[arg(long)]
        description: Option<String>,

        /// Pack version as major.minor.patch
        #[arg(long, default_value = "1.0.0", value_parser = parse_version)]
        pack_version: [u32; 3],

        /// Use random manifest UUIDs
        #[arg(long)]
        random_uuids: bool,
    },

    /// Convert a single model and print its geometry
    Geometry {
        /// Bundled resources (mod jar, ZIP or directory)
        #[arg(short, long)]
        resources: PathBuf,

        /// Model location (e.g., "mymod:block/ruby_block")
        #[arg(short, long)]
        model: String,
    },

    /// Show information about bundled resources
    Info {
        /// Bundled resources (mod jar, ZIP or directory)
        #[arg(short, long)]
        resources: PathBuf,
    },
}

fn parse_version(s: &str) -> Result<[u32; 3], String> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 3 {
        return Err(format!("Invalid version: '{}'. Use major.minor.patch", s));
    }
    let mut version = [0u32; 3];
    for (slot, part) in version.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("Invalid version component '{}' in '{}'", part, s))?;
    }
    Ok(version)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            catalog,
            resources,
            overlay,
            output,
            work_dir,
            icon,
            pack_name,
            description,
            pack_version,
            random_uuids,
        } => {
            let mut config = BridgeConfig::default()
                .with_pack_name(pack_name)
                .with_version(pack_version)
                .with_random_uuids(random_uuids);
            if let Some(description) = description {
                config = config.with_description(description);
            }
            let work_dir = work_dir.unwrap_or_else(|| output.with_extension("d"));
            build(
                &catalog,
                &resources,
                overlay.as_deref(),
                &output,
                &work_dir,
                icon.as_deref(),
                config,
            )?;
        }
        Commands::Geometry { resources, model } => {
            print_geometry(&resources, &model)?;
        }
        Commands::Info { resources } => {
            show_resource_info(&resources)?;
        }
    }

    Ok(())
}

fn build(
    catalog_path: &Path,
    resources_path: &Path,
    overlay_path: Option<&Path>,
    output_path: &Path,
    work_dir: &Path,
    icon: Option<&Path>,
    config: BridgeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading resources from {:?}...", resources_path);
    let bundled = load_resources(resources_path)?;
    println!("  Found {} files", bundled.len());

    let overlay = match overlay_path {
        Some(path) => {
            println!("Loading overlay from {:?}...", path);
            load_resources(path)?
        }
        None => ResourceStore::new(),
    };

    println!("Loading catalog from {:?}...", catalog_path);
    let catalog = StaticCatalog::from_path(catalog_path)?;
    println!(
        "  Loaded {} blocks, {} items",
        catalog.blocks.len(),
        catalog.items.len()
    );

    let mut registry = RecordingRegistry::new();
    let report = build_pack(
        &catalog,
        &overlay,
        &bundled,
        &mut registry,
        config,
        PackPaths {
            work_dir,
            output: output_path,
            icon,
        },
    )?;

    let stats = report.translation;
    println!(
        "  Blocks: {} translated, {} failed, {} states skipped",
        stats.blocks_translated, stats.blocks_failed, stats.states_skipped
    );
    println!(
        "  Items: {} translated, {} skipped, {} failed",
        stats.items_translated, stats.items_skipped, stats.items_failed
    );
    println!(
        "  Wrote {} geometries, {} textures ({} missing)",
        report.written.geometries, report.written.textures_copied, report.written.textures_missing
    );

    let registrations_path = output_path.with_file_name("registrations.json");
    fs::write(&registrations_path, registry.to_json()?)?;

    println!(
        "Exported pack ({} files) to {:?}",
        report.archived_files, output_path
    );
    println!("  Registrations: {:?}", registrations_path);

    Ok(())
}

fn print_geometry(resources_path: &Path, model: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bundled = load_resources(resources_path)?;
    let config = BridgeConfig::default();
    let transformer = GeometryTransformer::new(&bundled, config.geometry_format_version);

    let result = transformer.convert(&ResourceLocation::parse(model))?;
    println!("{}", serde_json::to_string_pretty(&result.document)?);

    Ok(())
}

fn show_resource_info(resources_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading resources from {:?}...", resources_path);
    let resources = load_resources(resources_path)?;

    println!("\nResource Info:");
    println!("  Namespaces: {}", resources.namespaces().join(", "));
    println!("  Models: {}", resources.count_kind("models"));
    println!("  Textures: {}", resources.count_kind("textures"));
    println!("  Item assets: {}", resources.count_kind("items"));

    Ok(())
}
