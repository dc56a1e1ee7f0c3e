mod cli;
mod config;
mod observability;
mod output;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use edmbridge_graphql::generate_sdl;
use edmbridge_mediation::{Service, map_document};
use tracing::info;

use cli::{Cli, Commands};
use config::AppConfig;
use output::{print_error, print_success};

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;

    if let Some(product) = &cli.product {
        config.graphql.product = product.clone();
        config.graphql.validate().map_err(|e| anyhow!(e))?;
    }

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    observability::init_tracing(level);

    match &cli.command {
        Commands::Mediate(args) => {
            let service = mediate(&args.schema, &config)?;
            let json = service.to_json_pretty()?;
            emit(&json, args.output.as_deref())?;
        }
        Commands::Sdl(args) => {
            let service = Service::from_json_file(&args.mediation).with_context(|| {
                format!("Failed to load mediation schema {}", args.mediation.display())
            })?;
            let sdl = generate_sdl(&service, &config.graphql)?;
            emit(&sdl, args.output.as_deref())?;
        }
        Commands::Generate(args) => {
            let service = mediate(&args.schema, &config)?;
            if let Some(path) = &args.mediation_out {
                service
                    .write_json_file(path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                print_success(&format!("Mediation schema written to {}", path.display()));
            }
            let sdl = generate_sdl(&service, &config.graphql)?;
            emit(&sdl, args.sdl_out.as_deref())?;
        }
    }

    Ok(())
}

fn mediate(schema: &Path, config: &AppConfig) -> Result<Service> {
    let document = edmbridge_csdl::from_xml_file(schema)
        .with_context(|| format!("Failed to read CSDL document {}", schema.display()))?;
    let service = map_document(&document, &config.mediation)
        .with_context(|| format!("Failed to map {}", schema.display()))?;

    info!(
        service = %service.name,
        types = service.types.len(),
        collections = service.collections.len(),
        "Mediation schema built"
    );
    Ok(service)
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!("Written to {}", path.display()));
        }
        None => print!("{content}"),
    }
    Ok(())
}
