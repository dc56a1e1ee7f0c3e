use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "edmbridge")]
#[command(about = "EdmBridge CLI - turn OData CSDL into mediation schemas and GraphQL SDL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an edmbridge.toml configuration file
    #[arg(short, long, global = true, env = "EDMBRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, env = "EDMBRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Product tag for @backend directives (overrides config)
    #[arg(long, global = true)]
    pub product: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a mediation schema (JSON) from a CSDL document
    Mediate(MediateArgs),
    /// Generate GraphQL SDL from a mediation schema (JSON)
    Sdl(SdlArgs),
    /// Run both stages: CSDL document to mediation schema to SDL
    Generate(GenerateArgs),
}

#[derive(Args)]
pub struct MediateArgs {
    /// CSDL (EDMX) document
    pub schema: PathBuf,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SdlArgs {
    /// Mediation schema produced by `edmbridge mediate`
    pub mediation: PathBuf,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// CSDL (EDMX) document
    pub schema: PathBuf,
    /// Also write the intermediate mediation schema here
    #[arg(long)]
    pub mediation_out: Option<PathBuf>,
    /// SDL output file (stdout when omitted)
    #[arg(long)]
    pub sdl_out: Option<PathBuf>,
}
