use std::path::PathBuf;

use clap::Parser;

/// serialscope - which members of a .NET type the content serializer picks up
#[derive(Debug, Parser)]
#[command(name = "serialscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Path to the .NET assembly file.
    #[arg(value_name = "ASSEMBLY")]
    pub path: PathBuf,

    /// Fully qualified type names (`Ns.Type`, nested types as `Ns.Outer/Inner` or `Ns.Outer+Inner`).
    #[arg(value_name = "TYPE", required = true, num_args = 1..)]
    pub types: Vec<String>,
}

/// Options shared by every invocation.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of report lines.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
