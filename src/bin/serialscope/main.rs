mod app;
mod output;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use serialscope::{
    metadata::typesystem::TypeRegistry,
    serialization::{emit_all, inspect_all, LineEmitter},
};

use crate::{
    app::{Cli, GlobalOptions},
    output::{print_output, TypeOutput},
};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // Show serialscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("serialscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let registry = TypeRegistry::from_file(&cli.path)
        .with_context(|| format!("failed to load assembly: {}", cli.path.display()))?;
    log::debug!("{}: {} types", cli.path.display(), registry.len());

    render(&registry, &cli.types, &cli.global, &mut std::io::stdout().lock())
}

/// Inspects every name of `types` and writes the reports to `out`. Nothing is written unless
/// every type was inspected successfully.
fn render<W: Write>(
    registry: &TypeRegistry,
    types: &[String],
    opts: &GlobalOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let results = inspect_all(registry, types);

    let mut outputs = Vec::with_capacity(results.len());
    for (type_name, result) in types.iter().zip(results) {
        let reports = result.with_context(|| format!("failed to inspect type: {type_name}"))?;
        outputs.push((type_name, reports));
    }

    let json: Vec<TypeOutput> = outputs
        .iter()
        .map(|(type_name, reports)| TypeOutput::new(type_name, reports))
        .collect();

    print_output(out, &json, opts, |out, _| {
        for (position, (_, reports)) in outputs.iter().enumerate() {
            if position > 0 {
                writeln!(out)?;
            }
            emit_all(&mut LineEmitter::new(&mut *out), reports)?;
        }
        Ok(())
    })
}
