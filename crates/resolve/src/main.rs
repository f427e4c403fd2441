use clap::Parser;
use link_resolve::Resolver;
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve symbols across object modules and static archives.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ResolveArgs {
    /// Object (`.o`) and archive (`.a`) inputs, in link order.
    #[arg(value_name = "path")]
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = ResolveArgs::parse();

    if args.inputs.is_empty() {
        println!("resolve: no input files");
        return Ok(ExitCode::FAILURE);
    }

    let outcome = Resolver::new().run(&args.inputs)?;

    for diag in &outcome.diagnostics {
        println!("{diag}");
    }

    println!("Defined Symbol Table");
    for symbol in &outcome.defined {
        println!("{symbol}");
    }

    Ok(if outcome.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
