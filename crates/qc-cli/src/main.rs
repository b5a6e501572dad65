use anyhow::Result;
use clap::Parser;
use qc_cli::Args;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    qc_cli::run(&args, &mut out)?;
    Ok(())
}
