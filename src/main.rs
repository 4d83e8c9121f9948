mod cli;

use anyhow::Result;
use sedline::{CancellationToken, Invocation, config, logger};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("sedline: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = cli::parse_args();
    let settings = config::load_settings()?;

    if let Some(path) = logger::init_debug_logging(args.debug_enabled(&settings)) {
        tracing::debug!(log = %path.display(), "debug logging enabled");
    }

    let config = match args.to_config(&settings) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sedline: {}", e);
            return Ok(ExitCode::from(1));
        }
    };

    let stdin = io::stdin().lock();
    let mut stdout = io::BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();

    // Invocation::run has already reported a fatal error on stderr
    match Invocation::run(config, CancellationToken::new(), stdin, &mut stdout, &mut stderr) {
        Ok(summary) if summary.is_success() => Ok(ExitCode::SUCCESS),
        Ok(_) => Ok(ExitCode::from(2)),
        Err(_) => Ok(ExitCode::from(1)),
    }
}
