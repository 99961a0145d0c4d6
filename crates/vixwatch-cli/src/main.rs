mod cli;
mod error;
mod github_output;
mod logging;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::Instrument;
use uuid::Uuid;
use vixwatch_core::{
    exit_code, AcquisitionConfig, AcquisitionResult, ReqwestHttpClient, SourceChain,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::github_output::StepOutputs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(error) if !error.use_stderr() => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(CliError::Usage(error).exit_code());
        }
    };

    if let Err(error) = logging::init(cli.log_format) {
        eprintln!("warning: logging disabled: {error}");
    }

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = cli.acquisition_config()?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %run_id);
    let result = acquire(&config).instrument(span.clone()).await;
    let _entered = span.enter();

    let record = result.to_json(cli.pretty)?;
    {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{record}")?;
        stdout.flush()?;
    }

    if let Some(path) = cli.github_output.as_deref() {
        // The step payload stays single-line regardless of --pretty.
        let payload = if cli.pretty {
            result.to_json(false)?
        } else {
            record
        };
        if let Some(outputs) = StepOutputs::from_result(&result, payload) {
            if let Err(error) = outputs.append_to(path) {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "failed to write GitHub step outputs"
                );
            }
        }
    }

    Ok(ExitCode::from(exit_code(&result)))
}

async fn acquire(config: &AcquisitionConfig) -> AcquisitionResult {
    let chain = SourceChain::standard(Arc::new(ReqwestHttpClient::new()), config);
    tracing::info!(
        sources = chain.len(),
        threshold = config.threshold(),
        max_attempts = config.retry().max_attempts(),
        timeout_ms = config.request_timeout_ms(),
        "starting acquisition"
    );

    let outcome = chain.acquire().await;
    let result = AcquisitionResult::build(&outcome, config.threshold());

    match (result.source_used(), result.value(), result.error()) {
        (Some(source), Some(value), _) => tracing::info!(
            %source,
            vix = value,
            exceeded = result.exceeded(),
            "acquisition succeeded"
        ),
        (_, _, Some(error)) => tracing::error!(error, "acquisition failed"),
        _ => {}
    }

    result
}
