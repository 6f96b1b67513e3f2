//! protoc-gen-tera entrypoint
//! Reads a generator request, renders the template tree and emits the response.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use protoc_gen_tera::application::{
    ConfigOverrides, GeneratePluginUseCase, OutputService, RequestLoader,
};
use protoc_gen_tera::generation::BuildInfo;
use protoc_gen_tera::infrastructure::{
    FileSystemOutputService, JsonRequestLoader, RequestSource, ResponseOutputService,
};

#[derive(Parser)]
#[command(name = "protoc-gen-tera")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read the request JSON from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write generated files beneath this directory instead of printing a response
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Template directory (overrides the `template_dir` parameter)
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Destination directory exposed to templates (overrides `destination_dir`)
    #[arg(long)]
    destination_dir: Option<String>,
    /// Log discovery and pass details
    #[arg(long)]
    debug: bool,
    /// Render once per file instead of once per service
    #[arg(long)]
    all: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the response
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(cli));
    // Render tasks detached by a failed pass are not waited for
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Generation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let loader = match cli.input {
        Some(path) => JsonRequestLoader::new(RequestSource::File(path)),
        None => JsonRequestLoader::stdin(),
    };
    let request = loader.load().await.context("Failed to read generator request")?;

    let build = BuildInfo::collect().context("Failed to collect build information")?;

    let output_service: Arc<dyn OutputService> = match &cli.output_dir {
        Some(dir) => {
            info!(output_dir = %dir.display(), "Writing files to directory");
            Arc::new(FileSystemOutputService::new(dir))
        }
        None => Arc::new(ResponseOutputService::stdout()),
    };

    let overrides = ConfigOverrides {
        template_dir: cli.template_dir,
        destination_dir: cli.destination_dir,
        debug: cli.debug,
        all: cli.all,
    };

    let response = GeneratePluginUseCase::new(build, overrides, output_service)
        .execute(request)
        .await
        .context("Failed to generate files")?;

    info!(
        files = response.files_count,
        mode = %response.mode,
        "Generation complete"
    );
    Ok(())
}
