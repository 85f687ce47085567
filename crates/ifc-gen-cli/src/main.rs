// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ifc-gen` - compile element requests into IFC4 files

mod config;
mod response;
mod storage;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use config::ServiceConfig;
use ifc_gen_builders::{compile, global_registry, CompileError};
use ifc_gen_document::{StepHeader, StepWriter};
use ifc_gen_model::GenerateRequest;
use response::{EncodedFile, FailureResponse, GenerateResponse, HealthReport};
use serde::Serialize;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code when no element could be built
const EXIT_BATCH_EMPTY: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "ifc-gen", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a generate request (JSON) into an IFC file.
    Compile(CompileArgs),
    /// Print the available element types.
    Health,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Request JSON file, or `-` for stdin.
    request: PathBuf,

    /// Directory for the generated file (overrides STORAGE_DIR).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write the response JSON here instead of stdout.
    #[arg(long)]
    response: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => {
            let mut config = ServiceConfig::from_env()?;
            if let Some(dir) = &args.out_dir {
                config.storage_dir = dir.clone();
            }
            cmd_compile(&args, &config)
        }
        Command::Health => {
            emit(&HealthReport::new(global_registry().available_tags()), None)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_compile(args: &CompileArgs, config: &ServiceConfig) -> anyhow::Result<ExitCode> {
    let body = read_request(&args.request)?;
    let request = GenerateRequest::from_json(&body).context("invalid generate request")?;
    let backend = config.backend()?;

    let batch = match compile(&request.elements, &request.metadata_or_default()) {
        Ok(batch) => batch,
        Err(CompileError::BatchEmpty { errors }) => {
            emit(&FailureResponse::new(&errors), args.response.as_deref())?;
            return Ok(ExitCode::from(EXIT_BATCH_EMPTY));
        }
        Err(e) => return Err(e.into()),
    };

    let filename = output_filename();
    let text = StepWriter::new(StepHeader::named(&filename)).write(&batch.document);
    let bytes = text.into_bytes();
    let file_url = storage::store(backend.as_ref(), &filename, &bytes)?;

    let response = GenerateResponse::new(file_url, EncodedFile::new(&filename, &bytes), &batch);
    emit(&response, args.response.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

/// `bim_<12 hex>.ifc`
fn output_filename() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("bim_{}.ifc", &id[..12])
}

fn read_request(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("read request from stdin")?;
        return Ok(body);
    }
    std::fs::read_to_string(path).with_context(|| format!("read request '{}'", path.display()))
}

fn emit<T: Serialize>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write response '{}'", path.display()))
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
