use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qwen_speaker_serve::config::validate_config;
use qwen_speaker_serve::{load_config, serve};
use qwen_speaker_speech::AudioOutput;
use qwen_speaker_speech::style::infer_instruct;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

mod client;

use client::SpeakPayload;

const DEFAULT_SPEAK_URL: &str = "http://127.0.0.1:8000/speak";

#[derive(Parser)]
#[command(name = "qwen-speaker")]
#[command(about = "qwen-speaker CLI - Serve and drive a local Qwen3-TTS speaker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the speaker over HTTP and play clips on the default output device
    Serve {
        /// Path to a speaker YAML config (built-in defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask a running speaker to say something
    Say(SayArgs),
}

#[derive(Args, Debug)]
struct SayArgs {
    /// Text to speak
    text: String,

    /// Speak endpoint of the server
    #[arg(long, default_value = DEFAULT_SPEAK_URL)]
    url: String,

    #[arg(long, default_value = "English")]
    language: String,

    /// Preset speaker; pass an empty string to use voice design instead
    #[arg(long, default_value = "Vivian")]
    voice: String,

    /// Style instruction; inferred from the text when omitted
    #[arg(long)]
    instruct: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 20.0)]
    timeout: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Serve { config, host, port } => serve_speaker(config, host, port).await,
        Commands::Say(args) => say(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("qwen-speaker error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve_speaker(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config =
        load_config(config_path.as_deref()).context("Failed to load speaker configuration")?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    validate_config(&config)?;

    let output = open_audio_output()?;
    serve(config, output).await?;

    Ok(())
}

#[cfg(feature = "playback")]
fn open_audio_output() -> Result<Arc<dyn AudioOutput>> {
    let output = qwen_speaker_speech::playback::RodioOutput::try_new()
        .context("Failed to open the default audio output device")?;
    Ok(Arc::new(output))
}

#[cfg(not(feature = "playback"))]
fn open_audio_output() -> Result<Arc<dyn AudioOutput>> {
    anyhow::bail!(
        "this binary was built without audio playback; rebuild with `--features playback` to serve"
    )
}

fn say(args: SayArgs) -> Result<()> {
    let timeout = request_timeout(args.timeout)?;
    let url = args.url.clone();
    let payload = build_payload(args);
    log::debug!("Speaking with instruct: {}", payload.instruct);

    let reply = client::post_speak(&url, &payload, timeout)?;

    println!("status={}", reply.status);
    if !reply.body.is_empty() {
        println!("{}", reply.body);
    }

    if reply.is_failure() {
        anyhow::bail!("speak request failed with status {}", reply.status);
    }

    Ok(())
}

fn build_payload(args: SayArgs) -> SpeakPayload {
    let instruct = args
        .instruct
        .filter(|instruct| !instruct.is_empty())
        .unwrap_or_else(|| infer_instruct(&args.text).to_string());

    SpeakPayload {
        text: args.text,
        language: args.language,
        voice: args.voice,
        instruct,
    }
}

fn request_timeout(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|timeout| !timeout.is_zero())
        .with_context(|| format!("--timeout must be a positive number of seconds, got {secs}"))
}
