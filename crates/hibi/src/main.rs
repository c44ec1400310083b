//! Count the days you have lived and receive a celebratory message.
//!
//! Reads the API key from the `OPENAI_API_KEY` environment variable (a
//! `.env` file works too), falling back to `~/.config/hibi/secrets.json`.
//! Without a credential the tool still runs — it counts your days and shows
//! a fixed notice instead of a generated message.
//!
//! # Examples
//!
//! ```sh
//! # Interactive: keeps asking for dates until "quit" or Ctrl-D
//! hibi
//!
//! # One-shot
//! hibi --date 2000-03-15
//!
//! # Cheaper or newer model
//! hibi --model gpt-5-nano --date 2000-03-15
//! ```

mod app;
mod render;

use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use hibi_core::{calendar::today_jst, composer::MessageComposer};
use hibi_openai::OpenAiBackendBuilder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Count the days you have lived and receive a celebratory message.
#[derive(Parser)]
#[command(name = "hibi", version)]
struct Cli {
    /// Birth date for a one-shot run (YYYY-MM-DD); omit for interactive mode
    #[arg(long)]
    date: Option<String>,

    /// Model used for message generation
    #[arg(long, default_value = hibi_openai::DEFAULT_MODEL)]
    model: String,

    /// Alternative API base URL (proxies, compatible servers)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let composer = build_composer(&cli);

    println!("{}", render::header());

    if let Some(raw) = &cli.date {
        let output = app::run_submission(&composer, today_jst(), raw).await;
        println!("{output}");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("birth date> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        let output = app::run_submission(&composer, today_jst(), &line).await;
        println!("{output}");
    }

    println!("{}", render::footer());
    Ok(())
}

/// Resolve the credential and wire the backend once, at startup.  Missing or
/// broken credentials degrade to an unavailable composer — never a crash.
fn build_composer(cli: &Cli) -> MessageComposer {
    let builder = OpenAiBackendBuilder::new_from_env().with_model(cli.model.clone());
    let builder = match &cli.base_url {
        Some(base) => builder.with_base_url(base.clone()),
        None => builder,
    };

    if !builder.has_credential() {
        info!("no API credential resolved; message generation disabled");
        return MessageComposer::unavailable();
    }

    match builder.build() {
        Ok(backend) => MessageComposer::new(Arc::new(backend)),
        Err(err) => {
            warn!(error = %err, "backend initialisation failed; message generation disabled");
            MessageComposer::unavailable()
        }
    }
}
