use std::time::Duration;

use breach_pipeline::{BreachEvent, BreachPipeline, PipelineConfig};
use clap::Parser;
use pwadvisor::{Advisor, Assessment, BreachStatus, Error, ZxcvbnOracle};
use pwned_range::{ClientConfig, RangeClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pwadvisor")]
#[command(
    about = "Password strength and breach advice for live input, one stdin line per keystroke"
)]
struct Args {
    /// Quiet period before a breach lookup, in milliseconds (default: BREACH_DEBOUNCE_MS or 500)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Range API base URL (default: PWNED_RANGE_ENDPOINT or the public API)
    #[arg(long)]
    endpoint: Option<String>,

    /// User-Agent sent with range requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Do not ask the range API to pad its responses
    #[arg(long)]
    no_padding: bool,

    /// Extra attempts for a failed range request
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Words an attacker would know about the user (e.g. parts of their email)
    #[arg(long = "user-input", value_name = "WORD")]
    user_inputs: Vec<String>,

    /// Print one JSON object per line instead of text
    #[arg(long)]
    json: bool,
}

fn setup_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

struct Output {
    json: bool,
}

impl Output {
    fn assessment(&self, assessment: &Assessment) -> Result<(), Error> {
        if self.json {
            let line = serde_json::json!({ "assessment": assessment });
            println!("{}", serde_json::to_string(&line)?);
            return Ok(());
        }

        let strength = &assessment.strength;
        println!(
            "strength: {} ({}/4), offline crack time: {}",
            strength.level.label(),
            strength.score,
            strength.crack_time
        );
        if let Some(warning) = &strength.warning {
            println!("  warning: {warning}");
        }
        for insight in &assessment.insights {
            println!("  insight: {insight}");
        }
        for suggestion in &strength.suggestions {
            println!("  suggestion: {suggestion}");
        }
        Ok(())
    }

    fn breach(&self, event: &BreachEvent) -> Result<(), Error> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("breach: {}", BreachStatus::from(event).message());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    setup_logger();

    let mut client_config = ClientConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        client_config.endpoint = endpoint;
    }
    if let Some(user_agent) = args.user_agent {
        client_config.user_agent = user_agent;
    }
    client_config.add_padding = !args.no_padding;
    client_config.max_retries = args.retries;
    let request_timeout = client_config.request_timeout;
    let client = RangeClient::new(client_config)?;

    let pipeline_config = match args.delay_ms {
        Some(ms) => PipelineConfig::with_delay(Duration::from_millis(ms)),
        None => PipelineConfig::from_env(),
    };

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let pipeline = BreachPipeline::new(client, events_tx, pipeline_config);
    let advisor = Advisor::new(ZxcvbnOracle::with_user_inputs(args.user_inputs), pipeline);
    let output = Output { json: args.json };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Some(assessment) = advisor.on_input(&line) {
                        output.assessment(&assessment)?;
                    }
                }
                None => break,
            },
            Some(event) = events.recv() => output.breach(&event)?,
        }
    }

    // Input is closed; give the last armed or in-flight check a chance to report.
    let settle =
        pipeline_config.delay + request_timeout * (args.retries + 1) + Duration::from_secs(1);
    while advisor.pipeline().is_busy() {
        match tokio::time::timeout(settle, events.recv()).await {
            Ok(Some(event)) => output.breach(&event)?,
            _ => break,
        }
    }
    while let Ok(event) = events.try_recv() {
        output.breach(&event)?;
    }

    Ok(())
}
