use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use agentprofile::source::http::DEFAULT_BASE_URL;
use agentprofile::{AgentProfile, Branding, FetchOptions, HttpSource, SummaryMetrics, UptimeDays};

#[derive(Parser)]
#[command(name = "agentprofile", about = "Agent profile metrics CLI")]
struct Cli {
    /// Base URL of the dashboard backend serving /api/activities, /api/skills and /api/tasks
    #[arg(long, env = "AGENTPROFILE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Branding JSON file (default: ~/.agentprofile/branding.json, else environment)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds to wait for all three sources (0 disables the limit)
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the agent's summary metrics
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show days since the configured birth date
    Uptime,
    /// Show the effective branding configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Configuration faults (e.g. an unparsable birth date) stop here, once.
    let branding = Branding::load(cli.config.as_deref())?;
    let source = HttpSource::new(&cli.base_url)?;
    let profile = AgentProfile::new(Arc::new(source), branding)?;

    let options = match cli.timeout {
        0 => FetchOptions::without_timeout(),
        secs => FetchOptions::with_timeout(Duration::from_secs(secs)),
    };

    match cli.command {
        Commands::Status { json } => {
            let stats = profile.summary(&options).await?;
            let uptime = profile.uptime(chrono::Utc::now());
            if json {
                print_status_json(&stats, uptime)?;
            } else {
                print_status(&profile, &stats, uptime);
            }
        }
        Commands::Uptime => match profile.uptime(chrono::Utc::now()) {
            Some(uptime) => println!("{uptime}"),
            None => println!("No birth date configured"),
        },
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(profile.branding())?);
        }
    }

    Ok(())
}

fn print_status(profile: &AgentProfile, stats: &SummaryMetrics, uptime: Option<UptimeDays>) {
    let branding = profile.branding();
    println!("{} {}", branding.agent_emoji, branding.agent_name);
    println!("  {}", branding.description());
    if let Some(location) = &branding.agent_location {
        println!("  Location:     {location}");
    }
    if let Some(uptime) = uptime {
        println!("  Uptime:       {uptime}");
    }
    println!("  Activities:   {}", stats.total_activities);
    if stats.is_sentinel_rate() {
        println!("  Success rate: {}% (no activity yet)", stats.success_rate);
    } else {
        println!("  Success rate: {}%", stats.success_rate);
    }
    println!("  Skills:       {}", stats.skills_count);
    println!("  Cron jobs:    {}", stats.cron_jobs);
}

fn print_status_json(stats: &SummaryMetrics, uptime: Option<UptimeDays>) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "stats": stats,
        "uptime": uptime,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
