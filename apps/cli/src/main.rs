use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use eduai_core::{
    ContentGenerator, ModelSettings, Pipeline, Provider, QuizSession, RoadmapProgress,
    YoutubeClient, YoutubeSettings, format_summary_readable, load_dotenv, narration_text,
    watch_url,
};

mod quiz;
mod roadmap;
mod timer;

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Gemini,
    Grok,
    Openai,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
        }
    }
}

#[derive(Parser)]
#[command(name = "eduai")]
#[command(
    about = "Turn YouTube videos into AI-generated summaries and quizzes, and playlists into roadmaps"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a ten-point study summary of a video
    Summary {
        /// Video URL
        url: String,

        /// AI provider for content generation
        #[arg(short, long, default_value = "gemini")]
        provider: CliProvider,

        /// Print the validated summary as JSON
        #[arg(long)]
        json: bool,

        /// Print the narration script instead of the formatted summary
        #[arg(long, conflicts_with = "json")]
        narration: bool,
    },

    /// Take a ten-question multiple-choice quiz about a video
    Quiz {
        /// Video URL
        url: String,

        /// AI provider for content generation
        #[arg(short, long, default_value = "gemini")]
        provider: CliProvider,

        /// Print the validated questions as JSON instead of starting the quiz
        #[arg(long)]
        json: bool,
    },

    /// Build a progress-tracked roadmap from a playlist
    Roadmap {
        /// Playlist URL (must contain a `list=` parameter)
        url: String,

        /// Print the playlist as JSON instead of tracking progress
        #[arg(long)]
        json: bool,
    },

    /// Run a focus countdown timer
    Timer {
        /// Countdown length in minutes (1-120)
        #[arg(short, long, default_value_t = eduai_core::timer::DEFAULT_MINUTES)]
        minutes: u32,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_banner(subtitle: &str) {
    println!(
        "\n{}  {}\n",
        style("eduai").cyan().bold(),
        style(subtitle).dim()
    );
}

fn generation_pipeline(provider: Provider) -> Result<Pipeline> {
    let youtube = YoutubeClient::new(YoutubeSettings::from_env()?);
    let generator = ContentGenerator::new(ModelSettings::from_env(provider)?);
    Ok(Pipeline::new(youtube, generator))
}

async fn run_summary(url: &str, provider: Provider, json: bool, narration: bool) -> Result<()> {
    let pipeline = generation_pipeline(provider)?;

    print_banner("Video Summary");
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Generating summary with {}...", provider.name()));
    let outcome = match pipeline.summary_for_url(url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Summary generated: {} {}",
        style("✓").green().bold(),
        style(&outcome.video.title).dim(),
        style(format!("[{}]", format_elapsed(step_start.elapsed()))).dim()
    ));

    println!("{}", style("─".repeat(60)).dim());

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else if narration {
        println!("{}", narration_text(&outcome.summary));
    } else {
        println!(
            "{} {}  {} {}\n",
            style("Channel:").dim(),
            outcome.video.channel_title,
            style("Video:").dim(),
            style(watch_url(&outcome.video_id)).cyan()
        );
        println!("{}", format_summary_readable(&outcome.summary));
    }

    Ok(())
}

async fn run_quiz(url: &str, provider: Provider, json: bool) -> Result<()> {
    let pipeline = generation_pipeline(provider)?;

    print_banner("Interactive Quiz");
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Generating quiz with {}...", provider.name()));
    let outcome = match pipeline.quiz_for_url(url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Quiz generated: {} questions {}",
        style("✓").green().bold(),
        outcome.questions.len(),
        style(format!("[{}]", format_elapsed(step_start.elapsed()))).dim()
    ));

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.questions)?);
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    let mut session = QuizSession::new(outcome.questions);
    quiz::play(&mut session)?;
    quiz::print_results(&mut session);

    Ok(())
}

async fn run_roadmap(url: &str, json: bool) -> Result<()> {
    let pipeline = Pipeline::youtube_only(YoutubeClient::new(YoutubeSettings::from_env()?));

    print_banner("Learning Roadmap");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading playlist...");
    let videos = match pipeline.roadmap_for_url(url).await {
        Ok(videos) => videos,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Playlist loaded: {} videos {}",
        style("✓").green().bold(),
        videos.len(),
        style(format!("[{}]", format_elapsed(step_start.elapsed()))).dim()
    ));

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    let mut roadmap = RoadmapProgress::new(videos);
    roadmap::track(&mut roadmap)
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Summary {
            url,
            provider,
            json,
            narration,
        } => run_summary(&url, provider.into(), json, narration).await,
        Command::Quiz {
            url,
            provider,
            json,
        } => run_quiz(&url, provider.into(), json).await,
        Command::Roadmap { url, json } => run_roadmap(&url, json).await,
        Command::Timer { minutes } => timer::run(minutes).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    load_dotenv();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
