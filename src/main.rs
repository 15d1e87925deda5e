//! cv-screener: screen resumes against a job description and email feedback

use anyhow::{bail, Context};
use clap::Parser;
use cv_screener::cli::{Cli, Commands, ConfigAction, ScreenArgs};
use cv_screener::config::{Config, OutputFormat};
use cv_screener::input::inbox::InboxSource;
use cv_screener::input::source::FolderSource;
use cv_screener::input::InputManager;
use cv_screener::llm::{LlmClient, Scorer};
use cv_screener::output::formatter::formatter_for;
use cv_screener::output::mailer::{DryRunSender, FeedbackSender, SmtpMailer};
use cv_screener::processing::{ResumeNormalizer, ScreeningPipeline, ScreeningSummary};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config;
    let load = || Config::load(config_path.as_deref()).context("Failed to load configuration");

    match cli.command {
        Commands::Screen(args) => screen(load()?, args, false).await,
        Commands::Inbox(args) => screen(load()?, args, true).await,
        Commands::Normalize { file, format } => normalize(&load()?, &file, format).await,
        Commands::Config { action } => config_command(action, config_path.as_deref()),
    }
}

async fn screen(mut config: Config, args: ScreenArgs, from_inbox: bool) -> anyhow::Result<()> {
    if let Some(dir) = args.resumes {
        config.screening.resume_dir = dir;
    }
    if let Some(job) = args.job {
        config.screening.job_description = job;
    }

    // Nothing is fetched or scored until every credential is present.
    config.validate_for_screening()?;

    let job_description = InputManager::new()
        .load_job_description(&config.screening.job_description)
        .await
        .context("Failed to load job description")?;

    if from_inbox {
        println!("📥 Checking {} for new resumes...", config.mail.address);
        let saved = InboxSource::new(&config.mail, &config.screening.resume_dir)
            .fetch_resumes()
            .await
            .context("Failed to fetch resumes from inbox")?;
        println!("📥 Saved {} new resume(s)", saved.len());
    }

    let files = FolderSource::new(&config.screening.resume_dir)
        .with_extension_filter(config.screening.filter_extensions)
        .list()
        .context("Failed to list resume folder")?;

    if files.is_empty() {
        println!("📂 No resumes found in {}", config.screening.resume_dir.display());
        return Ok(());
    }
    println!(
        "📂 Screening {} file(s) from {}",
        files.len(),
        config.screening.resume_dir.display()
    );

    let scorer = LlmClient::new(&config.llm)?;
    info!("Scoring with model {}", scorer.model());

    let summary = if args.dry_run {
        println!("⚠️  Dry run: no email will be sent");
        let sender = DryRunSender::new(args.outbox);
        run_pipeline(&config, scorer, sender, job_description, &files).await?
    } else {
        let sender = SmtpMailer::new(&config.mail);
        run_pipeline(&config, scorer, sender, job_description, &files).await?
    };

    let format = args.format.unwrap_or(config.output.format);
    let formatter = formatter_for(format, config.output.color_output);
    println!("{}", formatter.format_summary(&summary)?);

    if summary.failed() > 0 {
        warn!(
            "{} resume(s) failed; see the log above for the files to retry",
            summary.failed()
        );
    }
    Ok(())
}

async fn run_pipeline<S: Scorer, F: FeedbackSender>(
    config: &Config,
    scorer: S,
    sender: F,
    job_description: String,
    files: &[PathBuf],
) -> cv_screener::Result<ScreeningSummary> {
    let pipeline = ScreeningPipeline::new(config, scorer, sender, job_description);

    let bar = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }

    let summary = pipeline.run(files, Some(&bar)).await;
    bar.finish_and_clear();
    summary
}

async fn normalize(config: &Config, file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    if !file.exists() {
        bail!("File does not exist: {}", file.display());
    }

    let normalizer = ResumeNormalizer::new(config.screening.keyword_matching);
    let resume = normalizer.normalize(file).await;

    let formatter = formatter_for(format, config.output.color_output);
    println!("{}", formatter.format_normalized(&file.display().to_string(), &resume)?);
    Ok(())
}

fn config_command(action: ConfigAction, explicit_path: Option<&Path>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load(explicit_path)?;
            let shown = toml::to_string_pretty(&config.redacted())
                .context("Failed to serialize configuration")?;
            println!("{}", shown);
        }
        ConfigAction::Init { force } => {
            let path = explicit_path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("✅ Wrote default configuration to {}", path.display());
            println!(
                "   Credentials go in .env: EMAIL, APP_PASSWORD, OPENAI_API_KEY, FEEDBACK_RECIPIENT"
            );
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
        }
    }
    Ok(())
}
