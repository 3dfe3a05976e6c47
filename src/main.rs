//! hexbrain - Local second-brain store
//!
//! Command-line front end for reminders, notes, tutorial flags, fuzzy
//! matching and per-user export.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hexbrain::{config::HexConfig, matching, timeparse::local_now, Brain};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hexbrain")]
#[command(author = "HEX Team")]
#[command(version)]
#[command(about = "Local second-brain store: reminders, notes and preferences")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "HEXBRAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, env = "HEXBRAIN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage reminders
    Remind {
        #[command(subcommand)]
        action: RemindAction,
    },

    /// Manage quick notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Tutorial flag
    Tutorial {
        #[command(subcommand)]
        action: TutorialAction,
    },

    /// Compare two strings with the fuzzy matcher
    Match {
        a: String,
        b: String,

        /// Override the configured threshold
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Export a user's data into a timestamped folder
    Export {
        #[arg(short, long)]
        user: String,

        /// Export base directory (defaults to the configured one)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[derive(Subcommand)]
enum RemindAction {
    /// Create a reminder ("5pm", "17:30", "in 2 hours")
    Add {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        time: String,
        reason: String,
    },
    /// Show reminders that are due now
    Pending {
        #[arg(short, long)]
        user: String,
    },
    /// List all reminders
    List {
        #[arg(short, long)]
        user: String,
    },
    /// Mark a reminder as done
    Done {
        #[arg(short, long)]
        user: String,
        id: String,
    },
    /// Poll for due reminders until Ctrl+C
    Watch {
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    Add {
        #[arg(short, long)]
        user: String,
        title: String,
        content: String,
    },
    List {
        #[arg(short, long)]
        user: String,
    },
    Edit {
        #[arg(short, long)]
        user: String,
        id: String,
        title: String,
        content: String,
    },
    Rm {
        #[arg(short, long)]
        user: String,
        id: String,
    },
}

#[derive(Subcommand)]
enum TutorialAction {
    Status {
        #[arg(short, long)]
        user: String,
    },
    Complete {
        #[arg(short, long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hexbrain={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        HexConfig::from_file(config_path)?
    } else {
        HexConfig::default()
    };
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    match cli.command {
        Commands::Remind { action } => run_remind(&config, action).await?,
        Commands::Note { action } => run_note(&config, action)?,
        Commands::Tutorial { action } => run_tutorial(&config, action)?,
        Commands::Match { a, b, threshold } => {
            let threshold = threshold.unwrap_or(config.matching.threshold);
            let score = matching::similarity(&a, &b);
            println!(
                "similarity {:.3} ({} at threshold {})",
                score,
                if score >= threshold { "match" } else { "no match" },
                threshold
            );
        }
        Commands::Export { user, to } => {
            let brain = Brain::open(&config.storage.data_dir)?;
            let base = to.unwrap_or_else(|| config.storage.export_dir.clone());
            match brain.export(&user, &base, local_now()) {
                Ok(folder) => println!("✓ Exported to {}", folder.display()),
                Err(e) => {
                    eprintln!("✗ Export failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Config { default } => {
            let shown = if default { HexConfig::default() } else { config };
            println!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

async fn run_remind(config: &HexConfig, action: RemindAction) -> Result<()> {
    let brain = Brain::open(&config.storage.data_dir)?;
    let tasks = brain.tasks();

    match action {
        RemindAction::Add { user, time, reason } => {
            match tasks.create_task(&user, &reason, &time, local_now()) {
                Ok(task) => println!("⏰ {} (id {})", task.confirmation(), task.id),
                Err(e) => {
                    eprintln!("✗ {}", e.record_notice());
                    std::process::exit(1);
                }
            }
        }
        RemindAction::Pending { user } => {
            let pending = tasks.pending_tasks(&user, local_now());
            if pending.is_empty() {
                println!("No reminders due.");
            }
            for task in pending {
                println!("🔔 {}  {}  ({})", task.id, task.reason, task.time);
            }
        }
        RemindAction::List { user } => {
            for task in tasks.list_tasks(&user) {
                let state = if task.completed {
                    "done"
                } else if task.notified {
                    "notified"
                } else {
                    "scheduled"
                };
                println!("{}  [{}]  {}  {}", task.id, state, task.time, task.reason);
            }
        }
        RemindAction::Done { user, id } => {
            tasks.mark_completed(&user, &id)?;
            println!("✓ Marked {} as done", id);
        }
        RemindAction::Watch { user } => {
            watch_reminders(&brain, &user, config.reminders.poll_interval_secs).await?;
        }
    }

    Ok(())
}

/// Surface due reminders on every tick, marking each one notified
async fn watch_reminders(brain: &Brain, user: &str, poll_secs: u64) -> Result<()> {
    tracing::info!("Watching reminders for {} every {}s. Press Ctrl+C to stop.", user, poll_secs);
    let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for task in brain.tasks().pending_tasks(user, local_now()) {
                    println!("🔔 Reminder: {}", task.reason);
                    if let Err(e) = brain.tasks().mark_notified(user, &task.id) {
                        tracing::warn!("{}", e.record_notice());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    Ok(())
}

fn run_note(config: &HexConfig, action: NoteAction) -> Result<()> {
    let brain = Brain::open(&config.storage.data_dir)?;
    let notes = brain.notes();

    match action {
        NoteAction::Add { user, title, content } => {
            let note = notes.add_note(&user, &title, &content, local_now())?;
            println!("✓ Saved note {}", note.id);
        }
        NoteAction::List { user } => {
            for note in notes.list_notes(&user) {
                println!("{}  {}  ({})\n    {}", note.id, note.title, note.date_display, note.content);
            }
        }
        NoteAction::Edit {
            user,
            id,
            title,
            content,
        } => match notes.update_note(&user, &id, &title, &content, local_now())? {
            Some(note) => println!("✓ Updated note {}", note.id),
            None => println!("No note with id {}", id),
        },
        NoteAction::Rm { user, id } => {
            let removed = notes.delete_note(&user, &id)?;
            println!("✓ Removed {} note(s)", removed);
        }
    }

    Ok(())
}

fn run_tutorial(config: &HexConfig, action: TutorialAction) -> Result<()> {
    let brain = Brain::open(&config.storage.data_dir)?;

    match action {
        TutorialAction::Status { user } => {
            if brain.prefs().is_first_time(&user) {
                println!("{} has not seen the tutorial yet", user);
            } else {
                println!("{} has completed the tutorial", user);
            }
        }
        TutorialAction::Complete { user } => {
            brain.prefs().mark_tutorial_complete(&user)?;
            println!("✓ Tutorial marked complete for {}", user);
        }
    }

    Ok(())
}
