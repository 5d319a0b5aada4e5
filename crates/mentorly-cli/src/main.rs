use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mentorly")]
#[command(about = "Mentorly CLI - habit streaks, mentor analytics and recommendations", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/mentorly/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record directory, overriding `storage.data_dir`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Id of the user to act as
    #[arg(long, short)]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current habit streak in days
    Streak {
        /// Day to count back from (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Completion percentage for the Monday-Sunday week containing a date
    WeeklyRate {
        #[arg(long)]
        week_of: Option<NaiveDate>,
    },
    /// Rating, volume and feedback keywords for the user as mentor
    MentorStats,
    /// Per-mentee roll-up of the user's mentoring sessions
    Mentees,
    /// Rank mentors against the user's interests
    Recommend {
        /// Only mentors in this category
        #[arg(long)]
        category: Option<String>,
        /// Substring of name, bio, skills or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Flip a habit's completion for a day
    ToggleHabit {
        habit_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List notifications
    Notifications {
        /// Mark all of them read before listing
        #[arg(long)]
        mark_read: bool,
    },
    /// Everything the home screen shows
    Dashboard {
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = commands::context::Settings::resolve(cli.config, cli.data_dir)?;
    commands::context::init_tracing(&settings.config.logging.level);
    let store = commands::context::open_store(&settings, &cli.user).await?;

    match cli.command {
        Commands::Streak { today } => commands::report::streak(&store, today).await?,
        Commands::WeeklyRate { week_of } => commands::report::weekly_rate(&store, week_of).await?,
        Commands::MentorStats => commands::report::mentor_stats(&store).await?,
        Commands::Mentees => commands::report::mentees(&store).await?,
        Commands::Recommend { category, search } => {
            commands::report::recommend(&store, category, search).await?
        }
        Commands::ToggleHabit { habit_id, date } => {
            commands::habit::toggle(&store, &habit_id, date).await?
        }
        Commands::Notifications { mark_read } => {
            commands::habit::notifications(&store, mark_read).await?
        }
        Commands::Dashboard { today } => commands::report::dashboard(&store, today).await?,
    }

    Ok(())
}
