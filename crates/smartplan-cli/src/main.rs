use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "smartplan", version, about = "Smart personal task scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add(commands::tasks::AddArgs),
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Mark a task as completed
    Complete {
        /// Task ID
        task_id: String,
        /// Actual duration in minutes
        #[arg(long)]
        actual_duration: Option<u32>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        task_id: String,
    },
    /// Schedule tasks for a day
    Schedule {
        /// Date to schedule (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Work start hour
        #[arg(long)]
        start_hour: Option<u32>,
        /// Work end hour
        #[arg(long)]
        end_hour: Option<u32>,
    },
    /// Productivity insights
    Insights {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Energy curve queries
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Google Calendar synchronization
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Add(args) => commands::tasks::add(args),
        Commands::List { all } => commands::tasks::list(all),
        Commands::Complete {
            task_id,
            actual_duration,
        } => commands::tasks::complete(&task_id, actual_duration),
        Commands::Delete { task_id } => commands::tasks::delete(&task_id),
        Commands::Schedule {
            date,
            start_hour,
            end_hour,
        } => commands::schedule::run(date, start_hour, end_hour),
        Commands::Insights { json } => commands::insights::run(json),
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Sync { action } => commands::sync::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
