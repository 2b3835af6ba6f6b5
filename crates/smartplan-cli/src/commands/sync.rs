//! Google Calendar sync commands.

use clap::Subcommand;
use smartplan_core::{GoogleCalendarSync, TaskManager};

#[derive(Subcommand)]
pub enum SyncAction {
    /// Authenticate with Google Calendar
    Auth {
        /// OAuth client ID
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth client secret
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Push scheduled tasks to the calendar
    Push,
    /// Remove stored credentials
    Logout,
    /// Check authentication status
    Status,
}

pub fn run(action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SyncAction::Auth {
            client_id,
            client_secret,
        } => {
            if let (Some(id), Some(secret)) = (&client_id, &client_secret) {
                GoogleCalendarSync::set_credentials(id, secret)?;
            }
            let sync = GoogleCalendarSync::new();
            sync.authenticate()?;
            println!("Google Calendar authenticated");
        }
        SyncAction::Push => {
            let sync = GoogleCalendarSync::new();
            let manager = TaskManager::open()?;
            let tasks: Vec<_> = manager.list_tasks(false).into_iter().cloned().collect();
            let synced = sync.push_tasks(&tasks);
            println!("Synced {synced} tasks to Google Calendar");
        }
        SyncAction::Logout => {
            let sync = GoogleCalendarSync::new();
            sync.disconnect()?;
            println!("Google Calendar disconnected");
        }
        SyncAction::Status => {
            let sync = GoogleCalendarSync::new();
            println!(
                "{}",
                if sync.is_authenticated() {
                    "authenticated"
                } else {
                    "not authenticated"
                }
            );
        }
    }
    Ok(())
}
