//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dashboard;
mod finance;
mod output;
mod people;
mod teaching;

pub use finance::InvoiceCommands;
pub use people::{StudentCommands, TeacherCommands, UserCommands};
pub use teaching::{GradeCommands, ScheduleCommands, SubjectCommands};

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use edumanage_client::ClientError;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard of the signed-in account
    Dashboard,
    /// Show who is signed in and what they may do
    Whoami,
    /// Student management
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },
    /// Teacher management
    Teacher {
        #[command(subcommand)]
        command: TeacherCommands,
    },
    /// User account management
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        command: SubjectCommands,
    },
    /// Timetable management
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Grade records
    Grade {
        #[command(subcommand)]
        command: GradeCommands,
    },
    /// Invoices
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
}

/// Handle a CLI command
///
/// Logs in with the configured credentials, then routes the command to the
/// appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.connect().await?;

    let result = match command {
        Commands::Dashboard => dashboard::show_dashboard(&client, config).await,
        Commands::Whoami => dashboard::whoami(&client, config).await,
        Commands::Student { command } => {
            people::handle_student_command(command, &client, config).await
        }
        Commands::Teacher { command } => {
            people::handle_teacher_command(command, &client, config).await
        }
        Commands::User { command } => people::handle_user_command(command, &client, config).await,
        Commands::Subject { command } => {
            teaching::handle_subject_command(command, &client, config).await
        }
        Commands::Schedule { command } => {
            teaching::handle_schedule_command(command, &client, config).await
        }
        Commands::Grade { command } => {
            teaching::handle_grade_command(command, &client, config).await
        }
        Commands::Invoice { command } => {
            finance::handle_invoice_command(command, &client, config).await
        }
    };

    // The server also expires the session on its own, so a failed logout
    // does not fail the command
    if let Err(e) = client.logout().await {
        eprintln!("{}", logout_warning(&e).dimmed());
    }

    result
}

fn logout_warning(error: &ClientError) -> String {
    format!("⚠ Could not end the session: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logout_warning_names_the_error() {
        let error = ClientError::api_error(500, r#"{"error": "Internal server error"}"#);
        let warning = logout_warning(&error);
        assert!(warning.starts_with("⚠ Could not end the session"));
        assert!(warning.contains("Internal server error"));
    }
}
