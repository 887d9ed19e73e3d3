//! Command-line interface definition for taskmate
//!
//! This module defines the CLI structure using clap's derive API.

use crate::api::{PriorityFilter, SortDirection, StatusFilter, TaskPriority, TaskStatus};
use clap::{Parser, Subcommand};

/// taskmate - tasks, calendar and a scheduling assistant in your terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "taskmate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Override the backend base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the scheduling assistant
    Chat {
        /// Reply immediately instead of pausing to "think"
        #[arg(long)]
        no_delay: bool,
    },

    /// Ask the assistant a single question and print the reply
    Ask {
        /// Question, e.g. "How should I arrange my tasks in September 2025?"
        message: String,

        /// Reply immediately instead of pausing to "think"
        #[arg(long)]
        no_delay: bool,
    },

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password; prompted for when omitted
        #[arg(short, long, env = "TASKMATE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and store the session token
    Register {
        #[arg(short, long)]
        fullname: String,

        #[arg(short, long)]
        email: String,

        /// Password; prompted for when omitted
        #[arg(short, long, env = "TASKMATE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Task management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// List tasks with paging, sorting and filters
    List {
        /// Zero-based page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        size: Option<u32>,

        /// Field to sort by (e.g. dueDate, title, priority)
        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long, value_enum)]
        sort_dir: Option<SortDirection>,

        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        #[arg(long, value_enum)]
        priority: Option<PriorityFilter>,

        /// Only tasks due at or after this local date-time
        #[arg(long)]
        from: Option<String>,

        /// Only tasks due at or before this local date-time
        #[arg(long)]
        to: Option<String>,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one task
    Show { id: String },

    /// Create a task
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, value_enum, default_value = "todo")]
        status: TaskStatus,

        #[arg(long, value_enum, default_value = "medium")]
        priority: TaskPriority,

        /// Due date, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`
        #[arg(long)]
        due: String,
    },

    /// Update fields of an existing task
    Update {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        status: Option<TaskStatus>,

        #[arg(long, value_enum)]
        priority: Option<TaskPriority>,

        /// Due date, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Delete { id: String },

    /// Show a month calendar of due tasks
    Calendar {
        /// Month name, e.g. September (defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        /// Four digit year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Also list the tasks due on this day (`YYYY-MM-DD`)
        #[arg(long)]
        day: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            api_url: None,
            command: Commands::Whoami,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["taskmate", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { no_delay: false }));
    }

    #[test]
    fn test_cli_parse_ask() {
        let cli =
            Cli::try_parse_from(["taskmate", "ask", "Plan September 2025", "--no-delay"]).unwrap();
        if let Commands::Ask { message, no_delay } = cli.command {
            assert_eq!(message, "Plan September 2025");
            assert!(no_delay);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_list_filters() {
        let cli = Cli::try_parse_from([
            "taskmate",
            "tasks",
            "list",
            "--status",
            "in-progress",
            "--priority",
            "all",
            "--sort-dir",
            "desc",
            "--size",
            "6",
        ])
        .unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::List {
                    status,
                    priority,
                    sort_dir,
                    size,
                    ..
                },
        } = cli.command
        {
            assert_eq!(status, Some(StatusFilter::InProgress));
            assert_eq!(priority, Some(PriorityFilter::All));
            assert_eq!(sort_dir, Some(SortDirection::Desc));
            assert_eq!(size, Some(6));
        } else {
            panic!("Expected Tasks List command");
        }
    }

    #[test]
    fn test_cli_parse_create_defaults() {
        let cli = Cli::try_parse_from([
            "taskmate",
            "tasks",
            "create",
            "--title",
            "Write report",
            "--due",
            "2025-09-05",
        ])
        .unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::Create {
                    status, priority, ..
                },
        } = cli.command
        {
            assert_eq!(status, TaskStatus::Todo);
            assert_eq!(priority, TaskPriority::Medium);
        } else {
            panic!("Expected Tasks Create command");
        }
    }

    #[test]
    fn test_cli_global_api_url() {
        let cli =
            Cli::try_parse_from(["taskmate", "--api-url", "http://x/api", "logout"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert!(matches!(cli.command, Commands::Logout));
    }

    #[test]
    fn test_cli_login_requires_email() {
        assert!(Cli::try_parse_from(["taskmate", "login"]).is_err());
    }
}
