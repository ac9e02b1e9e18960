use crate::model::{RecurrenceType, TaskPriority, TaskView};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "taskora")]
#[command(
    author,
    version,
    about = "Personal task manager client with optimistic sync"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (defaults to the per-user config.yml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the task service (overrides config)
    #[arg(long, global = true, env = "TASKORA_API_URL")]
    pub api_url: Option<String>,

    /// Path to the session file (defaults to the per-user data dir)
    #[arg(long, global = true, env = "TASKORA_SESSION_FILE")]
    pub session_file: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long, env = "TASKORA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// List tasks
    #[command(visible_alias = "ls")]
    Tasks {
        /// Which task list to load
        #[arg(long, value_enum, default_value = "all")]
        view: TaskViewArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a task
    #[command(visible_alias = "new")]
    Add {
        /// Title of the task
        title: String,

        /// Due date: RFC 3339, "YYYY-MM-DD" or "YYYY-MM-DD HH:MM" (local time)
        #[arg(long)]
        due: String,

        /// Estimated effort in minutes
        #[arg(short, long, default_value_t = 30)]
        estimate: u32,

        /// Priority level
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: TaskPriorityArg,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle a task between pending and completed
    #[command(visible_alias = "done")]
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete {
        /// Task ID
        id: String,
    },

    /// Create a recurring task template
    Recurring {
        /// Title of the generated tasks
        title: String,

        /// Estimated effort in minutes
        #[arg(short, long, default_value_t = 30)]
        estimate: u32,

        /// How often a task is generated
        #[arg(short = 'r', long, value_enum, default_value = "daily")]
        every: RecurrenceArg,
    },

    /// List notifications
    Notifications {
        /// Only show unread notifications
        #[arg(long)]
        unread: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle the read flag of a notification
    Read {
        /// Notification ID
        id: String,
    },

    /// Mark every notification as read
    ReadAll,

    /// Snooze a notification
    Snooze {
        /// Notification ID
        id: String,

        /// Minutes to snooze for (defaults to sync.default_snooze_minutes)
        #[arg(short, long)]
        minutes: Option<u32>,
    },

    /// Poll notifications and print the unread count as it changes
    Watch {
        /// Poll interval in seconds (defaults to sync.poll_interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show or change reminder defaults
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate a code for linking a Telegram account
    TelegramLink,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current reminder defaults
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update reminder defaults; omitted values are kept
    Set {
        /// Hours before the due date to remind (repeatable)
        #[arg(long = "before-hours")]
        before_hours: Vec<u32>,

        /// Percent of the estimate elapsed at which to remind (repeatable)
        #[arg(long = "percent")]
        percent: Vec<u32>,

        /// Minimum gap between reminders in minutes
        #[arg(long)]
        min_gap: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TaskViewArg {
    All,
    Daily,
    Priority,
}

impl From<TaskViewArg> for TaskView {
    fn from(arg: TaskViewArg) -> Self {
        match arg {
            TaskViewArg::All => TaskView::All,
            TaskViewArg::Daily => TaskView::Daily,
            TaskViewArg::Priority => TaskView::Priority,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TaskPriorityArg {
    Low,
    Medium,
    High,
}

impl From<TaskPriorityArg> for TaskPriority {
    fn from(arg: TaskPriorityArg) -> Self {
        match arg {
            TaskPriorityArg::Low => TaskPriority::Low,
            TaskPriorityArg::Medium => TaskPriority::Medium,
            TaskPriorityArg::High => TaskPriority::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecurrenceArg {
    Daily,
    Monthly,
    Yearly,
}

impl From<RecurrenceArg> for RecurrenceType {
    fn from(arg: RecurrenceArg) -> Self {
        match arg {
            RecurrenceArg::Daily => RecurrenceType::Daily,
            RecurrenceArg::Monthly => RecurrenceType::Monthly,
            RecurrenceArg::Yearly => RecurrenceType::Yearly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_defaults() {
        let cli = Cli::try_parse_from(["taskora", "add", "Plan week", "--due", "2026-05-01"]).unwrap();
        match cli.command {
            Commands::Add {
                estimate, priority, ..
            } => {
                assert_eq!(estimate, 30);
                assert_eq!(TaskPriority::from(priority), TaskPriority::Medium);
            }
            _ => panic!("expected add"),
        }
    }
}
