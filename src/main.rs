mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use eventboard_core::config::BoardConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "eventboard")]
#[command(about = "Create, edit and browse your events without double-booking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        username: Option<String>,
    },
    /// Sign in (password is prompted)
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    Logout,
    /// Show who is signed in
    Whoami,
    /// Create an event; prompts for anything not given as a flag
    New {
        /// Keep this id instead of generating one
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Edit an event; fields not given keep their current value
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    Show {
        id: String,
    },
    /// List events, optionally filtered and sorted
    List {
        /// Match title or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Online or In-Person
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,

        /// Only events starting after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only events ending before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Sort by "title" or "start"
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Show every match on one page
        #[arg(long, conflicts_with_all = ["page", "page_size"])]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config,
}

/// Event form fields shared by `new` and `edit`.
#[derive(Args, Default)]
pub struct EventFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// General, Workshop, Meetup or Seminar
    #[arg(short, long)]
    pub category: Option<String>,

    /// Online or In-Person
    #[arg(short = 't', long = "type")]
    pub event_type: Option<String>,

    /// Venue for in-person events
    #[arg(short, long)]
    pub location: Option<String>,

    /// Meeting link for online events
    #[arg(long)]
    pub link: Option<String>,

    /// Start (e.g. "2025-03-20T15:00" or "friday 3pm")
    #[arg(short, long)]
    pub start: Option<String>,

    /// End (same formats as --start)
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Length instead of an end time (e.g. "90m", "2h")
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(short, long)]
    pub organizer: Option<String>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let ctx = Context::new(BoardConfig::load()?);

    match cli.command {
        Commands::Signup { email, username } => commands::auth::signup(&ctx, email, username),
        Commands::Login { email } => commands::auth::login(&ctx, email),
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::New { id, fields } => commands::new::run(&ctx, id, fields),
        Commands::Edit { id, fields } => commands::edit::run(&ctx, &id, fields),
        Commands::Delete { id, yes } => {
            ctx.require_login()?;
            commands::delete::run(&ctx, &id, yes)
        }
        Commands::Show { id } => {
            ctx.require_login()?;
            commands::show::run(&ctx, &id)
        }
        Commands::List {
            search,
            category,
            event_type,
            from,
            to,
            sort,
            desc,
            page,
            page_size,
            all,
            json,
        } => {
            ctx.require_login()?;
            let args = commands::list::ListArgs {
                search,
                category,
                event_type,
                from,
                to,
                sort,
                desc,
                page,
                page_size,
                all,
                json,
            };
            commands::list::run(&ctx, args)
        }
        Commands::Config => commands::config::run(&ctx),
    }
}

/// Log to stderr, filtered by `EVENTBOARD_LOG` (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_env("EVENTBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
