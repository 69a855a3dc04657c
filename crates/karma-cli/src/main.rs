//! CLI host for the karma dice-fudging engine.

mod commands;
mod store_file;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "karma",
    about = "Karma — dice fudging and history-based karma for tabletop hosts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the JSON policy store
    #[arg(long, global = true, default_value = "karma.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage fudge directives
    Fudge {
        #[command(subcommand)]
        command: FudgeCommands,
    },

    /// Manage karma policies
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },

    /// Make an intercepted d20 roll
    Roll {
        /// Roll kind: skill, attack, ability-save, ability-test, death-save,
        /// raw, or a custom name
        kind: String,

        /// Flat modifier added to the kept die
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        modifier: i32,

        /// Acting user
        #[arg(short, long, default_value = "gm")]
        user: String,

        /// Treat the acting user as a gamemaster
        #[arg(long)]
        gm: bool,

        /// Actor the roll belongs to
        #[arg(short, long)]
        actor: Option<String>,

        /// Roll with advantage
        #[arg(long)]
        advantage: bool,

        /// Roll with disadvantage
        #[arg(long)]
        disadvantage: bool,

        /// Target value the total is checked against
        #[arg(short, long, allow_negative_numbers = true)]
        target: Option<i32>,

        /// RNG seed for deterministic rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show a user's natural-roll history
    History {
        /// User whose history to show
        user: String,

        /// Die size
        #[arg(long, default_value = "20")]
        die: u32,
    },

    /// Show or change store settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FudgeCommands {
    /// Add a directive for an owner (user:NAME or actor:NAME)
    Add {
        /// Directive owner, e.g. user:alice or actor:goblin-3
        owner: String,

        /// Roll kind the directive targets
        kind: String,

        /// Acceptance operator: <=, <, >, >=, =, != (or word forms like
        /// at-least)
        operator: String,

        /// Threshold the rolled total is compared against
        #[arg(allow_negative_numbers = true)]
        threshold: i32,

        /// Reason echoed in oversight messages
        #[arg(long, default_value = "")]
        how: String,

        /// Keep the directive active after it fires
        #[arg(long)]
        endless: bool,
    },

    /// List directives for one owner, or for all owners
    List {
        /// Directive owner; omit to list everyone
        owner: Option<String>,
    },

    /// Remove a directive by id prefix
    Remove {
        /// Directive owner
        owner: String,

        /// Id (or unambiguous prefix) of the directive to remove
        id: String,
    },
}

#[derive(Subcommand)]
enum PolicyCommands {
    /// Add a simple karma policy (streak of bad rolls pulls the die to a
    /// floor)
    Simple {
        /// Policy name, echoed in oversight messages
        name: String,

        /// Badness operator over past rolls: <=, <, >, >=
        operator: String,

        /// Threshold for the badness predicate
        #[arg(allow_negative_numbers = true)]
        threshold: i32,

        /// How many consecutive past rolls must all be bad
        #[arg(long)]
        history: usize,

        /// Face the next roll is pulled to
        #[arg(long, allow_negative_numbers = true)]
        floor: i32,

        /// Apply to every non-gamemaster player
        #[arg(long)]
        players: bool,

        /// Apply to every gamemaster
        #[arg(long)]
        gms: bool,

        /// Apply to a specific user (repeatable)
        #[arg(long = "user")]
        users: Vec<String>,
    },

    /// Add an average karma policy (sagging average nudges the die)
    Average {
        /// Policy name, echoed in oversight messages
        name: String,

        /// Badness operator over the rolling average: <=, <, >, >=
        operator: String,

        /// Threshold for the badness predicate
        #[arg(allow_negative_numbers = true)]
        threshold: i32,

        /// How many past rolls the average is taken over
        #[arg(long)]
        history: usize,

        /// How far one trigger pushes the roll
        #[arg(long, allow_negative_numbers = true)]
        nudge: i32,

        /// Stack the nudge on consecutive triggers (1x, 2x, 3x, ...)
        #[arg(long)]
        cumulative: bool,

        /// Apply to every non-gamemaster player
        #[arg(long)]
        players: bool,

        /// Apply to every gamemaster
        #[arg(long)]
        gms: bool,

        /// Apply to a specific user (repeatable)
        #[arg(long = "user")]
        users: Vec<String>,
    },

    /// List karma policies
    List,

    /// Enable or disable a policy by id prefix
    Toggle {
        /// Id (or unambiguous prefix) of the policy to toggle
        id: String,
    },

    /// Remove a policy by id prefix
    Remove {
        /// Id (or unambiguous prefix) of the policy to remove
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show store settings
    Show,

    /// Set the fudge retry budget
    MaxAttempts {
        /// Retry budget; zero or negative disables retries
        #[arg(allow_negative_numbers = true)]
        attempts: i32,
    },
}

fn main() {
    let cli = Cli::parse();
    let store = cli.store;

    let result = match cli.command {
        Commands::Fudge { command } => match command {
            FudgeCommands::Add {
                owner,
                kind,
                operator,
                threshold,
                how,
                endless,
            } => commands::fudge::add(&store, &owner, &kind, &operator, threshold, &how, endless),
            FudgeCommands::List { owner } => commands::fudge::list(&store, owner.as_deref()),
            FudgeCommands::Remove { owner, id } => commands::fudge::remove(&store, &owner, &id),
        },
        Commands::Policy { command } => match command {
            PolicyCommands::Simple {
                name,
                operator,
                threshold,
                history,
                floor,
                players,
                gms,
                users,
            } => commands::policy::add_simple(
                &store, &name, &operator, threshold, history, floor, players, gms, users,
            ),
            PolicyCommands::Average {
                name,
                operator,
                threshold,
                history,
                nudge,
                cumulative,
                players,
                gms,
                users,
            } => commands::policy::add_average(
                &store, &name, &operator, threshold, history, nudge, cumulative, players, gms,
                users,
            ),
            PolicyCommands::List => commands::policy::list(&store),
            PolicyCommands::Toggle { id } => commands::policy::toggle(&store, &id),
            PolicyCommands::Remove { id } => commands::policy::remove(&store, &id),
        },
        Commands::Roll {
            kind,
            modifier,
            user,
            gm,
            actor,
            advantage,
            disadvantage,
            target,
            seed,
        } => commands::roll::run(
            &store,
            &kind,
            modifier,
            &user,
            gm,
            actor.as_deref(),
            advantage,
            disadvantage,
            target,
            seed,
        ),
        Commands::History { user, die } => commands::history::run(&store, &user, die),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(&store),
            ConfigCommands::MaxAttempts { attempts } => {
                commands::config::set_max_attempts(&store, attempts)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
