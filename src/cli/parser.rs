use clap::{Parser, Subcommand};

/// Command-line interface definition for mealwarden
/// CLI application for hostel meal planning with SQLite
#[derive(Parser)]
#[command(
    name = "mealwarden",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hostel meal planning: daily confirmations, away periods, and kitchen headcounts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Pin the wall clock ("YYYY-MM-DD HH:MM[:SS]"); used by tests to make
    /// the breakfast cutoff deterministic
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, maintenance, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage the resident registry
    Resident {
        /// Register a resident id (opaque external identifier)
        #[arg(long = "add", value_name = "ID")]
        add: Option<String>,

        /// Display name (with --add)
        #[arg(long = "name", requires = "add")]
        name: Option<String>,

        /// Room label (with --add)
        #[arg(long = "room", requires = "add")]
        room: Option<String>,

        /// List registered residents
        #[arg(long = "list")]
        list: bool,

        /// Record an early return from away mode for a resident
        #[arg(long = "return", value_name = "ID")]
        ret: Option<String>,
    },

    /// Confirm a resident's meals for a date
    ///
    /// Omitted flags mean "not taking that meal"; the record is replaced as
    /// a whole, so re-running the same command is a no-op. After the daily
    /// cutoff (08:00 by default), breakfast flags for today keep their
    /// stored values and only supper changes are applied.
    Confirm {
        /// Resident id
        resident: String,

        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "breakfast", help = "Taking breakfast")]
        breakfast: bool,

        #[arg(long = "early", help = "Needs the early breakfast sitting (implies --breakfast)")]
        early: bool,

        #[arg(long = "supper", help = "Taking supper")]
        supper: bool,
    },

    /// Declare an away period; all covered days are forced to "no meals"
    Away {
        /// Resident id
        resident: String,

        /// First away day (YYYY-MM-DD)
        #[arg(required_unless_present = "list")]
        from: Option<String>,

        /// Last away day, inclusive (YYYY-MM-DD)
        #[arg(required_unless_present = "list")]
        to: Option<String>,

        /// List the resident's declared periods instead of adding one
        #[arg(long = "list", conflicts_with_all = ["from", "to"])]
        list: bool,
    },

    /// Show one day's record for a resident (created on first read)
    Day {
        /// Resident id
        resident: String,

        /// Date (YYYY-MM-DD); defaults to today
        date: Option<String>,
    },

    /// Show a resident's meal history, newest first
    History {
        /// Resident id
        resident: String,

        /// First day of the window (YYYY-MM-DD); defaults to 30 days back
        #[arg(long = "from")]
        from: Option<String>,

        /// Last day of the window (YYYY-MM-DD); defaults to today
        #[arg(long = "to")]
        to: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Kitchen headcounts and unconfirmed residents for a date
    Report {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long = "date")]
        date: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Trailing 7-day breakfast/supper series
    Trend {
        /// Last day of the window (YYYY-MM-DD); defaults to today
        #[arg(long = "end")]
        end: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Export one day's meal list as CSV for the kitchen
    Export {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long = "date")]
        date: Option<String>,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
