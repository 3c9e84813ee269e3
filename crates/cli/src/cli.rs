use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

/// Inspect when a 5-field cron expression fires.
///
/// Every subcommand prints JSON to stdout.
#[derive(Parser, Debug)]
#[command(name = "cronscope", version, about = "Inspect when a cron expression fires")]
pub struct CliArgs {
    /// Search horizon for occurrence enumeration, in years
    /// (overrides CRONSCOPE_HORIZON_YEARS)
    #[arg(long, global = true)]
    pub horizon_years: Option<u32>,

    /// Days replayed before the reference day by `slots`
    /// (overrides CRONSCOPE_LOOKBACK_DAYS)
    #[arg(long, global = true)]
    pub lookback_days: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check an expression structurally and semantically
    Validate {
        expression: String,
    },

    /// Days of a year on which the expression fires
    Days {
        expression: String,

        /// Target year (default: current UTC year)
        #[arg(long)]
        year: Option<i32>,

        /// Keep minute and hour as given instead of zeroing them
        #[arg(long)]
        raw: bool,
    },

    /// Minute-of-day presence over one representative day
    Slots {
        expression: String,

        /// UTC offset in hours, fractions allowed (e.g. -5, 5.5)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Reference day, YYYY-MM-DD (default: today UTC)
        #[arg(long)]
        day: Option<NaiveDate>,

        /// Print only the HH:MM labels that fire instead of all 1440 slots
        #[arg(long)]
        active_only: bool,
    },

    /// Firing times within a single day, no offset
    Times {
        expression: String,

        /// Day to list, YYYY-MM-DD (default: today UTC)
        #[arg(long)]
        day: Option<NaiveDate>,
    },

    /// Upcoming firing instants (UTC)
    Next {
        expression: String,

        /// How many instants to list
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Start after this instant, YYYY-MM-DDTHH:MM:SS (default: now UTC)
        #[arg(long)]
        after: Option<NaiveDateTime>,
    },

    /// Example IANA zone names for a UTC offset
    Zones {
        /// UTC offset in hours, fractions allowed
        #[arg(allow_negative_numbers = true)]
        offset: f64,
    },

    /// Plain-English description of the expression
    Describe {
        expression: String,
    },
}
