use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::engine::SecondDegreeMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "League strength-of-schedule tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Create the database, load the season so far and write the first snapshots
    Setup {
        /// Read the schedule from a CSV file instead of the feed
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Fetch the current month and write today's snapshot
    Update {
        /// Recompute even if today's snapshot exists
        #[arg(short, long)]
        force: bool,
        /// Second-degree rule (all-games or wins-only)
        #[arg(long)]
        mode: Option<SecondDegreeMode>,
    },
    /// Print the latest standings snapshot
    Standings,
    /// Predict a matchup from the latest snapshot
    Predict {
        /// Home team (name or abbreviation)
        home: String,
        /// Visiting team (name or abbreviation)
        visitor: String,
    },
    /// Replay days and score next-day predictions
    Backtest {
        /// First day to replay (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day to replay, defaults to `from`
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Second-degree rule (all-games or wins-only)
        #[arg(long)]
        mode: Option<SecondDegreeMode>,
        /// Read the schedule from a CSV file
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Write the stored schedule to a CSV file
    Export {
        #[arg(short, long, default_value = "combined_schedule.csv")]
        output: PathBuf,
    },
    /// Delete the database and the feed cache
    Teardown,
    /// Start the JSON API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
