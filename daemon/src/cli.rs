//! Command-line surface of `ballotd`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ballotd", about = "Ledger-hosted election: configure, register, vote, tally")]
pub struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory for the ledger.
    #[arg(long, env = "BALLOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Membership provider attesting the caller.
    #[arg(long, env = "BALLOT_MSP_ID")]
    pub msp_id: Option<String>,

    /// Attested caller identity. Required to vote or inspect one's own ballot.
    #[arg(long, env = "BALLOT_CALLER_ID")]
    pub caller_id: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Attempts per mutating command when it loses a version race.
    #[arg(long, env = "BALLOT_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the election or replace its windows ("YYYY-MM-DD HH:MM:SS", UTC).
    Configure {
        candidacy_start: String,
        candidacy_end: String,
        voting_start: String,
        voting_end: String,
    },

    /// Register a candidate during the candidacy window.
    #[command(name = "register-candidate")]
    RegisterCandidate {
        id: String,
        name: String,
        email: String,
    },

    /// Cast the caller's ballot during the voting window.
    Cast { candidate_id: String },

    /// Show the election record and its current phase.
    Election,

    /// List registered candidates.
    Candidates,

    /// Ranked results (after voting closes).
    Results,

    /// Show the caller's own ballot.
    #[command(name = "my-ballot")]
    MyBallot,

    /// Every committed revision of the election record.
    Audit,

    /// The anonymous voter handle of the caller.
    Whoami,

    /// Current phase and time until the next boundary.
    Phase,
}
