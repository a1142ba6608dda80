use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Find the one missing word of a BIP39 recovery phrase, given the address
/// of the first account it controls.
#[derive(Parser, Debug)]
#[command(name = "mnemonic-repair")]
#[command(version)]
pub struct Args {
    /// Address of the first account (0x followed by 40 hex digits)
    #[arg(short, long)]
    pub address: String,

    /// The known words, in order. Prompted for on stdin when omitted
    #[arg(short, long)]
    pub words: Option<String>,

    /// RON file with search settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Total words in the phrase, including the missing one
    #[arg(long)]
    pub word_count: Option<usize>,

    /// Derivation path of the account to match
    #[arg(long)]
    pub path: Option<String>,

    /// BIP39 passphrase, if the wallet used one
    #[arg(long)]
    pub passphrase: Option<String>,

    /// Where log records go
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log file used by `--log file` and `--log both`
    #[arg(long, default_value = "./mnemonic-repair.log")]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}
