use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a byte count with binary units (B, KB, MB, GB).
    Size(SizeArgs),
    /// Describe how long ago a timestamp was.
    Ago(AgoArgs),
    /// Join a file name onto a directory, keeping the directory's separator style.
    Join(JoinArgs),
    /// Report whether file names are text or zipped sends.
    Classify(ClassifyArgs),
    /// List the non-empty files in a transfer location.
    List(LocationArgs),
    /// Print the path of the most recently modified file in a transfer location.
    ///
    /// The path is joined with "/" only if DIR already contains one, and with "\"
    /// otherwise. Pass a DIR containing "/" (e.g. "./downloads") on Unix.
    Latest(LocationArgs),
    /// Copy a file into a transfer location.
    Send(SendArgs),
    /// Copy the most recently modified file in a transfer location into TARGET.
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Byte count; prints "0 B" when omitted.
    #[arg(value_name = "BYTES", allow_negative_numbers = true)]
    pub bytes: Option<f64>,
}

#[derive(Args, Debug)]
pub struct AgoArgs {
    /// RFC 3339, RFC 2822, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD".
    #[arg(value_name = "TIMESTAMP")]
    pub timestamp: String,
}

#[derive(Args, Debug)]
pub struct JoinArgs {
    #[arg(value_name = "PARENT")]
    pub parent: String,

    #[arg(value_name = "FILE")]
    pub file: String,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// One or more file names to classify.
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Directory standing in for the transfer location.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// File to send.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory standing in for the transfer location.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Directory standing in for the transfer location.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Download directory; created if missing. Joined with the file name the same way as `latest`.
    #[arg(value_name = "TARGET")]
    pub target: String,
}
