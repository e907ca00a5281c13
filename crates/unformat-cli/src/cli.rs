use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "unformat",
    about = "Match text against a format template and extract the values",
    version
)]
pub struct Cli {
    /// Format template, e.g. "{host}:{port:d}"
    pub template: String,

    /// Strings to match; read from stdin line by line when omitted
    pub inputs: Vec<String>,

    /// Report matched text without decoding it
    #[arg(long)]
    pub raw: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the compiled regular expression and exit
    #[arg(long)]
    pub show_pattern: bool,

    /// Log template compilation and matching to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
