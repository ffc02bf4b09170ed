// Command-line surface: subcommands, flags, and post-parse checks.
//
// Parsing itself is clap-derive; `parse_and_validate()` layers on the rules
// clap cannot express:
// - no networked paths (reject any scheme:// like http/https/file)
// - `--standard silver` requires a real --silver-price (the default of 0
//   would make every holding "eligible")

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};

use mirath_algo::zakat::NisabStandard;
use mirath_core::money::Decimal;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser)]
#[command(
    name = "mirath",
    disable_help_subcommand = true,
    about = "Offline, deterministic Fara'id estate distribution"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Distribute a net estate among the heirs listed in a case file.
    Distribute(DistributeArgs),
    /// Assess zakat liability against the nisab threshold.
    Zakat(ZakatArgs),
    /// Project a partnership profit or loss split.
    Split(SplitArgs),
}

/// Stdout rendering for every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct DistributeArgs {
    /// Case file (JSON).
    #[arg(long)]
    pub case: Utf8PathBuf,

    /// Directory for result.json / run_record.json. Omit to skip artifacts.
    #[arg(long)]
    pub out: Option<Utf8PathBuf>,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,

    /// Validate the case file and exit without running the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress warnings and progress notes on stderr.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct ZakatArgs {
    /// Cash holdings.
    #[arg(long, value_parser = parse_decimal)]
    pub cash: Decimal,

    /// Gold and silver holdings, at market value.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub gold_silver: Decimal,

    /// Zakatable investments.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub investments: Decimal,

    /// Deductible liabilities.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub liabilities: Decimal,

    /// Gold price per gram.
    #[arg(long, value_parser = parse_decimal)]
    pub gold_price: Decimal,

    /// Silver price per gram (required with --standard silver).
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub silver_price: Decimal,

    /// Which metal anchors the nisab threshold.
    #[arg(long, default_value = "gold", value_parser = parse_standard)]
    pub standard: NisabStandard,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    #[command(subcommand)]
    pub contract: SplitContract,
}

#[derive(Debug, Subcommand)]
pub enum SplitContract {
    /// Joint venture: profit by agreed ratio, loss by capital contribution.
    Musharakah(MusharakahArgs),
    /// Investor/manager venture: monetary loss falls on the investor alone.
    Mudarabah(MudarabahArgs),
}

#[derive(Debug, Args)]
pub struct MusharakahArgs {
    /// Capital contributed by partner A.
    #[arg(long, value_parser = parse_decimal)]
    pub capital_a: Decimal,

    /// Capital contributed by partner B.
    #[arg(long, value_parser = parse_decimal)]
    pub capital_b: Decimal,

    /// Agreed profit percentage for partner A (0..=100).
    #[arg(long)]
    pub profit_share_a: u8,

    /// Amount to project.
    #[arg(long, value_parser = parse_decimal)]
    pub amount: Decimal,

    /// Treat the amount as a loss (split by capital, not by agreement).
    #[arg(long)]
    pub loss: bool,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct MudarabahArgs {
    /// Capital contributed by the investor (rabb al-mal).
    #[arg(long, value_parser = parse_decimal)]
    pub capital: Decimal,

    /// Agreed profit percentage for the investor (0..=100).
    #[arg(long)]
    pub investor_share: u8,

    /// Amount to project.
    #[arg(long, value_parser = parse_decimal)]
    pub amount: Decimal,

    /// Treat the amount as a loss (borne wholly by the investor).
    #[arg(long)]
    pub loss: bool,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

/// Errors surfaced by post-parse validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    Missing(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            CliError::Missing(s) => write!(f, "missing required flag: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs.
pub fn parse_and_validate() -> Result<Cli, CliError> {
    let cli = Cli::parse();
    validate(&cli)?;
    Ok(cli)
}

/// Cross-flag checks after clap has done the structural parse.
pub fn validate(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Distribute(a) => {
            ensure_local(&a.case)?;
            if let Some(out) = &a.out {
                ensure_local(out)?;
            }
        }
        Command::Zakat(a) => {
            if a.standard == NisabStandard::Silver && a.silver_price.is_zero() {
                return Err(CliError::Missing("--silver-price (with --standard silver)"));
            }
        }
        Command::Split(_) => {}
    }
    Ok(())
}

/// Reject any explicit URI scheme; the engine is offline by contract.
fn ensure_local(p: &Utf8Path) -> Result<(), CliError> {
    let lower = p.as_str().trim().to_ascii_lowercase();
    if lower.contains("://") || lower.starts_with("http:") || lower.starts_with("file:") {
        return Err(CliError::NonLocalPath(p.to_string()));
    }
    Ok(())
}

/// Decimal flag parser; clap surfaces the message verbatim.
pub fn parse_decimal(s: &str) -> Result<Decimal, String> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| "expected a decimal amount".to_string())
}

/// Nisab standard parser with a friendlier message than the token error.
pub fn parse_standard(s: &str) -> Result<NisabStandard, String> {
    s.trim()
        .parse::<NisabStandard>()
        .map_err(|_| "expected 'gold' or 'silver'".to_string())
}
