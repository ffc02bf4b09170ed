// Exit codes, typed error mapping, and the subcommand flows.
//
// stdout carries rendered output only; diagnostics, warnings, and progress
// notes go to stderr so reports stay pipeable.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const SPEC: i32 = 5;
}

use std::fmt::Write as _;
use std::process::ExitCode;

use chrono::Utc;

use args::{
    parse_and_validate as parse_cli, Cli, Command, DistributeArgs, Format, MudarabahArgs,
    MusharakahArgs, SplitContract, ZakatArgs,
};
use mirath_algo::partnership::{split_mudarabah, split_musharakah, MusharakahInputs};
use mirath_algo::zakat::{assess, ZakatAssessment, ZakatAssets, NISAB_GOLD_GRAMS, NISAB_SILVER_GRAMS};
use mirath_core::errors::CoreError;
use mirath_core::money::{round_display, Decimal};
use mirath_io::IoError;
use mirath_pipeline::{
    engine_identifiers, load_input, run_case, validate_case, write_artifacts, EngineMeta,
    PipelineError, Severity,
};
use mirath_report::{build_model, render_json, render_text, ReportError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad input: case-file shape, domain violations, flag values.
    Validation(String),
    /// Filesystem failures (read/write/path).
    Io(String),
    /// Engine-side failures: hashing, document building, arithmetic.
    Spec(String),
    /// Report model or renderer failures.
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Spec(m) => write!(f, "engine: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mirath: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = match run(&cli) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("mirath: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn run(cli: &Cli) -> Result<(), MainError> {
    match &cli.command {
        Command::Distribute(a) => run_distribute(a),
        Command::Zakat(a) => run_zakat(a),
        Command::Split(s) => match &s.contract {
            SplitContract::Musharakah(a) => run_musharakah(a),
            SplitContract::Mudarabah(a) => run_mudarabah(a),
        },
    }
}

/// Map typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Spec(_) => SPEC,
        MainError::Render(_) => IO,
    }
}

/// Translate mirath_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(m),
        IoError::Path(m) => MainError::Io(m),
        IoError::Hash(m) => MainError::Spec(format!("hash: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Build(m) => MainError::Spec(m),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

fn map_core_err(e: CoreError) -> MainError {
    let msg = e.to_string();
    match e {
        CoreError::DomainOutOfRange(_) => MainError::Validation(msg),
        _ => MainError::Spec(msg),
    }
}

/// Engine identifiers, with a build-channel override for release packaging.
fn engine_meta() -> EngineMeta {
    let mut meta = engine_identifiers();
    if let Some(build) = option_env!("MIRATH_ENGINE_BUILD") {
        meta.build = build.to_string();
    }
    meta
}

fn run_distribute(a: &DistributeArgs) -> Result<(), MainError> {
    let input = load_input(&a.case).map_err(map_pipeline_err)?;

    // Findings go to stderr; warnings are informational unless --quiet.
    let report = validate_case(&input.case);
    for issue in &report.issues {
        if issue.severity == Severity::Error || !a.quiet {
            eprintln!("{}", issue.render());
        }
    }
    if report.is_fatal() {
        return Err(MainError::Validation(report.summary()));
    }
    if a.validate_only {
        if !a.quiet {
            eprintln!("validate-only: case OK");
        }
        return Ok(());
    }

    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let outs = run_case(&input, engine_meta(), &timestamp).map_err(map_pipeline_err)?;

    if let Some(dir) = &a.out {
        write_artifacts(&outs, dir).map_err(map_pipeline_err)?;
        if !a.quiet {
            eprintln!("artifacts written to {dir}");
        }
    }

    let model = build_model(&outs.result, &outs.run_record).map_err(map_report_err)?;
    match a.format {
        Format::Text => print!("{}", render_text(&model)),
        Format::Json => println!("{}", render_json(&model).map_err(map_report_err)?),
    }
    Ok(())
}

fn run_zakat(a: &ZakatArgs) -> Result<(), MainError> {
    let assets = ZakatAssets {
        cash: a.cash,
        gold_silver: a.gold_silver,
        investments: a.investments,
        liabilities: a.liabilities,
    };
    let assessment =
        assess(&assets, a.gold_price, a.silver_price, a.standard).map_err(map_core_err)?;

    match a.format {
        Format::Text => print!("{}", zakat_text(&assessment)),
        Format::Json => println!("{}", pretty(zakat_json(&assessment))?),
    }
    Ok(())
}

fn zakat_text(z: &ZakatAssessment) -> String {
    let payable = if z.eligible {
        fmt_amount(z.payable)
    } else {
        format!("{} (below nisab)", fmt_amount(z.payable))
    };
    let rows = [
        ("Standard:".to_string(), z.standard.to_string()),
        ("Total assets:".to_string(), fmt_amount(z.total_assets)),
        ("Net assets:".to_string(), fmt_amount(z.net_assets)),
        (format!("Nisab ({NISAB_GOLD_GRAMS}g gold):"), fmt_amount(z.nisab_gold)),
        (format!("Nisab ({NISAB_SILVER_GRAMS}g silver):"), fmt_amount(z.nisab_silver)),
        ("Threshold:".to_string(), fmt_amount(z.threshold)),
        ("Eligible:".to_string(), if z.eligible { "yes" } else { "no" }.to_string()),
        ("Payable (2.5%):".to_string(), payable),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Zakat Assessment");
    let _ = writeln!(out, "================");
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<22}{value}");
    }
    out
}

fn zakat_json(z: &ZakatAssessment) -> serde_json::Value {
    serde_json::json!({
        "standard": z.standard.as_token(),
        "total_assets": fmt_amount(z.total_assets),
        "net_assets": fmt_amount(z.net_assets),
        "nisab_gold": fmt_amount(z.nisab_gold),
        "nisab_silver": fmt_amount(z.nisab_silver),
        "threshold": fmt_amount(z.threshold),
        "eligible": z.eligible,
        "payable": fmt_amount(z.payable),
    })
}

fn run_musharakah(a: &MusharakahArgs) -> Result<(), MainError> {
    let inputs = MusharakahInputs {
        capital_a: a.capital_a,
        capital_b: a.capital_b,
        profit_ratio_a_pct: a.profit_share_a,
        amount: a.amount,
    };
    let split = split_musharakah(&inputs).map_err(map_core_err)?;
    let (share_a, share_b) = if a.loss {
        (split.loss_a, split.loss_b)
    } else {
        (split.profit_a, split.profit_b)
    };

    match a.format {
        Format::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Musharakah Split");
            let _ = writeln!(out, "================");
            let _ = writeln!(
                out,
                "Capital A: {} ({})   Capital B: {} ({})",
                fmt_amount(a.capital_a),
                fmt_pct(split.capital_ratio_a),
                fmt_amount(a.capital_b),
                fmt_pct(split.capital_ratio_b),
            );
            if a.loss {
                let _ = writeln!(out, "Loss of {} splits by capital:", fmt_amount(a.amount));
            } else {
                let _ = writeln!(
                    out,
                    "Profit of {} splits by agreement ({}/{}):",
                    fmt_amount(a.amount),
                    a.profit_share_a,
                    100 - a.profit_share_a
                );
            }
            let _ = writeln!(out, "  Partner A: {}", fmt_amount(share_a));
            let _ = writeln!(out, "  Partner B: {}", fmt_amount(share_b));
            print!("{out}");
        }
        Format::Json => {
            let v = serde_json::json!({
                "contract": "musharakah",
                "mode": if a.loss { "loss" } else { "profit" },
                "amount": fmt_amount(a.amount),
                "capital_ratio_a": fmt_ratio(split.capital_ratio_a),
                "capital_ratio_b": fmt_ratio(split.capital_ratio_b),
                "partner_a": fmt_amount(share_a),
                "partner_b": fmt_amount(share_b),
            });
            println!("{}", pretty(v)?);
        }
    }
    Ok(())
}

fn run_mudarabah(a: &MudarabahArgs) -> Result<(), MainError> {
    let split = split_mudarabah(a.investor_share, a.amount).map_err(map_core_err)?;
    let (investor, manager) = if a.loss {
        (split.loss_investor, split.loss_manager)
    } else {
        (split.profit_investor, split.profit_manager)
    };

    match a.format {
        Format::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Mudarabah Split");
            let _ = writeln!(out, "===============");
            let _ = writeln!(out, "Investor capital: {}", fmt_amount(a.capital));
            if a.loss {
                let _ = writeln!(out, "Loss of {} falls on capital:", fmt_amount(a.amount));
            } else {
                let _ = writeln!(
                    out,
                    "Profit of {} splits by agreement ({}/{}):",
                    fmt_amount(a.amount),
                    a.investor_share,
                    100 - a.investor_share
                );
            }
            let _ = writeln!(out, "  Investor (rabb al-mal): {}", fmt_amount(investor));
            let _ = writeln!(out, "  Manager (mudarib):      {}", fmt_amount(manager));
            print!("{out}");
        }
        Format::Json => {
            let v = serde_json::json!({
                "contract": "mudarabah",
                "mode": if a.loss { "loss" } else { "profit" },
                "capital": fmt_amount(a.capital),
                "amount": fmt_amount(a.amount),
                "investor": fmt_amount(investor),
                "manager": fmt_amount(manager),
            });
            println!("{}", pretty(v)?);
        }
    }
    Ok(())
}

fn pretty(v: serde_json::Value) -> Result<String, MainError> {
    serde_json::to_string_pretty(&v).map_err(|e| MainError::Render(format!("json: {e}")))
}

/// Two-decimal amount for terminal output.
fn fmt_amount(d: Decimal) -> String {
    format!("{:.2}", round_display(d, 2))
}

/// Capital ratio as a raw fraction, four places.
fn fmt_ratio(d: Decimal) -> String {
    format!("{:.4}", round_display(d, 4))
}

/// Capital ratio as a percentage, one place.
fn fmt_pct(r: Decimal) -> String {
    format!("{:.1}%", round_display(r.saturating_mul(Decimal::ONE_HUNDRED), 1))
}
