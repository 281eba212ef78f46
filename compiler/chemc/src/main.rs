use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use chemc::{
    expand_file, sum_file, verify_file, BatchError, BatchOptions, BatchSummary, ErrorPolicy,
    ValidationReport,
};
use chemc_eval::{render_snippet, EvalConfig, Verbose};
use chemc_table::ElementTable;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "chemc",
    version,
    about = "Expand chemical formulas, sum their proton numbers and check their parentheses",
    long_about = "chemc reads a file of chemical formulas, one per line, written with element\n\
        symbols, digit multipliers and nested parenthesized groups such as K4(ON(SO3)2)2.\n\
        Every mode takes an element definitions file of whitespace-separated\n\
        `symbol atomic-number` pairs.\n\n\
        EXAMPLES:\n\
        \n  chemc expand elements.txt formulas.txt out.txt    Write flattened formulas\n\
        \n  chemc protons elements.txt formulas.txt out.txt   Write proton sums\n\
        \n  chemc verify elements.txt formulas.txt            Check parentheses\n\
        \n  chemc elements.txt -ext formulas.txt out.txt      Legacy form of expand"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the flattened form of every formula
    #[command(visible_alias = "ext")]
    Expand(RunArgs),

    /// Write the total proton number of every formula
    #[command(visible_alias = "pn")]
    Protons(RunArgs),

    /// Report formulas whose parentheses are not balanced
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Element definitions file
    #[arg(value_name = "TABLE")]
    table: PathBuf,

    /// Formula file, one formula per line
    #[arg(value_name = "FORMULAS")]
    formulas: PathBuf,

    /// File to write one result per formula to
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Skip formulas that fail instead of stopping at the first one
    #[arg(long)]
    keep_going: bool,

    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(Debug, Args)]
struct LimitArgs {
    /// Reject formulas longer than N characters
    #[arg(long = "max-line-length", value_name = "N")]
    max_line_length: Option<usize>,

    /// Reject symbols and multipliers longer than N characters
    #[arg(long = "max-token-length", value_name = "N")]
    max_token_length: Option<usize>,

    /// Reject groups nested deeper than N [default: 256]
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Reject formulas expanding to more than N atoms [default: 10000000]
    #[arg(long = "max-atoms", value_name = "N")]
    max_atoms: Option<u64>,
}

impl LimitArgs {
    fn eval_config(&self) -> EvalConfig {
        let defaults = EvalConfig::default();
        EvalConfig {
            max_line_len: self.max_line_length,
            max_token_len: self.max_token_length,
            max_depth: self.max_depth.or(defaults.max_depth),
            max_atoms: self.max_atoms.or(defaults.max_atoms),
        }
    }
}

#[derive(Debug, Args)]
struct VerifyArgs {
    /// Element definitions file
    #[arg(value_name = "TABLE")]
    table: PathBuf,

    /// Formula file, one formula per line
    #[arg(value_name = "FORMULAS")]
    formulas: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Expand,
    Protons,
}

/// Rewrite `chemc TABLE -ext|-pn|-v FORMULAS [OUTPUT]` into subcommand form.
fn normalize_cli_args(args: Vec<OsString>) -> Vec<OsString> {
    if args.len() < 3 {
        return args;
    }

    let is_known_subcommand = matches!(
        args[1].to_string_lossy().as_ref(),
        "expand" | "ext" | "protons" | "pn" | "verify" | "help"
    );
    if is_known_subcommand || args[1].to_string_lossy().starts_with('-') {
        return args;
    }

    let subcmd = match args[2].to_string_lossy().as_ref() {
        "-ext" => "expand",
        "-pn" => "protons",
        "-v" => "verify",
        _ => return args,
    };

    let mut out: Vec<OsString> = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    out.extend(iter.next());
    let table = iter.next();
    iter.next();
    out.push(OsString::from(subcmd));
    out.extend(table);
    out.extend(iter);
    out
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn report_error(err: &BatchError) -> i32 {
    match err {
        BatchError::Formula {
            line_number,
            formula,
            source,
        } => eprint!("{}", render_snippet(source, formula, *line_number)),
        other => eprintln!("error: {other}"),
    }
    err.exit_code()
}

fn load_table(path: &Path) -> Result<ElementTable, i32> {
    ElementTable::load(path).map_err(|err| report_error(&BatchError::from(err)))
}

fn report_summary(summary: &BatchSummary) -> i32 {
    for failure in &summary.failures {
        eprint!(
            "{}",
            render_snippet(&failure.error, &failure.formula, failure.line_number)
        );
    }
    if summary.is_clean() {
        0
    } else {
        eprintln!(
            "{} of {} formulas failed",
            summary.failures.len(),
            summary.processed
        );
        1
    }
}

fn run_batch(args: &RunArgs, mode: Mode) -> i32 {
    let table = match load_table(&args.table) {
        Ok(table) => table,
        Err(code) => return code,
    };
    let options = BatchOptions {
        eval: args.limits.eval_config(),
        on_error: if args.keep_going {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        },
    };

    let (result, progress) = match mode {
        Mode::Expand => (
            expand_file(&table, &args.formulas, &args.output, &options),
            "Compute extended version of formulas in",
        ),
        Mode::Protons => (
            sum_file(&table, &args.formulas, &args.output, &options),
            "Compute total proton number of formulas in",
        ),
    };

    match result {
        Ok(summary) => {
            println!("{progress} {}", args.formulas.display());
            println!("Writing formulas to {}", args.output.display());
            report_summary(&summary)
        }
        Err(err) => report_error(&err),
    }
}

fn run_verify(args: &VerifyArgs) -> i32 {
    // The table is not needed to check parentheses, but a broken one is still reported.
    if let Err(code) = load_table(&args.table) {
        return code;
    }

    let result = if args.json {
        let mut report = ValidationReport::new(args.formulas.display().to_string());
        verify_file(&args.formulas, &mut report).and_then(|balanced| {
            let json = report
                .to_json()
                .map_err(|err| BatchError::Write(io::Error::other(err)))?;
            println!("{json}");
            Ok(balanced)
        })
    } else {
        println!("Verify balanced parentheses in {}", args.formulas.display());
        let mut reporter = Verbose::new(io::stdout().lock());
        verify_file(&args.formulas, &mut reporter)
    };

    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => report_error(&err),
    }
}

fn run_cli(args: Vec<OsString>) -> i32 {
    let cli = match Cli::try_parse_from(normalize_cli_args(args)) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };
    init_logging(cli.verbose);

    match cli.command {
        Command::Expand(args) => run_batch(&args, Mode::Expand),
        Command::Protons(args) => run_batch(&args, Mode::Protons),
        Command::Verify(args) => run_verify(&args),
    }
}

fn main() {
    std::process::exit(run_cli(std::env::args_os().collect()));
}
