//! spamsieve command line entry point.
//!
//! Usage:
//!   spamsieve [OPTIONS] <SPAMDIR> <NONSPAMDIR> <MAILDIR>
//!
//! Log verbosity is taken from `RUST_LOG` (default `spamsieve=warn`); logs go
//! to stderr so stdout carries only the report.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use spamsieve::classifier::{self, ClassificationReport, ClassifierConfig, WordOrder};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "spamsieve", version)]
#[command(about = "Bag-of-words spam filter over three mail directories")]
struct Cli {
    /// Directory of known spam mail
    spam_directory: PathBuf,

    /// Directory of known non-spam mail
    non_spam_directory: PathBuf,

    /// Directory of mail to classify
    mail_directory: PathBuf,

    /// Treat words differing only in ASCII case as different words
    #[arg(long)]
    case_sensitive: bool,

    /// Print the refined spam words after the counts
    #[arg(long)]
    print_words: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> ClassifierConfig {
        let word_order = if self.case_sensitive {
            WordOrder::CaseSensitive
        } else {
            WordOrder::CaseInsensitive
        };
        ClassifierConfig::new(
            &self.spam_directory,
            &self.non_spam_directory,
            &self.mail_directory,
        )
        .with_word_order(word_order)
    }
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ClassificationReport,
    elapsed_seconds: f64,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            error.exit()
        }
        Err(error) => {
            eprint!("{}", error.render());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spamsieve=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let start = Instant::now();
    let report = classifier::run(&cli.config()).context("classification failed")?;
    let elapsed = start.elapsed();

    let mut out = io::stdout().lock();
    if cli.json {
        let json = JsonReport {
            report: &report,
            elapsed_seconds: elapsed.as_secs_f64(),
        };
        serde_json::to_writer_pretty(&mut out, &json).context("failed to write JSON report")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Words contained in all spam mails {}", report.spam_word_count)?;
    writeln!(out, "Unique words in non spam mails {}", report.non_spam_word_count)?;
    writeln!(
        out,
        "Words contained in all spam mails and in none of the nonspam mails {}",
        report.refined_word_count
    )?;
    if cli.print_words {
        writeln!(out, "Refined spam words: {}", report.refined_words.join(" "))?;
    }
    for mail in &report.mails {
        if mail.is_spam {
            writeln!(
                out,
                "{}: Mail is spam! Mail contained {} spamwords",
                mail.path.display(),
                mail.spam_word_count()
            )?;
        } else {
            writeln!(out, "{}: Mail is not spam", mail.path.display())?;
        }
    }
    writeln!(out, "Elapsed time: {:.9} seconds", elapsed.as_secs_f64())?;
    Ok(())
}
