use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use leave_planner_core::compensation;
use leave_planner_core::day;
use leave_planner_core::export::{self, ExportFormat, ExportRequest};
use leave_planner_core::locale::{Locale, LocaleKind};
use leave_planner_core::report::ReportMode;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "leave-planner",
    about = "Plan leave periods and the Mondays/Fridays that compensate them"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Locale for names and dates: pt-br, en
    #[arg(long, default_value = "pt-br")]
    locale: LocaleKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every day of the absence
    Calendar {
        /// First day of the absence (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the absence (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Show the presential days lost and the compensation schedule
    Compensation {
        /// First day of the absence (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the absence (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Export a full report
    Report {
        /// Report mode: calendar, compensation
        #[arg(long, default_value = "compensation")]
        mode: ReportMode,

        /// First day of the absence (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the absence (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Export format: txt, json, csv, brief
        #[arg(short, long, default_value = "txt")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Write into this directory using a timestamped file name
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Time zone for the generation timestamp (IANA name)
        #[arg(long, default_value = "America/Sao_Paulo")]
        timezone: String,
    },
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        anyhow::bail!("end date {end} is before start date {start}");
    }
    Ok(())
}

fn now_in(timezone: &str) -> Result<NaiveDateTime> {
    let tz: Tz = timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid time zone {timezone}: {e}"))?;
    Ok(chrono::Utc::now().with_timezone(&tz).naive_local())
}

fn cmd_calendar(locale: &dyn Locale, start: NaiveDate, end: NaiveDate) -> Result<()> {
    validate_range(start, end)?;
    let result = day::generate_calendar(start, end, locale);

    println!(
        "{} → {} ({} day(s))",
        locale.long_date(start),
        locale.long_date(end),
        result.duration
    );
    for day in &result.days {
        println!("{} — {}", day.formatted_date, day.weekday_name);
    }
    Ok(())
}

fn cmd_compensation(locale: &dyn Locale, start: NaiveDate, end: NaiveDate) -> Result<()> {
    validate_range(start, end)?;
    let result = compensation::calculate_compensation(start, end, locale);
    info!(
        "{start} to {end}: {} presential day(s) lost",
        result.presential_days_lost
    );

    if result.compensation_days.is_empty() {
        println!("No presential days lost, nothing to compensate.");
        return Ok(());
    }

    for day in &result.compensation_days {
        println!(
            "week {:>3}: {} ({})",
            day.week_number, day.weekday_name, day.formatted_date
        );
    }
    println!(
        "{} day(s) to compensate over {} week(s), about {} month(s).",
        result.total_compensation_days,
        result.weeks(),
        result.estimated_months
    );
    Ok(())
}

/// Where a rendered report goes.
enum Destination<'a> {
    Stdout,
    File(&'a Path),
    Dir(&'a Path),
}

fn write_export(
    destination: Destination<'_>,
    content: &str,
    locale: &dyn Locale,
    generated_at: NaiveDateTime,
    format: ExportFormat,
) -> Result<Option<PathBuf>> {
    let path = match destination {
        Destination::Stdout => {
            print!("{content}");
            return Ok(None);
        }
        Destination::File(path) => path.to_path_buf(),
        Destination::Dir(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir.join(export::file_name(locale, generated_at, format))
        }
    };

    std::fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {} report to {}", format, path.display());
    Ok(Some(path))
}

fn cmd_report(
    request: &ExportRequest<'_>,
    format: ExportFormat,
    destination: Destination<'_>,
) -> Result<Option<PathBuf>> {
    validate_range(request.start, request.end)?;
    let content = export::render(format, request)
        .with_context(|| format!("failed to render {format} report"))?;
    debug!("rendered {} byte(s) as {}", content.len(), format.mime_type());
    write_export(
        destination,
        &content,
        request.locale,
        request.generated_at,
        format,
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let locale = cli.locale.locale();

    match &cli.command {
        Commands::Calendar { start, end } => {
            cmd_calendar(locale, *start, *end)?;
        }
        Commands::Compensation { start, end } => {
            cmd_compensation(locale, *start, *end)?;
        }
        Commands::Report {
            mode,
            start,
            end,
            format,
            output,
            out_dir,
            timezone,
        } => {
            let request = ExportRequest {
                mode: *mode,
                start: *start,
                end: *end,
                generated_at: now_in(timezone)?,
                locale,
            };
            let destination = match (output, out_dir) {
                (Some(path), _) => Destination::File(path),
                (None, Some(dir)) => Destination::Dir(dir),
                (None, None) => Destination::Stdout,
            };
            cmd_report(&request, *format, destination)?;
        }
    }

    Ok(())
}
