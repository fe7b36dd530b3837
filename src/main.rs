use anyhow::{Context, Result};
use clap::Parser;
use demora::cli::{Cli, DetectionMethod, OutputFormat};
use demora::{csv_output, json_output, table_output};
use demora::{build_groups, compute_duration, Dataset};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run one detection over a start/end column pair and print the report
fn run_detection(
    args: &Cli,
    dat: &Dataset,
    start_column: &str,
    end_column: &str,
) -> Result<()> {
    let series = compute_duration(start_column, end_column, dat)?;
    let record_ids = dat.record_ids(&args.id_column)?;

    let report = match args.method {
        DetectionMethod::Iqr => {
            demora::detect_outliers_iqr(&series, &record_ids, args.multiplier)?
        }
        DetectionMethod::Zscore => {
            demora::detect_outliers_zscore(&series, &record_ids, args.threshold)?
        }
    };

    match args.format {
        OutputFormat::Text => print!("{}", table_output::render_report(&report)),
        OutputFormat::Json => println!(
            "{}",
            json_output::JsonOutlierReport::from_report(&report, start_column, end_column)
                .to_json()?
        ),
        OutputFormat::Csv => print!("{}", csv_output::to_csv(&report)),
    }
    Ok(())
}

/// Print distribution summaries for each start/end pair in the group list
fn run_groups(dat: &Dataset, columns: &[String]) -> Result<()> {
    let (group, labels) = build_groups(columns, dat)?;
    for (series, label) in group.iter().zip(labels.iter()) {
        print!("{}", table_output::render_distribution_summary(label, series));
        println!();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.multiplier <= 0.0 {
        anyhow::bail!(
            "Invalid value for --multiplier: {} (must be positive)",
            args.multiplier
        );
    }
    if args.threshold <= 0.0 {
        anyhow::bail!(
            "Invalid value for --threshold: {} (must be positive)",
            args.threshold
        );
    }

    init_tracing(args.debug);

    let dat = Dataset::from_csv_path(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    tracing::debug!(
        rows = dat.len(),
        columns = dat.column_names().len(),
        "loaded dataset"
    );

    match (&args.start_column, &args.end_column, &args.groups) {
        (Some(start), Some(end), _) => run_detection(&args, &dat, start, end)?,
        (None, None, Some(columns)) => run_groups(&dat, columns)?,
        (Some(_), None, _) | (None, Some(_), _) => {
            anyhow::bail!("Both --start and --end are required for outlier detection.");
        }
        (None, None, None) => {
            anyhow::bail!(
                "Must specify --start/--end for outlier detection or --groups for distribution summaries."
            );
        }
    }

    Ok(())
}
