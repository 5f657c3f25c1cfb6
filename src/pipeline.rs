//! The cleaning pipeline: load (or generate) the raw table, repair it stage
//! by stage, then publish the cleaned CSV and the summary report. Outputs
//! are only written once every stage has succeeded.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::Cli, dates, dedup, generate, io_utils, repair, report::CleaningStats, table::Table,
};

pub fn execute(args: &Cli) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);

    if !args.input.exists() {
        info!(
            "'{}' not found, generating a synthetic sample dataset",
            args.input.display()
        );
        generate::write_sample(&args.input, args.rows, args.seed, delimiter)
            .with_context(|| format!("Generating sample dataset at {:?}", args.input))?;
    }

    let mut table = Table::load(&args.input, delimiter)
        .with_context(|| format!("Loading raw dataset from {:?}", args.input))?;
    let mut stats = CleaningStats {
        rows_before: table.records.len(),
        ..Default::default()
    };

    let removed = dedup::remove_exact_duplicates(&mut table);
    stats.rows_after = table.records.len();
    info!(
        "Removed {} exact duplicate row(s), {} row(s) remain",
        removed, stats.rows_after
    );

    let ages = repair::repair_ages(&mut table)?;
    stats.ages_filled = ages.filled;
    stats.age_outliers_replaced = ages.outliers_replaced;
    info!(
        "Ages: filled {} missing value(s), replaced {} outlier(s)",
        ages.filled, ages.outliers_replaced
    );

    stats.gender_categories = repair::standardize_genders(&mut table);
    stats.country_categories = repair::standardize_countries(&mut table);
    info!(
        "Standardized {} gender and {} country categories",
        stats.gender_categories.len(),
        stats.country_categories.len()
    );

    dates::unify_dates(&mut table)?;
    info!("Unified signup and last-purchase dates to DD-MM-YYYY");

    let purchases = repair::repair_purchase_amounts(&mut table)?;
    stats.purchase_fixed = purchases.fixed;
    stats.iqr_lower = purchases.lower_bound;
    stats.iqr_upper = purchases.upper_bound;
    info!(
        "Purchases: fixed {} non-positive value(s), clipped to [{:.2}, {:.2}]",
        purchases.fixed, purchases.lower_bound, purchases.upper_bound
    );

    stats.email_dups_flagged = dedup::flag_duplicate_emails(&mut table);

    let cleaned = table
        .to_csv_bytes(delimiter)
        .context("Serializing cleaned table")?;
    io_utils::atomic_write(&args.output, &cleaned)
        .with_context(|| format!("Writing cleaned dataset to {:?}", args.output))?;
    io_utils::atomic_write(&args.summary, stats.render().as_bytes())
        .with_context(|| format!("Writing cleaning summary to {:?}", args.summary))?;

    info!(
        "Cleaning complete: {} row(s) -> '{}', summary -> '{}'",
        stats.rows_after,
        args.output.display(),
        args.summary.display()
    );
    Ok(())
}
