use analytics::{DashboardEngine, DashboardReport, ReportParams};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use core_types::{Dimension, FilterSelection, SalaryRecord};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Paylens salary-analytics application.
fn main() {
    // Route engine diagnostics (e.g., dropped country codes) through RUST_LOG.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to install tracing subscriber");

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Values(args) => handle_values(args),
        Commands::Paths => handle_paths(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Filter, aggregate and summarize data-profession salary records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dashboard report for a filter selection.
    Report(ReportArgs),
    /// List the values each filter dimension can take.
    Values(ValuesArgs),
    /// Print the resolved application directory and dataset path.
    Paths,
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the salary CSV (overrides the configured path).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Restrict to these years (repeatable). Absent: every year present.
    #[arg(long)]
    year: Vec<i32>,

    /// Restrict to these seniority labels (repeatable).
    #[arg(long)]
    seniority: Vec<String>,

    /// Restrict to these contract types (repeatable).
    #[arg(long)]
    contract: Vec<String>,

    /// Restrict to these company sizes (repeatable).
    #[arg(long = "company-size")]
    company_size: Vec<String>,

    /// Override the configured top-roles count.
    #[arg(long)]
    top_roles: Option<usize>,

    /// Override the configured histogram bin count.
    #[arg(long)]
    bins: Option<usize>,

    /// Override the role the per-country table is restricted to.
    #[arg(long)]
    role: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Maximum number of detail rows printed in table output.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Parser)]
struct ValuesArgs {
    /// Path to the salary CSV (overrides the configured path).
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Handles the full filter → KPI → derived-tables pass and renders it.
fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let data_path =
        dataset::resolve_data_path(args.data.as_deref().unwrap_or(&config.data.file));
    let records = dataset::load_records(&data_path)?;

    let engine = DashboardEngine::new();
    let selection = build_selection(&records, &args);
    selection.validate(&records)?;
    let view = engine.apply_filters(&records, &selection);

    let params = ReportParams {
        top_roles: args.top_roles.unwrap_or(config.charts.top_roles),
        histogram_bins: args.bins.unwrap_or(config.charts.histogram_bins),
        choropleth_role: args
            .role
            .clone()
            .unwrap_or(config.charts.choropleth_role),
    };
    let report = engine.build_report(&view, &params)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => render_report(&report, &view, &params, args.limit),
    }

    Ok(())
}

/// Prints the distinct values of every filterable dimension, the data a
/// filter widget would be populated with.
fn handle_values(args: ValuesArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let data_path =
        dataset::resolve_data_path(args.data.as_deref().unwrap_or(&config.data.file));
    let records = dataset::load_records(&data_path)?;

    let engine = DashboardEngine::new();
    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Available values"]);
    for dimension in Dimension::ALL {
        let values = engine.available_values(&records, dimension);
        table.add_row(vec![dimension.label().to_string(), values.join(", ")]);
    }
    println!("{table}");

    Ok(())
}

/// Prints where the application resolved its own directory and dataset file.
fn handle_paths() -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    println!(
        "Application directory: {}",
        dataset::resolve_app_dir().display()
    );
    println!(
        "Dataset path: {}",
        dataset::resolve_data_path(&config.data.file).display()
    );
    Ok(())
}

// ==============================================================================
// Selection & Rendering Helpers
// ==============================================================================

/// Builds the filter selection: every dimension defaults to fully inclusive,
/// and each repeatable flag narrows its own dimension.
fn build_selection(records: &[SalaryRecord], args: &ReportArgs) -> FilterSelection {
    let mut selection = FilterSelection::all(records);
    if !args.year.is_empty() {
        selection.years = args.year.iter().copied().collect();
    }
    if !args.seniority.is_empty() {
        selection.seniorities = args.seniority.iter().cloned().collect();
    }
    if !args.contract.is_empty() {
        selection.contracts = args.contract.iter().cloned().collect();
    }
    if !args.company_size.is_empty() {
        selection.company_sizes = args.company_size.iter().cloned().collect();
    }
    selection
}

fn render_report(
    report: &DashboardReport,
    view: &[SalaryRecord],
    params: &ReportParams,
    limit: usize,
) {
    println!("General metrics (annual salary in USD)");
    let mut kpis = Table::new();
    kpis.set_header(vec!["Metric", "Value"]);
    kpis.add_row(vec!["Mean salary".to_string(), usd(report.kpis.mean_salary)]);
    kpis.add_row(vec!["Max salary".to_string(), usd(report.kpis.max_salary)]);
    kpis.add_row(vec!["Min salary".to_string(), usd(report.kpis.min_salary)]);
    kpis.add_row(vec![
        "Total records".to_string(),
        report.kpis.record_count.to_string(),
    ]);
    kpis.add_row(vec![
        "Most frequent role".to_string(),
        report.kpis.top_role.clone(),
    ]);
    println!("{kpis}");

    println!("\nTop {} roles by mean salary", params.top_roles);
    if report.top_roles.is_empty() {
        println!("(no data)");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Role", "Mean salary"]);
        for row in &report.top_roles {
            table.add_row(vec![row.role.clone(), usd(row.mean_salary)]);
        }
        println!("{table}");
    }

    println!("\nSalary distribution ({} bins)", params.histogram_bins);
    if report.salary_histogram.is_empty() {
        println!("(no data)");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Salary range", "Records"]);
        for bin in &report.salary_histogram {
            table.add_row(vec![
                format!("{} .. {}", usd(bin.lower), usd(bin.upper)),
                bin.count.to_string(),
            ]);
        }
        println!("{table}");
    }

    println!("\nMean salary by year");
    if report.salary_by_year.is_empty() {
        println!("(no data)");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Year", "Mean salary"]);
        for row in &report.salary_by_year {
            table.add_row(vec![row.year.to_string(), usd(row.mean_salary)]);
        }
        println!("{table}");
    }

    println!("\nRemote work modes");
    if report.remote_modes.is_empty() {
        println!("(no data)");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Mode", "Records"]);
        for row in &report.remote_modes {
            table.add_row(vec![row.mode.clone(), row.count.to_string()]);
        }
        println!("{table}");
    }

    println!("\nMean salary by employer country ({})", params.choropleth_role);
    if report.country_salaries.is_empty() {
        println!("(no data)");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Country", "Mean salary"]);
        for row in &report.country_salaries {
            table.add_row(vec![row.country.clone(), usd(row.mean_salary)]);
        }
        println!("{table}");
    }

    println!("\nDetail ({} of {} records)", view.len().min(limit), view.len());
    let mut detail = Table::new();
    detail.set_header(vec![
        "Year",
        "Seniority",
        "Contract",
        "Company size",
        "Role",
        "Country",
        "Remote",
        "Salary (USD)",
    ]);
    for record in view.iter().take(limit) {
        detail.add_row(vec![
            record.year.to_string(),
            record.seniority.clone(),
            record.contract.clone(),
            record.company_size.clone(),
            record.role.clone(),
            record.company_location.clone(),
            record.remote.clone(),
            usd(record.salary_usd),
        ]);
    }
    println!("{detail}");
}

/// Formats a Decimal salary as whole dollars; the engine itself never formats.
fn usd(value: Decimal) -> String {
    format!("${}", value.round_dp(0))
}
