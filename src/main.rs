//! salesdash CLI - print the sales dashboard's reports.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use salesdash::analytics::{self, Report, Tabular};
use salesdash::config::{DashboardConfig, SourceConfig};
use salesdash::ledger::{LedgerFilter, SalesDataset};

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(about = "Sales ledger reports: customers, managers, products, ROI and plan")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the source tables (overrides the configuration)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read `<table>.csv` exports instead of the configured spreadsheets
    #[arg(long, global = true)]
    csv: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Keep only these years (repeatable)
    #[arg(long = "year", global = true)]
    years: Vec<i32>,

    /// Keep only these countries (repeatable)
    #[arg(long = "country", global = true)]
    countries: Vec<String>,

    /// Keep only these categories (repeatable)
    #[arg(long = "category", global = true)]
    categories: Vec<String>,

    /// Keep only these managers (repeatable)
    #[arg(long = "employee", global = true)]
    employees: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Total profit, net sales and distinct customers
    Metrics,

    /// Years, countries, categories and managers available for filtering
    Options,

    /// Most profitable customers of a category in a country
    TopCustomers {
        category: String,
        country: String,

        /// Number of customers to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Profit concentration across a country's customers
    Pareto { country: String },

    /// Countries ranked by profit
    Countries,

    /// Managers ranked by net sales
    Managers,

    /// Mean discount against sales volume per manager
    Discounts,

    /// Net sales of a category per weekday
    Weekdays { category: String },

    /// Products sold by a manager
    ManagerProducts { employee: String },

    /// Most profitable products of a category
    TopProducts {
        category: String,

        /// Number of products to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Yearly trend of a product (defaults to the first product in the selection)
    Trend { product: Option<String> },

    /// Return on supplier cost per year
    Roi,

    /// Monthly sales against plan
    Plan,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::new().parse_filters(level).init();

    // A dataset that fails to load ends the session; queries never run on partial data
    let dataset = match SalesDataset::load(&config.sources, config.join.duplicate_keys) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: could not load sales data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config, &dataset) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> salesdash::Result<DashboardConfig> {
    let mut config = DashboardConfig::load_with_precedence(cli.config.as_ref())?;
    if cli.csv {
        let data_dir = config.sources.data_dir.clone();
        config.sources = SourceConfig::csv_in_dir(data_dir);
    }
    if let Some(dir) = &cli.data_dir {
        config.sources.data_dir = dir.clone();
    }
    Ok(config)
}

fn run(cli: &Cli, config: &DashboardConfig, dataset: &SalesDataset) -> salesdash::Result<()> {
    let filter = LedgerFilter::new()
        .with_years(cli.years.iter().copied())
        .with_countries(cli.countries.iter().cloned())
        .with_categories(cli.categories.iter().cloned())
        .with_employees(cli.employees.iter().cloned());
    let view = dataset.ledger().filter(&filter);
    log::debug!("{} of {} ledger rows selected", view.len(), dataset.ledger().len());

    let top_n = config.analytics.top_n;
    let format = cli.format;

    match &cli.command {
        Commands::Metrics => emit(&Report::new(vec![analytics::key_metrics(&view)]), format),
        Commands::Options => {
            let options = analytics::filter_options(&dataset.ledger().view());
            println!("{}", serde_json::to_string_pretty(&options)?);
            Ok(())
        }
        Commands::TopCustomers {
            category,
            country,
            top,
        } => emit(
            &analytics::top_customers(&view, category, country, top.unwrap_or(top_n)),
            format,
        ),
        Commands::Pareto { country } => emit(&analytics::pareto_analysis(&view, country), format),
        Commands::Countries => emit(&analytics::country_ranking(&view), format),
        Commands::Managers => emit(&analytics::manager_sales(&view), format),
        Commands::Discounts => emit(&analytics::manager_discounts(&view), format),
        Commands::Weekdays { category } => {
            emit(&analytics::productive_weekdays(&view, category), format)
        }
        Commands::ManagerProducts { employee } => {
            emit(&analytics::products_by_manager(&view, employee), format)
        }
        Commands::TopProducts { category, top } => emit(
            &analytics::top_products(&view, category, top.unwrap_or(top_n)),
            format,
        ),
        Commands::Trend { product } => {
            let product = match product.as_deref().or_else(|| view.first_product()) {
                Some(product) => product.to_string(),
                None => {
                    println!("No data for a product trend.");
                    return Ok(());
                }
            };
            println!("Product: {}", product);
            emit(&analytics::product_trend(&view, &product), format)
        }
        Commands::Roi => emit(&analytics::roi_by_year(&view), format),
        Commands::Plan => emit(
            &analytics::plan_vs_actual(&view, dataset.plan(), &filter),
            format,
        ),
    }
}

fn emit<R: Tabular>(report: &Report<R>, format: OutputFormat) -> salesdash::Result<()> {
    let stdout = io::stdout();
    match format {
        OutputFormat::Text => {
            let mut out = stdout.lock();
            if report.is_empty() {
                writeln!(out, "No data for the current selection.")?;
            } else {
                write!(out, "{}", report.to_text())?;
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => report.write_csv(stdout.lock())?,
    }
    Ok(())
}
