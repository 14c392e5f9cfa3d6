use bar_hop::config::Config;
use bar_hop::planner::{parse_rating_arg, plan_night, Ratings, Style};
use bar_hop::specials::{Day, SpecialsTable};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_ROUTE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ListBy {
    #[default]
    Day,
    Bar,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List specials, grouped by day or by bar
    List {
        /// Only show this day (e.g. friday, fri)
        #[arg(short, long)]
        day: Option<Day>,
        /// Only show this bar
        #[arg(short, long)]
        bar: Option<String>,
        /// Group by day or by bar
        #[arg(long, value_enum, default_value_t = ListBy::Day)]
        by: ListBy,
    },
    /// Show summary statistics and the weekly pivot table
    Stats,
    /// Plan a bar-hopping route for one night
    Route {
        /// Day to plan for (defaults to today)
        #[arg(short, long)]
        day: Option<Day>,
        /// Number of stops (defaults to the config value)
        #[arg(short = 'n', long)]
        stops: Option<usize>,
        /// Route style (defaults to the config value)
        #[arg(short, long, value_enum)]
        style: Option<Style>,
        /// Favour cheap deals
        #[arg(long, overrides_with = "no_budget")]
        budget: bool,
        /// Plan without budget focus, even if the config turns it on
        #[arg(long, overrides_with = "budget")]
        no_budget: bool,
        /// Rate a bar 1-10, e.g. --rate "Zeno's=8" (repeatable)
        #[arg(long = "rate", value_parser = parse_rating_arg)]
        rates: Vec<(String, u8)>,
        /// YAML or JSON file mapping bar names to ratings
        #[arg(long)]
        ratings: Option<PathBuf>,
        /// Seed for the Adventure Mix wildcard bonus
        #[arg(long)]
        seed: Option<u64>,
        /// Print tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Interactive dashboard (default if no subcommand)
    Tui {
        /// Seed for the Adventure Mix wildcard bonus
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Create or update the config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "bar-hop")]
#[command(about = "Weekly bar specials browser and route planner", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/bar-hop/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Specials data file (defaults to the config value, then the current directory)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { seed: None });
    let start_time = Instant::now();

    // The wizard has to work even when the current config is broken
    if let Commands::Init = command {
        if let Err(e) = bar_hop::config::init::run_init_wizard(cli.config) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match bar_hop::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = bar_hop::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(bar_hop::config::get_config_path);
        eprintln!("Config: {}", path.display());
    }

    let table = match load_table(cli.data.clone(), &config, cli.verbose) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if table.is_empty() {
        eprintln!("No specials loaded. Check the data file has bar, day and deal fields.");
        std::process::exit(EXIT_DATA);
    }

    let use_colors = bar_hop::output::should_use_colors();

    match command {
        Commands::List { day, bar, by } => {
            let specials = table.filter(day, bar.as_deref());
            if specials.is_empty() {
                println!("No specials match those filters.");
            } else {
                let output = match by {
                    ListBy::Day => bar_hop::output::format_day_listing(&specials, use_colors),
                    ListBy::Bar => {
                        let mut specials = specials;
                        specials.sort_by(|a, b| a.bar.cmp(&b.bar).then_with(|| a.day.cmp(&b.day)));
                        bar_hop::output::format_bar_listing(&specials, use_colors)
                    }
                };
                println!("{}", output);
            }
        }
        Commands::Stats => {
            println!("{}", bar_hop::output::format_summary(&table.summary(), use_colors));
            println!();
            println!("{}", bar_hop::output::format_pivot(&table.pivot(), use_colors));
        }
        Commands::Route {
            day,
            stops,
            style,
            budget,
            no_budget,
            rates,
            ratings,
            seed,
            tsv,
        } => {
            let day = day.unwrap_or_else(Day::today);
            let budget_focus = match (budget, no_budget) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let request = config.route.request(stops, style, budget_focus);
            let specials = table.for_day(day);

            let ratings = match collect_ratings(ratings, rates, &config, &specials) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Ratings error: {:#}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Planning {} with {} specials and {} rated bars",
                    day,
                    specials.len(),
                    ratings.len()
                );
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let plan = match plan_night(&specials, &ratings, &request, &mut rng) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Route error: {}", e);
                    std::process::exit(EXIT_ROUTE);
                }
            };

            if plan.route.is_empty() {
                println!(
                    "Not enough bars with specials on {} for {} stops",
                    day, request.num_stops
                );
            } else if tsv {
                print!("{}", bar_hop::output::format_route_tsv(&plan.route));
            } else {
                println!("{}", bar_hop::output::format_route_header(day, &request));
                println!();
                println!(
                    "{}",
                    bar_hop::output::format_route(&plan.route, use_colors, cli.verbose)
                );
                println!();
                println!("{}", bar_hop::output::format_tips(&plan.tips, use_colors));
            }
        }
        Commands::Tui { seed } => {
            let theme = bar_hop::tui::resolve_theme(config.theme);
            let app = bar_hop::tui::App::new(table, &config, Day::today(), seed, theme);
            if let Err(e) = bar_hop::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        }
        // Ran before the config was loaded
        Commands::Init => {}
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Find and load the specials file: --data, then config, then the current directory
fn load_table(
    data: Option<PathBuf>,
    config: &Config,
    verbose: bool,
) -> anyhow::Result<SpecialsTable> {
    let path = match data.or_else(|| config.data_file.clone()) {
        Some(path) => bar_hop::config::expand_home(&path),
        None => {
            let cwd = std::env::current_dir()?;
            bar_hop::specials::discover_data_file(&cwd)?
        }
    };

    let load_start = Instant::now();
    let table = bar_hop::specials::load_specials(&path)?;

    if verbose {
        eprintln!(
            "Loaded {} specials for {} bars from {} in {:?}",
            table.len(),
            table.bars().len(),
            path.display(),
            load_start.elapsed()
        );
    }

    Ok(table)
}

/// Ratings file first, then --rate overrides, then the config default for anyone left
fn collect_ratings(
    file: Option<PathBuf>,
    overrides: Vec<(String, u8)>,
    config: &Config,
    specials: &[bar_hop::specials::Special],
) -> anyhow::Result<Ratings> {
    let mut ratings = match file {
        Some(path) => bar_hop::config::load_ratings(&path)?,
        None => Ratings::new(),
    };

    ratings.extend(overrides);

    if let Some(default_rating) = config.default_rating {
        for special in specials {
            ratings.entry(special.bar.clone()).or_insert(default_rating);
        }
    }

    Ok(ratings)
}
