use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};

use movq::directors;
use movq::spec::{MoviePredicate, Spec};
use movq::store::CatalogStore;

#[derive(Parser)]
#[command(
    name = "movq",
    about = "Search a movie catalog with composable specifications"
)]
struct Cli {
    #[arg(long, env = "MOVQ_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalog, combining any of the filters below
    Search {
        #[arg(long, help = "Only movies suitable for children")]
        for_kids: bool,

        #[arg(long, help = "Only movies available on physical media")]
        on_disc: bool,

        #[arg(long, help = "Only movies by this director (exact match)")]
        director: Option<String>,

        #[arg(long, default_value_t = 0.0, help = "Minimum score")]
        min_score: f64,

        #[arg(long, default_value_t = 0)]
        page: usize,

        #[arg(long, default_value_t = 20)]
        page_size: usize,

        #[arg(long, help = "Print the translated query filter to stderr")]
        show_filter: bool,
    },
    /// Buy a ticket for a movie
    BuyTicket {
        id: u64,

        #[arg(long, help = "Validate that the movie is suitable for children")]
        child: bool,
    },
    /// Buy a physical-media copy of a movie
    BuyDisc { id: u64 },
    /// List unique director names across the catalog
    Directors {
        #[arg(long, help = "Show how many movies credit each director")]
        count: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let catalog_path = match cli.catalog {
        Some(p) => p,
        None => {
            eprintln!("Error: No catalog path specified. Use --catalog or set MOVQ_CATALOG");
            return ExitCode::from(2);
        }
    };

    let store = match CatalogStore::open(&catalog_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Command::Search {
            for_kids,
            on_disc,
            director,
            min_score,
            page,
            page_size,
            show_filter,
        } => run_search(
            &store,
            SearchOptions {
                for_kids,
                on_disc,
                director,
                min_score,
                page,
                page_size,
                show_filter,
            },
        ),
        Command::BuyTicket { id, child } => run_buy_ticket(&store, id, child),
        Command::BuyDisc { id } => run_buy_disc(&store, id),
        Command::Directors { count } => run_directors(&store, count),
    }
}

struct SearchOptions {
    for_kids: bool,
    on_disc: bool,
    director: Option<String>,
    min_score: f64,
    page: usize,
    page_size: usize,
    show_filter: bool,
}

fn run_search(store: &CatalogStore, options: SearchOptions) -> ExitCode {
    let mut spec: Spec<MoviePredicate> = Spec::All;

    if options.for_kids {
        spec = spec.and(Spec::leaf(MoviePredicate::ForKids));
    }
    if options.on_disc {
        let today = Local::now().date_naive();
        spec = spec.and(Spec::leaf(MoviePredicate::available_on_disc(today)));
    }
    if let Some(name) = options.director {
        spec = spec.and(Spec::leaf(MoviePredicate::DirectedBy(name)));
    }

    let filter = match spec.to_query() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if options.show_filter {
        eprintln!("filter: {}", filter);
    }

    let results = match store.get_list(&filter, options.min_score, options.page, options.page_size)
    {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Query error: {}", e);
            return ExitCode::from(2);
        }
    };

    if results.is_empty() {
        return ExitCode::from(1);
    }

    for movie in &results {
        let director = movie.director.as_deref().unwrap_or("uncredited");
        let release = movie
            .release_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unreleased".to_string());
        println!(
            "{:>4}  {:<32}  {:<5}  {:>4.1}  {:<10}  {}",
            movie.id, movie.title, movie.mpaa_rating, movie.score, release, director
        );
    }

    ExitCode::from(0)
}

fn run_buy_ticket(store: &CatalogStore, id: u64, child: bool) -> ExitCode {
    let Some(movie) = store.get_one(id) else {
        eprintln!("Error: No movie with id {}", id);
        return ExitCode::from(2);
    };

    if child {
        let spec = Spec::leaf(MoviePredicate::ForKids);
        match spec.evaluate(movie) {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("The movie is not suitable for children");
                return ExitCode::from(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    }

    println!("You've bought a ticket for {}", movie.title);
    ExitCode::from(0)
}

fn run_buy_disc(store: &CatalogStore, id: u64) -> ExitCode {
    let Some(movie) = store.get_one(id) else {
        eprintln!("Error: No movie with id {}", id);
        return ExitCode::from(2);
    };

    let today = Local::now().date_naive();
    let spec = Spec::leaf(MoviePredicate::available_on_disc(today));
    match spec.evaluate(movie) {
        Ok(true) => {
            println!("You've bought a copy of {}", movie.title);
            ExitCode::from(0)
        }
        Ok(false) => {
            eprintln!("The movie doesn't have a physical-media release yet");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run_directors(store: &CatalogStore, show_count: bool) -> ExitCode {
    let counts = directors::collect(store.movies());

    if counts.is_empty() {
        return ExitCode::from(1);
    }

    for line in directors::format(counts, show_count) {
        println!("{}", line);
    }

    ExitCode::from(0)
}
