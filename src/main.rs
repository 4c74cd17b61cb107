use anyhow::Context;
use clap::{Parser, Subcommand};
use leet_review::database::{ItemStore, SqliteStore};
use leet_review::display::{format_date, format_days, format_last_reviewed};
use leet_review::export::{export_items_to_path, import_items};
use leet_review::models::now_millis;
use leet_review::{
    Difficulty, Grade, LearnedItem, NewItem, ReviewService, ReviewSession, SrsConfig,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leet-review", about = "Spaced-repetition reviews of solved problems")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, default_value = "leet-review.sqlite3")]
    db: PathBuf,

    /// JSON file overriding scheduling constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretend the current time is this epoch-millisecond instant
    #[arg(long, global = true)]
    now: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a solved problem and schedule its first review
    Add {
        url: String,
        /// How easy recall felt, 1 (hardest) to 5 (easiest)
        #[arg(long)]
        rating: Option<i64>,
        /// YYYY-MM-DD, MM/DD/YYYY or MM/DD
        #[arg(long)]
        solved: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show due and upcoming problems
    List,
    /// Grade one problem: again, hard, good or easy
    Review { id: String, grade: Grade },
    /// Show the interval each grade would give
    Preview { id: String },
    /// Review every due problem interactively
    Study,
    Delete { id: String },
    Export { path: PathBuf },
    Import { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SrsConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SrsConfig::default(),
    };
    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("opening database {}", cli.db.display()))?;
    let mut service = ReviewService::new(store, config);
    let now = cli.now.unwrap_or_else(now_millis);

    match cli.command {
        Command::Add {
            url,
            rating,
            solved,
            difficulty,
            title,
            notes,
        } => {
            let item = service.add_item(
                NewItem {
                    url,
                    title,
                    difficulty,
                    date_solved: solved,
                    rating,
                    notes,
                    ..NewItem::default()
                },
                now,
            )?;
            println!(
                "\"{}\" scheduled for review on {}.",
                item.display_title(),
                format_date(item.review.next_review_date)
            );
        }
        Command::List => {
            let dashboard = service.dashboard(now)?;
            if dashboard.is_empty() {
                println!("No problems yet. Add one with `leet-review add <url>`.");
            }
            if !dashboard.due.is_empty() {
                println!("Due for review ({}):", dashboard.due.len());
                for item in &dashboard.due {
                    print_item(item);
                }
            }
            if !dashboard.upcoming.is_empty() {
                println!("Upcoming reviews ({}):", dashboard.upcoming.len());
                for item in &dashboard.upcoming {
                    print_item(item);
                }
            }
        }
        Command::Review { id, grade } => {
            let item = service.review(&id, grade, now)?;
            println!(
                "{}: next review in {} ({})",
                item.display_title(),
                format_days(item.review.interval),
                format_date(item.review.next_review_date)
            );
        }
        Command::Preview { id } => {
            for (grade, patch) in service.preview(&id, now)? {
                println!("{grade:>5}: {}", format_days(patch.interval));
            }
        }
        Command::Study => study(&mut service, now)?,
        Command::Delete { id } => {
            let item = service.delete(&id)?;
            println!("Deleted \"{}\".", item.display_title());
        }
        Command::Export { path } => {
            let items = service.store().list()?;
            export_items_to_path(&items, &path)?;
            println!("Exported {} problems to {}", items.len(), path.display());
        }
        Command::Import { path } => {
            let items = import_items(&path, service.scheduler().config())?;
            let count = service.restore(items)?;
            println!("Imported {count} problems from {}", path.display());
        }
    }

    Ok(())
}

fn print_item(item: &LearnedItem) {
    let difficulty = item.difficulty.map(|d| format!(" [{d}]")).unwrap_or_default();
    println!(
        "  {}{difficulty}  due {}  interval {}  ease {:.2}  last reviewed {}",
        item.display_title(),
        format_date(item.review.next_review_date),
        format_days(item.review.interval),
        item.review.ease_factor,
        format_last_reviewed(item.review.last_reviewed_date)
    );
    println!("    {}", item.url);
}

fn study(service: &mut ReviewService<SqliteStore>, now: i64) -> anyhow::Result<()> {
    let mut session = ReviewSession::start(service, now)?;
    if session.is_completed() {
        println!("Nothing is due. Come back later.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(item) = session.current() {
        println!();
        println!("{}", session.progress_message());
        println!("{}  {}", item.display_title(), item.url);
        if session.show_notes {
            for text in [&item.algorithm, &item.notes, &item.code].into_iter().flatten() {
                println!("{text}");
            }
        }
        print!("Grade [again/hard/good/easy], n = toggle notes, s = skip, q = quit: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "q" => break,
            "s" => session.skip_current(),
            "n" => session.toggle_notes(),
            answer => match answer.parse::<Grade>() {
                Ok(grade) => {
                    if let Some(updated) = session.grade_current(service, grade, now)? {
                        println!(
                            "Next review in {}",
                            format_days(updated.review.interval)
                        );
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    println!("{}", session.progress_message());
    Ok(())
}
