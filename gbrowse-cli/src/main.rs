mod args;
mod dataset;
mod error;
mod paths;
mod table;

use std::fs::File;
use std::path::Path;

use gbrowse_lib::query::SqliteSource;
use gbrowse_lib::state::MemoryStore;
use gbrowse_lib::state::SqliteStore;
use gbrowse_lib::state::StateProvider;
use gbrowse_lib::BrowserConfig;
use gbrowse_lib::GenericBrowser;
use rusqlite::Connection;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::args::Args;
use crate::dataset::Dataset;
use crate::error::CliError;

fn main() {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn state_provider() -> StateProvider {
    if let Some(path) = paths::state_db() {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match SqliteStore::open(&path) {
            Ok(store) => return StateProvider::new(store),
            Err(e) => log::warn!("state database {} unavailable, state not kept: {}", path.display(), e),
        }
    }
    StateProvider::new(MemoryStore::new())
}

fn run(args: &Args) -> Result<(), CliError> {
    let dataset = Dataset::load(&args.dataset)?;

    let mut provider = state_provider();
    if let Some(session) = &args.session {
        provider = provider.scoped(session);
    }

    let mut browser = GenericBrowser::open(args.instance(), provider, BrowserConfig::default())?;
    browser.set_columns(dataset.columns())?;
    browser.set_default_order(dataset.default_order()?, false)?;
    if let Some(size) = dataset.per_page {
        browser.force_per_page(size)?;
    }
    if let Some(label) = &dataset.label {
        browser.set_custom_label(label);
    }
    browser.handle_request(&args.request)?;

    match (&dataset.query, dataset.template()) {
        (Some(query), Some(template)) => {
            let conn = Connection::open(resolve(&args.dataset, &query.database))?;
            let rows = browser.query_order_limit(&mut SqliteSource::new(&conn), &template)?;
            browser.add_rows(rows)?;
        }
        _ => browser.add_rows(dataset.rows()?)?,
    }

    let payload = browser.render(None)?;
    if args.json {
        println!("{}", payload.to_json()?);
    } else {
        print!("{}", table::render(&payload));
    }
    Ok(())
}

/// Resolves `path` relative to the dataset file's directory.
fn resolve(dataset: &Path, path: &str) -> std::path::PathBuf {
    match dataset.parent() {
        Some(dir) if Path::new(path).is_relative() => dir.join(path),
        _ => Path::new(path).to_path_buf(),
    }
}
