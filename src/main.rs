mod analytics;
mod config;
mod convert;
mod db;
mod export;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let db = db::Database::open(&config.db_path())?;
    let mut store = store::Store::open(db)?;

    match args.len() {
        1 => run::as_tui(&mut store, config.converter()),
        2.. => run::as_cli(&args, &mut store, config.converter()),
        _ => {
            eprintln!("Usage: unibudget [command]");
            Ok(())
        }
    }
}
