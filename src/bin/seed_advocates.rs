//! Loads advocates from a JSON file into the configured database.
//!
//! Usage: `seed_advocates [path]`, defaulting to `config/advocates.json`.

use std::env;
use std::fs;

use dotenvy::dotenv;

use advocate_directory::db::establish_connection_pool;
use advocate_directory::forms::advocates::parse_seed_file;
use advocate_directory::models::config::ServerConfig;
use advocate_directory::repository::DieselRepository;
use advocate_directory::services::seed::seed_advocates;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "config/advocates.json".to_string());

    let server_config = match ServerConfig::load(&app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Cannot read seed file {path}: {err}");
            std::process::exit(1);
        }
    };

    let forms = match parse_seed_file(&contents) {
        Ok(forms) => forms,
        Err(err) => {
            log::error!("Cannot parse seed file {path}: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    if let Err(err) = seed_advocates(&repo, forms) {
        log::error!("Seeding failed: {err}");
        std::process::exit(1);
    }
}
