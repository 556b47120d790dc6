//! Runs one member search and prints the resulting page as JSON.
//!
//! Connection and paging settings come from `config/` and `APP_*`
//! variables; the search itself is read from `SEARCH_*` variables, e.g.
//! `SEARCH_TEAM_NAME=teamA SEARCH_AGE_GOE=20 SEARCH_SORT=age,desc`.

use std::env;

use config::Config;
use dotenvy::dotenv;

use member_query::db::establish_connection_pool;
use member_query::forms::search::SearchMembersForm;
use member_query::models::config::AppConfig;
use member_query::repository::DieselRepository;
use member_query::services::search::search_members;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {}", err);
            std::process::exit(1);
        }
    };

    let form = Config::builder()
        .add_source(
            config::Environment::with_prefix("SEARCH")
                .try_parsing(true)
                .list_separator(";")
                .with_list_parse_key("sort"),
        )
        .build()
        .and_then(|search| search.try_deserialize::<SearchMembersForm>());

    let form = match form {
        Ok(form) => form,
        Err(err) => {
            log::error!("Error reading search parameters: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    let page = match search_members(&repo, app_config.page_limits(), form) {
        Ok(page) => page,
        Err(e) => {
            log::error!("Search failed: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Page {} of {} ({} matching members)",
        page.page(),
        page.total_pages(),
        page.total
    );

    match serde_json::to_string_pretty(&page) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize results: {e}");
            std::process::exit(1);
        }
    }
}
