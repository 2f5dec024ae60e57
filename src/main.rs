use std::io::Write;

use dotenvy::dotenv;

use lead_tracker::api::http::HttpLeadApi;
use lead_tracker::models::config::ClientConfig;
use lead_tracker::shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let client_config = match ClientConfig::load() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    let api = match HttpLeadApi::new(&client_config) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Error building HTTP client: {}", err);
            std::process::exit(1);
        }
    };

    log::info!("Using backend at {}", api.base_url());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let mut shell = Shell::new(&api);
    if let Err(err) = shell.run(stdin, &mut stdout).await {
        log::error!("Shell stopped: {}", err);
        std::process::exit(1);
    }
    let _ = writeln!(stdout);
}
