use actix_web::{web, App, HttpServer};
use std::fs::OpenOptions;
use std::time::Duration;
use clap::{value_parser, Arg, Command};
use log::info;

mod handlers;
mod models;
mod services;
mod utils;

use models::AppState;
use services::countdown::TICK_INTERVAL;
use services::related_words::{ConceptNetClient, RelatedWordFetcher, DEFAULT_API_BASE};
use services::session::SessionStore;
use services::word_loader::load_classic_words;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

// Function to initialize logging
fn init_logging(log_file: Option<&String>) -> std::io::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }

    builder.init();
    Ok(())
}

fn cli() -> Command {
    Command::new("word-games")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Letter-ordering and picture-guessing word games")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:8550")
                .help("Specify the listen address (e.g., 0.0.0.0:8550)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .num_args(1)
                .default_value(DEFAULT_API_BASE)
                .help("Base URL of the ConceptNet API"),
        )
        .arg(
            Arg::new("request-timeout")
                .long("request-timeout")
                .num_args(1)
                .value_parser(value_parser!(u64))
                .default_value("10")
                .help("Seconds to wait for each ConceptNet request"),
        )
        .arg(
            Arg::new("word-file")
                .long("word-file")
                .num_args(1)
                .help("Word list for the classic letters game, one word per line"),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .num_args(1)
                .value_parser(value_parser!(i64).range(1..))
                .default_value("60")
                .help("Minutes of inactivity before a session is discarded"),
        )
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let matches = cli().get_matches();

    let listen_host = matches
        .get_one::<String>("listen-host")
        .cloned()
        .unwrap_or_else(|| "0.0.0.0:8550".to_string());
    let log_file = matches.get_one::<String>("log-file");
    let api_base = matches
        .get_one::<String>("api-base")
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let request_timeout = Duration::from_secs(
        matches.get_one::<u64>("request-timeout").copied().unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    );
    let word_file = matches.get_one::<String>("word-file");
    let session_ttl = chrono::Duration::minutes(
        matches.get_one::<i64>("session-ttl").copied().unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
    );

    init_logging(log_file)?;

    let state = AppState {
        sessions: SessionStore::new(session_ttl),
        classic_words: load_classic_words(word_file.map(String::as_str)),
        countdown_interval: TICK_INTERVAL,
    };
    let shared_state = web::Data::new(state);

    info!(
        "Listening on {} (ConceptNet at {}, timeout {:?})",
        listen_host, api_base, request_timeout
    );

    HttpServer::new(move || {
        // awc clients are per worker
        let fetcher = RelatedWordFetcher::new(Box::new(ConceptNetClient::new(&api_base, request_timeout)));

        App::new()
            .app_data(shared_state.clone())
            .app_data(web::Data::new(fetcher))
            .service(handlers::home::home)
            .service(handlers::home::submit_seed)
            .service(handlers::letters::letters_game)
            .service(handlers::letters::classic_letters_game)
            .service(handlers::letters::click_tile)
            .service(handlers::letters::new_word)
            .service(handlers::pictures::pictures_game)
            .service(handlers::pictures::submit_guess)
            .service(handlers::pictures::submit_letter_count)
            .service(handlers::pictures::new_round)
    })
    .bind(&listen_host)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let matches = cli().try_get_matches_from(["word-games"]).unwrap();
        assert_eq!(matches.get_one::<String>("listen-host").unwrap(), "0.0.0.0:8550");
        assert_eq!(matches.get_one::<String>("api-base").unwrap(), DEFAULT_API_BASE);
        assert_eq!(*matches.get_one::<u64>("request-timeout").unwrap(), DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(*matches.get_one::<i64>("session-ttl").unwrap(), DEFAULT_SESSION_TTL_MINUTES);
        assert!(matches.get_one::<String>("word-file").is_none());
    }

    #[test]
    fn test_cli_rejects_bad_numbers() {
        assert!(cli().try_get_matches_from(["word-games", "--request-timeout", "soon"]).is_err());
        assert!(cli().try_get_matches_from(["word-games", "--session-ttl", "0"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let matches = cli()
            .try_get_matches_from([
                "word-games",
                "--api-base", "http://localhost:8084",
                "--word-file", "share/words.txt",
                "--request-timeout", "3",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("api-base").unwrap(), "http://localhost:8084");
        assert_eq!(matches.get_one::<String>("word-file").unwrap(), "share/words.txt");
        assert_eq!(*matches.get_one::<u64>("request-timeout").unwrap(), 3);
    }
}
