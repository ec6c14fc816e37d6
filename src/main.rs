use std::sync::Arc;
use std::time::Duration;

use surah::{
    catalog::CatalogClient,
    cli::Cli,
    config::{Config, get_app_data_prefix},
    logging::{self, LogSink},
    session::Session,
    ui::reader::Reader,
    view::Screen,
};

use clap::Parser;
use eyre::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = logging::level_for(cli.verbose, cli.debug);
    if cli.dump {
        logging::init(level, LogSink::Stderr)?;
    } else {
        let log_path = get_app_data_prefix()?.join("surah.log");
        logging::init(level, LogSink::File(&log_path))?;
    }

    let mut config = load_config(&cli);
    if let Some(base_url) = &cli.base_url {
        config.settings.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.settings.request_timeout_secs = timeout;
    }
    if let Some(width) = cli.width {
        config.settings.text_width = width;
    }

    let timeout = config.settings.request_timeout();
    let client = CatalogClient::new(&config.settings.base_url, timeout)?;
    log::info!("Using catalog at {}", client.base_url());
    let session = Session::new(Arc::new(client), cli.chapter);

    if cli.dump {
        dump_chapter(session, &config, timeout)
    } else {
        let mut reader = Reader::new(config, session)?;
        reader.run()
    }
}

fn load_config(cli: &Cli) -> Config {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path.clone()),
        None => Config::new(),
    };
    match loaded {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Could not load configuration: {}", err);
            eprintln!("Warning: Could not load configuration: {}", err);
            eprintln!("Starting with default settings");
            Config::default()
        }
    }
}

fn dump_chapter(mut session: Session, config: &Config, timeout: Duration) -> Result<()> {
    // The client enforces its own timeout; the slack only covers thread hand-off.
    session.wait_settled(timeout.saturating_add(Duration::from_secs(1)));

    let screen = Screen::new(session.fetch_state(), &config.settings.labels);
    print!(
        "{}",
        screen.to_plain_text(
            config.settings.text_width,
            config.settings.show_transliteration
        )
    );
    Ok(())
}
