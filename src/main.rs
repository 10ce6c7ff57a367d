use clap::Parser;
use hh_vacancies::collectors::HeadHunter;
use hh_vacancies::config::{Command, Config};
use hh_vacancies::error::AppError;
use hh_vacancies::loader::{self, LoadSummary};
use hh_vacancies::reports::VacancyReports;
use hh_vacancies::{db, shell};
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hh_vacancies=info,sqlx=warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load(config: &Config) -> Result<LoadSummary, AppError> {
    let board = HeadHunter::new(&config.api_url, config.http_timeout())?;
    loader::run(config, &board).await
}

async fn open_shell(config: &Config) -> anyhow::Result<()> {
    let options = config.connect_options()?;
    let pool = db::create_pool(&options, &config.db_name).await?;
    let reports = VacancyReports::new(pool);

    let stdin = std::io::stdin();
    let result = shell::run(&reports, stdin.lock(), std::io::stdout()).await;
    reports.close().await;

    result?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_json);

    match config.resolved_command() {
        Command::Run => {
            // The menu opens even when loading failed.
            if let Err(e) = load(&config).await {
                tracing::error!("Load failed: {e}");
            }
            open_shell(&config).await?;
        }
        Command::Load => {
            load(&config).await?;
        }
        Command::Shell => {
            open_shell(&config).await?;
        }
    }

    Ok(())
}
