use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgConnectOptions;

use crate::collectors::VacancyQuery;
use crate::error::AppError;

/// Employers loaded when none are configured: Yandex, Sber, T-Bank, VK, Ozon,
/// Wildberries, MTS, VTB, Gazprom Neft, Skyeng.
pub const DEFAULT_EMPLOYER_IDS: &str = "1740,3529,78638,15478,2180,87021,3776,4181,39305,1122462";

#[derive(Parser, Debug, Clone)]
#[command(name = "hh-vacancies", about = "Load hh.ru vacancies into PostgreSQL and query them")]
pub struct Config {
    /// Connection URL of any database on the target server
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Name of the database the vacancies are loaded into
    #[arg(long, env = "HH_DB_NAME", default_value = "vacancies_hh_database")]
    pub db_name: String,

    /// Base URL of the hh.ru API
    #[arg(long, env = "HH_API_URL", default_value = "https://api.hh.ru")]
    pub api_url: String,

    /// Employer ids to load, comma separated
    #[arg(
        long,
        env = "HH_EMPLOYER_IDS",
        value_delimiter = ',',
        default_value = DEFAULT_EMPLOYER_IDS
    )]
    pub employer_ids: Vec<i64>,

    /// Only request vacancies that disclose a salary
    #[arg(
        long,
        env = "HH_ONLY_WITH_SALARY",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub only_with_salary: bool,

    /// Vacancies per page (the API caps this at 100)
    #[arg(
        long,
        env = "HH_PER_PAGE",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub per_page: u32,

    /// Page of the vacancy listing to load
    #[arg(long, env = "HH_PAGE", default_value_t = 0)]
    pub page: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HH_HTTP_TIMEOUT", default_value_t = 30)]
    pub http_timeout: u64,

    /// Create the database only if missing instead of dropping it first
    #[arg(long, env = "HH_KEEP_EXISTING")]
    pub keep_existing: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load fresh data, then open the query menu (default)
    Run,
    /// Load fresh data and exit
    Load,
    /// Open the query menu against an already loaded database
    Shell,
}

impl Config {
    /// Resolve the command, defaulting to Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }

    pub fn vacancy_query(&self) -> VacancyQuery {
        VacancyQuery {
            employer_ids: self.employer_ids.clone(),
            only_with_salary: self.only_with_salary,
            per_page: self.per_page,
            page: self.page,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Server connection options parsed from `database_url`.
    pub fn connect_options(&self) -> Result<PgConnectOptions, AppError> {
        self.database_url
            .parse::<PgConnectOptions>()
            .map_err(AppError::Database)
    }
}
