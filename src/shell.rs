use std::fmt::Write as _;
use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::models::report::{CompanyVacancies, VacancyListing};
use crate::reports::VacancyReports;

const MENU: &str = "
Choose what to show:
  1 - companies and the number of vacancies at each
  2 - all vacancies with details
  3 - average starting salary
  4 - vacancies with a starting salary above average
  5 - vacancies whose title contains a keyword
  0 - exit
> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Companies,
    AllVacancies,
    AverageSalary,
    AboveAverage,
    Keyword,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Companies),
            "2" => Some(Self::AllVacancies),
            "3" => Some(Self::AverageSalary),
            "4" => Some(Self::AboveAverage),
            "5" => Some(Self::Keyword),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive menu loop. Returns on `0` or end of input.
/// Query failures are printed and the loop continues.
pub async fn run<R: BufRead, W: Write>(
    reports: &VacancyReports,
    mut input: R,
    mut output: W,
) -> Result<(), AppError> {
    loop {
        write!(output, "{MENU}")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let choice = match MenuChoice::parse(&line) {
            Some(MenuChoice::Exit) => break,
            Some(choice) => choice,
            None => {
                writeln!(output, "Unknown command '{}', try again", line.trim())?;
                continue;
            }
        };

        let keyword = if choice == MenuChoice::Keyword {
            write!(output, "Keyword: ")?;
            output.flush()?;
            match read_line(&mut input)? {
                Some(keyword) => keyword.trim().to_string(),
                None => break,
            }
        } else {
            String::new()
        };

        match answer(reports, choice, &keyword).await {
            Ok(text) => write!(output, "{text}")?,
            Err(e) => {
                tracing::error!("Query failed: {e}");
                writeln!(output, "Query failed: {e}")?;
            }
        }
    }

    Ok(())
}

// Blocking read on the runtime thread; the menu is the only task running.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

async fn answer(
    reports: &VacancyReports,
    choice: MenuChoice,
    keyword: &str,
) -> Result<String, AppError> {
    let text = match choice {
        MenuChoice::Companies => render_companies(&reports.companies_and_vacancy_counts().await?),
        MenuChoice::AllVacancies => render_listings(&reports.all_vacancies().await?),
        MenuChoice::AverageSalary => render_average(reports.average_starting_salary().await?),
        MenuChoice::AboveAverage => render_names(&reports.vacancies_above_average_salary().await?),
        MenuChoice::Keyword => render_names(&reports.vacancies_matching_keyword(keyword).await?),
        MenuChoice::Exit => String::new(),
    };
    Ok(text)
}

fn render_companies(rows: &[CompanyVacancies]) -> String {
    if rows.is_empty() {
        return "No vacancies loaded.\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{}: {}", row.employer_name, row.vacancies_count);
    }
    out
}

fn render_listings(rows: &[VacancyListing]) -> String {
    if rows.is_empty() {
        return "No vacancies loaded.\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            row.vacancy_name,
            row.employer_name,
            salary_range(row.salary_from, row.salary_to),
            row.vacancy_url.as_deref().unwrap_or("")
        );
    }
    out
}

fn salary_range(from: Option<i32>, to: Option<i32>) -> String {
    match (from, to) {
        (Some(from), Some(to)) => format!("{from}-{to}"),
        (Some(from), None) => format!("from {from}"),
        (None, Some(to)) => format!("up to {to}"),
        (None, None) => "salary not disclosed".to_string(),
    }
}

fn render_average(avg: Option<f64>) -> String {
    match avg {
        Some(avg) => format!("Average starting salary: {avg:.2}\n"),
        None => "No vacancies disclose a starting salary.\n".to_string(),
    }
}

fn render_names(names: &[String]) -> String {
    if names.is_empty() {
        return "No matching vacancies.\n".to_string();
    }
    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}
