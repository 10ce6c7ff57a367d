use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::collectors::{JobBoard, VacancyQuery};
use crate::error::AppError;
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

/// hh.ru rejects requests without an identifying User-Agent.
const USER_AGENT: &str = concat!("hh-vacancies/", env!("CARGO_PKG_VERSION"));

/// Client for the public hh.ru API.
pub struct HeadHunter {
    client: reqwest::Client,
    base_url: String,
}

impl HeadHunter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, AppError> {
        let resp = request.send().await?;

        if !resp.status().is_success() {
            return Err(AppError::Api {
                status: resp.status(),
                url: resp.url().to_string(),
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl JobBoard for HeadHunter {
    async fn employer(&self, id: i64) -> Result<Employer, AppError> {
        let url = format!("{}/employers/{id}", self.base_url);
        let data = self.get_json(self.client.get(&url)).await?;

        parse_employer(&data)
            .ok_or_else(|| AppError::Parse(format!("employer {id} is missing id or name")))
    }

    async fn vacancies(&self, query: &VacancyQuery) -> Result<Vec<Vacancy>, AppError> {
        let url = format!("{}/vacancies", self.base_url);
        let data = self
            .get_json(self.client.get(&url).query(&listing_params(query)))
            .await?;

        parse_vacancies(&data)
    }
}

/// Query string for a vacancy listing; `employer_id` repeats once per employer.
fn listing_params(query: &VacancyQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("per_page", query.per_page.to_string()),
        ("only_with_salary", query.only_with_salary.to_string()),
    ];
    params.extend(
        query
            .employer_ids
            .iter()
            .map(|id| ("employer_id", id.to_string())),
    );
    params
}

/// hh.ru encodes ids as strings; accept numbers as well.
fn parse_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Map an `/employers/{id}` response. Missing `site_url` becomes empty.
fn parse_employer(data: &Value) -> Option<Employer> {
    Some(Employer {
        id: parse_id(data.get("id"))?,
        name: str_field(data, "name")?,
        site_url: str_field(data, "site_url").unwrap_or_default(),
        open_vacancies: data
            .get("open_vacancies")
            .and_then(|v| v.as_i64())
            .unwrap_or(0),
    })
}

/// Parse the `items` of a listing, skipping entries that can't be keyed.
fn parse_vacancies(data: &Value) -> Result<Vec<Vacancy>, AppError> {
    let items = data
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Parse("missing 'items' in vacancy listing".to_string()))?;

    let mut vacancies = Vec::with_capacity(items.len());
    for raw in items {
        match parse_vacancy(raw) {
            Some(vacancy) => vacancies.push(vacancy),
            None => tracing::warn!("Skipping malformed vacancy item: {raw}"),
        }
    }
    Ok(vacancies)
}

fn parse_vacancy(raw: &Value) -> Option<Vacancy> {
    let employer = raw.get("employer")?;
    let (salary_from, salary_to) = extract_salary(raw.get("salary"));

    Some(Vacancy {
        id: parse_id(raw.get("id"))?,
        name: str_field(raw, "name")?,
        url: str_field(raw, "alternate_url").unwrap_or_default(),
        employer_id: parse_id(employer.get("id"))?,
        employer_name: str_field(employer, "name")?,
        salary_from,
        salary_to,
    })
}

/// Salary bounds; an absent or null `salary` object means neither is disclosed.
fn extract_salary(salary: Option<&Value>) -> (Option<i32>, Option<i32>) {
    let bound = |key: &str| {
        salary
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_f64())
            .map(|v| v as i32)
    };
    (bound("from"), bound("to"))
}
