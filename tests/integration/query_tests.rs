use hh_vacancies::loader;
use hh_vacancies::models::vacancy::Vacancy;
use hh_vacancies::reports::VacancyReports;

use crate::common::{employer, fresh_store, setup_c_locale_server, setup_test_server, vacancy};

#[tokio::test]
async fn average_ignores_undisclosed_salaries() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "avg_db").await;

    let acme = employer(1, "Acme");
    let vacancies = vec![
        vacancy(10, "Junior", &acme, Some(100)),
        vacancy(11, "Unknown", &acme, None),
        vacancy(12, "Senior", &acme, Some(300)),
    ];
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    assert_eq!(reports.average_starting_salary().await.unwrap(), Some(200.0));
    assert_eq!(
        reports.vacancies_above_average_salary().await.unwrap(),
        vec!["Senior".to_string()]
    );
}

#[tokio::test]
async fn average_is_rounded_to_two_places() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "round_db").await;

    let acme = employer(1, "Acme");
    let vacancies = vec![
        vacancy(10, "A", &acme, Some(100)),
        vacancy(11, "B", &acme, Some(100)),
        vacancy(12, "C", &acme, Some(101)),
    ];
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    assert_eq!(reports.average_starting_salary().await.unwrap(), Some(100.33));
    assert_eq!(
        reports.vacancies_above_average_salary().await.unwrap(),
        vec!["C".to_string()]
    );
}

#[tokio::test]
async fn average_is_none_without_salaries() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "empty_avg_db").await;

    let acme = employer(1, "Acme");
    let vacancies = vec![vacancy(10, "Unknown", &acme, None)];
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    assert_eq!(reports.average_starting_salary().await.unwrap(), None);
    assert!(reports.vacancies_above_average_salary().await.unwrap().is_empty());
}

#[tokio::test]
async fn counts_group_by_company() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "counts_db").await;

    let acme = employer(1, "Acme");
    let globex = employer(2, "Globex");
    let idle = employer(3, "Idle");
    let vacancies = vec![
        vacancy(10, "A", &globex, None),
        vacancy(11, "B", &acme, None),
        vacancy(12, "C", &globex, None),
    ];
    loader::load(&pool, &[acme, globex, idle], &vacancies)
        .await
        .unwrap();

    let counts: Vec<(String, i64)> = VacancyReports::new(pool)
        .companies_and_vacancy_counts()
        .await
        .unwrap()
        .into_iter()
        .map(|row| (row.employer_name, row.vacancies_count))
        .collect();
    assert_eq!(
        counts,
        vec![("Acme".to_string(), 1), ("Globex".to_string(), 2)]
    );
}

#[tokio::test]
async fn keyword_match_ignores_case_and_treats_wildcards_literally() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "keyword_db").await;

    let acme = employer(1, "Acme");
    let names = [
        "Python Developer",
        "senior developer",
        "Designer",
        "100% remote",
        "remote_dev lead",
        "Разработчик Rust",
    ];
    let vacancies: Vec<Vacancy> = names
        .iter()
        .enumerate()
        .map(|(i, name)| vacancy(10 + i as i64, name, &acme, None))
        .collect();
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    let lower = reports.vacancies_matching_keyword("developer").await.unwrap();
    let title = reports.vacancies_matching_keyword("Developer").await.unwrap();
    let upper = reports.vacancies_matching_keyword("DEVELOPER").await.unwrap();

    assert_eq!(lower, vec!["Python Developer", "senior developer"]);
    assert_eq!(lower, title);
    assert_eq!(lower, upper);

    assert_eq!(
        reports.vacancies_matching_keyword("%").await.unwrap(),
        vec!["100% remote"]
    );
    assert_eq!(
        reports.vacancies_matching_keyword("_").await.unwrap(),
        vec!["remote_dev lead"]
    );
    assert_eq!(
        reports.vacancies_matching_keyword("разработчик").await.unwrap(),
        vec!["Разработчик Rust"]
    );
    assert!(
        reports
            .vacancies_matching_keyword("' OR 1=1 --")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn above_average_compares_against_unrounded_mean() {
    let server = setup_test_server().await;
    let pool = fresh_store(&server, "boundary_db").await;

    // Mean is 100.995: it rounds to 101.00, but every 101 is still above it.
    let acme = employer(1, "Acme");
    let mut vacancies = vec![vacancy(1, "Low", &acme, Some(100))];
    vacancies.extend((2..=200).map(|id| vacancy(id, "High", &acme, Some(101))));
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    assert_eq!(reports.average_starting_salary().await.unwrap(), Some(101.0));

    let above = reports.vacancies_above_average_salary().await.unwrap();
    assert_eq!(above.len(), 199);
    assert!(above.iter().all(|name| name == "High"));
}

#[tokio::test]
async fn keyword_match_folds_cyrillic_on_c_locale_server() {
    let server = setup_c_locale_server().await;
    let pool = fresh_store(&server, "c_locale_db").await;

    let ctype: String = sqlx::query_scalar(
        "SELECT datctype::text FROM pg_database WHERE datname = current_database()",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(ctype, "C");

    let acme = employer(1, "Acme");
    let vacancies = vec![
        vacancy(10, "Разработчик Rust", &acme, None),
        vacancy(11, "Аналитик", &acme, None),
    ];
    loader::load(&pool, &[acme], &vacancies).await.unwrap();

    let reports = VacancyReports::new(pool);
    let lower = reports.vacancies_matching_keyword("разработчик").await.unwrap();
    let title = reports.vacancies_matching_keyword("Разработчик").await.unwrap();
    let upper = reports.vacancies_matching_keyword("РАЗРАБОТЧИК").await.unwrap();

    assert_eq!(lower, vec!["Разработчик Rust"]);
    assert_eq!(lower, title);
    assert_eq!(lower, upper);
}
