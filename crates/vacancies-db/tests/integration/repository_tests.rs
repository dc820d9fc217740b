//! Integration tests for VacancyRepository.

use vacancies_core::{AppError, InsertSummary, Vacancy, VacancyListing, VacancyStore};

use crate::integration::common::{sample_record, setup_repository, setup_test_db};

#[tokio::test]
async fn test_initialize_schema_is_idempotent() {
    let (repo, _container) = setup_repository().await;

    repo.initialize_schema()
        .await
        .expect("second schema creation should succeed");
    repo.health_check().await.expect("health check should succeed");
}

#[tokio::test]
async fn test_counts_on_empty_schema_are_empty() {
    let (repo, _container) = setup_repository().await;

    let counts = repo.companies_with_vacancy_counts().await.unwrap();
    assert!(counts.is_empty(), "left join of empty tables yields no rows");
    assert!(repo.all_vacancies().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_one_company_row_per_distinct_name_in_batch() {
    let (repo, _container) = setup_repository().await;

    let records = vec![
        sample_record("Acme", "Senior Engineer", Some(150_000)),
        sample_record("Globex", "Tester", None),
        sample_record("Acme", "Analyst", Some(90_000)),
        sample_record("Initech", "Manager", None),
    ];
    let summary = repo.insert_batch(&records).await.unwrap();

    assert_eq!(
        summary,
        InsertSummary {
            companies_created: 3,
            vacancies_inserted: 4,
        }
    );
    let names: Vec<String> = repo
        .companies()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Acme", "Globex", "Initech"]);
}

#[tokio::test]
async fn test_same_employer_twice_counts_two_vacancies() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Engineer", None),
        sample_record("Acme", "Analyst", None),
    ])
    .await
    .unwrap();

    let companies = repo.companies().await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name, "Acme");

    let counts = repo.companies_with_vacancy_counts().await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].name, "Acme");
    assert_eq!(counts[0].vacancies_count, 2);
}

#[tokio::test]
async fn test_second_batch_duplicates_company_rows() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[sample_record("Acme", "Engineer", None)])
        .await
        .unwrap();
    repo.insert_batch(&[sample_record("Acme", "Analyst", None)])
        .await
        .unwrap();

    assert_eq!(
        repo.companies().await.unwrap().len(),
        2,
        "deduplication only spans a single batch"
    );

    // Grouping by name collapses both rows into one report line.
    let counts = repo.companies_with_vacancy_counts().await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].vacancies_count, 2);
}

#[tokio::test]
async fn test_vacancy_rows_reference_company_of_their_batch() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Senior Engineer", Some(150_000)),
        sample_record("Globex", "Tester", None),
    ])
    .await
    .unwrap();
    repo.insert_batch(&[sample_record("Acme", "Analyst", None)])
        .await
        .unwrap();

    let companies = repo.companies().await.unwrap();
    let vacancies: Vec<Vacancy> = repo.vacancies().await.unwrap();

    assert_eq!(vacancies.len(), 3);
    assert_eq!(vacancies[0].name, "Senior Engineer");
    assert_eq!(vacancies[0].salary, Some(150_000));
    assert_eq!(vacancies[0].link, "https://hh.ru/vacancy/senior-engineer");
    assert_eq!(vacancies[0].company_id, companies[0].id);
    assert_eq!(vacancies[1].company_id, companies[1].id);
    assert_eq!(vacancies[1].salary, None);

    // The second batch created its own Acme row.
    assert_eq!(companies[2].name, "Acme");
    assert_eq!(vacancies[2].company_id, companies[2].id);
    assert_ne!(vacancies[2].company_id, vacancies[0].company_id);
}

#[tokio::test]
async fn test_salary_round_trip() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Engineer", Some(150_000)),
        sample_record("Acme", "Intern", None),
    ])
    .await
    .unwrap();

    let all = repo.all_vacancies().await.unwrap();
    assert_eq!(
        all,
        vec![
            VacancyListing {
                company_name: "Acme".to_string(),
                vacancy_name: "Engineer".to_string(),
                salary: Some(150_000),
                link: "https://hh.ru/vacancy/engineer".to_string(),
            },
            VacancyListing {
                company_name: "Acme".to_string(),
                vacancy_name: "Intern".to_string(),
                salary: None,
                link: "https://hh.ru/vacancy/intern".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_average_salary_ignores_nulls() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "A", Some(100_000)),
        sample_record("Acme", "B", Some(200_000)),
        sample_record("Globex", "C", None),
        sample_record("Globex", "D", Some(60_000)),
    ])
    .await
    .unwrap();

    let average = repo.average_salary().await.unwrap().expect("average exists");
    assert!((average - 120_000.0).abs() < 1e-6, "got {}", average);
}

#[tokio::test]
async fn test_average_salary_none_when_all_null() {
    let (repo, _container) = setup_repository().await;

    assert_eq!(repo.average_salary().await.unwrap(), None);

    repo.insert_batch(&[sample_record("Acme", "A", None)])
        .await
        .unwrap();
    assert_eq!(repo.average_salary().await.unwrap(), None);
}

#[tokio::test]
async fn test_above_average_is_strictly_greater() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Low", Some(50_000)),
        sample_record("Acme", "Mid", Some(100_000)),
        sample_record("Globex", "High", Some(150_000)),
        sample_record("Globex", "Unknown", None),
    ])
    .await
    .unwrap();

    // Average is exactly 100000, so "Mid" is not included.
    let above = repo.vacancies_above_average_salary().await.unwrap();
    let names: Vec<&str> = above.iter().map(|v| v.vacancy_name.as_str()).collect();
    assert_eq!(names, vec!["High"]);
    assert_eq!(above[0].company_name, "Globex");
}

#[tokio::test]
async fn test_above_average_empty_without_salaries() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "A", None),
        sample_record("Acme", "B", None),
    ])
    .await
    .unwrap();

    assert!(repo.vacancies_above_average_salary().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_keyword_search_is_case_insensitive_substring() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Senior Engineer", Some(200_000)),
        sample_record("Acme", "Analyst", Some(90_000)),
        sample_record("Globex", "engineering manager", None),
    ])
    .await
    .unwrap();

    let found = repo.vacancies_matching_keyword("Engineer").await.unwrap();
    let names: Vec<&str> = found.iter().map(|v| v.vacancy_name.as_str()).collect();
    assert_eq!(names, vec!["Senior Engineer", "engineering manager"]);
    assert!(!names.contains(&"Analyst"));
}

#[tokio::test]
async fn test_keyword_wildcards_are_not_escaped() {
    let (repo, _container) = setup_repository().await;

    repo.insert_batch(&[
        sample_record("Acme", "Go developer", None),
        sample_record("Acme", "Analyst", None),
    ])
    .await
    .unwrap();

    // "_" matches any single character, so it matches every non-empty name.
    let found = repo.vacancies_matching_keyword("_").await.unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_failed_batch_is_not_committed() {
    let (repo, _container) = setup_repository().await;

    let too_long = "x".repeat(300);
    let result = repo
        .insert_batch(&[
            sample_record("Acme", "Engineer", None),
            sample_record("Globex", &too_long, None),
        ])
        .await;

    assert!(matches!(result, Err(AppError::DatabaseError(_))));
    assert!(repo.companies().await.unwrap().is_empty());
    assert!(repo.all_vacancies().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_vacancy_store_trait_delegates() {
    let (pool, _container) = setup_test_db().await;
    let repo = vacancies_db::VacancyRepository::new(pool);

    VacancyStore::initialize_schema(&repo).await.unwrap();
    let summary = VacancyStore::insert_batch(&repo, &[sample_record("Acme", "Engineer", None)])
        .await
        .unwrap();

    assert_eq!(summary.vacancies_inserted, 1);
    assert_eq!(repo.all_vacancies().await.unwrap().len(), 1);
}
