// ==========================================
// 生产单仓储集成测试
// ==========================================
// 测试目标: 验证区间查询、状态排除、主键读取
// ==========================================

mod test_helpers;

use production_report::domain::ProductionState;
use production_report::engine::ProductionLookup;
use production_report::logging;
use production_report::repository::{ProductionRepository, RepositoryError};
use test_helpers::{create_test_db, d, new_production, standard_productions};

fn seeded_repo() -> (tempfile::NamedTempFile, ProductionRepository) {
    let (temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ProductionRepository::new(&db_path).expect("Failed to create repo");
    repo.insert_batch(&standard_productions())
        .expect("Failed to seed productions");
    (temp_file, repo)
}

#[test]
fn test_search_filters_range_and_excluded_states() {
    logging::init_test();
    let (_temp_file, repo) = seeded_repo();

    let records = repo
        .search(
            d(2024, 6, 3),
            d(2024, 6, 8),
            &ProductionState::REPORT_EXCLUDED,
        )
        .unwrap();

    let numbers: Vec<&str> = records.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, vec!["MO002", "MO003", "MO004", "MO007"]);
}

#[test]
fn test_search_without_exclusions_includes_all_states() {
    let (_temp_file, repo) = seeded_repo();

    let records = repo
        .search_by_planned_date(d(2024, 6, 5), d(2024, 6, 6), &[])
        .unwrap();

    let numbers: Vec<&str> = records.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, vec!["MO003", "MO004", "MO005", "MO006"]);
}

#[test]
fn test_search_inverted_range_is_empty() {
    let (_temp_file, repo) = seeded_repo();

    let records = repo
        .search(d(2024, 6, 8), d(2024, 6, 3), &ProductionState::REPORT_EXCLUDED)
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_insert_and_browse() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repo = ProductionRepository::new(&db_path).unwrap();

    let id = repo
        .insert(&new_production("MO100", d(2024, 6, 4), ProductionState::Assigned))
        .unwrap();

    let found = repo.find_by_id(id).unwrap().expect("record should exist");
    assert_eq!(found.number, "MO100");
    assert_eq!(found.planned_date, d(2024, 6, 4));
    assert_eq!(found.state, ProductionState::Assigned);
    assert_eq!(found.warehouse.as_deref(), Some("WH"));

    assert!(repo.find_by_id(id + 1).unwrap().is_none());

    let err = repo.browse(&[id, id + 1]).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_duplicate_number_rolls_back_batch() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let repo = ProductionRepository::new(&db_path).unwrap();

    let batch = vec![
        new_production("MO200", d(2024, 6, 4), ProductionState::Done),
        new_production("MO200", d(2024, 6, 5), ProductionState::Done),
    ];
    let err = repo.insert_batch(&batch).unwrap_err();

    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    assert_eq!(repo.count().unwrap(), 0);
}
