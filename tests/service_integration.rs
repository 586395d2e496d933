//! End-to-end tests of the calculation service over the in-memory
//! repository.

use std::sync::Arc;

use geocalc_rust::db::repositories::LocalRepository;
use geocalc_rust::db::CalculationRepository;
use geocalc_rust::models::ShapeKind;
use geocalc_rust::services::{GeometryCalculator, GeometryError};

fn setup() -> (Arc<LocalRepository>, GeometryCalculator) {
    let repo = Arc::new(LocalRepository::new());
    let calc = GeometryCalculator::new(repo.clone());
    (repo, calc)
}

#[tokio::test]
async fn every_successful_calculation_appends_exactly_one_record() {
    let (repo, calc) = setup();

    calc.compute_and_record(ShapeKind::Circle, &[1.0])
        .await
        .unwrap();
    assert_eq!(repo.len(), 1);

    calc.compute_and_record(ShapeKind::Triangle, &[3.0, 4.0, 5.0])
        .await
        .unwrap();
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn failed_validation_leaves_store_unchanged() {
    let (repo, calc) = setup();
    calc.compute_and_record(ShapeKind::Circle, &[5.0])
        .await
        .unwrap();
    let before = repo.len();

    for params in [&[-1.0][..], &[0.0][..], &[f64::NAN][..]] {
        let err = calc
            .compute_and_record(ShapeKind::Circle, params)
            .await
            .unwrap_err();
        assert!(matches!(err, GeometryError::Validation { .. }));
    }

    assert_eq!(repo.len(), before);
}

#[tokio::test]
async fn history_interleaves_shape_kinds_newest_first() {
    let (_repo, calc) = setup();
    calc.compute_and_record(ShapeKind::Circle, &[1.0])
        .await
        .unwrap();
    calc.compute_and_record(ShapeKind::Triangle, &[3.0, 4.0, 5.0])
        .await
        .unwrap();
    calc.compute_and_record(ShapeKind::Circle, &[2.0])
        .await
        .unwrap();

    let recent = calc.recent_calculations(10).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].shape_type, ShapeKind::Circle);
    assert_eq!(recent[0].parameters.get("radius"), Some(&2.0));
    assert_eq!(recent[1].shape_type, ShapeKind::Triangle);
    assert_eq!(recent[2].parameters.get("radius"), Some(&1.0));

    // Ids reflect insertion order and are never reused.
    assert!(recent[0].id > recent[1].id);
    assert!(recent[1].id > recent[2].id);
}

#[tokio::test]
async fn statistics_reflect_current_store_state() {
    let (_repo, calc) = setup();

    assert!(calc
        .statistics_for(ShapeKind::Circle)
        .await
        .unwrap()
        .is_none());

    calc.compute_and_record(ShapeKind::Circle, &[2.0])
        .await
        .unwrap();
    let first = calc
        .statistics_for(ShapeKind::Circle)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.count, 1);

    // Not cached: a second write shifts the averages immediately.
    calc.compute_and_record(ShapeKind::Circle, &[4.0])
        .await
        .unwrap();
    let second = calc
        .statistics_for(ShapeKind::Circle)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.count, 2);
    assert!(second.avg_surface > first.avg_surface);
}

#[tokio::test]
async fn aggregate_of_other_kind_stays_empty() {
    let (_repo, calc) = setup();
    calc.compute_and_record(ShapeKind::Circle, &[2.0])
        .await
        .unwrap();

    assert!(calc
        .statistics_for(ShapeKind::Triangle)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn repository_trait_object_supports_all_operations() {
    let repo: Arc<dyn CalculationRepository> = Arc::new(LocalRepository::new());
    assert!(repo.health_check().await.unwrap());

    let calc = GeometryCalculator::new(repo);
    calc.compute_and_record(ShapeKind::Triangle, &[6.0, 8.0, 10.0])
        .await
        .unwrap();

    let stats = calc
        .statistics_for(ShapeKind::Triangle)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stats.count, 1);
    assert!((stats.avg_surface - 24.0).abs() < 1e-9);
    assert!((stats.avg_circumference - 24.0).abs() < 1e-9);
}
