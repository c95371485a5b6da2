use crate::intake::tiers::{BudgetTierClassifier, TierBand, TierTableError};

fn labels_at(classifier: &BudgetTierClassifier, budgets: &[f64]) -> Vec<String> {
    budgets
        .iter()
        .map(|budget| classifier.classify(*budget).label)
        .collect()
}

#[test]
fn bounds_are_lower_inclusive() {
    let classifier = BudgetTierClassifier::standard();
    assert_eq!(
        labels_at(&classifier, &[0.0, 499.99, 500.0, 800.0, 1000.0]),
        [
            "Starter Collaboration",
            "Starter Collaboration",
            "Standard Collaboration",
            "Premium Collaboration",
            "Elite Collaboration",
        ]
    );
}

#[test]
fn minimum_brand_budget_lands_in_lowest_band() {
    let placement = BudgetTierClassifier::standard().classify(300.0);
    assert_eq!(placement.label, "Starter Collaboration");
    assert_eq!(placement.band_index, 0);
    assert!((placement.progress - 15.0).abs() < 1e-9);
}

#[test]
fn progress_is_monotonic_within_each_band() {
    let classifier = BudgetTierClassifier::standard();
    let mut previous = classifier.classify(0.0);
    let mut budget = 0.0;
    while budget <= 2000.0 {
        let current = classifier.classify(budget);
        assert!(
            current.progress >= previous.progress,
            "progress fell at {budget}"
        );
        previous = current;
        budget += 12.5;
    }
}

#[test]
fn progress_is_continuous_at_boundaries() {
    let classifier = BudgetTierClassifier::standard();
    for bound in [500.0, 800.0, 1000.0] {
        let below = classifier.classify(bound - 1e-6).progress;
        let at = classifier.classify(bound).progress;
        assert!((at - below).abs() < 1e-3, "jump at {bound}: {below} -> {at}");
    }
    assert_eq!(classifier.classify(500.0).progress, 25.0);
    assert_eq!(classifier.classify(1000.0).progress, 75.0);
}

#[test]
fn elite_progress_caps_at_the_ceiling() {
    let classifier = BudgetTierClassifier::standard();
    assert!((classifier.classify(1250.0).progress - 87.5).abs() < 1e-9);
    assert_eq!(classifier.classify(1500.0).progress, 100.0);
    assert_eq!(classifier.classify(90_000.0).progress, 100.0);
    assert_eq!(classifier.classify(90_000.0).label, "Elite Collaboration");
}

#[test]
fn budgets_below_first_bound_and_non_finite_input_sit_at_zero() {
    let classifier = BudgetTierClassifier::new(
        vec![TierBand::new(200.0, "Entry"), TierBand::new(600.0, "Pro")],
        900.0,
    )
    .expect("valid table");
    let below = classifier.classify(50.0);
    assert_eq!(below.label, "Entry");
    assert_eq!(below.progress, 0.0);
    assert_eq!(classifier.classify(f64::NAN).progress, 0.0);
}

#[test]
fn rejects_invalid_tables() {
    assert_eq!(
        BudgetTierClassifier::new(Vec::new(), 100.0),
        Err(TierTableError::Empty)
    );
    assert!(matches!(
        BudgetTierClassifier::new(
            vec![TierBand::new(500.0, "B"), TierBand::new(500.0, "C")],
            900.0
        ),
        Err(TierTableError::Unsorted { .. })
    ));
    assert!(matches!(
        BudgetTierClassifier::new(vec![TierBand::new(500.0, "B")], 500.0),
        Err(TierTableError::CeilingTooLow { .. })
    ));
    assert!(matches!(
        BudgetTierClassifier::new(vec![TierBand::new(f64::INFINITY, "B")], 500.0),
        Err(TierTableError::NonFinite { .. })
    ));
}

#[test]
fn parses_configured_band_tables() {
    let bands = BudgetTierClassifier::parse_bands(" 0:Starter , 200:Growth,700:Elite ")
        .expect("well formed");
    assert_eq!(
        bands,
        vec![
            TierBand::new(0.0, "Starter"),
            TierBand::new(200.0, "Growth"),
            TierBand::new(700.0, "Elite"),
        ]
    );
    assert_eq!(
        BudgetTierClassifier::parse_bands("0-Starter"),
        Err(TierTableError::Malformed("0-Starter".to_string()))
    );
    assert!(BudgetTierClassifier::parse_bands("abc:Starter").is_err());
    assert!(BudgetTierClassifier::parse_bands("10:").is_err());
}
