//! Full pipeline scenario tests
//!
//! Exercises indexing, matrix construction, fitting, recommendation, and
//! explanation together on small hand-checked datasets.

use crate::als::{AlsConfig, AlsModel};
use crate::explain::ExplainRecommendation;
use crate::interactions::{index_records, RawRecord};
use crate::matrix::InteractionMatrix;
use crate::recommend::TopKRecommendations;
use crate::session::{RecommenderSession, SessionConfig};
use game_guide_core::GameGuideError;

/// Two users, three items: u0 played i0 (5h) and i1 (2h), u1 played i0 (1h)
/// and i2 (9h).
fn scenario_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("u0", "i0", 5.0),
        RawRecord::new("u0", "i1", 2.0),
        RawRecord::new("u1", "i0", 1.0),
        RawRecord::new("u1", "i2", 9.0),
    ]
}

fn scenario_config() -> AlsConfig {
    AlsConfig {
        factors: 2,
        regularization: 0.01,
        iterations: 5,
        random_seed: 42,
        alpha_scale: 1.0,
    }
}

#[test]
fn test_scenario_recommends_the_single_unseen_item() {
    let set = index_records(scenario_records()).unwrap();
    let matrix = InteractionMatrix::from_interactions(&set);
    let mut model = AlsModel::new(scenario_config());
    model.fit(&matrix).unwrap();

    let u0 = set.user_index("u0").unwrap();
    let recommendations = TopKRecommendations::execute(&model, &matrix, u0, 1).unwrap();

    // i0 and i1 are seen, so the one recommendation must be i2
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].item, set.item_index("i2").unwrap());
}

#[test]
fn test_scenario_explanation_stays_within_history() {
    let set = index_records(scenario_records()).unwrap();
    let matrix = InteractionMatrix::from_interactions(&set);
    let mut model = AlsModel::new(scenario_config());
    model.fit(&matrix).unwrap();

    let u0 = set.user_index("u0").unwrap();
    let i2 = set.item_index("i2").unwrap();
    let entries = ExplainRecommendation::execute(&model, &matrix, u0, i2, 1).unwrap();

    assert_eq!(entries.len(), 1);
    let history: Vec<usize> = [
        set.item_index("i0").unwrap(),
        set.item_index("i1").unwrap(),
    ]
    .to_vec();
    assert!(history.contains(&entries[0].contributing));
}

#[test]
fn test_pipeline_is_deterministic_end_to_end() {
    let run = || {
        let session = RecommenderSession::fit(
            scenario_records(),
            scenario_config(),
            SessionConfig::default(),
        )
        .unwrap();
        let u1 = session.user_index("u1").unwrap();
        session.recommend_with_explanations(u1).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_recommendations_exclude_entire_interaction_set() {
    // A denser dataset where every user has seen several items
    let records = vec![
        RawRecord::new("alice", "dota", 40.0),
        RawRecord::new("alice", "portal", 12.0),
        RawRecord::new("alice", "skyrim", 80.0),
        RawRecord::new("bob", "dota", 5.0),
        RawRecord::new("bob", "factorio", 200.0),
        RawRecord::new("carol", "portal", 3.0),
        RawRecord::new("carol", "factorio", 30.0),
        RawRecord::new("carol", "skyrim", 11.0),
    ];

    let session = RecommenderSession::fit(
        records,
        AlsConfig {
            factors: 3,
            regularization: 0.05,
            iterations: 8,
            random_seed: 1,
            alpha_scale: 1.0,
        },
        SessionConfig::default(),
    )
    .unwrap();

    for user_id in ["alice", "bob", "carol"] {
        let user = session.user_index(user_id).unwrap();
        let seen: Vec<usize> = session
            .play_history(user)
            .unwrap()
            .into_iter()
            .map(|record| record.item)
            .collect();

        let recommendations = session.recommend(user, 10).unwrap();
        assert_eq!(recommendations.len(), session.num_items() - seen.len());
        for scored in &recommendations {
            assert!(!seen.contains(&scored.item));
        }
    }
}

#[test]
fn test_input_order_does_not_change_results() {
    let forward = RecommenderSession::fit(
        scenario_records(),
        scenario_config(),
        SessionConfig::default(),
    )
    .unwrap();

    let mut reversed_records = scenario_records();
    reversed_records.reverse();
    let reversed = RecommenderSession::fit(
        reversed_records,
        scenario_config(),
        SessionConfig::default(),
    )
    .unwrap();

    let u0_forward = forward.user_index("u0").unwrap();
    let u0_reversed = reversed.user_index("u0").unwrap();
    assert_eq!(
        forward.recommend(u0_forward, 3).unwrap(),
        reversed.recommend(u0_reversed, 3).unwrap()
    );
}

#[test]
fn test_invalid_factors_fails_before_fitting() {
    let result = RecommenderSession::fit(
        scenario_records(),
        AlsConfig {
            factors: 0,
            ..scenario_config()
        },
        SessionConfig::default(),
    );

    match result {
        Err(GameGuideError::InvalidConfig { field, .. }) => assert_eq!(field, "factors"),
        other => panic!("Expected InvalidConfig, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_dataset_propagates() {
    let result = RecommenderSession::fit(
        Vec::new(),
        scenario_config(),
        SessionConfig::default(),
    );
    assert!(matches!(result, Err(GameGuideError::EmptyDataset)));
}

#[test]
fn test_duplicate_records_aggregate_like_hours_totals() {
    // Splitting alice's 40 dota hours into three sessions must not change
    // anything downstream.
    let split = vec![
        RawRecord::new("alice", "dota", 10.0),
        RawRecord::new("alice", "dota", 25.0),
        RawRecord::new("alice", "dota", 5.0),
        RawRecord::new("alice", "portal", 2.0),
        RawRecord::new("bob", "portal", 9.0),
    ];
    let combined = vec![
        RawRecord::new("alice", "dota", 40.0),
        RawRecord::new("alice", "portal", 2.0),
        RawRecord::new("bob", "portal", 9.0),
    ];

    let config = scenario_config();
    let split_session =
        RecommenderSession::fit(split, config.clone(), SessionConfig::default()).unwrap();
    let combined_session =
        RecommenderSession::fit(combined, config, SessionConfig::default()).unwrap();

    let alice_split = split_session.user_index("alice").unwrap();
    let alice_combined = combined_session.user_index("alice").unwrap();
    assert_eq!(
        split_session.play_history(alice_split).unwrap(),
        combined_session.play_history(alice_combined).unwrap()
    );
    assert_eq!(
        split_session.recommend(alice_split, 5).unwrap(),
        combined_session.recommend(alice_combined, 5).unwrap()
    );
}
