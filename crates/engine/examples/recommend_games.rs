//! Fit a session on a small play-history dataset and print recommendations
//! with their explanations.
//!
//! Run with: cargo run --example recommend_games

use anyhow::Result;
use game_guide_core::observability::{init_logging, LogConfig};
use game_guide_engine::{AlsConfig, RawRecord, RecommenderSession, SessionConfig};

fn main() -> Result<()> {
    init_logging(&LogConfig::default())?;

    let records: Vec<RawRecord> = vec![
        ("alice", "Dota 2", 312.0).into(),
        ("alice", "Portal 2", 14.5).into(),
        ("alice", "Team Fortress 2", 92.0).into(),
        ("bob", "Dota 2", 48.0).into(),
        ("bob", "Counter-Strike", 260.0).into(),
        ("bob", "Team Fortress 2", 30.0).into(),
        ("carol", "Portal 2", 9.0).into(),
        ("carol", "The Witness", 21.0).into(),
        ("dave", "Counter-Strike", 410.0).into(),
        ("dave", "The Witness", 3.5).into(),
    ];

    let session = RecommenderSession::fit(
        records,
        AlsConfig {
            factors: 8,
            iterations: 15,
            ..AlsConfig::default()
        },
        SessionConfig {
            recommendations: 3,
            explanation_breadth: None,
        },
    )?;

    for user_id in ["alice", "bob", "carol", "dave"] {
        let user = match session.user_index(user_id) {
            Some(index) => index,
            None => continue,
        };

        println!("Recommendations for {}:", user_id);
        for recommendation in session.recommend_with_explanations(user)? {
            println!(
                "  {} (score {:.3})",
                recommendation.item_id, recommendation.score
            );
            for history_match in &recommendation.based_on {
                println!(
                    "    because you played {} (similarity {:.3})",
                    history_match.item_id, history_match.weight
                );
            }
        }
        println!();
    }

    Ok(())
}
