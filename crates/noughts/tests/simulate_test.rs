//! Tests for batch simulation and match configuration together.

use noughts::{MatchArgs, MatchConfig, Tally, simulate};
use noughts_core::PlayerKind;
use std::io::Write;

const COMPUTERS_CONFIG: &str = r#"
games = 12
seed = 21

[player_one]
kind = "computer"
strength = 0

[player_two]
kind = "computer"
strength = 4
"#;

fn simulate_config(config: &MatchConfig) -> anyhow::Result<Tally> {
    let mut rng = config.rng();
    simulate(
        *config.player_one(),
        *config.player_two(),
        *config.games(),
        &mut rng,
    )
}

#[test]
fn test_simulate_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(COMPUTERS_CONFIG.as_bytes()).unwrap();

    let args = MatchArgs {
        config: Some(file.path().to_path_buf()),
        ..MatchArgs::default()
    };
    let config = args.resolve(None).unwrap();
    let tally = simulate_config(&config).unwrap();

    assert_eq!(tally.games, 12);
    assert_eq!(tally.o_wins, 0, "random play beat full search: {tally}");
    assert_eq!(tally.x_wins + tally.draws, 12);
}

#[test]
fn test_default_match_cannot_be_simulated() {
    let config = MatchArgs::default().resolve(Some(1)).unwrap();
    assert_eq!(config.player_one(), &PlayerKind::Human);
    assert!(simulate_config(&config).is_err());
}

#[test]
fn test_tally_json_shape() {
    let args = MatchArgs {
        one: Some("computer:1".parse().unwrap()),
        two: Some("computer:1".parse().unwrap()),
        seed: Some(3),
        ..MatchArgs::default()
    };
    let config = args.resolve(Some(5)).unwrap();
    let tally = simulate_config(&config).unwrap();
    let json = serde_json::to_value(tally).unwrap();

    assert_eq!(json["games"], 5);
    let total: u64 = ["o_wins", "x_wins", "draws"]
        .iter()
        .map(|key| json[*key].as_u64().unwrap())
        .sum();
    assert_eq!(total, 5);
}
