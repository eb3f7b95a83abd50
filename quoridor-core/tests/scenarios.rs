//! Scripted games
//!
//! Loads action sequences from `tests/data/scenarios.json` and checks each
//! step's outcome and the final state of the game.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quoridor_core::{Action, Coord, Game, Player};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TestData {
    version: String,
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    steps: Vec<Step>,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct Step {
    player: Player,
    action: String,
    accepted: bool,
}

#[derive(Debug, Deserialize)]
struct Expect {
    turn: Player,
    positions: [[i32; 2]; 2],
    fences_left: [u8; 2],
    winner: Option<Player>,
    #[serde(default)]
    vertical: Vec<[i32; 2]>,
    #[serde(default)]
    horizontal: Vec<[i32; 2]>,
}

fn coords(pairs: &[[i32; 2]]) -> Vec<Coord> {
    pairs.iter().map(|&[x, y]| Coord::new(x, y)).collect()
}

fn load_scenarios() -> TestData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/scenarios.json");
    let file = File::open(&path).expect("Failed to open scenarios file");
    serde_json::from_reader(BufReader::new(file)).expect("Failed to parse JSON")
}

#[test]
fn test_scripted_scenarios() {
    let data = load_scenarios();
    assert!(!data.scenarios.is_empty());

    for scenario in &data.scenarios {
        let mut game = Game::new();

        for (i, step) in scenario.steps.iter().enumerate() {
            let action: Action = step
                .action
                .parse()
                .unwrap_or_else(|e| panic!("{}: step {}: {}", scenario.description, i + 1, e));
            let before = game.clone();
            let result = game.apply(step.player, action);

            assert_eq!(
                result.is_ok(),
                step.accepted,
                "{}: step {} ({}) gave {:?}",
                scenario.description,
                i + 1,
                step.action,
                result
            );
            if !step.accepted {
                assert_eq!(game, before, "{}: rejected step {} mutated state", scenario.description, i + 1);
            }
        }

        let expect = &scenario.expect;
        assert_eq!(game.turn(), expect.turn, "{}: turn", scenario.description);
        assert_eq!(game.winner(), expect.winner, "{}: winner", scenario.description);
        for player in Player::all() {
            let [x, y] = expect.positions[player.index()];
            assert_eq!(game.position(player), Coord::new(x, y), "{}: position", scenario.description);
            assert_eq!(
                game.fences_left(player),
                expect.fences_left[player.index()],
                "{}: fences",
                scenario.description
            );
        }
        assert_eq!(game.vertical_fences(), coords(&expect.vertical).as_slice());
        assert_eq!(game.horizontal_fences(), coords(&expect.horizontal).as_slice());
    }
}
