use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use triad::{Board, MatchState, Outcome, Owner, Score, TurnReport};

/// Writes one JSON file per game into a directory, named `game_000001.json` etc.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    turns: Vec<RecordedTurn>,
}

/// What one player did on their turn. `placed` is empty when they passed.
#[derive(Clone, Debug, Serialize)]
pub struct RecordedTurn {
    pub player: String,
    pub side: Owner,
    pub placed: Option<TurnReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecordedPlayer {
    pub name: String,
    pub side: Owner,
}

#[derive(Debug, Serialize)]
pub struct GameRecording<'a> {
    pub players: Vec<RecordedPlayer>,
    pub turns: &'a [RecordedTurn],
    pub final_board: &'a Board,
    pub score: Score,
    pub outcome: Option<Outcome>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            turns: Vec::new(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn store_turn(&mut self, player: &str, side: Owner, placed: Option<TurnReport>) {
        self.turns.push(RecordedTurn {
            player: String::from(player),
            side,
            placed,
        });
    }

    /// Forgets the turns of a game that won't be written, e.g. one aborted by an illegal move.
    pub fn discard_game(&mut self) {
        self.turns.clear();
    }

    /// Writes the stored turns and the final state, and starts a new game.
    pub fn write_game_recording(
        &mut self,
        players: Vec<RecordedPlayer>,
        state: &MatchState,
    ) -> anyhow::Result<PathBuf> {
        let turns = std::mem::take(&mut self.turns);
        let recording = GameRecording {
            players,
            turns: &turns,
            final_board: state.board(),
            score: state.score(),
            outcome: state.outcome(),
        };
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use triad::{card, Move};

    use super::*;

    #[test]
    fn missing_directory() {
        let dir = std::env::temp_dir().join("triad-judge-does-not-exist");
        assert!(Recorder::new(dir).is_err());
    }

    #[test]
    fn writes_numbered_files() {
        let dir = std::env::temp_dir().join(format!("triad-judge-recording-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut recorder = Recorder::new(dir.clone()).unwrap();

        let mut state = MatchState::new(vec![card!("p1", [5, 7, 3, 2])], vec![]);
        let report = state
            .play(
                Owner::Player,
                Move {
                    card_index: 0,
                    cell: 4,
                },
            )
            .unwrap();
        recorder.store_turn("greedy", Owner::Player, Some(report));
        recorder.store_turn("random", Owner::Opponent, None);
        let players = vec![
            RecordedPlayer {
                name: String::from("greedy"),
                side: Owner::Player,
            },
            RecordedPlayer {
                name: String::from("random"),
                side: Owner::Opponent,
            },
        ];
        let first = recorder.write_game_recording(players.clone(), &state).unwrap();
        let second = recorder.write_game_recording(players, &state).unwrap();
        assert_eq!(first, dir.join("game_000001.json"));
        assert_eq!(second, dir.join("game_000002.json"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(json["turns"].as_array().unwrap().len(), 2);
        assert_eq!(json["turns"][0]["placed"]["hero_id"], "p1");
        assert!(json["turns"][1]["placed"].is_null());
        assert_eq!(json["score"]["player"], 1);
        assert_eq!(json["outcome"], "player_wins");
        // The second file has no turns left over from the first
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert!(json["turns"].as_array().unwrap().is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
