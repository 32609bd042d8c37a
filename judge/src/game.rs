use bots::Bot;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};
use triad::{visualize_board, visualize_hand, Hero, IllegalMove, MatchState, Owner};

use crate::recording::{RecordedPlayer, Recorder};

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

/// Deals a match from `roster` and lets the two bots play it out.
///
/// Returns an error only when dealing or recording fails, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    roster: &[Hero],
    player_1: &mut dyn Bot,
    player_2: &mut dyn Bot,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut state = MatchState::deal(roster, rng)?;
    trace!(
        "Dealt hands:\n{}\n--\n{}",
        visualize_hand(state.hand(Owner::Player)),
        visualize_hand(state.hand(Owner::Opponent))
    );

    // Randomly pick who moves first. The side called `Player` always does.
    let sides = {
        let mut arr = [Owner::Player, Owner::Opponent];
        arr.shuffle(rng);
        arr
    };
    let mut players: [&mut dyn Bot; 2] = [player_1, player_2];
    for (player, side) in players.iter_mut().zip(sides) {
        player.new_game(side);
    }
    let idx_of = |side: Owner| if sides[0] == side { 0 } else { 1 };

    while !state.is_over() {
        let side = state.turn();
        let player_idx = idx_of(side);
        let player = &mut players[player_idx];

        if state.hand(side).is_empty() {
            state.pass(side)?;
            if let Some(rec) = recorder {
                rec.store_turn(player.name(), side, None);
            }
            continue;
        }

        let result = match player.play_turn(state.board(), state.hand(side), side) {
            Some(mv) => state.play(side, mv),
            None => Err(IllegalMove::PassWithCardsInHand { mover: side }),
        };
        match result {
            Ok(report) => {
                trace!(player = player.name(), %report, "Turn played");
                if let Some(rec) = recorder {
                    rec.store_turn(player.name(), side, Some(report));
                }
            }
            Err(err) => {
                if let Some(rec) = recorder {
                    rec.discard_game();
                }
                return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
            }
        }
    }
    debug!("Final board:\n{}", visualize_board(state.board()));

    if let Some(rec) = recorder {
        let recorded_players = players
            .iter()
            .zip(sides)
            .map(|(player, side)| RecordedPlayer {
                name: String::from(player.name()),
                side,
            })
            .collect();
        let path = rec.write_game_recording(recorded_players, &state)?;
        trace!(path = %path.display(), "Recorded game");
    }

    let winner = state.outcome().and_then(|outcome| outcome.winner());
    Ok(match winner {
        Some(side) => GameResult::WonByPlayer {
            player_idx: idx_of(side),
        },
        None => GameResult::Tie,
    })
}
