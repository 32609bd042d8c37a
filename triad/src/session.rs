use rand::Rng;
use tracing::debug;

use crate::{Hero, IllegalMove, MatchState, Move, Outcome, Owner, RosterError, TurnReport};

/// Where an interactive match currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player has to pick a card from their hand.
    AwaitingPlayerSelection,
    /// The player picked the card at this hand index and has to pick a cell.
    AwaitingPlayerPlacement { card_index: usize },
    /// The automated opponent moves next.
    AwaitingOpponentMove,
    MatchOver(Outcome),
}

/// A match between a human player and the automated opponent, driven by a UI.
///
/// The player first selects a card by hero id, then places it. Placing resolves
/// the move and hands the turn to the opponent, whose move the UI triggers with
/// [`Self::play_opponent_turn()`] (after whatever delay it likes).
#[derive(Clone, Debug)]
pub struct Match {
    state: MatchState,
    selected_hero: Option<String>,
    last_message: String,
}

impl Match {
    pub fn new(state: MatchState) -> Self {
        Self {
            state,
            selected_hero: None,
            last_message: String::from("Pick a card, then place it on the board."),
        }
    }

    pub fn deal<R: Rng + ?Sized>(roster: &[Hero], rng: &mut R) -> Result<Self, RosterError> {
        Ok(Self::new(MatchState::deal(roster, rng)?))
    }

    /// Discards the current match and deals a new one.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        roster: &[Hero],
        rng: &mut R,
    ) -> Result<(), RosterError> {
        *self = Self::deal(roster, rng)?;
        self.last_message = String::from("New match! Pick a card, then place it on the board.");
        debug!("New match");
        Ok(())
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if let Some(outcome) = self.state.outcome() {
            return Phase::MatchOver(outcome);
        }
        match self.state.turn() {
            Owner::Opponent => Phase::AwaitingOpponentMove,
            Owner::Player => match self.selected_card_index() {
                Some(card_index) => Phase::AwaitingPlayerPlacement { card_index },
                None => Phase::AwaitingPlayerSelection,
            },
        }
    }

    /// The hero id of the selected card, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected_hero.as_deref()
    }

    /// The result once the match is over, otherwise feedback on the last action.
    pub fn status(&self) -> String {
        match self.state.outcome() {
            Some(outcome) => {
                let score = self.state.score();
                format!(
                    "{} Final: You {} · AI {}",
                    outcome, score.player, score.opponent
                )
            }
            None => self.last_message.clone(),
        }
    }

    fn selected_card_index(&self) -> Option<usize> {
        let hero_id = self.selected_hero.as_deref()?;
        self.state
            .hand(Owner::Player)
            .iter()
            .position(|card| card.hero.id == hero_id)
    }

    fn check_player_turn(&self) -> Result<(), IllegalMove> {
        if self.state.is_over() {
            return Err(IllegalMove::MatchOver);
        }
        if self.state.turn() != Owner::Player {
            return Err(IllegalMove::NotYourTurn {
                mover: Owner::Player,
            });
        }
        Ok(())
    }

    /// Selects the card of the given hero from the player's hand.
    pub fn select_card(&mut self, hero_id: &str) -> Result<(), IllegalMove> {
        self.check_player_turn()?;
        if !self
            .state
            .hand(Owner::Player)
            .iter()
            .any(|card| card.hero.id == hero_id)
        {
            return Err(IllegalMove::UnknownCard {
                hero_id: String::from(hero_id),
            });
        }
        self.selected_hero = Some(String::from(hero_id));
        self.last_message = String::from("Now pick a board tile.");
        Ok(())
    }

    /// Places the selected card on `cell`.
    ///
    /// On an illegal placement the selection is kept, so the player can pick
    /// another cell.
    pub fn place_selected(&mut self, cell: usize) -> Result<TurnReport, IllegalMove> {
        self.check_player_turn()?;
        let hero_id = self
            .selected_hero
            .clone()
            .ok_or(IllegalMove::NoCardSelected)?;
        let Some(card_index) = self.selected_card_index() else {
            self.selected_hero = None;
            return Err(IllegalMove::UnknownCard { hero_id });
        };

        let report = self.state.play(Owner::Player, Move { card_index, cell })?;
        self.selected_hero = None;
        self.last_message = report.to_string();
        self.skip_turn_without_cards()?;
        Ok(report)
    }

    /// Lets the automated opponent move.
    pub fn play_opponent_turn(&mut self) -> Result<Option<TurnReport>, IllegalMove> {
        let report = self.state.play_opponent_turn()?;
        if let Some(report) = &report {
            self.last_message = report.to_string();
        }
        self.skip_turn_without_cards()?;
        Ok(report)
    }

    // A side that has run out of cards while the other still has some sits out.
    fn skip_turn_without_cards(&mut self) -> Result<(), IllegalMove> {
        let turn = self.state.turn();
        if !self.state.is_over() && self.state.hand(turn).is_empty() {
            self.state.pass(turn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{card, Roster};

    fn scripted() -> Match {
        Match::new(MatchState::new(
            vec![card!("p1", [5, 7, 3, 2]), card!("p2", [1, 2, 3, 4])],
            vec![card!("o1", [1, 1, 2, 1]), card!("o2", [2, 2, 2, 1])],
        ))
    }

    #[test]
    fn select_then_place() {
        let mut game = scripted();
        assert_eq!(game.phase(), Phase::AwaitingPlayerSelection);
        assert_eq!(game.place_selected(4), Err(IllegalMove::NoCardSelected));

        game.select_card("p2").unwrap();
        assert_eq!(game.selected(), Some("p2"));
        assert_eq!(
            game.phase(),
            Phase::AwaitingPlayerPlacement { card_index: 1 }
        );
        game.select_card("p1").unwrap();
        assert_eq!(
            game.phase(),
            Phase::AwaitingPlayerPlacement { card_index: 0 }
        );

        let report = game.place_selected(4).unwrap();
        assert_eq!(report.hero_id, "p1");
        assert_eq!(game.selected(), None);
        assert_eq!(game.phase(), Phase::AwaitingOpponentMove);
        assert_eq!(game.status(), "No flips.");
    }

    #[test]
    fn guards() {
        let mut game = scripted();
        assert_eq!(
            game.select_card("o1"),
            Err(IllegalMove::UnknownCard {
                hero_id: String::from("o1")
            })
        );
        game.select_card("p1").unwrap();
        game.place_selected(4).unwrap();
        assert_eq!(
            game.select_card("p2"),
            Err(IllegalMove::NotYourTurn {
                mover: Owner::Player
            })
        );
        assert_eq!(
            game.place_selected(0),
            Err(IllegalMove::NotYourTurn {
                mover: Owner::Player
            })
        );

        game.play_opponent_turn().unwrap();
        game.select_card("p2").unwrap();
        let occupied = game.place_selected(4).unwrap_err();
        assert!(matches!(
            occupied,
            IllegalMove::IllegalPlacement { cell: 4, .. }
        ));
        // The selection survives an illegal cell
        assert_eq!(game.selected(), Some("p2"));
    }

    #[test]
    fn opponent_reply_and_feedback() {
        let mut game = scripted();
        game.select_card("p2").unwrap();
        game.place_selected(8).unwrap();
        // o1's south side beats p2's north side from cell 5
        let reply = game.play_opponent_turn().unwrap().unwrap();
        assert_eq!(reply.cell, 5);
        assert_eq!(reply.flips(), 1);
        assert_eq!(game.status(), "AI flipped 1.");
        assert_eq!(game.phase(), Phase::AwaitingPlayerSelection);
    }

    #[test]
    fn plays_to_the_end() {
        let mut game = scripted();
        game.select_card("p1").unwrap();
        game.place_selected(0).unwrap();
        game.play_opponent_turn().unwrap();
        game.select_card("p2").unwrap();
        let free_cell = game.state().board().empty_cells().into_iter().next().unwrap();
        game.place_selected(free_cell).unwrap();
        game.play_opponent_turn().unwrap();

        let Phase::MatchOver(outcome) = game.phase() else {
            panic!("expected the match to be over, got {:?}", game.phase());
        };
        assert_eq!(outcome, Outcome::from_score(game.state().score()));
        assert!(game.status().starts_with(&outcome.to_string()));
        assert_eq!(game.select_card("p1"), Err(IllegalMove::MatchOver));
        assert_eq!(game.play_opponent_turn(), Err(IllegalMove::MatchOver));
    }

    #[test]
    fn player_without_cards_sits_out() {
        let mut game = Match::new(MatchState::new(
            vec![card!("p1", [5, 5, 5, 4])],
            vec![
                card!("o1", [5, 5, 5, 4]),
                card!("o2", [5, 5, 5, 4]),
                card!("o3", [5, 5, 5, 4]),
            ],
        ));
        game.select_card("p1").unwrap();
        game.place_selected(0).unwrap();
        game.play_opponent_turn().unwrap();
        assert_eq!(game.phase(), Phase::AwaitingOpponentMove);
        game.play_opponent_turn().unwrap();
        game.play_opponent_turn().unwrap();
        assert!(matches!(game.phase(), Phase::MatchOver(_)));
    }

    #[test]
    fn reset_deals_a_fresh_match() {
        let roster = Roster::builtin();
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Match::deal(&roster, &mut rng).unwrap();
        let first_hand = game.state().hand(Owner::Player)[0].hero.id.clone();
        game.select_card(&first_hand).unwrap();
        game.place_selected(4).unwrap();

        game.reset(&roster, &mut rng).unwrap();
        assert_eq!(game.state().board().empty_cells().len(), 9);
        assert_eq!(game.selected(), None);
        assert_eq!(game.phase(), Phase::AwaitingPlayerSelection);
        assert!(game.status().starts_with("New match!"));
    }
}
