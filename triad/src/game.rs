use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    choose_opponent_move, generate_card, place_card, Board, Card, Hero, IllegalMove, Move, Owner,
    RosterError, Score, TurnReport,
};

/// Cards per hand at the start of a match.
pub const HAND_SIZE: usize = 5;

/// How a finished match ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Draw,
}

impl Outcome {
    pub fn from_score(score: Score) -> Self {
        match score.player.cmp(&score.opponent) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(self) -> Option<Owner> {
        match self {
            Outcome::PlayerWins => Some(Owner::Player),
            Outcome::OpponentWins => Some(Owner::Opponent),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::PlayerWins => write!(f, "You win!"),
            Outcome::OpponentWins => write!(f, "AI wins!"),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// The complete state of one match: board, both hands and whose turn it is.
///
/// All changes go through [`Self::play()`] and [`Self::pass()`], which validate
/// the move first and leave the state untouched when it is illegal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    board: Board,
    player_hand: Vec<Card>,
    opponent_hand: Vec<Card>,
    turn: Owner,
}

impl MatchState {
    /// A match on an empty board where the player moves first.
    pub fn new(player_hand: Vec<Card>, opponent_hand: Vec<Card>) -> Self {
        Self {
            board: Board::new(),
            player_hand,
            opponent_hand,
            turn: Owner::Player,
        }
    }

    /// Shuffles the roster, draws ten heroes and deals the first five to the
    /// player and the next five to the opponent.
    pub fn deal<R: Rng + ?Sized>(roster: &[Hero], rng: &mut R) -> Result<Self, RosterError> {
        let needed = 2 * HAND_SIZE;
        if roster.len() < needed {
            return Err(RosterError::TooFewHeroes {
                needed,
                available: roster.len(),
            });
        }
        let mut pool: Vec<&Hero> = roster.iter().collect();
        pool.shuffle(rng);
        let mut cards: Vec<Card> = pool[..needed].iter().map(|hero| generate_card(hero)).collect();
        let opponent_hand = cards.split_off(HAND_SIZE);
        Ok(Self::new(cards, opponent_hand))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self, owner: Owner) -> &[Card] {
        match owner {
            Owner::Player => &self.player_hand,
            Owner::Opponent => &self.opponent_hand,
        }
    }

    fn hand_mut(&mut self, owner: Owner) -> &mut Vec<Card> {
        match owner {
            Owner::Player => &mut self.player_hand,
            Owner::Opponent => &mut self.opponent_hand,
        }
    }

    pub fn turn(&self) -> Owner {
        self.turn
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// The match ends when the board is full or neither side has a card left.
    pub fn is_over(&self) -> bool {
        self.board.is_full() || (self.player_hand.is_empty() && self.opponent_hand.is_empty())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over().then(|| Outcome::from_score(self.score()))
    }

    fn check_can_act(&self, mover: Owner) -> Result<(), IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::MatchOver);
        }
        if self.turn != mover {
            return Err(IllegalMove::NotYourTurn { mover });
        }
        Ok(())
    }

    /// Places a card from `mover`'s hand, resolves captures and hands the turn over.
    pub fn play(&mut self, mover: Owner, mv: Move) -> Result<TurnReport, IllegalMove> {
        self.check_can_act(mover)?;
        let card = self
            .hand(mover)
            .get(mv.card_index)
            .ok_or(IllegalMove::CardNotInHand {
                card_index: mv.card_index,
            })?;
        let placement = place_card(&self.board, mv.cell, mover, card)
            .map_err(|err| IllegalMove::IllegalPlacement { cell: mv.cell, err })?;

        let card = self.hand_mut(mover).remove(mv.card_index);
        self.board = placement.board;
        self.turn = mover.other();
        debug!(
            %mover,
            hero = %card.hero.id,
            cell = mv.cell,
            flips = placement.flipped.len(),
            "Card placed"
        );
        Ok(TurnReport {
            mover,
            hero_id: card.hero.id,
            cell: mv.cell,
            flipped: placement.flipped,
        })
    }

    /// Gives the turn to the other side. Only allowed with an empty hand.
    pub fn pass(&mut self, mover: Owner) -> Result<(), IllegalMove> {
        self.check_can_act(mover)?;
        if !self.hand(mover).is_empty() {
            return Err(IllegalMove::PassWithCardsInHand { mover });
        }
        debug!(%mover, "Passed");
        self.turn = mover.other();
        Ok(())
    }

    /// Lets the automated opponent take its turn.
    ///
    /// Returns `None` when the opponent has no move, in which case the turn
    /// goes back to the player without anything being placed.
    pub fn play_opponent_turn(&mut self) -> Result<Option<TurnReport>, IllegalMove> {
        self.check_can_act(Owner::Opponent)?;
        match choose_opponent_move(&self.board, &self.opponent_hand) {
            Some(mv) => self.play(Owner::Opponent, mv).map(Some),
            None => {
                debug!("Opponent has no move");
                self.turn = Owner::Player;
                Ok(None)
            }
        }
    }
}
