use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use ratatui::crossterm::event::KeyCode;
use tracing::{debug, info};
use triad::{neighbors, Direction, Match, Owner, Phase, Roster};

/// How long the opponent "thinks" before its move shows up.
pub const OPPONENT_DELAY: Duration = Duration::from_millis(450);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectCard(usize),
    CycleSelection,
    MoveCursor(Direction),
    Place,
    NewMatch,
    Quit,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let action = match code {
            KeyCode::Char(c @ '1'..='5') => Action::SelectCard(c as usize - '1' as usize),
            KeyCode::Tab => Action::CycleSelection,
            KeyCode::Up => Action::MoveCursor(Direction::North),
            KeyCode::Right => Action::MoveCursor(Direction::East),
            KeyCode::Down => Action::MoveCursor(Direction::South),
            KeyCode::Left => Action::MoveCursor(Direction::West),
            KeyCode::Enter | KeyCode::Char(' ') => Action::Place,
            KeyCode::Char('n') => Action::NewMatch,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => return None,
        };
        Some(action)
    }
}

pub struct App {
    game: Match,
    roster: Roster,
    rng: StdRng,
    /// The board cell Enter places on.
    pub cursor: usize,
    /// Why the last action was refused, cleared by the next accepted one.
    pub error: Option<String>,
    opponent_due: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(roster: Roster, mut rng: StdRng) -> anyhow::Result<Self> {
        let game = Match::deal(&roster, &mut rng)?;
        Ok(Self {
            game,
            roster,
            rng,
            cursor: 4,
            error: None,
            opponent_due: None,
            should_quit: false,
        })
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Whether the opponent's move is scheduled but not played yet.
    pub fn opponent_thinking(&self) -> bool {
        self.opponent_due.is_some()
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        if let Some(action) = Action::from_key(code) {
            self.apply(action, now);
        }
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        let result = match action {
            Action::SelectCard(card_index) => self.select(card_index),
            Action::CycleSelection => {
                let hand_len = self.game.state().hand(Owner::Player).len();
                let next = match self.game.phase() {
                    Phase::AwaitingPlayerPlacement { card_index } => card_index + 1,
                    _ => 0,
                };
                self.select(if hand_len == 0 { 0 } else { next % hand_len })
            }
            Action::MoveCursor(dir) => {
                if let Some((_, cell)) = neighbors(self.cursor).find(|(d, _)| *d == dir) {
                    self.cursor = cell;
                }
                Ok(())
            }
            Action::Place => self.place(now),
            Action::NewMatch => self.new_match(),
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
        };
        match result {
            Ok(()) => self.error = None,
            Err(err) => {
                debug!(?action, %err, "Action refused");
                self.error = Some(err);
            }
        }
    }

    fn select(&mut self, card_index: usize) -> Result<(), String> {
        let hero_id = match self.game.state().hand(Owner::Player).get(card_index) {
            Some(card) => card.hero.id.clone(),
            None => return Err(format!("There is no card {} in your hand", card_index + 1)),
        };
        self.game.select_card(&hero_id).map_err(|err| err.to_string())
    }

    fn place(&mut self, now: Instant) -> Result<(), String> {
        let report = self
            .game
            .place_selected(self.cursor)
            .map_err(|err| err.to_string())?;
        info!(hero = %report.hero_id, cell = report.cell, flips = report.flips(), "Player placed");
        self.schedule_opponent(now);
        Ok(())
    }

    fn new_match(&mut self) -> Result<(), String> {
        self.game
            .reset(&self.roster, &mut self.rng)
            .map_err(|err| err.to_string())?;
        self.opponent_due = None;
        self.cursor = 4;
        info!("New match");
        Ok(())
    }

    fn schedule_opponent(&mut self, now: Instant) {
        self.opponent_due =
            (self.game.phase() == Phase::AwaitingOpponentMove).then(|| now + OPPONENT_DELAY);
    }

    /// Plays the opponent's move once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let Some(due) = self.opponent_due else {
            return;
        };
        if now < due {
            return;
        }
        self.opponent_due = None;
        match self.game.play_opponent_turn() {
            Ok(Some(report)) => {
                info!(hero = %report.hero_id, cell = report.cell, flips = report.flips(), "Opponent placed")
            }
            Ok(None) => info!("Opponent had no move"),
            Err(err) => self.error = Some(err.to_string()),
        }
        // The player may have had to sit out, handing the turn straight back
        self.schedule_opponent(now);
        if let Phase::MatchOver(outcome) = self.game.phase() {
            info!(%outcome, "Match over");
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn app() -> App {
        App::new(Roster::builtin(), StdRng::seed_from_u64(21)).unwrap()
    }

    #[test]
    fn keys() {
        assert_eq!(
            Action::from_key(KeyCode::Char('1')),
            Some(Action::SelectCard(0))
        );
        assert_eq!(
            Action::from_key(KeyCode::Char('5')),
            Some(Action::SelectCard(4))
        );
        assert_eq!(Action::from_key(KeyCode::Char('6')), None);
        assert_eq!(
            Action::from_key(KeyCode::Left),
            Some(Action::MoveCursor(Direction::West))
        );
        assert_eq!(Action::from_key(KeyCode::Char(' ')), Some(Action::Place));
        assert_eq!(Action::from_key(KeyCode::Esc), Some(Action::Quit));
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Action::MoveCursor(Direction::North), now);
        assert_eq!(app.cursor, 1);
        app.apply(Action::MoveCursor(Direction::North), now);
        assert_eq!(app.cursor, 1);
        app.apply(Action::MoveCursor(Direction::West), now);
        assert_eq!(app.cursor, 0);
        app.apply(Action::MoveCursor(Direction::West), now);
        assert_eq!(app.cursor, 0);
        app.apply(Action::MoveCursor(Direction::South), now);
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn opponent_waits_for_its_delay() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Action::Place, now);
        assert!(app.error.is_some(), "placing without a selection is refused");

        app.handle_key(KeyCode::Char('2'), now);
        assert_eq!(app.error, None);
        assert_eq!(
            app.game().phase(),
            Phase::AwaitingPlayerPlacement { card_index: 1 }
        );
        app.handle_key(KeyCode::Enter, now);
        assert_eq!(app.error, None);
        assert!(app.game().state().board().get(4).is_some());
        assert!(app.opponent_thinking());

        app.tick(now + OPPONENT_DELAY / 2);
        assert_eq!(app.game().phase(), Phase::AwaitingOpponentMove);
        app.tick(now + OPPONENT_DELAY);
        assert!(!app.opponent_thinking());
        assert_eq!(app.game().phase(), Phase::AwaitingPlayerSelection);
        assert_eq!(app.game().state().board().empty_cells().len(), 7);
    }

    #[test]
    fn cycling_wraps_around() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Action::CycleSelection, now);
        assert_eq!(
            app.game().phase(),
            Phase::AwaitingPlayerPlacement { card_index: 0 }
        );
        app.apply(Action::SelectCard(4), now);
        app.apply(Action::CycleSelection, now);
        assert_eq!(
            app.game().phase(),
            Phase::AwaitingPlayerPlacement { card_index: 0 }
        );
    }

    #[test]
    fn new_match_and_quit() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Action::SelectCard(0), now);
        app.apply(Action::Place, now);
        app.apply(Action::NewMatch, now);
        assert!(!app.opponent_thinking());
        assert_eq!(app.game().state().board().empty_cells().len(), 9);
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'), now);
        assert!(app.should_quit);
    }
}
