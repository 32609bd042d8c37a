use std::collections::HashMap;
use std::path::PathBuf;

use bots::{Bot, BotKind};
use clap::Parser;
use itertools::Itertools;
use judge::{play_game, GameResult, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use triad::{Hero, Roster};

/// Plays Triple Triad matches between bots and reports the results.
#[derive(Parser)]
struct Args {
    /// The bots to pit against each other, every pair plays a matchup
    #[clap(num_args(2..), value_delimiter = ' ', value_enum)]
    bots: Vec<BotKind>,

    /// How many games to play per matchup
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with the heroes to deal from, instead of the built-in roster
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Stop a matchup as soon as one bot makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record every game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    ties: usize,
}

impl MatchScore {
    fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.ties
    }
}

/// Unique display names, with a suffix for bots that were given more than once.
fn nicknames(bots: &[BotKind]) -> Vec<String> {
    bots.iter()
        .enumerate()
        .map(|(i, kind)| {
            let earlier = bots[..i].iter().filter(|k| *k == kind).count();
            if earlier == 0 {
                kind.to_string()
            } else {
                format!("{}#{}", kind, earlier + 1)
            }
        })
        .collect()
}

fn play_matchup(
    players: [(&str, &mut dyn Bot); 2],
    roster: &[Hero],
    num_games: usize,
    rng: &mut StdRng,
    stop_on_illegal_move: bool,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let [(name_1, player_1), (name_2, player_2)] = players;
    let player_names = [name_1, name_2];
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(rng, roster, player_1, player_2, recorder)? {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = player_names[player_idx], game_idx);
                match_score.wins[player_idx] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = player_names[player_idx],
                    game_idx, "Illegal move by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                if stop_on_illegal_move {
                    break;
                }
                match_score.wins[1 - player_idx] += 1;
                match_score.illegal_moves[player_idx] += 1;
            }
        }
    }

    let illegal_note = |idx: usize| {
        if match_score.illegal_moves[idx] > 0 {
            format!(
                " ({} through illegal moves by {})",
                match_score.illegal_moves[idx], player_names[idx]
            )
        } else {
            String::new()
        }
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} ties",
        match_score.wins[0],
        name_1,
        illegal_note(1),
        match_score.wins[1],
        name_2,
        illegal_note(0),
        match_score.ties
    );

    Ok(match_score)
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    nicknames: &[String],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    let n = nicknames.len();
    println!("\nTournament results (p1 win %, p2 win %, tie %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for nick in nicknames.iter().rev() {
        print!(" {:19} |", nick);
    }
    println!();
    for i in 0..n {
        for _ in 0..n - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", nicknames[i]);
        for j in (0..n).rev() {
            if i >= j {
                print!("    ");
                continue;
            }
            match match_results.get(&(i, j)) {
                Some(score) if score.num_games() > 0 => {
                    let percent = |count: usize| count as f32 / score.num_games() as f32 * 100.0;
                    print!(
                        "{:5.1}% {:5.1}% {:5.1}% |",
                        percent(score.wins[0]),
                        percent(score.wins[1]),
                        percent(score.ties)
                    );
                }
                _ => print!(" {:19} |", "N/A"),
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let roster = Roster::load_or_builtin(args.roster.as_deref())?;
    info!(heroes = roster.len(), "Loaded roster");

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let nicknames = nicknames(&args.bots);
    let matchups: Vec<(usize, usize)> = (0..args.bots.len()).tuple_combinations().collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        info!(p1 = nicknames[i1], p2 = nicknames[i2], "Starting matchup");
        let mut player_1 = args.bots[i1].build(rng.gen());
        let mut player_2 = args.bots[i2].build(rng.gen());

        let match_score = play_matchup(
            [
                (nicknames[i1].as_str(), player_1.as_mut()),
                (nicknames[i2].as_str(), player_2.as_mut()),
            ],
            &roster,
            args.num_games,
            &mut rng,
            args.stop_on_illegal_move,
            &mut recorder,
        )?;

        match_results.insert((i1, i2), match_score);
    }

    if nicknames.len() > 2 {
        print_tournament_results(&nicknames, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_bots_get_numbered() {
        let names = nicknames(&[BotKind::Greedy, BotKind::Random, BotKind::Greedy]);
        assert_eq!(names, vec!["greedy", "random", "greedy#2"]);
    }

    #[test]
    fn cli_parses_bot_names() {
        let args = Args::try_parse_from(["judge", "heuristic", "random", "--seed", "7"]).unwrap();
        assert_eq!(args.bots, vec![BotKind::Heuristic, BotKind::Random]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.num_games, 100);
        assert!(Args::try_parse_from(["judge", "heuristic"]).is_err());
        assert!(Args::try_parse_from(["judge", "heuristic", "nobody"]).is_err());
    }

    #[test]
    fn matchup_counts_every_game() {
        let roster = Roster::builtin();
        let mut rng = StdRng::seed_from_u64(9);
        let mut first = BotKind::Greedy.build(1);
        let mut second = BotKind::Random.build(2);
        let score = play_matchup(
            [("greedy", first.as_mut()), ("random", second.as_mut())],
            &roster,
            12,
            &mut rng,
            false,
            &mut None,
        )
        .unwrap();
        assert_eq!(score.num_games(), 12);
        assert_eq!(score.illegal_moves, [0, 0]);
    }
}
