use crate::{Board, Card, Direction, Owner, BOARD_SIZE};

const CELL_WIDTH: usize = 9;

fn border(left: char, middle: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for col in 0..BOARD_SIZE {
        if col > 0 {
            line.push(middle);
        }
        line.push_str(&"─".repeat(CELL_WIDTH));
    }
    line.push(right);
    line
}

fn owner_marker(owner: Owner) -> &'static str {
    match owner {
        Owner::Player => "P",
        Owner::Opponent => "O",
    }
}

/// The three text lines of one cell: north side, west/owner/east, south side.
fn cell_lines(board: &Board, cell: usize) -> [String; 3] {
    match board.get(cell) {
        Some(slot) => {
            let side = |dir| slot.card.side(dir);
            [
                format!("{:^9}", side(Direction::North)),
                format!(
                    "{} {:^5} {}",
                    side(Direction::West),
                    owner_marker(slot.owner),
                    side(Direction::East)
                ),
                format!("{:^9}", side(Direction::South)),
            ]
        }
        None => [
            " ".repeat(CELL_WIDTH),
            format!("{:^9}", format!("({})", cell)),
            " ".repeat(CELL_WIDTH),
        ],
    }
}

/// Draws the board as a box-drawing grid. Occupied cells show the card's four
/// sides around a `P` or `O` owner marker, empty cells show their index.
pub fn visualize_board(board: &Board) -> String {
    let mut lines = vec![border('╭', '┬', '╮')];
    for row in 0..BOARD_SIZE {
        if row > 0 {
            lines.push(border('├', '┼', '┤'));
        }
        let cells: Vec<[String; 3]> = (0..BOARD_SIZE)
            .map(|col| cell_lines(board, row * BOARD_SIZE + col))
            .collect();
        for i in 0..3 {
            let mut line = String::from("│");
            for cell in &cells {
                line += &cell[i];
                line += "│";
            }
            lines.push(line);
        }
    }
    lines.push(border('╰', '┴', '╯'));
    lines.join("\n")
}

/// One numbered line per card, numbered from 1.
pub fn visualize_hand(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, card)| format!("{}. {}", i + 1, card))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, place_card};

    #[test]
    fn draws_cards_and_empty_cells() {
        let board = place_card(
            &Board::new(),
            0,
            Owner::Player,
            &card!("center", [5, 7, 3, 2]),
        )
        .unwrap()
        .board;
        let board = place_card(&board, 8, Owner::Opponent, &card!("corner", [1, 1, 2, 1]))
            .unwrap()
            .board;

        let drawn = visualize_board(&board);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "╭─────────┬─────────┬─────────╮");
        assert_eq!(lines[1], "│    5    │         │         │");
        assert_eq!(lines[2], "│2   P   7│   (1)   │   (2)   │");
        assert_eq!(lines[3], "│    3    │         │         │");
        assert_eq!(lines[4], "├─────────┼─────────┼─────────┤");
        assert_eq!(lines[10], "│   (6)   │   (7)   │1   O   1│");
        assert_eq!(lines[11], "│         │         │    2    │");
        assert_eq!(lines[12], "╰─────────┴─────────┴─────────╯");
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn numbered_hand() {
        let hand = [card!("a", [1, 2, 3, 4]), card!("b", [5, 6, 7, 8])];
        let drawn = visualize_hand(&hand);
        assert_eq!(drawn.lines().count(), 2);
        assert!(drawn.starts_with("1. "));
        assert!(drawn.lines().nth(1).unwrap().starts_with("2. "));
        assert_eq!(visualize_hand(&[]), "");
    }
}
