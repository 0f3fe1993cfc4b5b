//! Show command - print a saved game snapshot
//!
//! Boards are laid out the way they sit on the table: White's home pair
//! (0, 1) on top, Black's home pair (2, 3) below.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use shobu_core::{AllBoards, Board, BoardColor, Content, GameState, Pos, BOARD_SIZE};

#[derive(Args)]
pub struct ShowArgs {
    /// Snapshot file (`{"currentTurn": ..., "boards": ...}`)
    pub file: PathBuf,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let state = GameState::load(&args.file)?;
    tracing::debug!(file = %args.file.display(), "snapshot loaded");

    print!("{}", render_boards(&state.boards));
    match state.winner() {
        Some(winner) => println!("Winner: {:?}", winner),
        None => println!("To move: {:?}", state.current_turn),
    }
    Ok(())
}

fn tile_char(content: Content) -> char {
    match content {
        Content::Empty => '.',
        Content::Black => 'B',
        Content::White => 'W',
    }
}

fn board_row(board: &Board, y: i8) -> String {
    (0..BOARD_SIZE)
        .filter_map(|x| board.get(Pos::new(x, y)))
        .map(tile_char)
        .collect()
}

fn board_label(index: usize) -> String {
    let color = match BoardColor::of(index) {
        BoardColor::Dark => "dark",
        BoardColor::Light => "light",
    };
    format!("{index} {color:<5}")
}

/// Text rendering of all four boards in two pairs
pub fn render_boards(boards: &AllBoards) -> String {
    let mut out = String::new();

    for pair in [[0, 1], [2, 3]] {
        out.push_str(&format!("{}   {}\n", board_label(pair[0]), board_label(pair[1])));
        for y in 0..BOARD_SIZE {
            let rows: Vec<String> = pair
                .iter()
                .filter_map(|&index| boards.board(index))
                .map(|board| board_row(board, y))
                .collect();
            out.push_str(&format!("{}\n", rows.join("      ")));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_starting_layout() {
        let text = render_boards(&AllBoards::starting());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "0 dark    1 light");
        assert_eq!(lines[1], "WWWW      WWWW");
        assert_eq!(lines[2], "....      ....");
        assert_eq!(lines[4], "BBBB      BBBB");
        assert_eq!(lines[6], "2 dark    3 light");
    }

    #[test]
    fn test_run_reads_snapshot() {
        let path = std::env::temp_dir().join(format!("shobu-show-{}.json", std::process::id()));
        GameState::new().save(&path).unwrap();
        assert!(run(ShowArgs { file: path.clone() }).is_ok());
        std::fs::remove_file(&path).unwrap();

        assert!(run(ShowArgs { file: path }).is_err());
    }
}
