// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, board_layout, game_state};

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premium_at(row, col);
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "\'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label<'a>(board: &'a board::Board<'a>, row: i8, col: i8) -> &'a str {
    let game_config = board.game_config();
    game_config
        .alphabet()
        .from_board(board.tile_at(row, col))
        .unwrap_or_else(|| empty_label(game_config.board_layout(), row, col))
}

#[inline(always)]
pub fn column(col: i8) -> char {
    ((col as u8) + 0x41) as char
}

fn print_rule(cols: i8) {
    print!("  +");
    for _ in 1..cols {
        print!("--");
    }
    println!("-+");
}

pub fn print_board(board: &board::Board) {
    let dim = board.dim();
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", column(c));
    }
    println!();
    print_rule(dim.cols);
    for r in 0..dim.rows {
        print!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                print!(" ")
            }
            print!("{}", board_label(board, r, c));
        }
        println!("|{}", r + 1);
    }
    print_rule(dim.cols);
}

pub fn print_game_state(game_state: &game_state::GameState) {
    print_board(&game_state.board);
    let alphabet = game_state.game_config().alphabet();
    for (i, player) in game_state.players.iter().enumerate() {
        println!(
            "{} p{}: {:4} {}",
            if i == game_state.turn as usize { ">" } else { " " },
            i + 1,
            player.score,
            alphabet.fmt_rack(&player.rack)
        );
    }
    println!("bag: {} tiles, {:?}", game_state.bag.len(), game_state.phase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, tests::w};
    use crate::game_config;

    #[test]
    fn labels_show_tiles_and_premiums() {
        let game_config = game_config::make_english_game_config();
        let mut board = board::Board::new(&game_config);
        assert_eq!(board_label(&board, 7, 7), "*");
        assert_eq!(board_label(&board, 0, 0), "=");
        assert_eq!(board_label(&board, 1, 1), "-");
        assert_eq!(board_label(&board, 1, 5), "\"");
        assert_eq!(board_label(&board, 0, 3), "\'");
        assert_eq!(board_label(&board, 0, 1), " ");
        let mut word = w("CAT");
        word[1] |= 0x80;
        assert!(board.place_tiles(7, 7, &word, Direction::Across));
        assert_eq!(board_label(&board, 7, 7), "C");
        assert_eq!(board_label(&board, 7, 8), "a");
        assert_eq!(column(14), 'O');
    }
}
