// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, game_config, trie};
use board::Direction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub row: i8,
    pub col: i8,
    pub direction: Direction,
    // 0 = played through, t = rack tile t, 0x80|t = blank as t.
    pub word: Box<[u8]>,
    pub score: i32,
}

impl Move {
    #[inline(always)]
    pub fn num_played(&self) -> usize {
        self.word.iter().filter(|&&tile| tile != 0).count()
    }

    pub fn rack_tiles(&self) -> impl Iterator<Item = u8> + '_ {
        board::rack_tiles_of(&self.word)
    }

    pub fn fmt<'a, 'b>(&'a self, board: &'a board::Board<'b>) -> WriteableMove<'a, 'b> {
        WriteableMove { mv: self, board }
    }
}

pub struct WriteableMove<'a, 'b> {
    mv: &'a Move,
    board: &'a board::Board<'b>,
}

// 8H CAT(S) 6. Across plays lead with the row, down plays with the column.
// Letters already on the board are parenthesized.
impl std::fmt::Display for WriteableMove<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mv = self.mv;
        let col_label = ((mv.col as u8) + 0x41) as char;
        match mv.direction {
            Direction::Across => write!(f, "{}{} ", mv.row + 1, col_label)?,
            Direction::Down => write!(f, "{}{} ", col_label, mv.row + 1)?,
        }
        let alphabet = self.board.game_config().alphabet();
        let dim = self.board.dim();
        let mut inside = false;
        for (i, &tile) in (0i8..).zip(mv.word.iter()) {
            let (r, c) = match mv.direction {
                Direction::Across => (mv.row, mv.col + i),
                Direction::Down => (mv.row + i, mv.col),
            };
            let shown = if tile == 0 {
                if !inside {
                    f.write_str("(")?;
                    inside = true;
                }
                if dim.contains(r, c) {
                    self.board.tile_at(r, c)
                } else {
                    0
                }
            } else {
                if inside {
                    f.write_str(")")?;
                    inside = false;
                }
                tile
            };
            f.write_str(alphabet.from_board(shown).unwrap_or("."))?;
        }
        if inside {
            f.write_str(")")?;
        }
        write!(f, " {}", mv.score)
    }
}

// longest first, then reverse lexicographic within a length.
fn candidate_order(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    b.len().cmp(&a.len()).then_with(|| b.cmp(a))
}

// what is left of rack after forming word, real tiles before blanks.
fn leave_after(rack: &[u8], word: &[u8]) -> Option<Vec<u8>> {
    let mut leave = rack.to_vec();
    for &letter in word {
        let pos = leave
            .iter()
            .rposition(|&t| t == letter & 0x7f)
            .or_else(|| leave.iter().rposition(|&t| t == 0))?;
        leave.swap_remove(pos);
    }
    Some(leave)
}

struct Search<'s> {
    trie: &'s trie::Trie,
    rack_tally: &'s mut [u8],
    word: &'s mut Vec<u8>,
    fixed: &'s [Option<u8>],
    max_len: usize,
    min_len: usize,
    num_played: usize,
    collect_prefixes: bool,
    found: &'s mut Vec<Box<[u8]>>,
}

// Backtracking over the rack. Each step either lays down the board tiles
// pinned at the current length or tries one more rack tile; a failed trie
// seek means no word has this prefix and the whole branch is dropped.
fn walk(s: &mut Search, mut p: u32) {
    let base_len = s.word.len();
    while let Some(&Some(tile)) = s.fixed.get(s.word.len()) {
        match s.trie.seek(p, tile) {
            Some(q) => {
                p = q;
                s.word.push(tile & 0x7f);
            }
            None => {
                s.word.truncate(base_len);
                return;
            }
        }
    }
    if s.num_played > 0 {
        if s.collect_prefixes {
            s.found.push(s.word.clone().into_boxed_slice());
        } else if s.word.len() >= s.min_len && s.trie.accepts(p) {
            s.found.push(s.word.clone().into_boxed_slice());
        }
    }
    if s.word.len() < s.max_len {
        for tile in 1..s.rack_tally.len() as u8 {
            let Some(q) = s.trie.seek(p, tile) else {
                continue;
            };
            let used = if s.rack_tally[tile as usize] > 0 {
                tile as usize
            } else if s.rack_tally[0] > 0 {
                0
            } else {
                continue;
            };
            s.rack_tally[used] -= 1;
            s.num_played += 1;
            s.word.push(tile);
            walk(s, q);
            s.word.pop();
            s.num_played -= 1;
            s.rack_tally[used] += 1;
        }
    }
    s.word.truncate(base_len);
}

pub struct MoveFinder<'a> {
    game_config: &'a game_config::GameConfig,
    trie: &'a trie::Trie,
    rack_tally: Box<[u8]>,
    word_buffer: Vec<u8>,
    pub moves: Vec<Move>,
}

impl<'a> MoveFinder<'a> {
    pub fn new(game_config: &'a game_config::GameConfig, trie: &'a trie::Trie) -> Self {
        Self {
            game_config,
            trie,
            rack_tally: vec![0u8; game_config.alphabet().len() as usize].into_boxed_slice(),
            word_buffer: Vec::new(),
            moves: Vec::new(),
        }
    }

    fn search(
        &mut self,
        rack: &[u8],
        prefix: &[u8],
        fixed: &[Option<u8>],
        max_len: usize,
        min_len: usize,
        collect_prefixes: bool,
    ) -> Vec<Box<[u8]>> {
        let mut found = Vec::new();
        self.rack_tally.iter_mut().for_each(|m| *m = 0);
        for &tile in rack {
            if let Some(count) = self.rack_tally.get_mut(tile as usize) {
                *count += 1;
            }
        }
        let mut p = trie::Trie::ROOT;
        self.word_buffer.clear();
        for &tile in prefix {
            match self.trie.seek(p, tile) {
                Some(q) => p = q,
                None => return found,
            }
            self.word_buffer.push(tile & 0x7f);
        }
        walk(
            &mut Search {
                trie: self.trie,
                rack_tally: &mut self.rack_tally,
                word: &mut self.word_buffer,
                fixed,
                max_len,
                min_len,
                num_played: prefix.len(),
                collect_prefixes,
                found: &mut found,
            },
            p,
        );
        found
    }

    // Words spelled from prefix plus rack tiles, with fixed[i] pinning the
    // board tile at offset i. A non-empty fixed also bounds the word length
    // and the word must reach its first pinned tile. prefix tiles are assumed
    // to be already out of the rack.
    pub fn enumerate_words(
        &mut self,
        rack: &[u8],
        prefix: &[u8],
        fixed: &[Option<u8>],
    ) -> Vec<Box<[u8]>> {
        let (max_len, min_len) = if fixed.is_empty() {
            (prefix.len() + rack.len(), 1)
        } else {
            (
                fixed.len(),
                fixed.iter().position(Option::is_some).map_or(1, |f| f + 1),
            )
        };
        let mut words = self.search(rack, prefix, fixed, max_len, min_len, false);
        words.sort_unstable_by(|a, b| candidate_order(a, b));
        words.dedup();
        words
    }

    // every non-empty string of rack tiles that some word starts with.
    pub fn enumerate_prefixes(&mut self, rack: &[u8]) -> Vec<Box<[u8]>> {
        let mut prefixes = self.search(rack, &[], &[], rack.len(), 1, true);
        prefixes.sort_unstable();
        prefixes.dedup();
        prefixes
    }

    fn try_candidate(
        &self,
        board: &board::Board,
        rack: &[u8],
        row: i8,
        col: i8,
        direction: Direction,
        word: &[u8],
        out: &mut Vec<Move>,
    ) {
        if !board.can_play(row, col, word, direction) {
            return;
        }
        let turn = board.turn_score(self.trie, row, col, word, direction, rack);
        if turn.score > 0 {
            out.push(Move {
                row,
                col,
                direction,
                word: turn.word,
                score: turn.score,
            });
        }
    }

    // Fills self.moves with every scoring move, in enumeration order.
    fn gen_moves(&mut self, board: &board::Board, rack: &[u8]) {
        let mut moves = std::mem::take(&mut self.moves);
        moves.clear();
        if rack.is_empty() {
            self.moves = moves;
            return;
        }
        let rack_words = self.enumerate_words(rack, &[], &[]);
        let board_layout = self.game_config.board_layout();

        if board.is_first_move() {
            let row = board_layout.star_row();
            let star_col = board_layout.star_col();
            for word in rack_words.iter() {
                for col in (star_col - (word.len() as i8 - 1)).max(0)..=star_col {
                    self.try_candidate(board, rack, row, col, Direction::Across, word, &mut moves);
                }
            }
            self.moves = moves;
            return;
        }

        let prefixes = self.enumerate_prefixes(rack);
        let mut prefixes_by_len = vec![Vec::new(); rack.len() + 1];
        for prefix in prefixes.iter() {
            prefixes_by_len[prefix.len()].push(prefix);
        }

        let dim = board.dim();
        let tiles = board.tiles();
        let anchors = board.anchors();
        let mut fixed = Vec::new();
        let mut candidates = Vec::<Box<[u8]>>::new();
        for direction in Direction::BOTH {
            for lane in 0..dim.num_lanes(direction.is_down()) {
                let strider = dim.lane(direction.is_down(), lane);
                let len = strider.len() as usize;
                if !(0..strider.len()).any(|i| anchors[strider.at(i)]) {
                    continue;
                }
                for start in 0..len {
                    if start > 0 && tiles[strider.at(start as i8 - 1)] != 0 {
                        continue;
                    }
                    let Some(first_anchor) =
                        (start..len).find(|&i| anchors[strider.at(i as i8)])
                    else {
                        break;
                    };
                    if first_anchor - start >= rack.len() {
                        continue;
                    }
                    fixed.clear();
                    fixed.extend((start..len).map(|i| {
                        let b = tiles[strider.at(i as i8)];
                        if b != 0 { Some(b) } else { None }
                    }));
                    let first_fixed = fixed.iter().position(Option::is_some);

                    candidates.clear();
                    // through the first tile in the window
                    match first_fixed {
                        Some(0) => {
                            candidates.extend(self.enumerate_words(rack, &[], &fixed));
                        }
                        Some(f) if f <= rack.len() => {
                            for prefix in prefixes_by_len[f].iter() {
                                if let Some(leave) = leave_after(rack, prefix) {
                                    candidates.extend(self.enumerate_words(&leave, prefix, &fixed));
                                }
                            }
                        }
                        _ => {}
                    }
                    // stopping short of it, or in a lane with no tiles yet
                    let room = first_fixed.map_or(fixed.len(), |f| f.saturating_sub(1));
                    let min_len = first_anchor - start + 1;
                    candidates.extend(
                        rack_words
                            .iter()
                            .filter(|word| word.len() >= min_len && word.len() <= room)
                            .cloned(),
                    );
                    candidates.sort_unstable_by(|a, b| candidate_order(a, b));
                    candidates.dedup();

                    let (row, col) = if direction.is_down() {
                        (start as i8, lane)
                    } else {
                        (lane, start as i8)
                    };
                    for word in candidates.iter() {
                        self.try_candidate(board, rack, row, col, direction, word, &mut moves);
                    }
                }
            }
        }
        self.moves = moves;
    }

    // Every scoring move, best first. Equal scores keep enumeration order.
    pub fn find_all_moves(&mut self, board: &board::Board, rack: &[u8]) -> &[Move] {
        self.gen_moves(board, rack);
        self.moves.sort_by(|a, b| b.score.cmp(&a.score));
        log::debug!("found {} moves", self.moves.len());
        &self.moves
    }

    // The first move in enumeration order with the strictly highest score.
    pub fn find_best_move(&mut self, board: &board::Board, rack: &[u8]) -> Option<Move> {
        self.gen_moves(board, rack);
        let mut best: Option<&Move> = None;
        for mv in self.moves.iter() {
            if best.is_none_or(|b| mv.score > b.score) {
                best = Some(mv);
            }
        }
        best.cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{trie_of, w};

    fn words_of(words: &[Box<[u8]>]) -> Vec<String> {
        let alphabet = crate::alphabet::make_english_alphabet();
        words.iter().map(|word| alphabet.fmt_word(word)).collect()
    }

    #[test]
    fn words_from_rack_in_candidate_order() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nACT\nAT\nTA\nCATS\nDOG");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let words = finder.enumerate_words(&w("CAT"), &[], &[]);
        assert_eq!(words_of(&words), vec!["CAT", "ACT", "TA", "AT"]);
    }

    #[test]
    fn blank_branches_into_every_letter() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nACT\nAT\nTA\nCOT");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let words = finder.enumerate_words(&[3, 0, 20], &[], &[]);
        assert_eq!(words_of(&words), vec!["COT", "CAT", "ACT", "TA", "AT"]);
    }

    #[test]
    fn repeated_tiles_do_not_repeat_words() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("AA\nA");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let words = finder.enumerate_words(&w("AAA"), &[], &[]);
        assert_eq!(words_of(&words), vec!["AA", "A"]);
    }

    #[test]
    fn fixed_tiles_are_threaded_through() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nCATS\nSCAT\nSCATS");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let c = Some(3u8);
        let a = Some(1u8);
        let t = Some(20u8);
        // board has CAT at offsets 1..4 of the window.
        let fixed = [None, c, a, t, None, None];
        let words = finder.enumerate_words(&w("SS"), &[], &fixed);
        assert_eq!(words_of(&words), vec!["SCATS", "SCAT"]);
        // starting on the C itself, a rack tile must still be used.
        let words = finder.enumerate_words(&w("S"), &[], &fixed[1..]);
        assert_eq!(words_of(&words), vec!["CATS"]);
    }

    #[test]
    fn prefix_continues_search() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nCATS\nCAB");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let words = finder.enumerate_words(&w("TS"), &w("CA"), &[]);
        assert_eq!(words_of(&words), vec!["CATS", "CAT"]);
    }

    #[test]
    fn prefixes_cover_every_valid_start() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nACT\nTAX");
        let mut finder = MoveFinder::new(&game_config, &trie);
        let prefixes = finder.enumerate_prefixes(&w("CAT"));
        assert_eq!(
            words_of(&prefixes),
            vec!["A", "AC", "ACT", "C", "CA", "CAT", "T", "TA"]
        );
    }

    #[test]
    fn leave_prefers_real_tiles() {
        assert_eq!(leave_after(&[1, 0, 3], &[1]), Some(vec![3, 0]));
        assert_eq!(leave_after(&[1, 0, 3], &[5]), Some(vec![1, 3]));
        assert_eq!(leave_after(&[1, 3], &[5]), None);
    }

    #[test]
    fn first_move_goes_through_center() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT");
        let board = board::Board::new(&game_config);
        let mut finder = MoveFinder::new(&game_config, &trie);
        let rack = w("CATXXXX");
        let best = finder.find_best_move(&board, &rack).unwrap();
        assert_eq!(best.row, 7);
        assert_eq!(best.col, 5);
        assert_eq!(best.direction, Direction::Across);
        assert_eq!(&best.word[..], &w("CAT")[..]);
        // C=3 A=1 T=1, doubled by the center square.
        assert_eq!(best.score, 2 * (3 + 1 + 1));
        assert_eq!(best.fmt(&board).to_string(), "8F CAT 10");
        let all = finder.find_all_moves(&board, &rack);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], best);
    }

    #[test]
    fn extends_existing_word() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nCATS");
        let mut board = board::Board::new(&game_config);
        assert!(board.place_tiles(7, 7, &w("CAT"), Direction::Across));
        let mut finder = MoveFinder::new(&game_config, &trie);
        let best = finder.find_best_move(&board, &w("S")).unwrap();
        assert_eq!((best.row, best.col, best.direction), (7, 7, Direction::Across));
        assert_eq!(&best.word[..], &[0, 0, 0, 19]);
        assert_eq!(best.score, 6);
        assert_eq!(best.fmt(&board).to_string(), "8H (CAT)S 6");
    }

    #[test]
    fn finds_parallel_and_perpendicular_plays() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nAT\nTA\nAA\nCAB");
        let mut board = board::Board::new(&game_config);
        assert!(board.place_tiles(7, 7, &w("CAT"), Direction::Across));
        let mut finder = MoveFinder::new(&game_config, &trie);
        let moves = finder.find_all_moves(&board, &w("A")).to_vec();
        assert!(!moves.is_empty());
        for mv in moves.iter() {
            assert!(mv.score > 0);
            assert_eq!(mv.num_played(), 1);
        }
        // "AA" down from the A, and "TA" down from the T.
        assert!(moves.iter().any(|mv| mv.direction == Direction::Down
            && (mv.row, mv.col) == (7, 8)
            && &mv.word[..] == &[0, 1]));
        assert!(moves.iter().any(|mv| mv.direction == Direction::Down
            && (mv.row, mv.col) == (7, 9)
            && &mv.word[..] == &[0, 1]));
        for pair in moves.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn never_offers_invalid_cross_words() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nAT\nTA");
        let mut board = board::Board::new(&game_config);
        assert!(board.place_tiles(7, 7, &w("CAT"), Direction::Across));
        let mut finder = MoveFinder::new(&game_config, &trie);
        let rack = w("AT");
        let moves = finder.find_all_moves(&board, &rack).to_vec();
        for mv in moves.iter() {
            let mut after = board.clone();
            assert!(after.place_tiles(mv.row, mv.col, &mv.word, mv.direction));
            // rescoring the same placement on the old board agrees.
            let letters = mv
                .word
                .iter()
                .enumerate()
                .map(|(i, &t)| {
                    if t != 0 {
                        t
                    } else {
                        match mv.direction {
                            Direction::Across => board.tile_at(mv.row, mv.col + i as i8),
                            Direction::Down => board.tile_at(mv.row + i as i8, mv.col),
                        }
                    }
                })
                .collect::<Vec<_>>();
            let turn = board.turn_score(&trie, mv.row, mv.col, &letters, mv.direction, &rack);
            assert_eq!(turn.score, mv.score);
        }
    }

    #[test]
    fn search_is_deterministic() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT\nACT\nAT\nTA\nCATS\nSCAT\nTACT\nACTS");
        let mut board = board::Board::new(&game_config);
        assert!(board.place_tiles(7, 6, &w("ACT"), Direction::Across));
        let mut finder = MoveFinder::new(&game_config, &trie);
        let rack = w("SCATT?");
        let first = finder.find_all_moves(&board, &rack).to_vec();
        let second = finder.find_all_moves(&board, &rack).to_vec();
        assert_eq!(first, second);
        assert_eq!(finder.find_best_move(&board, &rack), first.first().cloned());
    }

    #[test]
    fn empty_rack_has_no_moves() {
        let game_config = game_config::make_english_game_config();
        let trie = trie_of("CAT");
        let board = board::Board::new(&game_config);
        let mut finder = MoveFinder::new(&game_config, &trie);
        assert_eq!(finder.find_best_move(&board, &[]), None);
    }
}
