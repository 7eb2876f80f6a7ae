// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_config, matrix, trie};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[inline(always)]
    pub fn is_down(self) -> bool {
        self == Direction::Down
    }

    #[inline(always)]
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    pub const BOTH: [Direction; 2] = [Direction::Across, Direction::Down];
}

impl std::str::FromStr for Direction {
    type Err = error::MyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "across" => Ok(Direction::Across),
            "down" => Ok(Direction::Down),
            _ => Err(error::new(format!(
                "invalid direction {s:?}, must be \"across\" or \"down\""
            ))),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Across => "across",
            Direction::Down => "down",
        })
    }
}

// Per-cell multipliers along a footprint. A cell already holding a tile
// contributes 1 to both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Multipliers {
    pub letter_multipliers: Vec<i8>,
    pub word_multipliers: Vec<i8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnScore {
    pub score: i32,
    // 0 = already on the board, t = rack tile t, 0x80|t = blank as t.
    pub word: Box<[u8]>,
}

impl TurnScore {
    fn rejected() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn num_played(&self) -> usize {
        self.word.iter().filter(|&&tile| tile != 0).count()
    }

    // tiles leaving the rack, blanks as 0.
    pub fn rack_tiles(&self) -> impl Iterator<Item = u8> + '_ {
        rack_tiles_of(&self.word)
    }
}

pub fn rack_tiles_of(word: &[u8]) -> impl Iterator<Item = u8> + '_ {
    word.iter().filter_map(|&tile| {
        if tile == 0 {
            None
        } else if tile & 0x80 != 0 {
            Some(0)
        } else {
            Some(tile)
        }
    })
}

// Sum of face value times letter multiplier, times the product of word
// multipliers. None when the lists disagree in length with the word.
pub fn calculate_word_score(
    game_config: &game_config::GameConfig,
    tiles: &[u8],
    letter_multipliers: &[i8],
    word_multipliers: &[i8],
) -> Option<i32> {
    if tiles.len() != letter_multipliers.len() || tiles.len() != word_multipliers.len() {
        log::error!(
            "invalid letters/multipliers input: {} tiles, {} letter multipliers, {} word multipliers",
            tiles.len(),
            letter_multipliers.len(),
            word_multipliers.len()
        );
        return None;
    }
    let alphabet = game_config.alphabet();
    let score = tiles
        .iter()
        .zip(letter_multipliers)
        .map(|(&tile, &m)| alphabet.score(tile) as i32 * m as i32)
        .sum::<i32>();
    let word_multiplier = word_multipliers.iter().map(|&m| m as i32).product::<i32>();
    Some(score * word_multiplier)
}

#[derive(Clone)]
pub struct Board<'a> {
    game_config: &'a game_config::GameConfig,
    tiles: Box<[u8]>,
    anchors: Box<[bool]>,
    is_first_move: bool,
}

impl<'a> Board<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let board_layout = game_config.board_layout();
        let dim = board_layout.dim();
        let mut anchors = vec![false; dim.area()].into_boxed_slice();
        anchors[dim.at_row_col(board_layout.star_row(), board_layout.star_col())] = true;
        Self {
            game_config,
            tiles: vec![0u8; dim.area()].into_boxed_slice(),
            anchors,
            is_first_move: true,
        }
    }

    #[inline(always)]
    pub fn game_config(&self) -> &'a game_config::GameConfig {
        self.game_config
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.game_config.board_layout().dim()
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[inline(always)]
    pub fn tile_at(&self, row: i8, col: i8) -> u8 {
        self.tiles[self.dim().at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn is_anchor(&self, row: i8, col: i8) -> bool {
        self.anchors[self.dim().at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn anchors(&self) -> &[bool] {
        &self.anchors
    }

    #[inline(always)]
    pub fn is_first_move(&self) -> bool {
        self.is_first_move
    }

    // (strider, position of the first letter within it), or None if the
    // lane itself is off the board.
    #[inline(always)]
    pub fn strider_for(
        &self,
        row: i8,
        col: i8,
        direction: Direction,
    ) -> Option<(matrix::Strider, i8)> {
        let dim = self.dim();
        let (lane, idx) = match direction {
            Direction::Across => (row, col),
            Direction::Down => (col, row),
        };
        if lane < 0 || lane >= dim.num_lanes(direction.is_down()) {
            return None;
        }
        Some((dim.lane(direction.is_down(), lane), idx))
    }

    pub fn multipliers_for(
        &self,
        row: i8,
        col: i8,
        word: &[u8],
        direction: Direction,
    ) -> Option<Multipliers> {
        let (strider, idx) = self.strider_for(row, col, direction)?;
        if !strider.fits(idx, word.len()) {
            return None;
        }
        let premiums = self.game_config.board_layout().premiums();
        let mut multipliers = Multipliers {
            letter_multipliers: Vec::with_capacity(word.len()),
            word_multipliers: Vec::with_capacity(word.len()),
        };
        for i in (idx..).take(word.len()) {
            let at = strider.at(i);
            if self.tiles[at] == 0 {
                multipliers
                    .letter_multipliers
                    .push(premiums[at].letter_multiplier);
                multipliers.word_multipliers.push(premiums[at].word_multiplier);
            } else {
                multipliers.letter_multipliers.push(1);
                multipliers.word_multipliers.push(1);
            }
        }
        Some(multipliers)
    }

    // The footprint must stay on the board, agree with the tiles it covers
    // (a 0 in word requires a tile there), and not abut a tile at either end.
    // The first move must cover the star; later moves must cover an anchor.
    pub fn can_play(&self, row: i8, col: i8, word: &[u8], direction: Direction) -> bool {
        let Some((strider, idx)) = self.strider_for(row, col, direction) else {
            return false;
        };
        if word.is_empty() || !strider.fits(idx, word.len()) {
            return false;
        }
        let end = idx + word.len() as i8;
        if idx > 0 && self.tiles[strider.at(idx - 1)] != 0 {
            return false;
        }
        if end < strider.len() && self.tiles[strider.at(end)] != 0 {
            return false;
        }
        let board_layout = self.game_config.board_layout();
        let star = self
            .dim()
            .at_row_col(board_layout.star_row(), board_layout.star_col());
        let mut touches = false;
        for (i, &tile) in (idx..).zip(word.iter()) {
            let at = strider.at(i);
            let b = self.tiles[at];
            if b != 0 {
                if tile != 0 && (tile & 0x7f) != (b & 0x7f) {
                    return false;
                }
            } else if tile == 0 {
                return false;
            }
            touches |= if self.is_first_move {
                at == star
            } else {
                self.anchors[at]
            };
        }
        touches
    }

    // Resolves letters against the rack and scores the turn. letters may be
    // plain letters, 0x80|t to force a blank, or 0 for a tile already there.
    // Any invalid word formed (main or perpendicular) rejects the whole turn,
    // as does a turn that places nothing: both yield a zero score.
    pub fn turn_score(
        &self,
        trie: &trie::Trie,
        row: i8,
        col: i8,
        letters: &[u8],
        direction: Direction,
        rack: &[u8],
    ) -> TurnScore {
        let alphabet = self.game_config.alphabet();
        let Some((strider, idx)) = self.strider_for(row, col, direction) else {
            return TurnScore::rejected();
        };
        if letters.is_empty() || !strider.fits(idx, letters.len()) {
            return TurnScore::rejected();
        }
        let end = idx + letters.len() as i8;
        if (idx > 0 && self.tiles[strider.at(idx - 1)] != 0)
            || (end < strider.len() && self.tiles[strider.at(end)] != 0)
        {
            return TurnScore::rejected();
        }

        let mut rack_tally = vec![0u8; alphabet.len() as usize];
        for &tile in rack {
            if let Some(count) = rack_tally.get_mut(tile as usize) {
                *count += 1;
            }
        }
        let mut word = Vec::with_capacity(letters.len());
        let mut placed = Vec::with_capacity(letters.len());
        for (i, &letter) in (idx..).zip(letters.iter()) {
            let b = self.tiles[strider.at(i)];
            if b != 0 {
                if letter != 0 && (letter & 0x7f) != (b & 0x7f) {
                    return TurnScore::rejected();
                }
                word.push(0);
                placed.push(b);
                continue;
            }
            let t = letter & 0x7f;
            if t == 0 || t >= alphabet.len() {
                return TurnScore::rejected();
            }
            let resolved = if letter & 0x80 == 0 && rack_tally[t as usize] > 0 {
                rack_tally[t as usize] -= 1;
                t
            } else if rack_tally[0] > 0 {
                rack_tally[0] -= 1;
                t | 0x80
            } else {
                return TurnScore::rejected();
            };
            word.push(resolved);
            placed.push(resolved);
        }
        let num_played = word.iter().filter(|&&tile| tile != 0).count();
        if num_played == 0 {
            return TurnScore::rejected();
        }
        if !trie.contains(&placed) {
            return TurnScore::rejected();
        }

        let Some(multipliers) = self.multipliers_for(row, col, letters, direction) else {
            return TurnScore::rejected();
        };
        let Some(mut score) = calculate_word_score(
            self.game_config,
            &placed,
            &multipliers.letter_multipliers,
            &multipliers.word_multipliers,
        ) else {
            return TurnScore::rejected();
        };

        let premiums = self.game_config.board_layout().premiums();
        let dim = self.dim();
        let lane = if direction.is_down() { col } else { row };
        let mut cross_tiles = Vec::new();
        let mut cross_letter_multipliers = Vec::new();
        let mut cross_word_multipliers = Vec::new();
        for (i, &tile) in (idx..).zip(word.iter()) {
            if tile == 0 {
                continue;
            }
            let perpendicular_strider = dim.lane(direction.perpendicular().is_down(), i);
            let mut j = lane;
            while j > 0 && self.tiles[perpendicular_strider.at(j - 1)] != 0 {
                j -= 1;
            }
            let mut k = lane + 1;
            while k < perpendicular_strider.len() && self.tiles[perpendicular_strider.at(k)] != 0
            {
                k += 1;
            }
            if k - j < 2 {
                // no perpendicular tile
                continue;
            }
            cross_tiles.clear();
            cross_letter_multipliers.clear();
            cross_word_multipliers.clear();
            for j in j..k {
                let at = perpendicular_strider.at(j);
                if j == lane {
                    cross_tiles.push(tile);
                    cross_letter_multipliers.push(premiums[at].letter_multiplier);
                    cross_word_multipliers.push(premiums[at].word_multiplier);
                } else {
                    cross_tiles.push(self.tiles[at]);
                    cross_letter_multipliers.push(1);
                    cross_word_multipliers.push(1);
                }
            }
            if !trie.contains(&cross_tiles) {
                return TurnScore::rejected();
            }
            match calculate_word_score(
                self.game_config,
                &cross_tiles,
                &cross_letter_multipliers,
                &cross_word_multipliers,
            ) {
                Some(cross_score) => score += cross_score,
                None => return TurnScore::rejected(),
            }
        }

        score += self.game_config.num_played_bonus(num_played as i8) as i32;
        TurnScore {
            score,
            word: word.into_boxed_slice(),
        }
    }

    // Writes the new tiles (cells already holding a tile are left alone) and
    // extends the anchors around the footprint. word is in the move encoding.
    pub fn place_tiles(&mut self, row: i8, col: i8, word: &[u8], direction: Direction) -> bool {
        if !self.can_play(row, col, word, direction) {
            return false;
        }
        let Some((strider, idx)) = self.strider_for(row, col, direction) else {
            return false;
        };
        let dim = self.dim();
        for (i, &tile) in (idx..).zip(word.iter()) {
            let at = strider.at(i);
            if self.tiles[at] == 0 {
                self.tiles[at] = tile;
            }
        }
        for i in (idx..).take(word.len()) {
            let at = strider.at(i);
            self.anchors[at] = true;
            let (r, c) = dim.row_col_of(at);
            for neighbor in dim.neighbors(r, c) {
                if self.tiles[neighbor] == 0 {
                    self.anchors[neighbor] = true;
                }
            }
        }
        self.is_first_move = false;
        true
    }
}
