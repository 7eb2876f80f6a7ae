// Copyright (C) 2020-2024 Andy Kurnia.

use super::error;
use std::collections::HashMap;

pub const BLANK_LABEL: &str = "?";

#[derive(Clone, Debug)]
pub struct Tile {
    label: String,
    blank_label: String,
    freq: u8,
    score: i8,
}

// Tile 0 is always the blank. Letters follow in label order.
#[derive(Clone, Debug)]
pub struct Alphabet {
    tiles: Box<[Tile]>,
    num_tiles: u16,
}

impl Alphabet {
    // distribution maps each label (and "?") to how many are in the bag,
    // points maps each letter to its face value. Totals are not validated.
    pub fn from_tables(
        distribution: &HashMap<String, u8>,
        points: &HashMap<String, i8>,
    ) -> error::Returns<Alphabet> {
        let mut labels = distribution
            .keys()
            .chain(points.keys())
            .filter(|label| label.as_str() != BLANK_LABEL)
            .cloned()
            .collect::<Vec<_>>();
        labels.sort_unstable();
        labels.dedup();
        if labels.len() >= 0x7f {
            return_error!(format!("too many letters ({})", labels.len()));
        }
        let mut tiles = Vec::with_capacity(labels.len() + 1);
        tiles.push(Tile {
            label: BLANK_LABEL.into(),
            blank_label: BLANK_LABEL.into(),
            freq: distribution.get(BLANK_LABEL).copied().unwrap_or(0),
            score: 0,
        });
        for label in labels {
            if label.chars().count() != 1 {
                return_error!(format!("invalid letter {label:?}"));
            }
            let score = match points.get(&label) {
                Some(&score) => score,
                None => {
                    return_error!(format!("no point value for letter {label:?}"));
                }
            };
            tiles.push(Tile {
                blank_label: label.to_lowercase(),
                freq: distribution.get(&label).copied().unwrap_or(0),
                score,
                label,
            });
        }
        let num_tiles = tiles.iter().map(|tile| tile.freq as u16).sum();
        Ok(Alphabet {
            tiles: tiles.into_boxed_slice(),
            num_tiles,
        })
    }

    pub fn from_json_files(distribution_path: &str, points_path: &str) -> error::Returns<Alphabet> {
        let distribution =
            serde_json::from_str::<HashMap<String, u8>>(&std::fs::read_to_string(distribution_path)?)?;
        let points =
            serde_json::from_str::<HashMap<String, i8>>(&std::fs::read_to_string(points_path)?)?;
        Self::from_tables(&distribution, &points)
    }

    // includes the blank.
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.tiles.len() as u8
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        self.num_tiles
    }

    #[inline(always)]
    pub fn freq(&self, tile: u8) -> u8 {
        self.tiles[tile as usize].freq
    }

    // blanks (0 on the rack, 0x80 bit on the board) are worth nothing.
    #[inline(always)]
    pub fn score(&self, tile: u8) -> i8 {
        if tile & 0x80 != 0 {
            0
        } else {
            self.tiles[tile as usize].score
        }
    }

    #[inline(always)]
    pub fn from_board(&self, tile: u8) -> Option<&str> {
        let c = tile & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if tile & 0x80 == 0 {
            Some(&self.tiles[c as usize].label)
        } else {
            Some(&self.tiles[c as usize].blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, tile: u8) -> Option<&str> {
        self.tiles.get(tile as usize).map(|t| t.label.as_str())
    }

    pub fn tile_of(&self, c: char) -> Option<u8> {
        if c == '?' {
            return Some(0);
        }
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        if let Some(pos) = self.tiles[1..].iter().position(|t| t.label == *s) {
            return Some(pos as u8 + 1);
        }
        self.tiles[1..]
            .iter()
            .position(|t| t.blank_label == *s)
            .map(|pos| (pos as u8 + 1) | 0x80)
    }

    // Uppercase letters map to letters. Lowercase letters map to blanks
    // designated as that letter. "?" is an undesignated blank.
    pub fn parse_word(&self, s: &str) -> error::Returns<Vec<u8>> {
        s.chars()
            .map(|c| {
                self.tile_of(c)
                    .ok_or_else(|| error::new(format!("invalid tile {c:?} in {s:?}")).into())
            })
            .collect()
    }

    pub fn parse_rack(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = self.parse_word(s)?;
        for tile in v.iter_mut() {
            if *tile & 0x80 != 0 {
                *tile = 0;
            }
        }
        Ok(v)
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect()
    }

    pub fn fmt_word(&self, word: &[u8]) -> String {
        word.iter()
            .filter_map(|&tile| self.from_board(tile))
            .collect()
    }
}

static ENGLISH_TABLE: &[(&str, u8, i8)] = &[
    ("?", 2, 0),
    ("A", 9, 1),
    ("B", 2, 3),
    ("C", 2, 3),
    ("D", 4, 2),
    ("E", 12, 1),
    ("F", 2, 4),
    ("G", 3, 2),
    ("H", 2, 4),
    ("I", 9, 1),
    ("J", 1, 8),
    ("K", 1, 5),
    ("L", 4, 1),
    ("M", 2, 3),
    ("N", 6, 1),
    ("O", 8, 1),
    ("P", 2, 3),
    ("Q", 1, 10),
    ("R", 6, 1),
    ("S", 4, 1),
    ("T", 6, 1),
    ("U", 4, 1),
    ("V", 2, 4),
    ("W", 2, 4),
    ("X", 1, 8),
    ("Y", 2, 4),
    ("Z", 1, 10),
];

pub fn english_tables() -> (HashMap<String, u8>, HashMap<String, i8>) {
    let distribution = ENGLISH_TABLE
        .iter()
        .map(|&(label, freq, _)| (label.to_string(), freq))
        .collect();
    let points = ENGLISH_TABLE
        .iter()
        .filter(|&&(label, _, _)| label != BLANK_LABEL)
        .map(|&(label, _, score)| (label.to_string(), score))
        .collect();
    (distribution, points)
}

pub fn make_english_alphabet() -> Alphabet {
    let (distribution, points) = english_tables();
    // the built-in tables are well-formed.
    match Alphabet::from_tables(&distribution, &points) {
        Ok(alphabet) => alphabet,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_has_hundred_tiles() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.len(), 27);
        assert_eq!(alphabet.num_tiles(), 100);
        assert_eq!(alphabet.from_rack(0), Some("?"));
        assert_eq!(alphabet.from_board(3), Some("C"));
        assert_eq!(alphabet.from_board(0x83), Some("c"));
        assert_eq!(alphabet.score(17), 10);
        assert_eq!(alphabet.score(0x91), 0);
    }

    #[test]
    fn parse_word_handles_blanks() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.parse_word("CaT").unwrap(), vec![3, 0x81, 20]);
        assert_eq!(alphabet.parse_rack("CA?t").unwrap(), vec![3, 1, 0, 0]);
        assert!(alphabet.parse_word("C4T").is_err());
        assert_eq!(alphabet.fmt_word(&[3, 0x81, 20]), "CaT");
    }

    #[test]
    fn custom_tables_are_accepted_without_totals() {
        let distribution = [("A".to_string(), 3u8), ("B".to_string(), 1)]
            .into_iter()
            .collect();
        let points = [("A".to_string(), 1i8), ("B".to_string(), 7)]
            .into_iter()
            .collect();
        let alphabet = Alphabet::from_tables(&distribution, &points).unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.num_tiles(), 4);
        assert_eq!(alphabet.freq(0), 0);
        assert_eq!(alphabet.score(2), 7);
    }

    #[test]
    fn letter_without_points_is_rejected() {
        let distribution = [("A".to_string(), 3u8)].into_iter().collect();
        let points = HashMap::new();
        assert!(Alphabet::from_tables(&distribution, &points).is_err());
    }
}
