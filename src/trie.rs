// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, error};

// Children are kept sorted by tile. Most nodes have very few children, so a
// small sorted vec beats a full alphabet-sized table.
#[derive(Clone, Default)]
struct TrieNode {
    children: Vec<(u8, u32)>,
    accepts: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lookup {
    pub is_word: bool,
    pub is_prefix: bool,
}

pub struct Trie {
    nodes: Vec<TrieNode>,
    num_words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub const ROOT: u32 = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            num_words: 0,
        }
    }

    // Builds from one word per line. Surrounding whitespace is trimmed and
    // empty lines are skipped.
    pub fn from_text(alphabet: &alphabet::Alphabet, text: &str) -> error::Returns<Trie> {
        let mut trie = Trie::new();
        let mut word = Vec::new();
        for (line_num, line) in (1..).zip(text.lines()) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            word.clear();
            for c in line.chars() {
                match alphabet.tile_of(c) {
                    Some(tile) if tile != 0 && tile & 0x80 == 0 => word.push(tile),
                    _ => {
                        return_error!(format!("line {line_num}: invalid word {line:?}"));
                    }
                }
            }
            trie.insert(&word);
        }
        log::debug!("dictionary has {} words in {} nodes", trie.len(), trie.nodes.len());
        Ok(trie)
    }

    pub fn from_file(alphabet: &alphabet::Alphabet, path: &str) -> error::Returns<Trie> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_text(alphabet, &text),
            Err(e) => {
                return_error!(format!("cannot read dictionary {path:?}: {e}"));
            }
        }
    }

    // number of distinct words.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.num_words
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    // idempotent. blank designation bits are ignored.
    pub fn insert(&mut self, word: &[u8]) {
        let mut p = Self::ROOT;
        for &tile in word {
            let tile = tile & 0x7f;
            p = match self.nodes[p as usize]
                .children
                .binary_search_by_key(&tile, |&(t, _)| t)
            {
                Ok(i) => self.nodes[p as usize].children[i].1,
                Err(i) => {
                    let q = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[p as usize].children.insert(i, (tile, q));
                    q
                }
            };
        }
        let node = &mut self.nodes[p as usize];
        if !node.accepts {
            node.accepts = true;
            self.num_words += 1;
        }
    }

    // None iff no stored word continues p with tile.
    #[inline(always)]
    pub fn seek(&self, p: u32, tile: u8) -> Option<u32> {
        let children = &self.nodes[p as usize].children;
        children
            .binary_search_by_key(&(tile & 0x7f), |&(t, _)| t)
            .ok()
            .map(|i| children[i].1)
    }

    #[inline(always)]
    pub fn accepts(&self, p: u32) -> bool {
        self.nodes[p as usize].accepts
    }

    pub fn search(&self, word: &[u8]) -> Lookup {
        let mut p = Self::ROOT;
        for &tile in word {
            match self.seek(p, tile) {
                Some(q) => p = q,
                None => {
                    return Lookup {
                        is_word: false,
                        is_prefix: false,
                    };
                }
            }
        }
        Lookup {
            is_word: self.accepts(p),
            is_prefix: true,
        }
    }

    #[inline(always)]
    pub fn contains(&self, word: &[u8]) -> bool {
        self.search(word).is_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn english_trie(words: &str) -> Trie {
        Trie::from_text(&alphabet::make_english_alphabet(), words).unwrap()
    }

    #[test]
    fn search_reports_word_and_prefix() {
        let alphabet = alphabet::make_english_alphabet();
        let trie = english_trie("CAT\nCATS\nDOG\n");
        let w = |s: &str| alphabet.parse_word(s).unwrap();
        assert_eq!(
            trie.search(&w("CAT")),
            Lookup {
                is_word: true,
                is_prefix: true
            }
        );
        assert_eq!(
            trie.search(&w("CA")),
            Lookup {
                is_word: false,
                is_prefix: true
            }
        );
        assert_eq!(
            trie.search(&w("CAX")),
            Lookup {
                is_word: false,
                is_prefix: false
            }
        );
        assert!(trie.contains(&w("CATS")));
        assert!(!trie.contains(&w("DO")));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn blank_designation_is_ignored() {
        let alphabet = alphabet::make_english_alphabet();
        let trie = english_trie("CAT");
        assert!(trie.contains(&alphabet.parse_word("CaT").unwrap()));
    }

    #[test]
    fn text_is_trimmed_and_duplicates_are_noops() {
        let trie = english_trie("  CAT \r\n\nCAT\nCAT\n");
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn invalid_lines_are_errors() {
        let alphabet = alphabet::make_english_alphabet();
        let err = Trie::from_text(&alphabet, "CAT\nca t\n").err().unwrap();
        assert!(err.to_string().contains("line 2"));
        assert!(Trie::from_text(&alphabet, "C?T").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let alphabet = alphabet::make_english_alphabet();
        assert!(Trie::from_file(&alphabet, "/nonexistent/words.txt").is_err());
    }

    proptest! {
        #[test]
        fn inserted_words_and_their_prefixes_are_found(
            words in prop::collection::vec(prop::collection::vec(1u8..=26, 1..10), 1..30)
        ) {
            let mut trie = Trie::new();
            for word in &words {
                trie.insert(word);
            }
            for word in &words {
                prop_assert!(trie.search(word).is_word);
                for len in 0..=word.len() {
                    prop_assert!(trie.search(&word[..len]).is_prefix);
                }
            }
        }

        #[test]
        fn inserting_twice_changes_nothing(
            words in prop::collection::vec(prop::collection::vec(1u8..=26, 1..8), 1..20),
            queries in prop::collection::vec(prop::collection::vec(1u8..=26, 0..8), 1..20),
        ) {
            let mut once = Trie::new();
            let mut twice = Trie::new();
            for word in &words {
                once.insert(word);
                twice.insert(word);
                twice.insert(word);
            }
            prop_assert_eq!(once.len(), twice.len());
            for query in queries.iter().chain(words.iter()) {
                prop_assert_eq!(once.search(query), twice.search(query));
            }
        }
    }
}
