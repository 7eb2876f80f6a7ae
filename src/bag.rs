// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use super::alphabet;
use rand::prelude::*;

// Tiles are drawn from the end. The bag is shuffled once when a game starts
// and again whenever tiles are returned to it.
#[derive(Clone, Debug)]
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in 0..alphabet.len() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    // Draws up to num_tiles, fewer if the bag runs out.
    pub fn draw(&mut self, rack: &mut Vec<u8>, num_tiles: usize) -> usize {
        let n = num_tiles.min(self.0.len());
        rack.extend(self.0.drain(self.0.len() - n..).rev());
        n
    }

    // tops the rack up to rack_size.
    pub fn replenish(&mut self, rack: &mut Vec<u8>, rack_size: usize) -> usize {
        self.draw(rack, rack_size.saturating_sub(rack.len()))
    }

    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) {
        if tiles.is_empty() {
            return;
        }
        self.0.extend_from_slice(tiles);
        self.0.shuffle(rng);
    }

    // Returns the whole rack and redraws as many tiles as it had.
    pub fn recycle(&mut self, rng: &mut dyn RngCore, rack: &mut Vec<u8>) {
        let num_tiles = rack.len();
        self.put_back(rng, rack);
        rack.clear();
        self.draw(rack, num_tiles);
    }

    pub fn tally(&self, alphabet_len: u8) -> Vec<u8> {
        let mut tally = vec![0u8; alphabet_len as usize];
        self.0.iter().for_each(|&tile| tally[tile as usize] += 1);
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn new_bag_holds_distribution() {
        let alphabet = alphabet::make_english_alphabet();
        let bag = Bag::new(&alphabet);
        assert_eq!(bag.len(), 100);
        let tally = bag.tally(alphabet.len());
        assert_eq!(tally[0], 2);
        assert_eq!(tally[5], 12);
    }

    #[test]
    fn draw_underflow_takes_what_remains() {
        let mut bag = Bag(vec![1, 2, 3]);
        let mut rack = vec![9];
        assert_eq!(bag.draw(&mut rack, 7), 3);
        assert_eq!(rack.len(), 4);
        assert!(bag.is_empty());
        assert_eq!(bag.draw(&mut rack, 7), 0);
    }

    #[test]
    fn replenish_tops_up() {
        let mut bag = Bag(vec![1; 10]);
        let mut rack = vec![2, 3];
        assert_eq!(bag.replenish(&mut rack, 7), 5);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 5);
        assert_eq!(bag.replenish(&mut rack, 7), 0);
    }

    #[test]
    fn recycle_preserves_tile_counts() {
        let alphabet = alphabet::make_english_alphabet();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut bag = Bag::new(&alphabet);
        bag.shuffle(&mut rng);
        let mut rack = Vec::new();
        bag.draw(&mut rack, 7);
        bag.recycle(&mut rng, &mut rack);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 93);
        let mut tally = bag.tally(alphabet.len());
        rack.iter().for_each(|&tile| tally[tile as usize] += 1);
        assert_eq!(tally, Bag::new(&alphabet).tally(alphabet.len()));
    }
}
