// Copyright (C) 2020-2024 Andy Kurnia.

use super::{bag, board, error, game_config, movegen, trie};
use board::Direction;
use rand::prelude::*;

fn use_tiles<II: IntoIterator<Item = u8>>(
    rack: &mut Vec<u8>,
    tiles_iter: II,
) -> error::Returns<()> {
    for tile in tiles_iter {
        let pos = rack.iter().rposition(|&t| t == tile).ok_or("bad tile")?;
        rack.swap_remove(pos);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    FirstMovePending,
    Steady,
    Over,
}

#[derive(Clone, Debug)]
pub struct GamePlayer {
    pub score: i32,
    pub rack: Vec<u8>,
}

// The whole game. Simulation works on clones of this, so nothing in here
// may be shared with another game.
#[derive(Clone)]
pub struct GameState<'a> {
    game_config: &'a game_config::GameConfig,
    pub board: board::Board<'a>,
    pub bag: bag::Bag,
    pub players: Box<[GamePlayer]>,
    pub turn: u8,
    phase: Phase,
    num_passes: u8,
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            board: board::Board::new(game_config),
            bag: bag::Bag::new(game_config.alphabet()),
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Vec::with_capacity(rack_size),
                })
                .collect(),
            turn: 0,
            phase: Phase::NotStarted,
            num_passes: 0,
        }
    }

    #[inline(always)]
    pub fn game_config(&self) -> &'a game_config::GameConfig {
        self.game_config
    }

    #[inline(always)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn reset_and_draw_tiles(&mut self, rng: &mut dyn RngCore) {
        self.board = board::Board::new(self.game_config);
        self.bag = bag::Bag::new(self.game_config.alphabet());
        self.bag.shuffle(rng);
        let rack_size = self.game_config.rack_size() as usize;
        for player in self.players.iter_mut() {
            player.score = 0;
            player.rack.clear();
            self.bag.replenish(&mut player.rack, rack_size);
        }
        self.turn = 0;
        self.num_passes = 0;
        self.phase = Phase::FirstMovePending;
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        self.turn -= num_players & -((self.turn >= num_players) as i8) as u8;
    }

    // Commits a scored move for the current player and passes the turn on.
    // Nothing changes when this returns false.
    pub fn place(&mut self, mv: &movegen::Move) -> bool {
        if matches!(self.phase, Phase::NotStarted | Phase::Over) {
            log::warn!("cannot place while game is {:?}", self.phase);
            return false;
        }
        if mv.num_played() == 0 {
            log::warn!("move places no tiles");
            return false;
        }
        let mut rack = self.current_player().rack.clone();
        if let Err(e) = use_tiles(&mut rack, mv.rack_tiles()) {
            log::warn!("move does not match rack: {e}");
            return false;
        }
        if !self.board.place_tiles(mv.row, mv.col, &mv.word, mv.direction) {
            log::warn!("move cannot be played at {},{} {}", mv.row, mv.col, mv.direction);
            return false;
        }
        let rack_size = self.game_config.rack_size() as usize;
        let bag = &mut self.bag;
        let player = &mut self.players[self.turn as usize];
        player.score += mv.score;
        player.rack = rack;
        bag.replenish(&mut player.rack, rack_size);
        self.num_passes = 0;
        if player.rack.is_empty() {
            log::info!("player {} went out", self.turn + 1);
            self.phase = Phase::Over;
        } else {
            self.phase = Phase::Steady;
        }
        self.next_turn();
        true
    }

    // The game ends once everyone in a row has had nothing to play.
    pub fn pass(&mut self) {
        if self.is_over() {
            return;
        }
        self.num_passes += 1;
        if self.num_passes as usize >= self.players.len() {
            log::info!("all players passed");
            self.phase = Phase::Over;
        }
        self.next_turn();
    }

    // Scores the letters against the current rack and commits them. A
    // rejected turn (zero score) leaves everything unchanged.
    pub fn try_play(
        &mut self,
        trie: &trie::Trie,
        row: i8,
        col: i8,
        direction: Direction,
        letters: &[u8],
    ) -> Option<movegen::Move> {
        let turn = self.board.turn_score(
            trie,
            row,
            col,
            letters,
            direction,
            &self.current_player().rack,
        );
        if turn.score <= 0 {
            return None;
        }
        let mv = movegen::Move {
            row,
            col,
            direction,
            word: turn.word,
            score: turn.score,
        };
        if self.place(&mv) { Some(mv) } else { None }
    }

    // Plays the top scoring move, or passes when there is none.
    pub fn play_best(&mut self, move_finder: &mut movegen::MoveFinder) -> Option<movegen::Move> {
        if self.is_over() {
            return None;
        }
        let rack = self.current_player().rack.clone();
        match move_finder.find_best_move(&self.board, &rack) {
            Some(mv) if self.place(&mv) => Some(mv),
            _ => {
                self.pass();
                None
            }
        }
    }

    pub fn recycle_rack(&mut self, player: usize, rng: &mut dyn RngCore) {
        self.bag.recycle(rng, &mut self.players[player].rack);
    }

    pub fn score_differential(&self, player: usize) -> i32 {
        let total = self.players.iter().map(|p| p.score).sum::<i32>();
        2 * self.players[player].score - total
    }

    // bag plus every other rack, as seen by player.
    pub fn unseen_tally(&self, player: usize) -> Vec<u8> {
        let mut tally = self.bag.tally(self.game_config.alphabet().len());
        for (i, other) in self.players.iter().enumerate() {
            if i != player {
                other.rack.iter().for_each(|&tile| tally[tile as usize] += 1);
            }
        }
        tally
    }

    // indexes of the players with the top score.
    pub fn leaders(&self) -> Vec<usize> {
        let top = self.players.iter().map(|p| p.score).max().unwrap_or(0);
        (0..self.players.len())
            .filter(|&i| self.players[i].score == top)
            .collect()
    }
}
