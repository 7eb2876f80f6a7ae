// Copyright (C) 2020-2024 Andy Kurnia.

use super::{game_config, game_state, movegen, stats, training, trie};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimParams {
    // how many of the top scoring moves get simulated.
    pub num_candidates: usize,
    pub num_trials: usize,
    // rounds of play after the candidate, counting the candidate's round.
    pub num_plies: usize,
    // 0 = one per logical cpu.
    pub num_threads: usize,
    // fixed seed makes the choice reproducible, otherwise each call differs.
    pub seed: Option<u64>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            num_candidates: 5,
            num_trials: 10,
            num_plies: 2,
            num_threads: 0,
            seed: None,
        }
    }
}

pub struct Candidate {
    pub play: movegen::Move,
    pub stats: stats::Stats,
}

pub struct Evaluation {
    pub candidates: Vec<Candidate>,
    pub best: usize,
}

impl Evaluation {
    #[inline(always)]
    pub fn best_move(&self) -> &movegen::Move {
        &self.candidates[self.best].play
    }
}

// Per-candidate outcome sent back to the collecting thread.
struct TrialResults {
    idx: usize,
    stats: stats::Stats,
    examples: Vec<training::TrainingExample>,
}

pub struct Simulator<'a> {
    game_config: &'a game_config::GameConfig,
    trie: &'a trie::Trie,
    params: SimParams,
}

impl<'a> Simulator<'a> {
    pub fn new(
        game_config: &'a game_config::GameConfig,
        trie: &'a trie::Trie,
        params: SimParams,
    ) -> Self {
        Self {
            game_config,
            trie,
            params,
        }
    }

    #[inline(always)]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    // Ranks the current player's top moves by mean score differential over
    // randomized continuations. None when there is nothing to play. The
    // given state is never touched; every trial runs on its own copy.
    pub fn evaluate(
        &self,
        game_state: &game_state::GameState,
        example_log: Option<&mut training::ExampleLog>,
    ) -> Option<Evaluation> {
        if game_state.is_over() {
            return None;
        }
        let mut move_finder = movegen::MoveFinder::new(self.game_config, self.trie);
        let plays = move_finder
            .find_all_moves(&game_state.board, &game_state.current_player().rack)
            .iter()
            .take(self.params.num_candidates.max(1))
            .cloned()
            .collect::<Vec<_>>();
        if plays.is_empty() {
            return None;
        }
        let seed = self.params.seed.unwrap_or_else(rand::random);
        let num_threads = match self.params.num_threads {
            0 => num_cpus::get(),
            n => n,
        }
        .clamp(1, plays.len());
        let want_examples = example_log.is_some();
        log::debug!(
            "simulating {} candidates on {} threads, seed {}",
            plays.len(),
            num_threads,
            seed
        );

        let mut slots = (0..plays.len()).map(|_| None).collect::<Vec<_>>();
        let next_idx = std::sync::atomic::AtomicUsize::new(0);
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::scope(|s| {
            let next_idx = &next_idx;
            let plays = &plays;
            for _ in 0..num_threads {
                let tx = tx.clone();
                s.spawn(move || {
                    loop {
                        let idx = next_idx.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        if idx >= plays.len() {
                            break;
                        }
                        let results =
                            self.run_trials(game_state, &plays[idx], idx, seed, want_examples);
                        if tx.send(results).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);
            for results in rx {
                let idx = results.idx;
                slots[idx] = Some(results);
            }
        });

        let mut candidates = Vec::with_capacity(plays.len());
        let mut all_examples = Vec::new();
        for (play, slot) in plays.into_iter().zip(slots) {
            let (stats, examples) = match slot {
                Some(results) => (results.stats, results.examples),
                None => (stats::Stats::new(), Vec::new()),
            };
            all_examples.extend(examples);
            candidates.push(Candidate { play, stats });
        }
        if let Some(example_log) = example_log {
            all_examples.into_iter().for_each(|e| example_log.push(e));
        }

        let mut best = 0;
        for (idx, candidate) in candidates.iter().enumerate() {
            let (lo, hi) = candidate.stats.range().unwrap_or_default();
            log::debug!(
                "{}: mean {:.2} sd {:.2} range {}..{}",
                candidate.play.fmt(&game_state.board),
                candidate.stats.mean(),
                candidate.stats.standard_deviation(),
                lo,
                hi
            );
            if candidate.stats.mean() > candidates[best].stats.mean() {
                best = idx;
            }
        }
        Some(Evaluation { candidates, best })
    }

    fn run_trials(
        &self,
        game_state: &game_state::GameState,
        play: &movegen::Move,
        idx: usize,
        seed: u64,
        want_examples: bool,
    ) -> TrialResults {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(idx as u64);
        let mut move_finder = movegen::MoveFinder::new(self.game_config, self.trie);
        let mut stats = stats::Stats::new();
        let mut examples = Vec::new();
        let player = game_state.turn as usize;
        let rack = &game_state.current_player().rack;
        let num_players = game_state.players.len();
        let num_turns_after = (self.params.num_plies * num_players).saturating_sub(1);
        let mut sim_state = game_state.clone();
        for _ in 0..self.params.num_trials {
            sim_state.clone_from(game_state);
            // opponents' racks are hidden, so they are redrawn.
            sim_state.bag.shuffle(&mut rng);
            for other in 0..num_players {
                if other != player {
                    sim_state.recycle_rack(other, &mut rng);
                }
            }
            if !sim_state.place(play) {
                log::error!("candidate {idx} cannot be placed");
                break;
            }
            let example = want_examples
                .then(|| training::TrainingExample::new(&sim_state, player, rack, play, 0));
            for _ in 0..num_turns_after {
                if sim_state.is_over() {
                    break;
                }
                sim_state.play_best(&mut move_finder);
            }
            let differential = sim_state.score_differential(player);
            stats.update(differential as f64);
            if let Some(mut example) = example {
                example.score_differential_after_plies = differential;
                examples.push(example);
            }
        }
        TrialResults {
            idx,
            stats,
            examples,
        }
    }
}
