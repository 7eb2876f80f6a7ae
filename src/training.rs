// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_state, movegen};
use std::collections::BTreeMap;

// One decision made by simulation, with what it led to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrainingExample {
    // one string per row, "." for empty, blanks in lowercase.
    pub board: Vec<String>,
    // tiles not visible to the player: bag plus opponents' racks.
    pub unseen: BTreeMap<String, u32>,
    pub rack_leave: String,
    pub play: String,
    pub play_score: i32,
    pub score_differential_after_plies: i32,
}

impl TrainingExample {
    // placed is the position right after player played mv from rack, so the
    // board already shows mv and the opponents' racks are whatever that trial
    // drew. The differential is filled in once the continuation is played.
    pub fn new(
        placed: &game_state::GameState,
        player: usize,
        rack: &[u8],
        mv: &movegen::Move,
        score_differential_after_plies: i32,
    ) -> Self {
        let alphabet = placed.game_config().alphabet();
        let dim = placed.board.dim();
        let board = (0..dim.rows)
            .map(|row| {
                (0..dim.cols)
                    .map(|col| alphabet.from_board(placed.board.tile_at(row, col)).unwrap_or("."))
                    .collect::<String>()
            })
            .collect();
        let unseen = placed
            .unseen_tally(player)
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .filter_map(|(tile, &count)| {
                alphabet
                    .from_rack(tile as u8)
                    .map(|label| (label.to_string(), count as u32))
            })
            .collect();
        Self {
            board,
            unseen,
            rack_leave: alphabet.fmt_rack(&rack_leave(rack, mv)),
            play: mv.fmt(&placed.board).to_string(),
            play_score: mv.score,
            score_differential_after_plies,
        }
    }
}

// Sorted tiles left on rack once mv is played.
pub fn rack_leave(rack: &[u8], mv: &movegen::Move) -> Vec<u8> {
    let mut leave = rack.to_vec();
    for tile in mv.rack_tiles() {
        if let Some(pos) = leave.iter().rposition(|&t| t == tile) {
            leave.swap_remove(pos);
        }
    }
    leave.sort_unstable();
    leave
}

// Append-only.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ExampleLog {
    examples: Vec<TrainingExample>,
}

impl ExampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, example: TrainingExample) {
        self.examples.push(example);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn load_json(path: &str) -> error::Returns<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    // Appends to {"examples": [...]} at path, creating it if missing.
    pub fn save_json(&self, path: &str) -> error::Returns<()> {
        let mut all = if std::path::Path::new(path).exists() {
            Self::load_json(path)?
        } else {
            Self::new()
        };
        all.examples.extend_from_slice(&self.examples);
        std::fs::write(path, serde_json::to_string_pretty(&all)?)?;
        log::info!("saved {} examples to {path} ({} total)", self.len(), all.len());
        Ok(())
    }

    pub fn write_csv(&self, path: &str) -> error::Returns<()> {
        let mut csv_out = csv::Writer::from_path(path)?;
        csv_out.serialize((
            "board",
            "unseen",
            "rack_leave",
            "play",
            "play_score",
            "score_differential_after_plies",
        ))?;
        for example in self.examples.iter() {
            let unseen = example
                .unseen
                .iter()
                .map(|(label, count)| format!("{label}{count}"))
                .collect::<Vec<_>>()
                .join(" ");
            csv_out.serialize((
                example.board.join("/"),
                unseen,
                &example.rack_leave,
                &example.play,
                example.play_score,
                example.score_differential_after_plies,
            ))?;
        }
        csv_out.flush()?;
        Ok(())
    }
}
