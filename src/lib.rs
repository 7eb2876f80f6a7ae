// Copyright (C) 2020-2024 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod display;
pub mod game_config;
pub mod game_state;
pub mod logging;
pub mod matrix;
pub mod movegen;
pub mod simmer;
pub mod stats;
pub mod training;
pub mod trie;
