// Copyright (C) 2020-2024 Andy Kurnia.

use bruteword::{display, error, game_config, game_state, logging, movegen, trie};
use rand::prelude::*;

// Greedy self-play: every seat plays its top scoring move until the game ends.
fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("need argument: dictionary file or settings .json".into());
    }
    let settings = game_config::Settings::from_arg(&args[1])?;
    logging::init(settings.log_level(), None)?;
    let game_config = settings.game_config()?;
    let trie = trie::Trie::from_file(game_config.alphabet(), &settings.dictionary)?;
    log::info!("loaded {} words from {}", trie.len(), settings.dictionary);

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
    let mut move_finder = movegen::MoveFinder::new(&game_config, &trie);
    let mut game_state = game_state::GameState::new(&game_config);
    game_state.reset_and_draw_tiles(&mut rng);

    let mut num_moves = 0;
    while !game_state.is_over() {
        display::print_game_state(&game_state);
        let player = game_state.turn + 1;
        match game_state.play_best(&mut move_finder) {
            Some(mv) => {
                num_moves += 1;
                println!("p{} plays {}", player, mv.fmt(&game_state.board));
            }
            None => println!("p{player} passes"),
        }
        println!();
    }

    display::print_game_state(&game_state);
    println!("game over after {num_moves} moves");
    for (i, player) in (1..).zip(game_state.players.iter()) {
        println!("p{}: {}", i, player.score);
    }
    let leaders = game_state.leaders();
    if leaders.len() == 1 {
        println!("p{} wins", leaders[0] + 1);
    } else {
        println!("tie between {} players", leaders.len());
    }
    Ok(())
}
