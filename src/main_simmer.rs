// Copyright (C) 2020-2024 Andy Kurnia.

use bruteword::{display, error, game_config, game_state, logging, movegen, simmer, training, trie};
use rand::prelude::*;

// Self-play where the configured seats (numbered from 1) choose by
// simulation. Every simulated decision is kept as a training example.
fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("need argument: dictionary file or settings .json [num_games]".into());
    }
    let settings = game_config::Settings::from_arg(&args[1])?;
    let num_games = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => 1,
    };
    logging::init(settings.log_level(), None)?;
    let game_config = settings.game_config()?;
    let trie = trie::Trie::from_file(game_config.alphabet(), &settings.dictionary)?;
    log::info!("loaded {} words from {}", trie.len(), settings.dictionary);

    let simulating_players = if settings.simulating_players.is_empty() {
        vec![1]
    } else {
        settings.simulating_players.clone()
    };
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}, simulating {simulating_players:?}");
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
    let mut move_finder = movegen::MoveFinder::new(&game_config, &trie);
    let mut game_state = game_state::GameState::new(&game_config);
    let mut example_log = training::ExampleLog::new();
    let mut wins = vec![0usize; game_config.num_players() as usize];

    for game_num in 1..=num_games {
        println!("game {game_num}");
        game_state.reset_and_draw_tiles(&mut rng);
        while !game_state.is_over() {
            display::print_game_state(&game_state);
            let player = game_state.turn + 1;
            if simulating_players.contains(&player) {
                let params = simmer::SimParams {
                    seed: Some(settings.sim.seed.unwrap_or_else(|| rng.random())),
                    ..settings.sim.clone()
                };
                let simulator = simmer::Simulator::new(&game_config, &trie, params);
                match simulator.evaluate(&game_state, Some(&mut example_log)) {
                    Some(evaluation) => {
                        for candidate in evaluation.candidates.iter() {
                            println!(
                                "  {:<24} mean {:8.2} sd {:7.2}",
                                candidate.play.fmt(&game_state.board).to_string(),
                                candidate.stats.mean(),
                                candidate.stats.standard_deviation()
                            );
                        }
                        let mv = evaluation.best_move().clone();
                        if !game_state.place(&mv) {
                            return Err(error::new(format!("p{player} could not place {:?}", mv)).into());
                        }
                        println!("p{} sims {}", player, mv.fmt(&game_state.board));
                    }
                    None => {
                        game_state.pass();
                        println!("p{player} passes");
                    }
                }
            } else {
                match game_state.play_best(&mut move_finder) {
                    Some(mv) => println!("p{} plays {}", player, mv.fmt(&game_state.board)),
                    None => println!("p{player} passes"),
                }
            }
            println!();
        }
        display::print_game_state(&game_state);
        let leaders = game_state.leaders();
        if leaders.len() == 1 {
            wins[leaders[0]] += 1;
        }
        for (i, player) in (1..).zip(game_state.players.iter()) {
            println!("p{}: {} ({} wins)", i, player.score, wins[i - 1]);
        }
    }

    println!("{} training examples", example_log.len());
    if let Some(path) = &settings.examples_json {
        example_log.save_json(path)?;
    }
    if let Some(path) = &settings.examples_csv {
        example_log.write_csv(path)?;
    }
    Ok(())
}
