// Copyright (C) 2020-2024 Andy Kurnia.

use bruteword::{board, display, error, game_config, game_state, logging, movegen, simmer, trie};
use rand::prelude::*;

static HELP: &str = "\
new [seed]                 start a new game
show                       print board, scores and racks
rack <tiles>               replace the current rack (? is a blank)
moves [n]                  list the top n moves (default 10)
best                       play the top scoring move
sim                        simulate the top moves and play the best
play <row> <col> <dir> <word>
                           e.g. play 8 H across CAT, lowercase for blanks
pass                       pass the turn
source <file>              run commands from a file
exit                       quit";

struct Shell<'a> {
    game_config: &'a game_config::GameConfig,
    trie: &'a trie::Trie,
    sim_params: simmer::SimParams,
    rng: rand_chacha::ChaCha20Rng,
    move_finder: movegen::MoveFinder<'a>,
    game_state: game_state::GameState<'a>,
}

fn parse_col(s: &str) -> error::Returns<i8> {
    match s.as_bytes() {
        &[c] if c.is_ascii_alphabetic() => Ok((c.to_ascii_uppercase() - b'A') as i8),
        _ => Err(error::new(format!("invalid column {s:?}")).into()),
    }
}

// rows are shown from 1.
fn parse_row(s: &str) -> error::Returns<i8> {
    match s.parse::<i8>()?.checked_sub(1) {
        Some(row) => Ok(row),
        None => Err(error::new(format!("invalid row {s:?}")).into()),
    }
}

impl Shell<'_> {
    fn new_game(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(rand::random);
        println!("seed {seed}");
        self.rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
        self.game_state.reset_and_draw_tiles(&mut self.rng);
    }

    fn announce(&self, player: u8, verb: &str, mv: &movegen::Move) {
        println!("p{} {} {}", player + 1, verb, mv.fmt(&self.game_state.board));
        if self.game_state.is_over() {
            println!("game over");
        }
    }

    // false to quit.
    fn handle(&mut self, strings: &[String]) -> error::Returns<bool> {
        let player = self.game_state.turn;
        match strings[0].as_str() {
            "help" => println!("{HELP}"),
            "exit" => return Ok(false),
            "new" => {
                let seed = match strings.get(1) {
                    Some(s) => Some(s.parse::<u64>()?),
                    None => None,
                };
                self.new_game(seed);
            }
            "show" => display::print_game_state(&self.game_state),
            "rack" => {
                let Some(s) = strings.get(1) else {
                    bruteword::return_error!("need tiles".into());
                };
                let rack = self.game_config.alphabet().parse_rack(s)?;
                self.game_state.players[player as usize].rack = rack;
            }
            "moves" => {
                let n = match strings.get(1) {
                    Some(s) => s.parse::<usize>()?,
                    None => 10,
                };
                let rack = &self.game_state.current_player().rack;
                let moves = self.move_finder.find_all_moves(&self.game_state.board, rack);
                println!("found {} moves", moves.len());
                for mv in moves.iter().take(n) {
                    println!("{}", mv.fmt(&self.game_state.board));
                }
            }
            "best" => match self.game_state.play_best(&mut self.move_finder) {
                Some(mv) => self.announce(player, "plays", &mv),
                None => println!("no move, p{} passes", player + 1),
            },
            "sim" => {
                let simulator =
                    simmer::Simulator::new(self.game_config, self.trie, self.sim_params.clone());
                match simulator.evaluate(&self.game_state, None) {
                    Some(evaluation) => {
                        for candidate in evaluation.candidates.iter() {
                            println!(
                                "{:<24} mean {:8.2} sd {:7.2}",
                                candidate.play.fmt(&self.game_state.board).to_string(),
                                candidate.stats.mean(),
                                candidate.stats.standard_deviation()
                            );
                        }
                        let mv = evaluation.best_move().clone();
                        if self.game_state.place(&mv) {
                            self.announce(player, "sims", &mv);
                        }
                    }
                    None => println!("nothing to simulate"),
                }
            }
            "play" => {
                if strings.len() < 5 {
                    bruteword::return_error!("usage: play <row> <col> <across|down> <word>".into());
                }
                let row = parse_row(&strings[1])?;
                let col = parse_col(&strings[2])?;
                let direction = strings[3].parse::<board::Direction>()?;
                let letters = self.game_config.alphabet().parse_word(&strings[4])?;
                match self
                    .game_state
                    .try_play(self.trie, row, col, direction, &letters)
                {
                    Some(mv) => self.announce(player, "plays", &mv),
                    None => println!("rejected"),
                }
            }
            "pass" => {
                self.game_state.pass();
                if self.game_state.is_over() {
                    println!("game over");
                }
            }
            _ => println!("invalid input, help for help"),
        }
        Ok(true)
    }
}

fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("need argument: dictionary file or settings .json".into());
    }
    let settings = game_config::Settings::from_arg(&args[1])?;
    logging::init(settings.log_level(), None)?;
    let game_config = settings.game_config()?;
    let trie = trie::Trie::from_file(game_config.alphabet(), &settings.dictionary)?;
    println!("loaded {} words", trie.len());

    let mut shell = Shell {
        game_config: &game_config,
        trie: &trie,
        sim_params: settings.sim.clone(),
        rng: rand_chacha::ChaCha20Rng::seed_from_u64(0),
        move_finder: movegen::MoveFinder::new(&game_config, &trie),
        game_state: game_state::GameState::new(&game_config),
    };
    shell.new_game(settings.seed);

    let mut rl = rustyline::DefaultEditor::new()
        .map_err(|e| error::new(format!("cannot start line editor: {e}")))?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{filename}:{line_num}> {line}");
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    if strings[0] == "source" {
                        let Some(filename) = strings.get(1) else {
                            println!("need another arg");
                            continue;
                        };
                        match std::fs::read_to_string(filename) {
                            Ok(whole_file) => {
                                let v = cmd_stack.len();
                                for (line_num, line) in whole_file.lines().enumerate() {
                                    cmd_stack
                                        .push((line.to_string(), Some((filename.clone(), line_num + 1))));
                                }
                                cmd_stack[v..].reverse();
                            }
                            Err(err) => println!("cannot open file: {err}"),
                        }
                        continue;
                    }
                    match shell.handle(&strings) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(err) => println!("error: {err}"),
                    }
                }
                Err(err) => println!("Bad quoting: {err:?}"),
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {err:?}");
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_count_from_one() {
        assert_eq!(parse_row("1").unwrap(), 0);
        assert_eq!(parse_row("8").unwrap(), 7);
        assert_eq!(parse_row("0").unwrap(), -1);
        assert!(parse_row("-128").is_err());
        assert!(parse_row("200").is_err());
        assert!(parse_row("x").is_err());
    }

    #[test]
    fn columns_are_letters() {
        assert_eq!(parse_col("a").unwrap(), 0);
        assert_eq!(parse_col("H").unwrap(), 7);
        assert!(parse_col("HH").is_err());
        assert!(parse_col("8").is_err());
    }
}
