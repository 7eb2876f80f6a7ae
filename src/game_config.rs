// Copyright (C) 2020-2023 Andy Kurnia.

use super::{alphabet, board_layout, error, simmer};

pub struct GameConfig {
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    bingo_bonus: i16,
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        &self.alphabet
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        &self.board_layout
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        self.rack_size
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    // branchless
    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i16 {
        self.bingo_bonus & -((num_played >= self.rack_size) as i16)
    }
}

pub fn make_game_config(alphabet: alphabet::Alphabet, num_players: u8) -> GameConfig {
    GameConfig {
        alphabet,
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 7,
        num_players,
        bingo_bonus: 50,
    }
}

pub fn make_english_game_config() -> GameConfig {
    make_game_config(alphabet::make_english_alphabet(), 2)
}

fn default_num_players() -> u8 {
    2
}

fn default_log_level() -> String {
    "info".into()
}

// Run settings for the binaries, read from a JSON file. Every field but the
// dictionary has a default.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub dictionary: String,
    #[serde(default)]
    pub letter_distribution: Option<String>,
    #[serde(default)]
    pub letter_points: Option<String>,
    #[serde(default = "default_num_players")]
    pub num_players: u8,
    #[serde(default)]
    pub seed: Option<u64>,
    // seats that pick moves by simulation instead of by top score.
    #[serde(default)]
    pub simulating_players: Vec<u8>,
    #[serde(default)]
    pub sim: simmer::SimParams,
    #[serde(default)]
    pub examples_json: Option<String>,
    #[serde(default)]
    pub examples_csv: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Settings {
    pub fn from_dictionary(dictionary: &str) -> Self {
        Settings {
            dictionary: dictionary.into(),
            letter_distribution: None,
            letter_points: None,
            num_players: default_num_players(),
            seed: None,
            simulating_players: Vec::new(),
            sim: simmer::SimParams::default(),
            examples_json: None,
            examples_csv: None,
            log_level: default_log_level(),
        }
    }

    pub fn from_json_str(s: &str) -> error::Returns<Self> {
        let settings = serde_json::from_str::<Settings>(s)?;
        if settings.num_players == 0 {
            return_error!("num_players must be at least 1".into());
        }
        Ok(settings)
    }

    pub fn from_json_file(path: &str) -> error::Returns<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_json_str(&s),
            Err(e) => {
                return_error!(format!("cannot read settings {path:?}: {e}"));
            }
        }
    }

    // the first argument is either a settings .json or a dictionary file.
    pub fn from_arg(arg: &str) -> error::Returns<Self> {
        if arg.ends_with(".json") {
            Self::from_json_file(arg)
        } else {
            Ok(Self::from_dictionary(arg))
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn game_config(&self) -> error::Returns<GameConfig> {
        let alphabet = match (&self.letter_distribution, &self.letter_points) {
            (Some(distribution), Some(points)) => {
                alphabet::Alphabet::from_json_files(distribution, points)?
            }
            (None, None) => alphabet::make_english_alphabet(),
            _ => {
                return_error!(
                    "letter_distribution and letter_points must be given together".into()
                );
            }
        };
        Ok(make_game_config(alphabet, self.num_players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bingo_bonus_only_for_full_rack() {
        let game_config = make_english_game_config();
        assert_eq!(game_config.num_played_bonus(6), 0);
        assert_eq!(game_config.num_played_bonus(7), 50);
    }

    #[test]
    fn settings_fill_defaults() {
        let settings =
            Settings::from_json_str(r#"{"dictionary": "words.txt", "seed": 11}"#).unwrap();
        assert_eq!(settings.dictionary, "words.txt");
        assert_eq!(settings.num_players, 2);
        assert_eq!(settings.seed, Some(11));
        assert_eq!(settings.sim.num_candidates, 5);
        assert_eq!(settings.log_level(), log::LevelFilter::Info);
        assert_eq!(settings.game_config().unwrap().rack_size(), 7);
    }

    #[test]
    fn settings_reject_unknown_fields_and_half_tables() {
        assert!(Settings::from_json_str(r#"{"dictionary": "w", "bogus": 1}"#).is_err());
        assert!(Settings::from_json_str(r#"{"dictionary": "w", "num_players": 0}"#).is_err());
        let settings =
            Settings::from_json_str(r#"{"dictionary": "w", "letter_points": "p.json"}"#).unwrap();
        assert!(settings.game_config().is_err());
    }
}
