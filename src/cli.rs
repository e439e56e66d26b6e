/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashsets.
 *
 * Flashsets is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashsets is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashsets.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::stats::PracticeMode;

#[derive(Parser, Debug)]
#[command(
    name = "flashsets",
    version = env!("CARGO_PKG_VERSION"),
    about = "Vocabulary sets with five ways to practice them"
)]
pub struct FlashsetsCli {
    #[arg(
        long = "store",
        env = "FLASHSETS_STORE",
        global = true,
        value_name = "DIR",
        help = "Directory the sets are kept in.",
        long_help = STORE_HELP
    )]
    pub store: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "List every set")]
    List,
    #[command(about = "Show a set's words and stats")]
    Show {
        #[arg(help = ID_HELP)]
        id: String,
        #[arg(
            long = "plain",
            help = "Print only the word list, in a form `edit --words` accepts"
        )]
        plain: bool,
    },
    #[command(about = "Create a set from a word list", long_about = WORDS_HELP)]
    Create {
        #[arg(short = 't', long = "title")]
        title: String,
        #[arg(short = 'd', long = "description")]
        description: Option<String>,
        #[arg(value_name = "WORDS_FILE", help = "Word list file, or - for stdin")]
        words: String,
    },
    #[command(about = "Change a set's title, description or words")]
    Edit {
        #[arg(help = ID_HELP)]
        id: String,
        #[arg(short = 't', long = "title")]
        title: Option<String>,
        #[arg(
            short = 'd',
            long = "description",
            help = "New description, or \"\" to remove it"
        )]
        description: Option<String>,
        #[arg(
            short = 'w',
            long = "words",
            value_name = "WORDS_FILE",
            help = "Replace the words with this list, or - for stdin"
        )]
        words: Option<String>,
    },
    #[command(about = "Leave a word out of matching rounds")]
    Pause {
        #[arg(help = ID_HELP)]
        id: String,
        word_id: String,
    },
    #[command(about = "Put a paused word back into matching rounds")]
    Resume {
        #[arg(help = ID_HELP)]
        id: String,
        word_id: String,
    },
    #[command(about = "Rename a set")]
    Rename {
        #[arg(help = ID_HELP)]
        id: String,
        title: String,
    },
    #[command(about = "Delete a set")]
    Delete {
        #[arg(help = ID_HELP)]
        id: String,
    },
    #[command(about = "Export every set as JSON")]
    Export {
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
    #[command(about = "Import sets from an export, skipping ones already stored")]
    Import {
        #[arg(value_name = "FILE", help = "Export file, or - for stdin")]
        file: String,
    },
    #[command(about = "Show stats for one set, or an overview of all of them")]
    Stats {
        #[arg(help = ID_HELP)]
        id: Option<String>,
    },
    #[command(about = "Add the demo sets")]
    Demo,
    #[command(about = "Remove every set from the store")]
    Clear {
        #[arg(long = "yes", help = "Confirm removing every set")]
        yes: bool,
    },
    #[command(about = "Practice a set")]
    Practice {
        #[arg(help = ID_HELP)]
        id: String,
        #[arg(
            short = 'm',
            long = "mode",
            default_value_t = PracticeMode::Flashcard,
            value_name = "MODE",
            long_help = MODE_HELP
        )]
        mode: PracticeMode,
        #[arg(
            long = "infinite",
            conflicts_with = "retry_missed",
            help = "Multiple choice: keep dealing questions until finished with f"
        )]
        infinite: bool,
        #[arg(
            long = "retry-missed",
            help = "Multiple choice: ask missed words again at the end"
        )]
        retry_missed: bool,
        #[arg(
            long = "definition-first",
            help = "Flashcards: show the definition side first"
        )]
        definition_first: bool,
        #[arg(long = "shuffle", help = "Flashcards: shuffle the cards before starting")]
        shuffle: bool,
    },
}

const STORE_HELP: &str = r#"Directory the sets are kept in. The sets are saved to flashcard-sets.json
inside it. Defaults to ~/.config/flashsets"#;
const ID_HELP: &str = "Set id, or a unique prefix of one";
const WORDS_HELP: &str = r#"Create a set from a word list. One word per line, as any of:
    term: definition
    term - definition
    term = definition
    term<TAB>definition"#;
const MODE_HELP: &str = r#"Practice mode. Possible values:
    flashcard   - Flip through cards, marking what you know
    matching    - Pair terms with definitions against the clock
    mcq         - Multiple choice questions
    speed-match - Answer as many as possible in 60 seconds
    typing      - Shown a definition, type the term"#;

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use crate::{cli, stats::PracticeMode};

    use super::{Command, FlashsetsCli};

    #[test]
    fn verify_cli() {
        cli::FlashsetsCli::command().debug_assert();
    }

    #[test]
    fn parses_practice() {
        let cli = FlashsetsCli::try_parse_from([
            "flashsets",
            "--store",
            "/tmp/sets",
            "practice",
            "abc",
            "-m",
            "speed",
        ])
        .expect("Unable to parse arguments");

        assert_eq!(cli.store.as_deref(), Some(std::path::Path::new("/tmp/sets")));
        assert!(matches!(
            cli.command,
            Command::Practice {
                mode: PracticeMode::SpeedMatch,
                infinite: false,
                ..
            }
        ));
    }

    #[test]
    fn mcq_variants_conflict() {
        assert!(FlashsetsCli::try_parse_from([
            "flashsets",
            "practice",
            "abc",
            "--infinite",
            "--retry-missed"
        ])
        .is_err());
    }
}
