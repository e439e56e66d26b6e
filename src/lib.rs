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

use clap::Parser;
use thiserror::Error;

use modes::{
    flashcards::{show_flashcards, FlashcardSession},
    matching::{show_matching, MatchingSession},
    mcq::{show_mcq, McqSession, McqVariant},
    speed_match::{show_speed_match, SpeedMatchSession},
    typing::{show_typing, TypingSession},
};
use repository::Repository;
use set::SetError;
use stats::{PracticeMode, PracticeOutcome};
use store::{FileStore, StoreError};
use terminal::TerminalWrapper;
use words::WordEntry;

mod cli;
mod color;
mod commands;
pub mod demo;
mod event;
pub mod modes;
pub mod random;
pub mod repository;
pub mod set;
pub mod stats;
pub mod store;
mod terminal;
pub mod words;

pub fn run() -> Result<(), FlashsetsError> {
    let cli = cli::FlashsetsCli::parse();

    let store = match cli.store {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_user_home()?,
    };
    log::debug!("Using store {}", store.dir().display());

    let mut repo = Repository::new(store);
    commands::execute(&mut repo, cli.command, &mut std::io::stdout())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PracticeOptions {
    pub mode: PracticeMode,
    pub variant: McqVariant,
    pub definition_first: bool,
    pub shuffle: bool,
}

///Runs one practice session in the terminal. Returns `None` if the user left before the
///session finished.
pub fn practice(
    words: Vec<WordEntry>,
    options: PracticeOptions,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    std::panic::catch_unwind(move || -> Result<Option<PracticeOutcome>, FlashsetsError> {
        //NOTE: From this point, stdout/stderr will not be usable, hence we
        //need to catch any panics, since they are not loggable. Mapping to
        //FlashsetsError allows us to gracefully exit and log the panic.
        let term = &mut TerminalWrapper::new().map_err(UiError::IoError)?;
        let rng = &mut rand::thread_rng();

        match options.mode {
            PracticeMode::Flashcard => {
                let mut session = FlashcardSession::new(words, options.definition_first);
                if options.shuffle {
                    session.shuffle(rng);
                }
                show_flashcards(term, &mut session, rng)
            }
            PracticeMode::Matching => show_matching(term, &mut MatchingSession::new(&words), rng),
            PracticeMode::Mcq => show_mcq(term, &mut McqSession::new(words, options.variant), rng),
            PracticeMode::SpeedMatch => {
                show_speed_match(term, &mut SpeedMatchSession::new(words), rng)
            }
            PracticeMode::Typing => show_typing(term, &mut TypingSession::new(words), rng),
        }
    })
    .map_err(|err| {
        FlashsetsError::Panic({
            // Attempt to extract the panic message
            let message = if let Some(msg) = err.downcast_ref::<String>() {
                msg.clone()
            } else if let Some(msg) = err.downcast_ref::<&str>() {
                (*msg).to_owned()
            } else {
                "Unknown panic occurred".to_owned()
            };

            let location = std::panic::Location::caller();
            format!("{}:{}: {}", location.file(), location.line(), message)
        })
    })?
}

#[derive(Debug, Error)]
pub enum FlashsetsError {
    #[error("Store: {0}")]
    Store(#[from] StoreError),
    #[error("Set: {0}")]
    Set(#[from] SetError),
    #[error("Ui: {0}")]
    Ui(#[from] UiError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),
    #[error("Unable to write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),
    #[error("NotFound: No set matches \"{0}\"")]
    NotFound(String),
    #[error("NotEnoughWords: {mode} needs at least {needed} words, \"{title}\" has {has}")]
    NotEnoughWords {
        title: String,
        mode: PracticeMode,
        needed: usize,
        has: usize,
    },
    #[error("Import: {0}")]
    Import(String),
    #[error("Panicked: {0}")]
    Panic(String),
}

#[derive(Debug, Error)]
pub enum UiError {
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
}
