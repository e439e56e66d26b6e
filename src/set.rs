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

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    stats::SetStats,
    words::{new_id, validate_entries, WordEntry},
};

///A named vocabulary set along with its practice statistics. Serialized with the
///same camelCase field names the browser version of the app exports, so sets can be
///moved between the two.
///
///Example:
///```
///# use flashsets::set::WordSet;
///let json = r#"{
///  "id": "korean-basics",
///  "title": "Korean Basics",
///  "words": [
///    { "id": "w1", "term": "사과", "definition": "apple" },
///    { "id": "w2", "term": "학교", "definition": "school", "paused": true }
///  ],
///  "createdAt": 1700000000000,
///  "updatedAt": 1700000000000
///}"#;
///assert!(serde_json::from_str::<WordSet>(json)
///  .is_ok_and(|set| set.words.len() == 2 && set.active_words().count() == 1));
///```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordSet {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub words: Vec<WordEntry>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub stats: SetStats,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    #[error("Invalid set:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
    #[error("Word \"{0}\" not found in set")]
    WordNotFound(String),
    #[error("Word position {0} is out of range")]
    OutOfRange(usize),
}

pub const MAX_DESCRIPTION_WORDS: usize = 200;

impl WordSet {
    ///Builds a set without validating it. Prefer [`WordSet::create`] for user input.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        words: Vec<WordEntry>,
        now: i64,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            description,
            words,
            created_at: now,
            updated_at: now,
            stats: SetStats::new(),
        }
    }

    ///Validates and builds a new set, trimming the title and dropping a blank
    ///description.
    pub fn create(
        title: &str,
        description: Option<&str>,
        words: Vec<WordEntry>,
        now: i64,
    ) -> Result<Self, SetError> {
        validate_set(title, &words)?;
        Ok(Self::new(
            title.trim(),
            normalize_description(description),
            words,
            now,
        ))
    }

    ///Replaces the editable parts of the set, with the same checks as creation.
    ///Nothing changes when validation fails.
    pub fn apply_edit(
        &mut self,
        title: &str,
        description: Option<&str>,
        words: Vec<WordEntry>,
    ) -> Result<(), SetError> {
        validate_set(title, &words)?;
        self.title = title.trim().to_owned();
        self.description = normalize_description(description);
        self.words = words;
        Ok(())
    }

    pub fn active_words(&self) -> impl Iterator<Item = &WordEntry> {
        self.words.iter().filter(|word| !word.paused)
    }

    pub fn add_word(&mut self, word: WordEntry) {
        self.words.push(word);
    }

    pub fn remove_word(&mut self, word_id: &str) -> Result<WordEntry, SetError> {
        let index = self.word_index(word_id)?;
        Ok(self.words.remove(index))
    }

    ///Moves the word at `from` so that it ends up at position `to`.
    pub fn move_word(&mut self, from: usize, to: usize) -> Result<(), SetError> {
        let len = self.words.len();
        if from >= len {
            return Err(SetError::OutOfRange(from));
        }
        if to >= len {
            return Err(SetError::OutOfRange(to));
        }

        let word = self.words.remove(from);
        self.words.insert(to, word);
        Ok(())
    }

    pub fn set_paused(&mut self, word_id: &str, paused: bool) -> Result<(), SetError> {
        let index = self.word_index(word_id)?;
        self.words[index].paused = paused;
        Ok(())
    }

    fn word_index(&self, word_id: &str) -> Result<usize, SetError> {
        self.words
            .iter()
            .position(|word| word.id == word_id)
            .ok_or_else(|| SetError::WordNotFound(word_id.to_owned()))
    }
}

fn validate_set(title: &str, words: &[WordEntry]) -> Result<(), SetError> {
    let mut errors = vec![];

    if title.trim().is_empty() {
        errors.push("Please enter a title for your set".to_owned());
    }

    if words.is_empty() {
        errors.push("Please add at least one word".to_owned());
    }

    errors.extend(validate_entries(words).errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SetError::Invalid(errors))
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(clamp_description)
}

///Caps a description at [`MAX_DESCRIPTION_WORDS`] whitespace separated words.
///Shorter descriptions are returned as-is.
pub fn clamp_description(description: &str) -> String {
    let words = description.split_whitespace().collect::<Vec<_>>();
    if words.len() <= MAX_DESCRIPTION_WORDS {
        description.to_owned()
    } else {
        words[..MAX_DESCRIPTION_WORDS].join(" ")
    }
}
