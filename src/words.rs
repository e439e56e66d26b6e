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

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

///A single term/definition pair within a set.
///
///Example:
///```
///# use flashsets::words::WordEntry;
///let json = r#"{ "id": "a1", "term": "사과", "definition": "apple" }"#;
///assert!(serde_json::from_str::<WordEntry>(json)
///  .is_ok_and(|entry| entry.term == "사과" && !entry.paused));
///```
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct WordEntry {
    pub id: String,
    pub term: String,
    pub definition: String,
    ///Paused entries are left out of matching rounds only.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,
}

impl WordEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            term: term.into(),
            definition: definition.into(),
            paused: false,
        }
    }
}

impl Display for WordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.term, self.definition))
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

///Tried in order; the first one present on a line wins.
const DELIMITERS: [&str; 4] = [":", " - ", "=", "\t"];

///Parses one entry per non-blank line, eg. `term: definition`, `term - definition`,
///`term = definition` or tab separated. Lines without a delimiter become a term with
///an empty definition, and lines without a term are dropped.
pub fn parse_words(text: &str) -> Vec<WordEntry> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (term, definition) = DELIMITERS
                .iter()
                .find_map(|delimiter| {
                    line.find(delimiter).map(|index| {
                        (
                            line[..index].trim(),
                            line[index + delimiter.len()..].trim(),
                        )
                    })
                })
                .unwrap_or((line.trim(), ""));

            (!term.is_empty()).then(|| WordEntry::new(term, definition))
        })
        .collect()
}

///Inverse of [`parse_words`], always using the `:` delimiter.
pub fn entries_to_text(entries: &[WordEntry]) -> String {
    entries
        .iter()
        .map(WordEntry::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_entries(entries: &[WordEntry]) -> Validation {
    let mut errors = vec![];

    for (index, entry) in entries.iter().enumerate() {
        let number = index + 1;
        if entry.term.trim().is_empty() {
            errors.push(format!("Entry {number}: Term is empty"));
        }
        if entry.definition.trim().is_empty() {
            errors.push(format!(
                "Entry {number}: Definition is empty for \"{}\"",
                entry.term
            ));
        }
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::{entries_to_text, parse_words, validate_entries, WordEntry};

    fn pairs(entries: &[WordEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|entry| (entry.term.as_str(), entry.definition.as_str()))
            .collect()
    }

    #[test]
    fn parse_each_delimiter() {
        let entries = parse_words("사과: apple\nschool - 학교\nwater=물\nbook\t책");
        assert_eq!(
            pairs(&entries),
            vec![
                ("사과", "apple"),
                ("school", "학교"),
                ("water", "물"),
                ("book", "책")
            ]
        );
    }

    #[test]
    fn parse_delimiter_priority() {
        //Colon beats the dash even when the dash comes first
        let entries = parse_words("a - b: c");
        assert_eq!(pairs(&entries), vec![("a - b", "c")]);

        let entries = parse_words("x = y - z");
        assert_eq!(pairs(&entries), vec![("x = y", "z")]);
    }

    #[test]
    fn parse_skips_blank_and_termless_lines() {
        let entries = parse_words("\n   \nlonely\n: no term\r\n");
        assert_eq!(pairs(&entries), vec![("lonely", "")]);

        //A bare delimiter splits into two empty halves, so the line has no term
        let entries = parse_words(":\n = \nkept: yes");
        assert_eq!(pairs(&entries), vec![("kept", "yes")]);
    }

    #[test]
    fn parse_assigns_unique_ids() {
        let entries = parse_words("a: 1\na: 1\nb: 2");
        assert_eq!(entries.len(), 3);
        assert_ne!(entries[0].id, entries[1].id);
        assert_ne!(entries[1].id, entries[2].id);
    }

    #[test]
    fn serialize_round_trip_keeps_meaning() {
        let original = parse_words("one - uno\ntwo=dos\nthree\ttres\nfour: cuatro");
        let text = entries_to_text(&original);
        assert_eq!(text, "one: uno\ntwo: dos\nthree: tres\nfour: cuatro");

        let reparsed = parse_words(&text);
        assert_eq!(pairs(&reparsed), pairs(&original));
    }

    #[test]
    fn validate_reports_empty_term() {
        let validation = validate_entries(&[WordEntry::new("", "x")]);
        assert!(!validation.valid);
        assert_eq!(validation.errors, vec!["Entry 1: Term is empty".to_owned()]);
    }

    #[test]
    fn validate_reports_empty_definition() {
        let validation = validate_entries(&[WordEntry::new("a", "b"), WordEntry::new("c", " ")]);
        assert!(!validation.valid);
        assert_eq!(
            validation.errors,
            vec!["Entry 2: Definition is empty for \"c\"".to_owned()]
        );
    }

    #[test]
    fn validate_accepts_complete_entries() {
        let validation = validate_entries(&[WordEntry::new("a", "b")]);
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn paused_omitted_when_false() {
        let mut entry = WordEntry::new("a", "b");
        let json = serde_json::to_string(&entry).expect("Unable to serialize entry");
        assert!(!json.contains("paused"));

        entry.paused = true;
        let json = serde_json::to_string(&entry).expect("Unable to serialize entry");
        assert!(json.contains("\"paused\":true"));
    }
}
