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

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::set::WordSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
    #[default]
    Flashcard,
    Matching,
    Mcq,
    SpeedMatch,
    Typing,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 5] = [
        Self::Flashcard,
        Self::Matching,
        Self::Mcq,
        Self::SpeedMatch,
        Self::Typing,
    ];

    ///Smallest set that can be practiced in this mode.
    pub fn min_words(&self) -> usize {
        match self {
            Self::Flashcard | Self::Typing => 1,
            Self::Matching | Self::Mcq | Self::SpeedMatch => 4,
        }
    }
}

impl FromStr for PracticeMode {
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        match s.as_str() {
            "flashcard" | "flashcards" | "flash" => Ok(Self::Flashcard),
            "matching" | "match" => Ok(Self::Matching),
            "mcq" => Ok(Self::Mcq),
            "speed-match" | "speed" => Ok(Self::SpeedMatch),
            "typing" | "type" => Ok(Self::Typing),
            _ => Err(format!("Mode argument not recognized: {s}")),
        }
    }

    type Err = String;
}

impl Display for PracticeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Flashcard => "flashcard",
            Self::Matching => "matching",
            Self::Mcq => "mcq",
            Self::SpeedMatch => "speed-match",
            Self::Typing => "typing",
        })
    }
}

///What a finished practice session reports back for recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeOutcome {
    Flashcard { known: u32, total: u32 },
    Matching { matched: u32, total: u32, seconds: u64 },
    Mcq { correct: u32, total: u32 },
    SpeedMatch { score: u32 },
    Typing { wpm: u32, accuracy: u32 },
}

impl PracticeOutcome {
    pub fn mode(&self) -> PracticeMode {
        match self {
            Self::Flashcard { .. } => PracticeMode::Flashcard,
            Self::Matching { .. } => PracticeMode::Matching,
            Self::Mcq { .. } => PracticeMode::Mcq,
            Self::SpeedMatch { .. } => PracticeMode::SpeedMatch,
            Self::Typing { .. } => PracticeMode::Typing,
        }
    }

    ///`(score, total_questions, time_spent)` in the shape the stats update expects.
    ///Typing reports WPM out of 100, speed match has no question total.
    pub fn as_update(&self) -> (u32, u32, Option<u64>) {
        match *self {
            Self::Flashcard { known, total } => (known, total, None),
            Self::Matching {
                matched,
                total,
                seconds,
            } => (matched, total, Some(seconds)),
            Self::Mcq { correct, total } => (correct, total, None),
            Self::SpeedMatch { score } => (score, 0, None),
            Self::Typing { wpm, .. } => (wpm, 100, None),
        }
    }
}

impl Display for PracticeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flashcard { known, total } => {
                f.write_fmt(format_args!("You knew {known} out of {total} cards"))
            }
            Self::Matching {
                matched,
                total,
                seconds,
            } => f.write_fmt(format_args!(
                "Matched {matched} of {total} pairs in {}",
                format_seconds(*seconds)
            )),
            Self::Mcq { correct, total } => f.write_fmt(format_args!(
                "You got {correct} correct out of {total} ({}%)",
                percent(*correct, *total)
            )),
            Self::SpeedMatch { score } => f.write_fmt(format_args!("Time's up! Score: {score}")),
            Self::Typing { wpm, accuracy } => {
                f.write_fmt(format_args!("{wpm} WPM at {accuracy}% accuracy"))
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetStats {
    pub total_practices: u32,
    pub flashcard_accuracy: u32,
    pub matching_best_time: Option<u64>,
    pub mcq_accuracy: u32,
    pub speed_match_high_score: u32,
    #[serde(rename = "typingBestWPM")]
    pub typing_best_wpm: u32,
    pub last_practiced: Option<i64>,
}

impl SetStats {
    pub fn new() -> Self {
        Self {
            total_practices: 0,
            flashcard_accuracy: 0,
            matching_best_time: None,
            mcq_accuracy: 0,
            speed_match_high_score: 0,
            typing_best_wpm: 0,
            last_practiced: None,
        }
    }

    ///Folds one finished session into the record. Flashcard accuracy averages only the
    ///previous value with the new one, so recent sessions weigh more.
    pub fn apply(
        &mut self,
        mode: PracticeMode,
        score: u32,
        total_questions: u32,
        time_spent: Option<u64>,
        now: i64,
    ) {
        let accuracy = if total_questions > 0 {
            (score as f64 / total_questions as f64) * 100.0
        } else {
            0.0
        };

        self.total_practices += 1;
        self.last_practiced = Some(now);

        match mode {
            PracticeMode::Flashcard => {
                self.flashcard_accuracy =
                    ((self.flashcard_accuracy as f64 + accuracy) / 2.0).round() as u32;
            }
            PracticeMode::Matching => {
                //A zero time is treated as missing
                if let Some(time) = time_spent.filter(|time| *time > 0) {
                    if self.matching_best_time.map_or(true, |best| time < best) {
                        self.matching_best_time = Some(time);
                    }
                }
            }
            PracticeMode::Mcq => self.mcq_accuracy = accuracy.round() as u32,
            PracticeMode::SpeedMatch => {
                self.speed_match_high_score = self.speed_match_high_score.max(score)
            }
            PracticeMode::Typing => self.typing_best_wpm = self.typing_best_wpm.max(score),
        }
    }
}

impl Default for SetStats {
    fn default() -> Self {
        Self::new()
    }
}

const RECENT_LIMIT: usize = 5;

///Totals across every stored set.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview<'a> {
    pub total_sets: usize,
    pub total_words: usize,
    pub total_practices: u32,
    pub average_mcq_accuracy: u32,
    pub average_flashcard_accuracy: u32,
    pub best_speed_match_score: u32,
    pub best_typing_wpm: u32,
    pub recently_practiced: Vec<&'a WordSet>,
}

impl<'a> Overview<'a> {
    pub fn from_sets(sets: &'a [WordSet]) -> Self {
        let average = |field: fn(&SetStats) -> u32| -> u32 {
            if sets.is_empty() {
                0
            } else {
                let total = sets
                    .iter()
                    .fold(0.0, |total, set| total + field(&set.stats) as f64);
                (total / sets.len() as f64).round() as u32
            }
        };

        let mut recently_practiced = sets
            .iter()
            .filter(|set| set.stats.last_practiced.is_some())
            .collect::<Vec<_>>();
        recently_practiced.sort_by_key(|set| std::cmp::Reverse(set.stats.last_practiced));
        recently_practiced.truncate(RECENT_LIMIT);

        Self {
            total_sets: sets.len(),
            total_words: sets.iter().map(|set| set.words.len()).sum(),
            total_practices: sets.iter().map(|set| set.stats.total_practices).sum(),
            average_mcq_accuracy: average(|stats| stats.mcq_accuracy),
            average_flashcard_accuracy: average(|stats| stats.flashcard_accuracy),
            best_speed_match_score: sets
                .iter()
                .map(|set| set.stats.speed_match_high_score)
                .max()
                .unwrap_or(0),
            best_typing_wpm: sets
                .iter()
                .map(|set| set.stats.typing_best_wpm)
                .max()
                .unwrap_or(0),
            recently_practiced,
        }
    }
}

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

pub fn format_last_practiced(timestamp: Option<i64>, now: i64) -> String {
    let Some(timestamp) = timestamp else {
        return "Never".to_owned();
    };

    match (now - timestamp).div_euclid(DAY_MILLIS) {
        0 => "Today".to_owned(),
        1 => "Yesterday".to_owned(),
        days @ 2..=6 => format!("{days} days ago"),
        _ => DateTime::<Utc>::from_timestamp_millis(timestamp)
            .map(|date| date.format("%b %-d").to_string())
            .unwrap_or_else(|| "Unknown".to_owned()),
    }
}

pub fn format_seconds(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use crate::{set::WordSet, words::WordEntry};

    use super::{format_last_practiced, format_seconds, Overview, PracticeMode, SetStats};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn flashcard_running_average() {
        let mut stats = SetStats::new();
        stats.apply(PracticeMode::Flashcard, 8, 10, None, NOW);
        assert_eq!(stats.flashcard_accuracy, 40);
        stats.apply(PracticeMode::Flashcard, 10, 10, None, NOW);
        assert_eq!(stats.flashcard_accuracy, 70);
        assert_eq!(stats.total_practices, 2);
        assert_eq!(stats.last_practiced, Some(NOW));
    }

    #[test]
    fn mcq_overwrites() {
        let mut stats = SetStats::new();
        stats.apply(PracticeMode::Mcq, 9, 10, None, NOW);
        assert_eq!(stats.mcq_accuracy, 90);
        stats.apply(PracticeMode::Mcq, 1, 3, None, NOW);
        assert_eq!(stats.mcq_accuracy, 33);
    }

    #[test]
    fn zero_total_counts_as_zero_accuracy() {
        let mut stats = SetStats::new();
        stats.apply(PracticeMode::Mcq, 5, 0, None, NOW);
        assert_eq!(stats.mcq_accuracy, 0);
    }

    #[test]
    fn best_values_only_improve() {
        let mut stats = SetStats::new();

        stats.apply(PracticeMode::SpeedMatch, 120, 0, None, NOW);
        stats.apply(PracticeMode::SpeedMatch, 80, 0, None, NOW);
        assert_eq!(stats.speed_match_high_score, 120);
        stats.apply(PracticeMode::SpeedMatch, 150, 0, None, NOW);
        assert_eq!(stats.speed_match_high_score, 150);

        stats.apply(PracticeMode::Typing, 30, 100, None, NOW);
        stats.apply(PracticeMode::Typing, 25, 100, None, NOW);
        assert_eq!(stats.typing_best_wpm, 30);
    }

    #[test]
    fn matching_keeps_fastest_time() {
        let mut stats = SetStats::new();

        stats.apply(PracticeMode::Matching, 4, 4, None, NOW);
        assert_eq!(stats.matching_best_time, None);

        stats.apply(PracticeMode::Matching, 4, 4, Some(30), NOW);
        assert_eq!(stats.matching_best_time, Some(30));
        stats.apply(PracticeMode::Matching, 4, 4, Some(45), NOW);
        assert_eq!(stats.matching_best_time, Some(30));
        stats.apply(PracticeMode::Matching, 4, 4, Some(0), NOW);
        assert_eq!(stats.matching_best_time, Some(30));
        stats.apply(PracticeMode::Matching, 4, 4, Some(12), NOW);
        assert_eq!(stats.matching_best_time, Some(12));
        assert_eq!(stats.total_practices, 5);
    }

    #[test]
    fn serializes_with_browser_field_names() {
        let json = serde_json::to_value(SetStats::new()).expect("Unable to serialize stats");
        for key in [
            "totalPractices",
            "flashcardAccuracy",
            "matchingBestTime",
            "mcqAccuracy",
            "speedMatchHighScore",
            "typingBestWPM",
            "lastPracticed",
        ] {
            assert!(json.get(key).is_some(), "Missing {key}");
        }
    }

    #[test]
    fn mode_from_str_and_display() {
        for mode in PracticeMode::ALL {
            assert_eq!(mode.to_string().parse::<PracticeMode>(), Ok(mode));
        }
        assert!("nonsense".parse::<PracticeMode>().is_err());
    }

    fn set_with(title: &str, stats: SetStats, words: usize) -> WordSet {
        let words = (0..words)
            .map(|i| WordEntry::new(format!("t{i}"), format!("d{i}")))
            .collect();
        let mut set = WordSet::new(title, None, words, NOW);
        set.stats = stats;
        set
    }

    #[test]
    fn overview_totals() {
        let sets = (0..7)
            .map(|i| {
                let stats = SetStats {
                    total_practices: i,
                    mcq_accuracy: 10 * i,
                    flashcard_accuracy: 50,
                    speed_match_high_score: 100 * i,
                    typing_best_wpm: 7 + i,
                    last_practiced: (i > 0).then_some(NOW + i as i64),
                    ..SetStats::new()
                };
                set_with(&format!("Set {i}"), stats, 2)
            })
            .collect::<Vec<_>>();

        let overview = Overview::from_sets(&sets);
        assert_eq!(overview.total_sets, 7);
        assert_eq!(overview.total_words, 14);
        assert_eq!(overview.total_practices, 21);
        assert_eq!(overview.average_mcq_accuracy, 30);
        assert_eq!(overview.average_flashcard_accuracy, 50);
        assert_eq!(overview.best_speed_match_score, 600);
        assert_eq!(overview.best_typing_wpm, 13);
        assert_eq!(
            overview
                .recently_practiced
                .iter()
                .map(|set| set.title.as_str())
                .collect::<Vec<_>>(),
            vec!["Set 6", "Set 5", "Set 4", "Set 3", "Set 2"]
        );
    }

    #[test]
    fn overview_empty() {
        let overview = Overview::from_sets(&[]);
        assert_eq!(overview.total_sets, 0);
        assert_eq!(overview.average_mcq_accuracy, 0);
        assert!(overview.recently_practiced.is_empty());
    }

    #[test]
    fn last_practiced_labels() {
        const DAY: i64 = 1000 * 60 * 60 * 24;
        assert_eq!(format_last_practiced(None, NOW), "Never");
        assert_eq!(format_last_practiced(Some(NOW - 1000), NOW), "Today");
        assert_eq!(format_last_practiced(Some(NOW - DAY), NOW), "Yesterday");
        assert_eq!(format_last_practiced(Some(NOW - 3 * DAY), NOW), "3 days ago");
        //2023-11-14T22:13:20Z minus ten days
        assert_eq!(format_last_practiced(Some(NOW - 10 * DAY), NOW), "Nov 4");
    }

    #[test]
    fn seconds_as_clock() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(75), "1:15");
    }
}
