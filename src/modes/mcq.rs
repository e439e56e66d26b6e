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

use ratatui::style::Style;
use rand::Rng;

use crate::{
    event::clear_and_match_event, random::shuffled, stats::PracticeOutcome,
    terminal::TerminalWrapper, words::WordEntry, FlashsetsError,
};

use super::{
    choice::{
        match_choice_input, ChoiceInput, ChoiceWidget, ChoiceWidgetState, COLOR_CORRECT,
        COLOR_INCORRECT,
    },
    ChoiceQuestion, Phase,
};

const DISTRACTORS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum McqVariant {
    ///One pass over the set.
    #[default]
    Standard,
    ///Deals a fresh pass whenever one runs out, until [`McqSession::finish`].
    Infinite,
    ///Asks every missed word once more after the first pass.
    RetryMissed,
}

impl FromStr for McqVariant {
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "infinite" => Ok(Self::Infinite),
            "retry-missed" | "retry" => Ok(Self::RetryMissed),
            s => Err(format!("Variant not recognized: {s}")),
        }
    }

    type Err = String;
}

impl Display for McqVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::Infinite => "infinite",
            Self::RetryMissed => "retry-missed",
        })
    }
}

pub struct McqSession {
    words: Vec<WordEntry>,
    variant: McqVariant,
    questions: Vec<ChoiceQuestion>,
    index: usize,
    selected: Option<usize>,
    correct: u32,
    answered: u32,
    missed: Vec<WordEntry>,
    retrying: bool,
    pass: u32,
    phase: Phase,
}

impl McqSession {
    pub fn new(words: Vec<WordEntry>, variant: McqVariant) -> Self {
        Self {
            words,
            variant,
            questions: vec![],
            index: 0,
            selected: None,
            correct: 0,
            answered: 0,
            missed: vec![],
            retrying: false,
            pass: 0,
            phase: Phase::Ready,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions = generate_pass(&self.words, &self.words, rng);
        self.index = 0;
        self.selected = None;
        self.correct = 0;
        self.answered = 0;
        self.missed.clear();
        self.retrying = false;
        self.pass = 1;
        self.phase = if self.questions.is_empty() {
            Phase::Ended
        } else {
            Phase::Playing
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn variant(&self) -> McqVariant {
        self.variant
    }

    pub fn current(&self) -> Option<&ChoiceQuestion> {
        (self.phase == Phase::Playing)
            .then(|| self.questions.get(self.index))
            .flatten()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    ///`(question number, questions in this pass)`, both 1 based.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn pass(&self) -> u32 {
        self.pass
    }

    pub fn is_retrying(&self) -> bool {
        self.retrying
    }

    ///Locks in an answer for the current question. Returns whether it was correct, or
    ///`None` if the question was already answered or there is no question.
    pub fn answer(&mut self, index: usize) -> Option<bool> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.current()?;
        if index >= question.options.len() {
            return None;
        }

        let correct = question.is_correct(index);
        let missed = (!correct && !self.retrying).then(|| question.word.clone());

        self.missed.extend(missed);
        self.selected = Some(index);
        self.answered += 1;
        if correct {
            self.correct += 1;
        }

        Some(correct)
    }

    ///Moves past an answered question. Returns the outcome when that ends the session.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PracticeOutcome> {
        if self.phase != Phase::Playing || self.selected.is_none() {
            return None;
        }

        self.selected = None;
        self.index += 1;
        if self.index < self.questions.len() {
            return None;
        }

        match self.variant {
            McqVariant::Infinite => {
                self.questions = generate_pass(&self.words, &self.words, rng);
                self.index = 0;
                self.pass += 1;
                None
            }
            McqVariant::RetryMissed if !self.retrying && !self.missed.is_empty() => {
                let missed = std::mem::take(&mut self.missed);
                self.questions = generate_pass(&missed, &self.words, rng);
                self.index = 0;
                self.retrying = true;
                self.pass += 1;
                None
            }
            McqVariant::Standard | McqVariant::RetryMissed => self.complete(),
        }
    }

    ///Ends an infinite session. The other variants only end by running out of
    ///questions, so this returns `None` for them.
    pub fn finish(&mut self) -> Option<PracticeOutcome> {
        if self.variant != McqVariant::Infinite {
            return None;
        }
        self.complete()
    }

    fn complete(&mut self) -> Option<PracticeOutcome> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.phase = Phase::Ended;

        Some(PracticeOutcome::Mcq {
            correct: self.correct,
            total: self.answered,
        })
    }
}

fn generate_pass<R: Rng + ?Sized>(
    words: &[WordEntry],
    pool: &[WordEntry],
    rng: &mut R,
) -> Vec<ChoiceQuestion> {
    shuffled(words, rng)
        .iter()
        .map(|word| ChoiceQuestion::generate(word, pool, DISTRACTORS, rng))
        .collect()
}

pub fn show_mcq<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    session: &mut McqSession,
    rng: &mut R,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    session.start(rng);
    let state = &mut ChoiceWidgetState::default();

    while let Some(question) = session.current() {
        let (number, count) = session.position();
        let header = format!(
            "{}Question {number} of {count} | Score: {}{}",
            if session.is_retrying() { "Retry: " } else { "" },
            session.correct(),
            if session.variant() == McqVariant::Infinite {
                format!(" | Pass {} (f to finish)", session.pass())
            } else {
                String::new()
            },
        );
        let ratio = session.correct() as f64 / session.answered().max(1) as f64;
        let label = format!("{}/{} correct", session.correct(), session.answered());
        let gauge_style = Style::default().fg(COLOR_CORRECT).bg(COLOR_INCORRECT);

        let mut widget = ChoiceWidget::new(question, header).gauge(ratio, label, gauge_style);
        if let Some(selected) = session.selected() {
            widget = widget.answered(selected);
        }
        term.render_stateful_widget(widget, state)?;

        match clear_and_match_event(|event| match_choice_input(event, state))? {
            ChoiceInput::Answer(index) if session.selected().is_none() => {
                session.answer(index);
            }
            ChoiceInput::Answer(_) | ChoiceInput::Continue => {
                if let Some(outcome) = session.next(rng) {
                    return Ok(Some(outcome));
                }
            }
            ChoiceInput::Finish => {
                if let Some(outcome) = session.finish() {
                    return Ok(Some(outcome));
                }
            }
            ChoiceInput::Resize => continue,
            ChoiceInput::Quit => {
                log::debug!("Multiple choice quit without finishing");
                return Ok(None);
            }
        }
    }

    Ok(None)
}
