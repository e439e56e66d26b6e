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

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::style::Style;

use crate::{
    color::LinearGradient, event::clear_and_match_event_within, random::GetRandom,
    stats::PracticeOutcome, terminal::TerminalWrapper, words::WordEntry, FlashsetsError,
};

use super::{
    choice::{match_choice_input, ChoiceInput, ChoiceWidget, ChoiceWidgetState},
    ChoiceQuestion, Phase,
};

pub const ROUND_DURATION: Duration = Duration::from_secs(60);

const DISTRACTORS: usize = 3;
const BASE_POINTS: u32 = 10;
///Combo is kept in halves so that every step of 0.5 stays an integer.
const COMBO_START_HALVES: u32 = 2;
const COMBO_MAX_HALVES: u32 = 10;

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedAnswer {
    pub correct: bool,
    pub points: u32,
}

pub struct SpeedMatchSession {
    words: Vec<WordEntry>,
    question: Option<ChoiceQuestion>,
    score: u32,
    streak: u32,
    best_streak: u32,
    combo_halves: u32,
    started_at: Option<Instant>,
    remaining: Duration,
    last_answer: Option<SpeedAnswer>,
    phase: Phase,
}

impl SpeedMatchSession {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words,
            question: None,
            score: 0,
            streak: 0,
            best_streak: 0,
            combo_halves: COMBO_START_HALVES,
            started_at: None,
            remaining: ROUND_DURATION,
            last_answer: None,
            phase: Phase::Ready,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.combo_halves = COMBO_START_HALVES;
        self.started_at = Some(now);
        self.remaining = ROUND_DURATION;
        self.last_answer = None;
        self.question = None;

        if self.words.is_empty() {
            self.phase = Phase::Ended;
            return;
        }
        self.phase = Phase::Playing;
        self.next_question(rng);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question(&self) -> Option<&ChoiceQuestion> {
        (self.phase == Phase::Playing)
            .then_some(self.question.as_ref())
            .flatten()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn combo(&self) -> f64 {
        self.combo_halves as f64 / 2.0
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn last_answer(&self) -> Option<SpeedAnswer> {
        self.last_answer
    }

    ///Recomputes the time left. Returns the outcome once, when time runs out.
    pub fn tick(&mut self, now: Instant) -> Option<PracticeOutcome> {
        if self.phase != Phase::Playing {
            return None;
        }
        let started_at = self.started_at?;

        self.remaining = ROUND_DURATION.saturating_sub(now.saturating_duration_since(started_at));
        if !self.remaining.is_zero() {
            return None;
        }

        self.phase = Phase::Ended;
        log::debug!(
            "Speed match over with {} points, best streak {}",
            self.score,
            self.best_streak
        );
        Some(PracticeOutcome::SpeedMatch { score: self.score })
    }

    ///Scores an answer to the current question and deals the next one.
    pub fn answer<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Option<SpeedAnswer> {
        let question = self.question()?;
        if index >= question.options.len() {
            return None;
        }

        let answer = if question.is_correct(index) {
            let points = BASE_POINTS * self.combo_halves / 2;
            self.score += points;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.combo_halves = (self.combo_halves + 1).min(COMBO_MAX_HALVES);
            SpeedAnswer {
                correct: true,
                points,
            }
        } else {
            self.streak = 0;
            self.combo_halves = COMBO_START_HALVES;
            SpeedAnswer {
                correct: false,
                points: 0,
            }
        };

        self.last_answer = Some(answer);
        self.next_question(rng);

        Some(answer)
    }

    fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let previous = self.question.as_ref().map(|question| question.word.id.as_str());

        let candidates = self
            .words
            .iter()
            .filter(|word| self.words.len() == 1 || Some(word.id.as_str()) != previous)
            .collect::<Vec<_>>();

        self.question = candidates
            .get_random(rng)
            .map(|word| ChoiceQuestion::generate(word, &self.words, DISTRACTORS, rng));
    }
}

pub fn show_speed_match<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    session: &mut SpeedMatchSession,
    rng: &mut R,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    session.start(Instant::now(), rng);

    let state = &mut ChoiceWidgetState::default();
    let gradient = LinearGradient::traffic_light();

    loop {
        if let Some(outcome) = session.tick(Instant::now()) {
            return Ok(Some(outcome));
        }
        let Some(question) = session.question() else {
            return Ok(None);
        };

        let remaining = session.remaining();
        let elapsed = 1.0 - remaining.as_secs_f64() / ROUND_DURATION.as_secs_f64();
        let header = format!(
            "Score: {} | Streak: {} (best {}) | Combo: x{:.1}{}",
            session.score(),
            session.streak(),
            session.best_streak(),
            session.combo(),
            match session.last_answer() {
                Some(SpeedAnswer {
                    correct: true,
                    points,
                }) => format!(" | +{points}"),
                Some(SpeedAnswer { correct: false, .. }) => " | Miss!".to_owned(),
                None => String::new(),
            }
        );

        term.render_stateful_widget(
            ChoiceWidget::new(question, header).gauge(
                remaining.as_secs_f64() / ROUND_DURATION.as_secs_f64(),
                format!("{}s", remaining.as_secs_f64().ceil() as u64),
                Style::default().fg(gradient.sample(elapsed).into()),
            ),
            state,
        )?;

        let input = clear_and_match_event_within(REDRAW_INTERVAL, |event| {
            match_choice_input(event, state)
        })?;

        match input {
            Some(ChoiceInput::Answer(index)) => {
                session.answer(index, rng);
            }
            Some(ChoiceInput::Quit) => return Ok(None),
            Some(_) | None => continue,
        }
    }
}
