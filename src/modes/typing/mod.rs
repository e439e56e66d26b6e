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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use widget::TypingWidget;

use crate::{
    event::clear_and_match_event, random::shuffled, stats::PracticeOutcome,
    terminal::TerminalWrapper, words::WordEntry, FlashsetsError,
};

use super::Phase;

mod widget;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingAnswer {
    pub correct: bool,
    pub expected: String,
    ///Set when this answer used up the last word.
    pub outcome: Option<PracticeOutcome>,
}

pub struct TypingSession {
    words: Vec<WordEntry>,
    index: usize,
    correct: u32,
    incorrect: u32,
    skipped: u32,
    started_at: Option<Instant>,
    phase: Phase,
}

impl TypingSession {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words,
            index: 0,
            correct: 0,
            incorrect: 0,
            skipped: 0,
            started_at: None,
            phase: Phase::Ready,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        self.words = shuffled(&self.words, rng);
        self.index = 0;
        self.correct = 0;
        self.incorrect = 0;
        self.skipped = 0;
        self.started_at = Some(now);
        self.phase = if self.words.is_empty() {
            Phase::Ended
        } else {
            Phase::Playing
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&WordEntry> {
        (self.phase == Phase::Playing)
            .then(|| self.words.get(self.index))
            .flatten()
    }

    ///`(word number, word count)`, the number being 1 based.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.words.len())
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    ///Compares the typed term against the current word, ignoring case and surrounding
    ///whitespace.
    pub fn submit(&mut self, typed: &str, now: Instant) -> Option<TypingAnswer> {
        let expected = self.current()?.term.clone();
        let correct = typed.trim().to_lowercase() == expected.trim().to_lowercase();

        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        Some(TypingAnswer {
            correct,
            expected,
            outcome: self.advance(now),
        })
    }

    ///Moves on without an answer. Skips count against time but not accuracy.
    pub fn skip(&mut self, now: Instant) -> Option<PracticeOutcome> {
        self.current()?;
        self.skipped += 1;
        self.advance(now)
    }

    fn advance(&mut self, now: Instant) -> Option<PracticeOutcome> {
        self.index += 1;
        if self.index < self.words.len() {
            return None;
        }

        self.phase = Phase::Ended;
        let elapsed = self
            .started_at
            .map(|started_at| now.saturating_duration_since(started_at))
            .unwrap_or_default();
        let (wpm, accuracy) = typing_scores(self.correct, self.incorrect, elapsed);

        Some(PracticeOutcome::Typing { wpm, accuracy })
    }
}

///`(wpm, accuracy)`, where a word per minute is any attempted answer.
pub fn typing_scores(correct: u32, incorrect: u32, elapsed: Duration) -> (u32, u32) {
    let attempted = correct + incorrect;
    if attempted == 0 {
        return (0, 0);
    }

    let minutes = elapsed.as_secs_f64() / 60.0;
    let wpm = if minutes > 0.0 {
        (attempted as f64 / minutes).round() as u32
    } else {
        0
    };
    let accuracy = (correct as f64 / attempted as f64 * 100.0).round() as u32;

    (wpm, accuracy)
}

pub fn show_typing<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    session: &mut TypingSession,
    rng: &mut R,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    session.start(Instant::now(), rng);

    let mut input = String::new();
    let mut feedback: Option<TypingAnswer> = None;

    loop {
        term.render_widget(TypingWidget::new(session, &input, feedback.as_ref()))?;

        match clear_and_match_event(match_user_input)? {
            UserInput::Char(c) => input.push(c),
            UserInput::Backspace => {
                input.pop();
            }
            UserInput::Submit => {
                if let Some(TypingAnswer {
                    outcome: Some(outcome),
                    ..
                }) = feedback.take()
                {
                    return Ok(Some(outcome));
                }
                if input.trim().is_empty() {
                    continue;
                }
                feedback = session.submit(&input, Instant::now());
                input.clear();
            }
            UserInput::Skip => {
                if let Some(outcome) = pending(&feedback).or_else(|| session.skip(Instant::now())) {
                    return Ok(Some(outcome));
                }
                feedback = None;
                input.clear();
            }
            UserInput::Resize => continue,
            UserInput::Quit => return Ok(pending(&feedback)),
        }
    }
}

///A finished session still gets recorded if the user leaves from the last feedback.
fn pending(feedback: &Option<TypingAnswer>) -> Option<PracticeOutcome> {
    feedback.as_ref().and_then(|feedback| feedback.outcome)
}

enum UserInput {
    Char(char),
    Backspace,
    Submit,
    Skip,
    Resize,
    Quit,
}

fn match_user_input(event: Event) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UserInput::Skip)
            }
            KeyCode::Char(c) => Some(UserInput::Char(c)),
            KeyCode::Backspace => Some(UserInput::Backspace),
            KeyCode::Enter => Some(UserInput::Submit),
            KeyCode::Tab => Some(UserInput::Skip),
            KeyCode::Esc => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{modes::Phase, stats::PracticeOutcome, words::parse_words};

    use super::{typing_scores, TypingSession};

    fn started(text: &str, now: Instant) -> TypingSession {
        let mut session = TypingSession::new(parse_words(text));
        session.start(now, &mut StdRng::seed_from_u64(31));
        session
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let start = Instant::now();
        let mut session = started("Bonjour: hello\nMerci: thanks", start);

        let term = session.current().map(|w| w.term.clone()).expect("No word");
        let answer = session
            .submit(&format!("  {}  ", term.to_uppercase()), start)
            .expect("Answer not accepted");
        assert!(answer.correct);
        assert_eq!(answer.expected, term);
        assert_eq!(answer.outcome, None);

        let answer = session.submit("nope", start).expect("Answer not accepted");
        assert!(!answer.correct);
        assert!(answer.outcome.is_some());
    }

    #[test]
    fn last_answer_is_counted() {
        let start = Instant::now();
        let mut session = started("a: 1\nb: 2\nc: 3\nd: 4", start);

        let mut outcome = None;
        while let Some(word) = session.current().cloned() {
            outcome = session
                .submit(&word.term, start + Duration::from_secs(30))
                .and_then(|answer| answer.outcome);
        }

        //Four words in half a minute
        assert_eq!(outcome, Some(PracticeOutcome::Typing { wpm: 8, accuracy: 100 }));
        assert_eq!(session.correct(), 4);
        assert_eq!(session.phase(), Phase::Ended);
    }

    #[test]
    fn skips_are_not_attempts() {
        let start = Instant::now();
        let mut session = started("a: 1\nb: 2\nc: 3", start);

        assert_eq!(session.skip(start), None);
        let word = session.current().cloned().expect("No word");
        session.submit(&word.term, start);
        let outcome = session.skip(start + Duration::from_secs(60));

        assert_eq!(session.skipped(), 2);
        assert_eq!(outcome, Some(PracticeOutcome::Typing { wpm: 1, accuracy: 100 }));
        assert_eq!(session.skip(start), None);
    }

    #[test]
    fn scores() {
        assert_eq!(typing_scores(0, 0, Duration::from_secs(60)), (0, 0));
        assert_eq!(typing_scores(3, 1, Duration::ZERO), (0, 75));
        assert_eq!(typing_scores(2, 1, Duration::from_secs(120)), (2, 67));
        assert_eq!(typing_scores(10, 0, Duration::from_secs(45)), (13, 100));
    }
}
