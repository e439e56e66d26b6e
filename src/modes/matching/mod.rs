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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use hashbrown::HashSet;
use rand::Rng;
use widget::{MatchingWidget, MatchingWidgetState};

use crate::{
    event::clear_and_match_event_within, random::shuffled, stats::PracticeOutcome,
    terminal::TerminalWrapper, words::WordEntry, FlashsetsError,
};

use super::Phase;

mod widget;

///Most pairs shown in one round.
pub const MAX_PAIRS: usize = 8;

const FEEDBACK_DURATION: Duration = Duration::from_millis(500);
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Terms,
    Definitions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub word_id: String,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Selected,
    Deselected,
    Matched,
    ///Carries the `(term, definition)` cells that were wrongly paired.
    Mismatched(usize, usize),
    Completed(PracticeOutcome),
    Ignored,
}

pub struct MatchingSession {
    words: Vec<WordEntry>,
    terms: Vec<Cell>,
    definitions: Vec<Cell>,
    selected_term: Option<usize>,
    selected_definition: Option<usize>,
    matched: HashSet<String>,
    mismatch: Option<(usize, usize)>,
    started_at: Option<Instant>,
    elapsed: Duration,
    phase: Phase,
}

impl MatchingSession {
    ///Only words that are not paused take part, and at most [`MAX_PAIRS`] of them.
    pub fn new(words: &[WordEntry]) -> Self {
        let words = words
            .iter()
            .filter(|word| !word.paused)
            .take(MAX_PAIRS)
            .cloned()
            .collect();

        Self {
            words,
            terms: vec![],
            definitions: vec![],
            selected_term: None,
            selected_definition: None,
            matched: HashSet::new(),
            mismatch: None,
            started_at: None,
            elapsed: Duration::ZERO,
            phase: Phase::Ready,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        self.terms = shuffled(&self.words, rng)
            .into_iter()
            .map(|word| Cell {
                word_id: word.id,
                text: word.term,
            })
            .collect();
        self.definitions = shuffled(&self.words, rng)
            .into_iter()
            .map(|word| Cell {
                word_id: word.id,
                text: word.definition,
            })
            .collect();

        self.selected_term = None;
        self.selected_definition = None;
        self.matched.clear();
        self.mismatch = None;
        self.started_at = Some(now);
        self.elapsed = Duration::ZERO;
        self.phase = if self.words.is_empty() {
            Phase::Ended
        } else {
            Phase::Playing
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cells(&self, column: Column) -> &[Cell] {
        match column {
            Column::Terms => &self.terms,
            Column::Definitions => &self.definitions,
        }
    }

    pub fn selected(&self, column: Column) -> Option<usize> {
        match column {
            Column::Terms => self.selected_term,
            Column::Definitions => self.selected_definition,
        }
    }

    pub fn is_matched(&self, cell: &Cell) -> bool {
        self.matched.contains(&cell.word_id)
    }

    pub fn mismatch(&self) -> Option<(usize, usize)> {
        self.mismatch
    }

    pub fn clear_feedback(&mut self) {
        self.mismatch = None;
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn pair_count(&self) -> usize {
        self.words.len()
    }

    ///Time since start, frozen once every pair is matched.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at) {
            (Phase::Playing, Some(started_at)) => now.saturating_duration_since(started_at),
            _ => self.elapsed,
        }
    }

    ///Selects a cell, or clears the selection if that cell was already selected. A
    ///term and a definition both being selected resolves the pair.
    pub fn select(&mut self, column: Column, index: usize, now: Instant) -> Selection {
        if self.phase != Phase::Playing {
            return Selection::Ignored;
        }
        let Some(cell) = self.cells(column).get(index) else {
            return Selection::Ignored;
        };
        if self.is_matched(cell) {
            return Selection::Ignored;
        }

        let slot = match column {
            Column::Terms => &mut self.selected_term,
            Column::Definitions => &mut self.selected_definition,
        };
        if *slot == Some(index) {
            *slot = None;
            return Selection::Deselected;
        }
        *slot = Some(index);

        let (Some(term), Some(definition)) = (self.selected_term, self.selected_definition) else {
            return Selection::Selected;
        };

        self.selected_term = None;
        self.selected_definition = None;

        let word_id = &self.terms[term].word_id;
        if *word_id != self.definitions[definition].word_id {
            self.mismatch = Some((term, definition));
            return Selection::Mismatched(term, definition);
        }

        self.matched.insert(word_id.clone());
        if self.matched.len() < self.words.len() {
            return Selection::Matched;
        }

        self.elapsed = self.elapsed(now);
        self.phase = Phase::Ended;

        Selection::Completed(PracticeOutcome::Matching {
            matched: self.matched.len() as u32,
            total: self.words.len() as u32,
            seconds: self.elapsed.as_secs(),
        })
    }
}

pub fn show_matching<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    session: &mut MatchingSession,
    rng: &mut R,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    session.start(Instant::now(), rng);

    let state = &mut MatchingWidgetState::default();
    let mut feedback_until = None;

    while session.phase() == Phase::Playing {
        let now = Instant::now();
        if feedback_until.is_some_and(|until| now >= until) {
            session.clear_feedback();
            feedback_until = None;
        }

        term.render_stateful_widget(MatchingWidget::new(session, now), state)?;

        let Some(input) =
            clear_and_match_event_within(REDRAW_INTERVAL, |event| match_user_input(event, state))?
        else {
            continue;
        };

        let (column, index) = match input {
            UserInput::Select(column, index) => (column, index),
            UserInput::Choose => state.cursor(),
            UserInput::Move(column, delta) => {
                state.move_cursor(column, delta, session);
                continue;
            }
            UserInput::SwitchColumn => {
                state.switch_column();
                continue;
            }
            UserInput::Resize => continue,
            UserInput::Quit => return Ok(None),
        };

        match session.select(column, index, Instant::now()) {
            Selection::Completed(outcome) => return Ok(Some(outcome)),
            Selection::Mismatched(..) => {
                feedback_until = Some(Instant::now() + FEEDBACK_DURATION);
            }
            _ => {}
        }
    }

    Ok(None)
}

enum UserInput {
    Select(Column, usize),
    Move(Column, isize),
    SwitchColumn,
    Choose,
    Resize,
    Quit,
}

fn match_user_input(event: Event, state: &MatchingWidgetState) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Move(state.cursor().0, -1)),
            KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Move(state.cursor().0, 1)),
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => Some(UserInput::SwitchColumn),
            KeyCode::Enter | KeyCode::Char(' ') => Some(UserInput::Choose),
            KeyCode::Esc | KeyCode::Char('q') => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(_),
            column,
            row,
            ..
        }) => state
            .cell_at((column, row))
            .map(|(column, index)| UserInput::Select(column, index)),
        _ => None,
    }
}
