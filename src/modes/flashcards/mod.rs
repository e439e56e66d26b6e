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

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use hashbrown::HashSet;
use rand::Rng;
use widget::FlashcardWidget;

use crate::{
    event::clear_and_match_event, random::shuffled, stats::PracticeOutcome,
    terminal::TerminalWrapper, words::WordEntry, FlashsetsError,
};

use super::Phase;

mod widget;

///Walks a set one card at a time, tallying what the user knew.
pub struct FlashcardSession {
    cards: Vec<WordEntry>,
    index: usize,
    known: HashSet<String>,
    unknown: HashSet<String>,
    flipped: bool,
    show_definition_first: bool,
    phase: Phase,
}

impl FlashcardSession {
    pub fn new(cards: Vec<WordEntry>, show_definition_first: bool) -> Self {
        Self {
            cards,
            index: 0,
            known: HashSet::new(),
            unknown: HashSet::new(),
            flipped: false,
            show_definition_first,
            phase: Phase::Ready,
        }
    }

    ///Begins from the first card, keeping the current order.
    pub fn start(&mut self) {
        self.index = 0;
        self.known.clear();
        self.unknown.clear();
        self.flipped = false;
        self.phase = if self.cards.is_empty() {
            Phase::Ended
        } else {
            Phase::Playing
        };
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = shuffled(&self.cards, rng);
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&WordEntry> {
        (self.phase == Phase::Playing)
            .then(|| self.cards.get(self.index))
            .flatten()
    }

    ///`(label, text)` of the face currently showing.
    pub fn face(&self) -> Option<(&'static str, &str)> {
        let card = self.current()?;
        let definition_showing = self.flipped != self.show_definition_first;

        Some(if definition_showing {
            ("Definition", card.definition.as_str())
        } else {
            ("Term", card.term.as_str())
        })
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn show_definition_first(&self) -> bool {
        self.show_definition_first
    }

    ///`(card number, card count)`, the number being 1 based.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn unknown_count(&self) -> usize {
        self.unknown.len()
    }

    pub fn flip(&mut self) {
        if self.phase == Phase::Playing {
            self.flipped = !self.flipped;
        }
    }

    pub fn toggle_definition_first(&mut self) {
        self.show_definition_first = !self.show_definition_first;
    }

    pub fn known(&mut self) -> Option<PracticeOutcome> {
        self.mark(Mark::Known)
    }

    pub fn unknown(&mut self) -> Option<PracticeOutcome> {
        self.mark(Mark::Unknown)
    }

    pub fn skip(&mut self) -> Option<PracticeOutcome> {
        self.mark(Mark::Skip)
    }

    pub fn prev(&mut self) {
        if self.phase == Phase::Playing && self.index > 0 {
            self.flipped = false;
            self.index -= 1;
        }
    }

    fn mark(&mut self, mark: Mark) -> Option<PracticeOutcome> {
        let id = self.current()?.id.clone();
        //Counted before this card is recorded, then the card itself is always credited
        let known_before = self.known.len();

        match mark {
            Mark::Known => {
                self.known.insert(id);
            }
            Mark::Unknown => {
                self.unknown.insert(id);
            }
            Mark::Skip => {}
        }

        self.flipped = false;
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            return None;
        }

        self.phase = Phase::Ended;
        let total = self.cards.len() as u32;
        Some(PracticeOutcome::Flashcard {
            known: (known_before as u32 + 1).min(total),
            total,
        })
    }
}

enum Mark {
    Known,
    Unknown,
    Skip,
}

pub fn show_flashcards<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    session: &mut FlashcardSession,
    rng: &mut R,
) -> Result<Option<PracticeOutcome>, FlashsetsError> {
    session.start();

    while session.phase() == Phase::Playing {
        term.render_widget(FlashcardWidget::new(session))?;

        let outcome = match clear_and_match_event(match_user_input)? {
            UserInput::Flip => {
                session.flip();
                None
            }
            UserInput::Known => session.known(),
            UserInput::Unknown => session.unknown(),
            UserInput::Skip => session.skip(),
            UserInput::Prev => {
                session.prev();
                None
            }
            UserInput::Shuffle => {
                session.shuffle(rng);
                None
            }
            UserInput::Restart => {
                session.restart();
                None
            }
            UserInput::ToggleOrder => {
                session.toggle_definition_first();
                None
            }
            UserInput::Resize => None,
            UserInput::Quit => return Ok(None),
        };

        if outcome.is_some() {
            return Ok(outcome);
        }
    }

    Ok(None)
}

enum UserInput {
    Flip,
    Known,
    Unknown,
    Skip,
    Prev,
    Shuffle,
    Restart,
    ToggleOrder,
    Resize,
    Quit,
}

fn match_user_input(event: Event) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down | KeyCode::Char('f') => {
                Some(UserInput::Flip)
            }
            KeyCode::Right | KeyCode::Char('k') | KeyCode::Char('y') => Some(UserInput::Known),
            KeyCode::Char('u') | KeyCode::Char('n') => Some(UserInput::Unknown),
            KeyCode::Enter | KeyCode::Tab => Some(UserInput::Skip),
            KeyCode::Left | KeyCode::Backspace => Some(UserInput::Prev),
            KeyCode::Char('s') => Some(UserInput::Shuffle),
            KeyCode::Char('r') => Some(UserInput::Restart),
            KeyCode::Char('t') => Some(UserInput::ToggleOrder),
            KeyCode::Esc | KeyCode::Char('q') => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(button),
            ..
        }) => Some(match button {
            MouseButton::Left => UserInput::Flip,
            MouseButton::Right => UserInput::Known,
            MouseButton::Middle => UserInput::Unknown,
        }),
        _ => None,
    }
}
