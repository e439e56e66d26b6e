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

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::{TypingAnswer, TypingSession};

pub(super) struct TypingWidget<'a> {
    session: &'a TypingSession,
    input: &'a str,
    feedback: Option<&'a TypingAnswer>,
}

impl<'a> TypingWidget<'a> {
    pub(super) fn new(
        session: &'a TypingSession,
        input: &'a str,
        feedback: Option<&'a TypingAnswer>,
    ) -> Self {
        Self {
            session,
            input,
            feedback,
        }
    }
}

impl Widget for TypingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (header_area, prompt_area, input_area, feedback_area, help_area) = {
            let split = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(3),
                    Constraint::Length(2),
                    Constraint::Length(1),
                ],
            )
            .split(area);
            (split[0], split[1], split[2], split[3], split[4])
        };

        let (number, count) = self.session.position();
        Paragraph::new(format!(
            "Word {} of {count} | {} correct, {} wrong, {} skipped",
            number.min(count),
            self.session.correct(),
            self.session.incorrect(),
            self.session.skipped(),
        ))
        .render(header_area, buf);

        if let Some(word) = self.session.current() {
            Paragraph::new(word.definition.as_str())
                .wrap(Wrap { trim: false })
                .centered()
                .bold()
                .block(Block::bordered().title("Type the term for"))
                .render(prompt_area, buf);
        }

        Paragraph::new(format!("{}_", self.input))
            .block(Block::bordered())
            .render(input_area, buf);

        match self.feedback {
            Some(TypingAnswer {
                correct: true,
                outcome,
                ..
            }) => Paragraph::new(done_hint("Correct!", outcome.is_some()))
                .fg(Color::Green)
                .centered()
                .render(feedback_area, buf),
            Some(TypingAnswer {
                correct: false,
                expected,
                outcome,
            }) => Paragraph::new(done_hint(
                &format!("Incorrect, it was \"{expected}\""),
                outcome.is_some(),
            ))
            .fg(Color::Red)
            .centered()
            .render(feedback_area, buf),
            None => {}
        }

        Paragraph::new("enter submit | tab skip | esc quit")
            .centered()
            .dim()
            .render(help_area, buf);
    }
}

fn done_hint(message: &str, done: bool) -> String {
    if done {
        format!("{message}\nPress enter to see your results")
    } else {
        message.to_owned()
    }
}
