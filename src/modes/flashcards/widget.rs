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
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Widget, Wrap},
};

use super::FlashcardSession;

pub(super) struct FlashcardWidget<'a> {
    session: &'a FlashcardSession,
}

impl<'a> FlashcardWidget<'a> {
    pub fn new(session: &'a FlashcardSession) -> Self {
        Self { session }
    }
}

const HELP: &str =
    "space flip | k known | u unknown | enter skip | ← back | s shuffle | r restart | t order | q quit";

impl Widget for FlashcardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((face_name, face)) = self.session.face() else {
            return;
        };

        let (header_area, face_name_area, face_area, progress_area, help_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(2, 3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ],
            );

            let split = layout.split(area);
            (split[0], split[1], split[2], split[3], split[4])
        };

        let (number, count) = self.session.position();
        Paragraph::new(Line::from(vec![
            Span::raw(format!("Card {number} of {count}  ")),
            Span::raw(format!("{} known", self.session.known_count())).fg(Color::Green),
            Span::raw(" / "),
            Span::raw(format!("{} unknown", self.session.unknown_count())).fg(Color::Red),
            Span::raw(if self.session.show_definition_first() {
                "  (Definition → Term)"
            } else {
                "  (Term → Definition)"
            }),
        ]))
        .render(header_area, buf);

        Paragraph::new(format!("{face_name}:"))
            .wrap(Wrap { trim: false })
            .centered()
            .render(face_name_area, buf);

        Paragraph::new(face)
            .wrap(Wrap { trim: false })
            .centered()
            .block(Block::bordered())
            .render(face_area, buf);

        Gauge::default()
            .ratio(number as f64 / count.max(1) as f64)
            .label(format!("{number}/{count}"))
            .use_unicode(true)
            .render(progress_area, buf);

        Paragraph::new(HELP).centered().dim().render(help_area, buf);
    }
}
