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

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Gauge, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::stats::format_seconds;

use super::{Column, MatchingSession};

pub(super) struct MatchingWidget<'a> {
    session: &'a MatchingSession,
    now: Instant,
}

impl<'a> MatchingWidget<'a> {
    pub(super) fn new(session: &'a MatchingSession, now: Instant) -> Self {
        Self { session, now }
    }
}

pub(super) struct MatchingWidgetState {
    term_areas: Vec<Rect>,
    definition_areas: Vec<Rect>,
    cursor: (Column, usize),
}

impl Default for MatchingWidgetState {
    fn default() -> Self {
        Self {
            term_areas: vec![],
            definition_areas: vec![],
            cursor: (Column::Terms, 0),
        }
    }
}

impl MatchingWidgetState {
    pub(super) fn cursor(&self) -> (Column, usize) {
        self.cursor
    }

    pub(super) fn switch_column(&mut self) {
        self.cursor.0 = match self.cursor.0 {
            Column::Terms => Column::Definitions,
            Column::Definitions => Column::Terms,
        };
    }

    pub(super) fn move_cursor(&mut self, column: Column, delta: isize, session: &MatchingSession) {
        let len = session.cells(column).len() as isize;
        if len == 0 {
            return;
        }
        self.cursor = (column, (self.cursor.1 as isize + delta).rem_euclid(len) as usize);
    }

    pub(super) fn cell_at(&self, (x, y): (u16, u16)) -> Option<(Column, usize)> {
        let find = |areas: &[Rect]| areas.iter().position(|area| area.contains((x, y).into()));

        find(&self.term_areas)
            .map(|index| (Column::Terms, index))
            .or_else(|| find(&self.definition_areas).map(|index| (Column::Definitions, index)))
    }
}

impl StatefulWidget for MatchingWidget<'_> {
    type State = MatchingWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let session = self.session;

        let (header_area, progress_area, grid_area) = {
            let split = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ],
            )
            .split(area);
            (split[0], split[1], split[2])
        };

        Paragraph::new(format!(
            "{} | {} / {} matched | Select a term, then its definition",
            format_seconds(session.elapsed(self.now).as_secs()),
            session.matched_count(),
            session.pair_count(),
        ))
        .render(header_area, buf);

        Gauge::default()
            .ratio(session.matched_count() as f64 / session.pair_count().max(1) as f64)
            .gauge_style(Style::default().fg(Color::Green))
            .use_unicode(true)
            .label("")
            .render(progress_area, buf);

        let (terms_area, definitions_area) = {
            let split = Layout::new(Direction::Horizontal, [Constraint::Ratio(1, 2); 2])
                .split(grid_area);
            (split[0], split[1])
        };

        state.term_areas = render_column(
            session,
            Column::Terms,
            "Terms",
            terms_area,
            buf,
            state.cursor,
        );
        state.definition_areas = render_column(
            session,
            Column::Definitions,
            "Definitions",
            definitions_area,
            buf,
            state.cursor,
        );
    }
}

fn render_column(
    session: &MatchingSession,
    column: Column,
    title: &str,
    area: Rect,
    buf: &mut Buffer,
    cursor: (Column, usize),
) -> Vec<Rect> {
    let block = Block::bordered().title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let cells = session.cells(column);
    if cells.is_empty() {
        return vec![];
    }

    let rows = Layout::new(
        Direction::Vertical,
        vec![Constraint::Ratio(1, cells.len() as u32); cells.len()],
    )
    .split(inner);

    let mismatched = session.mismatch().map(|(term, definition)| match column {
        Column::Terms => term,
        Column::Definitions => definition,
    });

    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let style = if session.is_matched(cell) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::DIM)
            } else if mismatched == Some(index) {
                Style::default().fg(Color::Red)
            } else if session.selected(column) == Some(index) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            let style = if cursor == (column, index) {
                style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                style
            };

            Paragraph::new(cell.text.as_str())
                .wrap(Wrap { trim: true })
                .centered()
                .style(style)
                .render(rows[index], buf);

            rows[index]
        })
        .collect()
}
