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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::{border, line},
    widgets::{Block, Borders, Gauge, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::ChoiceQuestion;

pub(super) const COLOR_CORRECT: Color = Color::Green;
pub(super) const COLOR_INCORRECT: Color = Color::Red;

const MAX_OPTIONS: usize = 4;

///Prompt with up to four options laid out in a 2x2 grid. Shared by multiple choice and
///speed match.
pub(super) struct ChoiceWidget<'a> {
    question: &'a ChoiceQuestion,
    header: String,
    answered: Option<usize>,
    gauge: Option<(f64, String, Style)>,
}

impl<'a> ChoiceWidget<'a> {
    pub(super) fn new(question: &'a ChoiceQuestion, header: String) -> Self {
        Self {
            question,
            header,
            answered: None,
            gauge: None,
        }
    }

    pub(super) fn answered(mut self, index: usize) -> Self {
        self.answered = Some(index);
        self
    }

    pub(super) fn gauge(mut self, ratio: f64, label: String, style: Style) -> Self {
        self.gauge = Some((ratio.clamp(0.0, 1.0), label, style));
        self
    }
}

#[derive(Default)]
pub(super) struct ChoiceWidgetState {
    pub(super) option_areas: Vec<Rect>,
}

impl StatefulWidget for ChoiceWidget<'_> {
    type State = ChoiceWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let (header_area, question_area, answer_area, gauge_area) = {
            let split = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(2, 3),
                    Constraint::Length(1),
                ],
            )
            .split(area);
            (split[0], split[1], split[2], split[3])
        };

        let (answer_top, answer_bot) = {
            let split =
                Layout::new(Direction::Vertical, [Constraint::Ratio(1, 2); 2]).split(answer_area);
            (split[0], split[1])
        };

        let columns = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Ratio(1, 2),
                Constraint::Min(1),
                Constraint::Ratio(1, 2),
            ],
        );
        let top = columns.split(answer_top);
        let bot = columns.split(answer_bot);
        let grid = [top[0], top[2], bot[0], bot[2]];

        Paragraph::new(self.header).render(header_area, buf);

        let color = match self.answered {
            None => Color::default(),
            Some(index) if self.question.is_correct(index) => COLOR_CORRECT,
            Some(_) => COLOR_INCORRECT,
        };
        Paragraph::new(self.question.word.term.as_str())
            .wrap(Wrap { trim: false })
            .centered()
            .bold()
            .fg(color)
            .render(question_area, buf);

        state.option_areas.clear();
        for (index, option) in self.question.options.iter().take(MAX_OPTIONS).enumerate() {
            let option_area = grid[index];
            state.option_areas.push(option_area);

            let outcome = self.answered.map(|answered| {
                (self.question.is_correct(index), answered == index)
            });
            OptionWidget::new(option, index, outcome).render(option_area, buf);
        }

        Block::new()
            .borders(Borders::RIGHT | Borders::TOP)
            .border_set(border::Set {
                top_right: line::DOUBLE_HORIZONTAL_DOWN,
                ..border::DOUBLE
            })
            .render(top[1], buf);
        Block::new()
            .borders(Borders::RIGHT | Borders::TOP)
            .border_set(border::Set {
                top_right: line::DOUBLE_CROSS,
                ..border::DOUBLE
            })
            .render(bot[1], buf);

        if let Some((ratio, label, style)) = self.gauge {
            Gauge::default()
                .ratio(ratio)
                .label(label)
                .gauge_style(style)
                .use_unicode(true)
                .render(gauge_area, buf);
        }
    }
}

struct OptionWidget<'a> {
    text: &'a str,
    index: usize,
    ///`(is_correct, is_answered)` once an answer has been given.
    outcome: Option<(bool, bool)>,
}

impl<'a> OptionWidget<'a> {
    fn new(text: &'a str, index: usize, outcome: Option<(bool, bool)>) -> Self {
        Self {
            text,
            index,
            outcome,
        }
    }
}

impl Widget for OptionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fg = match self.outcome {
            Some((true, _)) => COLOR_CORRECT,
            Some((false, true)) => COLOR_INCORRECT,
            _ => Color::default(),
        };

        Paragraph::new(format!("{}: {}", option_label(self.index), self.text))
            .wrap(Wrap { trim: false })
            .centered()
            .block(
                Block::bordered()
                    .borders(Borders::TOP)
                    .border_set(border::DOUBLE),
            )
            .fg(fg)
            .render(area, buf)
    }
}

fn option_label(index: usize) -> char {
    (b'A' + index as u8) as char
}

pub(super) enum ChoiceInput {
    Answer(usize),
    Continue,
    Finish,
    Resize,
    Quit,
}

pub(super) fn match_choice_input(event: Event, state: &ChoiceWidgetState) -> Option<ChoiceInput> {
    let option_count = state.option_areas.len();

    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                (index < option_count).then_some(ChoiceInput::Answer(index))
            }
            KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
                let index = c.to_ascii_lowercase() as usize - 'a' as usize;
                (index < option_count).then_some(ChoiceInput::Answer(index))
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(ChoiceInput::Continue),
            KeyCode::Char('f') => Some(ChoiceInput::Finish),
            KeyCode::Esc | KeyCode::Char('q') => Some(ChoiceInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(ChoiceInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(_),
            column,
            row,
            ..
        }) => state
            .option_areas
            .iter()
            .position(|area| area.contains((column, row).into()))
            .map(ChoiceInput::Answer),
        _ => None,
    }
}
