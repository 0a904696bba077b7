use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::Palette;
use crate::trivia::Question;

/// Renders the question on screen with its choices, countdown and, once
/// answered, the feedback.
pub struct QuestionView<'a> {
    question: &'a Question,
    position: usize,
    total: usize,
    cursor: usize,
    answered: bool,
    selected: Option<&'a str>,
    seconds_left: u32,
    palette: Palette,
}

impl<'a> QuestionView<'a> {
    pub fn new(question: &'a Question, position: usize, total: usize, palette: Palette) -> Self {
        Self {
            question,
            position,
            total,
            cursor: 0,
            answered: false,
            selected: None,
            seconds_left: 0,
            palette,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Switch to feedback mode. `selected` is `None` when time ran out.
    pub fn answered(mut self, selected: Option<&'a str>) -> Self {
        self.answered = true;
        self.selected = selected;
        self
    }

    pub fn seconds_left(mut self, seconds: u32) -> Self {
        self.seconds_left = seconds;
        self
    }

    fn header(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                format!("Question {} of {}", self.position, self.total),
                self.palette.title_style(),
            ),
            Span::styled(
                format!("  {} · {}", self.question.category, self.question.difficulty),
                self.palette.text_style(),
            ),
        ])
    }

    fn timer(&self) -> Line<'a> {
        let style = if self.seconds_left <= 5 {
            Style::default().fg(self.palette.incorrect).bold()
        } else {
            self.palette.accent_style()
        };
        let label = if self.answered { "next in" } else { "time left" };
        Line::from(Span::styled(
            format!("{} {}s", label, self.seconds_left),
            style,
        ))
        .alignment(Alignment::Right)
    }

    fn feedback(&self) -> Option<Line<'a>> {
        if !self.answered {
            return None;
        }
        let line = match self.selected {
            None => Line::from(vec![
                Span::styled("Time's up! ", Style::default().fg(self.palette.incorrect).bold()),
                Span::styled(
                    format!("The answer was {}", self.question.correct_answer),
                    self.palette.text_style(),
                ),
            ]),
            Some(choice) if self.question.is_correct(Some(choice)) => Line::from(Span::styled(
                "Correct!",
                Style::default().fg(self.palette.correct).bold(),
            )),
            Some(_) => Line::from(vec![
                Span::styled("Wrong! ", Style::default().fg(self.palette.incorrect).bold()),
                Span::styled(
                    format!("The answer was {}", self.question.correct_answer),
                    self.palette.text_style(),
                ),
            ]),
        };
        Some(line)
    }

    fn choice_style(&self, index: usize, choice: &str) -> Style {
        if self.answered {
            if choice == self.question.correct_answer {
                return Style::default().fg(self.palette.correct).bold();
            }
            if self.selected == Some(choice) {
                return Style::default().fg(self.palette.incorrect).bold();
            }
            return self.palette.text_style().add_modifier(Modifier::DIM);
        }
        if index == self.cursor {
            self.palette.accent_style().add_modifier(Modifier::REVERSED)
        } else {
            self.palette.text_style()
        }
    }
}

impl Widget for QuestionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.block_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(self.question.choices.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        Paragraph::new(self.header()).render(layout[0], buf);
        Paragraph::new(self.timer()).render(layout[1], buf);

        Paragraph::new(self.question.prompt.as_str())
            .style(self.palette.title_style())
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);

        let items: Vec<ListItem<'_>> = self
            .question
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                ListItem::new(Line::from(Span::styled(
                    format!(" {}. {} ", i + 1, choice),
                    self.choice_style(i, choice),
                )))
            })
            .collect();
        Widget::render(List::new(items), layout[3], buf);

        if let Some(line) = self.feedback() {
            Paragraph::new(line).render(layout[5], buf);
        }
    }
}
