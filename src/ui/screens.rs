use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::Palette;
use crate::config::Settings;
use crate::trivia::Category;

/// Name shown for a category id; 0 means any category.
pub fn category_name(id: u32, categories: &[Category]) -> String {
    if id == 0 {
        return "Any category".to_string();
    }
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Category {}", id))
}

fn framed(palette: Palette, title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.block_style())
        .title(Span::styled(format!(" {} ", title), palette.title_style()))
}

/// Welcome screen with the current gameplay options.
pub struct StartScreen<'a> {
    settings: &'a Settings,
    categories: &'a [Category],
    questions: usize,
    palette: Palette,
}

impl<'a> StartScreen<'a> {
    pub fn new(
        settings: &'a Settings,
        categories: &'a [Category],
        questions: usize,
        palette: Palette,
    ) -> Self {
        Self {
            settings,
            categories,
            questions,
            palette,
        }
    }
}

impl Widget for StartScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let p = self.palette;
        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), p.text_style()),
                Span::styled(value, p.accent_style()),
            ])
        };

        let text = vec![
            Line::from(Span::styled("Trivia time!", p.title_style())),
            Line::from(""),
            row(
                "Category",
                category_name(self.settings.category, self.categories),
            ),
            row("Questions", self.questions.to_string()),
            row("Difficulty", self.settings.difficulty.to_string()),
            row("Theme", self.settings.theme.to_string()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", p.text_style()),
                Span::styled("Enter", p.accent_style()),
                Span::styled(" to start", p.text_style()),
            ]),
        ];

        Paragraph::new(text)
            .block(framed(p, "Trivium"))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Shown while a question set is being fetched.
pub struct LoadingScreen {
    palette: Palette,
}

impl LoadingScreen {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Widget for LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "Loading questions...",
            self.palette.accent_style(),
        )))
        .block(framed(self.palette, "Trivium"))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Final score screen.
pub struct ResultScreen {
    score: usize,
    total: usize,
    palette: Palette,
}

impl ResultScreen {
    pub fn new(score: usize, total: usize, palette: Palette) -> Self {
        Self {
            score,
            total,
            palette,
        }
    }

    fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.score * 100 / self.total
        }
    }

    fn verdict(&self) -> &'static str {
        match self.percent() {
            100 => "Perfect score!",
            70..=99 => "Great job!",
            40..=69 => "Not bad.",
            _ => "Better luck next time.",
        }
    }
}

impl Widget for ResultScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let p = self.palette;
        let text = vec![
            Line::from(Span::styled(self.verdict(), p.title_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("You scored ", p.text_style()),
                Span::styled(format!("{} / {}", self.score, self.total), p.accent_style()),
                Span::styled(format!(" ({}%)", self.percent()), p.text_style()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", p.text_style()),
                Span::styled("r", p.accent_style()),
                Span::styled(" to play again", p.text_style()),
            ]),
        ];

        Paragraph::new(text)
            .block(framed(p, "Results"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
