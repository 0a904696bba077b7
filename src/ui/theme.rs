use ratatui::prelude::*;

use crate::config::Theme;

/// Colours used to draw every screen for one [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Color,
    pub text: Color,
    pub accent: Color,
    pub border: Color,
    pub correct: Color,
    pub incorrect: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Default => Self {
                title: Color::White,
                text: Color::Gray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                correct: Color::Green,
                incorrect: Color::Red,
            },
            Theme::Night => Self {
                title: Color::Rgb(199, 210, 254),
                text: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(129, 140, 248),
                border: Color::Rgb(51, 65, 85),
                correct: Color::Rgb(74, 222, 128),
                incorrect: Color::Rgb(248, 113, 113),
            },
            Theme::Matrix => Self {
                title: Color::LightGreen,
                text: Color::Green,
                accent: Color::LightGreen,
                border: Color::Rgb(0, 80, 0),
                correct: Color::LightGreen,
                incorrect: Color::LightRed,
            },
            Theme::Aquatic => Self {
                title: Color::Rgb(224, 242, 254),
                text: Color::Rgb(125, 211, 252),
                accent: Color::Rgb(45, 212, 191),
                border: Color::Rgb(14, 116, 144),
                correct: Color::Rgb(52, 211, 153),
                incorrect: Color::Rgb(251, 113, 133),
            },
            Theme::Desert => Self {
                title: Color::Rgb(254, 243, 199),
                text: Color::Rgb(253, 186, 116),
                accent: Color::Rgb(245, 158, 11),
                border: Color::Rgb(146, 64, 14),
                correct: Color::Rgb(163, 230, 53),
                incorrect: Color::Rgb(220, 38, 38),
            },
            Theme::Farm => Self {
                title: Color::Rgb(236, 252, 203),
                text: Color::Rgb(190, 242, 100),
                accent: Color::Rgb(132, 204, 22),
                border: Color::Rgb(120, 53, 15),
                correct: Color::Rgb(34, 197, 94),
                incorrect: Color::Rgb(239, 68, 68),
            },
            Theme::Pink => Self {
                title: Color::Rgb(253, 242, 248),
                text: Color::Rgb(249, 168, 212),
                accent: Color::Rgb(236, 72, 153),
                border: Color::Rgb(157, 23, 77),
                correct: Color::Rgb(74, 222, 128),
                incorrect: Color::Rgb(190, 18, 60),
            },
        }
    }

    pub fn block_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}
