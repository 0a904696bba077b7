use crate::keys::KeyAction;

const SECTIONS: &[(&str, &[KeyAction])] = &[
    (
        "Quiz",
        &[
            KeyAction::Choice(0),
            KeyAction::Up,
            KeyAction::Down,
            KeyAction::Enter,
        ],
    ),
    (
        "Start & results",
        &[
            KeyAction::Restart,
            KeyAction::Reload,
            KeyAction::Options,
            KeyAction::Themes,
        ],
    ),
    (
        "Menu",
        &[
            KeyAction::Menu,
            KeyAction::Tab,
            KeyAction::Left,
            KeyAction::Right,
            KeyAction::Discard,
            KeyAction::Cancel,
        ],
    ),
    ("General", &[KeyAction::Help, KeyAction::Quit]),
];

/// Return the help text displayed in the help overlay.
pub fn help_text() -> String {
    let mut text = String::from("Trivium: quick-fire trivia in your terminal\n");
    for (title, actions) in SECTIONS {
        text.push_str(&format!("\n{}:\n", title));
        for action in *actions {
            text.push_str(&format!(
                "  {:<8} {}\n",
                action.key_label(),
                action.help_text()
            ));
        }
    }
    text.push_str(&format!("\nVersion: {}", env!("CARGO_PKG_VERSION")));
    text
}
