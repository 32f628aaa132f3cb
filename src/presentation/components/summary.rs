use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::SavedFicha;

use super::{field, hint};

pub fn render_summary(frame: &mut Frame<'_>, area: Rect, summary: Option<&SavedFicha>) {
    let widget = Paragraph::new(summary_lines(summary))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Saved ficha").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

pub fn summary_lines(summary: Option<&SavedFicha>) -> Vec<Line<'static>> {
    let Some(ficha) = summary else {
        return vec![hint("Save your ficha to see it here.")];
    };
    let character = &ficha.character;
    let mut lines = vec![
        field("Character", character.name.clone()),
        field("Height", format!("{} cm", character.height)),
        field("Birth year", character.birth_year.clone()),
    ];
    if let Some(homeworld) = &character.homeworld {
        lines.push(field("Homeworld", homeworld.clone()));
    }
    let nickname = if ficha.nickname.is_empty() {
        "—".to_string()
    } else {
        ficha.nickname.clone()
    };
    lines.push(field("Nickname", nickname));
    lines.push(field("Favorite", if ficha.favorite { "Yes" } else { "No" }));
    let saved_at = ficha.saved_at.with_timezone(&Local);
    lines.push(hint(format!("Saved: {}", saved_at.format("%Y-%m-%d %H:%M:%S"))));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::CharacterSnapshot, presentation::components::plain};
    use chrono::{TimeZone, Utc};

    fn ficha(homeworld: Option<&str>) -> SavedFicha {
        SavedFicha {
            character: CharacterSnapshot {
                name: "Leia Organa".into(),
                height: "150".into(),
                birth_year: "19BBY".into(),
                homeworld: homeworld.map(str::to_string),
                url: "u/5".into(),
            },
            nickname: "Princess".into(),
            favorite: true,
            saved_at: Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(),
            selected_url: "u/5".into(),
        }
    }

    #[test]
    fn placeholder_without_a_saved_ficha() {
        assert_eq!(
            plain(&summary_lines(None)),
            vec!["Save your ficha to see it here."]
        );
    }

    #[test]
    fn lists_saved_fields() {
        let saved = ficha(Some("Alderaan"));
        let text = plain(&summary_lines(Some(&saved)));
        assert_eq!(text[0], "Character: Leia Organa");
        assert_eq!(text[1], "Height: 150 cm");
        assert_eq!(text[3], "Homeworld: Alderaan");
        assert_eq!(text[4], "Nickname: Princess");
        assert_eq!(text[5], "Favorite: Yes");
        assert!(text[6].starts_with("Saved: "));
    }

    #[test]
    fn omits_missing_homeworld() {
        let saved = ficha(None);
        let text = plain(&summary_lines(Some(&saved)));
        assert!(!text.iter().any(|line| line.starts_with("Homeworld")));
        assert_eq!(text.len(), 6);
    }
}
