use crate::domain::models::event::Menu;

/// Static catalog of date-night themes. Each theme carries a display style
/// for the invite page and the default menu an event starts with.
pub struct Theme {
    pub id: &'static str,
    pub display_name: &'static str,
    pub tagline: &'static str,
    pub dinner: &'static [&'static str],
    pub activity: &'static [&'static str],
    pub mood: &'static [&'static str],
}

impl Theme {
    pub fn default_menu(&self) -> Menu {
        Menu {
            dinner: self.dinner.iter().map(|s| s.to_string()).collect(),
            activity: self.activity.iter().map(|s| s.to_string()).collect(),
            mood: self.mood.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub const THEMES: &[Theme] = &[
    Theme {
        id: "cottagecore-classic",
        display_name: "Cottagecore Classic",
        tagline: "Slow food, soft light, no phones.",
        dinner: &["Pasta night", "Homemade pizza", "Soup and fresh bread"],
        activity: &["Board games", "Baking together", "Evening walk"],
        mood: &["Romantic", "Cozy", "Playful"],
    },
    Theme {
        id: "retro-arcade",
        display_name: "Retro Arcade",
        tagline: "High scores and greasy snacks.",
        dinner: &["Smash burgers", "Loaded nachos", "Corn dogs"],
        activity: &["Arcade crawl", "Couch co-op marathon", "Pinball duel"],
        mood: &["Competitive", "Silly", "Nostalgic"],
    },
    Theme {
        id: "film-noir",
        display_name: "Film Noir",
        tagline: "Dress sharp, trust no one.",
        dinner: &["Steak frites", "Oysters and martinis", "Late-night diner run"],
        activity: &["Double feature", "Jazz bar", "Mystery dinner game"],
        mood: &["Mysterious", "Romantic", "Dramatic"],
    },
    Theme {
        id: "midnight-picnic",
        display_name: "Midnight Picnic",
        tagline: "Blankets, thermos, stars.",
        dinner: &["Charcuterie spread", "Sandwich tower", "Midnight pancakes"],
        activity: &["Stargazing", "Night drive", "Bonfire"],
        mood: &["Dreamy", "Quiet", "Adventurous"],
    },
];

pub fn find(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let theme = find("cottagecore-classic").expect("catalog theme missing");
        assert_eq!(theme.display_name, "Cottagecore Classic");
        assert!(find("disco-inferno").is_none());
    }

    #[test]
    fn test_every_theme_has_a_complete_default_menu() {
        for theme in THEMES {
            let menu = theme.default_menu();
            assert!(menu.is_complete(), "theme {} has an empty group", theme.id);
        }
    }
}
