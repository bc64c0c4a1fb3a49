use indexmap::IndexMap;
use json::JsonValue;

/// Priority given to wishlist entries without one, so they sort last.
pub const UNSET_PRIORITY: i64 = i64::MAX;

const STORE_URL_PREFIX: &str = "https://store.steampowered.com/app/";

/// Wishlisted games keyed by app ID, in the order they were first seen.
pub type Catalog = IndexMap<String, Game>;

/// One wishlist entry as the store returned it. Missing fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub name: Option<String>,
    pub priority: Option<i64>,
}

impl RawEntry {
    pub fn from_json(value: &JsonValue) -> Self {
        let name = value["name"].as_str().map(str::to_string);

        // the store has served priority both as a number and as a string
        let priority = match &value["priority"] {
            v if v.is_number() => v.as_i64(),
            v => v.as_str().and_then(|s| s.trim().parse().ok()),
        };

        Self { name, priority }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub app_id: String,
    pub title: String,
    pub wishlist_priority: i64,
    pub demo_app_id: Option<String>,
}

impl Game {
    pub fn new(app_id: String, title: String, wishlist_priority: i64) -> Self {
        Self {
            app_id,
            title,
            wishlist_priority,
            demo_app_id: None,
        }
    }

    pub fn store_url(&self) -> String {
        format!("{STORE_URL_PREFIX}{}/", self.app_id)
    }

    pub fn has_demo(&self) -> bool {
        self.demo_app_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    fn demo_str(&self) -> &'static str {
        if self.has_demo() {
            "HAS DEMO"
        } else {
            "no demo"
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}, {})",
            self.title,
            self.wishlist_priority,
            self.app_id,
            self.demo_str(),
            self.store_url()
        )
    }
}

/// Turns raw wishlist entries into games. Entries with an empty key are dropped.
pub fn build_catalog<'a, I>(raw_entries: I) -> Catalog
where
    I: IntoIterator<Item = (&'a String, &'a RawEntry)>,
{
    raw_entries
        .into_iter()
        .filter(|(app_id, _)| !app_id.is_empty())
        .map(|(app_id, raw)| {
            let game = Game::new(
                app_id.clone(),
                raw.name.clone().unwrap_or_default(),
                raw.priority.unwrap_or(UNSET_PRIORITY),
            );
            (app_id.clone(), game)
        })
        .collect()
}
