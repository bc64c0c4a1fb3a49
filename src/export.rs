// Reader for the wishlist export produced by the Augmented Steam extension.
//
// ```text
// {"data": [{"gameid": ["steam", "app/867210"], "title": "...", "url": "..."}, ...]}
// ```

use std::fs::read_to_string;
use std::path::Path;

use json::JsonValue;
use log::warn;

use crate::error::ExportError;
use crate::game::{Catalog, Game};

pub fn read_export_file(path: &Path) -> Result<Catalog, ExportError> {
    let text = read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&text)
}

/// Builds a catalog from export text. An entry's position in `data` is its priority.
pub fn parse_export(text: &str) -> Result<Catalog, ExportError> {
    let parsed = json::parse(text)?;
    let data = &parsed["data"];
    if !data.is_array() {
        return Err(ExportError::MissingData);
    }

    let mut catalog = Catalog::new();
    for (index, entry) in data.members().enumerate() {
        let Some(app_id) = app_id_of(&entry["gameid"]) else {
            warn!("skipping export entry {index} with unusable gameid: {}", entry["gameid"].dump());
            continue;
        };
        let title = entry["title"].as_str().unwrap_or_default().to_string();
        let game = Game::new(app_id.clone(), title, index as i64);
        catalog.entry(app_id).or_insert(game);
    }

    Ok(catalog)
}

/// `["steam", "app/867210"]` -> `867210`
fn app_id_of(gameid: &JsonValue) -> Option<String> {
    if !gameid.is_array() || gameid.len() != 2 {
        return None;
    }
    let id = gameid[1].as_str()?.strip_prefix("app/")?;
    (!id.is_empty()).then(|| id.to_string())
}
