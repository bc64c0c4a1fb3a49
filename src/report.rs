use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::game::{Catalog, Game};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 1-based position in the priority-sorted wishlist.
    pub index: usize,
    pub game: Game,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub total_games: usize,
    pub total_demos: usize,
    pub generated_at: DateTime<Local>,
}

/// Sorts the catalog by wishlist priority, keeping catalog order for ties.
pub fn render(catalog: Catalog) -> Report {
    let mut games: Vec<Game> = catalog.into_values().collect();
    games.sort_by_key(|g| g.wishlist_priority);

    let total_demos = games.iter().filter(|g| g.has_demo()).count();
    let rows: Vec<ReportRow> = games
        .into_iter()
        .enumerate()
        .map(|(i, game)| ReportRow { index: i + 1, game })
        .collect();

    Report {
        total_games: rows.len(),
        total_demos,
        rows,
        generated_at: Local::now(),
    }
}

impl Report {
    pub fn demo_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|r| r.game.has_demo())
    }

    /// Static page. With `demos_only`, rows without a demo are left out
    /// but the header totals still count them.
    pub fn to_html(&self, demos_only: bool) -> String {
        let mut body = String::new();
        for row in &self.rows {
            let game = &row.game;
            let title = htmlescape::encode_minimal(display_title(game));
            let url = htmlescape::encode_attribute(&game.store_url());

            match game.demo_app_id.as_deref().filter(|_| game.has_demo()) {
                Some(demo) => {
                    let _ = writeln!(
                        body,
                        "        <tr style='background-color: lime'><td>{}</td><td><a href='{url}'>{title}</a></td><td>{}</td></tr>",
                        row.index,
                        htmlescape::encode_minimal(demo)
                    );
                }
                None if !demos_only => {
                    let _ = writeln!(
                        body,
                        "        <tr><td>{}</td><td>{title} (<a href='{url}'>Store Page</a>)</td><td></td></tr>",
                        row.index
                    );
                }
                None => {}
            }
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en-US">
<head>
    <meta charset="UTF-8">
    <title>Wishlist demos</title>
</head>
<body>
    <h1>Wishlist</h1>
    <h3>Total games: {total_games}</h3>
    <h3>Total demos: {total_demos}</h3>
    <p>Generated {generated}</p>
    <table>
    <thead>
    <tr>
        <td style='border-bottom: 1px solid black'>No.</td>
        <td style='border-bottom: 1px solid black'>Title</td>
        <td style='border-bottom: 1px solid black'>Demo appid</td>
    </tr>
    </thead>
    <tbody>
{body}    </tbody>
    </table>
</body>
</html>
"#,
            total_games = self.total_games,
            total_demos = self.total_demos,
            generated = self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

fn display_title(game: &Game) -> &str {
    if game.title.is_empty() {
        "(unknown title)"
    } else {
        &game.title
    }
}
