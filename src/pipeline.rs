use std::path::Path;

use log::info;

use crate::config::Endpoints;
use crate::demo::{DemoEnricher, DemoInfoFetcher};
use crate::error::{ExportError, WishlistError};
use crate::game::{build_catalog, Catalog};
use crate::http::Transport;
use crate::report::{render, Report};
use crate::wishlist::WishlistFetcher;

/// Fetch, build, enrich and render one user's wishlist.
///
/// Each call owns its catalog; nothing is shared between runs.
pub fn run_pipeline<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    user_id: &str,
) -> Result<Report, WishlistError> {
    let raw = WishlistFetcher::new(transport, &endpoints.wishlist_url).fetch(user_id)?;
    info!("fetched {} wishlist entries for {user_id}", raw.len());

    let catalog = build_catalog(&raw);
    Ok(enrich_and_render(transport, endpoints, catalog))
}

/// Same as `run_pipeline`, starting from an exported wishlist file.
pub fn run_export_pipeline<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    export_path: &Path,
) -> Result<Report, ExportError> {
    let catalog = crate::export::read_export_file(export_path)?;
    info!("read {} games from {}", catalog.len(), export_path.display());
    Ok(enrich_and_render(transport, endpoints, catalog))
}

fn enrich_and_render<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    mut catalog: Catalog,
) -> Report {
    let enricher = DemoEnricher::new(DemoInfoFetcher::new(transport, &endpoints.demo_url));
    let summary = enricher.enrich(&mut catalog);
    info!(
        "{} demos found, {} of {} demo batches returned no data",
        summary.demos_found, summary.skipped_batches, summary.batches
    );

    render(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::fake::{parse, FakeTransport};

    fn endpoints() -> Endpoints {
        Endpoints {
            wishlist_url: "http://wishlist.test/profiles".to_string(),
            demo_url: "http://demo.test/events".to_string(),
        }
    }

    #[test]
    fn end_to_end_example() {
        let transport = FakeTransport::new(|url, query| {
            if url.starts_with("http://demo.test") {
                return Ok(parse(
                    r#"{"success": 1, "info": [{"appid": 20, "demo_appid": 99}, {"appid": 10, "demo_appid": 0}]}"#,
                ));
            }
            Ok(match query[0].1.as_str() {
                "0" => parse(
                    r#"{"10": {"name": "A", "priority": 2}, "20": {"name": "B", "priority": 1}}"#,
                ),
                _ => parse("[]"),
            })
        });

        let report = run_pipeline(&transport, &endpoints(), "42").unwrap();

        let order: Vec<(&str, &str)> = report
            .rows
            .iter()
            .map(|r| (r.game.title.as_str(), r.game.app_id.as_str()))
            .collect();
        assert_eq!(order, [("B", "20"), ("A", "10")]);
        assert_eq!(report.rows[0].game.demo_app_id.as_deref(), Some("99"));
        assert_eq!(report.rows[1].game.demo_app_id, None);
        assert_eq!(report.total_demos, 1);
        assert_eq!(report.total_games, 2);
    }

    #[test]
    fn wishlist_failure_produces_no_report() {
        let transport = FakeTransport::new(|url, _| {
            assert!(!url.starts_with("http://demo.test"), "enrichment must not run");
            Err(TransportError::UnexpectedShape("html".to_string()))
        });

        let err = run_pipeline(&transport, &endpoints(), "42").unwrap_err();

        assert!(matches!(err, WishlistError::Fetch { page: 0, .. }));
    }

    #[test]
    fn private_profile_is_reported() {
        let transport = FakeTransport::new(|_, _| Ok(parse(r#"{"success": 2}"#)));

        let err = run_pipeline(&transport, &endpoints(), "42").unwrap_err();

        assert_eq!(err.to_string(), "profile is private");
    }

    #[test]
    fn demo_outage_still_renders() {
        let transport = FakeTransport::new(|url, query| {
            if url.starts_with("http://demo.test") {
                return Err(TransportError::Status { code: 503 });
            }
            Ok(match query[0].1.as_str() {
                "0" => parse(r#"{"10": {"name": "A"}}"#),
                _ => parse("{}"),
            })
        });

        let report = run_pipeline(&transport, &endpoints(), "42").unwrap();

        assert_eq!(report.total_games, 1);
        assert_eq!(report.total_demos, 0);
    }
}
