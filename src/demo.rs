// Demo availability lookups against the store's sale-event endpoint.
//
// Sample response for `?appids[]=846030&appids[]=867210`:
//
// ```text
// {"success":1,"info":[{"appid":846030,"demo_appid":949730,"demo_package_id":0},
//                      {"appid":867210,"demo_appid":0,"demo_package_id":0}]}
// ```

use json::JsonValue;
use log::{debug, warn};

use crate::game::Catalog;
use crate::http::Transport;

pub const DEFAULT_DEMO_URL: &str = "https://store.steampowered.com/saleaction/ajaxgetdemoevents";

/// Most app IDs the endpoint is asked about in one request.
pub const DEMO_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct DemoInfo {
    pub app_id: String,
    /// `None` when the store reports `0` or leaves the field out.
    pub demo_app_id: Option<String>,
}

impl DemoInfo {
    fn from_json(value: &JsonValue) -> Option<Self> {
        let app_id = id_string(&value["appid"])?;
        let demo_app_id = id_string(&value["demo_appid"]);
        Some(Self {
            app_id,
            demo_app_id,
        })
    }
}

/// Normalizes a numeric or string ID to the catalog's key form. Zero means absent.
fn id_string(value: &JsonValue) -> Option<String> {
    let id = match value.as_u64() {
        Some(n) => n.to_string(),
        None => value.as_str()?.trim().to_string(),
    };
    match id.as_str() {
        "" | "0" => None,
        _ => Some(id),
    }
}

pub struct DemoInfoFetcher<'a, T: Transport> {
    transport: &'a T,
    url: &'a str,
}

impl<'a, T: Transport> DemoInfoFetcher<'a, T> {
    pub fn new(transport: &'a T, url: &'a str) -> Self {
        Self { transport, url }
    }

    /// Looks up at most `DEMO_BATCH_SIZE` app IDs.
    ///
    /// Returns `None` when the batch yielded nothing usable; the cause is logged.
    pub fn fetch_demo_info(&self, app_ids: &[&str]) -> Option<Vec<DemoInfo>> {
        debug_assert!(app_ids.len() <= DEMO_BATCH_SIZE);

        let query: Vec<(&str, String)> = app_ids
            .iter()
            .map(|id| ("appids[]", (*id).to_string()))
            .collect();

        let body = match self.transport.get_json(self.url, &query) {
            Ok(body) => body,
            Err(e) => {
                warn!("demo info request failed: {e}");
                return None;
            }
        };

        let info = &body["info"];
        if !info.is_array() {
            warn!("demo info response has no \"info\" list: {}", body.dump());
            return None;
        }

        Some(info.members().filter_map(DemoInfo::from_json).collect())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichSummary {
    pub batches: usize,
    pub skipped_batches: usize,
    pub demos_found: usize,
}

pub struct DemoEnricher<'a, T: Transport> {
    fetcher: DemoInfoFetcher<'a, T>,
}

impl<'a, T: Transport> DemoEnricher<'a, T> {
    pub fn new(fetcher: DemoInfoFetcher<'a, T>) -> Self {
        Self { fetcher }
    }

    /// Fills in `demo_app_id` for every game the store reports a demo for.
    ///
    /// A failed batch leaves its games untouched and does not stop the rest.
    pub fn enrich(&self, catalog: &mut Catalog) -> EnrichSummary {
        let app_ids: Vec<String> = catalog.keys().cloned().collect();
        let mut summary = EnrichSummary::default();

        for (index, batch) in app_ids.chunks(DEMO_BATCH_SIZE).enumerate() {
            summary.batches += 1;
            let batch: Vec<&str> = batch.iter().map(String::as_str).collect();

            let Some(infos) = self.fetcher.fetch_demo_info(&batch) else {
                warn!(
                    "no demo info for batch {index}, games = {:?}",
                    batch
                        .iter()
                        .filter_map(|id| catalog.get(*id).map(|g| g.title.as_str()))
                        .collect::<Vec<_>>()
                );
                summary.skipped_batches += 1;
                continue;
            };

            for info in infos {
                let Some(demo_app_id) = info.demo_app_id else {
                    continue;
                };
                match catalog.get_mut(&info.app_id) {
                    Some(game) => {
                        game.demo_app_id = Some(demo_app_id);
                        summary.demos_found += 1;
                    }
                    None => debug!("ignoring demo info for unknown app {}", info.app_id),
                }
            }
        }

        summary
    }
}
