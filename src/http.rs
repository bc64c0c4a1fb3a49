use json::JsonValue;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::TransportError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON GET. One request in flight at a time.
pub trait Transport {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<JsonValue, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<JsonValue, TransportError> {
        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        let text = response.text()?;
        decode_body(status, &text)
    }
}

/// Non-2xx is an error whatever the body says.
fn decode_body(status: StatusCode, text: &str) -> Result<JsonValue, TransportError> {
    if !status.is_success() {
        return Err(TransportError::Status {
            code: status.as_u16(),
        });
    }

    // Steam sometimes serves an HTML error page with a 200, which ends up as a parse error.
    Ok(json::parse(text)?)
}
