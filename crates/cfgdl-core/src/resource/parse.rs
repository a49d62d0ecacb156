//! Decoding of configuration responses.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::RawClusterConfiguration;

/// Error body shape used by the backend for failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turns a status and body into a raw configuration.
///
/// Non-2xx responses fail with `HTTP {status}`, followed by the backend's
/// message (JSON `{"message": ...}` or plain text) when one is present.
pub fn parse_configuration(status: u32, body: &[u8]) -> Result<RawClusterConfiguration> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .map(|e| e.message)
            .ok()
            .or_else(|| {
                std::str::from_utf8(body)
                    .ok()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            });
        match detail {
            Some(d) => bail!("HTTP {}: {}", status, d),
            None => bail!("HTTP {}", status),
        }
    }

    let raw: RawClusterConfiguration =
        serde_json::from_slice(body).context("invalid configuration payload")?;
    if !raw.cluster.is_object() {
        bail!("invalid configuration payload: cluster is not an object");
    }
    Ok(raw)
}
