use base64::prelude::*;
use itertools::Itertools;
use lambda_runtime::Error;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clients::AwsClients;
use crate::config::Config;
use crate::events::WorkItem;
use crate::sinks;

/// Reserved discriminator key of a decoded payload.
const TYPE_FIELD: &str = "type";

/// Decoded key/value representation of a record payload. Keys other than
/// `type` are opaque attributes.
pub type StructuredEvent = serde_json::Map<String, Value>;

/// A payload classified by its `type` discriminator. Resolved once at decode
/// time so downstream routing can match exhaustively.
#[derive(Debug)]
pub enum DecodedRecord {
    Archive(StructuredEvent),
    Current(StructuredEvent),
    Unrecognized { kind: Option<String> },
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a structured event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base64-decode and parse a record payload, classifying it in the same
/// step. Decode failures propagate; no sink has been touched at this point.
pub fn decode(payload: &str) -> Result<DecodedRecord, DecodeError> {
    let bytes = BASE64_STANDARD.decode(payload)?;
    let event: StructuredEvent = serde_json::from_slice(&bytes)?;

    let kind = event
        .get(TYPE_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(match kind.as_deref() {
        Some("archive") => DecodedRecord::Archive(event),
        Some("current") => DecodedRecord::Current(event),
        other => DecodedRecord::Unrecognized {
            kind: other.map(str::to_owned),
        },
    })
}

/// Flatten a structured event into a two-line CSV body: a header line of the
/// non-`type` field names sorted bytewise ascending, and a data line with the
/// values in the same order.
pub fn archive_line(event: &StructuredEvent) -> String {
    let fields = event
        .iter()
        .filter(|(name, _)| name.as_str() != TYPE_FIELD)
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect_vec();

    let header = fields.iter().map(|(name, _)| name.as_str()).join(",");
    let values = fields
        .iter()
        .map(|(_, value)| render_value(value))
        .join(",");

    format!("{header}\n{values}")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deliver one work item to its sink. Decode failures fail the invocation;
/// sink write failures are logged and swallowed, so delivery is best-effort
/// at-most-once.
pub async fn route(clients: &AwsClients, config: &Config, item: &WorkItem) -> Result<(), Error> {
    debug!("Routing record {}", item.record_id);

    match decode(&item.payload)? {
        DecodedRecord::Archive(event) => {
            let key = format!("{}.csv", item.record_id);
            let body = archive_line(&event);
            if let Err(error) =
                sinks::write_archive(&clients.s3, &config.archive_bucket, &key, body).await
            {
                tracing::error!(?error, %key, "Failed to write archive object");
            }
        }
        DecodedRecord::Current(event) => {
            if let Err(error) =
                sinks::write_record(&clients.dynamodb, &config.record_table, event).await
            {
                tracing::error!(?error, record_id = %item.record_id, "Failed to store record item");
            }
        }
        DecodedRecord::Unrecognized { kind } => {
            warn!(record_id = %item.record_id, ?kind, "Unrecognized record type, skipping");
        }
    }

    Ok(())
}
