use aws_lambda_events::event::kinesis::KinesisEvent;
use aws_sdk_sqs::Client as SqsClient;
use base64::prelude::*;
use lambda_runtime::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::events::WorkItem;

/// Acknowledgement returned to the invoker once the whole batch has been
/// handed off to the work queue.
pub const DISPATCH_ACK: &str = "records dispatched for processing";

/// Fan a batch of stream records out onto the work queue, one message per
/// record. Processing outcomes are never observed here; an enqueue failure
/// aborts dispatch of the remaining records.
pub async fn fan_out(
    sqs_client: &SqsClient,
    config: &Config,
    kinesis_event: KinesisEvent,
) -> Result<(), Error> {
    info!("Dispatching {} stream records", kinesis_event.records.len());

    for record in kinesis_event.records {
        let record_id = record
            .event_id
            .clone()
            .unwrap_or_else(|| record.kinesis.sequence_number.clone());

        // the payload stays base64 so the message body is plain SQS text
        let item = WorkItem {
            record_id,
            payload: BASE64_STANDARD.encode(&record.kinesis.data.0),
        };
        let body = serde_json::to_string(&item)?;

        sqs_client
            .send_message()
            .queue_url(&config.work_queue_url)
            .message_body(body)
            .send()
            .await?;

        debug!("Enqueued work item for record {}", item.record_id);
    }

    Ok(())
}
