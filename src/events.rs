use aws_lambda_events::event::kinesis::KinesisEvent;
use aws_lambda_events::event::sqs::SqsEvent;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

#[derive(Debug)]
pub enum Combined {
    Kinesis(KinesisEvent),
    Sqs(SqsEvent),
}

impl<'de> Deserialize<'de> for Combined {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_value: Value = Deserialize::deserialize(deserializer)?;
        debug!("raw_value: {:?}", raw_value);

        if let Ok(event) = KinesisEvent::deserialize(&raw_value) {
            tracing::info!("kinesis event detected");
            return Ok(Combined::Kinesis(event));
        }

        // IMPORTANT: sqs must be evaluated last as every field of an SQS
        // message is optional, so this shape could potentially match any
        // arbitrary JSON and result in empty values.
        if let Ok(event) = SqsEvent::deserialize(&raw_value) {
            tracing::info!("sqs event detected");

            // sqs events triggering a lambda function should always have at
            // least one record. if not, it is likely an unsupported or bad event
            if event.records.is_empty() {
                return Err(de::Error::custom(format!(
                    "unsupported or bad event type: {raw_value}"
                )));
            }
            return Ok(Combined::Sqs(event));
        }

        Err(de::Error::custom(format!(
            "unsupported event type: {raw_value}"
        )))
    }
}

/// A single unit of work, enqueued by the fan-out leg and consumed by the
/// worker leg. The trigger source (the work queue) marks a payload as already
/// dispatched, so no flag is carried in the message itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WorkItem {
    /// Identifier of the originating stream record.
    pub record_id: String,
    /// The record payload, still base64 encoded so the message body stays
    /// plain SQS text.
    pub payload: String,
}

#[cfg(test)]
mod test {
    use super::*;

    const KINESIS_EVENT: &str = r#"{
        "Records": [
            {
                "awsRegion": "us-east-1",
                "eventID": "shardId-000000000000:49647983248916725783135500075978324609922193443375808530",
                "eventName": "aws:kinesis:record",
                "eventSource": "aws:kinesis",
                "eventSourceARN": "arn:aws:kinesis:us-east-1:0000000000:stream/mystream",
                "eventVersion": "1.0",
                "invokeIdentityArn": "arn:aws:iam::0000000000:role/router-role",
                "kinesis": {
                    "approximateArrivalTimestamp": 1704715421.323,
                    "data": "eyJ0eXBlIjoiYXJjaGl2ZSJ9",
                    "kinesisSchemaVersion": "1.0",
                    "partitionKey": "partition_key",
                    "sequenceNumber": "49647983248916725783135500075978324609922193443375808530"
                }
            }
        ]
    }"#;

    const SQS_EVENT: &str = r#"{
        "Records": [
            {
                "messageId": "2e1424d4-f796-459a-8184-9c92662be6da",
                "receiptHandle": "AQEBzWwaftRI0KuVm4tP+/7q1rGgNqicHq...",
                "body": "{\"record_id\":\"rec-1\",\"payload\":\"eyJ0eXBlIjoiY3VycmVudCJ9\"}",
                "attributes": {},
                "messageAttributes": {},
                "md5OfBody": "e4e68fb7bd0e697a0ae8f1bb342846b3",
                "eventSource": "aws:sqs",
                "eventSourceARN": "arn:aws:sqs:us-east-1:123456789012:work-queue",
                "awsRegion": "us-east-1"
            }
        ]
    }"#;

    #[test]
    fn test_detect_kinesis_event() {
        let evt: Combined = serde_json::from_str(KINESIS_EVENT).expect("failed to parse event");
        match evt {
            Combined::Kinesis(e) => assert_eq!(e.records.len(), 1),
            other => panic!("expected kinesis event, got {:?}", other),
        }
    }

    #[test]
    fn test_detect_sqs_event() {
        let evt: Combined = serde_json::from_str(SQS_EVENT).expect("failed to parse event");
        match evt {
            Combined::Sqs(e) => {
                let body = e.records[0].body.as_deref().expect("body to exist");
                let item: WorkItem = serde_json::from_str(body).expect("failed to parse work item");
                assert_eq!(item.record_id, "rec-1");
            }
            other => panic!("expected sqs event, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_unsupported_event() {
        let result = serde_json::from_str::<Combined>(r#"{"detail-type": "Scheduled Event"}"#);
        assert!(result.is_err());
    }

    // an empty batch matches the kinesis shape, not the permissive sqs one
    #[test]
    fn test_empty_batch_is_kinesis() {
        let evt: Combined = serde_json::from_str(r#"{"Records": []}"#).expect("failed to parse event");
        match evt {
            Combined::Kinesis(e) => assert!(e.records.is_empty()),
            other => panic!("expected kinesis event, got {:?}", other),
        }
    }
}
