use std::collections::HashMap;
use std::time::Instant;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::Error;
use serde_json::Value;

use crate::process::StructuredEvent;

/// Write one CSV body to the archive bucket.
pub async fn write_archive(
    s3_client: &S3Client,
    bucket: &str,
    key: &str,
    body: String,
) -> Result<(), Error> {
    let start_time = Instant::now();
    let buffer =
        aws_smithy_types::byte_stream::ByteStream::new(aws_smithy_types::body::SdkBody::from(body));

    tracing::debug!("Uploading archive line to S3: s3://{}/{}", bucket, key);
    s3_client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("text/csv")
        .body(buffer)
        .send()
        .await?;

    tracing::info!(
        "Archived {} in {}ms",
        key,
        start_time.elapsed().as_millis()
    );

    Ok(())
}

/// Store one structured event in the record table, keyed by whatever key
/// attributes the event itself carries.
pub async fn write_record(
    dynamodb_client: &DynamoDbClient,
    table: &str,
    event: StructuredEvent,
) -> Result<(), Error> {
    let item: HashMap<String, AttributeValue> = event
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect();

    dynamodb_client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await?;

    tracing::info!("Stored record item in table {}", table);

    Ok(())
}

fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Null => AttributeValue::Null(true),
        // nested values carry no meaning for the table, store their JSON text
        other => AttributeValue::S(other.to_string()),
    }
}
