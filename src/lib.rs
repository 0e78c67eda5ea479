use lambda_runtime::{Error, LambdaEvent};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::clients::AwsClients;
use crate::config::Config;
use crate::events::{Combined, WorkItem};

pub mod clients;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod process;
pub mod sinks;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

// lambda handler
pub async fn function_handler(
    clients: &AwsClients,
    config: &Config,
    evt: LambdaEvent<Combined>,
) -> Result<Option<String>, Error> {
    info!("Handling lambda invocation");

    debug!("Handling event payload: {:?}", evt.payload);
    match evt.payload {
        Combined::Kinesis(kinesis_event) => {
            info!("KINESIS EVENT Detected");
            dispatch::fan_out(&clients.sqs, config, kinesis_event).await?;
            Ok(Some(dispatch::DISPATCH_ACK.to_string()))
        }
        Combined::Sqs(sqs_event) => {
            debug!("SQS Event: {:?}", sqs_event.records.first());
            for record in &sqs_event.records {
                if let Some(body) = &record.body {
                    let item: WorkItem = serde_json::from_str(body)?;
                    process::route(clients, config, &item).await?;
                }
            }
            Ok(None)
        }
    }
}
