use aws_config::BehaviorVersion;
use kinesis_record_router::clients::AwsClients;
use kinesis_record_router::config;
use kinesis_record_router::events::Combined;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    kinesis_record_router::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let aws_config = aws_config::load_defaults(BehaviorVersion::v2023_11_09()).await;
    let clients = AwsClients::new(&aws_config);
    let config = config::Config::load_from_env()?;

    run(service_fn(|request: LambdaEvent<Combined>| {
        kinesis_record_router::function_handler(&clients, &config, request)
    }))
    .await
}
