use lambda_runtime::{service_fn, Error, LambdaEvent};
use qset_core::repository::QSetRepository;
use qset_lambda::adapters::s3_store::S3ObjectStore;
use qset_lambda::config::RuntimeConfig;
use qset_lambda::handlers::response::ApiGatewayResponse;
use qset_lambda::handlers::router::handle_event;
use qset_lambda::telemetry::init_tracing;
use serde_json::Value;
use tracing::info;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let config = RuntimeConfig::from_env().map_err(Error::from)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(config.bucket, aws_sdk_s3::Client::new(&aws_config))
        .with_page_size(config.list_page_size);
    let repository = QSetRepository::new(&store);

    let response = handle_event(event.payload, &repository);
    info!(
        request_id = %event.context.request_id,
        status_code = response.status_code,
        "request handled"
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
