// Lambda bootstrap entry point for the Worker function

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    kochi::setup_logging();
    run(service_fn(kochi::worker::handler)).await
}
