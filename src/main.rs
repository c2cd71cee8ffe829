use crate::{
    backend::AppointmentBackend, configuration::Configuration,
    configuration_handler::ConfigurationHandler, http::create_app,
    local_appointments::LocalAppointments,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod configuration;
mod configuration_handler;
mod draft;
mod http;
mod local_appointments;
mod locations;
mod queue;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    info!("Pickup scheduler accessible at {address}");
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let backend = LocalAppointments::default();
    backend.insert_example_appointments();

    let app = create_app(backend, configuration);
    axum::serve(listener, app).await.unwrap();
}
