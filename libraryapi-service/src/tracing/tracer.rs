use std::error::Error;

use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, fmt::format::Format, prelude::*};

use crate::config::{AppConfig, TracingConfig};

/// Installs the process-wide subscriber for catalog commands and queries.
pub struct Tracer;

impl Tracer {
    /// Installs the sink named by `config.tracing`.
    ///
    /// With [`TracingConfig::Memory`] nothing is installed and the spans of
    /// the author and book commands are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        match config.tracing {
            TracingConfig::Memory => Ok(()),
            TracingConfig::Stdout => Self::install_stdout(config),
        }
    }

    /// Prints command spans and events to stdout.
    ///
    /// Spans are exported through OpenTelemetry, tagged with the distribution
    /// name and version. Events are filtered by `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install_stdout(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        global::set_text_map_propagator(TraceContextPropagator::new());
        global::set_tracer_provider(
            SdkTracerProvider::builder()
                .with_resource(service_resource(config))
                .with_simple_exporter(SpanExporter::default())
                .build(),
        );

        let events = tracing_subscriber::fmt::layer()
            .event_format(Format::default().pretty())
            .with_filter(EnvFilter::from_default_env());
        tracing_subscriber::registry().with(events).try_init()?;

        Ok(())
    }
}

fn service_resource(config: &AppConfig) -> Resource {
    let distribution = &config.distribution;
    let builder = Resource::builder().with_service_name(distribution.name.clone());
    match &distribution.version {
        Some(version) => builder
            .with_attribute(KeyValue::new("version", version.clone()))
            .build(),
        None => builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry::Key;

    use crate::config::{DatabaseConfig, DistributionConfig};

    use super::*;

    fn config(version: Option<&str>) -> AppConfig {
        AppConfig {
            distribution: DistributionConfig {
                name: "libraryapi".into(),
                version: version.map(Into::into),
            },
            database: DatabaseConfig::Memory,
            tracing: TracingConfig::Memory,
        }
    }

    #[test]
    fn memory_installs_nothing() {
        Tracer::install(&config(None)).unwrap();
    }

    #[test]
    fn resource_attributes() {
        let resource = service_resource(&config(Some("1.2.3")));
        assert_eq!(
            resource.get(&Key::new("service.name")),
            Some("libraryapi".into())
        );
        assert_eq!(resource.get(&Key::new("version")), Some("1.2.3".into()));

        let resource = service_resource(&config(None));
        assert_eq!(resource.get(&Key::new("version")), None);
    }
}
