//! Tracing subscriber and OTLP trace export.

use std::time::Duration;

use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::WithExportConfig as _;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{RandomIdGenerator, Sampler, SdkTracer, SdkTracerProvider},
};
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, ObservabilityConfig},
};

use super::{ObservabilityError, request::RequestLogSettings};

/// Crates whose chatter stays at warn regardless of the configured level.
const QUIET_TARGETS: &str = "h2=warn,hyper=warn,reqwest=warn,sqlx=warn,tonic=warn,opentelemetry=warn";

/// Live telemetry pipelines, flushed on shutdown.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the global subscriber and, when enabled, the OTLP exporter.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        RequestLogSettings::from_config(&config.observability).install();

        let tracer_provider = if config.observability.otel_enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(build_tracer_provider(&config.observability)?)
        } else {
            None
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{},{QUIET_TARGETS}", config.logging.log_level))
        });

        let service_name = config.observability.otel_service_name.clone();

        match config.logging.log_format {
            LogFormat::Compact => install(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_line_number(true),
                filter,
                tracer_provider.as_ref().map(|provider| provider.tracer(service_name)),
            )?,
            LogFormat::Json => install(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
                filter,
                tracer_provider.as_ref().map(|provider| provider.tracer(service_name)),
            )?,
        }

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to shut down tracer provider: {source}");
        }
    }
}

fn install<L>(
    fmt_layer: L,
    filter: EnvFilter,
    tracer: Option<SdkTracer>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    match tracer {
        Some(tracer) => subscriber
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let resource = Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        config.otel_trace_sample_ratio.clamp(0.0, 1.0),
    )));

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}
