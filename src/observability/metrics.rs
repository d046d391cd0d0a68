use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub deliveries_total: IntCounterVec,
    pub delivery_latency_seconds: HistogramVec,
    pub geocode_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let deliveries_total = IntCounterVec::new(
            Opts::new("deliveries_total", "Completed delivery attempts by outcome"),
            &["outcome"],
        )
        .expect("valid deliveries_total metric");

        let delivery_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "delivery_latency_seconds",
                "Latency of delivery completion in seconds",
            ),
            &["outcome"],
        )
        .expect("valid delivery_latency_seconds metric");

        let geocode_failures_total = IntCounter::new(
            "geocode_failures_total",
            "Reverse geocoding lookups that failed and degraded to no address",
        )
        .expect("valid geocode_failures_total metric");

        registry
            .register(Box::new(deliveries_total.clone()))
            .expect("register deliveries_total");
        registry
            .register(Box::new(delivery_latency_seconds.clone()))
            .expect("register delivery_latency_seconds");
        registry
            .register(Box::new(geocode_failures_total.clone()))
            .expect("register geocode_failures_total");

        Self {
            registry,
            deliveries_total,
            delivery_latency_seconds,
            geocode_failures_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
