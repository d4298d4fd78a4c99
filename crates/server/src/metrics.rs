use axum::http::StatusCode;
use models::AnimalKind;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "animal_api_requests_total",
        "Requests handled, by resource and operation",
        &["resource", "operation"]
    )
    .expect("register requests_total")
});

pub static ANIMALS_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "animal_api_animals_created_total",
        "Animals persisted through the create endpoints",
        &["kind"]
    )
    .expect("register animals_created_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "animal_api_internal_errors_total",
        "Requests that failed with an internal (store) error"
    )
    .expect("register internal_errors_total")
});

pub fn record_request(kind: AnimalKind, operation: &str) {
    REQUESTS_TOTAL.with_label_values(&[kind.plural(), operation]).inc();
}

pub fn record_created(kind: AnimalKind) {
    ANIMALS_CREATED_TOTAL.with_label_values(&[kind.as_str()]).inc();
}

/// Render the default registry in the text exposition format.
pub fn render() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("encode metrics: {e}"));
    }
    match String::from_utf8(buf) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics not utf-8: {e}")),
    }
}
