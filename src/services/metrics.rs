use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

use crate::error::ApiError;

lazy_static! {
    // ── Bot mutations ───────────────────────────────────────────────────────
    pub static ref MUTATIONS_COUNTER: CounterVec = register_counter_vec!(
        "daily_mutations_total",
        "Änderungen am Tagesdokument nach Operation und Ergebnis",
        &["operation", "status"]
    ).unwrap();

    pub static ref STORE_WRITES_COUNTER: Counter = register_counter!(
        "daily_store_writes_total",
        "Vollständige Schreibvorgänge des Tagesdokuments"
    ).unwrap();

    pub static ref OVERRIDE_EXPIRED_COUNTER: Counter = register_counter!(
        "daily_override_expired_total",
        "Abgelaufene Sonderöffnungszeiten, beim Lesen deaktiviert"
    ).unwrap();

    // ── Public reads ────────────────────────────────────────────────────────
    pub static ref STATUS_REQUESTS_COUNTER: CounterVec = register_counter_vec!(
        "status_requests_total",
        "Abfragen des Öffnungsstatus nach Ergebnis",
        &["is_open"]
    ).unwrap();
}

/// Count the outcome of a mutating operation and pass the result through.
pub fn record<T>(operation: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    let status = match &result {
        Ok(_) => "ok",
        Err(e) => e.metric_label(),
    };
    MUTATIONS_COUNTER
        .with_label_values(&[operation, status])
        .inc();
    result
}
