use crate::core::cache::RateCache;
use crate::core::convert::ConversionError;
use crate::core::request::{Envelope, RawRequest, respond};
use tracing::warn;

/// One-shot conversion: validates the arguments, loads today's table and converts.
///
/// Unlike the server, a failed fetch is reported to the user instead of
/// falling back to an empty table.
pub async fn run(cache: &RateCache, request: &RawRequest) -> Envelope {
    if let Err(envelope) = request.required() {
        return envelope;
    }

    if let Err(e) = cache.try_refresh().await {
        warn!(error = %format!("{e:#}"), "Could not load exchange rates");
        return Envelope::failure(
            request.amount(),
            request.input_currency.as_deref(),
            &ConversionError::UpstreamUnavailable,
        );
    }

    let snapshot = cache.snapshot().await;
    respond(request, &snapshot.rates)
}
