//! Rate limiting middleware using token bucket algorithm.
//!
//! The key extractor decides what counts as one client:
//! [`PeerIpKeyExtractor`](tower_governor::key_extractor::PeerIpKeyExtractor)
//! uses the socket peer address, while
//! [`SmartIpKeyExtractor`](tower_governor::key_extractor::SmartIpKeyExtractor)
//! trusts `X-Forwarded-For` / `X-Real-IP` and must only be used behind a
//! trusted reverse proxy.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

/// Layer type produced by this module for a given key extractor.
pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the public site.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer<K: KeyExtractor>(key_extractor: K) -> RateLimitLayer<K> {
    build(key_extractor, 2, 100)
}

/// Creates a stricter rate limiter for the login and registration forms.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure_layer<K: KeyExtractor>(key_extractor: K) -> RateLimitLayer<K> {
    build(key_extractor, 1, 10)
}

fn build<K: KeyExtractor>(key_extractor: K, per_second: u64, burst: u32) -> RateLimitLayer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
