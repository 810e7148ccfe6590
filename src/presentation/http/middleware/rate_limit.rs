// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type LoginRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

const REPLENISH_PER_SECOND: u64 = 1;
const BURST_SIZE: u32 = 5;

/// Per-client-IP limiter for credential endpoints. The limiter state is
/// process-wide so every router built in this process shares one budget.
pub fn login_rate_limit_layer() -> Option<LoginRateLimitLayer> {
    static RATE_LIMITER: OnceLock<Option<LoginRateLimitLayer>> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(REPLENISH_PER_SECOND);
            builder.burst_size(BURST_SIZE);
            let config = builder.key_extractor(SmartIpKeyExtractor).finish();
            if config.is_none() {
                tracing::warn!("invalid login rate limit configuration; limiter disabled");
            }
            config.map(|config| GovernorLayer::new(config))
        })
        .clone()
}
