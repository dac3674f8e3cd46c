use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Free-tier ORS directions quota.
pub const ORS_REQUESTS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(40) {
    Some(n) => n,
    None => unreachable!(),
};

pub fn ors_limiter(per_minute: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)))
}

/// Takes a slot without waiting. On exhaustion returns how long until the
/// next slot frees up.
pub fn try_acquire(limiter: &Limiter) -> Result<(), Duration> {
    limiter
        .check()
        .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
}
