/*!
 * Rate limiter tests
 */

use std::time::{Duration, Instant};

use lexicard::resolver::ActionLimiter;

#[test]
fn test_limiter_shouldAllowConfiguredBurstThenBlock() {
    let mut limiter = ActionLimiter::new(3, Duration::from_secs(60));
    let now = Instant::now();

    assert!(limiter.try_acquire_at(now).is_ok());
    assert!(limiter.try_acquire_at(now).is_ok());
    assert!(limiter.try_acquire_at(now).is_ok());
    assert!(limiter.try_acquire_at(now).is_err());
}

#[test]
fn test_limiter_rejection_shouldReportTimeUntilWindowEnd() {
    let mut limiter = ActionLimiter::new(1, Duration::from_secs(60));
    let now = Instant::now();

    limiter.try_acquire_at(now).unwrap();

    let remaining = limiter.try_acquire_at(now + Duration::from_secs(45)).unwrap_err();
    assert_eq!(remaining, Duration::from_secs(15));
}

#[test]
fn test_limiter_windowOpensAtFirstAction_notAtConstruction() {
    let mut limiter = ActionLimiter::new(1, Duration::from_secs(60));

    // Acquire well after construction; the remainder is measured from this
    // instant, so the assertion is exact
    let first = Instant::now() + Duration::from_secs(30);
    limiter.try_acquire_at(first).unwrap();

    let remaining = limiter.try_acquire_at(first + Duration::from_secs(10)).unwrap_err();
    assert_eq!(remaining, Duration::from_secs(50));
}

#[test]
fn test_limiter_windowExpiry_shouldRestoreFullBudget() {
    let mut limiter = ActionLimiter::new(2, Duration::from_secs(60));
    let now = Instant::now();

    limiter.try_acquire_at(now).unwrap();
    limiter.try_acquire_at(now).unwrap();
    assert!(limiter.try_acquire_at(now + Duration::from_secs(59)).is_err());

    let fresh = now + Duration::from_secs(60);
    assert!(limiter.try_acquire_at(fresh).is_ok());
    assert!(limiter.try_acquire_at(fresh).is_ok());
    assert!(limiter.try_acquire_at(fresh).is_err());
}

#[test]
fn test_limiter_default_shouldAllowFivePerMinute() {
    let mut limiter = ActionLimiter::default();
    let now = Instant::now();

    assert_eq!(limiter.limit(), 5);
    for _ in 0..5 {
        assert!(limiter.try_acquire_at(now).is_ok());
    }
    assert!(limiter.try_acquire_at(now).is_err());
}
