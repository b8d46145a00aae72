use crate::core::principal::{PrincipalContext, Scope, ScopeLimits};

use super::limiter::ScopedRateLimiter;

fn principal_with_rpm(rpm: u32) -> PrincipalContext {
    PrincipalContext::for_key("key-1").with_limits(
        Scope::Key,
        ScopeLimits {
            rpm: Some(rpm),
            ..Default::default()
        },
    )
}

#[test]
fn rpm_limit_trips_with_correct_scope_and_kind() {
    let limiter = ScopedRateLimiter::new();
    let principal = principal_with_rpm(1);

    assert!(limiter.check_and_increment(&principal, 0).is_ok());
    let err = limiter.check_and_increment(&principal, 0).unwrap_err();
    assert!(err.to_string().contains("key"));
}

#[test]
fn a_block_at_one_scope_does_not_partially_increment_others() {
    let limiter = ScopedRateLimiter::new();
    let mut principal = principal_with_rpm(100);
    principal.team_id = Some("team-1".to_string());
    principal.limits.insert(
        Scope::Team,
        ScopeLimits {
            rpm: Some(1),
            ..Default::default()
        },
    );

    // Team scope allows exactly one more request; key scope has headroom.
    assert!(limiter.check_and_increment(&principal, 0).is_ok());

    // Second request: team scope is now full, so the whole commit must be
    // rejected — key scope's counter must NOT have been incremented twice.
    let result = limiter.check_and_increment(&principal, 0);
    assert!(result.is_err());

    let key_count = limiter.count(Scope::Key, "key-1", super::types::LimitKind::Rpm);
    assert_eq!(key_count, 1, "key scope must not have incremented on a rejected commit");
}

#[test]
fn tpm_correction_adjusts_the_current_bucket() {
    let limiter = ScopedRateLimiter::new();
    let principal = PrincipalContext::for_key("key-2").with_limits(
        Scope::Key,
        ScopeLimits {
            tpm: Some(1000),
            ..Default::default()
        },
    );

    limiter.check_and_increment(&principal, 100).unwrap();
    assert_eq!(limiter.count(Scope::Key, "key-2", super::types::LimitKind::Tpm), 100);

    limiter.correct_tpm(&principal, 100, 150);
    assert_eq!(limiter.count(Scope::Key, "key-2", super::types::LimitKind::Tpm), 150);

    limiter.correct_tpm(&principal, 150, 120);
    assert_eq!(limiter.count(Scope::Key, "key-2", super::types::LimitKind::Tpm), 120);
}

#[test]
fn parallel_guard_releases_the_slot_on_drop() {
    let limiter = ScopedRateLimiter::new();
    let principal = PrincipalContext::for_key("key-3").with_limits(
        Scope::Key,
        ScopeLimits {
            max_parallel: Some(1),
            ..Default::default()
        },
    );

    let guard = limiter.acquire_parallel(&principal).unwrap();
    assert!(guard.is_some());

    // Slot is held; a second acquire must fail.
    assert!(limiter.acquire_parallel(&principal).is_err());

    drop(guard);

    // Dropping the guard released the slot.
    assert!(limiter.acquire_parallel(&principal).is_ok());
}

#[test]
fn no_configured_limit_never_blocks() {
    let limiter = ScopedRateLimiter::new();
    let principal = PrincipalContext::for_key("key-4");
    for _ in 0..10 {
        assert!(limiter.check_and_increment(&principal, 1_000).is_ok());
    }
    assert!(limiter.acquire_parallel(&principal).unwrap().is_none());
}
