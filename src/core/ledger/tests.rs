use std::time::Duration;

use crate::core::cost::types::UsageTokens;
use crate::core::principal::{PrincipalContext, Scope, ScopeLimits};

use super::store::SpendLedger;
use super::types::{BudgetCheck, SpendRecord};

fn record(cost: f64) -> SpendRecord {
    SpendRecord {
        request_id: "req-1".to_string(),
        key_id: "k1".to_string(),
        user_id: None,
        team_id: None,
        org_id: None,
        model: "gpt-4o".to_string(),
        provider: "openai".to_string(),
        usage: UsageTokens::new(100, 50),
        cost_usd: cost,
        cache_hit: false,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn hard_budget_blocks_once_spend_reaches_the_limit() {
    let ledger = SpendLedger::new();
    let principal = PrincipalContext::for_key("k1").with_limits(
        Scope::Key,
        ScopeLimits {
            max_budget: Some(10.0),
            ..Default::default()
        },
    );

    assert_eq!(ledger.check_budget(&principal), BudgetCheck::Ok);

    ledger.record(&principal, record(10.0));

    assert!(matches!(
        ledger.check_budget(&principal),
        BudgetCheck::HardExceeded { .. }
    ));
}

#[test]
fn soft_budget_warns_but_does_not_block() {
    let ledger = SpendLedger::new();
    let principal = PrincipalContext::for_key("k1").with_limits(
        Scope::Key,
        ScopeLimits {
            soft_budget: Some(5.0),
            max_budget: Some(100.0),
            ..Default::default()
        },
    );

    ledger.record(&principal, record(6.0));

    let check = ledger.check_budget(&principal);
    assert!(matches!(check, BudgetCheck::SoftExceeded { .. }));
    assert!(!check.is_blocking());
}

#[test]
fn most_restrictive_scope_wins_across_key_and_team() {
    let ledger = SpendLedger::new();
    let mut principal = PrincipalContext::for_key("k1").with_limits(
        Scope::Key,
        ScopeLimits {
            max_budget: Some(1000.0),
            ..Default::default()
        },
    );
    principal.team_id = Some("team-a".to_string());
    principal = principal.with_limits(
        Scope::Team,
        ScopeLimits {
            max_budget: Some(10.0),
            ..Default::default()
        },
    );

    let mut spend_record = record(10.0);
    spend_record.team_id = Some("team-a".to_string());
    ledger.record(&principal, spend_record);

    assert!(matches!(
        ledger.check_budget(&principal),
        BudgetCheck::HardExceeded { scope: Scope::Team, .. }
    ));
}

#[test]
fn counter_resets_after_budget_duration_elapses() {
    let ledger = SpendLedger::new();
    let principal = PrincipalContext::for_key("k1").with_limits(
        Scope::Key,
        ScopeLimits {
            max_budget: Some(10.0),
            budget_duration: Some(Duration::from_millis(1)),
            ..Default::default()
        },
    );

    ledger.record(&principal, record(10.0));
    assert!(matches!(
        ledger.check_budget(&principal),
        BudgetCheck::HardExceeded { .. }
    ));

    std::thread::sleep(Duration::from_millis(5));
    let reset = ledger.sweep_resets();
    assert_eq!(reset, 1);
    assert_eq!(ledger.check_budget(&principal), BudgetCheck::Ok);
}
