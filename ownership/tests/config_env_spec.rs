use serial_test::serial;

use ownership::config::{load_from_env, ConfigError, POLICY_ENV, UNKNOWN_USER_ENV};
use ownership::{ItemOwnershipPolicy, PolicyConfig, PolicyKind, UserDirectory};

fn clear_env() {
    std::env::remove_var(POLICY_ENV);
    std::env::remove_var(UNKNOWN_USER_ENV);
}

#[test]
#[serial]
fn defaults_when_env_unset() {
    clear_env();
    let cfg = load_from_env().unwrap();
    assert_eq!(cfg, PolicyConfig::default());
    assert_eq!(cfg.policy, PolicyKind::AssignCreator);
    assert_eq!(cfg.unknown_user_id, "unknown");
}

#[test]
#[serial]
fn env_selects_policy_and_sentinel() {
    clear_env();
    std::env::set_var(POLICY_ENV, "drop");
    std::env::set_var(UNKNOWN_USER_ENV, "anonymous");

    let cfg = load_from_env().unwrap();
    assert_eq!(cfg.policy, PolicyKind::Drop);
    assert_eq!(cfg.build_policy().kind(), PolicyKind::Drop);

    let users = cfg.user_directory(Some("anonymous"));
    let acting = users.current_user().unwrap();
    assert!(users.is_unknown(&acting));

    clear_env();
}

#[test]
#[serial]
fn empty_policy_var_falls_back_to_default() {
    clear_env();
    std::env::set_var(POLICY_ENV, "  ");
    assert_eq!(load_from_env().unwrap().policy, PolicyKind::AssignCreator);
    clear_env();
}

#[test]
#[serial]
fn malformed_env_is_an_error_not_a_panic() {
    clear_env();
    std::env::set_var(POLICY_ENV, "everyone-owns-everything");
    let err = load_from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPolicy { .. }));
    assert!(err.to_string().contains(POLICY_ENV));

    clear_env();
    std::env::set_var(UNKNOWN_USER_ENV, "");
    assert!(matches!(
        load_from_env(),
        Err(ConfigError::BlankUnknownUser { .. })
    ));
    clear_env();
}
