use super::*;

fn env_config(
    no_color: Option<&str>,
    force_color: Option<&str>,
    clicolor: Option<&str>,
    ci: Option<&str>,
) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(String::from),
        force_color: force_color.map(String::from),
        clicolor: clicolor.map(String::from),
        ci: ci.map(String::from),
    }
}

#[test]
fn test_no_color_disables() {
    let env = env_config(Some("1"), None, None, None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Never);
    assert_eq!(env.apply_color_config(ColorMode::Always), ColorMode::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = env_config(Some(""), None, None, None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Auto);
}

#[test]
fn test_force_color_enables() {
    for value in ["1", "2", "3", "true"] {
        let env = env_config(None, Some(value), None, None);
        assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Always);
    }
}

#[test]
fn test_force_color_zero_disables() {
    for value in ["0", "false"] {
        let env = env_config(None, Some(value), None, None);
        assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Never);
    }
}

#[test]
fn test_invalid_force_color_ignored() {
    let env = env_config(None, Some("banana"), None, None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Auto);
}

#[test]
fn test_clicolor_zero_disables() {
    let env = env_config(None, None, Some("0"), None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Never);

    // Only the literal "0" disables; other values leave the intent alone
    let env = env_config(None, None, Some("1"), None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Auto);
}

#[test]
fn test_force_color_beats_no_color_and_clicolor() {
    let env = env_config(Some("1"), Some("1"), Some("0"), None);
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Always);
}

#[test]
fn test_ci_disables_color() {
    let env = env_config(None, None, None, Some("true"));
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Never);

    // CI short-circuits everything, including FORCE_COLOR
    let env = env_config(None, Some("1"), None, Some("true"));
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Never);
}

#[test]
fn test_unset_environment_keeps_intent() {
    let env = EnvironmentConfig::default();
    assert_eq!(env.apply_color_config(ColorMode::Auto), ColorMode::Auto);
    assert_eq!(env.apply_color_config(ColorMode::Always), ColorMode::Always);
    assert_eq!(env.apply_color_config(ColorMode::Never), ColorMode::Never);
}

#[test]
fn test_load_reads_process_environment() {
    // The only test that touches real process environment; scoped to a
    // variable no other test reads
    unsafe {
        std::env::set_var("NO_COLOR", "1");
    }

    let env = EnvironmentConfig::load().unwrap();
    assert_eq!(env.no_color.as_deref(), Some("1"));

    unsafe {
        std::env::remove_var("NO_COLOR");
    }
}
