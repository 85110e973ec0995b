use noah_domain::flags::{FeatureFlags, FlagValue};

#[test]
fn empty_set_reads_every_flag_as_absent() {
    let flags = FeatureFlags::new();
    assert!(flags.is_empty());
    assert!(flags.get("anything").is_none());
    assert!(!flags.is_enabled("anything"));
}

#[test]
fn only_explicit_true_is_enabled() {
    let flags: FeatureFlags = [
        ("on", FlagValue::Bool(true)),
        ("off", FlagValue::Bool(false)),
        ("theme", FlagValue::Variant("dark".to_owned())),
    ]
    .into_iter()
    .collect();

    assert_eq!(flags.len(), 3);
    assert!(flags.is_enabled("on"));
    assert!(!flags.is_enabled("off"));
    assert!(!flags.is_enabled("theme"));
    assert_eq!(flags.variant("theme"), Some("dark"));
    assert_eq!(flags.variant("on"), None);
}

#[test]
fn flags_deserialize_from_gating_payload() {
    let flags: FeatureFlags =
        serde_json::from_str(r#"{ "bot.studio.prompt_diff": true, "layout": "compact" }"#)
            .expect("flags deserialize");

    assert!(flags.is_enabled("bot.studio.prompt_diff"));
    assert_eq!(flags.variant("layout"), Some("compact"));
    assert_eq!(flags.iter().count(), 2);
}
