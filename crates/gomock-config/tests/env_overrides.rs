use figment::Jail;
use gomock_config::GomockConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("GOMOCK_GENERATE__QUALIFY", "true");
        jail.set_env("GOMOCK_DISCOVERY__ENABLED", "true");

        let config = GomockConfig::load().expect("config loads");
        assert!(config.generate.qualify);
        assert!(config.discovery.enabled);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "gomock.toml",
            r#"
[generate]
callback_prefix = "On"
"#,
        )?;
        jail.set_env("GOMOCK_GENERATE__CALLBACK_PREFIX", "Stub");

        let config = GomockConfig::load().expect("config loads");
        assert_eq!(config.generate.callback_prefix, "Stub");
        Ok(())
    });
}

#[test]
fn unrelated_gomock_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("GOMOCK_LOG", "debug");

        let config = GomockConfig::load().expect("config loads");
        assert_eq!(config, GomockConfig::default());
        Ok(())
    });
}
