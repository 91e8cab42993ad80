#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_valid() {
        let config = BamConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recall.max_iterations, 32);
        assert!(!config.report.latex);
    }

    #[test]
    fn test_config_validation_recall() {
        let mut config = BamConfig::default();

        config.recall.max_iterations = 0;
        assert!(config.validate().is_err());

        config.recall.max_iterations = 1_000_000;
        assert!(config.validate().is_err());

        config.recall.max_iterations = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_noise() {
        let mut config = BamConfig::default();
        config.noise.trials = 0;
        assert!(config.validate().is_err());

        // Zero flips is an uncorrupted baseline, not an error.
        config.noise.trials = 10;
        config.noise.flips = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_to_toml_string() {
        let config = BamConfig::default();
        let toml_str = config.to_toml_string().unwrap();

        assert!(toml_str.contains("[recall]"));
        assert!(toml_str.contains("[noise]"));
        assert!(toml_str.contains("max_iterations"));
        assert!(toml_str.contains("seed"));
    }

    #[test]
    fn test_config_from_toml_string() {
        let toml_str = r#"
            [recall]
            max_iterations = 8

            [noise]
            trials = 250
            flips = 2
            seed = 7
        "#;

        let config = BamConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.recall.max_iterations, 8);
        assert_eq!(config.noise.trials, 250);
        assert_eq!(config.noise.flips, 2);
        assert_eq!(config.noise.seed, 7);
        // Missing section falls back to defaults
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_config_partial_section() {
        let config = BamConfig::from_toml_str("[noise]\nflips = 3\n").unwrap();
        assert_eq!(config.noise.flips, 3);
        assert_eq!(config.noise.trials, NoiseTrialConfig::default().trials);
        assert_eq!(config.noise.seed, NoiseTrialConfig::default().seed);
    }

    #[test]
    fn test_config_from_toml_rejects_invalid() {
        let toml_str = r#"
            [recall]
            max_iterations = 0
        "#;
        assert!(matches!(
            BamConfig::from_toml_str(toml_str),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            BamConfig::from_toml_str("recall = 3"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_config_file_roundtrip() {
        let mut config = BamConfig::default();
        config.noise.seed = 1234;
        config.report.latex = true;

        let file = NamedTempFile::new().unwrap();
        config.save_to_file(file.path()).unwrap();

        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("1234"));

        let loaded = BamConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_layered_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = BamConfig::load_layered(Some(&missing)).unwrap();
        assert_eq!(config.recall, RecallConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = BamConfig::default();
        config
            .apply_overrides(lookup(&[
                ("BAM_RECALL_MAX_ITERATIONS", "64"),
                ("BAM_NOISE_TRIALS", " 20 "),
                ("BAM_NOISE_FLIPS", "2"),
                ("BAM_NOISE_SEED", "99"),
                ("BAM_REPORT_LATEX", "true"),
            ]))
            .unwrap();

        assert_eq!(config.recall.max_iterations, 64);
        assert_eq!(config.noise.trials, 20);
        assert_eq!(config.noise.flips, 2);
        assert_eq!(config.noise.seed, 99);
        assert!(config.report.latex);
        assert!(config.report.color);
    }

    #[test]
    fn test_overrides_reject_garbage() {
        let mut config = BamConfig::default();
        let err = config
            .apply_overrides(lookup(&[("BAM_NOISE_TRIALS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("BAM_NOISE_TRIALS"));
        assert_eq!(config.noise.trials, NoiseTrialConfig::default().trials);
    }
}
