use super::*;

mod mapping_tests {
    use super::*;

    #[test]
    fn test_positive_label_keeps_probability() {
        let result = SentimentResult::from_raw(&RawPrediction::new("POSITIVE", 0.9));
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.score - 0.9).abs() < 1e-12);
        assert_eq!(result.description, "positive review");
    }

    #[test]
    fn test_non_positive_label_complements_probability() {
        let result = SentimentResult::from_raw(&RawPrediction::new("NEGATIVE", 0.9));
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.score - 0.1).abs() < 1e-12);
        assert_eq!(result.description, "negative review");
    }

    #[test]
    fn test_positive_label_variants() {
        for label in ["POSITIVE", "pos", "Positive", "LABEL_POS", "긍정"] {
            assert!(RawPrediction::new(label, 0.5).indicates_positive(), "{label}");
        }
        for label in ["NEGATIVE", "LABEL_0", "LABEL_1", "부정", "neutral"] {
            assert!(!RawPrediction::new(label, 0.5).indicates_positive(), "{label}");
        }
    }

    #[test]
    fn test_generic_label_maps_to_negative() {
        let result = SentimentResult::from_raw(&RawPrediction::new("LABEL_1", 0.75));
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_probability_clamped() {
        let result = SentimentResult::from_raw(&RawPrediction::new("POSITIVE", 1.2));
        assert_eq!(result.score, 1.0);

        let result = SentimentResult::from_raw(&RawPrediction::new("POSITIVE", f64::NAN));
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_failed_result() {
        let result = SentimentResult::failed();
        assert_eq!(result.label, SentimentLabel::Unknown);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.description, "analysis failed");
        assert!(!result.label.is_known());
    }

    #[test]
    fn test_label_serializes_lowercase() {
        let json = serde_json::to_value(SentimentResult::failed()).unwrap();
        assert_eq!(json["label"], "unknown");
        assert_eq!(json["score"], 0.5);
        assert_eq!(json["description"], "analysis failed");
    }
}

mod lexicon_tests {
    use super::*;

    #[test]
    fn test_margin_counts_words() {
        assert_eq!(lexicon::margin("great product, love it"), 2);
        assert_eq!(lexicon::margin("terrible, broken on arrival"), -2);
        assert_eq!(lexicon::margin("it arrived on tuesday"), 0);
    }

    #[test]
    fn test_negator_flips_next_word() {
        assert_eq!(lexicon::margin("not good"), -1);
        assert_eq!(lexicon::margin("never disappointed"), 1);
    }

    #[test]
    fn test_korean_stems() {
        assert!(lexicon::margin("정말 좋아요 추천합니다") > 0);
        assert!(lexicon::margin("최악 환불 요청") < 0);
    }

    #[test]
    fn test_probability_is_logistic() {
        assert!((lexicon::positive_probability("nothing here") - 0.5).abs() < 1e-12);
        assert!(lexicon::positive_probability("great great great") > 0.95);
        assert!(lexicon::positive_probability("awful awful awful") < 0.05);
    }
}

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_stub_config_valid() {
        let config = SentimentConfig::stub();
        assert!(config.is_stub());
        assert_eq!(config.max_seq_len, 512);
        assert!(config.validate().is_ok());
        assert!(config.missing_file().is_none());
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = SentimentConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(SentimentError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_seq_len_rejected() {
        let config = SentimentConfig::stub().with_max_seq_len(0);
        assert!(matches!(
            config.validate(),
            Err(SentimentError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let config = SentimentConfig::new(dir.path());
        assert_eq!(
            config.missing_file(),
            Some(dir.path().join("model.safetensors"))
        );
    }

    #[test]
    fn test_load_missing_model_dir_fails() {
        let err = SentimentClassifier::load(SentimentConfig::new("/nonexistent/sentiment"))
            .unwrap_err();
        assert!(matches!(err, SentimentError::ModelNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env_unset_is_stub() {
        // SAFETY: Test code only, serialized with #[serial].
        unsafe { env::remove_var(SentimentConfig::ENV_MODEL_PATH) };
        assert!(SentimentConfig::from_env().is_stub());
    }

    #[test]
    #[serial]
    fn test_from_env_trims_path() {
        // SAFETY: Test code only, serialized with #[serial].
        unsafe { env::set_var(SentimentConfig::ENV_MODEL_PATH, "  /models/klue-bert  ") };
        let config = SentimentConfig::from_env();
        // SAFETY: Test code only, serialized with #[serial].
        unsafe { env::remove_var(SentimentConfig::ENV_MODEL_PATH) };

        assert_eq!(
            config.model_path,
            Some(std::path::PathBuf::from("/models/klue-bert"))
        );
    }

    #[test]
    #[serial]
    fn test_from_env_blank_is_stub() {
        // SAFETY: Test code only, serialized with #[serial].
        unsafe { env::set_var(SentimentConfig::ENV_MODEL_PATH, "   ") };
        let config = SentimentConfig::from_env();
        // SAFETY: Test code only, serialized with #[serial].
        unsafe { env::remove_var(SentimentConfig::ENV_MODEL_PATH) };

        assert!(config.is_stub());
    }
}

mod classifier_tests {
    use super::*;

    #[test]
    fn test_stub_classifier_positive_text() {
        let classifier = SentimentClassifier::stub().unwrap();
        assert!(classifier.is_stub());

        let result =
            classifier.classify("Great product, works perfectly and I love it. Highly recommend!");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.score > 0.9);
    }

    #[test]
    fn test_stub_classifier_negative_text_reports_inverted_score() {
        let classifier = SentimentClassifier::stub().unwrap();
        let raw = classifier
            .classify_raw("Terrible quality, arrived broken. Total waste of money.")
            .unwrap();
        assert_eq!(raw.label, "NEGATIVE");
        assert!(raw.probability > 0.9);

        let result = SentimentResult::from_raw(&raw);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.score - (1.0 - raw.probability)).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_text_ties_to_negative_at_half() {
        let classifier = SentimentClassifier::stub().unwrap();
        for text in ["ok", "It arrived on Tuesday.", "good but flimsy"] {
            let raw = classifier.classify_raw(text).unwrap();
            assert_eq!(raw, RawPrediction::new("NEGATIVE", 0.5), "{text}");

            let result = classifier.classify(text);
            assert_eq!(result.label, SentimentLabel::Negative);
            assert_eq!(result.score, 0.5);
        }
    }

    #[test]
    fn test_top_class_ties_go_to_lowest_index() {
        assert_eq!(top_class(&[0.5, 0.5]), Some((0, 0.5)));
        assert_eq!(top_class(&[0.2, 0.4, 0.4]), Some((1, 0.4)));
        assert_eq!(top_class(&[0.1, 0.9]), Some((1, 0.9)));
        assert_eq!(top_class(&[]), None);
    }

    #[test]
    fn test_empty_text_is_unknown() {
        let classifier = SentimentClassifier::stub().unwrap();
        assert!(matches!(
            classifier.classify_raw("   "),
            Err(SentimentError::EmptyInput)
        ));
        assert_eq!(classifier.classify(""), SentimentResult::failed());
    }

    #[test]
    fn test_stub_labels() {
        let classifier = SentimentClassifier::stub().unwrap();
        assert!(!classifier.has_model());
        assert_eq!(classifier.labels(), vec!["NEGATIVE", "POSITIVE"]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = SentimentClassifier::stub().unwrap();
        let text = "Nice fit but the zipper broke after a week";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}
