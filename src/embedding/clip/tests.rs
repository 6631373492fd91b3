use super::*;
use image::{Rgb, RgbImage};
use std::path::PathBuf;

fn gradient(size: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, y| {
        Rgb([(x * 255 / size) as u8, (y * 255 / size) as u8, 128])
    }))
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

mod config_tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_embedder_config_stub() {
        let config = EmbedderConfig::stub();
        assert!(config.testing_stub);
        assert!(config.model_path.as_os_str().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_embedder_config_validation_empty_path_no_stub() {
        let config = EmbedderConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_embedder_config_validation_missing_weights() {
        let config = EmbedderConfig::new("/nonexistent/clip");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
        assert!(!config.model_available());
    }

    #[test]
    fn test_weights_path_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmbedderConfig::new(dir.path());
        assert_eq!(config.weights_path(), dir.path().join(CLIP_WEIGHTS_FILE));
        assert!(!config.model_available());

        std::fs::write(dir.path().join(CLIP_WEIGHTS_FILE), b"").unwrap();
        assert!(config.model_available());
    }

    #[test]
    fn test_weights_path_direct_file() {
        let config = EmbedderConfig::new("/models/clip-vit-b32.safetensors");
        assert_eq!(
            config.weights_path(),
            PathBuf::from("/models/clip-vit-b32.safetensors")
        );
    }

    #[test]
    fn test_vit_b32_input_size() {
        assert_eq!(
            ClipConfig::vit_base_patch32().image_size,
            crate::constants::CLIP_IMAGE_SIZE
        );
    }

    #[test]
    #[serial]
    fn test_from_env_unset_is_stub() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { std::env::remove_var(EmbedderConfig::ENV_MODEL_PATH) };
        assert!(EmbedderConfig::from_env().testing_stub);
    }

    #[test]
    #[serial]
    fn test_from_env_with_path() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { std::env::set_var(EmbedderConfig::ENV_MODEL_PATH, " /models/clip ") };
        let config = EmbedderConfig::from_env();
        unsafe { std::env::remove_var(EmbedderConfig::ENV_MODEL_PATH) };

        assert!(!config.testing_stub);
        assert_eq!(config.model_path, PathBuf::from("/models/clip"));
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_loads_without_model() {
        let embedder = ImageEmbedder::stub().unwrap();
        assert!(embedder.is_stub());
        assert!(!embedder.has_model());
        assert!(format!("{:?}", embedder).contains("Stub"));
    }

    #[test]
    fn test_stub_embedding_is_unit_length() {
        let embedder = ImageEmbedder::stub().unwrap();
        let embedding = embedder.embed(&gradient(64)).unwrap();

        let dim = (3 * STUB_EMBEDDING_SIDE * STUB_EMBEDDING_SIDE) as usize;
        assert_eq!(embedding.len(), dim);
        assert!((norm(&embedding) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_stub_embedding_deterministic() {
        let embedder = ImageEmbedder::stub().unwrap();
        let a = embedder.embed(&gradient(48)).unwrap();
        let b = embedder.embed(&gradient(48)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_flat_image_still_normalized() {
        let embedder = ImageEmbedder::stub().unwrap();
        let flat = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 20, Rgb([90, 90, 90])));
        let embedding = embedder.embed(&flat).unwrap();
        assert!((norm(&embedding) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_image_rejected() {
        let embedder = ImageEmbedder::stub().unwrap();
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = embedder.embed(&empty).unwrap_err();
        assert!(matches!(err, EmbeddingError::PreprocessFailed { .. }));
    }

    #[test]
    fn test_l2_normalize_zero_vector_unchanged() {
        assert_eq!(l2_normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }
}

mod device_tests {
    use super::*;
    use crate::embedding::{device_label, select_device};

    #[test]
    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    fn test_select_device_without_gpu_features_is_cpu() {
        assert_eq!(device_label(&select_device()), "cpu");
    }

    #[test]
    fn test_stub_embedder_uses_selected_device() {
        let embedder = ImageEmbedder::stub().unwrap();
        assert_eq!(
            device_label(embedder.device()),
            device_label(&select_device())
        );
    }
}
