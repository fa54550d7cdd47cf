pub use crate::app::pipelines::thickness_pipeline::ThicknessPipeline;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lmk::{LmkContent, LmkPick};
    use crate::app::pipelines::thickness_pipeline::{is_large_input, LARGE_INPUT_PICKS};
    use crate::core::{ConfigProvider, Pipeline, Storage};
    use crate::domain::model::{Location, OutputFormat};
    use crate::utils::error::{Result, ThicknessError};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .await
                .insert(path.to_string(), content.as_bytes().to_vec());
            self
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ThicknessError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        horizon_files: Vec<String>,
        output_path: String,
        output_format: OutputFormat,
        skip_zero: bool,
        parallel: bool,
    }

    impl MockConfig {
        fn new(files: &[&str]) -> Self {
            Self {
                horizon_files: files.iter().map(|f| f.to_string()).collect(),
                output_path: "out/thickness.lmk".to_string(),
                output_format: OutputFormat::Lmk,
                skip_zero: false,
                parallel: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn horizon_files(&self) -> &[String] {
            &self.horizon_files
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_format(&self) -> OutputFormat {
            self.output_format
        }

        fn skip_zero_thickness(&self) -> bool {
            self.skip_zero
        }

        fn parallel(&self) -> bool {
            self.parallel
        }
    }

    #[tokio::test]
    async fn test_extract_pairs_files_by_position() {
        let storage = MockStorage::new()
            .with_file("T1.lmk", "5 7 0 0 100\n5 8 0 0 110\n")
            .await
            .with_file("B1.lmk", "5 7 0 0 150\n")
            .await
            .with_file("T2.lmk", "5 7 0 0 200\n")
            .await
            .with_file("B2.lmk", "5 7 0 0 230\n")
            .await;
        let config = MockConfig::new(&["T1.lmk", "B1.lmk", "T2.lmk", "B2.lmk"]);
        let pipeline = ThicknessPipeline::new(storage, config);

        let table = pipeline.extract().await.unwrap();

        let at_5_7 = table.get(&Location::new(5, 7)).unwrap();
        assert_eq!(at_5_7.len(), 2);
        assert_eq!(at_5_7[0].pair_index, 1);
        assert_eq!(at_5_7[0].bounds(), Some((100.0, 150.0)));
        assert_eq!(at_5_7[1].pair_index, 2);
        assert_eq!(at_5_7[1].bounds(), Some((200.0, 230.0)));

        // top without a bottom stays half-picked until trimming
        let at_5_8 = table.get(&Location::new(5, 8)).unwrap();
        assert_eq!(at_5_8[0].top_depth, Some(110.0));
        assert_eq!(at_5_8[0].bottom_depth, None);
    }

    #[tokio::test]
    async fn test_extract_fails_on_malformed_record() {
        let storage = MockStorage::new()
            .with_file("T1.lmk", "5 7 0 0 100\n")
            .await
            .with_file("B1.lmk", "5 7 150\n")
            .await;
        let pipeline = ThicknessPipeline::new(storage, MockConfig::new(&["T1.lmk", "B1.lmk"]));

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(
            err,
            ThicknessError::MalformedRecord { line: 1, found: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let pipeline = ThicknessPipeline::new(
            MockStorage::new(),
            MockConfig::new(&["T1.lmk", "B1.lmk"]),
        );

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, ThicknessError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_trims_and_sweeps() {
        let storage = MockStorage::new()
            .with_file("T1.lmk", "1 1 0 0 100\n1 2 0 0 300\n")
            .await
            .with_file("B1.lmk", "1 1 0 0 200\n1 2 0 0 250\n")
            .await
            .with_file("T2.lmk", "1 1 0 0 150\n")
            .await
            .with_file("B2.lmk", "1 1 0 0 300\n")
            .await;
        let config = MockConfig::new(&["T1.lmk", "B1.lmk", "T2.lmk", "B2.lmk"]);
        let pipeline = ThicknessPipeline::new(storage, config);

        let table = pipeline.extract().await.unwrap();
        let result = pipeline.transform(table).await.unwrap();

        // (1,2) is inverted and disappears
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].location, Location::new(1, 1));
        assert_eq!(result.records[0].thickness, 200.0);
        assert_eq!(result.trim_stats.invalid_removed, 1);
        assert_eq!(result.trim_stats.locations_dropped, 1);
    }

    #[tokio::test]
    async fn test_load_writes_lmk_rows() {
        let storage = MockStorage::new()
            .with_file("T1.lmk", "1 1 0 0 100\n1 2 0 0 100\n")
            .await
            .with_file("B1.lmk", "1 1 0 0 150\n1 2 0 0 180\n")
            .await;
        let pipeline = ThicknessPipeline::new(storage.clone(), MockConfig::new(&["T1.lmk", "B1.lmk"]));

        let table = pipeline.extract().await.unwrap();
        let result = pipeline.transform(table).await.unwrap();
        let path = pipeline.load(result).await.unwrap();

        assert_eq!(path, "out/thickness.lmk");
        let written = String::from_utf8(storage.get_file(&path).await.unwrap()).unwrap();
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "        1.00        1.00        0.00        0.00       50.00",
                "        1.00        2.00        0.00        0.00       80.00",
            ]
        );
        assert!(written.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_load_skips_zero_rows_when_asked() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&[]);
        config.skip_zero = true;
        config.output_format = OutputFormat::Csv;
        let pipeline = ThicknessPipeline::new(storage.clone(), config);

        let result = crate::domain::model::TransformResult {
            records: vec![
                crate::domain::model::ThicknessRecord {
                    location: Location::new(1, 1),
                    thickness: 0.0,
                },
                crate::domain::model::ThicknessRecord {
                    location: Location::new(1, 2),
                    thickness: 42.0,
                },
            ],
            trim_stats: Default::default(),
        };
        let path = pipeline.load(result).await.unwrap();

        let written = String::from_utf8(storage.get_file(&path).await.unwrap()).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["iline,xline,thickness", "1,2,42.0"]);
    }

    fn content_with(kept: usize, dropped: usize) -> LmkContent {
        LmkContent {
            picks: vec![
                LmkPick {
                    location: Location::new(1, 1),
                    depth: 100.0,
                };
                kept
            ],
            record_count: kept + dropped,
            dropped_non_positive: dropped,
        }
    }

    #[test]
    fn test_large_input_counts_only_kept_picks() {
        assert!(is_large_input(&content_with(LARGE_INPUT_PICKS + 1, 0)));
        assert!(!is_large_input(&content_with(LARGE_INPUT_PICKS, 0)));
        // null-depth records push the raw count over but are not picks
        assert!(!is_large_input(&content_with(10, LARGE_INPUT_PICKS)));
    }
}
