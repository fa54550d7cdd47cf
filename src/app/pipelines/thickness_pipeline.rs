use crate::adapters::lmk::{parse_lmk, LmkContent};
use crate::adapters::output::render_records;
use crate::domain::model::{
    pair_index_for_position, LocationTable, PickSide, ThicknessRecord, TransformResult,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::domain::services::compute_thickness;
use crate::utils::error::{Result, ThicknessError};

/// Above this many usable picks in one horizon file a slow-run notice is logged.
pub const LARGE_INPUT_PICKS: usize = 100_000;

/// Only picks that survive the depth filter count toward the threshold.
pub(crate) fn is_large_input(content: &LmkContent) -> bool {
    content.picks.len() > LARGE_INPUT_PICKS
}

pub struct ThicknessPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> ThicknessPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ThicknessPipeline<S, C> {
    async fn extract(&self) -> Result<LocationTable> {
        let mut table = LocationTable::new();
        let mut large_input_noted = false;

        for (offset, file) in self.config.horizon_files().iter().enumerate() {
            let position = offset + 1;
            let pair_index = pair_index_for_position(position);
            let side = PickSide::from_file_position(position);

            tracing::debug!("Reading {:?} horizon {} (pair {})", side, file, pair_index);
            let bytes = self.storage.read_file(file).await?;
            let text = String::from_utf8_lossy(&bytes);
            let content = parse_lmk(file, &text)?;

            if !large_input_noted && is_large_input(&content) {
                tracing::warn!("Horizon files are pretty big... it may take a while");
                large_input_noted = true;
            }
            if content.dropped_non_positive > 0 {
                tracing::debug!(
                    "{}: dropped {} picks with non-positive depth",
                    file,
                    content.dropped_non_positive
                );
            }

            for pick in content.picks {
                table.record_pick(pick.location, pair_index, side, pick.depth);
            }
        }

        Ok(table)
    }

    async fn transform(&self, table: LocationTable) -> Result<TransformResult> {
        let parallel = self.config.parallel();
        tracing::debug!(
            "Trimming {} intervals at {} locations (parallel: {})",
            table.interval_count(),
            table.len(),
            parallel
        );

        let result = tokio::task::spawn_blocking(move || compute_thickness(table, parallel))
            .await
            .map_err(|e| ThicknessError::ProcessingError {
                message: format!("Thickness computation did not complete: {}", e),
            })?;

        let stats = result.trim_stats;
        tracing::info!(
            "Trimmed {} invalid and {} nested intervals, dropped {} locations",
            stats.invalid_removed,
            stats.nested_removed,
            stats.locations_dropped
        );

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();

        let records: Vec<ThicknessRecord> = if self.config.skip_zero_thickness() {
            let total = result.records.len();
            let kept: Vec<ThicknessRecord> = result
                .records
                .into_iter()
                .filter(|r| r.thickness > 0.0)
                .collect();
            tracing::debug!("Skipped {} zero-thickness locations", total - kept.len());
            kept
        } else {
            result.records
        };

        let data = render_records(&records, self.config.output_format())?;
        tracing::debug!(
            "Writing {} records ({} bytes, {}) to {}",
            records.len(),
            data.len(),
            self.config.output_format(),
            output_path
        );
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}
