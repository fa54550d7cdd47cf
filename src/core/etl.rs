use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's extract → transform → load stages in order.
pub struct ThicknessEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ThicknessEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Returns the path the thickness file was written to.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting salt thickness calculation...");

        // Extract
        tracing::info!("Reading horizon files...");
        let table = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} intervals at {} locations",
            table.interval_count(),
            table.len()
        );
        self.monitor.log_stage("Extract", table.len());

        // Transform
        tracing::info!("Trimming the horizons and sweeping...");
        let result = self.pipeline.transform(table).await?;
        tracing::info!("Computed thickness at {} locations", result.records.len());
        self.monitor.log_stage("Transform", result.records.len());

        // Load
        tracing::info!("Writing salt thickness file...");
        let computed = result.records.len();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stage("Load", computed);

        self.monitor.log_summary();
        Ok(output_path)
    }
}
