use crate::domain::model::{LocationTable, OutputFormat, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Horizon files in top, bottom, top, bottom... order.
    fn horizon_files(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn skip_zero_thickness(&self) -> bool;
    fn parallel(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LocationTable>;
    async fn transform(&self, table: LocationTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
