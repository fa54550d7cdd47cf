pub mod thickness_pipeline;

pub use thickness_pipeline::ThicknessPipeline;
