// Application layer: pipelines that wire domain services to storage and config.

pub mod pipelines;
