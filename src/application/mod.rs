// Application layer - pipeline stages, caching, and service entry points
pub mod aggregator;
pub mod assembler;
pub mod axis;
pub mod chart_cache;
pub mod chart_service;
pub mod entry_builder;
pub mod palette;
pub mod pipeline;
pub mod record_source;
pub mod segmenter;
