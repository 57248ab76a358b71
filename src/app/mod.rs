pub mod loaders;
pub mod pipelines;
