use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行 extract → transform → load，任何階段失敗即中止
    pub fn run(&self) -> Result<String> {
        let name = self.pipeline.name();
        tracing::info!("Starting ETL process: {}", name);
        self.monitor.log_stats("start");

        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", raw_data.len());
        self.monitor.log_stats("extract");

        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data)?;
        tracing::info!("Transformed {} records", transformed.len());
        self.monitor.log_stats("transform");

        tracing::debug!("Loading data...");
        let output_path = self.pipeline.load(transformed)?;
        tracing::info!("Output saved to: {}", output_path);

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;

    struct RecordingPipeline {
        fail_transform: bool,
        phases: RefCell<Vec<&'static str>>,
    }

    impl RecordingPipeline {
        fn new(fail_transform: bool) -> Self {
            Self {
                fail_transform,
                phases: RefCell::new(Vec::new()),
            }
        }
    }

    impl Pipeline for RecordingPipeline {
        type Input = u32;
        type Output = u32;

        fn name(&self) -> &str {
            "recording"
        }

        fn extract(&self) -> Result<Vec<u32>> {
            self.phases.borrow_mut().push("extract");
            Ok(vec![1, 2, 3])
        }

        fn transform(&self, data: Vec<u32>) -> Result<Vec<u32>> {
            self.phases.borrow_mut().push("transform");
            if self.fail_transform {
                return Err(EtlError::ConfigError {
                    message: "boom".to_string(),
                });
            }
            Ok(data.into_iter().map(|v| v * 10).collect())
        }

        fn load(&self, data: Vec<u32>) -> Result<String> {
            self.phases.borrow_mut().push("load");
            Ok(format!("out/{}", data.iter().sum::<u32>()))
        }
    }

    #[test]
    fn test_run_executes_phases_in_order() {
        let engine = EtlEngine::new(RecordingPipeline::new(false));
        assert_eq!(engine.run().unwrap(), "out/60");
        assert_eq!(
            *engine.pipeline.phases.borrow(),
            vec!["extract", "transform", "load"]
        );
    }

    #[test]
    fn test_run_stops_before_load_on_failure() {
        let engine = EtlEngine::new_with_monitoring(RecordingPipeline::new(true), false);
        assert!(engine.run().is_err());
        assert_eq!(*engine.pipeline.phases.borrow(), vec!["extract", "transform"]);
    }
}
