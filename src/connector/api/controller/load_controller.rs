use anyhow::Result;

use crate::IngestReport;

use super::super::Container;

pub struct LoadController<'a> {
    container: &'a Container,
}

impl<'a> LoadController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn load(&self, path: String) -> Result<String> {
        let use_case = self.container.load_use_case();
        let report = use_case.execute(&path).await?;
        Ok(self.format_report(&report))
    }

    fn format_report(&self, report: &IngestReport) -> String {
        let mut output = format!(
            "{}\nCollection: {}",
            report.summary(),
            report.collection_name()
        );

        for failure in report.failures() {
            output.push_str(&format!("\n  record {}: {}", failure.index, failure.error));
        }

        output
    }
}
