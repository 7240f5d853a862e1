use anyhow::Result;

use crate::connector::http::QueryResponse;
use crate::{normalize_record, QueryOutcome, SearchQuery};

use super::super::Container;

pub struct QueryController<'a> {
    container: &'a Container,
}

impl<'a> QueryController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn query(
        &self,
        query: String,
        threshold: Option<f32>,
        limit: Option<usize>,
        json: bool,
    ) -> Result<String> {
        let config = self.container.config();
        let search_query = SearchQuery::new(query)
            .with_threshold(threshold.unwrap_or(config.similarity_threshold))
            .with_limit(limit.unwrap_or(config.default_limit));

        let use_case = self.container.query_use_case();
        let outcome = use_case.execute(search_query).await?;

        if json {
            Ok(serde_json::to_string_pretty(&QueryResponse::from(outcome))?)
        } else {
            Ok(self.format_outcome(&outcome))
        }
    }

    fn format_outcome(&self, outcome: &QueryOutcome) -> String {
        if outcome.matches().is_empty() {
            return format!(
                "No results above threshold {:.2}.",
                outcome.threshold()
            );
        }

        let mut output = format!("Found {} results:\n\n", outcome.total());

        for (i, m) in outcome.matches().iter().enumerate() {
            output.push_str(&format!("{}. {} (score: {:.3})\n", i + 1, m.id(), m.score()));

            let text = normalize_record(m.record()).unwrap_or_default();
            let preview: String = text
                .lines()
                .take(10)
                .map(|l| format!("   | {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str(&preview);
            output.push_str("\n\n");
        }

        output
    }
}
