//! The research subject: a company in a country.

use serde::{Deserialize, Serialize};

/// What is being researched. Every query is scoped to this subject at
/// execution time by prefixing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Company name. Must be non-empty before any search is issued.
    pub company: String,

    /// Country providing geographic context.
    pub country: String,
}

impl Subject {
    /// Create a new subject.
    pub fn new(company: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            country: country.into(),
        }
    }

    /// Scope a query to this subject for execution.
    pub fn scope_query(&self, query: &str) -> String {
        format!(
            "For {} company located in {}, answer the following question in detail:\n{}",
            self.company, self.country, query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_query_prefixes_context() {
        let subject = Subject::new("Acme Corp", "Brazil");
        let scoped = subject.scope_query("What is Acme's market share?");

        assert!(scoped.starts_with("For Acme Corp company located in Brazil"));
        assert!(scoped.ends_with("What is Acme's market share?"));
    }
}
