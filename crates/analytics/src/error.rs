use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// An unexpected failure while reducing a report, e.g. an accumulator
    /// overflowing on malformed stored amounts. Division by zero is never
    /// raised here; it is a defined numeric result (0) throughout.
    #[error("Aggregation failed while reducing '{report}': {detail}")]
    Computation { report: String, detail: String },
}

impl AnalyticsError {
    pub fn computation(report: &str, detail: impl Into<String>) -> Self {
        AnalyticsError::Computation {
            report: report.to_string(),
            detail: detail.into(),
        }
    }
}
