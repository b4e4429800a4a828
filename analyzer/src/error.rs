use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no node logs to analyze")]
    EmptyInput,
}
