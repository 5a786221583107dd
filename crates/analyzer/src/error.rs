use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    /// No authenticated owner identity was supplied for an analytics call.
    #[error("An analytics request requires an authenticated owner.")]
    MissingOwner,

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
