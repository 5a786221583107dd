use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The requested trade was not found in the store.")]
    NotFound,

    /// A backing-store failure surfaced by an adapter (connection loss,
    /// malformed row, ...). The in-memory store never raises this.
    #[error("Store backend failure: {0}")]
    Backend(String),
}
