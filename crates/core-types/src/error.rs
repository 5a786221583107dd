use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown instrument type tag: '{0}'")]
    UnknownInstrumentType(String),
}
