use thiserror::Error;

pub type TbResult<T> = Result<T, TbError>;

#[derive(Error, Debug)]
pub enum TbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
