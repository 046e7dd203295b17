use thiserror::Error;

pub type TriggerResult<T> = Result<T, TriggerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TriggerError {
    #[error(
        "Invalid STA/LTA windows: sta = {sta_n} samples, lta = {lta_n} samples, require 1 <= sta < lta"
    )]
    InvalidWindow { sta_n: usize, lta_n: usize },
}
