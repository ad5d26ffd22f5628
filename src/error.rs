use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayoffError {
    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("payoff after {months} months falls outside the supported calendar")]
    DateOutOfRange { months: u32 },
}
