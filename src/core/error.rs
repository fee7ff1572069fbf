use crate::core::debt::DebtId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors arising from payoff simulation and the analyses built on it.
///
/// Every variant is a local, synchronous failure: nothing has been
/// produced when one of these is returned, and the caller decides whether
/// to retry with adjusted inputs (typically a higher monthly payment).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayoffError {
    #[error("no debts provided for simulation")]
    NoDebts,

    #[error("debt {id} is invalid: {reason}")]
    InvalidDebt { id: DebtId, reason: String },

    #[error(
        "monthly payment ({payment}) must be at least {required} to cover all minimum payments; short by {shortfall}"
    )]
    InsufficientPayment {
        payment: Decimal,
        required: Decimal,
        shortfall: Decimal,
    },

    #[error("scenario exceeded {months} months with {unpaid} debt(s) still outstanding")]
    SimulationOverrun { months: u32, unpaid: usize },

    #[error("debt {0} not found")]
    DebtNotFound(DebtId),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl PayoffError {
    /// Build an `InsufficientPayment` error from the offered payment and the
    /// required sum of minimums.
    pub fn insufficient(payment: Decimal, required: Decimal) -> Self {
        PayoffError::InsufficientPayment {
            payment,
            required,
            shortfall: required - payment,
        }
    }

    /// True for errors caused by the caller's inputs rather than by the
    /// simulation running past its month ceiling.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PayoffError::SimulationOverrun { .. })
    }
}
