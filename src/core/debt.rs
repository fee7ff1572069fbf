use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest balance or minimum payment a debt may carry (one quadrillion).
///
/// Keeps every sum and interest product the engine forms far inside
/// `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Identifier of a debt record, as assigned by the persistence layer.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::DebtId;
///
/// let visa = DebtId::new("visa-4411");
/// assert_eq!(visa.as_str(), "visa-4411");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DebtId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Federal or private student loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanProgram {
    Federal,
    Private,
}

/// Category of a debt together with the fields that only make sense for
/// that category.
///
/// The simulator never looks inside this; it works purely on balance,
/// APR and minimum payment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DebtKind {
    CreditCard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credit_limit: Option<Decimal>,
    },
    PersonalLoan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        term_months: Option<u32>,
    },
    AutoLoan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        term_months: Option<u32>,
    },
    InstallmentLoan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        term_months: Option<u32>,
    },
    StudentLoan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        program: Option<LoanProgram>,
    },
    Mortgage {
        term_months: u32,
        #[serde(default)]
        escrow_included: bool,
    },
    #[default]
    Other,
}

impl DebtKind {
    pub fn label(&self) -> &'static str {
        match self {
            DebtKind::CreditCard { .. } => "credit-card",
            DebtKind::PersonalLoan { .. } => "personal-loan",
            DebtKind::AutoLoan { .. } => "auto-loan",
            DebtKind::InstallmentLoan { .. } => "installment-loan",
            DebtKind::StudentLoan { .. } => "student-loan",
            DebtKind::Mortgage { .. } => "mortgage",
            DebtKind::Other => "other",
        }
    }
}

/// A single debt as seen by the payoff engine.
///
/// Debts are immutable for the duration of a simulation; what-if analysis
/// derives modified copies with the `with_*` methods instead of mutating.
///
/// # Examples
///
/// ```
/// use payoff_engine::core::debt::Debt;
/// use rust_decimal_macros::dec;
///
/// let card = Debt::new("visa", "Visa Card", dec!(2_500), dec!(22.9), dec!(75));
/// assert_eq!(card.balance(), dec!(2_500));
/// assert!(!card.is_delinquent());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    id: DebtId,
    name: String,
    /// Outstanding balance. Must be positive.
    balance: Decimal,
    /// Annual percentage rate, 0 to 100.
    apr: Decimal,
    /// Required monthly payment. Must be positive.
    minimum_payment: Decimal,
    #[serde(default)]
    is_delinquent: bool,
    #[serde(default)]
    kind: DebtKind,
}

impl Debt {
    /// Create a new debt.
    ///
    /// # Panics
    ///
    /// Panics if `balance` or `minimum_payment` is not positive or exceeds
    /// [`MAX_AMOUNT`], or if `apr` lies outside 0 to 100.
    pub fn new(
        id: impl Into<DebtId>,
        name: impl Into<String>,
        balance: Decimal,
        apr: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        let debt = Self {
            id: id.into(),
            name: name.into(),
            balance,
            apr,
            minimum_payment,
            is_delinquent: false,
            kind: DebtKind::Other,
        };
        if let Err(reason) = debt.check() {
            panic!("Debt {} is invalid: {}", debt.id, reason);
        }
        debt
    }

    pub fn with_kind(mut self, kind: DebtKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_delinquent(mut self, delinquent: bool) -> Self {
        self.is_delinquent = delinquent;
        self
    }

    /// Copy of this debt with a different balance.
    ///
    /// # Panics
    ///
    /// Panics if `balance` is not positive or exceeds [`MAX_AMOUNT`].
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        assert!(
            balance > Decimal::ZERO && balance <= MAX_AMOUNT,
            "Debt balance must be positive and at most {}, got {}",
            MAX_AMOUNT,
            balance
        );
        self.balance = balance;
        self
    }

    /// Copy of this debt with a different APR.
    ///
    /// # Panics
    ///
    /// Panics if `apr` lies outside 0 to 100.
    pub fn with_apr(mut self, apr: Decimal) -> Self {
        assert!(
            apr >= Decimal::ZERO && apr <= Decimal::ONE_HUNDRED,
            "APR must be between 0 and 100, got {}",
            apr
        );
        self.apr = apr;
        self
    }

    /// Check the simulation-entry invariants, returning the reason on failure.
    ///
    /// Debts built through [`Debt::new`] always pass; deserialized debts
    /// may not.
    pub fn check(&self) -> Result<(), String> {
        if self.balance <= Decimal::ZERO {
            return Err(format!("balance must be positive, got {}", self.balance));
        }
        if self.balance > MAX_AMOUNT {
            return Err(format!(
                "balance must not exceed {}, got {}",
                MAX_AMOUNT, self.balance
            ));
        }
        if self.minimum_payment <= Decimal::ZERO {
            return Err(format!(
                "minimum payment must be positive, got {}",
                self.minimum_payment
            ));
        }
        if self.minimum_payment > MAX_AMOUNT {
            return Err(format!(
                "minimum payment must not exceed {}, got {}",
                MAX_AMOUNT, self.minimum_payment
            ));
        }
        if self.apr < Decimal::ZERO || self.apr > Decimal::ONE_HUNDRED {
            return Err(format!("APR must be between 0 and 100, got {}", self.apr));
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> &DebtId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apr(&self) -> Decimal {
        self.apr
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }

    pub fn is_delinquent(&self) -> bool {
        self.is_delinquent
    }

    pub fn kind(&self) -> &DebtKind {
        &self.kind
    }
}

/// Sum of minimum payments across a set of debts.
///
/// Callers pass debts that passed [`Debt::check`]; unchecked amounts can
/// overflow.
pub fn total_minimums(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.minimum_payment()).sum()
}

/// Sum of outstanding balances across a set of debts.
pub fn total_balance(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.balance()).sum()
}
