use std::fmt;

use crate::cart::CartInvariantError;
use crate::notify::Notice;
use crate::oracle::OracleError;
use crate::product::ProductId;
use crate::repository::RepositoryError;

/// The cart operation an error came from. Decides which failure notice the
/// error turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
            Operation::Update => write!(f, "update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Requested amount is below 1.
    Validation { amount: u32 },
    /// The product is not in the cart.
    NotFound { product_id: ProductId },
    /// The requested amount is more than the oracle says is available.
    StockExceeded {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    Oracle(OracleError),
    Persistence(RepositoryError),
    /// The mutation would break cart uniqueness.
    Invariant(CartInvariantError),
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::Validation { amount } => {
                write!(f, "invalid quantity {}: must be at least 1", amount)
            }
            CartError::NotFound { product_id } => {
                write!(f, "product {} is not in the cart", product_id)
            }
            CartError::StockExceeded {
                product_id,
                requested,
                available,
            } => write!(
                f,
                "requested {} of product {} but only {} available",
                requested, product_id, available
            ),
            CartError::Oracle(err) => write!(f, "oracle error: {}", err),
            CartError::Persistence(err) => write!(f, "persistence error: {}", err),
            CartError::Invariant(err) => write!(f, "cart invariant violated: {}", err),
        }
    }
}

impl std::error::Error for CartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartError::Oracle(err) => Some(err),
            CartError::Persistence(err) => Some(err),
            CartError::Invariant(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OracleError> for CartError {
    fn from(err: OracleError) -> Self {
        CartError::Oracle(err)
    }
}

impl From<CartInvariantError> for CartError {
    fn from(err: CartInvariantError) -> Self {
        CartError::Invariant(err)
    }
}

impl From<RepositoryError> for CartError {
    fn from(err: RepositoryError) -> Self {
        CartError::Persistence(err)
    }
}

impl CartError {
    /// The user-facing failure notice for this error when raised by `operation`.
    pub fn notice(&self, operation: Operation) -> Notice {
        match (operation, self) {
            (Operation::Add, CartError::StockExceeded { .. }) => Notice::OutOfStock,
            (Operation::Add, _) => Notice::AddFailed,
            (Operation::Remove, CartError::NotFound { .. }) => Notice::ProductNotFound,
            (Operation::Remove, _) => Notice::RemoveFailed,
            (Operation::Update, CartError::Validation { .. }) => Notice::InvalidQuantity,
            (Operation::Update, CartError::StockExceeded { .. }) => Notice::QuantityExceedsStock,
            (Operation::Update, CartError::NotFound { .. }) => Notice::ItemNotInCart,
            (Operation::Update, _) => Notice::UpdateFailed,
        }
    }
}
