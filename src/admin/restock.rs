use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::fields::{Field, FieldErrors};
use super::form::parse_number;

pub const INVALID_QUANTITY: &str = "Please enter a valid positive number";

/// The restock dialog for one product.
///
/// A valid submit closes the dialog and clears its input; an invalid one keeps
/// it open with the quantity error shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockDialog {
    product_id: String,
    quantity: String,
    error: Option<String>,
    open: bool,
}

impl RestockDialog {
    pub fn open(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: String::new(),
            error: None,
            open: true,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_quantity(&mut self, quantity: impl Into<String>) {
        self.quantity = quantity.into();
    }

    /// # Errors
    ///
    /// Returns the quantity error if the input is not a whole number above zero.
    pub fn submit(&mut self) -> Result<u32, FieldErrors> {
        match parse_quantity(&self.quantity) {
            Some(quantity) => {
                self.quantity.clear();
                self.error = None;
                self.open = false;
                Ok(quantity)
            }
            None => {
                self.error = Some(INVALID_QUANTITY.to_string());
                let mut errors = FieldErrors::new();
                errors.insert(Field::Quantity, INVALID_QUANTITY);
                Err(errors)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.quantity.clear();
        self.error = None;
        self.open = false;
    }
}

fn parse_quantity(raw: &str) -> Option<u32> {
    let amount = parse_number(raw)?;
    if amount <= Decimal::ZERO || !amount.fract().is_zero() {
        return None;
    }
    amount.to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_quantity_closes_dialog() {
        let mut dialog = RestockDialog::open("3");
        dialog.set_quantity(" 25 ");
        assert_eq!(dialog.submit().unwrap(), 25);
        assert!(!dialog.is_open());
        assert_eq!(dialog.quantity(), "");
        assert_eq!(dialog.error(), None);
    }

    #[test]
    fn test_invalid_quantity_keeps_dialog_open() {
        for bad in ["", "0", "-4", "abc", "1.5"] {
            let mut dialog = RestockDialog::open("3");
            dialog.set_quantity(bad);
            let errors = dialog.submit().unwrap_err();
            assert_eq!(errors.get(Field::Quantity), Some(INVALID_QUANTITY), "quantity {bad:?}");
            assert!(dialog.is_open());
            assert_eq!(dialog.error(), Some(INVALID_QUANTITY));
            assert_eq!(dialog.quantity(), bad);
        }
    }

    #[test]
    fn test_resubmit_after_error_clears_it() {
        let mut dialog = RestockDialog::open("3");
        dialog.set_quantity("zero");
        assert!(dialog.submit().is_err());
        dialog.set_quantity("5");
        assert_eq!(dialog.submit().unwrap(), 5);
        assert_eq!(dialog.error(), None);
    }

    #[test]
    fn test_cancel_discards_input() {
        let mut dialog = RestockDialog::open("3");
        dialog.set_quantity("9");
        dialog.cancel();
        assert!(!dialog.is_open());
        assert_eq!(dialog.quantity(), "");
    }
}
