use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Category, Price, Product, ProductDraft, MAX_STOCK};
use super::fields::{Field, FieldErrors};

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Parses a number the way a browser number input accepts it: surrounding
/// whitespace allowed, plain or scientific notation.
pub(crate) fn parse_number(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Raw add/edit form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
}

impl ProductForm {
    /// Pre-fills the form from an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.to_string(),
            price: product.price.amount().to_string(),
            stock: product.stock.to_string(),
            description: product.description.clone().unwrap_or_default(),
        }
    }

    /// Checks every field and, if all pass, returns the cleaned-up draft.
    ///
    /// # Errors
    ///
    /// Returns one message per failing field.
    pub fn validate(&self) -> Result<ProductDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "Name is required");
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.insert(Field::Name, "Name must be at least 2 characters");
        }

        let category = if self.category.trim().is_empty() {
            errors.insert(Field::Category, "Category is required");
            None
        } else {
            match Category::from_str(self.category.trim()) {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.insert(Field::Category, "Please select a valid category");
                    None
                }
            }
        };

        let price = if self.price.trim().is_empty() {
            errors.insert(Field::Price, "Price is required");
            None
        } else {
            match parse_number(&self.price).and_then(|amount| Price::new(amount).ok()) {
                Some(price) => Some(price),
                None => {
                    errors.insert(Field::Price, "Price must be a positive number");
                    None
                }
            }
        };

        let stock = if self.stock.trim().is_empty() {
            errors.insert(Field::Stock, "Stock is required");
            None
        } else {
            match parse_number(&self.stock) {
                Some(amount) if amount < Decimal::ZERO || amount > Decimal::from(MAX_STOCK) => {
                    errors.insert(Field::Stock, "Stock must be a non-negative number");
                    None
                }
                Some(amount) if !amount.fract().is_zero() => {
                    errors.insert(Field::Stock, "Stock must be a whole number");
                    None
                }
                Some(amount) => amount.to_u32(),
                None => {
                    errors.insert(Field::Stock, "Stock must be a non-negative number");
                    None
                }
            }
        };

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.insert(Field::Description, "Description must be less than 500 characters");
        }

        match (category, price, stock) {
            (Some(category), Some(price), Some(stock)) if errors.is_empty() => Ok(ProductDraft {
                name: name.to_string(),
                category,
                price,
                stock,
                description: (!description.is_empty()).then(|| description.to_string()),
            }),
            _ => Err(errors),
        }
    }
}

/// Where an add/edit form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormRejection {
    #[error("Form has invalid fields: {0}")]
    Invalid(FieldErrors),
    #[error("A submission is already in progress")]
    Busy,
}

/// An add or edit dialog: the form, its field errors, and its phase.
///
/// `Idle → Validating → Idle` (invalid, errors shown) or
/// `Idle → Validating → Submitting → Idle`.
#[derive(Debug, Clone)]
pub struct ProductEditor {
    form: ProductForm,
    phase: FormPhase,
    errors: FieldErrors,
    /// Stock text the edit dialog opened with; `None` for a new product.
    prefilled_stock: Option<String>,
}

impl ProductEditor {
    pub fn for_new(form: ProductForm) -> Self {
        Self {
            form,
            phase: FormPhase::Idle,
            errors: FieldErrors::new(),
            prefilled_stock: None,
        }
    }

    pub fn for_existing(product: &Product) -> Self {
        let form = ProductForm::from_product(product);
        Self {
            prefilled_stock: Some(form.stock.clone()),
            form,
            phase: FormPhase::Idle,
            errors: FieldErrors::new(),
        }
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the stock field differs from what the dialog was opened with.
    /// Always true for a new product.
    pub fn stock_edited(&self) -> bool {
        self.prefilled_stock.as_deref() != Some(self.form.stock.trim())
    }

    /// Validates and, on success, moves to `Submitting`.
    ///
    /// # Errors
    ///
    /// [`FormRejection::Busy`] while a submission is in flight;
    /// [`FormRejection::Invalid`] (back in `Idle`, errors recorded) if any field fails.
    pub fn begin_submit(&mut self) -> Result<ProductDraft, FormRejection> {
        if self.phase != FormPhase::Idle {
            return Err(FormRejection::Busy);
        }
        self.phase = FormPhase::Validating;
        match self.form.validate() {
            Ok(draft) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                Ok(draft)
            }
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "Form rejected");
                self.errors = errors.clone();
                self.phase = FormPhase::Idle;
                Err(FormRejection::Invalid(errors))
            }
        }
    }

    /// Returns to `Idle` after the submission settles, whatever its outcome.
    pub fn finish_submit(&mut self) {
        self.phase = FormPhase::Idle;
    }
}
