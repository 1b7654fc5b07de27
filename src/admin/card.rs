use thiserror::Error;

/// Delete lifecycle of one product card on the admin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    ConfirmingDelete,
    Deleting,
    Removed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot {action} while card is {from:?}")]
pub struct InvalidTransition {
    pub action: &'static str,
    pub from: CardState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    product_id: String,
    state: CardState,
}

impl ProductCard {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            state: CardState::Idle,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    fn transition(&mut self, action: &'static str, from: CardState, to: CardState) -> Result<(), InvalidTransition> {
        if self.state != from {
            return Err(InvalidTransition {
                action,
                from: self.state,
            });
        }
        self.state = to;
        Ok(())
    }

    /// `Idle → ConfirmingDelete`
    pub fn request_delete(&mut self) -> Result<(), InvalidTransition> {
        self.transition("request delete", CardState::Idle, CardState::ConfirmingDelete)
    }

    /// `ConfirmingDelete → Idle`
    pub fn cancel_delete(&mut self) -> Result<(), InvalidTransition> {
        self.transition("cancel delete", CardState::ConfirmingDelete, CardState::Idle)
    }

    /// `ConfirmingDelete → Deleting`
    pub fn confirm_delete(&mut self) -> Result<(), InvalidTransition> {
        self.transition("confirm delete", CardState::ConfirmingDelete, CardState::Deleting)
    }

    /// `Deleting → Removed` on success, `Deleting → Idle` on failure.
    pub fn finish_delete(&mut self, succeeded: bool) -> Result<(), InvalidTransition> {
        let to = if succeeded { CardState::Removed } else { CardState::Idle };
        self.transition("finish delete", CardState::Deleting, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_delete_removes_card() {
        let mut card = ProductCard::new("4");
        card.request_delete().unwrap();
        assert_eq!(card.state(), CardState::ConfirmingDelete);
        card.confirm_delete().unwrap();
        assert_eq!(card.state(), CardState::Deleting);
        card.finish_delete(true).unwrap();
        assert_eq!(card.state(), CardState::Removed);
    }

    #[test]
    fn test_cancel_and_failure_return_to_idle() {
        let mut card = ProductCard::new("4");
        card.request_delete().unwrap();
        card.cancel_delete().unwrap();
        assert_eq!(card.state(), CardState::Idle);

        card.request_delete().unwrap();
        card.confirm_delete().unwrap();
        card.finish_delete(false).unwrap();
        assert_eq!(card.state(), CardState::Idle);
    }

    #[test]
    fn test_out_of_order_transitions_are_rejected() {
        let mut card = ProductCard::new("4");
        let err = card.confirm_delete().unwrap_err();
        assert_eq!(err.from, CardState::Idle);
        assert_eq!(err.to_string(), "Cannot confirm delete while card is Idle");

        card.request_delete().unwrap();
        card.confirm_delete().unwrap();
        assert!(card.request_delete().is_err());
        assert!(card.cancel_delete().is_err());
        assert_eq!(card.state(), CardState::Deleting);
    }
}
