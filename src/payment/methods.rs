// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use super::{PaymentInfo, PaymentMethod};
use crate::PipelineError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCardPayment {
    card_number: String,
    cardholder: String,
}

impl CreditCardPayment {
    const MIN_NUMBER_LEN: usize = 16;

    pub fn new(card_number: impl Into<String>, cardholder: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            cardholder: cardholder.into(),
        }
    }

    /// Last four characters of the card number.
    fn last_four(&self) -> &str {
        let start = self
            .card_number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(i, _)| i);
        &self.card_number[start..]
    }
}

impl Default for CreditCardPayment {
    fn default() -> Self {
        Self::new("****-****-****-4532", "Card Holder")
    }
}

impl PaymentMethod for CreditCardPayment {
    fn name(&self) -> String {
        "Credit card".to_string()
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.card_number.trim().chars().count() < Self::MIN_NUMBER_LEN {
            return Err(PipelineError::validation(format!(
                "invalid card number '{}'",
                self.card_number
            )));
        }
        if self.cardholder.trim().is_empty() {
            return Err(PipelineError::validation("cardholder is required"));
        }
        Ok(())
    }

    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError> {
        self.authorize(amount)?;
        tracing::info!(
            %amount,
            cardholder = %self.cardholder,
            "paid with credit card ending in {}",
            self.last_four()
        );
        Ok(())
    }

    fn info(&self) -> PaymentInfo {
        PaymentInfo::new(self.name())
            .with("card", format!("**** {}", self.last_four()))
            .with("holder", self.cardholder.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPalPayment {
    email: String,
}

impl PayPalPayment {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl Default for PayPalPayment {
    fn default() -> Self {
        Self::new("customer@example.com")
    }
}

impl PaymentMethod for PayPalPayment {
    fn name(&self) -> String {
        "PayPal".to_string()
    }

    fn validate(&self) -> Result<(), PipelineError> {
        match self.email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(PipelineError::validation(format!(
                "invalid PayPal account '{}'",
                self.email
            ))),
        }
    }

    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError> {
        self.authorize(amount)?;
        tracing::info!(%amount, account = %self.email, "paid with PayPal");
        Ok(())
    }

    fn info(&self) -> PaymentInfo {
        PaymentInfo::new(self.name()).with("account", self.email.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransferPayment {
    account_number: String,
    bank_name: String,
    limit: Decimal,
}

impl BankTransferPayment {
    pub const DEFAULT_LIMIT: Decimal = dec!(10000);

    pub fn new(account_number: impl Into<String>, bank_name: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            bank_name: bank_name.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for BankTransferPayment {
    fn default() -> Self {
        Self::new("****-****-5678", "Banco Latinoamericano")
    }
}

impl PaymentMethod for BankTransferPayment {
    fn name(&self) -> String {
        "Bank transfer".to_string()
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.account_number.trim().is_empty() {
            return Err(PipelineError::validation("account number is required"));
        }
        if self.bank_name.trim().is_empty() {
            return Err(PipelineError::validation("bank name is required"));
        }
        Ok(())
    }

    fn limit(&self) -> Option<Decimal> {
        Some(self.limit)
    }

    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError> {
        self.authorize(amount)?;
        tracing::info!(
            %amount,
            bank = %self.bank_name,
            account = %self.account_number,
            "paid by bank transfer"
        );
        Ok(())
    }

    fn info(&self) -> PaymentInfo {
        PaymentInfo::new(self.name())
            .with("bank", self.bank_name.clone())
            .with("account", self.account_number.clone())
            .with("limit", self.limit.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoPayment {
    wallet_address: String,
    crypto_type: String,
    limit: Decimal,
    confirmed: bool,
}

impl CryptoPayment {
    pub const DEFAULT_LIMIT: Decimal = dec!(50000);
    const MIN_WALLET_LEN: usize = 10;
    const CONFIRMATIONS: u8 = 3;

    pub fn new(wallet_address: impl Into<String>, crypto_type: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            crypto_type: crypto_type.into(),
            limit: Self::DEFAULT_LIMIT,
            confirmed: false,
        }
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.limit = limit;
        self
    }

    /// Whether the last payment reached the required confirmations.
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    fn confirm_on_chain(&mut self) -> bool {
        tracing::debug!(wallet = %self.wallet_address, "waiting for block confirmations");
        self.confirmed = true;
        self.confirmed
    }
}

impl Default for CryptoPayment {
    fn default() -> Self {
        Self::new("0x1A2B3C4D5E6F...", "Bitcoin")
    }
}

impl PaymentMethod for CryptoPayment {
    fn name(&self) -> String {
        format!("Crypto ({})", self.crypto_type)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.wallet_address.chars().count() < Self::MIN_WALLET_LEN {
            return Err(PipelineError::validation(format!(
                "invalid wallet address '{}'",
                self.wallet_address
            )));
        }
        if self.crypto_type.trim().is_empty() {
            return Err(PipelineError::validation("crypto type is required"));
        }
        Ok(())
    }

    fn limit(&self) -> Option<Decimal> {
        Some(self.limit)
    }

    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError> {
        self.authorize(amount)?;
        if !self.confirm_on_chain() {
            return Err(PipelineError::validation("transaction not confirmed on chain"));
        }
        tracing::info!(
            %amount,
            currency = %self.crypto_type,
            wallet = %self.wallet_address,
            confirmations = Self::CONFIRMATIONS,
            "paid with crypto"
        );
        Ok(())
    }

    fn info(&self) -> PaymentInfo {
        let status = if self.confirmed { "Confirmed" } else { "Pending" };
        PaymentInfo::new(self.name())
            .with("wallet", self.wallet_address.clone())
            .with("status", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_card_requires_full_number() {
        let mut card = CreditCardPayment::new("123", "User");
        assert!(matches!(card.validate(), Err(PipelineError::Validation(_))));
        assert!(card.pay(dec!(100)).is_err());

        let mut card = CreditCardPayment::default();
        assert!(card.pay(dec!(230.00)).is_ok());
    }

    #[test]
    fn credit_card_requires_holder() {
        let card = CreditCardPayment::new("4111-1111-1111-1111", "  ");
        assert_eq!(
            card.validate(),
            Err(PipelineError::Validation("cardholder is required".into()))
        );
    }

    #[test]
    fn credit_card_info_masks_number() {
        let info = CreditCardPayment::new("4111-1111-1111-4532", "Juan").info();
        assert_eq!(info.method, "Credit card");
        assert_eq!(info.detail("card"), Some("**** 4532"));
        assert_eq!(info.detail("holder"), Some("Juan"));
    }

    #[test]
    fn paypal_requires_email() {
        assert!(PayPalPayment::new("client@gmail.com").validate().is_ok());
        assert!(PayPalPayment::new("client").validate().is_err());
        assert!(PayPalPayment::new("@gmail.com").validate().is_err());
    }

    #[test]
    fn bank_transfer_enforces_ceiling() {
        let mut bank = BankTransferPayment::default();
        assert!(bank.pay(dec!(10000)).is_ok());

        let result = bank.pay(dec!(15000.00));
        assert_eq!(
            result,
            Err(PipelineError::LimitExceeded {
                method: "Bank transfer".into(),
                limit: dec!(10000),
                amount: dec!(15000.00),
            })
        );
    }

    #[test]
    fn bank_transfer_custom_limit() {
        let mut bank = BankTransferPayment::default().with_limit(dec!(500));
        assert!(bank.pay(dec!(501)).is_err());
        assert_eq!(bank.info().detail("limit"), Some("500"));
    }

    #[test]
    fn crypto_confirms_on_success() {
        let mut crypto = CryptoPayment::new("0x1A2B3C4D5E6F7G8H", "Bitcoin");
        assert_eq!(crypto.info().detail("status"), Some("Pending"));

        crypto.pay(dec!(500.00)).unwrap();

        assert!(crypto.confirmed());
        assert_eq!(crypto.info().detail("status"), Some("Confirmed"));
        assert_eq!(crypto.name(), "Crypto (Bitcoin)");
    }

    #[test]
    fn crypto_rejects_short_wallet_and_over_limit() {
        let mut short = CryptoPayment::new("0x123", "Bitcoin");
        assert!(matches!(short.pay(dec!(1)), Err(PipelineError::Validation(_))));
        assert!(!short.confirmed());

        let mut crypto = CryptoPayment::default();
        assert!(matches!(
            crypto.pay(dec!(50000.01)),
            Err(PipelineError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn non_positive_amounts_rejected_everywhere() {
        let mut methods: Vec<Box<dyn PaymentMethod>> = vec![
            Box::new(CreditCardPayment::default()),
            Box::new(PayPalPayment::default()),
            Box::new(BankTransferPayment::default()),
            Box::new(CryptoPayment::default()),
        ];
        for method in methods.iter_mut() {
            assert!(method.pay(Decimal::ZERO).is_err(), "{}", method.name());
            assert!(method.pay(dec!(-50.00)).is_err(), "{}", method.name());
        }
    }
}
