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

//! Property-based tests for the payment and permission pipelines.
//!
//! These tests verify invariants that should hold for any sequence of
//! payment requests or role configurations.

use proptest::prelude::*;
use rust_decimal::Decimal;
use solid_demo_rs::payment::{
    BankTransferPayment, CreditCardPayment, CryptoPayment, PayPalPayment, PaymentMethod,
    PaymentProcessor, TransactionStatus,
};
use solid_demo_rs::permission::{Capability, Role, User, create_user, delete_user, purchase, show_catalog};
use solid_demo_rs::{PipelineError, TransactionId};

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate an amount between -1000.00 and 100000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-100_000i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a non-positive amount.
fn arb_non_positive() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_method() -> impl Strategy<Value = u8> {
    0u8..4
}

fn method(index: u8) -> Box<dyn PaymentMethod> {
    match index {
        0 => Box::new(CreditCardPayment::default()),
        1 => Box::new(PayPalPayment::default()),
        2 => Box::new(BankTransferPayment::default()),
        _ => Box::new(CryptoPayment::default()),
    }
}

fn arb_capabilities() -> impl Strategy<Value = Vec<Capability>> {
    prop::collection::vec(
        prop_oneof![
            Just(Capability::ViewCatalog),
            Just(Capability::CreateUser),
            Just(Capability::DeleteUser),
            Just(Capability::Purchase),
        ],
        0..4,
    )
}

// =============================================================================
// Payment Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every call appends exactly one record, whatever the outcome.
    #[test]
    fn history_length_equals_calls(
        requests in prop::collection::vec((arb_method(), arb_amount()), 0..30),
    ) {
        let mut processor = PaymentProcessor::new(method(0));

        for (i, (index, amount)) in requests.iter().enumerate() {
            processor.change_method(method(*index));
            let ok = processor.process_payment(*amount, format!("request {i}"));

            let last = processor.last().unwrap();
            prop_assert_eq!(last.id, TransactionId(i as u32 + 1));
            prop_assert_eq!(ok, last.status == TransactionStatus::Succeeded);
        }

        prop_assert_eq!(processor.history().len(), requests.len());
        prop_assert_eq!(processor.succeeded() + processor.failed(), requests.len());
    }

    /// Non-positive amounts never succeed on any method.
    #[test]
    fn non_positive_amounts_always_fail(
        index in arb_method(),
        amount in arb_non_positive(),
    ) {
        let mut processor = PaymentProcessor::new(method(index));

        prop_assert!(!processor.process_payment(amount, "bad amount"));

        let record = processor.last().unwrap();
        prop_assert_eq!(record.status, TransactionStatus::Failed);
        prop_assert!(matches!(record.reason, Some(PipelineError::Validation(_))));
    }

    /// A limited method succeeds exactly when the amount is within its ceiling.
    #[test]
    fn ceilings_are_inclusive(
        index in 2u8..4,
        amount in arb_amount(),
    ) {
        let mut processor = PaymentProcessor::new(method(index));
        let limit = processor.method().limit().unwrap();

        let ok = processor.process_payment(amount, "limited");

        prop_assert_eq!(ok, amount > Decimal::ZERO && amount <= limit);
        if amount > limit {
            let is_limit_exceeded = matches!(
                processor.last().unwrap().reason,
                Some(PipelineError::LimitExceeded { .. })
            );
            prop_assert!(is_limit_exceeded);
        }
    }

    /// The paid total is the sum of succeeded records only.
    #[test]
    fn total_paid_sums_successes(
        amounts in prop::collection::vec(arb_amount(), 0..20),
    ) {
        let mut processor = PaymentProcessor::new(BankTransferPayment::default());
        for amount in &amounts {
            processor.process_payment(*amount, "transfer");
        }

        let expected: Decimal = amounts
            .iter()
            .filter(|a| **a > Decimal::ZERO && **a <= BankTransferPayment::DEFAULT_LIMIT)
            .sum();
        prop_assert_eq!(processor.total_paid(), expected);
    }

    /// Swapping the method never rewrites earlier records.
    #[test]
    fn swapping_preserves_history(
        first in arb_method(),
        second in arb_method(),
        amount in arb_amount(),
    ) {
        let mut processor = PaymentProcessor::new(method(first));
        processor.process_payment(amount, "before");
        let before = processor.history()[0].clone();

        processor.change_method(method(second));
        processor.process_payment(amount, "after");

        prop_assert_eq!(&processor.history()[0], &before);
        prop_assert_eq!(processor.method_name(), method(second).name());
    }
}

// =============================================================================
// Permission Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An operation succeeds exactly when the role holds its capability.
    #[test]
    fn gate_matches_capability_set(caps in arb_capabilities()) {
        let user = User::new("prop", Role::new("custom", caps.clone(), "catalog"));

        prop_assert_eq!(show_catalog(&user).is_ok(), caps.contains(&Capability::ViewCatalog));
        prop_assert_eq!(create_user(&user, "x").is_ok(), caps.contains(&Capability::CreateUser));
        prop_assert_eq!(delete_user(&user, "x").is_ok(), caps.contains(&Capability::DeleteUser));
        prop_assert_eq!(purchase(&user, "P-1", 1).is_ok(), caps.contains(&Capability::Purchase));
    }

    /// Denials always name the role.
    #[test]
    fn denial_names_role(name in "[a-z]{1,12}") {
        let user = User::new("prop", Role::new(name.clone(), Vec::new(), "nothing"));

        match purchase(&user, "P-1", 1) {
            Err(PipelineError::PermissionDenied { role, action }) => {
                prop_assert_eq!(role, name);
                prop_assert_eq!(action, "purchase");
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }
}
