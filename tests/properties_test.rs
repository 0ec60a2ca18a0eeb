//! Property tests for money arithmetic and order totals.

use bigdecimal::BigDecimal;
use order_payment::{DomainError, Money, Order};
use proptest::prelude::*;
use uuid::Uuid;

fn cents(c: u64) -> BigDecimal {
    BigDecimal::new(c.into(), 2)
}

fn money(c: u64, currency: &str) -> Money {
    Money::new(cents(c), currency).expect("non-negative")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn add_is_commutative(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let (x, y) = (money(a, "USD"), money(b, "USD"));
        prop_assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
    }

    #[test]
    fn add_is_associative(a in 0u64..10_000_000, b in 0u64..10_000_000, c in 0u64..10_000_000) {
        let (x, y, z) = (money(a, "USD"), money(b, "USD"), money(c, "USD"));
        let left = x.add(&y).unwrap().add(&z).unwrap();
        let right = x.add(&y.add(&z).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn add_across_currencies_fails(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let result = money(a, "USD").add(&money(b, "EUR"));
        let is_mismatch = matches!(result, Err(DomainError::CurrencyMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn total_is_sum_of_lines_in_any_order(
        lines in prop::collection::vec((1u64..1_000_000, 1i32..100), 1..12)
    ) {
        let products: Vec<(Uuid, u64, i32)> = lines
            .iter()
            .map(|&(price, qty)| (Uuid::new_v4(), price, qty))
            .collect();

        let expected_cents: u64 = products
            .iter()
            .map(|&(_, price, qty)| price * qty as u64)
            .sum();
        let expected = money(expected_cents, "USD");

        let mut forward = Order::new(Uuid::new_v4());
        for &(id, price, qty) in &products {
            forward.add_line(id, "item", money(price, "USD"), qty).unwrap();
        }
        let mut backward = Order::new(Uuid::new_v4());
        for &(id, price, qty) in products.iter().rev() {
            backward.add_line(id, "item", money(price, "USD"), qty).unwrap();
        }

        prop_assert_eq!(forward.total().unwrap(), expected.clone());
        prop_assert_eq!(backward.total().unwrap(), expected);
    }

    #[test]
    fn merging_a_product_keeps_line_count(first in 1i32..1000, extra in 1i32..1000) {
        let mut order = Order::new(Uuid::new_v4());
        let id = Uuid::new_v4();
        order.add_line(id, "item", money(199, "USD"), first).unwrap();
        order.add_line(id, "item", money(199, "USD"), extra).unwrap();

        prop_assert_eq!(order.line_count(), 1);
        prop_assert_eq!(order.lines()[0].quantity(), first + extra);
    }

    #[test]
    fn paid_order_rejects_mutations(qty in 1i32..100, new_qty in -5i32..100) {
        let mut order = Order::new(Uuid::new_v4());
        let id = Uuid::new_v4();
        order.add_line(id, "item", money(250, "USD"), qty).unwrap();
        order.pay().unwrap();
        let revision = order.revision();

        prop_assert!(order.update_quantity(id, new_qty).is_err());
        prop_assert!(order.add_line(id, "item", money(250, "USD"), qty).is_err());
        prop_assert!(order.remove_line(id).is_err());
        prop_assert_eq!(order.pay(), Err(DomainError::OrderAlreadyPaid));
        prop_assert_eq!(order.revision(), revision);
    }
}
