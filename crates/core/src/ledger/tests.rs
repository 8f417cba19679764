//! Property-based tests for the ledger plans.
//!
//! An in-memory book applies plans the way the store does (one signed
//! increment per adjustment, no-op on a missing bucket) and is checked
//! against the sum of live expenses after random operation sequences.

use std::collections::HashMap;

use hearth_shared::types::{BudgetYearId, FundId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::plan::{Adjustment, Contribution, plan_create, plan_delete, plan_update};

/// Fund budgets plus the live expenses that should explain them.
struct Book {
    spent: HashMap<(FundId, BudgetYearId), Decimal>,
    expenses: Vec<Option<Contribution>>,
}

impl Book {
    fn new(funds: &[FundId], years: &[BudgetYearId]) -> Self {
        let mut spent = HashMap::new();
        for fund in funds {
            for year in years {
                spent.insert((*fund, *year), Decimal::ZERO);
            }
        }
        Self {
            spent,
            expenses: Vec::new(),
        }
    }

    /// Returns the number of rows touched, like `UPDATE ... WHERE`.
    fn adjust(&mut self, adjustments: &[Adjustment]) -> usize {
        let mut touched = 0;
        for adj in adjustments {
            if let Some(spent) = self.spent.get_mut(&(adj.fund_id, adj.budget_year_id)) {
                *spent += adj.delta;
                touched += 1;
            }
        }
        touched
    }

    fn create(&mut self, c: Contribution) {
        self.adjust(&plan_create(&c));
        self.expenses.push(Some(c));
    }

    fn update(&mut self, idx: usize, new: Contribution) {
        if let Some(Some(old)) = self.expenses.get(idx).copied() {
            self.adjust(&plan_update(&old, &new));
            self.expenses[idx] = Some(new);
        }
    }

    fn delete(&mut self, idx: usize) {
        if let Some(Some(old)) = self.expenses.get(idx).copied() {
            self.adjust(&plan_delete(&old));
            self.expenses[idx] = None;
        }
    }

    fn live_sum(&self, bucket: (FundId, BudgetYearId)) -> Decimal {
        self.expenses
            .iter()
            .flatten()
            .filter(|c| c.bucket() == bucket)
            .map(|c| c.amount)
            .sum()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Create { fund: usize, year: usize, cents: i64 },
    Update { idx: usize, fund: usize, year: usize, cents: i64 },
    Delete { idx: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 0usize..2, 0i64..10_000_000)
            .prop_map(|(fund, year, cents)| Op::Create { fund, year, cents }),
        (0usize..20, 0usize..3, 0usize..2, 0i64..10_000_000)
            .prop_map(|(idx, fund, year, cents)| Op::Update { idx, fund, year, cents }),
        (0usize..20).prop_map(|idx| Op::Delete { idx }),
    ]
}

proptest! {
    /// After any create/update/delete sequence, each bucket's `spent` equals
    /// the sum of live expense amounts pointing at it.
    #[test]
    fn prop_spent_equals_live_sum(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let funds = [FundId::new(), FundId::new(), FundId::new()];
        let years = [BudgetYearId::new(), BudgetYearId::new()];
        let mut book = Book::new(&funds, &years);

        for op in ops {
            match op {
                Op::Create { fund, year, cents } => book.create(Contribution {
                    fund_id: funds[fund],
                    budget_year_id: years[year],
                    amount: Decimal::new(cents, 2),
                }),
                Op::Update { idx, fund, year, cents } => book.update(idx, Contribution {
                    fund_id: funds[fund],
                    budget_year_id: years[year],
                    amount: Decimal::new(cents, 2),
                }),
                Op::Delete { idx } => book.delete(idx),
            }
        }

        for fund in funds {
            for year in years {
                prop_assert_eq!(book.spent[&(fund, year)], book.live_sum((fund, year)));
            }
        }
    }

    /// Create followed by delete restores the prior value exactly.
    #[test]
    fn prop_create_delete_round_trip(start in 0i64..1_000_000, cents in 0i64..1_000_000) {
        let fund = FundId::new();
        let year = BudgetYearId::new();
        let mut book = Book::new(&[fund], &[year]);
        book.spent.insert((fund, year), Decimal::new(start, 2));

        book.create(Contribution { fund_id: fund, budget_year_id: year, amount: Decimal::new(cents, 2) });
        book.delete(0);

        prop_assert_eq!(book.spent[&(fund, year)], Decimal::new(start, 2));
    }

    /// Changing only the fund moves the amount without changing the total.
    #[test]
    fn prop_move_preserves_total(cents in 0i64..1_000_000) {
        let (a, b) = (FundId::new(), FundId::new());
        let year = BudgetYearId::new();
        let mut book = Book::new(&[a, b], &[year]);
        let amount = Decimal::new(cents, 2);

        book.create(Contribution { fund_id: a, budget_year_id: year, amount });
        book.update(0, Contribution { fund_id: b, budget_year_id: year, amount });

        prop_assert_eq!(book.spent[&(a, year)], Decimal::ZERO);
        prop_assert_eq!(book.spent[&(b, year)], amount);
    }
}

#[test]
fn test_annual_fund_scenario() {
    // Annual fund budgeted 50000: create 2000, edit to 500, delete.
    let fund = FundId::new();
    let year = BudgetYearId::new();
    let mut book = Book::new(&[fund], &[year]);

    book.create(Contribution {
        fund_id: fund,
        budget_year_id: year,
        amount: dec!(2000),
    });
    assert_eq!(book.spent[&(fund, year)], dec!(2000));

    book.update(
        0,
        Contribution {
            fund_id: fund,
            budget_year_id: year,
            amount: dec!(500),
        },
    );
    assert_eq!(book.spent[&(fund, year)], dec!(500));

    book.delete(0);
    assert_eq!(book.spent[&(fund, year)], Decimal::ZERO);
}

#[test]
fn test_missing_bucket_is_a_noop() {
    let fund = FundId::new();
    let mut book = Book::new(&[fund], &[BudgetYearId::new()]);

    let touched = book.adjust(&plan_create(&Contribution {
        fund_id: fund,
        budget_year_id: BudgetYearId::new(),
        amount: dec!(10),
    }));

    assert_eq!(touched, 0);
    assert!(book.spent.values().all(Decimal::is_zero));
}
