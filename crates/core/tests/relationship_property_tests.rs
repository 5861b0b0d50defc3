//! Property-based integration tests for budget relationships.
//!
//! Random sequences of link/unlink calls are applied through the budget
//! service; afterwards every stored back-reference must agree with the
//! stored budget collections.

use std::sync::Arc;

use budgetary_core::documents::InMemoryDocumentStore;
use budgetary_core::repository::IncomeRepository;
use budgetary_core::{
    Budget, BudgetService, BudgetServiceTrait, Entity, EntityServiceTrait, Income, IncomeService,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;

const BUDGETS: usize = 3;
const INCOMES: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Op {
    Link(usize, usize),
    Unlink(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..BUDGETS, 0..INCOMES).prop_map(|(b, i)| Op::Link(b, i)),
        (0..BUDGETS, 0..INCOMES).prop_map(|(b, i)| Op::Unlink(b, i)),
    ]
}

struct World {
    budgets: BudgetService,
    incomes: IncomeService,
    budget_ids: Vec<String>,
    income_ids: Vec<String>,
}

async fn build_world() -> World {
    let store = Arc::new(InMemoryDocumentStore::new());
    let budgets = BudgetService::new(store.clone());
    let incomes = IncomeService::new(Arc::new(IncomeRepository::new(store)));

    let mut budget_ids = Vec::new();
    for n in 0..BUDGETS {
        let budget = budgets
            .create(Budget::new().with_title(format!("Budget {}", n)))
            .await
            .unwrap();
        budget_ids.push(budget.id().unwrap().to_string());
    }
    let mut income_ids = Vec::new();
    for _ in 0..INCOMES {
        let income = incomes
            .create(Income::new().with_amount(dec!(10)))
            .await
            .unwrap();
        income_ids.push(income.id().unwrap().to_string());
    }

    World {
        budgets,
        incomes,
        budget_ids,
        income_ids,
    }
}

proptest! {
    #[test]
    fn back_references_match_budget_collections(ops in prop::collection::vec(arb_op(), 0..25)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let world = build_world().await;
            for op in &ops {
                match *op {
                    Op::Link(b, i) => {
                        world
                            .budgets
                            .link_income(&world.budget_ids[b], &world.income_ids[i])
                            .await
                            .unwrap();
                    }
                    Op::Unlink(b, i) => {
                        world
                            .budgets
                            .unlink_income(&world.budget_ids[b], &world.income_ids[i])
                            .await
                            .unwrap();
                    }
                }
            }

            let budgets = world.budgets.list().unwrap();
            let incomes = world.incomes.list().unwrap();
            assert_eq!(budgets.len(), BUDGETS);
            assert_eq!(incomes.len(), INCOMES);

            let mut owners_total = 0;
            for income in &incomes {
                let owners: Vec<&Budget> =
                    budgets.iter().filter(|b| b.has_income(income)).collect();
                assert!(owners.len() <= 1, "income held by several budgets");
                match owners.first() {
                    Some(owner) => {
                        assert!(income.belongs_to(owner));
                        owners_total += 1;
                    }
                    None => assert!(income.budget.is_none()),
                }
            }
            let referenced: usize = budgets.iter().map(|b| b.incomes.len()).sum();
            assert_eq!(referenced, owners_total);
        });
    }
}
