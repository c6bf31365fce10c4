//! Budget and cost math for plan items.
//!
//! Line cost: owned items contribute zero; otherwise price x quantity,
//! with a missing price treated as zero. The budget boundary at exact
//! equality counts as "remaining", not "over budget".

use serde::Serialize;

use fete_db::models::EventItem;

/// Cost contribution of a single item.
pub fn line_cost(item: &EventItem) -> f64 {
    if item.is_owned {
        0.0
    } else {
        item.estimated_price.unwrap_or(0.0) * f64::from(item.quantity)
    }
}

/// Total estimated cost across all items.
pub fn total_cost(items: &[EventItem]) -> f64 {
    items.iter().map(line_cost).sum()
}

/// Budget position for an event, as rendered on the plan view.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub budget: f64,
    pub total_cost: f64,
    /// budget - total_cost; negative when over budget.
    pub remaining: f64,
    pub over_budget: bool,
}

/// Compute the budget summary for an event's items.
pub fn budget_summary(budget: f64, items: &[EventItem]) -> BudgetSummary {
    let total = total_cost(items);
    let remaining = budget - total;
    BudgetSummary {
        budget,
        total_cost: total,
        remaining,
        over_budget: remaining < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use fete_db::models::ItemCategory;

    use super::*;

    fn item(quantity: i32, price: Option<f64>, is_owned: bool) -> EventItem {
        EventItem {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            name: "item".to_string(),
            description: None,
            category: ItemCategory::Decor,
            quantity,
            estimated_price: price,
            is_owned,
            is_veg: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owned_items_cost_nothing() {
        assert_eq!(line_cost(&item(3, Some(9.99), true)), 0.0);
    }

    #[test]
    fn missing_price_counts_as_zero() {
        assert_eq!(line_cost(&item(3, None, false)), 0.0);
    }

    #[test]
    fn summary_sums_unowned_lines() {
        // budget=500, (qty=2, price=10, not owned) + (qty=1, price=5, owned)
        let items = vec![item(2, Some(10.0), false), item(1, Some(5.0), true)];
        let summary = budget_summary(500.0, &items);
        assert_eq!(summary.total_cost, 20.0);
        assert_eq!(summary.remaining, 480.0);
        assert!(!summary.over_budget);
    }

    #[test]
    fn toggling_owned_removes_contribution_only() {
        let mut it = item(2, Some(10.0), false);
        assert_eq!(line_cost(&it), 20.0);
        it.is_owned = true;
        assert_eq!(line_cost(&it), 0.0);
        assert_eq!(it.quantity, 2);
        assert_eq!(it.estimated_price, Some(10.0));
    }

    #[test]
    fn equality_favors_remaining() {
        let items = vec![item(1, Some(100.0), false)];
        let summary = budget_summary(100.0, &items);
        assert_eq!(summary.remaining, 0.0);
        assert!(!summary.over_budget);
    }

    #[test]
    fn over_budget_flips() {
        let items = vec![item(1, Some(100.01), false)];
        let summary = budget_summary(100.0, &items);
        assert!(summary.over_budget);
        assert!(summary.remaining < 0.0);
    }
}
