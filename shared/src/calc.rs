//! Pure calculations behind the dashboards and the order preview.
//!
//! None of these values are authoritative: the server computes the real
//! fertilizer quantity, the client only previews it.

use crate::{Order, OrderStatus};

/// `round(land_area * rate, 2)`. Non-positive or non-finite inputs preview as 0.
pub fn fertilizer_preview(land_area: f64, rate: f64) -> f64 {
    if !(land_area.is_finite() && rate.is_finite()) || land_area <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    (land_area * rate * 100.0).round() / 100.0
}

/// Share of `value` in `total` as a whole percentage. An empty total is 0%.
pub fn percentage(value: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round() as u64
}

/// Summary shown on the farmer dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FarmerStats {
    pub pending: usize,
    pub approved: usize,
    pub declined: usize,
    pub total_land: f64,
    pub avg_land_area: f64,
}

impl FarmerStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        let total_land: f64 = orders
            .iter()
            .map(|o| o.land_area)
            .filter(|a| a.is_finite())
            .sum();
        let avg_land_area = if orders.is_empty() {
            0.0
        } else {
            total_land / orders.len() as f64
        };

        Self {
            pending: count(OrderStatus::Pending),
            approved: count(OrderStatus::Approved),
            declined: count(OrderStatus::Declined),
            total_land,
            avg_land_area,
        }
    }

    pub fn total_orders(&self) -> usize {
        self.pending + self.approved + self.declined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64, land_area: f64, status: OrderStatus) -> Order {
        Order {
            id,
            farmer: None,
            land_area,
            fertilizer_qty: land_area * 5.0,
            status,
            created_at: None,
        }
    }

    #[test]
    fn preview_rounds_to_two_decimals() {
        assert_eq!(fertilizer_preview(10.0, 5.0), 50.0);
        assert_eq!(fertilizer_preview(1.234, 3.0), 3.7);
        assert_eq!(fertilizer_preview(2.5, 1.333), 3.33);
    }

    #[test]
    fn preview_is_zero_when_an_input_is_zero() {
        for rate in [0.0, 0.5, 5.0, 120.0] {
            assert_eq!(fertilizer_preview(0.0, rate), 0.0);
        }
        for land in [0.0, 1.0, 42.75] {
            assert_eq!(fertilizer_preview(land, 0.0), 0.0);
        }
        assert_eq!(fertilizer_preview(-3.0, 5.0), 0.0);
        assert_eq!(fertilizer_preview(f64::NAN, 5.0), 0.0);
    }

    #[test]
    fn preview_is_pure() {
        let first = fertilizer_preview(3.3, 7.1);
        assert_eq!(first, fertilizer_preview(3.3, 7.1));
    }

    #[test]
    fn percentage_handles_empty_total() {
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn farmer_stats_counts_and_averages() {
        let orders = vec![
            order(1, 10.0, OrderStatus::Pending),
            order(2, 4.0, OrderStatus::Approved),
            order(3, 1.0, OrderStatus::Declined),
            order(4, 5.0, OrderStatus::Pending),
        ];
        let stats = FarmerStats::from_orders(&orders);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.declined, 1);
        assert_eq!(stats.total_land, 20.0);
        assert_eq!(stats.avg_land_area, 5.0);
        assert_eq!(stats.total_orders(), 4);
    }

    #[test]
    fn farmer_stats_of_nothing() {
        assert_eq!(FarmerStats::from_orders(&[]), FarmerStats::default());
    }
}
