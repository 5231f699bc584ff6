//! Derived dashboard statistics. Pure recomputation over the current
//! trip/employee collections; nothing here is stored.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::trip::{Trip, TripStatus};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepartmentSpend {
    #[schema(example = "Sales")]
    pub name: String,
    #[schema(example = 32.50)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayCount {
    #[schema(example = "2023-10-24")]
    pub date: String,
    #[schema(example = 2)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Sum over all trips regardless of the per-trip currency field.
    /// Amounts are NOT converted; mixed-currency data produces a number
    /// that is only meaningful for single-currency deployments.
    #[schema(example = 92.50)]
    pub total_spend: f64,
    #[schema(example = 3)]
    pub total_trips: u64,
    #[schema(example = 1)]
    pub pending_count: u64,
    pub spend_by_department: Vec<DepartmentSpend>,
    /// Sorted ascending by calendar date, one entry per distinct date.
    pub trips_by_day: Vec<DayCount>,
}

/// Fallback department label for trips whose employee reference no longer
/// resolves (employee deletion does not cascade).
const ORPHAN_DEPARTMENT: &str = "Other";

pub fn compute(trips: &[Trip], employees: &[Employee]) -> DashboardStats {
    let total_spend = trips.iter().map(|t| t.amount).sum();
    let pending_count = trips
        .iter()
        .filter(|t| t.status == TripStatus::Pending)
        .count() as u64;

    let department_of: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.id.as_str(), e.department.as_str()))
        .collect();

    let mut dept_spend: HashMap<&str, f64> = HashMap::new();
    for trip in trips {
        let dept = department_of
            .get(trip.employee_id.as_str())
            .copied()
            .unwrap_or(ORPHAN_DEPARTMENT);
        *dept_spend.entry(dept).or_insert(0.0) += trip.amount;
    }
    let mut spend_by_department: Vec<DepartmentSpend> = dept_spend
        .into_iter()
        .map(|(name, value)| DepartmentSpend {
            name: name.to_string(),
            value,
        })
        .collect();
    // Deterministic order so recomputation on unchanged input is
    // bit-identical.
    spend_by_department.sort_by(|a, b| a.name.cmp(&b.name));

    let mut day_counts: HashMap<&str, u64> = HashMap::new();
    for trip in trips {
        *day_counts.entry(trip.date.as_str()).or_insert(0) += 1;
    }
    let mut trips_by_day: Vec<DayCount> = day_counts
        .into_iter()
        .map(|(date, count)| DayCount {
            date: date.to_string(),
            count,
        })
        .collect();
    // Calendar order; unparseable date strings sort first, lexically
    // among themselves.
    trips_by_day.sort_by(|a, b| {
        let ka = NaiveDate::parse_from_str(&a.date, "%Y-%m-%d").ok();
        let kb = NaiveDate::parse_from_str(&b.date, "%Y-%m-%d").ok();
        ka.cmp(&kb).then_with(|| a.date.cmp(&b.date))
    });

    DashboardStats {
        total_spend,
        total_trips: trips.len() as u64,
        pending_count,
        spend_by_department,
        trips_by_day,
    }
}

/// The `n` largest trips by amount, descending. Feeds the "Recent Large
/// Trips" dashboard panel.
pub fn top_trips(trips: &[Trip], n: usize) -> Vec<Trip> {
    let mut sorted: Vec<Trip> = trips.to_vec();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trip::TripCategory;

    fn trip(id: &str, employee_id: &str, date: &str, amount: f64, status: TripStatus) -> Trip {
        Trip {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            date: date.to_string(),
            time: "09:00".to_string(),
            pickup: "Office".to_string(),
            dropoff: "Airport".to_string(),
            amount,
            currency: "USD".to_string(),
            status,
            purpose: "Travel".to_string(),
            category: TripCategory::Other,
        }
    }

    fn employee(id: &str, department: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            department: department.to_string(),
            email: format!("emp{id}@company.com"),
            avatar: None,
        }
    }

    #[test]
    fn empty_input_yields_zero_aggregates() {
        let stats = compute(&[], &[]);
        assert_eq!(stats.total_spend, 0.0);
        assert_eq!(stats.total_trips, 0);
        assert_eq!(stats.pending_count, 0);
        assert!(stats.spend_by_department.is_empty());
        assert!(stats.trips_by_day.is_empty());
    }

    #[test]
    fn dashboard_scenario_from_seed_data() {
        let trips = vec![
            trip("101", "1", "2023-10-24", 32.50, TripStatus::Approved),
            trip("102", "2", "2023-10-24", 15.00, TripStatus::Pending),
            trip("103", "3", "2023-10-25", 45.00, TripStatus::Approved),
        ];
        let employees = vec![
            employee("1", "Sales"),
            employee("2", "Engineering"),
            employee("3", "Marketing"),
        ];

        let stats = compute(&trips, &employees);
        assert_eq!(stats.total_spend, 92.50);
        assert_eq!(stats.total_trips, 3);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(
            stats.trips_by_day,
            vec![
                DayCount { date: "2023-10-24".to_string(), count: 2 },
                DayCount { date: "2023-10-25".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn total_spend_is_order_independent() {
        let mut trips = vec![
            trip("1", "1", "2023-10-24", 10.25, TripStatus::Approved),
            trip("2", "1", "2023-10-25", 20.50, TripStatus::Approved),
            trip("3", "1", "2023-10-26", 30.00, TripStatus::Pending),
        ];
        let forward = compute(&trips, &[]);
        trips.reverse();
        let backward = compute(&trips, &[]);
        assert_eq!(forward.total_spend, backward.total_spend);
        assert_eq!(forward.total_spend, 60.75);
    }

    #[test]
    fn pending_count_matches_status_exactly() {
        let trips = vec![
            trip("1", "1", "2023-10-24", 1.0, TripStatus::Pending),
            trip("2", "1", "2023-10-24", 1.0, TripStatus::Approved),
            trip("3", "1", "2023-10-24", 1.0, TripStatus::Rejected),
            trip("4", "1", "2023-10-24", 1.0, TripStatus::Pending),
        ];
        assert_eq!(compute(&trips, &[]).pending_count, 2);
    }

    #[test]
    fn department_spend_buckets_dangling_references_under_other() {
        let trips = vec![
            trip("1", "1", "2023-10-24", 30.0, TripStatus::Approved),
            trip("2", "1", "2023-10-24", 12.0, TripStatus::Approved),
            trip("3", "missing", "2023-10-24", 8.0, TripStatus::Approved),
        ];
        let employees = vec![employee("1", "Sales")];

        let stats = compute(&trips, &employees);
        assert_eq!(
            stats.spend_by_department,
            vec![
                DepartmentSpend { name: "Other".to_string(), value: 8.0 },
                DepartmentSpend { name: "Sales".to_string(), value: 42.0 },
            ]
        );
    }

    #[test]
    fn trips_by_day_sorts_by_calendar_date_not_string_order() {
        // Mixed zero-padding makes lexical and calendar order disagree.
        let trips = vec![
            trip("1", "1", "2023-11-02", 1.0, TripStatus::Approved),
            trip("2", "1", "2023-9-30", 1.0, TripStatus::Approved),
        ];
        let stats = compute(&trips, &[]);
        assert_eq!(stats.trips_by_day[0].date, "2023-9-30");
        assert_eq!(stats.trips_by_day[1].date, "2023-11-02");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let trips = vec![
            trip("1", "1", "2023-10-24", 32.50, TripStatus::Approved),
            trip("2", "missing", "2023-10-25", 15.00, TripStatus::Pending),
        ];
        let employees = vec![employee("1", "Sales")];

        let first = compute(&trips, &employees);
        let second = compute(&trips, &employees);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn top_trips_returns_largest_amounts_descending() {
        let trips = vec![
            trip("1", "1", "2023-10-24", 15.0, TripStatus::Approved),
            trip("2", "1", "2023-10-24", 45.0, TripStatus::Approved),
            trip("3", "1", "2023-10-24", 32.5, TripStatus::Approved),
        ];
        let top = top_trips(&trips, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "2");
        assert_eq!(top[1].id, "3");
    }
}
