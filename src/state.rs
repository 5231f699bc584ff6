//! Application state controller. Owns the trip/employee/settings
//! collections and is the only place they are mutated; every named
//! operation persists through the store after the change so the view
//! layer never touches persistence.

use std::sync::RwLock;

use tracing::warn;

use crate::model::employee::Employee;
use crate::model::settings::AppSettings;
use crate::model::trip::{Trip, TripCategory, TripStatus};
use crate::model::user::User;
use crate::store::{self, Store};

pub struct AppState {
    trips: RwLock<Vec<Trip>>,
    employees: RwLock<Vec<Employee>>,
    settings: RwLock<AppSettings>,
    store: Store,
}

#[derive(Debug, Default, serde::Deserialize, utoipa::ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl AppState {
    /// Loads persisted collections, seeding the demo data on first boot.
    /// A malformed stored value is logged and replaced with the seed or
    /// defaults; there is no migration path.
    pub fn load(store: Store) -> Self {
        let trips = match store.load::<Vec<Trip>>(store::KEY_TRIPS) {
            Ok(Some(trips)) => trips,
            Ok(None) => seed_trips(),
            Err(e) => {
                warn!(error = %e, "Stored trips unreadable, reseeding");
                seed_trips()
            }
        };
        let employees = match store.load::<Vec<Employee>>(store::KEY_EMPLOYEES) {
            Ok(Some(employees)) => employees,
            Ok(None) => seed_employees(),
            Err(e) => {
                warn!(error = %e, "Stored employees unreadable, reseeding");
                seed_employees()
            }
        };
        let settings = match store.load::<AppSettings>(store::KEY_SETTINGS) {
            Ok(Some(settings)) => settings,
            Ok(None) => AppSettings::default(),
            Err(e) => {
                warn!(error = %e, "Stored settings unreadable, using defaults");
                AppSettings::default()
            }
        };

        Self {
            trips: RwLock::new(trips),
            employees: RwLock::new(employees),
            settings: RwLock::new(settings),
            store,
        }
    }

    pub fn trips(&self) -> Vec<Trip> {
        self.trips.read().unwrap().clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.employees.read().unwrap().clone()
    }

    pub fn settings(&self) -> AppSettings {
        self.settings.read().unwrap().clone()
    }

    /// Newest trip first, matching the history view.
    pub fn add_trip(&self, trip: Trip) -> anyhow::Result<()> {
        let mut trips = self.trips.write().unwrap();
        trips.insert(0, trip);
        self.store.save(store::KEY_TRIPS, &*trips)
    }

    /// Transitions a Pending trip to Approved or Rejected. Returns false
    /// when the trip is missing or already processed.
    pub fn set_trip_status(&self, id: &str, status: TripStatus) -> anyhow::Result<bool> {
        let mut trips = self.trips.write().unwrap();
        let Some(trip) = trips
            .iter_mut()
            .find(|t| t.id == id && t.status == TripStatus::Pending)
        else {
            return Ok(false);
        };
        trip.status = status;
        self.store.save(store::KEY_TRIPS, &*trips)?;
        Ok(true)
    }

    pub fn add_employee(&self, employee: Employee) -> anyhow::Result<()> {
        let mut employees = self.employees.write().unwrap();
        employees.push(employee);
        self.store.save(store::KEY_EMPLOYEES, &*employees)
    }

    pub fn update_employee(&self, id: &str, update: UpdateEmployee) -> anyhow::Result<bool> {
        let mut employees = self.employees.write().unwrap();
        let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(department) = update.department {
            employee.department = department;
        }
        if let Some(email) = update.email {
            employee.email = email;
        }
        if let Some(avatar) = update.avatar {
            employee.avatar = Some(avatar);
        }
        self.store.save(store::KEY_EMPLOYEES, &*employees)?;
        Ok(true)
    }

    /// Deletion does not cascade: trips referencing the employee keep
    /// their stale id and aggregate under the "Other" bucket.
    pub fn delete_employee(&self, id: &str) -> anyhow::Result<bool> {
        let mut employees = self.employees.write().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        if employees.len() == before {
            return Ok(false);
        }
        self.store.save(store::KEY_EMPLOYEES, &*employees)?;
        Ok(true)
    }

    pub fn update_settings(&self, settings: AppSettings) -> anyhow::Result<()> {
        let mut current = self.settings.write().unwrap();
        *current = settings;
        self.store.save(store::KEY_SETTINGS, &*current)
    }

    pub fn set_session_user(&self, user: &User) -> anyhow::Result<()> {
        self.store.save(store::KEY_USER, user)
    }

    pub fn clear_session_user(&self) -> anyhow::Result<()> {
        self.store.clear(store::KEY_USER)
    }
}

fn seed_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "1".to_string(),
            name: "Sarah Chen".to_string(),
            department: "Sales".to_string(),
            email: "sarah.c@company.com".to_string(),
            avatar: Some("https://picsum.photos/seed/sarah/100/100".to_string()),
        },
        Employee {
            id: "2".to_string(),
            name: "James Wilson".to_string(),
            department: "Engineering".to_string(),
            email: "james.w@company.com".to_string(),
            avatar: Some("https://picsum.photos/seed/james/100/100".to_string()),
        },
        Employee {
            id: "3".to_string(),
            name: "Elena Rodriguez".to_string(),
            department: "Marketing".to_string(),
            email: "elena.r@company.com".to_string(),
            avatar: Some("https://picsum.photos/seed/elena/100/100".to_string()),
        },
    ]
}

fn seed_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "101".to_string(),
            employee_id: "1".to_string(),
            date: "2023-10-24".to_string(),
            time: "09:00".to_string(),
            pickup: "Downtown Office".to_string(),
            dropoff: "Client HQ - Tech Park".to_string(),
            amount: 32.50,
            currency: "USD".to_string(),
            status: TripStatus::Approved,
            purpose: "Q4 Strategy Meeting".to_string(),
            category: TripCategory::ClientMeeting,
        },
        Trip {
            id: "102".to_string(),
            employee_id: "2".to_string(),
            date: "2023-10-24".to_string(),
            time: "18:30".to_string(),
            pickup: "Office".to_string(),
            dropoff: "Central Station".to_string(),
            amount: 15.00,
            currency: "USD".to_string(),
            status: TripStatus::Pending,
            purpose: "Evening Commute".to_string(),
            category: TripCategory::OfficeCommute,
        },
        Trip {
            id: "103".to_string(),
            employee_id: "3".to_string(),
            date: "2023-10-25".to_string(),
            time: "11:15".to_string(),
            pickup: "Airport Terminal 2".to_string(),
            dropoff: "Main Office".to_string(),
            amount: 45.00,
            currency: "USD".to_string(),
            status: TripStatus::Approved,
            purpose: "Return from Conference".to_string(),
            category: TripCategory::Event,
        },
    ]
}
