use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub floor_number: Option<i64>,
    pub hours: Option<String>,
    pub marker_id: Option<i64>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Marker {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FacilityPhoto {
    pub id: i64,
    pub facility_id: i64,
    pub path: String,
    pub caption: Option<String>,
}

/// Insertable facility without id or timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFacility {
    pub name: &'static str,
    pub category: &'static str,
    pub department: &'static str,
    pub description: &'static str,
    pub hours: &'static str,
}

/// Fixture facilities inserted by `seed`.
pub const QUICK_FACILITIES: [NewFacility; 3] = [
    NewFacility {
        name: "Library",
        category: "Educational",
        department: "Academics",
        description: "A place where students can study and access academic resources.",
        hours: "8:00 AM - 5:00 PM",
    },
    NewFacility {
        name: "Gymnasium",
        category: "Sports",
        department: "Physical Education",
        description: "Indoor facility for sports events and student activities.",
        hours: "6:00 AM - 9:00 PM",
    },
    NewFacility {
        name: "Cafeteria",
        category: "Food & Beverage",
        department: "Student Services",
        description: "Serves meals and refreshments for students and staff.",
        hours: "7:00 AM - 7:00 PM",
    },
];
