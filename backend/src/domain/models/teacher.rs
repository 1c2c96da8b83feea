//! Minimal teacher record the booking engine needs: identity plus the
//! daily rate frozen onto new bookings. Profile data lives elsewhere.
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: Uuid,
    pub daily_rate: f64,
}

impl Teacher {
    pub fn new(daily_rate: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            daily_rate,
        }
    }
}
