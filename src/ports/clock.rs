use chrono::NaiveDateTime;

/// Port for the local time stamped into generated files.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}
