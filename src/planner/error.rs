use std::fmt;

/// Precondition violations reported by the route builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A bar with a special on the chosen day has no rating
    MissingRating { bar: String },
    /// A rating outside 1..=10
    RatingOutOfRange { bar: String, rating: u8 },
    /// Zero stops requested
    NoStops,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::MissingRating { bar } => {
                write!(f, "No rating given for '{}'. Rate every bar with a special that day (1-10).", bar)
            }
            RouteError::RatingOutOfRange { bar, rating } => {
                write!(f, "Rating {} for '{}' is out of range (must be 1-10)", rating, bar)
            }
            RouteError::NoStops => write!(f, "A route needs at least one stop"),
        }
    }
}

impl std::error::Error for RouteError {}
