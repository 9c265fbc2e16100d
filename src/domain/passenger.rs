//! Passenger (client) profiles.

use serde::{Deserialize, Serialize};

use super::id::PassengerId;

/// A person profile reusable across rides.
///
/// Rides copy the passenger name when they are created, so renaming or
/// deleting a passenger never rewrites existing rides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub phone: String,
    pub profession: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub school_office_info: Option<String>,
    /// Recurring client tracked in the attendance grid.
    pub is_regular: bool,
}

impl Passenger {
    /// Create a one-time passenger with no route defaults.
    pub fn new(id: PassengerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            profession: None,
            pickup_location: None,
            drop_location: None,
            school_office_info: None,
            is_regular: false,
        }
    }

    /// Create a recurring passenger.
    pub fn regular(id: PassengerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            is_regular: true,
            ..Self::new(id, name, phone)
        }
    }
}

/// Look up a passenger by identity.
#[must_use]
pub fn find<'a>(passengers: &'a [Passenger], id: &PassengerId) -> Option<&'a Passenger> {
    passengers.iter().find(|p| &p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_constructor_sets_flag() {
        let p = Passenger::regular(PassengerId::new("p-1"), "Sara", "0501");
        assert!(p.is_regular);
        assert!(!Passenger::new(PassengerId::new("p-2"), "Ali", "0502").is_regular);
    }

    #[test]
    fn find_by_identity() {
        let list = vec![
            Passenger::new(PassengerId::new("a"), "A", ""),
            Passenger::new(PassengerId::new("b"), "B", ""),
        ];
        assert_eq!(find(&list, &PassengerId::new("b")).map(|p| p.name.as_str()), Some("B"));
        assert!(find(&list, &PassengerId::new("zz")).is_none());
    }
}
