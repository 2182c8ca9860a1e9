//! Address value object.

use serde::{Deserialize, Serialize};

use super::CustomerError;

/// A postal address. Immutable; replace it to change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, CustomerError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.street.trim().is_empty() {
            return Err(CustomerError::InvalidAddress { field: "street" });
        }
        if self.number == 0 {
            return Err(CustomerError::InvalidAddress { field: "number" });
        }
        if self.zip.trim().is_empty() {
            return Err(CustomerError::InvalidAddress { field: "zip" });
        }
        if self.city.trim().is_empty() {
            return Err(CustomerError::InvalidAddress { field: "city" });
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let address = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        assert_eq!(address.to_string(), "Street 1, 1, Zipcode 1 City 1");
    }

    #[test]
    fn test_address_rejects_empty_fields() {
        assert_eq!(
            Address::new("", 1, "Zipcode 1", "City 1"),
            Err(CustomerError::InvalidAddress { field: "street" })
        );
        assert_eq!(
            Address::new("Street 1", 0, "Zipcode 1", "City 1"),
            Err(CustomerError::InvalidAddress { field: "number" })
        );
        assert_eq!(
            Address::new("Street 1", 1, " ", "City 1"),
            Err(CustomerError::InvalidAddress { field: "zip" })
        );
        assert_eq!(
            Address::new("Street 1", 1, "Zipcode 1", ""),
            Err(CustomerError::InvalidAddress { field: "city" })
        );
    }

    #[test]
    fn test_address_equality_is_by_value() {
        let a = Address::new("Rua 1", 2, "ZipCode 3", "Cidade 4").unwrap();
        let b = Address::new("Rua 1", 2, "ZipCode 3", "Cidade 4").unwrap();
        assert_eq!(a, b);
    }
}
