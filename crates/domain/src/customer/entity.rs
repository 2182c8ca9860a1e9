//! Customer entity.

use common::EntityId;
use event_dispatcher::Event;
use serde::{Deserialize, Serialize};

use super::{Address, CustomerCreatedData, CustomerError, CustomerEvent};

/// A customer of the shop.
///
/// State changes that other parts of the system care about return the
/// [`Event`] describing them, built from the customer's state after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: EntityId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Creates an inactive customer without an address.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Result<Self, CustomerError> {
        Self::restore(id, name, None, false, 0)
    }

    /// Rebuilds a customer from stored state.
    pub fn restore(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
    ) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.id.is_blank() {
            return Err(CustomerError::IdRequired);
        }
        if self.name.trim().is_empty() {
            return Err(CustomerError::NameRequired);
        }
        if self.active && self.address.is_none() {
            return Err(CustomerError::AddressRequired);
        }
        Ok(())
    }

    /// Returns the event announcing this customer's creation.
    pub fn created_event(&self) -> Event<CustomerEvent> {
        Event::new(CustomerEvent::Created(CustomerCreatedData {
            id: self.id.clone(),
            name: self.name.clone(),
        }))
    }
}

// Query methods
impl Customer {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }
}

// Command methods
impl Customer {
    /// Renames the customer.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerError::NameRequired);
        }
        self.name = name;
        Ok(())
    }

    /// Moves the customer to a new address.
    ///
    /// The returned event carries a snapshot of the customer after the move.
    pub fn change_address(&mut self, address: Address) -> Event<CustomerEvent> {
        self.address = Some(address);
        Event::new(CustomerEvent::ChangedAddress(self.clone()))
    }

    /// Activates the customer. Requires an address.
    pub fn activate(&mut self) -> Result<(), CustomerError> {
        if self.address.is_none() {
            return Err(CustomerError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds reward points earned on an order, saturating at `u64::MAX`.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap()
    }

    #[test]
    fn test_new_customer_defaults() {
        let customer = Customer::new("123", "Customer 1").unwrap();
        assert_eq!(customer.id().as_str(), "123");
        assert_eq!(customer.name(), "Customer 1");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn test_new_customer_requires_id_and_name() {
        assert_eq!(
            Customer::new("", "Customer 1"),
            Err(CustomerError::IdRequired)
        );
        assert_eq!(Customer::new("123", "  "), Err(CustomerError::NameRequired));
    }

    #[test]
    fn test_change_name() {
        let mut customer = Customer::new("123", "Customer 1").unwrap();
        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");
        assert_eq!(customer.change_name(""), Err(CustomerError::NameRequired));
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn test_activate_requires_address() {
        let mut customer = Customer::new("123", "Customer 1").unwrap();
        assert_eq!(customer.activate(), Err(CustomerError::AddressRequired));

        customer.change_address(address());
        customer.activate().unwrap();
        assert!(customer.is_active());

        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn test_restore_rejects_active_without_address() {
        assert_eq!(
            Customer::restore("123", "Customer 1", None, true, 0),
            Err(CustomerError::AddressRequired)
        );
    }

    #[test]
    fn test_add_reward_points_accumulates() {
        let mut customer = Customer::new("123", "Customer 1").unwrap();
        customer.add_reward_points(10);
        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), 20);
    }

    #[test]
    fn test_add_reward_points_saturates() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.add_reward_points(u64::MAX - 1);
        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), u64::MAX);
    }

    #[test]
    fn test_created_event_carries_id_and_name() {
        let customer = Customer::new("4321ABCD", "Customer 1").unwrap();
        let event = customer.created_event();

        assert_eq!(event.kind(), CustomerEvent::CREATED);
        match event.payload() {
            CustomerEvent::Created(data) => {
                assert_eq!(data.id.as_str(), "4321ABCD");
                assert_eq!(data.name, "Customer 1");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_change_address_event_reflects_new_state() {
        let mut customer = Customer::new("4321ABCD", "Customer 1").unwrap();
        let new_address = Address::new("Rua 1", 2, "ZipCode 3", "Cidade 4").unwrap();

        let event = customer.change_address(new_address.clone());

        assert_eq!(event.kind(), CustomerEvent::CHANGED_ADDRESS);
        assert_eq!(customer.address(), Some(&new_address));
        match event.payload() {
            CustomerEvent::ChangedAddress(snapshot) => assert_eq!(snapshot, &customer),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_event_snapshot_is_not_affected_by_later_changes() {
        let mut customer = Customer::new("4321ABCD", "Customer 1").unwrap();
        let event = customer.change_address(address());

        customer.change_name("Renamed").unwrap();

        match event.payload() {
            CustomerEvent::ChangedAddress(snapshot) => assert_eq!(snapshot.name(), "Customer 1"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
