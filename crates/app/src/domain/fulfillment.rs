//! Fulfillment method resolution and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMethod {
    Pickup,
    Delivery,
}

impl FulfillmentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }

    /// Parse a stored fulfillment method string.
    ///
    /// # Errors
    ///
    /// Returns the unrecognised value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            other => Err(other.to_string()),
        }
    }
}

/// A validated fulfillment choice for a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    pub method: FulfillmentMethod,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FulfillmentError {
    #[error("vendor does not offer delivery")]
    DeliveryNotOffered,

    #[error("vendor does not offer pickup")]
    PickupNotOffered,

    #[error("delivery orders require a delivery address")]
    DeliveryAddressRequired,

    #[error("vendor must offer pickup or delivery")]
    NoMethodOffered,
}

/// Resolve and validate the fulfillment choice for an order against the
/// target vendor's offerings.
///
/// An omitted method defaults to pickup when the vendor offers it, otherwise
/// delivery. The delivery address is kept only for delivery orders and must be
/// non-empty for them.
///
/// # Errors
///
/// Returns a [`FulfillmentError`] when the requested method is not offered by
/// the vendor or a delivery order lacks an address.
pub fn resolve(
    requested: Option<FulfillmentMethod>,
    offers_pickup: bool,
    offers_delivery: bool,
    delivery_address: Option<&str>,
) -> Result<Fulfillment, FulfillmentError> {
    let method = requested.unwrap_or(if offers_pickup {
        FulfillmentMethod::Pickup
    } else {
        FulfillmentMethod::Delivery
    });

    match method {
        FulfillmentMethod::Pickup => {
            if !offers_pickup {
                return Err(FulfillmentError::PickupNotOffered);
            }

            Ok(Fulfillment {
                method,
                delivery_address: None,
            })
        }
        FulfillmentMethod::Delivery => {
            if !offers_delivery {
                return Err(FulfillmentError::DeliveryNotOffered);
            }

            let address = delivery_address.map(str::trim).filter(|a| !a.is_empty());

            let Some(address) = address else {
                return Err(FulfillmentError::DeliveryAddressRequired);
            };

            Ok(Fulfillment {
                method,
                delivery_address: Some(address.to_string()),
            })
        }
    }
}

/// Validate a vendor's fulfillment flags: at least one must stay enabled.
///
/// # Errors
///
/// Returns [`FulfillmentError::NoMethodOffered`] when both flags are false.
pub fn validate_offer_flags(
    offers_pickup: bool,
    offers_delivery: bool,
) -> Result<(), FulfillmentError> {
    if offers_pickup || offers_delivery {
        Ok(())
    } else {
        Err(FulfillmentError::NoMethodOffered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_method_defaults_to_pickup_when_offered() {
        let fulfillment = resolve(None, true, true, None).unwrap();

        assert_eq!(fulfillment.method, FulfillmentMethod::Pickup);
        assert_eq!(fulfillment.delivery_address, None);
    }

    #[test]
    fn omitted_method_defaults_to_delivery_for_delivery_only_vendor() {
        let fulfillment = resolve(None, false, true, Some("Dorm 4, Room 12")).unwrap();

        assert_eq!(fulfillment.method, FulfillmentMethod::Delivery);
        assert_eq!(
            fulfillment.delivery_address.as_deref(),
            Some("Dorm 4, Room 12")
        );
    }

    #[test]
    fn delivery_not_offered_is_rejected() {
        let result = resolve(
            Some(FulfillmentMethod::Delivery),
            true,
            false,
            Some("Dorm 4"),
        );

        assert_eq!(result, Err(FulfillmentError::DeliveryNotOffered));
    }

    #[test]
    fn pickup_not_offered_is_rejected() {
        let result = resolve(Some(FulfillmentMethod::Pickup), false, true, None);

        assert_eq!(result, Err(FulfillmentError::PickupNotOffered));
    }

    #[test]
    fn delivery_without_address_is_rejected() {
        let result = resolve(Some(FulfillmentMethod::Delivery), true, true, None);

        assert_eq!(result, Err(FulfillmentError::DeliveryAddressRequired));
    }

    #[test]
    fn delivery_with_blank_address_is_rejected() {
        let result = resolve(Some(FulfillmentMethod::Delivery), true, true, Some("   "));

        assert_eq!(result, Err(FulfillmentError::DeliveryAddressRequired));
    }

    #[test]
    fn pickup_discards_any_supplied_address() {
        let fulfillment = resolve(Some(FulfillmentMethod::Pickup), true, true, Some("Dorm 4"))
            .unwrap();

        assert_eq!(fulfillment.delivery_address, None);
    }

    #[test]
    fn both_flags_false_is_rejected() {
        assert_eq!(
            validate_offer_flags(false, false),
            Err(FulfillmentError::NoMethodOffered)
        );
        assert_eq!(validate_offer_flags(true, false), Ok(()));
        assert_eq!(validate_offer_flags(false, true), Ok(()));
    }
}
