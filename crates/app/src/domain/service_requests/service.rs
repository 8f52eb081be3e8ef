//! Service requests service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        notifications::{
            models::NewNotification,
            push::{self, PushGateway, PushMessage},
            repository::PgNotificationsRepository,
        },
        service_requests::{
            errors::ServiceRequestsServiceError,
            models::{NewServiceRequest, ServiceRequest, ServiceRequestUpdate, ServiceRequestUuid},
            repository::PgServiceRequestsRepository,
        },
        vendors::{models::VendorType, repository::PgVendorsRepository},
    },
};

#[derive(Clone)]
pub struct PgServiceRequestsService {
    db: Db,
    repository: PgServiceRequestsRepository,
    vendors: PgVendorsRepository,
    notifications: PgNotificationsRepository,
    push: Arc<dyn PushGateway>,
}

impl PgServiceRequestsService {
    #[must_use]
    pub fn new(db: Db, push: Arc<dyn PushGateway>) -> Self {
        Self {
            db,
            repository: PgServiceRequestsRepository::new(),
            vendors: PgVendorsRepository::new(),
            notifications: PgNotificationsRepository::new(),
            push,
        }
    }
}

#[async_trait]
impl ServiceRequestsService for PgServiceRequestsService {
    async fn create_service_request(
        &self,
        caller: Principal,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self
            .vendors
            .get_vendor(&mut tx, request.vendor)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ServiceRequestsServiceError::InvalidReference,
                error => error.into(),
            })?;

        if vendor.vendor_type != VendorType::Service {
            return Err(ServiceRequestsServiceError::NotAServiceVendor);
        }

        let created = self
            .repository
            .create_service_request(&mut tx, caller.user, &request)
            .await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification {
                    recipient_uuid: vendor.owner_uuid,
                    title: "New service request".to_string(),
                    message: format!("New request for {}.", created.service_name),
                    kind: "service_request".to_string(),
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            "created service request {} for vendor {}",
            created.uuid, vendor.uuid
        );

        push::dispatch(
            Arc::clone(&self.push),
            vendor.owner_uuid,
            PushMessage {
                title: "New service request".to_string(),
                body: format!("New request for {}.", created.service_name),
                url: Some(format!("/service-requests/{}", created.uuid)),
                tag: Some(format!("service-request-{}", created.uuid)),
                data: serde_json::json!({ "service_request_uuid": created.uuid.to_string() }),
            },
        );

        Ok(created)
    }

    async fn get_service_request(
        &self,
        caller: Principal,
        request: ServiceRequestUuid,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError> {
        let mut tx = self.db.begin().await?;

        let request = self.repository.get_service_request(&mut tx, request).await?;

        if request.customer_uuid != caller.user && !caller.is_admin() {
            let vendor = self.vendors.get_vendor(&mut tx, request.vendor_uuid).await?;

            if vendor.owner_uuid != caller.user {
                return Err(ServiceRequestsServiceError::Forbidden);
            }
        }

        tx.commit().await?;

        Ok(request)
    }

    async fn list_own_service_requests(
        &self,
        caller: Principal,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestsServiceError> {
        let mut tx = self.db.begin().await?;

        let requests = self
            .repository
            .list_customer_service_requests(&mut tx, caller.user)
            .await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn list_vendor_service_requests(
        &self,
        caller: Principal,
        vendor: crate::domain::vendors::models::VendorUuid,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.vendors.get_vendor(&mut tx, vendor).await?;

        if vendor.owner_uuid != caller.user && !caller.is_admin() {
            return Err(ServiceRequestsServiceError::Forbidden);
        }

        let requests = self
            .repository
            .list_vendor_service_requests(&mut tx, vendor.uuid)
            .await?;

        tx.commit().await?;

        Ok(requests)
    }

    async fn update_service_request(
        &self,
        caller: Principal,
        request: ServiceRequestUuid,
        update: ServiceRequestUpdate,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_service_request(&mut tx, request).await?;

        let vendor = self.vendors.get_vendor(&mut tx, current.vendor_uuid).await?;

        let is_customer = current.customer_uuid == caller.user;
        let is_vendor = vendor.owner_uuid == caller.user;

        if !is_customer && !is_vendor && !caller.is_admin() {
            return Err(ServiceRequestsServiceError::Forbidden);
        }

        // Only the vendor side may quote.
        if update.quoted_price.is_some() && !is_vendor && !caller.is_admin() {
            return Err(ServiceRequestsServiceError::QuoteNotAllowed);
        }

        if let Some(next) = update.status {
            if !current.status.can_transition_to(next) {
                return Err(ServiceRequestsServiceError::InvalidTransition {
                    from: current.status,
                    to: next,
                });
            }
        }

        let updated = self
            .repository
            .update_service_request(&mut tx, request, update.status, update.quoted_price)
            .await?;

        // Vendor-side changes surface to the customer; a customer acting on
        // their own request already knows.
        let notify_customer = !is_customer;

        if notify_customer {
            let message = match (update.status, update.quoted_price) {
                (Some(status), _) => status.customer_message().to_string(),
                (None, Some(price)) => {
                    format!("You received a quote of {price} for {}.", updated.service_name)
                }
                (None, None) => format!("Your request for {} was updated.", updated.service_name),
            };

            self.notifications
                .create_notification(
                    &mut tx,
                    &NewNotification {
                        recipient_uuid: updated.customer_uuid,
                        title: "Service request update".to_string(),
                        message: message.clone(),
                        kind: "service_request".to_string(),
                    },
                )
                .await?;

            tx.commit().await?;

            push::dispatch(
                Arc::clone(&self.push),
                updated.customer_uuid,
                PushMessage {
                    title: "Service request update".to_string(),
                    body: message,
                    url: Some(format!("/service-requests/{}", updated.uuid)),
                    tag: Some(format!("service-request-{}", updated.uuid)),
                    data: serde_json::json!({ "service_request_uuid": updated.uuid.to_string() }),
                },
            );
        } else {
            tx.commit().await?;
        }

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ServiceRequestsService: Send + Sync {
    /// Submit a request to a service vendor.
    async fn create_service_request(
        &self,
        caller: Principal,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError>;

    /// Retrieve one request. Visible to its customer, the vendor's owner, and
    /// admins.
    async fn get_service_request(
        &self,
        caller: Principal,
        request: ServiceRequestUuid,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError>;

    /// Retrieve the caller's own requests, newest first.
    async fn list_own_service_requests(
        &self,
        caller: Principal,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestsServiceError>;

    /// Retrieve a vendor's incoming requests. Owner or admin only.
    async fn list_vendor_service_requests(
        &self,
        caller: Principal,
        vendor: crate::domain::vendors::models::VendorUuid,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestsServiceError>;

    /// Advance the request lifecycle or attach a quote. The customer and the
    /// vendor may both update; only vendor-side updates notify the customer.
    async fn update_service_request(
        &self,
        caller: Principal,
        request: ServiceRequestUuid,
        update: ServiceRequestUpdate,
    ) -> Result<ServiceRequest, ServiceRequestsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            notifications::NotificationsService, service_requests::status::ServiceRequestStatus,
        },
        test::TestContext,
    };

    use super::*;

    fn request_for(vendor: crate::domain::vendors::models::VendorUuid) -> NewServiceRequest {
        NewServiceRequest {
            uuid: ServiceRequestUuid::new(),
            vendor,
            service_name: "Bike repair".to_string(),
            description: "Rear brake is rubbing.".to_string(),
            attachments: vec!["https://cdn.example/photo.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn customer_submits_request_to_service_vendor() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        assert_eq!(request.status, ServiceRequestStatus::Pending);
        assert_eq!(request.customer_uuid, customer);
        assert_eq!(request.quoted_price, None);
        assert_eq!(request.attachments.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn product_vendor_does_not_take_requests() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_vendor(owner).await?;

        let result = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await;

        assert!(
            matches!(result, Err(ServiceRequestsServiceError::NotAServiceVendor)),
            "expected NotAServiceVendor, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn vendor_advances_request_and_quotes() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let updated = ctx
            .service_requests
            .update_service_request(
                ctx.member_principal(owner),
                request.uuid,
                ServiceRequestUpdate {
                    status: Some(ServiceRequestStatus::Accepted),
                    quoted_price: Some(45_00),
                },
            )
            .await?;

        assert_eq!(updated.status, ServiceRequestStatus::Accepted);
        assert_eq!(updated.quoted_price, Some(45_00));

        Ok(())
    }

    #[tokio::test]
    async fn customer_cannot_quote() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let result = ctx
            .service_requests
            .update_service_request(
                ctx.member_principal(customer),
                request.uuid,
                ServiceRequestUpdate {
                    status: None,
                    quoted_price: Some(1_00),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceRequestsServiceError::QuoteNotAllowed)),
            "expected QuoteNotAllowed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customer_can_cancel_pending_request() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let cancelled = ctx
            .service_requests
            .update_service_request(
                ctx.member_principal(customer),
                request.uuid,
                ServiceRequestUpdate {
                    status: Some(ServiceRequestStatus::Cancelled),
                    quoted_price: None,
                },
            )
            .await?;

        assert_eq!(cancelled.status, ServiceRequestStatus::Cancelled);

        Ok(())
    }

    #[tokio::test]
    async fn skipping_a_status_is_an_invalid_transition() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let result = ctx
            .service_requests
            .update_service_request(
                ctx.member_principal(owner),
                request.uuid,
                ServiceRequestUpdate {
                    status: Some(ServiceRequestStatus::Completed),
                    quoted_price: None,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ServiceRequestsServiceError::InvalidTransition {
                    from: ServiceRequestStatus::Pending,
                    to: ServiceRequestStatus::Completed,
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn vendor_update_notifies_customer_but_own_update_does_not() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let before = ctx.notifications.list_notifications(customer).await?.len();

        ctx.service_requests
            .update_service_request(
                ctx.member_principal(owner),
                request.uuid,
                ServiceRequestUpdate {
                    status: Some(ServiceRequestStatus::Accepted),
                    quoted_price: None,
                },
            )
            .await?;

        let after_vendor = ctx.notifications.list_notifications(customer).await?.len();
        assert_eq!(after_vendor, before + 1);

        // Submitting the request notified the vendor, not the customer.
        assert_eq!(before, 0);

        Ok(())
    }

    #[tokio::test]
    async fn strangers_cannot_read_or_update() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx.create_user().await?;
        let customer = ctx.create_user().await?;
        let stranger = ctx.create_user().await?;
        let vendor = ctx.create_service_vendor(owner).await?;

        let request = ctx
            .service_requests
            .create_service_request(ctx.member_principal(customer), request_for(vendor.uuid))
            .await?;

        let read = ctx
            .service_requests
            .get_service_request(ctx.member_principal(stranger), request.uuid)
            .await;

        assert!(
            matches!(read, Err(ServiceRequestsServiceError::Forbidden)),
            "expected Forbidden, got {read:?}"
        );

        let update = ctx
            .service_requests
            .update_service_request(
                ctx.member_principal(stranger),
                request.uuid,
                ServiceRequestUpdate {
                    status: Some(ServiceRequestStatus::Accepted),
                    quoted_price: None,
                },
            )
            .await;

        assert!(
            matches!(update, Err(ServiceRequestsServiceError::Forbidden)),
            "expected Forbidden, got {update:?}"
        );

        Ok(())
    }
}
