//! Vendor applications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        applications::{
            errors::ApplicationsServiceError,
            models::{
                ApplicationStatus, ApplicationUuid, NewVendorApplication, VendorApplication,
            },
            repository::PgApplicationsRepository,
        },
        notifications::{models::NewNotification, repository::PgNotificationsRepository},
        profiles::repository::PgProfilesRepository,
        vendors::{
            models::{NewVendor, Vendor, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgApplicationsService {
    db: Db,
    repository: PgApplicationsRepository,
    vendors: PgVendorsRepository,
    profiles: PgProfilesRepository,
    notifications: PgNotificationsRepository,
}

impl PgApplicationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgApplicationsRepository::new(),
            vendors: PgVendorsRepository::new(),
            profiles: PgProfilesRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl ApplicationsService for PgApplicationsService {
    async fn submit_application(
        &self,
        caller: Principal,
        application: NewVendorApplication,
    ) -> Result<VendorApplication, ApplicationsServiceError> {
        let mut tx = self.db.begin().await?;

        // One lifetime attempt: any live application, whatever its status,
        // blocks another. The partial unique index backs this up under
        // concurrent submissions.
        if self
            .repository
            .get_own_application(&mut tx, caller.user)
            .await?
            .is_some()
        {
            return Err(ApplicationsServiceError::AlreadyApplied);
        }

        let created = self
            .repository
            .create_application(&mut tx, caller.user, &application)
            .await?;

        tx.commit().await?;

        info!("profile {} submitted vendor application {}", caller.user, created.uuid);

        Ok(created)
    }

    async fn get_own_application(
        &self,
        caller: Principal,
    ) -> Result<Option<VendorApplication>, ApplicationsServiceError> {
        let mut tx = self.db.begin().await?;

        let application = self.repository.get_own_application(&mut tx, caller.user).await?;

        tx.commit().await?;

        Ok(application)
    }

    async fn list_applications(
        &self,
        caller: Principal,
    ) -> Result<Vec<VendorApplication>, ApplicationsServiceError> {
        if !caller.is_admin() {
            return Err(ApplicationsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let applications = self.repository.list_applications(&mut tx).await?;

        tx.commit().await?;

        Ok(applications)
    }

    async fn approve_application(
        &self,
        caller: Principal,
        application: ApplicationUuid,
    ) -> Result<Vendor, ApplicationsServiceError> {
        if !caller.is_admin() {
            return Err(ApplicationsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_application(&mut tx, application).await?;

        if current.status != ApplicationStatus::Pending {
            return Err(ApplicationsServiceError::AlreadyReviewed(current.status));
        }

        let reviewed = self
            .repository
            .review_application(
                &mut tx,
                application,
                ApplicationStatus::Approved,
                None,
                caller.user,
            )
            .await?;

        let vendor = self
            .vendors
            .create_vendor(
                &mut tx,
                &NewVendor {
                    uuid: VendorUuid::new(),
                    owner_uuid: reviewed.applicant_uuid,
                    name: reviewed.name.clone(),
                    description: reviewed.description.clone(),
                    location: reviewed.location.clone(),
                    image_url: reviewed.image_url.clone(),
                    vendor_type: reviewed.vendor_type,
                    custom_business_type: reviewed.custom_business_type.clone(),
                    tags: reviewed.tags.clone(),
                },
            )
            .await?;

        self.profiles
            .promote_to_vendor(&mut tx, reviewed.applicant_uuid)
            .await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification {
                    recipient_uuid: reviewed.applicant_uuid,
                    title: "Application approved".to_string(),
                    message: format!("Your vendor application for {} was approved.", vendor.name),
                    kind: "application".to_string(),
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            "application {} approved, vendor {} created for {}",
            reviewed.uuid, vendor.uuid, reviewed.applicant_uuid
        );

        Ok(vendor)
    }

    async fn reject_application(
        &self,
        caller: Principal,
        application: ApplicationUuid,
        reason: Option<String>,
    ) -> Result<VendorApplication, ApplicationsServiceError> {
        if !caller.is_admin() {
            return Err(ApplicationsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_application(&mut tx, application).await?;

        if current.status != ApplicationStatus::Pending {
            return Err(ApplicationsServiceError::AlreadyReviewed(current.status));
        }

        let reviewed = self
            .repository
            .review_application(
                &mut tx,
                application,
                ApplicationStatus::Rejected,
                reason.as_deref(),
                caller.user,
            )
            .await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification {
                    recipient_uuid: reviewed.applicant_uuid,
                    title: "Application rejected".to_string(),
                    message: reviewed
                        .rejection_reason
                        .clone()
                        .unwrap_or_else(|| "Your vendor application was rejected.".to_string()),
                    kind: "application".to_string(),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(reviewed)
    }
}

#[automock]
#[async_trait]
pub trait ApplicationsService: Send + Sync {
    /// Submit a vendor application for the calling profile. Each profile gets
    /// one application, regardless of its eventual outcome.
    async fn submit_application(
        &self,
        caller: Principal,
        application: NewVendorApplication,
    ) -> Result<VendorApplication, ApplicationsServiceError>;

    /// Retrieve the caller's own application, if any.
    async fn get_own_application(
        &self,
        caller: Principal,
    ) -> Result<Option<VendorApplication>, ApplicationsServiceError>;

    /// Retrieve all applications, newest first. Admin only.
    async fn list_applications(
        &self,
        caller: Principal,
    ) -> Result<Vec<VendorApplication>, ApplicationsServiceError>;

    /// Approve a pending application: creates the vendor owned by the
    /// applicant and promotes their role. Admin only.
    async fn approve_application(
        &self,
        caller: Principal,
        application: ApplicationUuid,
    ) -> Result<Vendor, ApplicationsServiceError>;

    /// Reject a pending application with an optional reason. Admin only.
    async fn reject_application(
        &self,
        caller: Principal,
        application: ApplicationUuid,
        reason: Option<String>,
    ) -> Result<VendorApplication, ApplicationsServiceError>;
}
