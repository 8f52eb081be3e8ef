//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use quadmart_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        applications::{
            MockApplicationsService,
            models::{ApplicationStatus, ApplicationUuid, VendorApplication},
        },
        fulfillment::FulfillmentMethod,
        notifications::{
            MockNotificationsService,
            models::{Notification, NotificationUuid},
        },
        orders::{
            MockOrdersService, OrderStatus,
            models::{Order, OrderUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        profiles::{
            MockProfilesService,
            models::{Profile, ProfileUuid, Role},
        },
        rewards::{
            MockRewardsService,
            models::{Redemption, RedemptionUuid, Reward, RewardUuid},
        },
        service_requests::{
            MockServiceRequestsService, ServiceRequestStatus,
            models::{ServiceRequest, ServiceRequestUuid},
        },
        vendors::{
            MockVendorsService,
            models::{Vendor, VendorType, VendorUuid},
        },
        wallet::MockWalletService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: ProfileUuid = ProfileUuid::from_uuid(Uuid::nil());

pub(crate) fn member_principal() -> Principal {
    Principal {
        user: TEST_USER_UUID,
        role: Role::Member,
    }
}

pub(crate) fn admin_principal() -> Principal {
    Principal {
        user: TEST_USER_UUID,
        role: Role::Admin,
    }
}

#[salvo::handler]
pub(crate) async fn inject_member(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(member_principal());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(admin_principal());
    ctrl.call_next(req, depot, res).await;
}

/// One mock per app service. Mockall panics on unexpected calls, so a default
/// instance doubles as a strict "never called" stand-in.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub profiles: MockProfilesService,
    pub vendors: MockVendorsService,
    pub products: MockProductsService,
    pub orders: MockOrdersService,
    pub service_requests: MockServiceRequestsService,
    pub applications: MockApplicationsService,
    pub rewards: MockRewardsService,
    pub wallet: MockWalletService,
    pub notifications: MockNotificationsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            profiles: Arc::new(self.profiles),
            vendors: Arc::new(self.vendors),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            service_requests: Arc::new(self.service_requests),
            applications: Arc::new(self.applications),
            rewards: Arc::new(self.rewards),
            wallet: Arc::new(self.wallet),
            notifications: Arc::new(self.notifications),
        }))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_profiles(profiles: MockProfilesService) -> Arc<State> {
    Mocks {
        profiles,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_vendors(vendors: MockVendorsService) -> Arc<State> {
    Mocks {
        vendors,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Mocks {
        products,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Mocks {
        orders,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_service_requests(
    service_requests: MockServiceRequestsService,
) -> Arc<State> {
    Mocks {
        service_requests,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_applications(applications: MockApplicationsService) -> Arc<State> {
    Mocks {
        applications,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_rewards(rewards: MockRewardsService) -> Arc<State> {
    Mocks {
        rewards,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_wallet(wallet: MockWalletService) -> Arc<State> {
    Mocks {
        wallet,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn state_with_notifications(notifications: MockNotificationsService) -> Arc<State> {
    Mocks {
        notifications,
        ..Mocks::default()
    }
    .into_state()
}

/// Wire a route behind an injected member principal.
pub(crate) fn member_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_member)
            .push(route),
    )
}

/// Wire a route behind an injected admin principal.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_profile() -> Profile {
    Profile {
        uuid: TEST_USER_UUID,
        role: Role::Member,
        wallet_balance: 0,
        loyalty_points: 0,
        total_orders: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_vendor(uuid: VendorUuid) -> Vendor {
    Vendor {
        uuid,
        owner_uuid: TEST_USER_UUID,
        name: "Quad Coffee".to_string(),
        description: "Espresso by the quad.".to_string(),
        location: "Student union".to_string(),
        image_url: None,
        vendor_type: VendorType::Product,
        custom_business_type: None,
        tags: vec![],
        is_open: true,
        is_featured: false,
        offers_pickup: true,
        offers_delivery: false,
        rating: 0.0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, vendor: VendorUuid) -> Product {
    Product {
        uuid,
        vendor_uuid: vendor,
        name: "Flat white".to_string(),
        price: 3_50,
        is_available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, vendor: VendorUuid) -> Order {
    Order {
        uuid,
        customer_uuid: TEST_USER_UUID,
        vendor_uuid: vendor,
        status: OrderStatus::Pending,
        total: 7_00,
        fulfillment_method: FulfillmentMethod::Pickup,
        delivery_address: None,
        items: vec![],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_service_request(
    uuid: ServiceRequestUuid,
    vendor: VendorUuid,
) -> ServiceRequest {
    ServiceRequest {
        uuid,
        customer_uuid: TEST_USER_UUID,
        vendor_uuid: vendor,
        service_name: "Laptop repair".to_string(),
        description: "Cracked hinge.".to_string(),
        attachments: vec![],
        status: ServiceRequestStatus::Pending,
        quoted_price: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_application(uuid: ApplicationUuid) -> VendorApplication {
    VendorApplication {
        uuid,
        applicant_uuid: TEST_USER_UUID,
        name: "Quad Coffee".to_string(),
        description: "Espresso by the quad.".to_string(),
        location: "Student union".to_string(),
        image_url: None,
        vendor_type: VendorType::Product,
        custom_business_type: None,
        tags: vec![],
        status: ApplicationStatus::Pending,
        rejection_reason: None,
        reviewed_at: None,
        reviewed_by: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_reward(uuid: RewardUuid) -> Reward {
    Reward {
        uuid,
        name: "Free coffee".to_string(),
        description: "One free drink.".to_string(),
        points_required: 100,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_redemption(reward: RewardUuid) -> Redemption {
    Redemption {
        uuid: RedemptionUuid::new(),
        reward_uuid: reward,
        profile_uuid: TEST_USER_UUID,
        points_spent: 100,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_notification(uuid: NotificationUuid) -> Notification {
    Notification {
        uuid,
        recipient_uuid: TEST_USER_UUID,
        title: "Order update".to_string(),
        message: "Your order has been accepted.".to_string(),
        kind: "order".to_string(),
        is_read: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
