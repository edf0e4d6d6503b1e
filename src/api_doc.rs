use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme configuration for OpenAPI
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BizGrow Backend API",
        version = "0.1.0",
        description = "REST API for the BizGrow small-business growth assistant"
    ),
    paths(
        // Health check endpoints
        crate::routes::health::health_check,
        crate::routes::health::protected_health_check,
        // Authentication endpoints
        crate::auth::controller::login,
        crate::auth::controller::register,
        // Product catalog endpoints
        crate::product::controller::create_product,
        crate::product::controller::list_products,
        crate::product::controller::get_product,
        crate::product::controller::update_product,
        // Shop endpoints
        crate::shop::controller::create_shop,
        crate::shop::controller::list_shops,
        // Cart endpoints
        crate::cart::controller::get_cart,
        crate::cart::controller::add_item,
        crate::cart::controller::remove_item,
        // Order endpoints
        crate::order::controller::checkout,
        crate::order::controller::list_orders,
        // Weekly plan endpoints
        crate::plan::controller::create_plan,
        crate::plan::controller::list_plans,
        // Investment endpoints
        crate::investor::controller::create_investment,
        crate::investor::controller::list_investments,
        // Notification endpoints
        crate::notification::controller::list_notifications,
        crate::notification::controller::mark_read,
        crate::notification::controller::list_logs,
        // Messaging gateway stub
        crate::whatsapp::controller::send,
        // Growth pipeline triggers
        crate::growth::controller::run_scan,
        crate::growth::controller::run_revenue_check,
        // Revenue endpoints
        crate::revenue::controller::vendor_summary,
        // Admin endpoints
        crate::routes::admin::list_users
    ),
    components(
        schemas(
            // Auth schemas
            crate::auth::controller::RegisterRequest,
            crate::auth::controller::LoginRequest,
            crate::auth::controller::AuthResponse,
            crate::auth::controller::ErrorResponse,
            // Health schemas
            crate::routes::health::HealthResponse,
            // Product schemas
            crate::product::model::Product,
            crate::product::model::CreateProductRequest,
            crate::product::model::UpdateProductRequest,
            // Shop schemas
            crate::shop::model::Shop,
            crate::shop::model::CreateShopRequest,
            // Cart schemas
            crate::cart::model::CartItem,
            crate::cart::model::CartResponse,
            crate::cart::model::AddCartItemRequest,
            // Order schemas
            crate::order::model::Order,
            crate::order::model::OrderItem,
            // Plan schemas
            crate::plan::model::WeeklyPlan,
            crate::plan::model::CreatePlanRequest,
            // Investment schemas
            crate::investor::model::Investment,
            crate::investor::model::CreateInvestmentRequest,
            // Notification schemas
            crate::notification::model::Notification,
            crate::notification::model::NotificationLog,
            crate::notification::model::NotificationKind,
            crate::notification::model::NotificationErrorResponse,
            // WhatsApp schemas
            crate::whatsapp::model::SendRequest,
            crate::whatsapp::model::SendResponse,
            // Growth schemas
            crate::growth::model::ScanSummary,
            crate::growth::model::RevenueVendorResult,
            crate::growth::model::RevenueCheckSummary,
            // Revenue schemas
            crate::revenue::model::RevenueSummary,
            // Admin schemas
            crate::routes::admin::UserSummary,
            // External type schemas
            crate::schema_ext::DateTimeWrapper,
            crate::schema_ext::UuidWrapper,
            crate::schema_ext::JsonWrapper
        )
    ),
    tags(
        (name = "authentication", description = "Authentication endpoints"),
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product catalog endpoints"),
        (name = "shops", description = "Vendor shop endpoints"),
        (name = "cart", description = "Customer cart endpoints"),
        (name = "orders", description = "Checkout and order endpoints"),
        (name = "plans", description = "Weekly growth plan endpoints"),
        (name = "investments", description = "Investor endpoints"),
        (name = "notifications", description = "Vendor notification endpoints"),
        (name = "whatsapp", description = "Messaging gateway stub"),
        (name = "growth", description = "Growth pipeline trigger endpoints"),
        (name = "revenue", description = "Revenue aggregation endpoints"),
        (name = "admin", description = "Administration endpoints")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
