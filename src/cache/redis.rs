use redis::{AsyncCommands, Client, RedisError};
use tracing::info;
use uuid::Uuid;

// Redis cache key prefixes
pub const PRODUCT_KEY_PREFIX: &str = "product:id:";
pub const CATALOG_KEY: &str = "catalog:all";
pub const REVENUE_KEY_PREFIX: &str = "revenue:vendor:";
const PRODUCT_CACHE_TTL_SECONDS: u64 = 3600; // 1 hour
const CATALOG_CACHE_TTL_SECONDS: u64 = 600; // 10 minutes
const REVENUE_CACHE_TTL_SECONDS: u64 = 300; // 5 minutes

#[derive(Debug, Clone)]
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    pub fn new(client: Client) -> Self {
        // Connection validation happens on first use
        Self { client }
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    // Cache a product by ID
    pub async fn cache_product(&self, id: i64, json_data: &str) -> Result<(), RedisError> {
        let key = format!("{}{}", PRODUCT_KEY_PREFIX, id);
        self.get_client()
            .get_multiplexed_async_connection()
            .await?
            .set_ex(key, json_data, PRODUCT_CACHE_TTL_SECONDS)
            .await
            .map(|_: ()| ())
    }

    // Get a product by ID from cache
    pub async fn get_product(&self, id: i64) -> Result<Option<String>, RedisError> {
        let mut connection = self.client.get_multiplexed_async_connection().await?;
        let key = format!("{}{}", PRODUCT_KEY_PREFIX, id);

        let result: Option<String> = connection.get(key).await?;

        if result.is_some() {
            info!("Cache hit for product ID: {}", id);
        } else {
            info!("Cache miss for product ID: {}", id);
        }

        Ok(result)
    }

    // Invalidate a cached product (and the catalog listing that contains it)
    pub async fn invalidate_product(&self, id: i64) -> Result<(), RedisError> {
        let mut connection = self.get_client().get_multiplexed_async_connection().await?;

        let key = format!("{}{}", PRODUCT_KEY_PREFIX, id);
        connection
            .del::<_, ()>(&[key, CATALOG_KEY.to_string()])
            .await?;
        info!("Invalidated cache for product ID: {}", id);
        Ok(())
    }

    // Cache the full catalog listing
    pub async fn cache_catalog(&self, json_data: &str) -> Result<(), RedisError> {
        self.get_client()
            .get_multiplexed_async_connection()
            .await?
            .set_ex(CATALOG_KEY, json_data, CATALOG_CACHE_TTL_SECONDS)
            .await
            .map(|_: ()| ())
    }

    // Get the catalog listing from cache
    pub async fn get_catalog(&self) -> Result<Option<String>, RedisError> {
        let mut connection = self.client.get_multiplexed_async_connection().await?;

        let result: Option<String> = connection.get(CATALOG_KEY).await?;

        if result.is_some() {
            info!("Cache hit for catalog listing");
        } else {
            info!("Cache miss for catalog listing");
        }

        Ok(result)
    }

    // Cache a vendor's monthly revenue summary; month is a "YYYY-MM" bucket
    pub async fn cache_vendor_revenue(
        &self,
        vendor_id: Uuid,
        month: &str,
        json_data: &str,
    ) -> Result<(), RedisError> {
        let key = format!("{}{}:{}", REVENUE_KEY_PREFIX, vendor_id, month);
        self.get_client()
            .get_multiplexed_async_connection()
            .await?
            .set_ex(key, json_data, REVENUE_CACHE_TTL_SECONDS)
            .await
            .map(|_: ()| ())
    }

    // Get a vendor's monthly revenue summary from cache
    pub async fn get_vendor_revenue(
        &self,
        vendor_id: Uuid,
        month: &str,
    ) -> Result<Option<String>, RedisError> {
        let mut connection = self.client.get_multiplexed_async_connection().await?;
        let key = format!("{}{}:{}", REVENUE_KEY_PREFIX, vendor_id, month);

        let result: Option<String> = connection.get(key).await?;

        if result.is_some() {
            info!("Cache hit for vendor revenue: {}", vendor_id);
        } else {
            info!("Cache miss for vendor revenue: {}", vendor_id);
        }

        Ok(result)
    }
}
