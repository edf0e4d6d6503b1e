use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::redis::RedisCache;

use super::model::{CreateProductRequest, Product, ProductError, UpdateProductRequest};

#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
    redis_cache: Option<RedisCache>,
}

impl ProductService {
    pub fn new(pool: PgPool, redis_cache: Option<RedisCache>) -> Self {
        Self { pool, redis_cache }
    }

    /// Add a product to one of the vendor's shops.
    pub async fn create_product(
        &self,
        vendor_id: Uuid,
        data: CreateProductRequest,
    ) -> Result<Product, ProductError> {
        if data.name.trim().is_empty() {
            return Err(ProductError::ValidationError(
                "Product name is required".to_string(),
            ));
        }
        if data.price < 0.0 {
            return Err(ProductError::ValidationError(
                "Price must not be negative".to_string(),
            ));
        }

        // The shop must exist and belong to the vendor
        let shop_owner = sqlx::query_as::<_, (Uuid,)>(
            "SELECT vendor_id FROM global.shops WHERE id = $1",
        )
        .bind(data.shop_id)
        .fetch_optional(&self.pool)
        .await?;

        match shop_owner {
            None => return Err(ProductError::ShopNotFound),
            Some((owner,)) if owner != vendor_id => return Err(ProductError::Unauthorized),
            Some(_) => {}
        }

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO global.products (shop_id, vendor_id, name, description, price, stock) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, shop_id, vendor_id, name, description, price, stock, created_at, updated_at",
        )
        .bind(data.shop_id)
        .bind(vendor_id)
        .bind(data.name.trim())
        .bind(data.description.unwrap_or_default())
        .bind(data.price)
        .bind(data.stock.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Product {} created in shop {} by vendor {}",
            product.id, product.shop_id, vendor_id
        );

        self.invalidate_cache(product.id).await;
        Ok(product)
    }

    /// Get one product, trying the cache first.
    pub async fn get_product(&self, id: i64) -> Result<Product, ProductError> {
        if let Some(cache) = &self.redis_cache {
            match cache.get_product(id).await {
                Ok(Some(cached)) => {
                    if let Ok(product) = serde_json::from_str::<Product>(&cached) {
                        return Ok(product);
                    }
                    warn!("Cached product {} could not be deserialized", id);
                }
                Ok(None) => {}
                Err(e) => warn!("Cache read failed for product {}: {}", id, e),
            }
        }

        let product = sqlx::query_as::<_, Product>(
            "SELECT id, shop_id, vendor_id, name, description, price, stock, created_at, updated_at \
             FROM global.products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProductError::NotFound)?;

        if let Some(cache) = &self.redis_cache {
            if let Ok(json) = serde_json::to_string(&product) {
                if let Err(e) = cache.cache_product(id, &json).await {
                    warn!("Failed to cache product {}: {}", id, e);
                }
            }
        }

        Ok(product)
    }

    /// Public catalog listing, newest first, cached as a whole.
    pub async fn list_catalog(&self) -> Result<Vec<Product>, ProductError> {
        if let Some(cache) = &self.redis_cache {
            match cache.get_catalog().await {
                Ok(Some(cached)) => {
                    if let Ok(products) = serde_json::from_str::<Vec<Product>>(&cached) {
                        return Ok(products);
                    }
                    warn!("Cached catalog could not be deserialized");
                }
                Ok(None) => {}
                Err(e) => warn!("Cache read failed for catalog: {}", e),
            }
        }

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, shop_id, vendor_id, name, description, price, stock, created_at, updated_at \
             FROM global.products ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        if let Some(cache) = &self.redis_cache {
            if let Ok(json) = serde_json::to_string(&products) {
                if let Err(e) = cache.cache_catalog(&json).await {
                    warn!("Failed to cache catalog: {}", e);
                }
            }
        }

        Ok(products)
    }

    /// Update a product the vendor owns.
    pub async fn update_product(
        &self,
        vendor_id: Uuid,
        id: i64,
        data: UpdateProductRequest,
    ) -> Result<Product, ProductError> {
        let current = sqlx::query_as::<_, Product>(
            "SELECT id, shop_id, vendor_id, name, description, price, stock, created_at, updated_at \
             FROM global.products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProductError::NotFound)?;

        if current.vendor_id != vendor_id {
            return Err(ProductError::Unauthorized);
        }

        if let Some(price) = data.price {
            if price < 0.0 {
                return Err(ProductError::ValidationError(
                    "Price must not be negative".to_string(),
                ));
            }
        }

        let product = sqlx::query_as::<_, Product>(
            "UPDATE global.products SET \
             name = COALESCE($1, name), \
             description = COALESCE($2, description), \
             price = COALESCE($3, price), \
             stock = COALESCE($4, stock), \
             updated_at = NOW() \
             WHERE id = $5 \
             RETURNING id, shop_id, vendor_id, name, description, price, stock, created_at, updated_at",
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.price)
        .bind(data.stock)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        info!("Product {} updated by vendor {}", id, vendor_id);

        self.invalidate_cache(id).await;
        Ok(product)
    }

    async fn invalidate_cache(&self, id: i64) {
        if let Some(cache) = &self.redis_cache {
            if let Err(e) = cache.invalidate_product(id).await {
                warn!("Failed to invalidate product cache for {}: {}", id, e);
            }
        }
    }
}
