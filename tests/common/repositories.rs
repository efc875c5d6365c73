use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use postgres_transaction_manager::{Executor, Repository, RepositoryResult};

use super::entities::{Customer, Order};

/// Customer repository running its queries through a session executor.
pub struct CustomerRepository {
    executor: Executor,
}

impl CustomerRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Repository for CustomerRepository {
    type Entity = Customer;
    type Id = Uuid;

    fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query(
            "SELECT id, name, email, created_at, updated_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(|r| Customer {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            created_at: r.get::<Option<DateTime<Utc>>, _>("created_at"),
            updated_at: r.get::<Option<DateTime<Utc>>, _>("updated_at"),
        }))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let rows = sqlx::query(
            "SELECT id, name, email, created_at, updated_at FROM customers ORDER BY name",
        )
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Customer {
                id: r.get("id"),
                name: r.get("name"),
                email: r.get("email"),
                created_at: r.get::<Option<DateTime<Utc>>, _>("created_at"),
                updated_at: r.get::<Option<DateTime<Utc>>, _>("updated_at"),
            })
            .collect())
    }

    async fn insert(&self, customer: &Customer) -> RepositoryResult<()> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        sqlx::query(
            "INSERT INTO customers (id, name, email, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<()> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        sqlx::query(
            "UPDATE customers SET name = $2, email = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn delete(&self, customer: &Customer) -> RepositoryResult<u64> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer.id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM customers")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }
}

/// Order repository running its queries through a session executor.
pub struct OrderRepository {
    executor: Executor,
}

impl OrderRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Repository for OrderRepository {
    type Entity = Order;
    type Id = Uuid;

    fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Order>> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query(
            "SELECT id, customer_id, product_name, amount FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(|r| Order {
            id: r.get("id"),
            customer_id: r.get("customer_id"),
            product_name: r.get("product_name"),
            amount: r.get("amount"),
        }))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let rows = sqlx::query(
            "SELECT id, customer_id, product_name, amount FROM orders ORDER BY product_name",
        )
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Order {
                id: r.get("id"),
                customer_id: r.get("customer_id"),
                product_name: r.get("product_name"),
                amount: r.get("amount"),
            })
            .collect())
    }

    async fn insert(&self, order: &Order) -> RepositoryResult<()> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        sqlx::query(
            "INSERT INTO orders (id, customer_id, product_name, amount) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(&order.product_name)
        .bind(order.amount)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn update(&self, order: &Order) -> RepositoryResult<()> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        sqlx::query("UPDATE orders SET product_name = $2, amount = $3 WHERE id = $1")
            .bind(order.id)
            .bind(&order.product_name)
            .bind(order.amount)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn delete(&self, order: &Order) -> RepositoryResult<u64> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order.id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let mut guard = self.executor.lock().await;
        let tx = guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM orders")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }
}
