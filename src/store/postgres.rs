use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};

use crate::model::{
    Category, CategoryUpdate, Company, CompanyUpdate, Id, NewCategory, NewCompany, NewProduct,
    Product, ProductUpdate,
};
use crate::store::traits::{CategoryStore, CompanyStore, LinkStore, ProductStore, Store};

const SELECT_COMPANY: &str = r#"
    SELECT c.id, c.name, c.city, c.state,
           COALESCE((SELECT array_agg(cc.category_id ORDER BY cc.category_id)
                     FROM company_categories cc
                     WHERE cc.company_id = c.id), '{}') AS categories
    FROM companies c
"#;

const SELECT_CATEGORY: &str = r#"
    SELECT cat.id, cat.name, cat.kind,
           COALESCE((SELECT array_agg(p.id ORDER BY p.id)
                     FROM products p
                     WHERE p.category_id = cat.id), '{}') AS products,
           COALESCE((SELECT array_agg(cc.company_id ORDER BY cc.company_id)
                     FROM company_categories cc
                     WHERE cc.category_id = cat.id), '{}') AS companies
    FROM categories cat
"#;

const SELECT_PRODUCT: &str =
    "SELECT id, name, price, mfg_date, expiry_date, category_id FROM products";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the catalog schema if it does not exist yet. The two foreign
    /// keys carry the cascade policy: dropping a company removes only its
    /// join rows, dropping a category removes its join rows and its products.
    pub async fn migrate(&self) -> Result<()> {
        let statements = [
            r#"CREATE TABLE IF NOT EXISTS companies (
                id    BIGSERIAL PRIMARY KEY,
                name  TEXT NOT NULL UNIQUE,
                city  TEXT NOT NULL,
                state TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS categories (
                id   BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                kind TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS products (
                id          BIGSERIAL PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                price       DOUBLE PRECISION NOT NULL,
                mfg_date    DATE NOT NULL,
                expiry_date DATE NOT NULL,
                category_id BIGINT REFERENCES categories(id) ON DELETE CASCADE
            )"#,
            r#"CREATE TABLE IF NOT EXISTS company_categories (
                company_id  BIGINT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
                category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                PRIMARY KEY (company_id, category_id)
            )"#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to run catalog migration")?;
        }

        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn company_from_row(row: &PgRow) -> Company {
    Company {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        categories: row.get("categories"),
    }
}

fn category_from_row(row: &PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        kind: row.get("kind"),
        products: row.get("products"),
        companies: row.get("companies"),
    }
}

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
        mfg_date: row.get("mfg_date"),
        expiry_date: row.get("expiry_date"),
        category_id: row.get("category_id"),
    }
}

#[async_trait::async_trait]
impl CompanyStore for PostgresStore {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        let rows = sqlx::query(&format!("{} ORDER BY c.id", SELECT_COMPANY))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list companies")?;

        Ok(rows.iter().map(company_from_row).collect())
    }

    async fn get_company(&self, id: Id) -> Result<Option<Company>> {
        let row = sqlx::query(&format!("{} WHERE c.id = $1", SELECT_COMPANY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch company")?;

        Ok(row.as_ref().map(company_from_row))
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let row = sqlx::query(&format!("{} WHERE c.name = $1", SELECT_COMPANY))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch company by name")?;

        Ok(row.as_ref().map(company_from_row))
    }

    async fn insert_company(&self, new: NewCompany) -> Result<Company> {
        let row = sqlx::query(
            "INSERT INTO companies (name, city, state) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(&new.state)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert company")?;

        Ok(Company {
            id: row.get("id"),
            name: new.name,
            city: new.city,
            state: new.state,
            categories: Vec::new(),
        })
    }

    async fn update_company(&self, id: Id, fields: &CompanyUpdate) -> Result<bool> {
        let result = sqlx::query("UPDATE companies SET name = $1, city = $2, state = $3 WHERE id = $4")
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update company")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_company(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete company")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl CategoryStore for PostgresStore {
    async fn get_category(&self, id: Id) -> Result<Option<Category>> {
        let row = sqlx::query(&format!("{} WHERE cat.id = $1", SELECT_CATEGORY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category")?;

        Ok(row.as_ref().map(category_from_row))
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query(&format!("{} WHERE cat.name = $1", SELECT_CATEGORY))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category by name")?;

        Ok(row.as_ref().map(category_from_row))
    }

    async fn insert_category(&self, new: NewCategory, company_id: Id) -> Result<Category> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open category insert transaction")?;

        let row = sqlx::query("INSERT INTO categories (name, kind) VALUES ($1, $2) RETURNING id")
            .bind(&new.name)
            .bind(&new.kind)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to insert category")?;
        let id: Id = row.get("id");

        sqlx::query("INSERT INTO company_categories (company_id, category_id) VALUES ($1, $2)")
            .bind(company_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to link new category to company")?;

        tx.commit()
            .await
            .context("Failed to commit category insert")?;

        Ok(Category {
            id,
            name: new.name,
            kind: new.kind,
            products: Vec::new(),
            companies: vec![company_id],
        })
    }

    async fn update_category(&self, id: Id, fields: &CategoryUpdate) -> Result<bool> {
        let result = sqlx::query("UPDATE categories SET name = $1, kind = $2 WHERE id = $3")
            .bind(&fields.name)
            .bind(&fields.kind)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update category")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: Id) -> Result<bool> {
        // Products and join rows go with it through the ON DELETE CASCADE keys.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete category")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresStore {
    async fn get_product(&self, id: Id) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_PRODUCT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product")?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("{} WHERE name = $1", SELECT_PRODUCT))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product by name")?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn insert_product(&self, new: NewProduct, category_id: Id) -> Result<Product> {
        let row = sqlx::query(
            r#"INSERT INTO products (name, price, mfg_date, expiry_date, category_id)
               VALUES ($1, $2, $3, $4, $5) RETURNING id"#,
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.mfg_date)
        .bind(new.expiry_date)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert product")?;

        Ok(Product {
            id: row.get("id"),
            name: new.name,
            price: new.price,
            mfg_date: new.mfg_date,
            expiry_date: new.expiry_date,
            category_id: Some(category_id),
        })
    }

    async fn update_product(&self, id: Id, fields: &ProductUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE products
               SET name = $1, price = $2, mfg_date = $3, expiry_date = $4
               WHERE id = $5"#,
        )
        .bind(&fields.name)
        .bind(fields.price)
        .bind(fields.mfg_date)
        .bind(fields.expiry_date)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update product")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete product")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl LinkStore for PostgresStore {
    async fn link_category(&self, company_id: Id, category_id: Id) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO company_categories (company_id, category_id)
               VALUES ($1, $2) ON CONFLICT DO NOTHING"#,
        )
        .bind(company_id)
        .bind(category_id)
        .execute(&self.pool)
        .await
        .context("Failed to link category to company")?;

        Ok(())
    }

    async fn unlink_category(&self, company_id: Id, category_id: Id) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM company_categories WHERE company_id = $1 AND category_id = $2",
        )
        .bind(company_id)
        .bind(category_id)
        .execute(&self.pool)
        .await
        .context("Failed to unlink category from company")?;

        Ok(result.rows_affected() > 0)
    }

    async fn attach_product(&self, category_id: Id, product_id: Id) -> Result<()> {
        sqlx::query("UPDATE products SET category_id = $1 WHERE id = $2")
            .bind(category_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .context("Failed to attach product to category")?;

        Ok(())
    }

    async fn detach_product(&self, category_id: Id, product_id: Id) -> Result<bool> {
        let result =
            sqlx::query("UPDATE products SET category_id = NULL WHERE id = $1 AND category_id = $2")
                .bind(product_id)
                .bind(category_id)
                .execute(&self.pool)
                .await
                .context("Failed to detach product from category")?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
