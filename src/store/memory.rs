use anyhow::{bail, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    Category, CategoryUpdate, Company, CompanyUpdate, Id, NewCategory, NewCompany, NewProduct,
    Product, ProductUpdate,
};
use crate::store::traits::{CategoryStore, CompanyStore, LinkStore, ProductStore, Store};

#[derive(Debug, Clone)]
struct CompanyRecord {
    name: String,
    city: String,
    state: String,
}

#[derive(Debug, Clone)]
struct CategoryRecord {
    name: String,
    kind: String,
}

#[derive(Debug, Clone)]
struct ProductRecord {
    name: String,
    price: f64,
    mfg_date: chrono::NaiveDate,
    expiry_date: chrono::NaiveDate,
    category_id: Option<Id>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: Id,
    companies: BTreeMap<Id, CompanyRecord>,
    categories: BTreeMap<Id, CategoryRecord>,
    products: BTreeMap<Id, ProductRecord>,
    /// The company-category join index, ordered (company_id, category_id).
    company_categories: BTreeSet<(Id, Id)>,
}

impl Inner {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn company(&self, id: Id, record: &CompanyRecord) -> Company {
        Company {
            id,
            name: record.name.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            categories: self
                .company_categories
                .iter()
                .filter(|(company_id, _)| *company_id == id)
                .map(|(_, category_id)| *category_id)
                .collect(),
        }
    }

    fn category(&self, id: Id, record: &CategoryRecord) -> Category {
        Category {
            id,
            name: record.name.clone(),
            kind: record.kind.clone(),
            products: self
                .products
                .iter()
                .filter(|(_, product)| product.category_id == Some(id))
                .map(|(product_id, _)| *product_id)
                .collect(),
            companies: self
                .company_categories
                .iter()
                .filter(|(_, category_id)| *category_id == id)
                .map(|(company_id, _)| *company_id)
                .collect(),
        }
    }

    fn product(&self, id: Id, record: &ProductRecord) -> Product {
        Product {
            id,
            name: record.name.clone(),
            price: record.price,
            mfg_date: record.mfg_date,
            expiry_date: record.expiry_date,
            category_id: record.category_id,
        }
    }
}

/// In-memory store used by tests and local runs. Mirrors the PostgreSQL
/// schema's guarantees: unique names per entity table and the same cascade
/// behavior on delete. Every mutation happens under one write lock, so each
/// store call is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CompanyStore for MemoryStore {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        let inner = self.inner.read();
        Ok(inner
            .companies
            .iter()
            .map(|(id, record)| inner.company(*id, record))
            .collect())
    }

    async fn get_company(&self, id: Id) -> Result<Option<Company>> {
        let inner = self.inner.read();
        Ok(inner
            .companies
            .get(&id)
            .map(|record| inner.company(id, record)))
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let inner = self.inner.read();
        Ok(inner
            .companies
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, record)| inner.company(*id, record)))
    }

    async fn insert_company(&self, new: NewCompany) -> Result<Company> {
        let mut inner = self.inner.write();
        if inner.companies.values().any(|c| c.name == new.name) {
            bail!("unique constraint violated: companies.name = '{}'", new.name);
        }
        let id = inner.next_id();
        inner.companies.insert(
            id,
            CompanyRecord {
                name: new.name.clone(),
                city: new.city.clone(),
                state: new.state.clone(),
            },
        );
        Ok(Company {
            id,
            name: new.name,
            city: new.city,
            state: new.state,
            categories: Vec::new(),
        })
    }

    async fn update_company(&self, id: Id, fields: &CompanyUpdate) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner
            .companies
            .iter()
            .any(|(other, c)| *other != id && c.name == fields.name)
        {
            bail!("unique constraint violated: companies.name = '{}'", fields.name);
        }
        match inner.companies.get_mut(&id) {
            Some(record) => {
                record.name = fields.name.clone();
                record.city = fields.city.clone();
                record.state = fields.state.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_company(&self, id: Id) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.companies.remove(&id).is_none() {
            return Ok(false);
        }
        inner
            .company_categories
            .retain(|(company_id, _)| *company_id != id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl CategoryStore for MemoryStore {
    async fn get_category(&self, id: Id) -> Result<Option<Category>> {
        let inner = self.inner.read();
        Ok(inner
            .categories
            .get(&id)
            .map(|record| inner.category(id, record)))
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let inner = self.inner.read();
        Ok(inner
            .categories
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, record)| inner.category(*id, record)))
    }

    async fn insert_category(&self, new: NewCategory, company_id: Id) -> Result<Category> {
        let mut inner = self.inner.write();
        if inner.categories.values().any(|c| c.name == new.name) {
            bail!("unique constraint violated: categories.name = '{}'", new.name);
        }
        let id = inner.next_id();
        inner.categories.insert(
            id,
            CategoryRecord {
                name: new.name.clone(),
                kind: new.kind.clone(),
            },
        );
        inner.company_categories.insert((company_id, id));
        Ok(Category {
            id,
            name: new.name,
            kind: new.kind,
            products: Vec::new(),
            companies: vec![company_id],
        })
    }

    async fn update_category(&self, id: Id, fields: &CategoryUpdate) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner
            .categories
            .iter()
            .any(|(other, c)| *other != id && c.name == fields.name)
        {
            bail!("unique constraint violated: categories.name = '{}'", fields.name);
        }
        match inner.categories.get_mut(&id) {
            Some(record) => {
                record.name = fields.name.clone();
                record.kind = fields.kind.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, id: Id) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.categories.remove(&id).is_none() {
            return Ok(false);
        }
        inner
            .company_categories
            .retain(|(_, category_id)| *category_id != id);
        inner
            .products
            .retain(|_, product| product.category_id != Some(id));
        Ok(true)
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn get_product(&self, id: Id) -> Result<Option<Product>> {
        let inner = self.inner.read();
        Ok(inner
            .products
            .get(&id)
            .map(|record| inner.product(id, record)))
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>> {
        let inner = self.inner.read();
        Ok(inner
            .products
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, record)| inner.product(*id, record)))
    }

    async fn insert_product(&self, new: NewProduct, category_id: Id) -> Result<Product> {
        let mut inner = self.inner.write();
        if inner.products.values().any(|p| p.name == new.name) {
            bail!("unique constraint violated: products.name = '{}'", new.name);
        }
        let id = inner.next_id();
        inner.products.insert(
            id,
            ProductRecord {
                name: new.name.clone(),
                price: new.price,
                mfg_date: new.mfg_date,
                expiry_date: new.expiry_date,
                category_id: Some(category_id),
            },
        );
        Ok(Product {
            id,
            name: new.name,
            price: new.price,
            mfg_date: new.mfg_date,
            expiry_date: new.expiry_date,
            category_id: Some(category_id),
        })
    }

    async fn update_product(&self, id: Id, fields: &ProductUpdate) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner
            .products
            .iter()
            .any(|(other, p)| *other != id && p.name == fields.name)
        {
            bail!("unique constraint violated: products.name = '{}'", fields.name);
        }
        match inner.products.get_mut(&id) {
            Some(record) => {
                record.name = fields.name.clone();
                record.price = fields.price;
                record.mfg_date = fields.mfg_date;
                record.expiry_date = fields.expiry_date;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: Id) -> Result<bool> {
        Ok(self.inner.write().products.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl LinkStore for MemoryStore {
    async fn link_category(&self, company_id: Id, category_id: Id) -> Result<()> {
        self.inner
            .write()
            .company_categories
            .insert((company_id, category_id));
        Ok(())
    }

    async fn unlink_category(&self, company_id: Id, category_id: Id) -> Result<bool> {
        Ok(self
            .inner
            .write()
            .company_categories
            .remove(&(company_id, category_id)))
    }

    async fn attach_product(&self, category_id: Id, product_id: Id) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.products.get_mut(&product_id) {
            Some(record) => {
                record.category_id = Some(category_id);
                Ok(())
            }
            None => bail!("product {} does not exist", product_id),
        }
    }

    async fn detach_product(&self, category_id: Id, product_id: Id) -> Result<bool> {
        let mut inner = self.inner.write();
        match inner.products.get_mut(&product_id) {
            Some(record) if record.category_id == Some(category_id) => {
                record.category_id = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Store for MemoryStore {}
