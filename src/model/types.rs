//! Normalized source records and the in-memory [`Dataset`].
//!
//! All records are read-only from this crate's perspective: they are supplied
//! by an external data provider and every derived table is a pure function of
//! them. Join helpers here implement inner-join semantics — a row whose
//! reference does not resolve is silently dropped, matching the source
//! system's join-based filtering.

use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source records
// ---------------------------------------------------------------------------

/// A single payment transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: u32,
    pub customer_id: u32,
    pub rental_id: u32,
    /// Positive decimal amount.
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
}

/// A rental event for one physical inventory copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub rental_id: u32,
    pub customer_id: u32,
    pub inventory_id: u32,
    pub rental_date: DateTime<Utc>,
    /// `None` means the copy has not been returned yet; such rentals are
    /// excluded from duration statistics.
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
}

/// The bridge from a physical copy to both its title and its store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub inventory_id: u32,
    pub film_id: u32,
    pub store_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub film_id: u32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub category_id: u32,
    pub name: String,
}

/// Many-to-many film ↔ category mapping row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmCategory {
    pub film_id: u32,
    pub category_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub store_id: u32,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The full transactional dataset a report run operates on.
///
/// Deserialized in one piece from the provider's JSON file; see
/// [`super::load`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub inventory: Vec<Inventory>,
    #[serde(default)]
    pub films: Vec<Film>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub film_categories: Vec<FilmCategory>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub stores: Vec<Store>,
}

/// A payment joined through rental and inventory down to its store and film.
///
/// Only payments whose rental and inventory references both resolve appear
/// here (inner-join semantics).
#[derive(Debug, Clone, Copy)]
pub struct PaymentFact {
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub customer_id: u32,
    pub store_id: u32,
    pub film_id: u32,
}

/// A rental joined through inventory to its film.
#[derive(Debug, Clone, Copy)]
pub struct RentalFact {
    pub film_id: u32,
    pub rental_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Film lookup by id.
    pub fn films_by_id(&self) -> FxHashMap<u32, &Film> {
        self.films.iter().map(|f| (f.film_id, f)).collect()
    }

    /// Customer lookup by id.
    pub fn customers_by_id(&self) -> FxHashMap<u32, &Customer> {
        self.customers.iter().map(|c| (c.customer_id, c)).collect()
    }

    /// Ids of stores that actually exist in the source data.
    pub fn store_ids(&self) -> FxHashSet<u32> {
        self.stores.iter().map(|s| s.store_id).collect()
    }

    /// Category names per film, via the many-to-many mapping.
    ///
    /// Mapping rows pointing at a missing film or category are dropped.
    pub fn categories_of_film(&self) -> FxHashMap<u32, Vec<&str>> {
        let film_ids: FxHashSet<u32> = self.films.iter().map(|f| f.film_id).collect();
        let category_names: FxHashMap<u32, &str> = self
            .categories
            .iter()
            .map(|c| (c.category_id, c.name.as_str()))
            .collect();

        let mut out: FxHashMap<u32, Vec<&str>> = FxHashMap::default();
        for fc in &self.film_categories {
            if !film_ids.contains(&fc.film_id) {
                continue;
            }
            let Some(name) = category_names.get(&fc.category_id) else {
                continue;
            };
            out.entry(fc.film_id).or_default().push(name);
        }
        out
    }

    /// Join every payment through its rental and inventory row.
    ///
    /// Payments referencing a nonexistent rental or inventory copy are
    /// silently excluded — this must stay inner-join shaped or revenue
    /// totals diverge from the reference behavior.
    pub fn payment_facts(&self) -> Vec<PaymentFact> {
        let rentals: FxHashMap<u32, &Rental> =
            self.rentals.iter().map(|r| (r.rental_id, r)).collect();
        let inventory: FxHashMap<u32, &Inventory> = self
            .inventory
            .iter()
            .map(|i| (i.inventory_id, i))
            .collect();

        let mut facts = Vec::with_capacity(self.payments.len());
        for p in &self.payments {
            let Some(rental) = rentals.get(&p.rental_id) else {
                continue;
            };
            let Some(inv) = inventory.get(&rental.inventory_id) else {
                continue;
            };
            facts.push(PaymentFact {
                amount: p.amount,
                payment_date: p.payment_date,
                customer_id: p.customer_id,
                store_id: inv.store_id,
                film_id: inv.film_id,
            });
        }
        facts
    }

    /// Join every rental through its inventory row to a film.
    pub fn rental_facts(&self) -> Vec<RentalFact> {
        let inventory: FxHashMap<u32, &Inventory> = self
            .inventory
            .iter()
            .map(|i| (i.inventory_id, i))
            .collect();

        let mut facts = Vec::with_capacity(self.rentals.len());
        for r in &self.rentals {
            let Some(inv) = inventory.get(&r.inventory_id) else {
                continue;
            };
            facts.push(RentalFact {
                film_id: inv.film_id,
                rental_date: r.rental_date,
                return_date: r.return_date,
            });
        }
        facts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
