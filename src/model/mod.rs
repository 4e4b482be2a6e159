//! Read-only data access layer: source records, the [`Dataset`] container,
//! and inner-join fact views consumed by the report assemblers.

pub mod load;
pub mod types;

pub use load::load_dataset;
pub use types::{
    Category, Customer, Dataset, Film, FilmCategory, Inventory, Payment, PaymentFact, Rental,
    RentalFact, Store,
};
