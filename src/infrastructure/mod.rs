pub mod customer_csv;
pub mod factory;
pub mod model_loader;
pub mod observability;

pub use factory::ServiceFactory;
