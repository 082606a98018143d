pub mod applications;
pub mod categories;
pub mod companies;
pub mod dimensions;
pub mod makes;
pub mod proxy;
pub mod purchase_orders;
pub mod session;
pub mod support;
pub mod vouchers;
