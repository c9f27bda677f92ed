pub mod schedule;
pub mod finance_service;
pub mod payments_service;
pub mod inventory_service;
pub mod operations_service;
