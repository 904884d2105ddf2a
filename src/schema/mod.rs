// Schema derivation for source datasets: sidecar types in, PostgreSQL DDL out.
pub mod ddl;
pub mod sidecar;
pub mod type_mapper;

pub use sidecar::read_schema;
pub use type_mapper::{map_column, map_schema};
