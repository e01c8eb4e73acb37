pub mod plan;
pub mod trip;
