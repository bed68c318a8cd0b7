pub mod params;
pub mod simulate;
pub mod validate;
