pub mod string;
pub mod zip;
