pub mod diff;
pub mod grouping;
pub mod interpolation;
pub mod report;
pub mod rows;
pub mod tokenization;
