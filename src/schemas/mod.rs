pub mod correction;
pub mod errors;
pub mod issue;
pub mod report;
