pub mod dataset;
pub mod question;

pub use dataset::Dataset;
pub use question::QuestionRecord;
