pub mod check;
pub mod compose;
pub mod files;
pub mod init;
pub mod insight;
pub mod merge;
pub mod sequence;
