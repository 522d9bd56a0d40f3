// Resume uploads: text extraction for matching, raw file archived to S3.

pub mod archive;
pub mod extract;
pub mod handlers;
