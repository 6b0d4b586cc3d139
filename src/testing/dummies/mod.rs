mod datasets;

pub use datasets::two_blobs;
