mod staging_area;

pub use staging_area::StagingArea;
