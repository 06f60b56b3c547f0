pub mod encoding;
pub mod latlng;

pub mod line;
pub mod rect;
pub mod segment;
pub mod shape;

pub mod predicates;
mod edge_crosser;
pub mod edge_crossings;

pub mod line2d;
pub mod polygon;
pub mod query;
pub mod ring;

pub mod oracle;
pub mod relation;

pub mod config;
pub mod error;
pub mod harness;
pub mod random;
pub mod shape_index;

#[cfg(test)]
mod test_util;
