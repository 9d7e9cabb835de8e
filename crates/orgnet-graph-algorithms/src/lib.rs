pub mod common;
pub mod community;
pub mod topology;

pub use common::{GraphView, NodeId};
pub use community::{connected_components, ComponentsResult};
pub use topology::{
    average_clustering, count_connected_triples, count_triangles, degree_histogram,
    global_transitivity, local_clustering,
};
