/// Multi-source breadth-first search over cell grids
pub mod bfs;
/// Weighted route planning between zones
pub mod routes;
