pub mod ant_colony;
pub mod bellman_ford;
pub mod bipartite;
pub mod bridges;
pub mod ford_fulkerson;
pub mod kosaraju;
pub mod kruskal;
pub mod matching;
pub mod pathfinding;
pub mod traversal;
pub mod warshall;

pub use ant_colony::*;
pub use bellman_ford::*;
pub use bipartite::*;
pub use bridges::*;
pub use ford_fulkerson::*;
pub use kosaraju::*;
pub use kruskal::*;
pub use matching::*;
pub use pathfinding::*;
pub use traversal::*;
pub use warshall::*;
