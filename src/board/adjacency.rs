//! Adjacency graph for the Standard Game map.
//!
//! The map is described as rows of `[space, neighbors...]`. Rows need not be
//! symmetric: if A lists B, the graph treats B as adjacent to A as well.
//! Adjacency is binary; there are no movement costs or edge kinds.

use std::sync::LazyLock;

use super::space::{Location, Space, SPACE_COUNT};

/// Adjacency rows of the Standard Game map, one per space.
pub static ADJACENCY_ROWS: [&[u8]; SPACE_COUNT] = [
    &[1, 2, 3, 4, 24],
    &[2, 1, 4, 23, 37, 38],
    &[3, 1, 4, 20, 21],
    &[4, 1, 2, 3, 21, 22],
    &[5, 6, 23, 30],
    &[6, 5, 7, 22, 23],
    &[7, 6, 8, 22],
    &[8, 7, 9, 22],
    &[9, 8, 10, 22],
    &[10, 9, 11, 21, 22],
    &[11, 10, 12, 15, 21],
    &[12, 11, 13, 21],
    &[13, 12, 14, 17, 45],
    &[14, 13, 15, 16],
    &[15, 11, 14],
    &[16, 14, 17, 18],
    &[17, 13, 16, 18, 19],
    &[18, 16, 17, 19],
    &[19, 17, 18, 51],
    &[20, 3, 21, 50],
    &[21, 3, 4, 10, 11, 12, 20, 22],
    &[22, 4, 6, 7, 8, 9, 10, 21],
    &[23, 2, 5, 6, 38],
    &[24, 1, 35, 36, 37],
    &[25, 26, 40],
    &[26, 25, 27, 33, 34],
    &[27, 26, 28, 32, 34],
    &[28, 27, 32],
    &[29, 31, 32, 33],
    &[30, 5, 31, 39],
    &[31, 29, 30, 39],
    &[32, 27, 28, 29, 33],
    &[33, 26, 29, 32, 34, 39],
    &[34, 26, 27, 33, 35],
    &[35, 24, 34, 36],
    &[36, 24, 35, 37],
    &[37, 2, 24, 36, 38, 39],
    &[38, 2, 23, 37, 39],
    &[39, 30, 31, 33, 37, 38],
    &[40, 25, 52],
    &[41, 42, 43],
    &[42, 41, 43, 49],
    &[43, 41, 42, 44, 45, 47],
    &[44, 43, 47, 51],
    &[45, 13, 43, 46],
    &[46, 45, 47, 48],
    &[47, 43, 44, 46, 51],
    &[48, 46, 49, 50],
    &[49, 42, 48, 50],
    &[50, 20, 48, 49],
    &[51, 19, 44, 47, 52],
    &[52, 40, 51],
];

/// Bidirectional adjacency between map spaces.
#[derive(Debug, Clone)]
pub struct BoardGraph {
    neighbors: Vec<Vec<Space>>,
}

impl BoardGraph {
    /// Builds the graph from `[space, neighbors...]` rows.
    ///
    /// Every listed edge is inserted in both directions. Ids outside the map
    /// and self-references are ignored.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let mut neighbors: Vec<Vec<Space>> = vec![Vec::new(); SPACE_COUNT];

        for row in rows {
            let row = row.as_ref();
            let Some((&head, rest)) = row.split_first() else {
                continue;
            };
            let Some(from) = Space::new(head) else {
                continue;
            };
            for to in rest.iter().filter_map(|&n| Space::new(n)) {
                if to == from {
                    continue;
                }
                neighbors[from.index()].push(to);
                neighbors[to.index()].push(from);
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        BoardGraph { neighbors }
    }

    /// Returns the neighbors of a map space, sorted by number.
    pub fn neighbors(&self, space: Space) -> &[Space] {
        &self.neighbors[space.index()]
    }

    /// Returns the neighbors of a location. Track slots have none.
    pub fn neighbors_of(&self, location: Location) -> &[Space] {
        match location {
            Location::Map(space) => self.neighbors(space),
            Location::Track(_) => &[],
        }
    }

    /// Returns true if two map spaces share an edge.
    pub fn is_adjacent(&self, a: Space, b: Space) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }
}

static STANDARD: LazyLock<BoardGraph> = LazyLock::new(|| BoardGraph::from_rows(&ADJACENCY_ROWS));

/// Returns the shared Standard Game graph, built on first access.
pub fn standard() -> &'static BoardGraph {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::space::{all_spaces, TrackSlot};

    fn sp(n: u8) -> Space {
        Space::new(n).unwrap()
    }

    #[test]
    fn adjacency_symmetry() {
        let graph = standard();
        for a in all_spaces() {
            for &b in graph.neighbors(a) {
                assert!(graph.is_adjacent(b, a), "{} -> {} has no reverse edge", a, b);
            }
        }
    }

    #[test]
    fn no_self_adjacency() {
        let graph = standard();
        for s in all_spaces() {
            assert!(!graph.is_adjacent(s, s), "{} is adjacent to itself", s);
        }
    }

    #[test]
    fn every_space_has_a_neighbor() {
        let graph = standard();
        for s in all_spaces() {
            assert!(!graph.neighbors(s).is_empty(), "{} is isolated", s);
        }
    }

    #[test]
    fn map_is_connected() {
        let graph = standard();
        let mut seen = vec![false; SPACE_COUNT];
        let mut stack = vec![sp(1)];
        while let Some(s) = stack.pop() {
            if seen[s.index()] {
                continue;
            }
            seen[s.index()] = true;
            stack.extend(graph.neighbors(s).iter().copied());
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn one_sided_rows_are_symmetrized() {
        let graph = BoardGraph::from_rows(&[vec![1u8, 2], vec![3, 1]]);
        assert_eq!(graph.neighbors(sp(2)), &[sp(1)]);
        assert_eq!(graph.neighbors(sp(1)), &[sp(2), sp(3)]);
        assert!(graph.neighbors(sp(4)).is_empty());
    }

    #[test]
    fn invalid_ids_are_ignored() {
        let graph = BoardGraph::from_rows(&[vec![1u8, 0, 99, 1, 2]]);
        assert_eq!(graph.neighbors(sp(1)), &[sp(2)]);
    }

    #[test]
    fn track_slots_have_no_neighbors() {
        let graph = standard();
        assert!(graph.neighbors_of(Location::Track(TrackSlot::Navy1)).is_empty());
        assert_eq!(graph.neighbors_of(Location::Map(sp(1))), graph.neighbors(sp(1)));
    }

    #[test]
    fn known_adjacencies_sample() {
        let graph = standard();
        assert!(graph.is_adjacent(sp(1), sp(24)));
        assert!(graph.is_adjacent(sp(24), sp(37)));
        assert!(graph.is_adjacent(sp(20), sp(50)));
        assert!(graph.is_adjacent(sp(13), sp(45)));
        assert!(!graph.is_adjacent(sp(1), sp(25)));
        assert!(!graph.is_adjacent(sp(5), sp(22)));
    }
}
