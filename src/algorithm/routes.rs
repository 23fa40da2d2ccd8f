//! Zone-level route planning over weighted connections between map zones
//!
//! Zones are joined by undirected, weighted links (e.g. travel distance in
//! tiles between two towns). Routes are found with Dijkstra's algorithm.

use crate::io::error::{GridError, Result, malformed_grid};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::path::Path;

/// Cheapest route between two zones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Sum of link weights along the route
    pub cost: u64,
    /// Zone codes from start to destination, inclusive
    pub zones: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    to: usize,
    weight: u64,
}

/// Undirected weighted graph of zones
#[derive(Debug, Clone, Default)]
pub struct ZoneGraph {
    codes: Vec<String>,
    index: HashMap<String, usize>,
    links: Vec<Vec<Link>>,
}

impl ZoneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone, returning its index; existing zones are reused
    pub fn add_zone(&mut self, code: &str) -> usize {
        if let Some(&existing) = self.index.get(code) {
            return existing;
        }
        let id = self.codes.len();
        self.codes.push(code.to_string());
        self.index.insert(code.to_string(), id);
        self.links.push(Vec::new());
        id
    }

    /// Join two zones in both directions, registering them if needed
    pub fn connect(&mut self, a: &str, b: &str, weight: u64) {
        let a = self.add_zone(a);
        let b = self.add_zone(b);
        if let Some(out) = self.links.get_mut(a) {
            out.push(Link { to: b, weight });
        }
        if let Some(out) = self.links.get_mut(b) {
            out.push(Link { to: a, weight });
        }
    }

    /// Number of registered zones
    pub fn zone_count(&self) -> usize {
        self.codes.len()
    }

    /// Whether a zone code is registered
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Cheapest route from `from` to `to`
    ///
    /// Returns `None` if either zone is unknown or they are not connected.
    /// A route from a zone to itself costs nothing.
    pub fn shortest_route(&self, from: &str, to: &str) -> Option<Route> {
        let start = *self.index.get(from)?;
        let goal = *self.index.get(to)?;

        let mut dist = vec![u64::MAX; self.codes.len()];
        let mut prev: Vec<Option<usize>> = vec![None; self.codes.len()];
        let mut open = BinaryHeap::new();

        *dist.get_mut(start)? = 0;
        open.push(Reverse((0u64, start)));

        while let Some(Reverse((cost, current))) = open.pop() {
            if current == goal {
                break;
            }
            if cost > dist.get(current).copied().unwrap_or(u64::MAX) {
                continue;
            }

            for link in self.links.get(current).into_iter().flatten() {
                let tentative = cost.saturating_add(link.weight);
                let Some(best) = dist.get_mut(link.to) else {
                    continue;
                };
                if tentative < *best {
                    *best = tentative;
                    if let Some(slot) = prev.get_mut(link.to) {
                        *slot = Some(current);
                    }
                    open.push(Reverse((tentative, link.to)));
                }
            }
        }

        let cost = *dist.get(goal)?;
        if cost == u64::MAX {
            return None;
        }

        let mut order = vec![goal];
        let mut current = goal;
        while let Some(Some(parent)) = prev.get(current) {
            order.push(*parent);
            current = *parent;
        }
        order.reverse();

        let zones = order
            .into_iter()
            .filter_map(|id| self.codes.get(id).cloned())
            .collect();
        Some(Route { cost, zones })
    }

    /// Parse `from,to,weight` records, with a header row
    ///
    /// # Errors
    ///
    /// Returns `GridError::MalformedGrid` if the header is missing, a record
    /// does not have three fields, or a weight is not a non-negative integer
    pub fn parse_links(text: &str) -> Result<Self> {
        let mut graph = Self::new();
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());

        match lines.next() {
            Some((_, header)) if header.trim() == "from,to,weight" => {}
            Some((index, header)) => {
                return Err(malformed_grid(
                    index + 1,
                    &format!("expected header 'from,to,weight', found '{}'", header.trim()),
                ));
            }
            None => return Err(malformed_grid(1, &"missing header")),
        }

        for (index, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let &[from, to, weight] = fields.as_slice() else {
                return Err(malformed_grid(
                    index + 1,
                    &format!("expected 3 fields, found {}", fields.len()),
                ));
            };
            let weight = weight
                .parse::<u64>()
                .map_err(|e| malformed_grid(index + 1, &format!("weight '{weight}': {e}")))?;
            graph.connect(from, to, weight);
        }

        log::debug!("Loaded {} zones", graph.zone_count());
        Ok(graph)
    }

    /// Load zone links from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse
    pub fn load_links<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GridError::FileSystem {
            path: path.to_path_buf(),
            operation: "read zone links",
            source: e,
        })?;
        Self::parse_links(&text)
    }
}
