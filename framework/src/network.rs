//! Networks of named triads.
//!
//! A [`TriadNetwork`] records computed triads under string ids and directed
//! connections between them. Each connection is weighted with the `K` of its
//! source triad, so a path through the network carries the simplicity of
//! every rule it passes.
//!
//! # Example
//!
//! ```
//! use triadic_framework::{BalancingRule, Concept, TriadNetwork};
//!
//! let mut net = TriadNetwork::new();
//! let [c1, c2, c3] = [18i64, 6, 8].map(Concept::from);
//! net.add_triad("delta1", &c1, &c2, &c3, &BalancingRule::new(3, 4).unwrap()).unwrap();
//! let [c1, c2, c3] = [2i64, 5, 10].map(Concept::from);
//! net.add_triad("delta2", &c1, &c2, &c3, &BalancingRule::unit()).unwrap();
//! net.connect("delta1", "delta2").unwrap();
//!
//! assert_eq!(net.edges()[0].weight, Concept::new(1, 12).unwrap());
//! ```

use std::collections::HashMap;

use crate::concept::Concept;
use crate::error::{Result, TriadError};
use crate::generative::{compute_triad, TriadResult};
use crate::rule::BalancingRule;

/// A triad stored in a network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriadNode {
    /// The id the triad was registered under.
    pub id: String,
    /// `[C1, C2, C3]` as supplied.
    pub inputs: [Concept; 3],
    /// The computed triad.
    pub result: TriadResult,
}

/// A directed connection between two triads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriadEdge {
    /// Source triad id.
    pub from: String,
    /// Target triad id.
    pub to: String,
    /// `K` of the source triad.
    pub weight: Concept,
}

/// Named triads and the connections between them, in insertion order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriadNetwork {
    nodes: Vec<TriadNode>,
    edges: Vec<TriadEdge>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<String, usize>,
}

impl TriadNetwork {
    /// An empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the triad and stores it under `id`.
    ///
    /// # Errors
    ///
    /// - [`TriadError::DuplicateTriad`] when `id` is already present.
    /// - Any error of [`compute_triad`].
    pub fn add_triad(
        &mut self,
        id: impl Into<String>,
        c1: &Concept,
        c2: &Concept,
        c3: &Concept,
        rule: &BalancingRule,
    ) -> Result<&TriadNode> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(TriadError::DuplicateTriad(id));
        }

        let result = compute_triad(c1, c2, c3, rule)?;
        let slot = self.nodes.len();
        self.index.insert(id.clone(), slot);
        self.nodes.push(TriadNode {
            id,
            inputs: [c1.clone(), c2.clone(), c3.clone()],
            result,
        });
        Ok(&self.nodes[slot])
    }

    /// Adds a directed edge weighted with the `K` of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::UnknownTriad`] when either id is absent.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<&TriadEdge> {
        let source = self.require(from)?;
        self.require(to)?;

        let weight = source.result.k().clone();
        tracing::debug!(from, to, %weight, "connected triads");
        self.edges.push(TriadEdge {
            from: from.to_owned(),
            to: to.to_owned(),
            weight,
        });
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// The triad registered under `id`.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&TriadNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// All triads, in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[TriadNode] {
        &self.nodes
    }

    /// All edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[TriadEdge] {
        &self.edges
    }

    /// Number of triads.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `id`.
    pub fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TriadEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == id)
    }

    fn require(&self, id: &str) -> Result<&TriadNode> {
        self.node(id)
            .ok_or_else(|| TriadError::UnknownTriad(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_network() -> TriadNetwork {
        let mut net = TriadNetwork::new();
        let [c1, c2, c3] = [18i64, 6, 8].map(Concept::from);
        net.add_triad("delta1", &c1, &c2, &c3, &BalancingRule::new(3, 4).unwrap())
            .unwrap();
        let [c1, c2, c3] = [2i64, 5, 10].map(Concept::from);
        net.add_triad("delta2", &c1, &c2, &c3, &BalancingRule::unit())
            .unwrap();
        net
    }

    #[test]
    fn stores_triads_with_k() {
        let net = paper_network();
        assert_eq!(net.node_count(), 2);
        let delta1 = net.node("delta1").unwrap();
        assert_eq!(delta1.result.k(), &Concept::new(1, 12).unwrap());
        assert_eq!(net.node("delta2").unwrap().result.c4(), &Concept::from(25));
    }

    #[test]
    fn edge_weight_is_source_k() {
        let mut net = paper_network();
        net.connect("delta1", "delta2").unwrap();
        net.connect("delta2", "delta1").unwrap();
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.edges()[1].weight, Concept::one());
        assert_eq!(net.successors("delta1").count(), 1);
    }

    #[test]
    fn duplicate_and_unknown_ids() {
        let mut net = paper_network();
        let one = Concept::one();
        assert_eq!(
            net.add_triad("delta1", &one, &one, &one, &BalancingRule::unit())
                .unwrap_err(),
            TriadError::DuplicateTriad("delta1".into())
        );
        assert_eq!(
            net.connect("delta1", "delta9").unwrap_err(),
            TriadError::UnknownTriad("delta9".into())
        );
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn failed_triad_is_not_stored() {
        let mut net = TriadNetwork::new();
        let one = Concept::one();
        assert!(net
            .add_triad("bad", &Concept::zero(), &one, &one, &BalancingRule::unit())
            .is_err());
        assert!(net.node("bad").is_none());
    }
}
