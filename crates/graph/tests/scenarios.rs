//! End-to-end behaviour of the citation graph pipeline on small corpora

use citenet_common::{LayoutConfig, PaperRecord};
use citenet_graph::layout::grid_cell;
use citenet_graph::{
    CitationGraph, CitationPipeline, CitationSession, Edge, LayoutEngine, LayoutStrategy, Node,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

fn build(records: &[PaperRecord]) -> CitationGraph {
    CitationPipeline::new(LayoutConfig::default()).build(records, &mut StdRng::seed_from_u64(11))
}

fn connectivity(graph: &CitationGraph) -> HashMap<&str, bool> {
    graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.is_connected))
        .collect()
}

#[test]
fn unresolved_reference_leaves_paper_isolated() {
    let records = vec![
        PaperRecord::new("P1", "One").with_references(["P2"]),
        PaperRecord::new("P2", "Two"),
        PaperRecord::new("P3", "Three").with_references(["P9"]),
    ];

    let graph = build(&records);
    assert_eq!(graph.edges, vec![Edge::new("P1", "P2")]);

    let flags = connectivity(&graph);
    assert!(flags["P1"]);
    assert!(flags["P2"]);
    assert!(!flags["P3"]);
}

#[test]
fn duplicate_ids_keep_first_title() {
    let records = vec![
        PaperRecord::new("X", "First title"),
        PaperRecord::new("Y", "Other"),
        PaperRecord::new("X", "Second title"),
    ];

    let graph = build(&records);
    let xs: Vec<&Node> = graph.nodes.iter().filter(|n| n.id == "X").collect();
    assert_eq!(xs.len(), 1);
    assert_eq!(xs[0].label, "First title");
}

#[test]
fn filter_drops_edges_with_one_endpoint_outside() {
    let records = vec![
        PaperRecord::new("P1", "Bayesian inference").with_references(["P2"]),
        PaperRecord::new("P2", "Neural ODEs").with_references(["P5"]),
        PaperRecord::new("P3", "Kernel methods"),
        PaperRecord::new("P4", "Recurrent neural architectures"),
        PaperRecord::new("P5", "Gaussian processes").with_references(["P3"]),
    ];

    let full = build(&records);
    assert!(full.edges.contains(&Edge::new("P2", "P5")));

    let mut session = CitationSession::new(full.clone());
    let filtered = session.filter("neural").clone();

    let ids: HashSet<&str> = filtered.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["P2", "P4"]));
    assert!(filtered.edges.is_empty());

    for node in &filtered.nodes {
        assert_eq!(node.position(), full.node(&node.id).unwrap().position());
    }

    assert_eq!(session.reset(), &full);
}

#[test]
fn empty_filter_is_the_full_graph() {
    let records = vec![
        PaperRecord::new("P1", "A").with_references(["P2"]),
        PaperRecord::new("P2", "B"),
    ];
    let full = build(&records);

    let mut session = CitationSession::new(full.clone());
    assert_eq!(session.filter(""), &full);
}

#[test]
fn twenty_papers_use_a_five_by_four_grid() {
    let records: Vec<PaperRecord> = (0..20)
        .map(|i| PaperRecord::new(format!("P{}", i), format!("Paper {}", i)))
        .collect();

    let engine = LayoutEngine::new(LayoutConfig::default());
    let strategy = engine.strategy(records.len());
    let LayoutStrategy::Grid { cols, rows, .. } = strategy else {
        panic!("expected grid layout, got {:?}", strategy);
    };
    assert_eq!((cols, rows), (5, 4));

    let cells: HashSet<(usize, usize)> = (0..records.len()).map(|i| grid_cell(i, cols)).collect();
    assert_eq!(cells.len(), records.len());

    let graph = build(&records);
    assert!(graph.nodes.iter().all(|n| n.position().is_some()));
}

#[test]
fn small_graphs_sit_on_one_circle() {
    let records: Vec<PaperRecord> = (0..12)
        .map(|i| PaperRecord::new(format!("P{}", i), format!("Paper {}", i)))
        .collect();

    let graph = build(&records);
    let engine = LayoutEngine::new(LayoutConfig::default());
    let LayoutStrategy::Circular { radius } = engine.strategy(graph.node_count()) else {
        panic!("expected circular layout");
    };
    let (cx, cy) = engine.center();

    for node in &graph.nodes {
        let (x, y) = node.position().unwrap();
        let r = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        assert!((r - radius).abs() < 1e-9, "radius {} != {}", r, radius);
    }
}

#[test]
fn malformed_record_is_excluded_with_its_edges() {
    let records = vec![
        PaperRecord::new("P1", "A").with_references(["P2"]),
        PaperRecord {
            id: None,
            title: Some("No id".into()),
            references: vec!["P1".into()],
            ..PaperRecord::default()
        },
        PaperRecord::new("P2", "B"),
    ];

    let graph = build(&records);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edges, vec![Edge::new("P1", "P2")]);
}

#[test]
fn seeded_builds_are_reproducible() {
    let records: Vec<PaperRecord> = (0..40)
        .map(|i| {
            PaperRecord::new(format!("P{}", i), format!("Paper {}", i))
                .with_references([format!("P{}", (i * 7) % 40)])
        })
        .collect();

    let pipeline = CitationPipeline::new(LayoutConfig::default());
    let a = pipeline.build(&records, &mut StdRng::seed_from_u64(5));
    let b = pipeline.build(&records, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}
