use modmig_core::{MigrationStep, Version};
use modmig_graph::VersionGraph;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Edge {
    from: Version,
    to: Version,
    label: &'static str,
}

impl Edge {
    fn new(from: &str, to: &str, label: &'static str) -> Self {
        Self {
            from: Version::parse(from).unwrap(),
            to: Version::parse(to).unwrap(),
            label,
        }
    }
}

impl MigrationStep for Edge {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    fn description(&self) -> Option<&str> {
        Some(self.label)
    }
}

fn v(text: &str) -> Version {
    Version::parse(text).unwrap()
}

fn labels(path: &[&Edge]) -> Vec<&'static str> {
    path.iter().map(|edge| edge.label).collect()
}

#[test]
fn linear_chain_resolves_in_order() {
    let steps = vec![
        Edge::new("1.0", "1.1", "a"),
        Edge::new("1.1", "1.2", "b"),
        Edge::new("1.2", "2.0", "c"),
    ];
    let graph = VersionGraph::build(&steps);
    let path = graph.find_path(&v("1.0"), &v("2.0")).unwrap();
    assert_eq!(labels(&path), vec!["a", "b", "c"]);
}

#[test]
fn shortest_path_wins_over_longer_detour() {
    let steps = vec![
        Edge::new("1.0", "1.1", "long1"),
        Edge::new("1.1", "1.2", "long2"),
        Edge::new("1.2", "2.0", "long3"),
        Edge::new("1.0", "2.0", "direct"),
    ];
    let graph = VersionGraph::build(&steps);
    let path = graph.find_path(&v("1.0"), &v("2.0")).unwrap();
    assert_eq!(labels(&path), vec!["direct"]);
}

#[test]
fn equal_length_paths_break_ties_by_registration_order() {
    // A->B, B->C registered before A->D, D->C: the A->B branch wins.
    let steps = vec![
        Edge::new("1.0", "1.1", "ab"),
        Edge::new("1.1", "2.0", "bc"),
        Edge::new("1.0", "1.5", "ad"),
        Edge::new("1.5", "2.0", "dc"),
    ];
    let graph = VersionGraph::build(&steps);
    let path = graph.find_path(&v("1.0"), &v("2.0")).unwrap();
    assert_eq!(labels(&path), vec!["ab", "bc"]);

    // Same edges, opposite registration order: the other branch wins.
    let steps = vec![
        Edge::new("1.0", "1.5", "ad"),
        Edge::new("1.5", "2.0", "dc"),
        Edge::new("1.0", "1.1", "ab"),
        Edge::new("1.1", "2.0", "bc"),
    ];
    let graph = VersionGraph::build(&steps);
    let path = graph.find_path(&v("1.0"), &v("2.0")).unwrap();
    assert_eq!(labels(&path), vec!["ad", "dc"]);
}

#[test]
fn equal_endpoints_are_not_found() {
    let steps = vec![Edge::new("1.0", "1.1", "a")];
    let graph = VersionGraph::build(&steps);
    assert!(graph.find_path(&v("1.0"), &v("1.0")).is_none());
    assert!(graph.find_path(&v("1.0"), &v("1.0.0")).is_none());
}

#[test]
fn unreachable_target_is_not_found() {
    let steps = vec![
        Edge::new("1.0", "1.1", "a"),
        Edge::new("2.0", "2.1", "b"),
    ];
    let graph = VersionGraph::build(&steps);
    assert!(graph.find_path(&v("1.0"), &v("2.1")).is_none());
    assert!(graph.find_path(&v("3.0"), &v("1.1")).is_none());
}

#[test]
fn cycles_do_not_loop_the_search() {
    let steps = vec![
        Edge::new("1.0", "1.1", "up"),
        Edge::new("1.1", "1.0", "down"),
        Edge::new("1.1", "2.0", "out"),
    ];
    let graph = VersionGraph::build(&steps);
    let path = graph.find_path(&v("1.0"), &v("2.0")).unwrap();
    assert_eq!(labels(&path), vec!["up", "out"]);
}

#[test]
fn outgoing_preserves_registration_order() {
    let steps = vec![
        Edge::new("1.0", "1.1", "first"),
        Edge::new("1.0", "1.2", "second"),
        Edge::new("1.0", "1.3", "third"),
    ];
    let graph = VersionGraph::build(&steps);
    assert_eq!(graph.outgoing(&v("1.0")), &[0, 1, 2]);
    assert!(graph.outgoing(&v("9.9")).is_empty());
}

proptest! {
    #[test]
    fn any_walk_along_a_linear_chain_is_found(len in 2usize..30, start in 0usize..28, span in 1usize..10) {
        prop_assume!(start + span < len);
        let steps: Vec<Edge> = (0..len - 1)
            .map(|i| Edge {
                from: Version::parse(&format!("1.{i}")).unwrap(),
                to: Version::parse(&format!("1.{}", i + 1)).unwrap(),
                label: "step",
            })
            .collect();
        let graph = VersionGraph::build(&steps);
        let from = Version::parse(&format!("1.{start}")).unwrap();
        let to = Version::parse(&format!("1.{}", start + span)).unwrap();
        let path = graph.find_path(&from, &to).unwrap();
        prop_assert_eq!(path.len(), span);
        // consecutive steps form a walk
        for pair in path.windows(2) {
            prop_assert_eq!(pair[0].to_version(), pair[1].from_version());
        }
        prop_assert_eq!(path[0].from_version(), &from);
        prop_assert_eq!(path[path.len() - 1].to_version(), &to);
    }
}
