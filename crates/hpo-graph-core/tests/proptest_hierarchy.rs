use std::collections::BTreeSet;

use hpo_graph_core::Ontology;
use hpo_graph_core::graph::RawOntology;
use proptest::prelude::*;
use proptest::sample::Index;

const ALL: &str = "ALL";
const ROOT: &str = "R";
const SIBLING: &str = "S";

/// Random hierarchy: a DAG below `R` and an unrelated DAG below `S`, both
/// hanging from the `ALL` sentinel.
#[derive(Debug, Clone)]
struct Hierarchy {
    kept: Vec<String>,
    pruned: Vec<String>,
    edges: Vec<(String, String)>,
}

impl Hierarchy {
    fn raw(&self) -> RawOntology {
        RawOntology::from_edges(self.edges.iter().map(|(c, p)| (c.as_str(), p.as_str())))
    }

    fn ontology(&self) -> Ontology {
        Ontology::new(self.raw(), ROOT, ALL).expect("ontology")
    }
}

/// Each non-root node picks 1–3 parents among the nodes created before it.
fn arb_dag(prefix: &'static str, root: &'static str) -> impl Strategy<Value = (Vec<String>, Vec<(String, String)>)> {
    prop::collection::vec(prop::collection::vec(any::<Index>(), 1..=3), 0..16).prop_map(
        move |specs| {
            let mut nodes = vec![root.to_string()];
            let mut edges = Vec::new();
            for (i, parents) in specs.into_iter().enumerate() {
                let id = format!("{prefix}{i}");
                for parent in parents {
                    edges.push((id.clone(), nodes[parent.index(nodes.len())].clone()));
                }
                nodes.push(id);
            }
            (nodes, edges)
        },
    )
}

fn arb_hierarchy() -> impl Strategy<Value = Hierarchy> {
    (arb_dag("r", ROOT), arb_dag("s", SIBLING)).prop_map(|((kept, kept_edges), (pruned, pruned_edges))| {
        let mut edges = vec![
            (ROOT.to_string(), ALL.to_string()),
            (SIBLING.to_string(), ALL.to_string()),
        ];
        edges.extend(kept_edges);
        edges.extend(pruned_edges);
        Hierarchy { kept, pruned, edges }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn extraction_keeps_exactly_the_root_lineage(h in arb_hierarchy()) {
        let onto = h.ontology();
        prop_assert_eq!(onto.len(), h.kept.len());
        for id in &h.kept {
            prop_assert!(onto.contains(id));
        }
        for id in &h.pruned {
            prop_assert!(!onto.contains(id));
        }
        prop_assert!(!onto.contains(ALL));
    }

    #[test]
    fn depth_is_one_more_than_shallowest_parent(h in arb_hierarchy()) {
        let onto = h.ontology();
        prop_assert_eq!(onto.depth(ROOT), Ok(0));
        for id in onto.iter() {
            let depth = onto.depth(id).expect("connected");
            prop_assert_eq!(onto.depths().get(id).copied(), Some(depth));
            if id != ROOT {
                let shallowest = onto
                    .parents(id, false)
                    .expect("parents")
                    .iter()
                    .map(|p| onto.depth(p).expect("parent depth"))
                    .min()
                    .expect("non-root has a parent");
                prop_assert_eq!(depth, shallowest + 1);
                prop_assert_eq!(onto.distance(id, ROOT, false), Ok(depth));
            }
        }
    }

    #[test]
    fn include_self_is_a_union_with_self(h in arb_hierarchy()) {
        let onto = h.ontology();
        for id in onto.iter() {
            let me = BTreeSet::from([id.to_string()]);
            let lists = [
                (onto.children(id, true), onto.children(id, false)),
                (onto.parents(id, true), onto.parents(id, false)),
                (onto.descendants(id, true), onto.descendants(id, false)),
                (onto.ancestors(id, true), onto.ancestors(id, false)),
            ];
            for (with, without) in lists {
                let expected: BTreeSet<String> = without.expect("without").union(&me).cloned().collect();
                prop_assert_eq!(with.expect("with"), expected);
            }
        }
    }

    #[test]
    fn descendants_and_ancestors_are_inverse(h in arb_hierarchy()) {
        let onto = h.ontology();
        let ids: Vec<&str> = onto.iter().collect();
        for n in &ids {
            let below = onto.descendants(n, false).expect("descendants");
            for m in &ids {
                let above_m = onto.ancestors(m, false).expect("ancestors");
                prop_assert_eq!(below.contains(*m), above_m.contains(*n));
            }
        }
    }

    #[test]
    fn matrix_is_symmetric_and_worker_invariant(h in arb_hierarchy(), workers in 2usize..6) {
        let onto = h.ontology();
        let single = onto.distance_matrix(1).expect("single worker");
        let parallel = onto.distance_matrix(workers).expect("parallel");
        prop_assert_eq!(&single, &parallel);

        let n = single.size();
        for i in 0..n {
            prop_assert_eq!(single.get(i, i), Some(0));
            for j in 0..n {
                prop_assert_eq!(single.get(i, j), single.get(j, i));
            }
        }
    }

    #[test]
    fn matrix_cells_match_pairwise_distance(h in arb_hierarchy()) {
        let onto = h.ontology();
        let m = onto.distance_matrix(0).expect("matrix");
        for (i, a) in onto.iter().enumerate() {
            for (j, b) in onto.iter().enumerate() {
                let d = onto.distance(a, b, true).expect("connected");
                prop_assert_eq!(m.get(i, j).map(usize::from), Some(d));
            }
        }
    }
}
