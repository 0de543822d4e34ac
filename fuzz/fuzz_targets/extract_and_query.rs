#![no_main]

use hpo_graph_core::Ontology;
use hpo_graph_core::graph::RawOntology;
use libfuzzer_sys::fuzz_target;

// Each byte pair is a (child, parent) edge over a 32-term alphabet; term 0
// is the sentinel and term 1 the root.
fuzz_target!(|data: &[u8]| {
    let names: Vec<String> = (0..32).map(|i| format!("T{i}")).collect();
    let mut raw = RawOntology::new();
    raw.add_is_a(&names[1], &names[0]);
    for pair in data.chunks_exact(2) {
        let child = usize::from(pair[0] % 32);
        let parent = usize::from(pair[1] % 32);
        raw.add_is_a(&names[child], &names[parent]);
    }

    let Ok(onto) = Ontology::new(raw, &names[1], &names[0]) else {
        return;
    };
    for id in onto.iter() {
        let _ = onto.depth(id);
        let _ = onto.ancestors(id, true);
        let _ = onto.descendants(id, false);
    }
    if let Ok(m) = onto.distance_matrix(2) {
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), Some(0));
        }
    }
});
