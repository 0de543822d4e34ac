#![no_main]

use hpo_graph_core::obo::parse_obo_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let doc = parse_obo_str(text, true);
        assert!(doc.names.len() <= doc.ontology.node_count());
        let _ = doc.ontology.content_hash();
    }
});
