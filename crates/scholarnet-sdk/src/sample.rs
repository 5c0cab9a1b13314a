//! Sample academic graph for demos, tests and benchmarks
//!
//! Shaped like a faculty/publication/keyword export: most faculty use the
//! `FACULTY`/`PUBLISH`/`PUBLICATION` spellings, one uses the alternates
//! (`Faculty`, `AUTHORED`, `Publication`, `TAGGED_BY`), some publications lack
//! a citation count and some keyword edges lack a score.

use scholarnet::graph::{GraphResult, GraphStore, NodeId};
use scholarnet::PropertyValue;

struct Builder {
    store: GraphStore,
}

impl Builder {
    fn node(&mut self, label: &str, props: &[(&str, PropertyValue)]) -> NodeId {
        let id = self.store.create_node(label);
        if let Some(node) = self.store.get_node_mut(id) {
            for (key, value) in props {
                node.set_property(*key, value.clone());
            }
        }
        id
    }

    fn faculty(&mut self, label: &str, name: &str, department: &str) -> NodeId {
        self.node(label, &[("name", name.into()), ("department", department.into())])
    }

    fn publication(&mut self, label: &str, title: &str, year: i64, citations: Option<i64>) -> NodeId {
        let mut props = vec![("title", PropertyValue::from(title)), ("year", year.into())];
        if let Some(c) = citations {
            props.push(("numCitations", c.into()));
        }
        self.node(label, &props)
    }

    fn link(&mut self, source: NodeId, target: NodeId, edge_type: &str, score: Option<f64>) -> GraphResult<()> {
        let edge = self.store.create_edge(source, target, edge_type)?;
        if let (Some(score), Some(e)) = (score, self.store.get_edge_mut(edge)) {
            e.set_property("score", score);
        }
        Ok(())
    }
}

/// Build the sample graph
pub fn academic_graph() -> GraphResult<GraphStore> {
    let mut b = Builder { store: GraphStore::new() };

    let keywords: Vec<NodeId> = [
        "graph databases",
        "machine learning",
        "information retrieval",
        "knowledge graphs",
        "natural language processing",
        "data mining",
        "recommender systems",
    ]
    .iter()
    .map(|name| b.node("KEYWORD", &[("name", (*name).into())]))
    .collect();

    let jane = b.faculty("FACULTY", "Jane Doe", "Computer Science");
    let janet = b.faculty("FACULTY", "Janet Doeson", "Information Science");
    b.faculty("FACULTY", "Alice Smith", "Mathematics");
    b.faculty("FACULTY", "Bob Jones", "Statistics");
    // Listed without publications: resolves, but has an empty neighborhood
    b.faculty("FACULTY", "Ravi Kumar", "Physics");
    let alicia = b.faculty("Faculty", "Alicia Keys", "Music Informatics");

    let jane_papers: [(&str, i64, Option<i64>); 8] = [
        ("Scalable Property Graph Storage", 2019, Some(120)),
        ("Learning to Rank Citations", 2020, Some(45)),
        ("A Note on Graph Query Planning", 2021, None),
        ("Knowledge Graph Embeddings at Scale", 2018, Some(300)),
        ("Workshop Report on Graph Analytics", 2022, Some(12)),
        ("Entity Resolution in Bibliographic Data", 2017, Some(87)),
        ("Poster: Keyword Extraction for Theses", 2023, Some(5)),
        ("Neural Retrieval over Scholarly Graphs", 2021, Some(210)),
    ];
    for (i, (title, year, citations)) in jane_papers.iter().enumerate() {
        let paper = b.publication("PUBLICATION", title, *year, *citations);
        b.link(jane, paper, "PUBLISH", None)?;
        for k in 0..4 {
            let keyword = keywords[(i + k) % keywords.len()];
            // every third edge carries no score
            let score = if (i + k) % 3 == 2 { None } else { Some(0.95 - 0.2 * k as f64) };
            b.link(paper, keyword, "LABEL_BY", score)?;
        }
    }

    for (title, year, citations) in [("Citation Graphs of Small Fields", 2016, Some(33)), ("Doeson Indexing Revisited", 2020, Some(8))] {
        let paper = b.publication("PUBLICATION", title, year, citations);
        b.link(janet, paper, "PUBLISH", None)?;
        b.link(paper, keywords[2], "LABEL_BY", Some(0.8))?;
    }

    let song = b.publication("Publication", "Structure in Popular Song Lyrics", 2015, Some(64));
    b.link(alicia, song, "AUTHORED", None)?;
    b.link(song, keywords[4], "TAGGED_BY", Some(0.7))?;
    b.link(song, keywords[5], "TAGGED_BY", None)?;

    Ok(b.store)
}
