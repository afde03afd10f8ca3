use rs_autoscrape::analyzer::analyze;
use rs_autoscrape::dom::{self, direct_texts, tokenize, Selection};
use rs_autoscrape::path::escape_class;
use rs_autoscrape::{TagDescriptor, TreePath};

const TRICKY: &str = r#"<html><body>
    <div class="2col md:flex grid">
        <section class="a>b">
            <p class="lead">first</p>
            <p class="lead">second</p>
            <p class="lead x<y">third</p>
        </section>
        <img src="/hero.png">
        <img src="/side.png">
    </div>
</body></html>"#;

#[test]
fn escaping_is_byte_exact() {
    assert_eq!(escape_class("md:flex"), r"md\:flex");
    assert_eq!(escape_class("a>b"), r"a\>b");
    assert_eq!(escape_class("x<y"), r"x\<y");
    assert_eq!(escape_class("2col"), r"\32 col");
    assert_eq!(escape_class("col2"), "col2");
}

#[test]
fn stringification_is_deterministic() {
    let path = TreePath::from(vec![
        TagDescriptor::new("body", vec![], vec![]),
        TagDescriptor::new("div", vec!["2col".to_string(), "md:flex".to_string()], vec![]),
        TagDescriptor::new("li", vec![], vec!["nth-child(3)".to_string()]),
    ]);
    let expected = r"body > div.\32 col.md\:flex > li:nth-child(3)";
    assert_eq!(path.to_string(), expected);
    assert_eq!(path.clone().to_string(), expected);
}

#[test]
fn every_discovered_path_selects_its_own_node() {
    let doc = dom::parse(TRICKY);
    let locations = analyze(tokenize(TRICKY).expect("tokens"));
    assert_eq!(locations.len(), 5);

    for loc in &locations {
        let selector = loc.path.to_string();
        let matcher = dom::matcher(&selector).expect("selector compiles");
        let selection = doc.select_matcher(&matcher);
        let Some(node) = selection.nodes().first() else {
            panic!("{selector} matched nothing");
        };
        let element = Selection::from(*node);

        let value = match &loc.attribute {
            Some(attr) => element.attr(attr).map(|v| v.to_string()).unwrap_or_default(),
            None => direct_texts(&element)
                .get(loc.text_index)
                .cloned()
                .unwrap_or_default(),
        };
        assert_eq!(value, loc.examples[0], "value at {selector}");
    }
}

#[test]
fn repeated_siblings_are_told_apart() {
    let locations = analyze(tokenize(TRICKY).expect("tokens"));
    let paths: Vec<String> = locations.iter().map(|l| l.path.to_string()).collect();

    assert!(paths.iter().any(|p| p.ends_with(r"section.a\>b > p.lead")));
    assert!(paths.iter().any(|p| p.ends_with(r"section.a\>b > p.lead:nth-child(2)")));
    // A different class set is a different sibling kind.
    assert!(paths.iter().any(|p| p.ends_with(r"section.a\>b > p.lead.x\<y")));
    assert!(paths.iter().any(|p| p.ends_with("img:nth-child(3)")));
}

#[test]
fn levenshtein_distance_over_strings() {
    let a = TreePath::from(vec![
        TagDescriptor::new("body", vec![], vec![]),
        TagDescriptor::new("ul", vec![], vec![]),
    ]);
    let b = TreePath::from(vec![
        TagDescriptor::new("body", vec![], vec![]),
        TagDescriptor::new("ol", vec![], vec![]),
    ]);
    assert_eq!(a.distance(&a), 0);
    assert_eq!(a.distance(&b), 1);
    assert_eq!(b.distance(&a), 1);
}
