//! Whole-sentence tests for preverb-core

use preverb_core::*;

const HEADER: [&str; 4] = ["form", "lemma", "xpostag", "anas"];
const STATE: usize = 4;
const ID: usize = 5;
const OFFSET: usize = 6;

fn row(form: &str, lemma: &str, tag: &str) -> Vec<String> {
    let anas = format!(r#"[{{"lemma": "{lemma}", "tag": "{tag}", "readable": "{lemma}{tag}"}}]"#);
    vec![form.to_string(), lemma.to_string(), tag.to_string(), anas]
}

fn engine() -> PreverbEngine {
    PreverbEngine::new(&HEADER, EngineConfig::default()).unwrap()
}

fn links(rows: &[Vec<String>]) -> Vec<(&str, &str, &str)> {
    rows.iter()
        .map(|r| (r[STATE].as_str(), r[ID].as_str(), r[OFFSET].as_str()))
        .collect()
}

#[test]
fn test_adjacent_preverb() {
    let rows = engine()
        .process_sentence(vec![
            row("szét", "szét", "[/Prev]"),
            row("szerelni", "szerel", "[/V][Inf]"),
        ])
        .unwrap();

    assert_eq!(links(&rows), vec![("conn", "1", "-1"), ("sep", "1", "1")]);
    assert_eq!(rows[0][1], "");
    assert_eq!(rows[1][1], "szétszerel");
    assert_eq!(rows[1][2], "[/Prev][/V][Inf]");
}

#[test]
fn test_preverb_before_auxiliary() {
    let rows = engine()
        .process_sentence(vec![
            row("szét", "szét", "[/Prev]"),
            row("kell", "kell", "[/V][Prs.NDef.3Sg]"),
            row("szerelni", "szerel", "[/V][Inf]"),
        ])
        .unwrap();

    assert_eq!(
        links(&rows),
        vec![("conn", "1", "-2"), ("", "", ""), ("sep", "1", "2")]
    );
    assert_eq!(rows[1][1], "kell");
    assert_eq!(rows[2][1], "szétszerel");
}

#[test]
fn test_preverb_after_volna() {
    let rows = engine()
        .process_sentence(vec![
            row("rágta", "rág", "[/V][Pst.Def.3Sg]"),
            row("volna", "van", "[/V][Cond.NDef.3Sg]"),
            row("szét", "szét", "[/Prev]"),
        ])
        .unwrap();

    assert_eq!(
        links(&rows),
        vec![("sep", "1", "-2"), ("", "", ""), ("conn", "1", "2")]
    );
    assert_eq!(rows[0][1], "szétrág");
}

#[test]
fn test_preverb_without_verb() {
    let rows = engine()
        .process_sentence(vec![
            row("szét", "szét", "[/Prev]"),
            row("a", "a", "[/Det|Art.Def]"),
            row("ház", "ház", "[/N][Nom]"),
        ])
        .unwrap();

    assert!(links(&rows).iter().all(|l| *l == ("", "", "")));
    assert_eq!(rows[0][1], "szét");
}

#[test]
fn test_closer_verb_takes_the_preverb() {
    let mut engine = engine();
    let tokens = vec![
        row("rágja", "rág", "[/V][Prs.Def.3Sg]"),
        row("hirtelen", "hirtelen", "[/Adv]"),
        row("szét", "szét", "[/Prev]"),
        row("szerelni", "szerel", "[/V][Inf]"),
    ];
    let (rows, report) = engine.process_sentence_with_report(tokens).unwrap();

    assert_eq!(
        links(&rows),
        vec![
            ("", "", ""),
            ("", "", ""),
            ("conn", "2", "-1"),
            ("sep", "2", "1"),
        ]
    );
    assert_eq!(rows[0][1], "rág");
    assert_eq!(rows[0][2], "[/V][Prs.Def.3Sg]");
    assert_eq!(rows[3][1], "szétszerel");

    assert_eq!(report.bindings, 2);
    assert_eq!(report.reassigned, 1);
    assert_eq!(report.reconcile.linked, 1);
    assert_eq!(report.reconcile.demoted, 1);
}

#[test]
fn test_already_prefixed_verb() {
    let anas = r#"[{"lemma": "megnéz", "tag": "[/V][Pst.Def.3Sg]", "readable": "meg[/Prev]=meg+néz[/V]=néz+te[Pst.Def.3Sg]"}]"#;
    let rows = engine()
        .process_sentence(vec![vec![
            "megnézte".to_string(),
            "megnéz".to_string(),
            "[/V][Pst.Def.3Sg]".to_string(),
            anas.to_string(),
        ]])
        .unwrap();

    assert_eq!(links(&rows), vec![("pfx", "", "")]);
    assert_eq!(rows[0][2], "[/Prev][/V][Pst.Def.3Sg]");
}

#[test]
fn test_link_ids_are_document_wide() {
    let mut engine = engine();
    let sentence = || {
        vec![
            row("meg", "meg", "[/Prev]"),
            row("nézni", "néz", "[/V][Inf]"),
        ]
    };

    let ids: Vec<String> = (0..3)
        .map(|_| engine.process_sentence(sentence()).unwrap()[1][ID].clone())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(engine.links().peek(), 4);
}

#[test]
fn test_processing_is_deterministic() {
    let sentence = || {
        vec![
            row("rágja", "rág", "[/V][Prs.Def.3Sg]"),
            row("hirtelen", "hirtelen", "[/Adv]"),
            row("szét", "szét", "[/Prev]"),
            row("szerelni", "szerel", "[/V][Inf]"),
            row("és", "és", "[/Cnj]"),
            row("meg", "meg", "[/Prev]"),
            row("nézni", "néz", "[/V][Inf]"),
        ]
    };

    let first = engine().process_sentence(sentence()).unwrap();
    let second = engine().process_sentence(sentence()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_row_rejects_sentence() {
    let mut engine = engine();
    let result = engine.process_sentence(vec![
        row("szét", "szét", "[/Prev]"),
        vec!["szerelni".to_string(), "szerel".to_string()],
    ]);

    match result {
        Err(EngineError::Schema(SchemaError::FieldCount { expected, found })) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 2);
        }
        other => panic!("Expected FieldCount error, got {other:?}"),
    }
    assert_eq!(engine.links().peek(), 1);
}

#[test]
fn test_existing_target_columns_are_reused() {
    let header = ["form", "prev", "lemma", "xpostag", "anas", "compound"];
    let mut engine = PreverbEngine::new(&header, EngineConfig::default()).unwrap();
    assert_eq!(engine.output_header().len(), 8);

    let full = |form: &str, lemma: &str, tag: &str| {
        let mut r = row(form, lemma, tag);
        r.insert(1, String::new());
        r.push(lemma.to_string());
        r
    };
    let rows = engine
        .process_sentence(vec![
            full("szét", "szét", "[/Prev]"),
            full("szerelni", "szerel", "[/V][Inf]"),
        ])
        .unwrap();

    assert_eq!(rows[1][1], "sep");
    assert_eq!(rows[1][5], "szét#szerel");
    assert_eq!(rows[1][6], "1");
    assert_eq!(rows[1][7], "1");
}

#[test]
fn test_basic_revision_ignores_infinitive_patterns() {
    // szét akarta ám szedni: only the radius-3 table reaches back this far
    let sentence = || {
        vec![
            row("szét", "szét", "[/Prev]"),
            row("akarta", "akar", "[/V][Pst.Def.3Sg]"),
            row("ám", "ám", "[/Cnj]"),
            row("szedni", "szed", "[/V][Inf]"),
        ]
    };

    let extended = engine().process_sentence(sentence()).unwrap();
    assert_eq!(extended[3][STATE], "sep");
    assert_eq!(extended[3][OFFSET], "3");
    assert_eq!(extended[3][1], "szétszed");

    let mut basic = PreverbEngine::new(&HEADER, EngineConfig::basic()).unwrap();
    let rows = basic.process_sentence(sentence()).unwrap();
    assert_eq!(rows[3][STATE], "");
}

#[test]
fn test_empty_sentence() {
    let rows = engine().process_sentence(Vec::new()).unwrap();
    assert!(rows.is_empty());
}
