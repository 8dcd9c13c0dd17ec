// tests/persona_test.rs — Integration test: config → context documents → briefs

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use prophet::core::composer::PromptComposer;
use prophet::infra::config::{Config, PersonaConfig};
use prophet::infra::errors::ProphetError;
use prophet::persona::brief::{SECTION_JOURNAL, SECTION_ROSTER, SECTION_RULES};
use prophet::persona::{load_context, PersonaBrief};

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn bundled_persona() -> PersonaConfig {
    PersonaConfig {
        context_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("persona"),
        ..Default::default()
    }
}

#[test]
fn test_bundled_persona_loads() {
    let ctx = load_context(&bundled_persona()).unwrap();
    assert_eq!(
        ctx.roster_summary(),
        "Party roster: Jabari (Lv 5), Oksana Aleksandrovna (Lv 5), Orpheus Belcourt (Lv 5), \
         Stella Belcourt (Lv 5), Umniy Sobaka (Lv ?)"
    );
    assert!(ctx.journal.contains("Roslar's Coffer"));
    assert!(ctx.rules.contains("dying"));
}

#[test]
fn test_bundled_brief_sections_in_order() {
    let brief = PersonaBrief::from_config(&bundled_persona()).unwrap();
    for text in [brief.responder(), brief.evaluator()] {
        let roster = text.find(SECTION_ROSTER).unwrap();
        let journal = text.find(SECTION_JOURNAL).unwrap();
        let rules = text.find(SECTION_RULES).unwrap();
        assert!(roster < journal && journal < rules);
    }
    assert!(brief.responder().contains("Bombaclot Prophet"));
    assert!(brief.evaluator().contains("is_acceptable"));
}

#[test]
fn test_config_file_drives_persona() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ctx/hero.json", r#"{"name": "Hero", "system": {"details": {"level": {"value": 2}}}}"#);
    write(dir.path(), "ctx/log.txt", "The log.");
    write(dir.path(), "ctx/rules.txt", "The rules.");
    write(dir.path(), "rubric.md", "You are a grumpy oracle.");

    let config_path = dir.path().join("config.toml");
    let ctx_dir = dir.path().join("ctx");
    let rubric = dir.path().join("rubric.md");
    std::fs::write(
        &config_path,
        format!(
            r#"
[persona]
context_dir = {:?}
actors = ["hero.json"]
journals = ["log.txt"]
rules = "rules.txt"
rubric = {:?}

[trigger]
phrase = "oracle"
directive = "Answer in riddles."
"#,
            ctx_dir.display().to_string(),
            rubric.display().to_string(),
        ),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    let brief = PersonaBrief::from_config(&config.persona).unwrap();

    assert!(brief.responder().starts_with("You are a grumpy oracle."));
    assert!(brief.responder().contains("Party roster: Hero (Lv 2)"));
    assert!(brief.responder().contains("The log."));
    // The evaluator keeps its built-in rubric.
    assert!(!brief.evaluator().starts_with("You are a grumpy oracle."));

    let composer = PromptComposer::new(brief.into(), config.trigger.to_trigger());
    assert!(composer.compose("Dear ORACLE, speak").ends_with("Answer in riddles."));
    assert!(!composer.compose("patent?").contains("Answer in riddles."));
}

#[test]
fn test_missing_document_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "rules.txt", "rules");
    let config = PersonaConfig {
        context_dir: dir.path().to_path_buf(),
        actors: vec![],
        journals: vec![PathBuf::from("missing.txt")],
        rules: PathBuf::from("rules.txt"),
        rubric: None,
        evaluator_rubric: None,
    };

    let err = PersonaBrief::from_config(&config).unwrap_err();
    assert!(err.is_startup());
    match err {
        ProphetError::Context { path, .. } => assert!(path.ends_with("missing.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_actor_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.json", "{ not json");
    write(dir.path(), "rules.txt", "rules");
    let config = PersonaConfig {
        context_dir: dir.path().to_path_buf(),
        actors: vec![PathBuf::from("bad.json")],
        journals: vec![],
        rules: PathBuf::from("rules.txt"),
        rubric: None,
        evaluator_rubric: None,
    };

    assert!(matches!(
        load_context(&config),
        Err(ProphetError::Context { .. })
    ));
}

#[test]
fn test_empty_documents_are_valid() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "empty.txt", "");
    write(dir.path(), "rules.txt", "");
    let config = PersonaConfig {
        context_dir: dir.path().to_path_buf(),
        actors: vec![],
        journals: vec![PathBuf::from("empty.txt")],
        rules: PathBuf::from("rules.txt"),
        rubric: None,
        evaluator_rubric: None,
    };

    let brief = PersonaBrief::from_config(&config).unwrap();
    assert!(brief.responder().contains(SECTION_RULES));
}
