//! End-to-end turn pipeline tests over the public API

use std::sync::Arc;

use relay_core::{
    EngineError, ExecutionArtifact, FileSessionStore, Gate, GateError, MockReasoner, NoOpLogger,
    Orchestrator, Permission, RuleRouter, Session, SessionStore, SkillRegistry, TargetType,
};

fn engine(reasoner: MockReasoner, gate: Gate) -> Orchestrator {
    Orchestrator::new(Box::new(reasoner), gate, Arc::new(NoOpLogger))
}

#[tokio::test]
async fn routed_tool_turn_produces_portable_artifact() {
    let engine = engine(MockReasoner::fixed("done"), Gate::deny_all());

    let artifact = engine.run_turn("repeat this line", None).await.unwrap();

    let decision = artifact.decision.as_ref().unwrap();
    assert_eq!(decision.target.as_deref(), Some("echo"));
    assert_eq!(decision.target_type, TargetType::Tool);
    assert_eq!(decision.confidence, 1.0);

    let result = artifact.tool_result.as_ref().unwrap();
    assert_eq!(result.tool_name, "echo");
    assert_eq!(
        result.metadata["checked_permissions"],
        serde_json::json!([])
    );

    // The artifact survives a JSON round trip with every field intact
    let json = artifact.to_json().unwrap();
    let loaded = ExecutionArtifact::from_json(&json).unwrap();
    assert_eq!(loaded.id, artifact.id);
    assert_eq!(loaded.decision.unwrap().target.as_deref(), Some("echo"));
    assert_eq!(loaded.response.content, "done");
}

#[tokio::test]
async fn denied_turn_names_missing_permissions() {
    let engine = engine(MockReasoner::fixed("never"), Gate::deny_all())
        .with_router(RuleRouter::with_threshold(0.1));

    let err = engine
        .run_turn("read the file at notes.txt", None)
        .await
        .unwrap_err();

    let EngineError::PermissionDenied(GateError::PermissionDenied { action, missing }) = err
    else {
        panic!("expected a permission denial");
    };
    assert_eq!(action, "read-file");
    assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec![Permission::FilesystemRead]);
}

#[tokio::test]
async fn skill_turn_injects_instructions_and_records_name() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("triage");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(
        dir.join("SKILL.md"),
        "---\nname: triage\ndescription: Triage bug reports\nhints:\n  - triage this bug\n---\n\nAsk for reproduction steps first.\n",
    )
    .unwrap();

    let engine = engine(MockReasoner::fixed("triaged"), Gate::deny_all())
        .with_skills(SkillRegistry::discover(root.path(), &NoOpLogger))
        .with_router(RuleRouter::with_threshold(0.1));

    let artifact = engine
        .run_turn("triage this bug for me", None)
        .await
        .unwrap();

    assert_eq!(artifact.skill.as_deref(), Some("triage"));
    assert_eq!(
        artifact.decision.unwrap().target_type,
        TargetType::Skill
    );
    assert!(artifact.tool_result.is_none());
}

#[tokio::test]
async fn conversational_turns_persist_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());
    let engine = engine(MockReasoner::fixed("reply"), Gate::deny_all());

    let mut session = Session::new();
    engine
        .run_turn("what's the plan", Some(&mut session))
        .await
        .unwrap();
    store.save(&session, "demo").unwrap();

    // Resume from disk and keep going
    let mut resumed = store.load("demo").unwrap();
    assert_eq!(resumed.id, session.id);
    assert_eq!(resumed.len(), 2);

    engine
        .run_turn("and after that?", Some(&mut resumed))
        .await
        .unwrap();
    assert_eq!(resumed.len(), 4);
    assert_eq!(resumed.messages[2].content, "and after that?");
}

#[tokio::test]
async fn fallback_turn_is_visibly_distinct() {
    let engine = engine(MockReasoner::fixed("plain answer"), Gate::deny_all());

    let artifact = engine
        .run_turn("tell me about rust lifetimes", None)
        .await
        .unwrap();

    let decision = artifact.decision.unwrap();
    assert_eq!(decision.target_type, TargetType::Fallback);
    assert!(decision.target.is_none());
    assert!(artifact.tool_result.is_none());
    assert_eq!(artifact.response.content, "plain answer");
}
