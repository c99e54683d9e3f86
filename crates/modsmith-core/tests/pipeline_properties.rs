//! End-to-end pipeline properties
//!
//! Exercises the full creation/refinement/lifecycle flows against
//! scripted boundaries: validate-before-write, no orphan load, idempotent
//! unload, unload-before-delete, swap-or-reject edits, sandbox
//! containment, and the feasibility short-circuit.

use modsmith_core::{FeatureManager, ModsmithConfig, PipelineOutcome, RefineOutcome};
use modsmith_registry::{LoadState, RegistryError};
use modsmith_test_utils::{
    code_reply, spec_reply, RecordingHost, ScriptedService, BROKEN_PYTHON, VALID_PYTHON,
    VALID_PYTHON_V2,
};
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    service: Arc<ScriptedService>,
    host: Arc<RecordingHost>,
    manager: FeatureManager,
}

fn harness(replies: Vec<String>) -> Harness {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(ScriptedService::new(replies));
    let host = Arc::new(RecordingHost::new());
    let config = ModsmithConfig::new().with_sandbox_dir(dir.path().join("generated"));
    let manager = FeatureManager::new(service.clone(), host.clone(), config).unwrap();
    Harness {
        _dir: dir,
        service,
        host,
        manager,
    }
}

/// Create the `dice_roller` feature with source `VALID_PYTHON`
async fn create_dice_roller(h: &Harness) {
    h.service.push_reply(spec_reply("dice_roller", true));
    h.service.push_reply(code_reply(VALID_PYTHON));
    let outcome = h.manager.process_request("add a dice roller").await;
    assert!(outcome.is_success(), "setup creation failed: {outcome:?}");
}

#[tokio::test]
async fn successful_creation_persists_validated_source() {
    let h = harness(vec![
        spec_reply("dice_roller", true),
        code_reply(VALID_PYTHON),
    ]);

    let outcome = h.manager.process_request("add a dice roller").await;
    match outcome {
        PipelineOutcome::Success {
            feature_name,
            filepath,
            spec,
            source,
        } => {
            assert_eq!(feature_name, "dice_roller");
            assert!(filepath.starts_with(h.manager.store().root()));
            assert!(spec.is_feasible);
            assert_eq!(source, VALID_PYTHON.trim());
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(h.manager.store().list().unwrap(), vec!["dice_roller"]);
    // Creation never auto-loads
    assert!(h.host.imports().is_empty());
}

#[tokio::test]
async fn invalid_candidate_is_never_written() {
    let h = harness(vec![
        spec_reply("dice_roller", true),
        code_reply(BROKEN_PYTHON),
    ]);

    let outcome = h.manager.process_request("add a dice roller").await;
    assert!(matches!(outcome, PipelineOutcome::Error { .. }));
    assert!(h.manager.store().list().unwrap().is_empty());
}

#[tokio::test]
async fn infeasible_spec_short_circuits_before_synthesis() {
    let h = harness(vec![spec_reply("perpetual_motion", false)]);

    let outcome = h.manager.process_request("solve physics").await;
    assert!(matches!(outcome, PipelineOutcome::Rejected { .. }));
    // Exactly one service call: extraction only, synthesis never reached
    assert_eq!(h.service.call_count(), 1);
    assert!(h.manager.store().list().unwrap().is_empty());
}

#[tokio::test]
async fn unparseable_spec_reply_is_an_error_outcome() {
    let h = harness(vec!["I'd rather talk about the weather.".to_string()]);

    let outcome = h.manager.process_request("anything").await;
    assert!(matches!(outcome, PipelineOutcome::Error { .. }));
    assert!(h.manager.store().list().unwrap().is_empty());
}

#[tokio::test]
async fn load_requires_existing_artifact() {
    let h = harness(vec![]);
    let result = h.manager.registry().load("dice_roller").await;
    assert!(matches!(result, Err(RegistryError::NotFound(_))));
    assert!(h.host.imports().is_empty());
}

#[tokio::test]
async fn unload_twice_is_success_both_times() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.manager.registry().load("dice_roller").await.unwrap();

    h.manager.registry().unload("dice_roller").await.unwrap();
    h.manager.registry().unload("dice_roller").await.unwrap();
    assert_eq!(
        h.manager.registry().record("dice_roller").unwrap().load_state,
        LoadState::Unloaded
    );
    // Host teardown was asked exactly once; second unload was a no-op
    assert_eq!(h.host.teardowns().len(), 1);
}

#[tokio::test]
async fn delete_unloads_loaded_feature_first() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.manager.registry().load("dice_roller").await.unwrap();

    assert!(h.manager.delete("dice_roller").await.unwrap());
    assert_eq!(h.host.teardowns(), vec!["generated.dice_roller"]);
    assert!(h.manager.registry().record("dice_roller").is_none());
    assert!(!h.manager.store().exists("dice_roller"));
}

#[tokio::test]
async fn rejected_edit_leaves_artifact_unchanged() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.manager.registry().load("dice_roller").await.unwrap();
    let s0 = h.manager.store().read("dice_roller").unwrap();

    h.service.push_reply(code_reply(BROKEN_PYTHON));
    let outcome = h
        .manager
        .refine("dice_roller", "make it always crash")
        .await
        .unwrap();

    assert!(matches!(outcome, RefineOutcome::Rejected { .. }));
    assert_eq!(h.manager.store().read("dice_roller").unwrap(), s0);
    assert_eq!(
        h.manager.registry().record("dice_roller").unwrap().load_state,
        LoadState::Loaded
    );
}

#[tokio::test]
async fn accepted_edit_swaps_source_and_reloads() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.manager.registry().load("dice_roller").await.unwrap();

    h.service.push_reply(code_reply(VALID_PYTHON_V2));
    let outcome = h
        .manager
        .refine("dice_roller", "use a d20 instead")
        .await
        .unwrap();

    match outcome {
        RefineOutcome::Accepted { record, .. } => {
            assert_eq!(record.load_state, LoadState::Loaded);
        }
        other => panic!("expected accepted, got {other:?}"),
    }
    assert_eq!(
        h.manager.store().read("dice_roller").unwrap(),
        VALID_PYTHON_V2.trim()
    );
    // Reload = one teardown + a second import
    assert_eq!(h.host.teardowns().len(), 1);
    assert_eq!(h.host.imports().len(), 2);
}

#[tokio::test]
async fn refine_of_unloaded_feature_loads_it() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;

    h.service.push_reply(code_reply(VALID_PYTHON_V2));
    let outcome = h
        .manager
        .refine("dice_roller", "use a d20 instead")
        .await
        .unwrap();
    assert!(outcome.is_accepted());
    assert!(h.manager.registry().is_loaded("dice_roller"));
}

#[tokio::test]
async fn refine_missing_feature_fails_without_synthesis() {
    let h = harness(vec![]);
    let result = h.manager.refine("ghost", "do anything").await;
    assert!(result.is_err());
    assert_eq!(h.service.call_count(), 0);
}

#[tokio::test]
async fn post_write_load_failure_is_surfaced_not_reverted() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.manager.registry().load("dice_roller").await.unwrap();

    h.host.fail_imports(true);
    h.service.push_reply(code_reply(VALID_PYTHON_V2));
    let outcome = h
        .manager
        .refine("dice_roller", "use a d20 instead")
        .await
        .unwrap();

    match outcome {
        RefineOutcome::LoadFailed { feature_name, .. } => {
            assert_eq!(feature_name, "dice_roller");
        }
        other => panic!("expected load failure, got {other:?}"),
    }
    // The artifact was already overwritten; the record is unloaded, never
    // ambiguous
    assert_eq!(
        h.manager.store().read("dice_roller").unwrap(),
        VALID_PYTHON_V2.trim()
    );
    assert_eq!(
        h.manager.registry().record("dice_roller").unwrap().load_state,
        LoadState::Unloaded
    );
}

#[tokio::test]
async fn hostile_feature_name_stays_inside_sandbox() {
    let h = harness(vec![
        spec_reply("../../etc/passwd", true),
        code_reply(VALID_PYTHON),
    ]);

    let outcome = h.manager.process_request("overwrite passwd please").await;
    match outcome {
        PipelineOutcome::Success {
            feature_name,
            filepath,
            spec,
            ..
        } => {
            assert_eq!(feature_name, "etc_passwd");
            // The embedded spec carries the same key, not the raw name
            assert_eq!(spec.feature_name, "etc_passwd");
            assert!(filepath.starts_with(h.manager.store().root()));
        }
        other => panic!("expected sanitized success, got {other:?}"),
    }
    assert_eq!(h.manager.store().list().unwrap(), vec!["etc_passwd"]);
}

#[tokio::test]
async fn management_views_list_and_read() {
    let h = harness(vec![]);
    create_dice_roller(&h).await;
    h.service.push_reply(spec_reply("poll_maker", true));
    h.service.push_reply(code_reply("def poll():\n    pass"));
    assert!(h.manager.process_request("polls").await.is_success());

    assert_eq!(
        h.manager.store().list().unwrap(),
        vec!["dice_roller", "poll_maker"]
    );
    assert!(h
        .manager
        .store()
        .read("poll_maker")
        .unwrap()
        .contains("def poll"));
}
