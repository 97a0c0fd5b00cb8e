use tokio::sync::oneshot;

use super::common::{builder, engine};
use crate::{CompletionEngine, EngineConfig};

fn labels(items: &[crate::CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

#[tokio::test]
async fn test_request_publishes_snapshot() {
    let (engine, scope) = engine(EngineConfig::default());
    assert_eq!(engine.generation(), 0);
    assert!(engine.current().is_none());

    let snapshot = engine
        .complete("Vector3.", scope)
        .await
        .expect("task")
        .expect("published");

    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.input, "Vector3.");
    assert_eq!(labels(&snapshot.items), ["one", "zero"]);
    assert_eq!(snapshot.evaluation.path.len(), 2);
    assert_eq!(snapshot.tree.len(), 2);
    assert_eq!(engine.current(), Some(snapshot));
}

#[tokio::test]
async fn test_superseded_request_is_never_published() {
    let (engine, scope) = engine(EngineConfig::default());

    let first = engine.request("Vec", scope.clone());
    let second = engine.request("Vector3.", scope);
    assert_eq!(engine.generation(), 2);

    assert_eq!(first.await.expect("task"), None);
    let published = second.await.expect("task").expect("published");
    assert_eq!(published.generation, 2);
    assert_eq!(
        engine.current().map(|snapshot| snapshot.generation),
        Some(2)
    );
}

#[tokio::test]
async fn test_result_finished_after_newer_request_is_discarded() {
    let (engine, scope) = engine(EngineConfig::default());
    let (tx, rx) = oneshot::channel();
    let newer = engine.clone();
    let newer_scope = scope.clone();
    engine.set_before_publish(move || {
        let _ = tx.send(newer.request("Mathf.M", newer_scope));
    });

    let stale = engine.request("Mathf.", scope);
    assert_eq!(stale.await.expect("task"), None);
    assert_eq!(engine.generation(), 2);

    let fresh = rx.await.expect("newer request dispatched before publishing");
    let published = fresh.await.expect("task").expect("published");
    assert_eq!(published.generation, 2);
    assert_eq!(labels(&published.items), ["Max", "Min"]);
    assert_eq!(
        engine.current().map(|snapshot| snapshot.generation),
        Some(2)
    );
}

#[tokio::test]
async fn test_cancel_superseded() {
    let config = EngineConfig {
        cancel_superseded: true,
        ..EngineConfig::default()
    };
    let (engine, scope) = engine(config);

    let first = engine.request("Mathf.", scope.clone());
    let second = engine.request("Mathf.M", scope);

    assert_eq!(first.await.expect("task"), None);
    let published = second.await.expect("task").expect("published");
    assert_eq!(labels(&published.items), ["Max", "Min"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_last_request_wins_under_load() {
    let (engine, scope) = engine(EngineConfig::default());

    let inputs = ["V", "Ve", "Vec", "Vect", "Vecto", "Vector", "Vector3", "Vector3."];
    let handles: Vec<_> = inputs
        .iter()
        .map(|input| engine.request(*input, scope.clone()))
        .collect();

    let mut published = Vec::new();
    for handle in handles {
        if let Some(snapshot) = handle.await.expect("task") {
            published.push(snapshot.generation);
        }
    }

    let last = inputs.len() as u64;
    assert_eq!(published.last(), Some(&last));
    assert!(published.windows(2).all(|pair| pair[0] < pair[1]));
    let current = engine.current().expect("current");
    assert_eq!(current.generation, last);
    assert_eq!(current.input, "Vector3.");
}

#[tokio::test]
async fn test_request_with_callback() {
    let (engine, scope) = engine(EngineConfig::default());
    let (tx, rx) = oneshot::channel();

    engine
        .request_with("Mathf.M", scope, move |snapshot| {
            let _ = tx.send(snapshot);
        })
        .await
        .expect("task");

    let snapshot = rx.await.expect("callback ran");
    assert_eq!(labels(&snapshot.items), ["Max", "Min"]);
}

#[tokio::test]
async fn test_callback_skipped_for_superseded_request() {
    let (engine, scope) = engine(EngineConfig::default());
    let (tx, rx) = oneshot::channel::<()>();

    let stale = engine.request_with("Mathf.", scope.clone(), move |_| {
        let _ = tx.send(());
    });
    let fresh = engine.request("Mathf.M", scope);

    stale.await.expect("task");
    assert!(rx.await.is_err());
    assert!(fresh.await.expect("task").is_some());
}

#[tokio::test]
async fn test_deeply_nested_input_publishes() {
    let (engine, scope) = engine(EngineConfig::default());
    let input = "Mathf.Max(".repeat(10_000);

    let snapshot = engine
        .complete(input, scope)
        .await
        .expect("task")
        .expect("published");
    assert_eq!(snapshot.tree.len(), 3);
    assert!(snapshot.tree[2].parameter_args.is_some());
}

#[tokio::test]
async fn test_max_items() {
    let config = EngineConfig {
        max_items: Some(1),
        ..EngineConfig::default()
    };
    let (engine, scope) = engine(config);

    let snapshot = engine
        .complete("Mathf.", scope)
        .await
        .expect("task")
        .expect("published");
    assert_eq!(labels(&snapshot.items), ["Max"]);
    assert_eq!(snapshot.evaluation.completions.len(), 2);
}

#[tokio::test]
async fn test_build_catalogue_on_blocking_pool() {
    let engine = CompletionEngine::build(builder(), EngineConfig::default())
        .await
        .expect("catalogue");
    assert!(engine.catalogue().find_type("UnityEngine.Mathf").is_some());
    assert_eq!(engine.config(), &EngineConfig::default());
}
