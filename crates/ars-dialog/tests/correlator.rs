use ars_dialog::correlator::MessageCorrelator;
use ars_dialog::error::DialogError;

#[tokio::test]
async fn publish_resolves_the_subscriber() {
    let correlator = MessageCorrelator::new();
    let subscription = correlator.subscribe_once("8031234567");
    assert!(correlator.is_waiting("8031234567"));

    assert!(correlator.publish("8031234567", "Q1a What year were you born?".to_string()));
    assert_eq!(
        subscription.recv().await.unwrap(),
        "Q1a What year were you born?"
    );
    assert!(!correlator.is_waiting("8031234567"));
}

#[tokio::test]
async fn publish_without_subscriber_is_dropped() {
    let correlator = MessageCorrelator::<String>::new();
    assert!(!correlator.publish("8031234567", "lost".to_string()));
}

#[tokio::test]
async fn only_the_matching_key_is_resolved() {
    let correlator = MessageCorrelator::new();
    let first = correlator.subscribe_once("8030000001");
    let _second = correlator.subscribe_once("8030000002");

    assert!(correlator.publish("8030000001", 1u32));
    assert_eq!(first.recv().await.unwrap(), 1);
    assert!(correlator.is_waiting("8030000002"));
}

#[tokio::test]
async fn second_subscription_supersedes_the_first() {
    let correlator = MessageCorrelator::new();
    let stale = correlator.subscribe_once("8031234567");
    let fresh = correlator.subscribe_once("8031234567");

    assert!(matches!(
        stale.recv().await,
        Err(DialogError::Superseded { key }) if key == "8031234567"
    ));
    assert!(correlator.publish("8031234567", "next"));
    assert_eq!(fresh.recv().await.unwrap(), "next");
}

#[tokio::test]
async fn cancel_wakes_the_waiter_with_an_error() {
    let correlator = MessageCorrelator::<String>::new();
    let subscription = correlator.subscribe_once("8031234567");
    correlator.cancel("8031234567");

    assert!(matches!(
        subscription.recv().await,
        Err(DialogError::Cancelled { .. })
    ));
    assert!(!correlator.publish("8031234567", "late".to_string()));
}
