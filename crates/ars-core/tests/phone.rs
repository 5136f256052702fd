use ars_core::cache_keys::ConversationKeys;
use ars_core::phone::{conversation_key, normalize};

#[test]
fn local_number_gets_country_code() {
    assert_eq!(normalize("08031234567").unwrap(), "+2348031234567");
}

#[test]
fn international_forms_agree() {
    let expected = "+2348031234567";
    assert_eq!(normalize("+234 803 123 4567").unwrap(), expected);
    assert_eq!(normalize("2348031234567").unwrap(), expected);
    assert_eq!(normalize("002348031234567").unwrap(), expected);
    assert_eq!(normalize("8031234567").unwrap(), expected);
}

#[test]
fn garbage_is_rejected() {
    assert!(normalize("hello").is_err());
    assert!(normalize("").is_err());
    assert!(normalize("+12ab").is_err());
}

#[test]
fn conversation_key_strips_prefix_only_at_start() {
    assert_eq!(conversation_key("+2348031234567"), "8031234567");
    // A 234 sequence later in the number is kept.
    assert_eq!(conversation_key("+2348012342345"), "8012342345");
    assert_eq!(conversation_key("+14155550100"), "14155550100");
}

#[test]
fn all_conversation_keys_share_one_suffix() {
    let keys = ConversationKeys::new("8031234567");
    assert_eq!(keys.session, "session-8031234567");
    assert_eq!(keys.participant, "participant-8031234567");
    assert_eq!(keys.answers, "participant-messages-8031234567");
    assert_eq!(keys.awaiting_continue, "continue-8031234567");
    assert_eq!(keys.conversation, "8031234567");
}
