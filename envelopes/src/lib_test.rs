use super::*;

fn sample_envelope() -> Envelope {
    Envelope {
        kind: "POLL_CREATED".to_owned(),
        topic: Topic::Poll,
        sender_id: "teacher-1".to_owned(),
        payload: serde_json::json!({
            "id": "poll-1",
            "question": "2 + 2?",
            "options": ["3", "4", "5"],
            "nested": {"k": "v"},
            "nil": null
        }),
        timestamp: Some(42),
    }
}

#[test]
fn topic_wire_names_round_trip() {
    for topic in Topic::ALL {
        assert_eq!(Topic::from_wire(topic.as_str()).expect("topic"), topic);
    }
}

#[test]
fn topic_from_wire_rejects_unknown_name() {
    let err = Topic::from_wire("video").expect_err("topic should be unknown");
    assert!(matches!(err, CodecError::UnknownTopic(name) if name == "video"));
}

#[test]
fn topic_serde_uses_snake_case_names() {
    assert_eq!(
        serde_json::to_string(&Topic::QuranSync).expect("serialize"),
        "\"quran_sync\""
    );
    assert_eq!(
        serde_json::to_string(&Topic::Raisehand).expect("serialize"),
        "\"raisehand\""
    );
}

#[test]
fn encode_decode_round_trip_preserves_envelope() {
    let envelope = sample_envelope();
    let bytes = encode_envelope(&envelope);
    let decoded = decode_envelope(&bytes).expect("decode should succeed");
    assert_eq!(decoded, envelope);
}

#[test]
fn wire_json_uses_type_and_camel_case_keys() {
    let bytes = encode_envelope(&sample_envelope());
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(value["type"], "POLL_CREATED");
    assert_eq!(value["topic"], "poll");
    assert_eq!(value["senderId"], "teacher-1");
    assert_eq!(value["timestamp"], 42);
}

#[test]
fn timestamp_is_omitted_when_absent() {
    let envelope = Envelope::new(Topic::Chat, "CHAT_MESSAGE", "student-1");
    let bytes = encode_envelope(&envelope);
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert!(value.get("timestamp").is_none());
}

#[test]
fn decode_rejects_non_utf8_bytes() {
    let err = decode_envelope(&[0xff, 0xfe, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Utf8(_)));
}

#[test]
fn decode_rejects_malformed_json() {
    let err = decode_envelope(b"{not json").expect_err("text should fail");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_unknown_topic_in_envelope() {
    let err = decode_envelope(br#"{"type":"X","topic":"video","senderId":"a","payload":{}}"#)
        .expect_err("topic should fail");
    // Serde surfaces the unknown variant as a JSON parse error.
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn builder_defaults_to_empty_object_payload() {
    let envelope = Envelope::new(Topic::Raisehand, "HAND_RAISED", "student-2");
    assert_eq!(envelope.payload, serde_json::json!({}));
    assert_eq!(envelope.timestamp, None);
}

#[test]
fn builder_sets_payload_and_timestamp() {
    let envelope = Envelope::new(Topic::Chat, "CHAT_MESSAGE", "s")
        .with_payload(serde_json::json!({"body": "hi"}))
        .with_timestamp(7);
    assert_eq!(envelope.payload["body"], "hi");
    assert_eq!(envelope.timestamp, Some(7));
}
