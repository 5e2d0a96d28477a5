//! Unit tests for the streaming response decoder

use castsum::ollama::{DecodeEvent, DecoderState, Flow, StreamDecoder};
use serde_json::json;

use crate::helpers::ndjson;

fn ignore(_: DecodeEvent<'_>) {}

fn body() -> String {
    ndjson(&[
        json!({"model": "m", "thinking": "Consider ", "done": false}),
        json!({"model": "m", "thinking": "the ls.", "done": false}),
        json!({"model": "m", "response": "The user ", "done": false}),
        json!({"model": "m", "response": "listed files \u{2714}", "done": false}),
        json!({"model": "m", "response": "", "done": true, "eval_count": 2}),
        json!({"model": "m", "response": "trailing garbage", "done": false}),
    ])
}

/// Decode `bytes` fed in pieces of `size` bytes.
fn decode_in_chunks(bytes: &[u8], size: usize) -> (String, String, bool) {
    let mut decoder = StreamDecoder::new();
    let mut sink = ignore;
    for chunk in bytes.chunks(size) {
        if decoder.push(chunk, &mut sink) == Flow::Done {
            break;
        }
    }
    let result = decoder.finish(&mut sink);
    (result.answer, result.thinking, result.completed)
}

#[test]
fn chunk_boundaries_do_not_change_the_result() {
    let body = body();
    let expected = (
        "The user listed files \u{2714}".to_string(),
        "Consider the ls.".to_string(),
        true,
    );
    for size in [1, 2, 3, 7, 16, 64, body.len()] {
        assert_eq!(decode_in_chunks(body.as_bytes(), size), expected, "chunk size {}", size);
    }
}

#[test]
fn state_follows_the_stream() {
    let mut decoder = StreamDecoder::new();
    let mut sink = ignore;
    assert_eq!(decoder.state(), DecoderState::Idle);

    decoder.push(b"{\"thinking\":\"a\"}\n", &mut sink);
    assert_eq!(decoder.state(), DecoderState::Thinking);

    decoder.push(b"{\"response\":\"b\"}\n", &mut sink);
    assert_eq!(decoder.state(), DecoderState::Responding);

    decoder.push(b"{\"done\":true}\n", &mut sink);
    assert_eq!(decoder.state(), DecoderState::Done);
}

#[test]
fn section_markers_are_emitted_once() {
    let mut markers = Vec::new();
    {
        let mut sink = |event: DecodeEvent<'_>| match event {
            DecodeEvent::Thinking(_) | DecodeEvent::Answer(_) => {}
            other => markers.push(format!("{:?}", other)),
        };
        let mut decoder = StreamDecoder::new();
        decoder.push(body().as_bytes(), &mut sink);
        decoder.finish(&mut sink);
    }
    assert_eq!(
        markers,
        vec!["ThinkingStarted", "SectionBreak", "AnswerStarted", "Completed"]
    );
}
