//! Property-based tests for the conversation state machine
//!
//! Random intent/response sequences are driven through a
//! [`ConversationThread`] and the rollback, single-flight, thread-id,
//! clear, ordering and stale-discard properties are checked after every step.

use super::*;
use crate::error::{SubmitRejected, TransportError};
use crate::models::{ChatReply, Message, MessageRole};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    Reply {
        thread_id: Option<String>,
        content: String,
    },
    Fail(TransportError),
    ReplyToDiscarded {
        content: String,
    },
    Dismiss,
    Clear,
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z' ?]{1,24}",
    ]
}

fn arb_error() -> impl Strategy<Value = TransportError> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|message| TransportError::Network { message }),
        (400u16..600, "[a-z ]{0,12}")
            .prop_map(|(status, body)| TransportError::server(status, body)),
        "[a-z ]{0,12}".prop_map(TransportError::protocol),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_text().prop_map(Op::Submit),
        3 => (proptest::option::of("t[0-9]{1,2}"), "[0-9a-z ]{0,8}")
            .prop_map(|(thread_id, content)| Op::Reply { thread_id, content }),
        2 => arb_error().prop_map(Op::Fail),
        1 => "[a-z]{1,8}".prop_map(|content| Op::ReplyToDiscarded { content }),
        1 => Just(Op::Dismiss),
        1 => Just(Op::Clear),
    ]
}

/// Driver state the properties need besides the thread itself.
#[derive(Default)]
struct Harness {
    thread: ConversationThread,
    in_flight: Option<Generation>,
    discarded: Vec<Generation>,
    log_before_send: Vec<Message>,
}

fn assert_alternating(messages: &[Message]) {
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 {
            MessageRole::User
        } else {
            MessageRole::Agent
        };
        assert_eq!(message.role, expected, "role out of order at {}", i);
    }
}

fn assert_timestamps_monotonic(messages: &[Message]) {
    for pair in messages.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

impl Harness {
    fn step(&mut self, op: Op) {
        let messages_before = self.thread.messages().to_vec();
        let thread_id_before = self.thread.thread_id().map(str::to_string);
        let status_before = self.thread.status();

        match op {
            Op::Submit(text) => match self.thread.submit(&text) {
                Ok(Effect::SendMessage {
                    generation,
                    request,
                }) => {
                    assert_ne!(status_before, ThreadStatus::Sending);
                    assert_eq!(request.thread_id, thread_id_before);
                    assert_eq!(request.message, text);
                    assert_eq!(self.thread.status(), ThreadStatus::Sending);
                    assert_eq!(self.thread.last_error(), None);
                    self.in_flight = Some(generation);
                    self.log_before_send = messages_before;
                }
                Ok(other) => panic!("submit produced {:?}", other),
                Err(rejected) => {
                    // Rejected submits leave everything untouched
                    if text.trim().is_empty() {
                        assert_eq!(rejected, SubmitRejected::Blank);
                    } else {
                        assert_eq!(rejected, SubmitRejected::InFlight);
                        assert_eq!(status_before, ThreadStatus::Sending);
                    }
                    assert_eq!(self.thread.messages(), messages_before.as_slice());
                    assert_eq!(self.thread.thread_id(), thread_id_before.as_deref());
                    assert_eq!(self.thread.status(), status_before);
                }
            },
            Op::Reply { thread_id, content } => {
                let Some(generation) = self.in_flight.take() else {
                    return;
                };
                let applied = self.thread.complete_send(
                    generation,
                    Ok(ChatReply {
                        thread_id: thread_id.clone(),
                        content: content.clone(),
                    }),
                );
                assert_eq!(applied, Applied::Applied);
                assert_eq!(self.thread.status(), ThreadStatus::Idle);
                assert_eq!(self.thread.messages().len(), messages_before.len() + 1);
                let last = self.thread.messages().last().unwrap();
                assert_eq!(last.role, MessageRole::Agent);
                assert_eq!(last.content, content);
                // First thread id sticks
                match thread_id_before {
                    Some(ref id) => assert_eq!(self.thread.thread_id(), Some(id.as_str())),
                    None => assert_eq!(self.thread.thread_id(), thread_id.as_deref()),
                }
            }
            Op::Fail(err) => {
                let Some(generation) = self.in_flight.take() else {
                    return;
                };
                let applied = self.thread.complete_send(generation, Err(err));
                assert_eq!(applied, Applied::Applied);
                // Failed turn rolled back
                assert_eq!(self.thread.messages(), self.log_before_send.as_slice());
                assert_eq!(self.thread.status(), ThreadStatus::Error);
                assert!(self.thread.last_error().is_some());
                assert_eq!(self.thread.thread_id(), thread_id_before.as_deref());
            }
            Op::ReplyToDiscarded { content } => {
                let Some(&generation) = self.discarded.last() else {
                    return;
                };
                let applied = self.thread.complete_send(
                    generation,
                    Ok(ChatReply {
                        thread_id: Some("ghost".to_string()),
                        content,
                    }),
                );
                assert_eq!(applied, Applied::Stale);
                assert_eq!(self.thread.messages(), messages_before.as_slice());
                assert_eq!(self.thread.thread_id(), thread_id_before.as_deref());
                assert_eq!(self.thread.status(), status_before);
            }
            Op::Dismiss => {
                let dismissed = self.thread.dismiss_error();
                assert_eq!(dismissed, status_before == ThreadStatus::Error);
                assert_eq!(self.thread.messages(), messages_before.as_slice());
                if dismissed {
                    assert_eq!(self.thread.status(), ThreadStatus::Idle);
                    assert_eq!(self.thread.last_error(), None);
                }
            }
            Op::Clear => {
                let effect = self.thread.clear();
                match thread_id_before {
                    Some(id) => assert_eq!(effect, Some(Effect::DeleteThread { thread_id: id })),
                    None => assert_eq!(effect, None),
                }
                if let Some(generation) = self.in_flight.take() {
                    self.discarded.push(generation);
                }
                assert!(self.thread.messages().is_empty());
                assert_eq!(self.thread.thread_id(), None);
                assert_eq!(self.thread.status(), ThreadStatus::Idle);
                assert_eq!(self.thread.last_error(), None);
            }
        }

        // Roles alternate: failed turns are always rolled back
        assert_alternating(self.thread.messages());
        assert_timestamps_monotonic(self.thread.messages());
        assert_eq!(self.thread.is_sending(), self.in_flight.is_some());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_conversation_invariants(ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut harness = Harness::default();
        for op in ops {
            harness.step(op);
        }
    }

    #[test]
    fn prop_successful_turns_pair_up(questions in proptest::collection::vec("[a-z]{1,10}", 1..12)) {
        let mut thread = ConversationThread::new();
        for (i, question) in questions.iter().enumerate() {
            let Effect::SendMessage { generation, .. } = thread.submit(question).unwrap() else {
                panic!("expected SendMessage");
            };
            thread.complete_send(
                generation,
                Ok(ChatReply { thread_id: Some(format!("t{}", i)), content: format!("a{}", i) }),
            );
        }

        let messages = thread.messages();
        prop_assert_eq!(messages.len(), questions.len() * 2);
        for (i, question) in questions.iter().enumerate() {
            prop_assert_eq!(&messages[2 * i].content, question);
            prop_assert_eq!(messages[2 * i + 1].content.clone(), format!("a{}", i));
        }
        prop_assert_eq!(thread.thread_id(), Some("t0"));
    }
}
