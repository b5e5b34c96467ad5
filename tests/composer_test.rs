//! Answer composition behavior over scripted collaborators.

mod common;

use std::sync::Arc;

use common::{completion, composer_over, sample_payload, CannedStore, ScriptedChat};
use savor::domain::errors::DomainError;
use savor::{Relevance, SearchHit};

fn canned_store() -> Arc<CannedStore> {
    Arc::new(CannedStore {
        hits: vec![
            SearchHit {
                id: 0,
                score: 0.95,
                payload: sample_payload(1, "Restaurant A", "Burger"),
            },
            SearchHit {
                id: 1,
                score: 0.80,
                payload: sample_payload(2, "Restaurant B", "Salad"),
            },
        ],
    })
}

#[tokio::test]
async fn composes_answer_with_relevance_and_cost() {
    let chat = ScriptedChat::new(vec![
        Ok(completion("Restaurant A serves a flame-grilled burger.", 100, 50)),
        Ok(completion(
            r#"{"Relevance": "RELEVANT", "Explanation": "Names a concrete burger option."}"#,
            100,
            50,
        )),
    ]);
    let composer = composer_over(canned_store(), chat, 5);

    let record = composer.answer("Where can I get a burger?").await.unwrap();

    assert_eq!(record.answer, "Restaurant A serves a flame-grilled burger.");
    assert_eq!(record.model_used, "gpt-5-nano");
    assert_eq!(record.relevance, Relevance::Relevant);
    assert_eq!(
        record.relevance_explanation,
        "Names a concrete burger option."
    );
    assert_eq!(record.prompt_tokens, 100);
    assert_eq!(record.completion_tokens, 50);
    assert_eq!(record.eval_prompt_tokens, 100);
    assert_eq!(record.eval_completion_tokens, 50);

    // 100/50 tokens on both calls: exactly twice the single-call cost.
    let single_call = 100.0 * 0.05 / 1e6 + 50.0 * 0.40 / 1e6;
    assert!((record.cost_usd - 2.0 * single_call).abs() < 1e-12);
    assert!(record.response_time >= 0.0);
}

#[tokio::test]
async fn unparseable_evaluation_degrades_to_unknown() {
    let chat = ScriptedChat::new(vec![
        Ok(completion("Some answer.", 10, 5)),
        Ok(completion("Sure! Here's my take: it's relevant.", 10, 5)),
    ]);
    let composer = composer_over(canned_store(), chat, 5);

    let record = composer.answer("Anything good here?").await.unwrap();

    assert_eq!(record.relevance, Relevance::Unknown);
    assert!(!record.relevance_explanation.is_empty());
    assert_eq!(record.relevance_explanation, "Failed to parse evaluation");
    // The evaluation call still happened and its tokens are accounted.
    assert_eq!(record.eval_total_tokens, 15);
}

#[tokio::test]
async fn unexpected_relevance_label_degrades_to_unknown() {
    let chat = ScriptedChat::new(vec![
        Ok(completion("Some answer.", 10, 5)),
        Ok(completion(
            r#"{"Relevance": "SOMEWHAT_RELEVANT", "Explanation": "made up label"}"#,
            10,
            5,
        )),
    ]);
    let composer = composer_over(canned_store(), chat, 5);

    let record = composer.answer("Anything good here?").await.unwrap();
    assert_eq!(record.relevance, Relevance::Unknown);
    assert!(!record.relevance_explanation.is_empty());
}

#[tokio::test]
async fn evaluation_call_failure_degrades_to_unknown() {
    let chat = ScriptedChat::new(vec![
        Ok(completion("Some answer.", 10, 5)),
        Err(DomainError::ServiceUnavailable("eval endpoint down".to_string())),
    ]);
    let composer = composer_over(canned_store(), chat, 5);

    let record = composer.answer("Anything good here?").await.unwrap();

    assert_eq!(record.answer, "Some answer.");
    assert_eq!(record.relevance, Relevance::Unknown);
    assert!(record.relevance_explanation.contains("Evaluation unavailable"));
    assert_eq!(record.eval_total_tokens, 0);
}

#[tokio::test]
async fn generation_failure_propagates_without_record() {
    let chat = ScriptedChat::new(vec![Err(DomainError::ServiceUnavailable(
        "model overloaded".to_string(),
    ))]);
    let composer = composer_over(canned_store(), chat, 5);

    let err = composer.answer("Where can I get a burger?").await.unwrap_err();
    assert!(matches!(err, DomainError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn malformed_retrieved_payload_fails_the_answer() {
    let mut broken = sample_payload(1, "Restaurant A", "Burger");
    broken.as_object_mut().unwrap().remove("restaurant_name");
    let store = Arc::new(CannedStore {
        hits: vec![SearchHit {
            id: 0,
            score: 0.9,
            payload: broken,
        }],
    });

    // No chat responses needed: the failure happens before generation.
    let composer = composer_over(store, ScriptedChat::new(vec![]), 5);
    let err = composer.answer("anything?").await.unwrap_err();
    assert!(matches!(err, DomainError::Serialization(_)));
}
