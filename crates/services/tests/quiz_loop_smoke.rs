use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use quiz_core::model::{Question, RoundResult};
use quiz_core::summary::format_record_date;
use quiz_core::time::{fixed_clock, fixed_now};
use quiz_core::QuizState;
use services::{
    QuestionSource, QuestionSourceError, QuizError, QuizEvent, QuizLoopService, StatisticsStore,
};
use storage::repository::InMemoryStore;

enum Step {
    Ask(bool),
    Fail,
}

/// Serves questions in script order; "yes" questions once the script runs out.
#[derive(Default)]
struct ScriptedSource {
    load_failures: Mutex<usize>,
    steps: Mutex<VecDeque<Step>>,
    served: Mutex<u32>,
    loaded: bool,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            ..Self::default()
        }
    }

    fn failing_loads(mut self, count: usize) -> Self {
        self.load_failures = Mutex::new(count);
        self
    }
}

#[async_trait]
impl QuestionSource for ScriptedSource {
    async fn load_candidates(&mut self) -> Result<(), QuestionSourceError> {
        let mut failures = self.load_failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(QuestionSourceError::Unavailable {
                message: "service offline".into(),
            });
        }
        drop(failures);
        self.loaded = true;
        Ok(())
    }

    async fn next_question(&self) -> Result<Question, QuestionSourceError> {
        let step = self.steps.lock().unwrap().pop_front();
        match step.unwrap_or(Step::Ask(true)) {
            Step::Ask(answer) => {
                let mut served = self.served.lock().unwrap();
                *served += 1;
                Ok(Question::new(Vec::new(), format!("Q{served}"), answer))
            }
            Step::Fail => Err(QuestionSourceError::Unavailable {
                message: "poster fetch failed".into(),
            }),
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}

fn quiz_with(source: ScriptedSource) -> (QuizLoopService, InMemoryStore) {
    let kv = InMemoryStore::new();
    let statistics = StatisticsStore::new(fixed_clock(), Arc::new(kv.clone()));
    let quiz = QuizLoopService::new(Box::new(source), statistics).with_answer_delay(Duration::ZERO);
    (quiz, kv)
}

fn question_number(event: &QuizEvent) -> u32 {
    match event {
        QuizEvent::QuestionReady(view) => view.progress.number,
        QuizEvent::RoundComplete(_) => panic!("expected a question, got {event:?}"),
    }
}

#[tokio::test]
async fn full_round_records_statistics() {
    let (mut quiz, _) = quiz_with(ScriptedSource::default());

    let mut event = quiz.start_round().await.unwrap();
    for n in 1..=10 {
        assert_eq!(question_number(&event), n);
        // Every scripted question expects "yes"; answer odd ones correctly.
        let outcome = quiz.answer(n % 2 == 1).await.unwrap();
        assert_eq!(outcome.is_correct, n % 2 == 1);
        event = quiz.proceed().await.unwrap();
    }

    let QuizEvent::RoundComplete(report) = event else {
        panic!("expected round completion");
    };
    assert_eq!(report.result, RoundResult::new(5, 10).unwrap());
    let date = format_record_date(fixed_now(), &Local);
    assert_eq!(
        report.summary,
        format!(
            "Your result: 5/10\nQuizzes played: 1\nRecord: 5/10 ({date})\nAverage accuracy: 50.00%"
        )
    );

    let snapshot = quiz.statistics().snapshot().await.unwrap();
    assert_eq!((snapshot.total_correct, snapshot.total_answered), (5, 10));
    assert_eq!(snapshot.games_count, 1);
}

#[tokio::test]
async fn completion_is_reported_once() {
    let (mut quiz, _) = quiz_with(ScriptedSource::default());
    quiz.start_round().await.unwrap();
    for _ in 0..10 {
        quiz.answer(true).await.unwrap();
        quiz.proceed().await.unwrap();
    }
    let again = quiz.proceed().await.unwrap();
    assert!(matches!(again, QuizEvent::RoundComplete(_)));
    assert_eq!(quiz.statistics().games_count().await.unwrap(), 1);
}

#[tokio::test]
async fn fetch_failure_mid_round_resumes_on_retry() {
    let mut steps: Vec<Step> = (0..3).map(|_| Step::Ask(true)).collect();
    steps.push(Step::Fail);
    let (mut quiz, _) = quiz_with(ScriptedSource::new(steps));

    quiz.start_round().await.unwrap();
    for _ in 0..2 {
        quiz.answer(true).await.unwrap();
        quiz.proceed().await.unwrap();
    }
    quiz.answer(true).await.unwrap();
    let err = quiz.proceed().await.unwrap_err();
    assert!(matches!(err, QuizError::QuestionFetchFailed(_)));

    assert_eq!(quiz.session().state(), QuizState::AwaitingQuestion);
    assert_eq!(quiz.session().current_index(), 3);
    assert_eq!(quiz.session().correct_answers(), 3);

    let event = quiz.retry().await.unwrap();
    assert_eq!(question_number(&event), 4);
}

#[tokio::test]
async fn load_failure_is_retryable() {
    let (mut quiz, _) = quiz_with(ScriptedSource::default().failing_loads(1));

    let err = quiz.start_round().await.unwrap_err();
    assert!(matches!(err, QuizError::QuestionSourceUnavailable(_)));
    assert_eq!(err.to_string(), "could not load movies: service offline");

    let event = quiz.retry().await.unwrap();
    assert_eq!(question_number(&event), 1);
}

#[tokio::test]
async fn answer_without_question_is_ignored() {
    let (mut quiz, _) = quiz_with(ScriptedSource::default().failing_loads(1));
    let _ = quiz.start_round().await;

    assert_eq!(quiz.answer(true).await, None);
    assert_eq!(quiz.session().correct_answers(), 0);
    assert_eq!(quiz.statistics().snapshot().await.unwrap().total_answered, 0);
}

#[tokio::test]
async fn play_again_starts_from_first_question() {
    let (mut quiz, _) = quiz_with(ScriptedSource::default());
    quiz.start_round().await.unwrap();
    for _ in 0..10 {
        quiz.answer(false).await.unwrap();
        quiz.proceed().await.unwrap();
    }

    let event = quiz.start_round().await.unwrap();
    assert_eq!(question_number(&event), 1);
    assert_eq!(quiz.session().correct_answers(), 0);

    for _ in 0..10 {
        quiz.answer(true).await.unwrap();
        quiz.proceed().await.unwrap();
    }
    let stats = quiz.statistics().snapshot().await.unwrap();
    assert_eq!(stats.games_count, 2);
    assert_eq!(stats.best_game.correct(), 10);
    assert_eq!((stats.total_correct, stats.total_answered), (10, 20));
}
