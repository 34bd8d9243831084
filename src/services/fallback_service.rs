//! Static, network-free interview content used whenever generation fails.

use crate::dto::interview_dto::{HistoryEntry, SessionResponse};
use crate::models::evaluation::{clamp_score, AnswerEvaluation, MAX_SCORE};
use crate::models::feedback::{clamp_percent, OverallFeedback};
use crate::models::question::{Difficulty, InterviewQuestion, NextQuestion, QuestionType};
use crate::models::question::Difficulty::{Easy, Hard, Medium};
use crate::models::question::QuestionType::{Behavioral, Coding, Technical};

struct Entry {
    difficulty: Difficulty,
    kind: QuestionType,
    question: &'static str,
    expected: &'static str,
}

const fn entry(
    difficulty: Difficulty,
    kind: QuestionType,
    question: &'static str,
    expected: &'static str,
) -> Entry {
    Entry {
        difficulty,
        kind,
        question,
        expected,
    }
}

const FRONTEND: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "What is the difference between `let`, `const` and `var` in JavaScript?",
        "Block vs function scope, hoisting behaviour and reassignment rules.",
    ),
    entry(
        Easy,
        Coding,
        "Write a function that toggles a CSS class on an element when a button is clicked.",
        "Query the elements, attach a click listener and use classList.toggle.",
    ),
    entry(
        Medium,
        Technical,
        "How does the browser event loop process microtasks and macrotasks?",
        "Call stack drains, then all microtasks (promises), then the next macrotask; rendering happens between tasks.",
    ),
    entry(
        Medium,
        Coding,
        "Implement a debounce function and explain where you would use it.",
        "Closure holding a timer that is cleared and reset on each call; used for search inputs or resize handlers.",
    ),
    entry(
        Hard,
        Technical,
        "How would you diagnose and fix slow re-renders in a large component tree?",
        "Profile renders, memoise expensive components, stabilise props and callbacks, split state, virtualise long lists.",
    ),
    entry(
        Hard,
        Coding,
        "Implement a minimal observable store with subscribe and unsubscribe.",
        "Hold state and a listener set, notify on update, return an unsubscribe closure, avoid leaking listeners.",
    ),
];

const BACKEND: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "What is the difference between HTTP GET and POST?",
        "GET is safe and idempotent with parameters in the URL; POST carries a body and changes server state.",
    ),
    entry(
        Easy,
        Coding,
        "Write a function that returns the most frequent element in a list.",
        "Count occurrences with a hash map and track the maximum; O(n) time.",
    ),
    entry(
        Medium,
        Technical,
        "How do database indexes speed up queries, and what do they cost?",
        "B-tree lookups avoid full scans; costs are write amplification, storage and planner misuse on low-selectivity columns.",
    ),
    entry(
        Medium,
        Coding,
        "Implement a rate limiter that allows N requests per second per client.",
        "Fixed window or token bucket keyed by client, with time-based refill and thread-safe counters.",
    ),
    entry(
        Hard,
        Technical,
        "How would you design an idempotent payment API that tolerates client retries?",
        "Idempotency keys stored with the result, unique constraints, transactional outbox and safe retry semantics.",
    ),
    entry(
        Hard,
        Coding,
        "Implement an LRU cache with O(1) get and put.",
        "Hash map from key to node in a doubly linked list; move to front on access, evict from the tail.",
    ),
];

const DATA: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "What is the difference between supervised and unsupervised learning?",
        "Supervised learns from labelled targets; unsupervised finds structure such as clusters without labels.",
    ),
    entry(
        Easy,
        Coding,
        "Write a SQL query that returns the top five customers by total order value.",
        "GROUP BY customer, SUM the amounts, ORDER BY the sum descending, LIMIT 5.",
    ),
    entry(
        Medium,
        Technical,
        "How do you detect and handle overfitting?",
        "Compare train and validation error, use cross-validation, regularisation, more data or simpler models.",
    ),
    entry(
        Medium,
        Coding,
        "Write code that computes a 7-day rolling average from daily metrics.",
        "Sort by date, then use a window function or a sliding sum over the last seven values.",
    ),
    entry(
        Hard,
        Technical,
        "How would you design a pipeline that guarantees exactly-once processing of events?",
        "Idempotent sinks or transactional writes, checkpointed offsets and deduplication keys.",
    ),
    entry(
        Hard,
        Coding,
        "Implement k-means clustering from scratch for 2D points.",
        "Initialise centroids, assign points to the nearest centroid, recompute means, repeat until convergence.",
    ),
];

const DEVOPS: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "What is the difference between a container and a virtual machine?",
        "Containers share the host kernel and isolate processes; VMs virtualise hardware and run a full guest OS.",
    ),
    entry(
        Easy,
        Coding,
        "Write a shell script that prints the five largest files in a directory tree.",
        "find or du piped through sort -rh and head -5.",
    ),
    entry(
        Medium,
        Technical,
        "How does a blue-green deployment differ from a rolling update?",
        "Two full environments with a traffic switch versus gradually replacing instances in place.",
    ),
    entry(
        Medium,
        Coding,
        "Write a health-check script that retries an HTTP endpoint with backoff.",
        "Loop with curl, check the status code, sleep with increasing delays and exit non-zero after N failures.",
    ),
    entry(
        Hard,
        Technical,
        "How would you design alerting that avoids fatigue while catching real outages?",
        "Alert on symptoms and SLO burn rates, route by severity, deduplicate and review noisy alerts regularly.",
    ),
    entry(
        Hard,
        Coding,
        "Write a Kubernetes manifest for a service with readiness probes and resource limits.",
        "Deployment with probes, requests and limits, a Service selecting the pods, and sensible rollout settings.",
    ),
];

const MOBILE: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "Describe the lifecycle of a screen in a mobile application.",
        "Creation, becoming visible, pausing, resuming and destruction, and what to persist at each stage.",
    ),
    entry(
        Easy,
        Coding,
        "Write a function that formats a timestamp as a relative time such as '5 minutes ago'.",
        "Compute the difference from now and pick the largest suitable unit.",
    ),
    entry(
        Medium,
        Technical,
        "How do you keep a mobile app responsive while loading data?",
        "Background threads or coroutines, caching, pagination and placeholder UI states.",
    ),
    entry(
        Medium,
        Coding,
        "Implement an image cache with a memory limit.",
        "LRU keyed by URL with size accounting and eviction when the limit is exceeded.",
    ),
    entry(
        Hard,
        Technical,
        "How would you design offline-first sync for a mobile app?",
        "Local store as source of truth, an operation queue, conflict resolution and incremental sync.",
    ),
    entry(
        Hard,
        Coding,
        "Implement a paginated list loader that handles retries and cancellation.",
        "Track page state, cancel stale requests, retry with backoff and merge results without duplicates.",
    ),
];

const GENERAL: &[Entry] = &[
    entry(
        Easy,
        Technical,
        "Explain the difference between a process and a thread.",
        "Processes have separate address spaces; threads share memory within a process and need synchronisation.",
    ),
    entry(
        Easy,
        Coding,
        "Write a function that checks whether a string is a palindrome.",
        "Normalise the string, then compare characters from both ends moving inward.",
    ),
    entry(
        Medium,
        Technical,
        "What makes code maintainable, and how do you keep it that way?",
        "Clear naming, small units, tests, consistent style, code review and refactoring as part of delivery.",
    ),
    entry(
        Medium,
        Coding,
        "Write a function that merges overlapping intervals.",
        "Sort by start, then extend the current interval or push a new one; O(n log n).",
    ),
    entry(
        Hard,
        Technical,
        "How would you approach designing a system that must scale to millions of users?",
        "Clarify requirements, stateless services, caching, partitioning, asynchronous work and observability.",
    ),
    entry(
        Hard,
        Coding,
        "Implement a function that finds the shortest path in an unweighted grid.",
        "Breadth-first search from the start cell tracking visited cells and distances.",
    ),
];

const BEHAVIORAL: &[Entry] = &[
    entry(
        Easy,
        Behavioral,
        "Tell me about a project you are proud of and your role in it.",
        "A concrete project, the candidate's specific contribution and the outcome.",
    ),
    entry(
        Medium,
        Behavioral,
        "Describe a time you disagreed with a teammate. How did you resolve it?",
        "Situation, respectful discussion grounded in data, the resolution and what was learned.",
    ),
    entry(
        Hard,
        Behavioral,
        "Tell me about a time you had to make a decision with incomplete information.",
        "How risks were weighed, who was consulted, the decision, its outcome and the reflection afterwards.",
    ),
    entry(
        Medium,
        Behavioral,
        "How do you prioritise when several tasks are urgent at once?",
        "Assess impact and deadlines, communicate trade-offs with stakeholders and re-plan visibly.",
    ),
];

fn bank_for_role(role: &str) -> &'static [Entry] {
    let role = role.to_lowercase();
    let words: Vec<&str> = role
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let matches = |keys: &[&str]| words.iter().any(|w| keys.contains(w));

    if matches(&[
        "front", "frontend", "react", "angular", "vue", "ui", "ux", "web", "html", "css",
        "javascript", "typescript",
    ]) {
        FRONTEND
    } else if matches(&[
        "data", "machine", "ml", "ai", "analyst", "analytics", "scientist", "science",
    ]) {
        DATA
    } else if matches(&[
        "devops", "sre", "reliability", "cloud", "infrastructure", "platform", "ops",
    ]) {
        DEVOPS
    } else if matches(&["mobile", "android", "ios", "flutter", "swift", "kotlin"]) {
        MOBILE
    } else if matches(&[
        "back", "backend", "server", "api", "java", "python", "node", "go", "golang", "rust",
        "full", "fullstack",
    ]) {
        BACKEND
    } else {
        GENERAL
    }
}

fn to_question(e: &Entry) -> InterviewQuestion {
    InterviewQuestion {
        question: e.question.to_string(),
        question_type: e.kind,
        expected_answer: e.expected.to_string(),
    }
}

/// Questions at the requested difficulty first, then a behavioral question,
/// then the rest of the role's table. Never empty.
pub fn fallback_questions(
    role: &str,
    difficulty: Difficulty,
    count: usize,
) -> Vec<InterviewQuestion> {
    let bank = bank_for_role(role);

    let mut ordered: Vec<&Entry> = bank.iter().filter(|e| e.difficulty == difficulty).collect();
    ordered.extend(BEHAVIORAL.iter().filter(|e| e.difficulty == difficulty));
    ordered.extend(bank.iter().filter(|e| e.difficulty != difficulty));
    ordered.extend(BEHAVIORAL.iter().filter(|e| e.difficulty != difficulty));

    ordered
        .into_iter()
        .take(count.max(1))
        .map(to_question)
        .collect()
}

pub fn fallback_next_question(
    role: &str,
    difficulty: Difficulty,
    history: &[HistoryEntry],
) -> NextQuestion {
    let candidates = fallback_questions(role, difficulty, usize::MAX);
    let asked = |q: &InterviewQuestion| {
        history
            .iter()
            .any(|h| h.question.trim().eq_ignore_ascii_case(q.question.trim()))
    };

    let picked = candidates
        .iter()
        .find(|q| !asked(q))
        .unwrap_or(&candidates[history.len() % candidates.len()]);

    NextQuestion::new(
        picked.question.clone(),
        picked.question_type,
        picked.question_type == QuestionType::Coding,
    )
}

/// Base 5, +2 past 100 characters, +1 more past 200, +1 for submitted code.
pub fn heuristic_score(answer: &str, has_code: bool) -> f64 {
    let length = answer.trim().chars().count();
    let mut score: f64 = 5.0;
    if length > 100 {
        score += 2.0;
    }
    if length > 200 {
        score += 1.0;
    }
    if has_code {
        score += 1.0;
    }
    score.min(MAX_SCORE)
}

pub fn fallback_evaluation(answer: &str, has_code: bool) -> AnswerEvaluation {
    let score = heuristic_score(answer, has_code);

    let (review, strength, improvement) = if score >= 8.0 {
        (
            "A detailed answer that covers the question in depth.",
            "Thorough explanation with good supporting detail.",
            "Tighten the structure and lead with the key point.",
        )
    } else if score >= 7.0 {
        (
            "A reasonable answer with some useful detail.",
            "Addresses the main idea of the question.",
            "Back your points with concrete examples or trade-offs.",
        )
    } else {
        (
            "The answer is brief and leaves parts of the question unaddressed.",
            "You engaged with the question.",
            "Expand on your reasoning and walk through a specific example.",
        )
    };

    AnswerEvaluation::new(
        review.to_string(),
        score,
        strength.to_string(),
        improvement.to_string(),
    )
}

pub fn fallback_overall_feedback(role: &str, responses: &[SessionResponse]) -> OverallFeedback {
    if responses.is_empty() {
        return OverallFeedback {
            summary: format!("No answers were recorded for this {} interview.", role),
            strengths: vec!["Showed up and started the interview.".to_string()],
            improvements: vec!["Answer the questions to receive meaningful feedback.".to_string()],
            overall_score: 0,
            communication_score: 0,
            problem_solving_score: 0,
        };
    }

    let total = responses.len() as f64;
    let mean_score = responses
        .iter()
        .map(|r| match r.score {
            Some(s) if s.is_finite() => clamp_score(s),
            _ => heuristic_score(&r.answer, r.has_code()),
        })
        .sum::<f64>()
        / total;
    let mean_length = responses
        .iter()
        .map(|r| r.answer.trim().chars().count() as f64)
        .sum::<f64>()
        / total;
    let code_share = responses.iter().filter(|r| r.has_code()).count() as f64 / total;

    let overall_score = clamp_percent(mean_score * 10.0);
    let communication_score = clamp_percent(30.0 + mean_length / 4.0);
    let problem_solving_score = clamp_percent(mean_score * 10.0 + code_share * 10.0);

    let (band, strengths, improvements) = if overall_score >= 75 {
        (
            "a strong",
            vec![
                "Answers were detailed and well reasoned.",
                "Consistent performance across questions.",
            ],
            vec!["Keep answers concise under time pressure."],
        )
    } else if overall_score >= 50 {
        (
            "a solid",
            vec!["Covered the core of most questions."],
            vec![
                "Add concrete examples from past work.",
                "Discuss trade-offs and edge cases explicitly.",
            ],
        )
    } else {
        (
            "an early-stage",
            vec!["Attempted every question presented."],
            vec![
                "Review the fundamentals for this role.",
                "Practise structuring answers before going into detail.",
            ],
        )
    };

    OverallFeedback {
        summary: format!(
            "You gave {} performance across {} question(s) for the {} role.",
            band,
            responses.len(),
            role
        ),
        strengths: strengths.into_iter().map(String::from).collect(),
        improvements: improvements.into_iter().map(String::from).collect(),
        overall_score,
        communication_score,
        problem_solving_score,
    }
}
