use crate::dto::interview_dto::{
    EvaluateAnswerPayload, GenerateQuestionsPayload, NextQuestionPayload, OverallFeedbackPayload,
};

const MAX_RESUME_CHARS: usize = 1500;
const MAX_ANSWER_CHARS: usize = 600;

fn instruct(body: &str) -> String {
    format!("<s>[INST] {} [/INST]", body.trim())
}

/// Cuts on a char boundary so multi-byte text never splits.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn resume_section(resume: Option<&str>) -> String {
    match resume.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => format!(
            "\nCandidate resume (excerpt):\n{}\nTailor questions to the experience above where relevant.\n",
            truncate_chars(r, MAX_RESUME_CHARS)
        ),
        None => String::new(),
    }
}

pub fn questions_prompt(payload: &GenerateQuestionsPayload, count: usize) -> String {
    instruct(&format!(
        r#"You are an experienced technical interviewer hiring for the role of "{role}".
Generate exactly {count} interview questions at {difficulty} difficulty.
Mix technical, coding and behavioral questions.
{resume}
Respond ONLY with a JSON array, no commentary. Each item must have this shape:
{{"question": "...", "type": "technical" | "coding" | "behavioral", "expectedAnswer": "key points of a strong answer"}}"#,
        role = payload.role.trim(),
        count = count,
        difficulty = payload.difficulty.as_str(),
        resume = resume_section(payload.resume.as_deref()),
    ))
}

pub fn evaluation_prompt(payload: &EvaluateAnswerPayload) -> String {
    let context = match (&payload.role, payload.difficulty) {
        (Some(role), Some(d)) => format!("The candidate is interviewing for \"{}\" at {} difficulty.\n", role.trim(), d.as_str()),
        (Some(role), None) => format!("The candidate is interviewing for \"{}\".\n", role.trim()),
        (None, Some(d)) => format!("The interview is at {} difficulty.\n", d.as_str()),
        (None, None) => String::new(),
    };
    let code = match payload.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => format!("\nSubmitted code:\n```\n{}\n```\n", code),
        None => String::new(),
    };
    let answer = if payload.answer.trim().is_empty() {
        "(no answer given)"
    } else {
        payload.answer.trim()
    };

    instruct(&format!(
        r#"You are a fair but demanding interviewer evaluating a candidate's answer.
{context}
Question: {question}

Candidate answer: {answer}
{code}
Score the answer from 0 to 10.
Respond ONLY with a JSON object, no commentary:
{{"review": "two or three sentences", "score": <0-10>, "strength": "...", "improvement": "..."}}"#,
        context = context,
        question = payload.question.trim(),
        answer = answer,
        code = code,
    ))
}

pub fn next_question_prompt(payload: &NextQuestionPayload) -> String {
    let history = if payload.history.is_empty() {
        "No questions have been asked yet.".to_string()
    } else {
        payload
            .history
            .iter()
            .enumerate()
            .map(|(i, h)| {
                format!(
                    "Q{n}: {q}\nA{n}: {a}",
                    n = i + 1,
                    q = h.question.trim(),
                    a = truncate_chars(h.answer.trim(), MAX_ANSWER_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    instruct(&format!(
        r#"You are conducting a {difficulty} difficulty interview for the role of "{role}".
{resume}
Conversation so far:
{history}

Ask the single best next question. Build on the candidate's previous answers and do not repeat a question already asked.
Respond ONLY with a JSON object, no commentary:
{{"question": "...", "type": "technical" | "coding" | "behavioral", "requiresCode": true | false}}"#,
        difficulty = payload.difficulty.as_str(),
        role = payload.role.trim(),
        resume = resume_section(payload.resume.as_deref()),
        history = history,
    ))
}

pub fn overall_feedback_prompt(payload: &OverallFeedbackPayload) -> String {
    let transcript = payload
        .responses
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let score = r
                .score
                .map(|s| format!(" (scored {:.1}/10)", s))
                .unwrap_or_default();
            let code = if r.has_code() { " [code submitted]" } else { "" };
            format!(
                "Q{n}: {q}\nA{n}{score}{code}: {a}",
                n = i + 1,
                q = r.question.trim(),
                a = truncate_chars(r.answer.trim(), MAX_ANSWER_CHARS),
                score = score,
                code = code,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    instruct(&format!(
        r#"You are summarising a completed {difficulty} difficulty mock interview for the role of "{role}".

Transcript:
{transcript}

Respond ONLY with a JSON object, no commentary:
{{"summary": "...", "strengths": ["..."], "improvements": ["..."], "overallScore": <0-100>, "communicationScore": <0-100>, "problemSolvingScore": <0-100>}}"#,
        difficulty = payload.difficulty.as_str(),
        role = payload.role.trim(),
        transcript = transcript,
    ))
}
